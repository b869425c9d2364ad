//! The violation data model and the frozen catalog of rule codes.

use serde::Serialize;

/// Stable identifier for each style rule.
///
/// Codes are frozen public API: once published they are never renumbered or
/// reused, so downstream tooling can match on them across releases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum ViolationCode {
    /// Call of `eval`/`exec`/`getattr`/`setattr` by bare name.
    DangerousFunction,
    /// Function defined inside another function.
    NestedFunction,
    /// Any lambda expression.
    Lambda,
    /// Assignment to a function parameter inside the function body.
    FunctionArgAssign,
    /// Invalid keyword configuration on the attrs class decorator.
    AttrDecorator,
    /// List/dict/set literal used as a parameter default.
    MutableDefaultArg,
}

impl ViolationCode {
    /// Every catalog entry, in catalog order.
    pub const ALL: [ViolationCode; 6] = [
        ViolationCode::DangerousFunction,
        ViolationCode::NestedFunction,
        ViolationCode::Lambda,
        ViolationCode::FunctionArgAssign,
        ViolationCode::AttrDecorator,
        ViolationCode::MutableDefaultArg,
    ];

    /// Returns the stable machine-readable code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            ViolationCode::DangerousFunction => "E1001",
            ViolationCode::NestedFunction => "E1002",
            ViolationCode::Lambda => "E1003",
            ViolationCode::FunctionArgAssign => "E1004",
            ViolationCode::AttrDecorator => "E1005",
            ViolationCode::MutableDefaultArg => "E1006",
        }
    }

    /// Returns the fixed human-readable message.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            ViolationCode::DangerousFunction => {
                "Use of dangerous function (eval, exec, getattr, setattr) is discouraged."
            }
            ViolationCode::NestedFunction => {
                "Definition of a function within another function is discouraged."
            }
            ViolationCode::Lambda => {
                "Use of lambda functions is discouraged in favor of named functions."
            }
            ViolationCode::FunctionArgAssign => {
                "Assignment to function arguments within the function body is discouraged."
            }
            ViolationCode::AttrDecorator => "Incorrect usage of @attr.s decorator detected.",
            ViolationCode::MutableDefaultArg => "Use of mutable default argument is discouraged.",
        }
    }

    /// Looks up a catalog entry by its machine-readable code (e.g. `"E1003"`).
    #[must_use]
    pub fn from_code(code: &str) -> Option<ViolationCode> {
        ViolationCode::ALL.into_iter().find(|c| c.code() == code)
    }
}

/// A single line/column position in a source file.
///
/// `line` is 1-based; `column` is a 0-based byte column. The reporter
/// renders columns 1-based at format time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct SourcePosition {
    /// 1-based line number.
    pub line: usize,
    /// 0-based column.
    pub column: usize,
}

/// The region of source a violation is anchored to, `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SourceSpan {
    /// Position of the first byte of the offending node.
    pub start: SourcePosition,
    /// Position one past the last byte of the offending node.
    pub end: SourcePosition,
}

/// One reported instance of a rule's condition being met.
///
/// Created by a rule during traversal, consumed read-only by the reporter,
/// never mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    /// Which catalog entry was violated.
    pub code: ViolationCode,
    /// Where in the source the violation sits.
    pub span: SourceSpan,
    /// Rule-specific context, e.g. the offending identifier.
    pub detail: Option<String>,
}

impl Violation {
    /// Creates a violation with no extra detail.
    #[must_use]
    pub fn new(code: ViolationCode, span: SourceSpan) -> Self {
        Self {
            code,
            span,
            detail: None,
        }
    }

    /// Creates a violation carrying rule-specific context.
    #[must_use]
    pub fn with_detail(code: ViolationCode, span: SourceSpan, detail: impl Into<String>) -> Self {
        Self {
            code,
            span,
            detail: Some(detail.into()),
        }
    }
}
