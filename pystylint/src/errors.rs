//! Typed errors for the traversal engine and individual rules.

use std::fmt;
use std::path::PathBuf;

/// Fatal traversal error: the supplied tree is structurally inconsistent.
///
/// Aborts the whole run with no partial report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MalformedTreeError {
    /// Nesting exceeded [`crate::walker::MAX_TREE_DEPTH`], which a valid
    /// parse cannot produce.
    DepthExceeded {
        /// The depth at which traversal gave up.
        depth: usize,
    },
}

impl fmt::Display for MalformedTreeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MalformedTreeError::DepthExceeded { depth } => {
                write!(f, "malformed syntax tree: nesting depth {depth} exceeded")
            }
        }
    }
}

impl std::error::Error for MalformedTreeError {}

/// The attrs decorator rule met an argument shape it does not support.
///
/// Fatal to that one decorator instance only; other decorators and rules
/// continue unaffected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MalformedDecoratorError {
    /// The decorator was invoked with positional arguments.
    PositionalArguments {
        /// 1-based line of the decorator.
        line: usize,
    },
}

impl fmt::Display for MalformedDecoratorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MalformedDecoratorError::PositionalArguments { line } => {
                write!(
                    f,
                    "decorator on line {line} uses positional arguments; only keywords are supported"
                )
            }
        }
    }
}

impl std::error::Error for MalformedDecoratorError {}

/// An assignment target's shape is not one of name, subscript, or attribute.
///
/// Local-recovery case: the reassignment rule treats this as "not a match"
/// and traversal continues.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnresolvedAssignTargetError {
    /// 1-based line of the assignment.
    pub line: usize,
}

impl fmt::Display for UnresolvedAssignTargetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unsupported assignment target shape on line {}",
            self.line
        )
    }
}

impl std::error::Error for UnresolvedAssignTargetError {}

/// A file the entry point could not parse into a tree.
#[derive(Debug, Clone)]
pub struct ParseError {
    /// File the parser rejected.
    pub file: PathBuf,
    /// Parser diagnostic.
    pub error: String,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.file.display(), self.error)
    }
}

impl std::error::Error for ParseError {}
