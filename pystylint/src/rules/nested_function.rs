use crate::rules::{Context, Rule};
use crate::violations::{Violation, ViolationCode};
use compact_str::CompactString;
use ruff_python_ast::Stmt;
use ruff_text_size::Ranged;
use smallvec::SmallVec;

/// Rule flagging function definitions nested inside other functions.
///
/// A function defined at module scope or directly in a class body is not
/// nested. There is no name-based exemption: `__init__` and friends count
/// like any other enclosing function.
pub struct NestedFunctionRule {
    /// Names of the functions traversal is currently inside.
    function_stack: SmallVec<[CompactString; 4]>,
}

impl NestedFunctionRule {
    /// Creates a new nested-function rule instance.
    #[must_use]
    pub fn new() -> Self {
        Self {
            function_stack: SmallVec::new(),
        }
    }
}

impl Default for NestedFunctionRule {
    fn default() -> Self {
        Self::new()
    }
}

impl Rule for NestedFunctionRule {
    fn name(&self) -> &'static str {
        "NestedFunctionRule"
    }

    fn code(&self) -> ViolationCode {
        ViolationCode::NestedFunction
    }

    fn enter_stmt(&mut self, stmt: &Stmt, context: &Context) -> Option<Vec<Violation>> {
        let Stmt::FunctionDef(node) = stmt else {
            return None;
        };

        let violation = if self.function_stack.is_empty() {
            None
        } else {
            Some(vec![Violation::with_detail(
                ViolationCode::NestedFunction,
                context.line_index.span(node.range()),
                node.name.as_str(),
            )])
        };

        self.function_stack
            .push(CompactString::from(node.name.as_str()));
        violation
    }

    fn leave_stmt(&mut self, stmt: &Stmt, _context: &Context) -> Option<Vec<Violation>> {
        if matches!(stmt, Stmt::FunctionDef(_)) {
            self.function_stack.pop();
        }
        None
    }
}
