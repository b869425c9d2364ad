use crate::rules::{Context, Rule};
use crate::violations::{Violation, ViolationCode};
use ruff_python_ast::Expr;
use ruff_text_size::Ranged;

/// Rule flagging every lambda expression.
///
/// There is no exemption: lambdas assigned to a variable, passed inline,
/// or nested inside another lambda each emit one violation.
pub struct LambdaRule;

impl LambdaRule {
    /// Creates a new lambda rule instance.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Default for LambdaRule {
    fn default() -> Self {
        Self::new()
    }
}

impl Rule for LambdaRule {
    fn name(&self) -> &'static str {
        "LambdaRule"
    }

    fn code(&self) -> ViolationCode {
        ViolationCode::Lambda
    }

    fn enter_expr(&mut self, expr: &Expr, context: &Context) -> Option<Vec<Violation>> {
        if let Expr::Lambda(node) = expr {
            return Some(vec![Violation::new(
                ViolationCode::Lambda,
                context.line_index.span(node.range()),
            )]);
        }
        None
    }
}
