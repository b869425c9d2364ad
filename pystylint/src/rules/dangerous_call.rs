use crate::rules::{Context, Rule};
use crate::violations::{Violation, ViolationCode};
use ruff_python_ast::Expr;
use ruff_text_size::Ranged;

/// Names that trigger the dangerous-function check when called bare.
const DANGEROUS_NAMES: [&str; 4] = ["eval", "exec", "getattr", "setattr"];

/// Rule flagging calls of `eval`, `exec`, `getattr`, and `setattr`.
///
/// Only the call-site name matters: the check is resolution-free, so
/// rebinding a dangerous name (`getattr = 1`) is not itself a violation,
/// and a qualified call (`builtins.eval(...)`) is not matched.
pub struct DangerousFunctionRule;

impl DangerousFunctionRule {
    /// Creates a new dangerous-function rule instance.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Default for DangerousFunctionRule {
    fn default() -> Self {
        Self::new()
    }
}

impl Rule for DangerousFunctionRule {
    fn name(&self) -> &'static str {
        "DangerousFunctionRule"
    }

    fn code(&self) -> ViolationCode {
        ViolationCode::DangerousFunction
    }

    fn enter_expr(&mut self, expr: &Expr, context: &Context) -> Option<Vec<Violation>> {
        let Expr::Call(call) = expr else {
            return None;
        };
        let Expr::Name(name) = &*call.func else {
            return None;
        };
        if DANGEROUS_NAMES.contains(&name.id.as_str()) {
            return Some(vec![Violation::with_detail(
                ViolationCode::DangerousFunction,
                context.line_index.span(call.range()),
                name.id.as_str(),
            )]);
        }
        None
    }
}
