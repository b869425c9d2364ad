use crate::rules::{Context, Rule};
use crate::violations::{Violation, ViolationCode};
use ruff_python_ast::{Expr, ParameterWithDefault, Stmt};
use ruff_text_size::Ranged;

/// Rule flagging list/dict/set literals used as parameter defaults.
///
/// The check is purely about literal container shape: tuple, `None`,
/// numeric, and string defaults never trigger, and neither does a call like
/// `dict()`. Each violation is anchored at the default value itself, not
/// the whole function.
pub struct MutableDefaultArgRule;

impl MutableDefaultArgRule {
    /// Creates a new mutable-default rule instance.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    fn check_parameter(
        parameter: &ParameterWithDefault,
        context: &Context,
    ) -> Option<Violation> {
        let default = parameter.default.as_deref()?;
        if matches!(default, Expr::List(_) | Expr::Dict(_) | Expr::Set(_)) {
            return Some(Violation::with_detail(
                ViolationCode::MutableDefaultArg,
                context.line_index.span(default.range()),
                parameter.parameter.name.as_str(),
            ));
        }
        None
    }
}

impl Default for MutableDefaultArgRule {
    fn default() -> Self {
        Self::new()
    }
}

impl Rule for MutableDefaultArgRule {
    fn name(&self) -> &'static str {
        "MutableDefaultArgRule"
    }

    fn code(&self) -> ViolationCode {
        ViolationCode::MutableDefaultArg
    }

    fn enter_stmt(&mut self, stmt: &Stmt, context: &Context) -> Option<Vec<Violation>> {
        let Stmt::FunctionDef(node) = stmt else {
            return None;
        };
        let violations: Vec<Violation> = node
            .parameters
            .posonlyargs
            .iter()
            .chain(&node.parameters.args)
            .chain(&node.parameters.kwonlyargs)
            .filter_map(|parameter| Self::check_parameter(parameter, context))
            .collect();
        (!violations.is_empty()).then_some(violations)
    }
}
