use crate::config::Config;
use crate::errors::MalformedDecoratorError;
use crate::rules::{Context, Rule};
use crate::violations::{Violation, ViolationCode};
use compact_str::CompactString;
use ruff_python_ast::{Decorator, Expr, ExprCall, Keyword, Stmt};
use ruff_text_size::Ranged;

/// Keywords the attrs decorator may carry.
const ALLOWED_KEYWORDS: [&str; 4] = ["auto_attribs", "frozen", "kw_only", "repr"];

/// Rule validating keyword usage on the attrs class decorator.
///
/// The decorator to check is a configurable two-part dotted name
/// (`attr.s` by default). Keywords outside the allow-list, a missing or
/// non-`True` `auto_attribs`, a non-`True` `kw_only`, and a non-`False`
/// `repr` each emit their own violation at the decorator's span. "True"
/// and "False" mean boolean literal tokens only; no expression is
/// evaluated.
pub struct AttrDecoratorRule {
    base: CompactString,
    attr: CompactString,
}

impl AttrDecoratorRule {
    /// Creates a rule instance checking the default `attr.s` decorator.
    #[must_use]
    pub fn new() -> Self {
        Self {
            base: CompactString::from("attr"),
            attr: CompactString::from("s"),
        }
    }

    /// Creates a rule instance checking the configured decorator name.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        let (base, attr) = config.attr_decorator_parts();
        Self {
            base: CompactString::from(base),
            attr: CompactString::from(attr),
        }
    }

    /// Whether an attribute expression is the decorator this rule checks.
    fn matches_name(&self, expr: &Expr) -> bool {
        let Expr::Attribute(attribute) = expr else {
            return false;
        };
        let Expr::Name(base) = &*attribute.value else {
            return false;
        };
        base.id.as_str() == self.base && attribute.attr.as_str() == self.attr
    }

    /// Validates one decorator invocation's keyword arguments.
    ///
    /// Positional arguments (and `**` splats, whose keyword set is
    /// unknowable) break the rule's keyword-only assumption and are
    /// rejected rather than silently passed.
    fn validate_call(
        &self,
        call: &ExprCall,
        decorator: &Decorator,
        context: &Context,
    ) -> Result<Vec<Violation>, MalformedDecoratorError> {
        let line = context.line_index.line_index(decorator.range().start());
        if !call.arguments.args.is_empty()
            || call.arguments.keywords.iter().any(|kw| kw.arg.is_none())
        {
            return Err(MalformedDecoratorError::PositionalArguments { line });
        }

        let span = context.line_index.span(decorator.range());
        let mut violations = Vec::new();
        let mut auto_attribs_ok = false;

        for keyword in &call.arguments.keywords {
            let Some(name) = keyword.arg.as_ref() else {
                continue;
            };
            if !ALLOWED_KEYWORDS.contains(&name.as_str()) {
                violations.push(Violation::with_detail(
                    ViolationCode::AttrDecorator,
                    span,
                    format!("unexpected keyword '{name}'"),
                ));
                continue;
            }
            match name.as_str() {
                "auto_attribs" => {
                    if is_literal_bool(keyword, true) {
                        auto_attribs_ok = true;
                    } else {
                        violations.push(Violation::with_detail(
                            ViolationCode::AttrDecorator,
                            span,
                            "auto_attribs must be True",
                        ));
                        // A wrong value still counts as "present".
                        auto_attribs_ok = true;
                    }
                }
                "kw_only" => {
                    if !is_literal_bool(keyword, true) {
                        violations.push(Violation::with_detail(
                            ViolationCode::AttrDecorator,
                            span,
                            "kw_only must be True",
                        ));
                    }
                }
                "repr" => {
                    if !is_literal_bool(keyword, false) {
                        violations.push(Violation::with_detail(
                            ViolationCode::AttrDecorator,
                            span,
                            "repr must be False",
                        ));
                    }
                }
                _ => {}
            }
        }

        if !auto_attribs_ok {
            violations.push(Violation::with_detail(
                ViolationCode::AttrDecorator,
                span,
                "auto_attribs must be present",
            ));
        }

        Ok(violations)
    }
}

/// Whether a keyword's value is exactly the boolean literal `expected`.
fn is_literal_bool(keyword: &Keyword, expected: bool) -> bool {
    matches!(&keyword.value, Expr::BooleanLiteral(literal) if literal.value == expected)
}

impl Default for AttrDecoratorRule {
    fn default() -> Self {
        Self::new()
    }
}

impl Rule for AttrDecoratorRule {
    fn name(&self) -> &'static str {
        "AttrDecoratorRule"
    }

    fn code(&self) -> ViolationCode {
        ViolationCode::AttrDecorator
    }

    fn enter_stmt(&mut self, stmt: &Stmt, context: &Context) -> Option<Vec<Violation>> {
        let Stmt::ClassDef(node) = stmt else {
            return None;
        };

        let mut violations = Vec::new();
        for decorator in &node.decorator_list {
            match &decorator.expression {
                Expr::Call(call) if self.matches_name(&call.func) => {
                    match self.validate_call(call, decorator, context) {
                        Ok(found) => violations.extend(found),
                        Err(err) => {
                            // Skip this decorator instance; others continue.
                            tracing::debug!(rule = "AttrDecoratorRule", %err, "skipping decorator");
                        }
                    }
                }
                expr if self.matches_name(expr) => {
                    // Bare `@attr.s` carries no keywords at all, so the
                    // required auto_attribs is missing.
                    violations.push(Violation::with_detail(
                        ViolationCode::AttrDecorator,
                        context.line_index.span(decorator.range()),
                        "auto_attribs must be present",
                    ));
                }
                _ => {}
            }
        }

        (!violations.is_empty()).then_some(violations)
    }
}
