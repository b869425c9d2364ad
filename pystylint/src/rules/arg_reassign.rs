use crate::errors::UnresolvedAssignTargetError;
use crate::rules::{Context, Rule};
use crate::violations::{Violation, ViolationCode};
use compact_str::CompactString;
use ruff_python_ast::{Expr, Parameters, Stmt};
use ruff_text_size::Ranged;
use smallvec::SmallVec;

/// Scopes whose parameters may be reassigned freely. Parameter mutation in
/// constructor-like methods is idiomatic.
const EXEMPT_SCOPES: [&str; 2] = ["__init__", "__new__"];

/// One live function scope on the rule's private stack.
#[derive(Debug, Clone)]
pub struct FunctionScope {
    /// The function's declared name.
    pub name: CompactString,
    /// Parameter names in declaration order.
    pub parameter_names: Vec<CompactString>,
}

impl FunctionScope {
    fn from_parameters(name: &str, parameters: &Parameters) -> Self {
        let mut parameter_names = Vec::new();
        for arg in &parameters.posonlyargs {
            parameter_names.push(CompactString::from(arg.parameter.name.as_str()));
        }
        for arg in &parameters.args {
            parameter_names.push(CompactString::from(arg.parameter.name.as_str()));
        }
        if let Some(vararg) = &parameters.vararg {
            parameter_names.push(CompactString::from(vararg.name.as_str()));
        }
        for arg in &parameters.kwonlyargs {
            parameter_names.push(CompactString::from(arg.parameter.name.as_str()));
        }
        if let Some(kwarg) = &parameters.kwarg {
            parameter_names.push(CompactString::from(kwarg.name.as_str()));
        }
        Self {
            name: CompactString::from(name),
            parameter_names,
        }
    }

    /// Whether `name` is one of this scope's parameters.
    #[must_use]
    pub fn contains_parameter(&self, name: &str) -> bool {
        self.parameter_names.iter().any(|p| p == name)
    }

    fn is_exempt(&self) -> bool {
        EXEMPT_SCOPES.contains(&self.name.as_str())
    }
}

/// Extracts the base identifier an assignment target ultimately binds.
///
/// `lst[0] = 1` and `x.value = 1` rebind through the parameter alias, so the
/// subscripted/attributed base name is what the check cares about.
fn extract_target_base<'e>(
    target: &'e Expr,
    line: usize,
) -> Result<&'e str, UnresolvedAssignTargetError> {
    match target {
        Expr::Name(name) => Ok(name.id.as_str()),
        Expr::Subscript(subscript) => match &*subscript.value {
            Expr::Name(name) => Ok(name.id.as_str()),
            _ => Err(UnresolvedAssignTargetError { line }),
        },
        Expr::Attribute(attribute) => match &*attribute.value {
            Expr::Name(name) => Ok(name.id.as_str()),
            _ => Err(UnresolvedAssignTargetError { line }),
        },
        _ => Err(UnresolvedAssignTargetError { line }),
    }
}

/// Rule flagging assignment to a function parameter inside the function.
///
/// Keeps its own stack of [`FunctionScope`]s; plain and augmented
/// assignments whose target base name matches a parameter of the innermost
/// scope are violations. Scopes named `__init__` or `__new__` are exempt
/// wholesale.
pub struct FunctionArgAssignRule {
    scope_stack: SmallVec<[FunctionScope; 4]>,
}

impl FunctionArgAssignRule {
    /// Creates a new argument-reassignment rule instance.
    #[must_use]
    pub fn new() -> Self {
        Self {
            scope_stack: SmallVec::new(),
        }
    }

    /// Checks one assignment target against the innermost scope.
    ///
    /// Unsupported target shapes are a local-recovery case: logged at debug
    /// level and treated as "not a match".
    fn check_target(
        &self,
        target: &Expr,
        assignment_range: ruff_text_size::TextRange,
        context: &Context,
    ) -> Option<Violation> {
        let scope = self.scope_stack.last()?;
        let line = context.line_index.line_index(assignment_range.start());
        let base = match extract_target_base(target, line) {
            Ok(base) => base,
            Err(err) => {
                tracing::debug!(rule = "FunctionArgAssignRule", %err, "skipping target");
                return None;
            }
        };
        if scope.contains_parameter(base) {
            return Some(Violation::with_detail(
                ViolationCode::FunctionArgAssign,
                context.line_index.span(assignment_range),
                base,
            ));
        }
        None
    }

    fn in_exempt_scope(&self) -> bool {
        self.scope_stack.last().is_some_and(FunctionScope::is_exempt)
    }
}

impl Default for FunctionArgAssignRule {
    fn default() -> Self {
        Self::new()
    }
}

impl Rule for FunctionArgAssignRule {
    fn name(&self) -> &'static str {
        "FunctionArgAssignRule"
    }

    fn code(&self) -> ViolationCode {
        ViolationCode::FunctionArgAssign
    }

    fn enter_stmt(&mut self, stmt: &Stmt, context: &Context) -> Option<Vec<Violation>> {
        match stmt {
            Stmt::FunctionDef(node) => {
                self.scope_stack
                    .push(FunctionScope::from_parameters(&node.name, &node.parameters));
                None
            }
            Stmt::Assign(node) => {
                if self.scope_stack.is_empty() || self.in_exempt_scope() {
                    return None;
                }
                let violations: Vec<Violation> = node
                    .targets
                    .iter()
                    .filter_map(|target| self.check_target(target, node.range(), context))
                    .collect();
                (!violations.is_empty()).then_some(violations)
            }
            Stmt::AugAssign(node) => {
                if self.scope_stack.is_empty() || self.in_exempt_scope() {
                    return None;
                }
                self.check_target(&node.target, node.range(), context)
                    .map(|violation| vec![violation])
            }
            _ => None,
        }
    }

    fn leave_stmt(&mut self, stmt: &Stmt, _context: &Context) -> Option<Vec<Violation>> {
        if matches!(stmt, Stmt::FunctionDef(_)) {
            self.scope_stack.pop();
        }
        None
    }
}
