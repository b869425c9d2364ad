use crate::config::Config;
use crate::utils::LineIndex;
use crate::violations::{Violation, ViolationCode};
use ruff_python_ast::{Expr, Stmt};
use rustc_hash::FxHashSet;
use std::path::PathBuf;

#[derive(Debug, Clone)]
/// Context passed to rules during traversal.
pub struct Context {
    /// Name of the source being checked, as it should appear in reports.
    pub source_name: PathBuf,
    /// Line index for accurate line/column mapping.
    pub line_index: LineIndex,
    /// Configuration settings.
    pub config: Config,
}

/// Trait defining a style rule.
///
/// A rule observes traversal events, keeps whatever scope state it needs in
/// its own fields, and returns violations from its hooks. Hooks it does not
/// implement default to no-ops, so a rule only pays for the node kinds it
/// declares interest in.
pub trait Rule: Send + Sync {
    /// Returns the descriptive name of the rule.
    fn name(&self) -> &'static str;
    /// Returns the catalog entry this rule detects.
    fn code(&self) -> ViolationCode;
    /// Called when entering a statement, before its children.
    fn enter_stmt(&mut self, _stmt: &Stmt, _context: &Context) -> Option<Vec<Violation>> {
        None
    }
    /// Called when leaving a statement, after all its children.
    fn leave_stmt(&mut self, _stmt: &Stmt, _context: &Context) -> Option<Vec<Violation>> {
        None
    }
    /// Called when entering an expression, before its children.
    fn enter_expr(&mut self, _expr: &Expr, _context: &Context) -> Option<Vec<Violation>> {
        None
    }
    /// Called when leaving an expression, after all its children.
    fn leave_expr(&mut self, _expr: &Expr, _context: &Context) -> Option<Vec<Violation>> {
        None
    }
}

mod arg_reassign;
mod attr_decorator;
mod dangerous_call;
mod lambda_rule;
mod mutable_default;
mod nested_function;

pub use arg_reassign::{FunctionArgAssignRule, FunctionScope};
pub use attr_decorator::AttrDecoratorRule;
pub use dangerous_call::DangerousFunctionRule;
pub use lambda_rule::LambdaRule;
pub use mutable_default::MutableDefaultArgRule;
pub use nested_function::NestedFunctionRule;

/// Builds one rule instance for a catalog entry.
#[must_use]
pub fn rule_for(code: ViolationCode, config: &Config) -> Box<dyn Rule> {
    match code {
        ViolationCode::DangerousFunction => Box::new(DangerousFunctionRule::new()),
        ViolationCode::NestedFunction => Box::new(NestedFunctionRule::new()),
        ViolationCode::Lambda => Box::new(LambdaRule::new()),
        ViolationCode::FunctionArgAssign => Box::new(FunctionArgAssignRule::new()),
        ViolationCode::AttrDecorator => Box::new(AttrDecoratorRule::from_config(config)),
        ViolationCode::MutableDefaultArg => Box::new(MutableDefaultArgRule::new()),
    }
}

/// Builds the full rule set in catalog order, honoring the configuration's
/// `select`/`ignore` lists.
#[must_use]
pub fn configured_rules(config: &Config) -> Vec<Box<dyn Rule>> {
    let selected: Option<FxHashSet<ViolationCode>> =
        config.pystylint.select.as_ref().map(|codes| {
            codes
                .iter()
                .filter_map(|c| ViolationCode::from_code(c))
                .collect()
        });
    let ignored: FxHashSet<ViolationCode> = config
        .pystylint
        .ignore
        .as_ref()
        .map(|codes| {
            codes
                .iter()
                .filter_map(|c| ViolationCode::from_code(c))
                .collect()
        })
        .unwrap_or_default();

    ViolationCode::ALL
        .into_iter()
        .filter(|code| selected.as_ref().is_none_or(|s| s.contains(code)))
        .filter(|code| !ignored.contains(code))
        .map(|code| rule_for(code, config))
        .collect()
}

/// Builds every rule in catalog order, ignoring configuration filters.
#[must_use]
pub fn all_rules(config: &Config) -> Vec<Box<dyn Rule>> {
    ViolationCode::ALL
        .into_iter()
        .map(|code| rule_for(code, config))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_rules_covers_catalog_in_order() {
        let rules = all_rules(&Config::default());
        let codes: Vec<ViolationCode> = rules.iter().map(|r| r.code()).collect();
        assert_eq!(codes, ViolationCode::ALL);
    }

    #[test]
    fn test_select_and_ignore_filters() {
        let mut config = Config::default();
        config.pystylint.select = Some(vec!["E1001".to_owned(), "E1003".to_owned()]);
        config.pystylint.ignore = Some(vec!["E1003".to_owned()]);
        let rules = configured_rules(&config);
        let codes: Vec<ViolationCode> = rules.iter().map(|r| r.code()).collect();
        assert_eq!(codes, vec![ViolationCode::DangerousFunction]);
    }

    #[test]
    fn test_unknown_codes_in_config_are_dropped() {
        let mut config = Config::default();
        config.pystylint.select = Some(vec!["E9999".to_owned()]);
        assert!(configured_rules(&config).is_empty());
    }
}
