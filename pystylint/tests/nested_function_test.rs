//! Scope-stack checks for the nested-function rule.
#![allow(clippy::unwrap_used)]

use pystylint::checker::StyleChecker;
use pystylint::violations::{Violation, ViolationCode};
use std::path::Path;

fn evaluate(source: &str) -> Vec<Violation> {
    StyleChecker::default()
        .evaluate(ViolationCode::NestedFunction, source, Path::new("test.py"))
        .unwrap()
}

#[test]
fn test_one_nested_function() {
    let violations = evaluate("def a():\n    def b():\n        pass");
    assert_eq!(violations.len(), 1);
    assert_eq!(violations[0].span.start.line, 2);
    assert_eq!(violations[0].detail.as_deref(), Some("b"));
}

#[test]
fn test_double_nesting_counts_both_levels() {
    let violations = evaluate("def a():\n    def b():\n        def c():\n            pass");
    assert_eq!(violations.len(), 2);
}

#[test]
fn test_module_scope_function_inside_if_is_not_nested() {
    assert!(evaluate("if x > 0:\n    def b():\n        pass").is_empty());
}

#[test]
fn test_method_in_class_body_is_not_nested() {
    assert!(evaluate("class Dog:\n    def __init__(self):\n        pass").is_empty());
}

#[test]
fn test_constructors_are_not_exempt_as_parents() {
    let violations = evaluate(
        "class Dog:\n    def __init__(self):\n        def helper():\n            pass",
    );
    assert_eq!(violations.len(), 1);
}

#[test]
fn test_siblings_after_a_nested_function_reset_correctly() {
    // Leaving `a` must pop its scope, so `b` is top-level again.
    let source = "def a():\n    def inner():\n        pass\n\ndef b():\n    pass";
    assert_eq!(evaluate(source).len(), 1);
}
