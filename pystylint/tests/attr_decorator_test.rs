//! Checks for the attrs-decorator validation rule.
#![allow(clippy::unwrap_used)]

use pystylint::checker::StyleChecker;
use pystylint::config::Config;
use pystylint::violations::{Violation, ViolationCode};
use std::path::Path;

fn evaluate(source: &str) -> Vec<Violation> {
    StyleChecker::default()
        .evaluate(ViolationCode::AttrDecorator, source, Path::new("test.py"))
        .unwrap()
}

#[test]
fn test_valid_decorators_pass() {
    for source in [
        "@attr.s(auto_attribs=True, frozen=True)\nclass Dog:\n    pass",
        "@attr.s(auto_attribs=True)\nclass Dog:\n    pass",
        "@attr.s(auto_attribs=True, kw_only=True, repr=False)\nclass Dog:\n    pass",
    ] {
        assert!(evaluate(source).is_empty(), "source: {source}");
    }
}

#[test]
fn test_kw_only_must_be_true() {
    let source = "@attr.s(auto_attribs=True, frozen=False, kw_only=False)\nclass Dog:\n    pass";
    assert_eq!(evaluate(source).len(), 1);
}

#[test]
fn test_repr_must_be_false() {
    let source = "@attr.s(auto_attribs=True, frozen=False, repr=True)\nclass Dog:\n    pass";
    assert_eq!(evaluate(source).len(), 1);
}

#[test]
fn test_multiple_failing_conditions_each_emit() {
    // missing auto_attribs, repr not False, random not a valid keyword
    let source = "@attr.s(random=0, frozen=False, repr=True)\nclass Dog:\n    pass";
    assert_eq!(evaluate(source).len(), 3);
}

#[test]
fn test_auto_attribs_false_is_one_violation() {
    let source = "@attr.s(auto_attribs=False)\nclass Dog:\n    pass";
    assert_eq!(evaluate(source).len(), 1);
}

#[test]
fn test_string_literal_booleans_are_not_booleans() {
    // Conservative literal-only check: "True" the string is not True.
    let source = "@attr.s(auto_attribs=\"True\")\nclass Dog:\n    pass";
    assert_eq!(evaluate(source).len(), 1);
}

#[test]
fn test_bare_decorator_is_missing_auto_attribs() {
    assert_eq!(evaluate("@attr.s\nclass Dog:\n    pass").len(), 1);
}

#[test]
fn test_other_decorators_are_ignored() {
    for source in [
        "@dataclass\nclass Dog:\n    pass",
        "@functools.cache\nclass Dog:\n    pass",
        "@attr.ib(default=1)\nclass Dog:\n    pass",
    ] {
        assert!(evaluate(source).is_empty(), "source: {source}");
    }
}

#[test]
fn test_decorated_function_is_ignored() {
    // Only class decorators are validated.
    assert!(evaluate("@attr.s(frozen=True)\ndef f():\n    pass").is_empty());
}

#[test]
fn test_positional_arguments_skip_the_instance() {
    // Unsupported shape: the instance is skipped, no violations leak out.
    let source = "@attr.s(True, auto_attribs=False)\nclass Dog:\n    pass";
    assert!(evaluate(source).is_empty());
}

#[test]
fn test_other_decorators_on_same_class_still_checked() {
    let source = "@attr.s(True)\n@attr.s(repr=True, auto_attribs=True)\nclass Dog:\n    pass";
    assert_eq!(evaluate(source).len(), 1);
}

#[test]
fn test_configured_decorator_name() {
    let mut config = Config::default();
    config.pystylint.attr_decorator = Some("attrs.define".to_owned());
    let checker = StyleChecker::new(config);
    let source = "@attrs.define(kw_only=False, auto_attribs=True)\nclass Dog:\n    pass";
    let violations = checker
        .evaluate(ViolationCode::AttrDecorator, source, Path::new("test.py"))
        .unwrap();
    assert_eq!(violations.len(), 1);
    // And the default name is no longer matched.
    let untouched = checker
        .evaluate(
            ViolationCode::AttrDecorator,
            "@attr.s(kw_only=False, auto_attribs=True)\nclass Dog:\n    pass",
            Path::new("test.py"),
        )
        .unwrap();
    assert!(untouched.is_empty());
}

#[test]
fn test_violations_anchor_at_the_decorator() {
    let source = "@attr.s(kw_only=False, auto_attribs=True)\nclass Dog:\n    pass";
    let violations = evaluate(source);
    assert_eq!(violations.len(), 1);
    assert_eq!(violations[0].span.start.line, 1);
    assert_eq!(violations[0].span.start.column, 0);
}
