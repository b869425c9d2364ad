//! The traversal engine: one depth-first walk, every rule observing.

use crate::errors::MalformedTreeError;
use crate::rules::{Context, Rule};
use crate::violations::{Violation, ViolationCode};
use ruff_python_ast::{self as ast, Expr, ModModule, Stmt};

/// Nesting deeper than this cannot come from a valid parse; treat it as a
/// structurally inconsistent tree.
pub const MAX_TREE_DEPTH: usize = 400;

/// One registered rule together with the violations it has produced.
struct RuleSlot {
    rule: Box<dyn Rule>,
    violations: Vec<Violation>,
}

/// A single rule's results after a completed walk, in registration order.
#[derive(Debug)]
pub struct RuleViolations {
    /// The catalog entry the rule detects.
    pub code: ViolationCode,
    /// The rule's descriptive name.
    pub name: &'static str,
    /// Position-sorted violations the rule produced.
    pub violations: Vec<Violation>,
}

/// Walks a parsed module once, dispatching enter/leave events for every
/// statement and expression to every registered rule.
///
/// The walker holds no analysis state of its own; scope tracking lives
/// inside each rule, and each rule's violations accumulate in its own slot,
/// so rules cannot observe or contaminate one another.
pub struct StyleWalker {
    slots: Vec<RuleSlot>,
    context: Context,
    depth: usize,
    error: Option<MalformedTreeError>,
}

impl StyleWalker {
    /// Creates a walker over the given rules, in registration order.
    #[must_use]
    pub fn new(rules: Vec<Box<dyn Rule>>, context: Context) -> Self {
        Self {
            slots: rules
                .into_iter()
                .map(|rule| RuleSlot {
                    rule,
                    violations: Vec::new(),
                })
                .collect(),
            context,
            depth: 0,
            error: None,
        }
    }

    /// Performs the single depth-first walk over `module`.
    ///
    /// On success each rule's collection is sorted by ascending start line,
    /// then start column, with discovery order breaking exact ties.
    pub fn walk_module(&mut self, module: &ModModule) -> Result<(), MalformedTreeError> {
        for stmt in &module.body {
            self.visit_stmt(stmt);
        }
        if let Some(err) = self.error.take() {
            return Err(err);
        }
        for slot in &mut self.slots {
            slot.violations
                .sort_by_key(|violation| (violation.span.start.line, violation.span.start.column));
        }
        Ok(())
    }

    /// Consumes the walker, yielding per-rule results in registration order.
    #[must_use]
    pub fn into_collections(self) -> Vec<RuleViolations> {
        self.slots
            .into_iter()
            .map(|slot| RuleViolations {
                code: slot.rule.code(),
                name: slot.rule.name(),
                violations: slot.violations,
            })
            .collect()
    }

    fn dispatch_enter_stmt(&mut self, stmt: &Stmt) {
        let context = &self.context;
        for slot in &mut self.slots {
            if let Some(found) = slot.rule.enter_stmt(stmt, context) {
                slot.violations.extend(found);
            }
        }
    }

    fn dispatch_leave_stmt(&mut self, stmt: &Stmt) {
        let context = &self.context;
        for slot in &mut self.slots {
            if let Some(found) = slot.rule.leave_stmt(stmt, context) {
                slot.violations.extend(found);
            }
        }
    }

    fn dispatch_enter_expr(&mut self, expr: &Expr) {
        let context = &self.context;
        for slot in &mut self.slots {
            if let Some(found) = slot.rule.enter_expr(expr, context) {
                slot.violations.extend(found);
            }
        }
    }

    fn dispatch_leave_expr(&mut self, expr: &Expr) {
        let context = &self.context;
        for slot in &mut self.slots {
            if let Some(found) = slot.rule.leave_expr(expr, context) {
                slot.violations.extend(found);
            }
        }
    }

    fn visit_stmt(&mut self, stmt: &Stmt) {
        if self.error.is_some() {
            return;
        }
        if self.depth >= MAX_TREE_DEPTH {
            self.error = Some(MalformedTreeError::DepthExceeded { depth: self.depth });
            return;
        }
        self.depth += 1;

        self.dispatch_enter_stmt(stmt);
        self.visit_stmt_children(stmt);
        self.dispatch_leave_stmt(stmt);

        self.depth -= 1;
    }

    fn visit_stmt_children(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::FunctionDef(node) => {
                for decorator in &node.decorator_list {
                    self.visit_expr(&decorator.expression);
                }
                self.visit_parameters(&node.parameters);
                if let Some(returns) = &node.returns {
                    self.visit_expr(returns);
                }
                for stmt in &node.body {
                    self.visit_stmt(stmt);
                }
            }
            Stmt::ClassDef(node) => {
                for decorator in &node.decorator_list {
                    self.visit_expr(&decorator.expression);
                }
                if let Some(arguments) = &node.arguments {
                    for base in &arguments.args {
                        self.visit_expr(base);
                    }
                    for keyword in &arguments.keywords {
                        self.visit_expr(&keyword.value);
                    }
                }
                for stmt in &node.body {
                    self.visit_stmt(stmt);
                }
            }
            Stmt::Assign(node) => {
                for target in &node.targets {
                    self.visit_expr(target);
                }
                self.visit_expr(&node.value);
            }
            Stmt::AugAssign(node) => {
                self.visit_expr(&node.target);
                self.visit_expr(&node.value);
            }
            Stmt::AnnAssign(node) => {
                self.visit_expr(&node.target);
                self.visit_expr(&node.annotation);
                if let Some(value) = &node.value {
                    self.visit_expr(value);
                }
            }
            Stmt::Expr(node) => self.visit_expr(&node.value),
            Stmt::If(node) => {
                self.visit_expr(&node.test);
                for stmt in &node.body {
                    self.visit_stmt(stmt);
                }
                for clause in &node.elif_else_clauses {
                    if let Some(test) = &clause.test {
                        self.visit_expr(test);
                    }
                    for stmt in &clause.body {
                        self.visit_stmt(stmt);
                    }
                }
            }
            Stmt::For(node) => {
                self.visit_expr(&node.target);
                self.visit_expr(&node.iter);
                for stmt in &node.body {
                    self.visit_stmt(stmt);
                }
                for stmt in &node.orelse {
                    self.visit_stmt(stmt);
                }
            }
            Stmt::While(node) => {
                self.visit_expr(&node.test);
                for stmt in &node.body {
                    self.visit_stmt(stmt);
                }
                for stmt in &node.orelse {
                    self.visit_stmt(stmt);
                }
            }
            Stmt::With(node) => {
                for item in &node.items {
                    self.visit_expr(&item.context_expr);
                    if let Some(optional_vars) = &item.optional_vars {
                        self.visit_expr(optional_vars);
                    }
                }
                for stmt in &node.body {
                    self.visit_stmt(stmt);
                }
            }
            Stmt::Match(node) => {
                self.visit_expr(&node.subject);
                // Patterns cannot contain calls or lambdas; guards and
                // bodies can.
                for case in &node.cases {
                    if let Some(guard) = &case.guard {
                        self.visit_expr(guard);
                    }
                    for stmt in &case.body {
                        self.visit_stmt(stmt);
                    }
                }
            }
            Stmt::Try(node) => {
                for stmt in &node.body {
                    self.visit_stmt(stmt);
                }
                for ast::ExceptHandler::ExceptHandler(handler) in &node.handlers {
                    if let Some(exc) = &handler.type_ {
                        self.visit_expr(exc);
                    }
                    for stmt in &handler.body {
                        self.visit_stmt(stmt);
                    }
                }
                for stmt in &node.orelse {
                    self.visit_stmt(stmt);
                }
                for stmt in &node.finalbody {
                    self.visit_stmt(stmt);
                }
            }
            Stmt::Return(node) => {
                if let Some(value) = &node.value {
                    self.visit_expr(value);
                }
            }
            Stmt::Raise(node) => {
                if let Some(exc) = &node.exc {
                    self.visit_expr(exc);
                }
                if let Some(cause) = &node.cause {
                    self.visit_expr(cause);
                }
            }
            Stmt::Assert(node) => {
                self.visit_expr(&node.test);
                if let Some(msg) = &node.msg {
                    self.visit_expr(msg);
                }
            }
            Stmt::Delete(node) => {
                for target in &node.targets {
                    self.visit_expr(target);
                }
            }
            _ => {}
        }
    }

    fn visit_parameters(&mut self, parameters: &ast::Parameters) {
        for arg in parameters
            .posonlyargs
            .iter()
            .chain(&parameters.args)
            .chain(&parameters.kwonlyargs)
        {
            if let Some(annotation) = &arg.parameter.annotation {
                self.visit_expr(annotation);
            }
            if let Some(default) = &arg.default {
                self.visit_expr(default);
            }
        }
        if let Some(vararg) = &parameters.vararg {
            if let Some(annotation) = &vararg.annotation {
                self.visit_expr(annotation);
            }
        }
        if let Some(kwarg) = &parameters.kwarg {
            if let Some(annotation) = &kwarg.annotation {
                self.visit_expr(annotation);
            }
        }
    }

    fn visit_expr(&mut self, expr: &Expr) {
        if self.error.is_some() {
            return;
        }
        if self.depth >= MAX_TREE_DEPTH {
            self.error = Some(MalformedTreeError::DepthExceeded { depth: self.depth });
            return;
        }
        self.depth += 1;

        self.dispatch_enter_expr(expr);
        self.visit_expr_children(expr);
        self.dispatch_leave_expr(expr);

        self.depth -= 1;
    }

    fn visit_expr_children(&mut self, expr: &Expr) {
        match expr {
            Expr::Call(node) => {
                self.visit_expr(&node.func);
                for arg in &node.arguments.args {
                    self.visit_expr(arg);
                }
                for keyword in &node.arguments.keywords {
                    self.visit_expr(&keyword.value);
                }
            }
            Expr::Attribute(node) => self.visit_expr(&node.value),
            Expr::Subscript(node) => {
                self.visit_expr(&node.value);
                self.visit_expr(&node.slice);
            }
            Expr::BoolOp(node) => {
                for value in &node.values {
                    self.visit_expr(value);
                }
            }
            Expr::Named(node) => {
                self.visit_expr(&node.target);
                self.visit_expr(&node.value);
            }
            Expr::BinOp(node) => {
                self.visit_expr(&node.left);
                self.visit_expr(&node.right);
            }
            Expr::UnaryOp(node) => self.visit_expr(&node.operand),
            Expr::Lambda(node) => {
                if let Some(parameters) = &node.parameters {
                    self.visit_parameters(parameters);
                }
                self.visit_expr(&node.body);
            }
            Expr::If(node) => {
                self.visit_expr(&node.body);
                self.visit_expr(&node.test);
                self.visit_expr(&node.orelse);
            }
            Expr::Dict(node) => {
                for item in &node.items {
                    if let Some(key) = &item.key {
                        self.visit_expr(key);
                    }
                    self.visit_expr(&item.value);
                }
            }
            Expr::Set(node) => {
                for elt in &node.elts {
                    self.visit_expr(elt);
                }
            }
            Expr::ListComp(node) => {
                self.visit_expr(&node.elt);
                self.visit_comprehension_generators(&node.generators);
            }
            Expr::SetComp(node) => {
                self.visit_expr(&node.elt);
                self.visit_comprehension_generators(&node.generators);
            }
            Expr::DictComp(node) => {
                if let Some(key) = &node.key {
                    self.visit_expr(key);
                }
                self.visit_expr(&node.value);
                self.visit_comprehension_generators(&node.generators);
            }
            Expr::Generator(node) => {
                self.visit_expr(&node.elt);
                self.visit_comprehension_generators(&node.generators);
            }
            Expr::Await(node) => self.visit_expr(&node.value),
            Expr::Yield(node) => {
                if let Some(value) = &node.value {
                    self.visit_expr(value);
                }
            }
            Expr::YieldFrom(node) => self.visit_expr(&node.value),
            Expr::Compare(node) => {
                self.visit_expr(&node.left);
                for comparator in &node.comparators {
                    self.visit_expr(comparator);
                }
            }
            Expr::FString(node) => {
                for part in &node.value {
                    match part {
                        ast::FStringPart::Literal(_) => {}
                        ast::FStringPart::FString(f) => {
                            for element in &f.elements {
                                if let ast::InterpolatedStringElement::Interpolation(interp) =
                                    element
                                {
                                    self.visit_expr(&interp.expression);
                                }
                            }
                        }
                    }
                }
            }
            Expr::List(node) => {
                for elt in &node.elts {
                    self.visit_expr(elt);
                }
            }
            Expr::Tuple(node) => {
                for elt in &node.elts {
                    self.visit_expr(elt);
                }
            }
            Expr::Slice(node) => {
                if let Some(lower) = &node.lower {
                    self.visit_expr(lower);
                }
                if let Some(upper) = &node.upper {
                    self.visit_expr(upper);
                }
                if let Some(step) = &node.step {
                    self.visit_expr(step);
                }
            }
            Expr::Starred(node) => self.visit_expr(&node.value),
            _ => {}
        }
    }

    fn visit_comprehension_generators(&mut self, generators: &[ast::Comprehension]) {
        for generator in generators {
            self.visit_expr(&generator.target);
            self.visit_expr(&generator.iter);
            for if_expr in &generator.ifs {
                self.visit_expr(if_expr);
            }
        }
    }
}

/// Runs one rule over an already-parsed module, for isolated testing.
///
/// Returns the rule's position-sorted violations.
pub fn evaluate_rule(
    rule: Box<dyn Rule>,
    module: &ModModule,
    context: Context,
) -> Result<Vec<Violation>, MalformedTreeError> {
    let mut walker = StyleWalker::new(vec![rule], context);
    walker.walk_module(module)?;
    Ok(walker
        .into_collections()
        .pop()
        .map(|collection| collection.violations)
        .unwrap_or_default())
}
