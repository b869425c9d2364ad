//! High-level facade: parse a source string and run registered rules.

use crate::config::Config;
use crate::errors::{MalformedTreeError, ParseError};
use crate::rules::{self, Context, Rule};
use crate::utils::LineIndex;
use crate::violations::{Violation, ViolationCode};
use crate::walker::{evaluate_rule, RuleViolations, StyleWalker};
use ruff_python_parser::parse_module;
use std::fmt;
use std::path::Path;

/// A failed check run: either the parser rejected the source or the tree
/// was structurally inconsistent.
#[derive(Debug)]
pub enum CheckError {
    /// The external parser could not produce a tree.
    Parse(ParseError),
    /// Traversal found the tree malformed; the run is aborted.
    MalformedTree(MalformedTreeError),
}

impl fmt::Display for CheckError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CheckError::Parse(err) => write!(f, "{err}"),
            CheckError::MalformedTree(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for CheckError {}

/// Runs style rules over Python sources.
pub struct StyleChecker {
    config: Config,
}

impl StyleChecker {
    /// Creates a checker with the given configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// The configuration this checker runs with.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    fn context(&self, source: &str, source_name: &Path) -> Context {
        Context {
            source_name: source_name.to_path_buf(),
            line_index: LineIndex::new(source),
            config: self.config.clone(),
        }
    }

    /// Checks one source with the configured rule set.
    ///
    /// Returns per-rule collections in registration order, each sorted
    /// position-stably.
    pub fn check_source(
        &self,
        source: &str,
        source_name: &Path,
    ) -> Result<Vec<RuleViolations>, CheckError> {
        self.run_rules(source, source_name, rules::configured_rules(&self.config))
    }

    /// Checks one source with an explicit rule set, in the given
    /// registration order.
    pub fn run_rules(
        &self,
        source: &str,
        source_name: &Path,
        rules: Vec<Box<dyn Rule>>,
    ) -> Result<Vec<RuleViolations>, CheckError> {
        let module = parse(source, source_name)?;
        let mut walker = StyleWalker::new(rules, self.context(source, source_name));
        walker
            .walk_module(&module)
            .map_err(CheckError::MalformedTree)?;
        Ok(walker.into_collections())
    }

    /// Runs a single catalog rule in isolation over one source.
    pub fn evaluate(
        &self,
        code: ViolationCode,
        source: &str,
        source_name: &Path,
    ) -> Result<Vec<Violation>, CheckError> {
        let module = parse(source, source_name)?;
        evaluate_rule(
            rules::rule_for(code, &self.config),
            &module,
            self.context(source, source_name),
        )
        .map_err(CheckError::MalformedTree)
    }
}

impl Default for StyleChecker {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

fn parse(source: &str, source_name: &Path) -> Result<ruff_python_ast::ModModule, CheckError> {
    parse_module(source)
        .map(ruff_python_parser::Parsed::into_syntax)
        .map_err(|err| {
            CheckError::Parse(ParseError {
                file: source_name.to_path_buf(),
                error: format!("{err}"),
            })
        })
}
