//! Core library for the `pystylint` style checker.
//!
//! Given an already-parsed Python syntax tree, this library runs a set of
//! independent, composable rule checks over the tree in a single traversal
//! and produces a deterministic, position-tagged list of style violations.

#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

/// Module containing the high-level checker facade.
/// This parses a source string and runs the registered rules over it.
pub mod checker;

/// Module defining the command-line interface arguments.
pub mod cli;

/// Module for loading configuration.
pub mod config;

/// Module for handling CLI execution and exit codes.
pub mod entry_point;

/// Module defining the typed errors of the engine and rules.
pub mod errors;

/// Module rendering collected violations into report lines.
pub mod report;

/// Module containing the rule contract and the six style rules.
pub mod rules;

/// Module containing utility functions, notably byte-offset mapping.
pub mod utils;

/// Module defining the violation data model and the code catalog.
pub mod violations;

/// Module containing the tree traversal engine.
pub mod walker;
