//! Shared CLI entry point used by both binaries.

use crate::checker::{CheckError, StyleChecker};
use crate::cli::Cli;
use crate::config::Config;
use crate::report::{ReportOptions, Reporter};
use crate::violations::ViolationCode;
use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use ignore::WalkBuilder;
use serde::Serialize;
use std::io::Write;
use std::path::{Path, PathBuf};

/// One violation in `--json` output, with a 1-based rendered column.
#[derive(Debug, Serialize)]
struct JsonViolation {
    file: String,
    line: usize,
    column: usize,
    code: &'static str,
    message: &'static str,
    detail: Option<String>,
}

/// Runs the checker with the given arguments using stdout as the writer.
///
/// # Errors
///
/// Returns an error if argument parsing fails, or if writing output fails.
pub fn run_with_args(args: Vec<String>) -> Result<i32> {
    run_with_args_to(args, &mut std::io::stdout())
}

/// Runs the checker with the given arguments, writing output to `writer`.
///
/// This is the testable version of `run_with_args` that allows output
/// capture.
///
/// # Errors
///
/// Returns an error if argument parsing fails, or if writing output fails.
pub fn run_with_args_to<W: Write>(args: Vec<String>, writer: &mut W) -> Result<i32> {
    // Rule-local recoveries surface at debug level; opt in via RUST_LOG.
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .try_init()
        .ok();

    let mut program_args = vec!["pystylint".to_owned()];
    program_args.extend(args);
    let cli = match Cli::try_parse_from(program_args) {
        Ok(cli) => cli,
        Err(e) => {
            match e.kind() {
                clap::error::ErrorKind::DisplayHelp | clap::error::ErrorKind::DisplayVersion => {
                    // Let clap print help/version as intended, but captured by redirect
                    write!(writer, "{e}")?;
                    writer.flush()?;
                    return Ok(0);
                }
                _ => {
                    eprint!("{e}");
                    return Ok(1);
                }
            }
        }
    };

    if cli.list_rules {
        for code in ViolationCode::ALL {
            writeln!(writer, "{}  {}", code.code(), code.message())?;
        }
        return Ok(0);
    }

    let config_root = cli.paths.first().cloned().unwrap_or_else(|| PathBuf::from("."));
    let mut config = Config::load_from_path(&config_root);
    if !cli.select.is_empty() {
        config.pystylint.select = Some(cli.select.clone());
    }
    if !cli.ignore.is_empty() {
        config.pystylint.ignore = Some(cli.ignore.clone());
    }
    warn_unknown_codes(cli.select.iter().chain(&cli.ignore));

    let options = ReportOptions {
        verbose: cli.verbose || config.pystylint.verbose.unwrap_or(false),
        quiet: cli.quiet || config.pystylint.quiet.unwrap_or(false),
    };

    let files = collect_python_files(&cli.paths);
    if files.is_empty() {
        eprintln!("{}", "No Python files to check.".yellow());
        return Ok(0);
    }

    let checker = StyleChecker::new(config);
    let reporter = Reporter::new(options);
    let mut json_violations: Vec<JsonViolation> = Vec::new();
    let mut total_violations = 0usize;
    let mut fatal = false;

    for file in &files {
        let source = match std::fs::read_to_string(file) {
            Ok(source) => source,
            Err(e) => {
                eprintln!("{}", format!("{}: {e}", file.display()).red());
                fatal = true;
                continue;
            }
        };

        let collections = match checker.check_source(&source, file) {
            Ok(collections) => collections,
            Err(CheckError::Parse(err)) => {
                eprintln!("{}", format!("{err}").red());
                fatal = true;
                continue;
            }
            Err(CheckError::MalformedTree(err)) => {
                // Structurally fatal: abort the whole run, no partial report.
                eprintln!("{}", format!("{}: {err}", file.display()).red());
                return Ok(2);
            }
        };

        if cli.json {
            for collection in &collections {
                for violation in &collection.violations {
                    json_violations.push(JsonViolation {
                        file: file.display().to_string(),
                        line: violation.span.start.line,
                        column: violation.span.start.column + 1,
                        code: violation.code.code(),
                        message: violation.code.message(),
                        detail: violation.detail.clone(),
                    });
                }
                total_violations += collection.violations.len();
            }
            continue;
        }

        let report = reporter.render(file, &source, &collections);
        for line in &report.lines {
            writeln!(writer, "{line}")?;
        }
        total_violations += report.total;

        if options.quiet && report.failed {
            return Ok(1);
        }
    }

    if cli.json {
        writeln!(writer, "{}", serde_json::to_string_pretty(&json_violations)?)?;
    }

    if fatal {
        return Ok(2);
    }
    Ok(i32::from(total_violations > 0))
}

/// Warns about configured rule codes that are not in the catalog.
fn warn_unknown_codes<'a>(codes: impl Iterator<Item = &'a String>) {
    for code in codes {
        if ViolationCode::from_code(code).is_none() {
            eprintln!(
                "{}",
                format!("WARNING: unknown rule code '{code}' ignored").yellow()
            );
        }
    }
}

/// Expands the CLI paths into a sorted list of Python files.
///
/// Directories are walked gitignore-aware; explicit file arguments are kept
/// as-is so callers can lint generated or ignored files deliberately.
fn collect_python_files(paths: &[PathBuf]) -> Vec<PathBuf> {
    let mut files = Vec::new();
    for path in paths {
        if path.is_file() {
            files.push(path.clone());
        } else if path.is_dir() {
            for entry in WalkBuilder::new(path).build().flatten() {
                if entry.file_type().is_some_and(|ft| ft.is_file())
                    && is_python_path(entry.path())
                {
                    files.push(entry.path().to_path_buf());
                }
            }
        } else {
            eprintln!(
                "{}",
                format!("WARNING: path does not exist: {}", path.display()).yellow()
            );
        }
    }
    files.sort();
    files.dedup();
    files
}

fn is_python_path(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "py")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collect_python_files_filters_extension() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.py"), "x = 1\n").unwrap();
        std::fs::write(dir.path().join("b.txt"), "not python\n").unwrap();
        std::fs::create_dir(dir.path().join("pkg")).unwrap();
        std::fs::write(dir.path().join("pkg/c.py"), "y = 2\n").unwrap();

        let files = collect_python_files(&[dir.path().to_path_buf()]);
        let names: Vec<String> = files
            .iter()
            .map(|f| f.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.py", "c.py"]);
    }

    #[test]
    fn test_explicit_file_argument_is_kept() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("kept.py");
        std::fs::write(&file, "x = 1\n").unwrap();
        assert_eq!(collect_python_files(&[file.clone()]), vec![file]);
    }
}
