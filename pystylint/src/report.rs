//! Rendering collected violations into the external-facing text format.

use crate::utils::source_line;
use crate::violations::Violation;
use crate::walker::RuleViolations;
use std::path::Path;

/// Caller-supplied reporting configuration; there is no process-wide state.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReportOptions {
    /// Append the literal source line to each reported violation.
    pub verbose: bool,
    /// Stop at the first violation, in rule-registration order.
    pub quiet: bool,
}

/// The rendered outcome of one check run.
#[derive(Debug)]
pub struct Report {
    /// One formatted line per reported violation.
    pub lines: Vec<String>,
    /// Number of violations reported.
    pub total: usize,
    /// Whether the run should signal failure to the caller.
    pub failed: bool,
}

/// Formats per-rule violation collections into report lines.
pub struct Reporter {
    options: ReportOptions,
}

impl Reporter {
    /// Creates a reporter with the given options.
    #[must_use]
    pub fn new(options: ReportOptions) -> Self {
        Self { options }
    }

    /// Renders collections in rule-registration order.
    ///
    /// In quiet mode only the first violation overall is rendered and the
    /// report signals failure immediately.
    #[must_use]
    pub fn render(
        &self,
        source_name: &Path,
        source: &str,
        collections: &[RuleViolations],
    ) -> Report {
        if self.options.quiet {
            let first = collections
                .iter()
                .find_map(|collection| collection.violations.first());
            return match first {
                Some(violation) => Report {
                    lines: vec![self.format_violation(source_name, source, violation)],
                    total: 1,
                    failed: true,
                },
                None => Report {
                    lines: Vec::new(),
                    total: 0,
                    failed: false,
                },
            };
        }

        let lines: Vec<String> = collections
            .iter()
            .flat_map(|collection| &collection.violations)
            .map(|violation| self.format_violation(source_name, source, violation))
            .collect();
        let total = lines.len();
        Report {
            lines,
            total,
            failed: total > 0,
        }
    }

    /// Formats one violation; mimics the pylint format, which is
    /// `{filename}:{line}:{column}: {error_code}: {message}`.
    #[must_use]
    pub fn format_violation(
        &self,
        source_name: &Path,
        source: &str,
        violation: &Violation,
    ) -> String {
        let start = violation.span.start;
        let mut line = format!(
            "{}:{}:{}: {}: {}",
            source_name.display(),
            start.line,
            start.column + 1,
            violation.code.code(),
            violation.code.message(),
        );
        if self.options.verbose {
            line.push(' ');
            line.push_str(source_line(source, start.line));
        }
        line
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::violations::{SourcePosition, SourceSpan, ViolationCode};

    fn violation_at(line: usize, column: usize) -> Violation {
        Violation::new(
            ViolationCode::Lambda,
            SourceSpan {
                start: SourcePosition { line, column },
                end: SourcePosition { line, column: column + 6 },
            },
        )
    }

    #[test]
    fn test_format_matches_pylint_shape() {
        let reporter = Reporter::new(ReportOptions::default());
        let rendered =
            reporter.format_violation(Path::new("app.py"), "x = lambda: 0\n", &violation_at(1, 4));
        assert_eq!(
            rendered,
            "app.py:1:5: E1003: Use of lambda functions is discouraged in favor of named functions."
        );
    }

    #[test]
    fn test_verbose_appends_source_line() {
        let reporter = Reporter::new(ReportOptions {
            verbose: true,
            quiet: false,
        });
        let rendered =
            reporter.format_violation(Path::new("app.py"), "x = lambda: 0\n", &violation_at(1, 4));
        assert!(rendered.ends_with(" x = lambda: 0"));
    }

    #[test]
    fn test_formatting_is_idempotent() {
        let reporter = Reporter::new(ReportOptions::default());
        let violation = violation_at(3, 0);
        let first = reporter.format_violation(Path::new("a.py"), "", &violation);
        let second = reporter.format_violation(Path::new("a.py"), "", &violation);
        assert_eq!(first, second);
    }
}
