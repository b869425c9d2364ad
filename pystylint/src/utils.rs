use crate::violations::{SourcePosition, SourceSpan};
use ruff_text_size::{TextRange, TextSize};

/// A utility struct to convert byte offsets to line/column positions.
///
/// This is necessary because the AST parser works with byte offsets,
/// but violations are reported with line and column numbers which are
/// more human-readable.
#[derive(Debug, Clone)]
pub struct LineIndex {
    /// Stores the byte index of the start of each line.
    line_starts: Vec<usize>,
}

impl LineIndex {
    /// Creates a new `LineIndex` by scanning the source code for newlines.
    /// Uses byte iteration for performance since '\n' is always a single byte in UTF-8.
    #[must_use]
    pub fn new(source: &str) -> Self {
        let mut line_starts = vec![0];
        for (i, byte) in source.as_bytes().iter().enumerate() {
            if *byte == b'\n' {
                // Record the start of the next line (current newline index + 1)
                line_starts.push(i + 1);
            }
        }
        Self { line_starts }
    }

    /// Converts a `TextSize` (byte offset) to a 1-indexed line number.
    #[must_use]
    pub fn line_index(&self, offset: TextSize) -> usize {
        let offset = offset.to_usize();
        // Binary search to find which line range the offset falls into.
        match self.line_starts.binary_search(&offset) {
            Ok(line) => line + 1,
            Err(line) => line,
        }
    }

    /// Converts a `TextSize` (byte offset) to a 0-indexed column number.
    #[must_use]
    pub fn column_index(&self, offset: TextSize) -> usize {
        let line = self.line_index(offset);
        offset.to_usize() - self.line_starts[line - 1]
    }

    /// Converts a byte offset to a full `SourcePosition`.
    #[must_use]
    pub fn position(&self, offset: TextSize) -> SourcePosition {
        SourcePosition {
            line: self.line_index(offset),
            column: self.column_index(offset),
        }
    }

    /// Converts a node's `TextRange` to a `SourceSpan`.
    #[must_use]
    pub fn span(&self, range: TextRange) -> SourceSpan {
        SourceSpan {
            start: self.position(range.start()),
            end: self.position(range.end()),
        }
    }
}

/// Returns the literal source line at a 1-indexed line number, without its
/// trailing newline. Out-of-range lines yield an empty string.
#[must_use]
pub fn source_line(source: &str, line: usize) -> &str {
    source
        .lines()
        .nth(line.saturating_sub(1))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_index_maps_offsets_to_lines() {
        let index = LineIndex::new("a = 1\nb = 2\n");
        assert_eq!(index.line_index(TextSize::new(0)), 1);
        assert_eq!(index.line_index(TextSize::new(4)), 1);
        assert_eq!(index.line_index(TextSize::new(6)), 2);
        assert_eq!(index.line_index(TextSize::new(10)), 2);
    }

    #[test]
    fn test_column_index_is_zero_based() {
        let index = LineIndex::new("a = 1\nbb = 22\n");
        assert_eq!(index.column_index(TextSize::new(0)), 0);
        assert_eq!(index.column_index(TextSize::new(4)), 4);
        assert_eq!(index.column_index(TextSize::new(6)), 0);
        assert_eq!(index.column_index(TextSize::new(11)), 5);
    }

    #[test]
    fn test_span_orders_start_before_end() {
        let index = LineIndex::new("x = [1,\n     2]\n");
        let span = index.span(TextRange::new(TextSize::new(4), TextSize::new(15)));
        assert!(span.start <= span.end);
        assert_eq!(span.start.line, 1);
        assert_eq!(span.end.line, 2);
    }

    #[test]
    fn test_source_line_lookup() {
        let src = "first\nsecond\nthird";
        assert_eq!(source_line(src, 2), "second");
        assert_eq!(source_line(src, 99), "");
    }
}
