//! Line index for byte offset to line/column conversion.

/// Precomputed byte offsets of line starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineIndex {
    /// Byte offset of the start of each line
    line_starts: Vec<usize>,
}

impl LineIndex {
    /// Create a new line index from source text.
    #[must_use]
    pub fn new(text: &str) -> Self {
        let mut line_starts = vec![0];

        for (i, c) in text.char_indices() {
            if c == '\n' {
                line_starts.push(i + 1);
            }
        }

        Self { line_starts }
    }

    /// Convert a byte offset to a line/column position (0-based).
    #[must_use]
    pub fn line_col(&self, offset: usize) -> (usize, usize) {
        let line = self
            .line_starts
            .binary_search(&offset)
            .unwrap_or_else(|i| i.saturating_sub(1));

        let col = offset - self.line_starts[line];
        (line, col)
    }

    /// Get the byte offset of the start of a line.
    #[must_use]
    pub fn line_start(&self, line: usize) -> Option<usize> {
        self.line_starts.get(line).copied()
    }

    /// Get the number of lines.
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_line() {
        let index = LineIndex::new("hello world");
        assert_eq!(index.line_count(), 1);
        assert_eq!(index.line_col(0), (0, 0));
        assert_eq!(index.line_col(6), (0, 6));
    }

    #[test]
    fn test_multiple_lines() {
        let index = LineIndex::new("line one\nline two\nline three");
        assert_eq!(index.line_count(), 3);
        assert_eq!(index.line_col(0), (0, 0));
        assert_eq!(index.line_col(9), (1, 0));
        assert_eq!(index.line_col(14), (1, 5));
        assert_eq!(index.line_col(18), (2, 0));
    }

    #[test]
    fn test_empty_text() {
        let index = LineIndex::new("");
        assert_eq!(index.line_count(), 1);
        assert_eq!(index.line_col(0), (0, 0));
    }

    #[test]
    fn test_trailing_newline() {
        let index = LineIndex::new("one\n");
        assert_eq!(index.line_count(), 2);
        assert_eq!(index.line_col(3), (0, 3));
        assert_eq!(index.line_col(4), (1, 0));
    }

    #[test]
    fn test_line_start() {
        let index = LineIndex::new("ab\ncd");
        assert_eq!(index.line_start(0), Some(0));
        assert_eq!(index.line_start(1), Some(3));
        assert_eq!(index.line_start(2), None);
    }
}
