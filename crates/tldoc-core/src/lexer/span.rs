//! Source locations for schema tokens

#![allow(clippy::cast_possible_truncation)] // Schema files larger than 4GB are unsupported

use std::ops::Range;

/// A byte range in the schema source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
    /// Byte offset of the start of the span
    pub start: u32,
    /// Byte offset of the end of the span (exclusive)
    pub end: u32,
}

impl Span {
    #[must_use]
    pub const fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    /// Translate a range produced by logos, which is relative to `base`
    #[must_use]
    pub fn offset_range(base: usize, range: Range<usize>) -> Self {
        Self {
            start: (base + range.start) as u32,
            end: (base + range.end) as u32,
        }
    }
}

impl std::fmt::Display for Span {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// Line and column of a position in the schema
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Location {
    /// 1-indexed line number
    pub line: u32,
    /// 1-indexed column number, in bytes
    pub column: u32,
}

impl Location {
    #[must_use]
    pub const fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Maps byte offsets to line/column locations
#[derive(Debug, Clone)]
pub struct LineIndex {
    line_starts: Vec<u32>,
}

impl LineIndex {
    #[must_use]
    pub fn new(source: &str) -> Self {
        let mut line_starts = vec![0];
        for (i, c) in source.char_indices() {
            if c == '\n' {
                line_starts.push((i + 1) as u32);
            }
        }
        Self { line_starts }
    }

    #[must_use]
    pub fn location(&self, offset: u32) -> Location {
        let line = self
            .line_starts
            .partition_point(|&start| start <= offset)
            .saturating_sub(1);
        let line_start = self.line_starts[line];
        Location {
            line: (line + 1) as u32,
            column: offset - line_start + 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_range_is_absolute() {
        assert_eq!(Span::offset_range(10, 2..4), Span::new(12, 14));
    }

    #[test]
    fn line_index_multiple_lines() {
        let source = "user = User;\n---functions---\nping = Pong;";
        let index = LineIndex::new(source);
        assert_eq!(index.location(0), Location::new(1, 1));
        assert_eq!(index.location(13), Location::new(2, 1));
        assert_eq!(index.location(34), Location::new(3, 6));
    }
}
