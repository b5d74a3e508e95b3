//! Position and location tracking for source code locations
//!
//! - [`Position`] - A line:column position in source code
//! - [`Range`] - A source code range with start/end positions and byte span
//! - [`LineTable`] - Converts byte offsets to positions under one [`LineTerminatorPolicy`]
//!
//! Lookups are a binary search over the recorded line starts.

use serde::Serialize;
use std::fmt;
use std::ops::Range as ByteRange;

use super::policy::LineTerminatorPolicy;

/// Represents a position in source code (line and column)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Represents a location in source code (start and end positions)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize)]
pub struct Range {
    pub span: ByteRange<usize>,
    pub start: Position,
    pub end: Position,
}

impl Range {
    pub fn new(span: ByteRange<usize>, start: Position, end: Position) -> Self {
        Self { span, start, end }
    }

    /// Check if a position is contained within this location
    pub fn contains(&self, pos: Position) -> bool {
        self.start <= pos && pos <= self.end
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// Byte offsets where each line starts, under one terminator policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineTable {
    policy: LineTerminatorPolicy,
    line_starts: Vec<usize>,
    len: usize,
}

impl LineTable {
    pub fn new(source: &str, policy: LineTerminatorPolicy) -> Self {
        let mut line_starts = vec![0];
        let mut offset = 0;

        while let Some((at, len)) = policy.find_terminator(source, offset) {
            offset = at + len;
            line_starts.push(offset);
        }

        Self {
            policy,
            line_starts,
            len: source.len(),
        }
    }

    pub fn policy(&self) -> LineTerminatorPolicy {
        self.policy
    }

    /// Number of lines. A trailing terminator opens one more, empty, line.
    pub fn count(&self) -> usize {
        self.line_starts.len()
    }

    /// Byte offset where `line` starts; `line == count()` gives the end of input.
    pub fn offset(&self, line: usize) -> Option<usize> {
        match self.line_starts.get(line) {
            Some(start) => Some(*start),
            None if line == self.line_starts.len() => Some(self.len),
            None => None,
        }
    }

    /// Index of the line containing `offset`, or `None` past the end of input.
    pub fn find_line_index(&self, offset: usize) -> Option<usize> {
        if offset > self.len {
            return None;
        }
        Some(
            self.line_starts
                .binary_search(&offset)
                .unwrap_or_else(|i| i - 1),
        )
    }

    /// Convert a byte offset to a line/column position. Offsets past the end clamp to it.
    pub fn position(&self, offset: usize) -> Position {
        let offset = offset.min(self.len);
        let line = self.find_line_index(offset).unwrap_or(0);
        Position::new(line, offset - self.line_starts[line])
    }

    /// Convert a byte range to a location
    pub fn range(&self, span: &ByteRange<usize>) -> Range {
        Range::new(
            span.clone(),
            self.position(span.start),
            self.position(span.end),
        )
    }
}

/// Build the offset-to-position mapping of `source` under `policy`.
pub fn count_lines(source: &str, policy: LineTerminatorPolicy) -> LineTable {
    LineTable::new(source, policy)
}
