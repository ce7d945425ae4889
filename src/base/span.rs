//! Source intervals and the bridge to line/column positions.
//!
//! Every interval in the analyzer is a half-open byte range `[start, end)`
//! into the document text. Intervals are ordered by their start offset; the
//! forward-reference rule ("declared before it is used") compares starts only.

use std::fmt;

pub use text_size::TextRange;
pub use text_size::TextSize;

/// Returns true when `a` starts strictly before `b`.
#[inline]
pub fn is_before(a: TextRange, b: TextRange) -> bool {
    a.start() < b.start()
}

/// A line and column position in source text.
///
/// Both line and column are 0-indexed internally, but displayed as 1-indexed.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Default, Ord, PartialOrd)]
pub struct LineCol {
    /// 0-indexed line number
    pub line: u32,
    /// 0-indexed column (in UTF-8 bytes)
    pub col: u32,
}

impl LineCol {
    #[inline]
    pub const fn new(line: u32, col: u32) -> Self {
        Self { line, col }
    }
}

impl fmt::Debug for LineCol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line + 1, self.col + 1)
    }
}

impl fmt::Display for LineCol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line + 1, self.col + 1)
    }
}

/// A line/column range, the host-facing form of a [`TextRange`].
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct LineRange {
    pub start: LineCol,
    pub end: LineCol,
}

/// Index for converting between byte offsets and line/column positions.
#[derive(Clone, Debug)]
pub struct LineIndex {
    /// Byte offset of the start of each line
    line_starts: Vec<TextSize>,
    /// Total length of the indexed text
    len: TextSize,
}

impl LineIndex {
    /// Build a line index from source text.
    pub fn new(text: &str) -> Self {
        let mut line_starts = vec![TextSize::from(0)];

        for (offset, c) in text.char_indices() {
            if c == '\n' {
                line_starts.push(TextSize::from((offset + 1) as u32));
            }
        }

        Self {
            line_starts,
            len: TextSize::of(text),
        }
    }

    /// Convert a byte offset to a line/column position.
    pub fn line_col(&self, offset: TextSize) -> LineCol {
        let line = self
            .line_starts
            .partition_point(|&start| start <= offset)
            .saturating_sub(1);

        let col = offset - self.line_starts[line];

        LineCol {
            line: line as u32,
            col: col.into(),
        }
    }

    /// Convert a line/column position to a byte offset.
    ///
    /// Returns `None` for lines past the end of the text or columns past the
    /// end of their line. The column right after the last character (where the
    /// newline sits) is still on the line.
    pub fn offset(&self, line_col: LineCol) -> Option<TextSize> {
        let line = line_col.line as usize;
        let line_start = *self.line_starts.get(line)?;
        let line_end = match self.line_starts.get(line + 1) {
            Some(&next) => next - TextSize::from(1),
            None => self.len,
        };
        let offset = line_start.checked_add(TextSize::from(line_col.col))?;
        (offset <= line_end).then_some(offset)
    }

    /// Convert an interval to its line/column range.
    pub fn range(&self, range: TextRange) -> LineRange {
        LineRange {
            start: self.line_col(range.start()),
            end: self.line_col(range.end()),
        }
    }

    /// Get the number of lines.
    pub fn len(&self) -> usize {
        self.line_starts.len()
    }

    /// Check if there are no lines (never true: empty text has one line).
    pub fn is_empty(&self) -> bool {
        self.line_starts.is_empty()
    }
}
