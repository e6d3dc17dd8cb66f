use std::borrow::Cow;

use xi_rope::Rope;
use xi_rope::delta::Builder;
use xi_rope::rope::{LinesMetric, Utf16CodeUnitsMetric};

use super::range::CharRange;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BufferError {
    #[error("range {range} is outside the buffer (length {len})")]
    OutOfBounds { range: CharRange, len: usize },
    #[error("offset {0} splits a surrogate pair")]
    SplitsSurrogate(usize),
}

/// One physical line of the buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineRef {
    /// The line without its terminator.
    pub range: CharRange,
    /// Whether a `\n` follows the line.
    pub terminated: bool,
}

/// The document text.
///
/// Backed by an `xi_rope::Rope`; offsets exposed by this type are UTF-16 code
/// units and are converted to the rope's byte offsets internally. Edits never
/// mutate a revision in place: [`TextBuffer::replaced`] builds a `Delta` and
/// returns the next revision, so a caller can keep the previous one until the
/// whole edit has succeeded.
#[derive(Debug, Clone, Default)]
pub struct TextBuffer {
    rope: Rope,
}

impl TextBuffer {
    pub fn new(text: &str) -> Self {
        Self {
            rope: Rope::from(text),
        }
    }

    /// Length in UTF-16 code units.
    pub fn len(&self) -> usize {
        self.rope.measure::<Utf16CodeUnitsMetric>()
    }

    pub fn is_empty(&self) -> bool {
        self.rope.len() == 0
    }

    /// Checks that `range` lies inside the buffer and on character boundaries.
    pub fn check_range(&self, range: CharRange) -> Result<std::ops::Range<usize>, BufferError> {
        let len = self.len();
        if range.end() > len {
            return Err(BufferError::OutOfBounds { range, len });
        }
        Ok(self.byte_offset(range.start)?..self.byte_offset(range.end())?)
    }

    /// Text covered by `range`.
    pub fn slice(&self, range: CharRange) -> Result<Cow<'_, str>, BufferError> {
        let bytes = self.check_range(range)?;
        Ok(self.rope.slice_to_cow(bytes))
    }

    /// Returns the revision produced by replacing `range` with `text`.
    pub fn replaced(&self, range: CharRange, text: &str) -> Result<TextBuffer, BufferError> {
        let bytes = self.check_range(range)?;
        let mut builder = Builder::new(self.rope.len());
        builder.replace(bytes, Rope::from(text));
        let delta = builder.build();
        Ok(TextBuffer {
            rope: delta.apply(&self.rope),
        })
    }

    /// Start of the line containing `offset`.
    pub fn line_start(&self, offset: usize) -> usize {
        self.line_at(offset).range.start
    }

    /// Offset just past the terminator of the line containing `offset`, or
    /// the buffer end for the last line.
    pub fn line_end(&self, offset: usize) -> usize {
        let line = self.line_at(offset);
        if line.terminated {
            line.range.end() + 1
        } else {
            line.range.end()
        }
    }

    pub fn is_line_start(&self, offset: usize) -> bool {
        offset == 0 || self.line_start(offset) == offset
    }

    /// The line containing `offset` (clamped to the buffer end).
    pub fn line_at(&self, offset: usize) -> LineRef {
        let byte = self.rope.count_base_units::<Utf16CodeUnitsMetric>(offset.min(self.len()));
        let line = self.rope.line_of_offset(byte);
        let start = self.utf16_offset(self.rope.offset_of_line(line));
        let terminated = line < self.rope.measure::<LinesMetric>();
        let end = if terminated {
            self.utf16_offset(self.rope.offset_of_line(line + 1)) - 1
        } else {
            self.len()
        };
        LineRef {
            range: CharRange {
                start,
                len: end - start,
            },
            terminated,
        }
    }

    /// Text of `line`, which must come from this revision.
    ///
    /// Line bounds always fall on character boundaries, so unlike
    /// [`TextBuffer::slice`] this has no failure case.
    pub fn line_text(&self, line: &LineRef) -> Cow<'_, str> {
        let len = self.len();
        let start = self
            .rope
            .count_base_units::<Utf16CodeUnitsMetric>(line.range.start.min(len));
        let end = self
            .rope
            .count_base_units::<Utf16CodeUnitsMetric>(line.range.end().min(len));
        self.rope.slice_to_cow(start..end)
    }

    /// Lines covered by `window`.
    ///
    /// A line is covered when it starts inside the window and either its
    /// terminator is inside the window too, or it is the last line and the
    /// window runs to the buffer end. The empty buffer has no lines; a buffer
    /// ending in `\n` has an empty last line.
    pub fn lines(&self, window: CharRange) -> Vec<LineRef> {
        let len = self.len();
        let mut out = Vec::new();
        if len == 0 || window.start > len {
            return out;
        }

        let mut pos = self.line_start(window.start);
        loop {
            let line = self.line_at(pos);
            if line.range.start < window.start {
                break;
            }
            let covered = if line.terminated {
                line.range.end() < window.end()
            } else {
                window.end() == len
            };
            if !covered {
                break;
            }
            out.push(line);
            if !line.terminated {
                break;
            }
            pos = line.range.end() + 1;
        }
        out
    }

    fn byte_offset(&self, offset: usize) -> Result<usize, BufferError> {
        let byte = self.rope.count_base_units::<Utf16CodeUnitsMetric>(offset);
        if self.utf16_offset(byte) != offset {
            return Err(BufferError::SplitsSurrogate(offset));
        }
        Ok(byte)
    }

    fn utf16_offset(&self, byte: usize) -> usize {
        self.rope.count::<Utf16CodeUnitsMetric>(byte)
    }
}

impl std::fmt::Display for TextBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.rope)
    }
}

/// Length of `text` in UTF-16 code units.
pub fn utf16_len(text: &str) -> usize {
    text.encode_utf16().count()
}
