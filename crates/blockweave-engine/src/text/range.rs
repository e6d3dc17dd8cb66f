use serde::Serialize;

/// A `(start, len)` range of UTF-16 code units into the buffer.
///
/// Ranges are only meaningful against the buffer revision they were read
/// from; shifting a range to a later revision goes through [`CharRange::offset`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct CharRange {
    /// Inclusive start offset.
    pub start: usize,
    /// Number of code units covered.
    pub len: usize,
}

impl CharRange {
    #[must_use]
    pub const fn new(start: usize, len: usize) -> Self {
        Self { start, len }
    }

    /// Builds a range from `[start, end)`. Returns `None` when `end < start`.
    #[must_use]
    pub fn from_bounds(start: usize, end: usize) -> Option<Self> {
        end.checked_sub(start).map(|len| Self { start, len })
    }

    /// An empty range positioned at `at`.
    #[must_use]
    pub const fn empty(at: usize) -> Self {
        Self { start: at, len: 0 }
    }

    /// Exclusive end offset.
    #[must_use]
    pub const fn end(self) -> usize {
        self.start + self.len
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.len == 0
    }

    /// Whether `offset` falls inside `[start, end)`.
    #[must_use]
    pub fn contains(self, offset: usize) -> bool {
        offset >= self.start && offset < self.end()
    }

    /// Whether `other` lies entirely within this range.
    #[must_use]
    pub fn contains_range(self, other: CharRange) -> bool {
        other.start >= self.start && other.end() <= self.end()
    }

    /// The overlapping part of two ranges. Ranges that only touch do not
    /// intersect, unless one of them is empty and sits inside the other.
    #[must_use]
    pub fn intersection(self, other: CharRange) -> Option<CharRange> {
        let start = self.start.max(other.start);
        let end = self.end().min(other.end());
        if start < end || (start == end && (self.is_empty() || other.is_empty())) {
            CharRange::from_bounds(start, end)
        } else {
            None
        }
    }

    /// Smallest range covering both.
    #[must_use]
    pub fn union(self, other: CharRange) -> CharRange {
        let start = self.start.min(other.start);
        let end = self.end().max(other.end());
        CharRange {
            start,
            len: end - start,
        }
    }

    /// Moves the range by `delta`, keeping its length.
    ///
    /// Returns `None` if the start would become negative.
    #[must_use]
    pub fn offset(self, delta: isize) -> Option<CharRange> {
        self.start
            .checked_add_signed(delta)
            .map(|start| CharRange { start, len: self.len })
    }

    /// Moves only the end of the range by `delta`.
    #[must_use]
    pub fn shifted_end(self, delta: isize) -> Option<CharRange> {
        self.len
            .checked_add_signed(delta)
            .map(|len| CharRange { start: self.start, len })
    }

    #[must_use]
    pub fn to_std(self) -> std::ops::Range<usize> {
        self.start..self.end()
    }
}

impl From<std::ops::Range<usize>> for CharRange {
    fn from(r: std::ops::Range<usize>) -> Self {
        CharRange {
            start: r.start,
            len: r.end.saturating_sub(r.start),
        }
    }
}

impl std::fmt::Display for CharRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.start, self.len)
    }
}

/// Signed difference `a - b` between two offsets.
pub(crate) fn signed_delta(a: usize, b: usize) -> isize {
    if a >= b {
        (a - b) as isize
    } else {
        -((b - a) as isize)
    }
}
