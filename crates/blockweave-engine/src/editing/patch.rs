use std::ops::Range;

use super::invalidation::Invalidation;

/// Result of a committed edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Patch {
    /// Windows that were discarded and reparsed.
    pub invalidation: Invalidation,
    /// Indices of the pre-edit blocks the edit replaced.
    pub block_range: Option<Range<usize>>,
    /// Number of structural notifications sent to the observer.
    pub notifications: usize,
    pub version: u64,
}
