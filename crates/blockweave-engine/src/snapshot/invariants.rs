use crate::blocks::{BlockNode, Node};
use crate::text::{CharRange, TextBuffer};

/// A way the block list fails to partition the buffer.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvariantViolation {
    #[error("block {range} out of bounds (buffer length {len})")]
    OutOfBounds { range: CharRange, len: usize },
    #[error("content {content} not contained in enclosing range {enclosing}")]
    ContentOutsideEnclosing {
        content: CharRange,
        enclosing: CharRange,
    },
    #[error("block {next} overlaps or precedes block {previous}")]
    Unordered { previous: CharRange, next: CharRange },
    #[error("gap between {previous} and {next} is wider than one character")]
    GapTooWide { previous: CharRange, next: CharRange },
    #[error("gap character at {0} is not a line terminator")]
    GapNotTerminator(usize),
}

/// Checks that `blocks` tile `buffer`.
///
/// Every range lies inside the buffer, each content range sits within its
/// enclosing range, and consecutive blocks are strictly ordered with at most
/// one character (a `\n`) between them.
pub fn check(buffer: &TextBuffer, blocks: &[BlockNode]) -> Result<(), InvariantViolation> {
    let len = buffer.len();
    let mut previous: Option<CharRange> = None;

    for block in blocks {
        let enclosing = block.enclosing_range();
        let content = block.content_range();
        if enclosing.end() > len {
            return Err(InvariantViolation::OutOfBounds {
                range: enclosing,
                len,
            });
        }
        if !enclosing.contains_range(content) {
            return Err(InvariantViolation::ContentOutsideEnclosing { content, enclosing });
        }

        if let Some(prev) = previous {
            if enclosing.start <= prev.end() {
                return Err(InvariantViolation::Unordered {
                    previous: prev,
                    next: enclosing,
                });
            }
            if enclosing.start - prev.end() > 1 {
                return Err(InvariantViolation::GapTooWide {
                    previous: prev,
                    next: enclosing,
                });
            }
            let gap = CharRange::new(prev.end(), 1);
            if buffer.slice(gap).ok().as_deref() != Some("\n") {
                return Err(InvariantViolation::GapNotTerminator(gap.start));
            }
        }
        previous = Some(enclosing);
    }
    Ok(())
}
