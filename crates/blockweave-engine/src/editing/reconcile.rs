use std::ops::Range;

use log::trace;

use crate::blocks::{BlockNode, Node};
use crate::text::CharRange;

use super::invalidation::Invalidation;
use super::notification::Notification;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReconcileError {
    #[error("parsed block {range} lies outside the reparse window {window}")]
    OutsideWindow { range: CharRange, window: CharRange },
    #[error("parsed block {range} does not follow the block ending at {previous_end}")]
    OutOfOrder { range: CharRange, previous_end: usize },
    #[error("moving block {range} by {delta} would place it before the buffer start")]
    ShiftUnderflow { range: CharRange, delta: isize },
}

/// The block list after an edit and the notifications that lead to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reconciliation {
    pub blocks: Vec<BlockNode>,
    pub notifications: Vec<Notification>,
    /// Indices of the pre-edit blocks the edit replaced, if any.
    pub block_range: Option<Range<usize>>,
}

/// Indices of the contiguous run of `blocks` that `invalidation` replaces.
pub fn replaced_blocks(blocks: &[BlockNode], invalidation: &Invalidation) -> Option<Range<usize>> {
    let first = blocks.iter().position(|b| invalidation.replaces(b))?;
    let count = blocks[first..]
        .iter()
        .take_while(|b| invalidation.replaces(b))
        .count();
    Some(first..first + count)
}

/// Splices `parsed` (blocks of `invalidation.reparse`, post-edit coordinates)
/// into `existing` (pre-edit blocks).
///
/// When the edit replaced some blocks, parsed blocks are matched to them
/// positionally:
///
/// 1. surplus parsed blocks are inserted first, at the start of the run
/// 2. surplus old blocks are removed from the end of the run
/// 3. the rest are paired up; a pair of the same kind becomes a content
///    replacement, a pair of different kinds a removal plus an insertion
///
/// Otherwise every parsed block is inserted after the last block starting
/// before the window. Either way, every block after the splice then moves by
/// the edit's length delta.
///
/// Indices in the notifications refer to the list as it stands after the
/// notifications before them have been applied.
pub fn reconcile(
    existing: &[BlockNode],
    parsed: Vec<BlockNode>,
    invalidation: &Invalidation,
) -> Result<Reconciliation, ReconcileError> {
    check_parsed(&parsed, invalidation.reparse)?;

    let mut blocks = existing.to_vec();
    let mut notifications = Vec::new();
    let block_range = replaced_blocks(existing, invalidation);
    let parsed_count = parsed.len();

    let shift_from = match &block_range {
        Some(range) => {
            let start = range.start;
            let matched = range.len();
            let inserted = parsed_count.saturating_sub(matched);
            let removed = matched.saturating_sub(parsed_count);
            let mut parsed = parsed.into_iter();

            for (i, block) in parsed.by_ref().take(inserted).enumerate() {
                let index = start + i;
                blocks.insert(index, block.clone());
                notifications.push(Notification::Insert { block, index });
            }

            for _ in 0..removed {
                let index = start + parsed_count;
                let block = blocks.remove(index);
                notifications.push(Notification::Remove { block, index });
            }

            for (i, after) in parsed.enumerate() {
                let index = start + inserted + i;
                let before = std::mem::replace(&mut blocks[index], after.clone());
                if before.same_kind(&after) {
                    notifications.push(Notification::ReplaceContent {
                        before,
                        index,
                        after,
                    });
                } else {
                    notifications.push(Notification::Remove {
                        block: before,
                        index,
                    });
                    notifications.push(Notification::Insert {
                        block: after,
                        index,
                    });
                }
            }

            start + parsed_count
        }
        None => {
            let offset = insertion_index(existing, invalidation.replaced.start);
            for (i, block) in parsed.into_iter().enumerate() {
                let index = offset + i;
                blocks.insert(index, block.clone());
                notifications.push(Notification::Insert { block, index });
            }
            offset + parsed_count
        }
    };

    let delta = invalidation.delta();
    if delta != 0 {
        for index in shift_from..blocks.len() {
            let before = blocks[index].clone();
            let after = before
                .offset(delta)
                .ok_or(ReconcileError::ShiftUnderflow {
                    range: before.enclosing_range(),
                    delta,
                })?;
            blocks[index] = after.clone();
            notifications.push(Notification::UpdateLocation {
                before,
                index,
                after,
            });
        }
    }

    trace!(
        "reconciled {:?} into {} blocks with {} notifications",
        block_range,
        blocks.len(),
        notifications.len()
    );
    Ok(Reconciliation {
        blocks,
        notifications,
        block_range,
    })
}

/// One past the last block starting before `offset`.
fn insertion_index(blocks: &[BlockNode], offset: usize) -> usize {
    blocks.partition_point(|b| b.enclosing_range().start < offset)
}

fn check_parsed(parsed: &[BlockNode], window: CharRange) -> Result<(), ReconcileError> {
    let mut previous_end: Option<usize> = None;
    for block in parsed {
        let range = block.enclosing_range();
        if !window.contains_range(range) {
            return Err(ReconcileError::OutsideWindow { range, window });
        }
        if let Some(end) = previous_end
            && range.start <= end
        {
            return Err(ReconcileError::OutOfOrder {
                range,
                previous_end: end,
            });
        }
        previous_end = Some(range.end());
    }
    Ok(())
}
