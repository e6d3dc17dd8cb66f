use serde::Serialize;

use crate::blocks::{BlockNode, Node};

/// Receives the structural changes of one edit, in order.
///
/// Every method has a no-op default so an observer only implements what it
/// cares about. Indices refer to the observer's own mirrored list as it stands
/// after the notifications before it have been applied.
pub trait DocumentObserver {
    fn will_update(&mut self) {}
    fn did_insert(&mut self, _block: &BlockNode, _index: usize) {}
    fn did_remove(&mut self, _block: &BlockNode, _index: usize) {}
    fn did_replace_content(&mut self, _before: &BlockNode, _index: usize, _after: &BlockNode) {}
    fn did_update_location(&mut self, _before: &BlockNode, _index: usize, _after: &BlockNode) {}
    fn did_finish_update(&mut self) {}
}

/// Observer that ignores everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullObserver;

impl DocumentObserver for NullObserver {}

/// Collects notifications as values.
impl DocumentObserver for Vec<Notification> {
    fn did_insert(&mut self, block: &BlockNode, index: usize) {
        self.push(Notification::Insert {
            block: block.clone(),
            index,
        });
    }

    fn did_remove(&mut self, block: &BlockNode, index: usize) {
        self.push(Notification::Remove {
            block: block.clone(),
            index,
        });
    }

    fn did_replace_content(&mut self, before: &BlockNode, index: usize, after: &BlockNode) {
        self.push(Notification::ReplaceContent {
            before: before.clone(),
            index,
            after: after.clone(),
        });
    }

    fn did_update_location(&mut self, before: &BlockNode, index: usize, after: &BlockNode) {
        self.push(Notification::UpdateLocation {
            before: before.clone(),
            index,
            after: after.clone(),
        });
    }
}

/// One structural change to the block list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "op", rename_all = "kebab-case")]
pub enum Notification {
    Insert {
        block: BlockNode,
        index: usize,
    },
    Remove {
        block: BlockNode,
        index: usize,
    },
    /// Same type, new content.
    ReplaceContent {
        before: BlockNode,
        index: usize,
        after: BlockNode,
    },
    /// Same block, shifted.
    UpdateLocation {
        before: BlockNode,
        index: usize,
        after: BlockNode,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("notification index {index} is outside a list of {len} blocks")]
pub struct ApplyError {
    pub index: usize,
    pub len: usize,
}

impl Notification {
    pub fn index(&self) -> usize {
        match self {
            Notification::Insert { index, .. }
            | Notification::Remove { index, .. }
            | Notification::ReplaceContent { index, .. }
            | Notification::UpdateLocation { index, .. } => *index,
        }
    }

    pub fn dispatch(&self, observer: &mut dyn DocumentObserver) {
        match self {
            Notification::Insert { block, index } => observer.did_insert(block, *index),
            Notification::Remove { block, index } => observer.did_remove(block, *index),
            Notification::ReplaceContent {
                before,
                index,
                after,
            } => observer.did_replace_content(before, *index, after),
            Notification::UpdateLocation {
                before,
                index,
                after,
            } => observer.did_update_location(before, *index, after),
        }
    }

    /// Applies the change to a mirrored block list.
    pub fn apply(&self, blocks: &mut Vec<BlockNode>) -> Result<(), ApplyError> {
        let len = blocks.len();
        let index = self.index();
        let out_of_range = match self {
            Notification::Insert { .. } => index > len,
            _ => index >= len,
        };
        if out_of_range {
            return Err(ApplyError { index, len });
        }

        match self {
            Notification::Insert { block, index } => blocks.insert(*index, block.clone()),
            Notification::Remove { index, .. } => {
                blocks.remove(*index);
            }
            Notification::ReplaceContent { after, index, .. }
            | Notification::UpdateLocation { after, index, .. } => {
                blocks[*index] = after.clone();
            }
        }
        Ok(())
    }
}

impl std::fmt::Display for Notification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Notification::Insert { block, index } => {
                write!(f, "insert {} at {index} {}", block.kind(), block.enclosing_range())
            }
            Notification::Remove { block, index } => {
                write!(f, "remove {} at {index} {}", block.kind(), block.enclosing_range())
            }
            Notification::ReplaceContent {
                before,
                index,
                after,
            } => write!(
                f,
                "replace {} at {index} {} -> {}",
                after.kind(),
                before.enclosing_range(),
                after.enclosing_range()
            ),
            Notification::UpdateLocation {
                before,
                index,
                after,
            } => write!(
                f,
                "move {} at {index} {} -> {}",
                after.kind(),
                before.enclosing_range(),
                after.enclosing_range()
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blocks::Paragraph;
    use crate::text::CharRange;

    fn paragraph(start: usize, len: usize) -> BlockNode {
        Paragraph::new(CharRange::new(start, len)).into()
    }

    #[test]
    fn apply_mirrors_each_operation() {
        let mut blocks = vec![paragraph(0, 3), paragraph(4, 3)];

        Notification::Insert {
            block: paragraph(4, 1),
            index: 1,
        }
        .apply(&mut blocks)
        .unwrap();
        assert_eq!(blocks.len(), 3);

        Notification::UpdateLocation {
            before: paragraph(4, 3),
            index: 2,
            after: paragraph(6, 3),
        }
        .apply(&mut blocks)
        .unwrap();
        Notification::Remove {
            block: paragraph(0, 3),
            index: 0,
        }
        .apply(&mut blocks)
        .unwrap();

        assert_eq!(blocks, vec![paragraph(4, 1), paragraph(6, 3)]);
    }

    #[test]
    fn apply_rejects_index_past_end() {
        let mut blocks = vec![paragraph(0, 3)];
        let err = Notification::Remove {
            block: paragraph(0, 3),
            index: 1,
        }
        .apply(&mut blocks)
        .unwrap_err();
        assert_eq!(err, ApplyError { index: 1, len: 1 });

        assert!(
            Notification::Insert {
                block: paragraph(4, 1),
                index: 1,
            }
            .apply(&mut blocks)
            .is_ok()
        );
    }

    #[test]
    fn dispatch_reaches_collecting_observer() {
        let n = Notification::ReplaceContent {
            before: paragraph(19, 3),
            index: 1,
            after: paragraph(19, 2),
        };
        let mut seen: Vec<Notification> = Vec::new();
        n.dispatch(&mut seen);
        assert_eq!(seen, vec![n]);
    }

    #[test]
    fn display_is_compact() {
        let n = Notification::UpdateLocation {
            before: paragraph(23, 3),
            index: 2,
            after: paragraph(22, 3),
        };
        assert_eq!(n.to_string(), "move paragraph at 2 (23, 3) -> (22, 3)");
    }
}
