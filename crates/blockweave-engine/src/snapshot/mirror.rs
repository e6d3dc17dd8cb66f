use crate::blocks::BlockNode;
use crate::editing::{ApplyError, DocumentObserver, Notification};

/// Observer that keeps its own copy of the block list up to date from
/// notifications alone, and records what it was told.
#[derive(Debug, Default, Clone)]
pub struct MirrorObserver {
    pub blocks: Vec<BlockNode>,
    /// One line per callback, including the update brackets.
    pub transcript: Vec<String>,
    /// Notifications that could not be applied to the mirror.
    pub errors: Vec<ApplyError>,
    open_updates: usize,
    unmatched_finishes: usize,
}

impl MirrorObserver {
    /// Starts from an existing block list, e.g. `Document::blocks()`.
    pub fn new(blocks: Vec<BlockNode>) -> Self {
        Self {
            blocks,
            ..Self::default()
        }
    }

    /// Whether every `will_update` has been matched by a `did_finish_update`
    /// and no `did_finish_update` arrived without one.
    pub fn is_balanced(&self) -> bool {
        self.open_updates == 0 && self.unmatched_finishes == 0
    }

    /// The transcript joined into one string, for snapshots.
    pub fn render(&self) -> String {
        self.transcript.join("\n")
    }

    pub fn clear_transcript(&mut self) {
        self.transcript.clear();
    }

    fn record(&mut self, notification: Notification) {
        self.transcript.push(notification.to_string());
        if let Err(e) = notification.apply(&mut self.blocks) {
            self.errors.push(e);
        }
    }
}

impl DocumentObserver for MirrorObserver {
    fn will_update(&mut self) {
        self.open_updates += 1;
        self.transcript.push("begin".into());
    }

    fn did_insert(&mut self, block: &BlockNode, index: usize) {
        self.record(Notification::Insert {
            block: block.clone(),
            index,
        });
    }

    fn did_remove(&mut self, block: &BlockNode, index: usize) {
        self.record(Notification::Remove {
            block: block.clone(),
            index,
        });
    }

    fn did_replace_content(&mut self, before: &BlockNode, index: usize, after: &BlockNode) {
        self.record(Notification::ReplaceContent {
            before: before.clone(),
            index,
            after: after.clone(),
        });
    }

    fn did_update_location(&mut self, before: &BlockNode, index: usize, after: &BlockNode) {
        self.record(Notification::UpdateLocation {
            before: before.clone(),
            index,
            after: after.clone(),
        });
    }

    fn did_finish_update(&mut self) {
        match self.open_updates.checked_sub(1) {
            Some(open) => self.open_updates = open,
            None => self.unmatched_finishes += 1,
        }
        self.transcript.push("end".into());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blocks::Paragraph;
    use crate::text::CharRange;

    #[test]
    fn brackets_must_pair_up() {
        let mut mirror = MirrorObserver::default();
        mirror.will_update();
        assert!(!mirror.is_balanced());
        mirror.did_finish_update();
        assert!(mirror.is_balanced());
    }

    #[test]
    fn finish_without_update_is_unbalanced() {
        let mut mirror = MirrorObserver::default();
        mirror.did_finish_update();
        mirror.will_update();
        mirror.did_finish_update();

        assert!(!mirror.is_balanced());
        assert_eq!(mirror.render(), "end\nbegin\nend");
    }

    #[test]
    fn bad_index_is_recorded_not_applied() {
        let block: BlockNode = Paragraph::new(CharRange::new(0, 3)).into();
        let mut mirror = MirrorObserver::default();
        mirror.did_remove(&block, 0);

        assert_eq!(mirror.errors, vec![ApplyError { index: 0, len: 0 }]);
        assert!(mirror.blocks.is_empty());
    }
}
