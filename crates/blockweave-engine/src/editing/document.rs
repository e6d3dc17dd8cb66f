use std::ops::Range;

use log::{debug, trace, warn};

use crate::blocks::{BlockNode, Grammar, NativeGrammar, Node, parse_document};
use crate::snapshot::{InvariantViolation, check_invariants};
use crate::text::{BufferError, CharRange, TextBuffer, utf16_len};

use super::invalidation::{Invalidation, compute_invalidation};
use super::notification::DocumentObserver;
use super::patch::Patch;
use super::reconcile::{ReconcileError, Reconciliation, reconcile, replaced_blocks};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DocumentError {
    #[error(transparent)]
    Buffer(#[from] BufferError),
    #[error(transparent)]
    Reconcile(#[from] ReconcileError),
    #[error("block list no longer partitions the buffer: {0}")]
    Invariant(#[from] InvariantViolation),
}

/// Tuning for the reparse step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReparseSettings {
    /// Reparse the whole document when the window would exceed this many
    /// code units.
    pub full_reparse_threshold: Option<usize>,
    /// Run the partition checks on every new block list before committing.
    pub check_invariants: bool,
}

impl Default for ReparseSettings {
    fn default() -> Self {
        Self {
            full_reparse_threshold: None,
            check_invariants: true,
        }
    }
}

/// A text buffer and the blocks that partition it.
///
/// Every change goes through [`Document::edit`]. An edit either commits the
/// new text, the new blocks and a version bump together, or commits nothing;
/// in both cases the observer sees one `will_update` / `did_finish_update`
/// pair, with the structural notifications in between only on success.
///
/// ```rust
/// use blockweave_engine::{CharRange, Document, MirrorObserver};
///
/// let mut doc = Document::new("⟦doc-heading⟧Title\nOne\n⟦blockquote⟧> Two");
/// let mut mirror = MirrorObserver::new(doc.blocks().to_vec());
///
/// doc.edit(CharRange::new(19, 4), "", &mut mirror).unwrap();
///
/// assert_eq!(doc.text(), "⟦doc-heading⟧Title\n⟦blockquote⟧> Two");
/// assert_eq!(mirror.blocks, doc.blocks());
/// ```
#[derive(Debug, Clone)]
pub struct Document<G: Grammar = NativeGrammar> {
    buffer: TextBuffer,
    blocks: Vec<BlockNode>,
    grammar: G,
    settings: ReparseSettings,
    version: u64,
}

impl Document<NativeGrammar> {
    /// Parses `text` with the native grammar and default settings.
    pub fn new(text: &str) -> Self {
        Self::with_settings(text, ReparseSettings::default())
    }

    pub fn with_settings(text: &str, settings: ReparseSettings) -> Self {
        Self::with_grammar(text, NativeGrammar, settings)
    }
}

impl Default for Document<NativeGrammar> {
    fn default() -> Self {
        Self::new("")
    }
}

impl<G: Grammar> Document<G> {
    pub fn with_grammar(text: &str, grammar: G, settings: ReparseSettings) -> Self {
        let buffer = TextBuffer::new(text);
        let blocks = parse_document(&grammar, &buffer);
        debug!("parsed {} blocks from {} code units", blocks.len(), buffer.len());
        Self {
            buffer,
            blocks,
            grammar,
            settings,
            version: 0,
        }
    }

    pub fn text(&self) -> String {
        self.buffer.to_string()
    }

    pub fn buffer(&self) -> &TextBuffer {
        &self.buffer
    }

    /// Length in UTF-16 code units.
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn blocks(&self) -> &[BlockNode] {
        &self.blocks
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn settings(&self) -> ReparseSettings {
        self.settings
    }

    pub fn set_settings(&mut self, settings: ReparseSettings) {
        self.settings = settings;
    }

    /// Text of `range`.
    pub fn slice(&self, range: CharRange) -> Result<String, DocumentError> {
        Ok(self.buffer.slice(range)?.into_owned())
    }

    /// The block whose line contains `offset`, with its index. A caret at the
    /// end of a line belongs to that line's block.
    pub fn block_at(&self, offset: usize) -> Option<(usize, &BlockNode)> {
        let index = self
            .blocks
            .partition_point(|b| b.enclosing_range().start <= offset)
            .checked_sub(1)?;
        let block = &self.blocks[index];
        (offset <= block.enclosing_range().end()).then_some((index, block))
    }

    /// Content of every block, one per line, without native prefixes or
    /// markers.
    pub fn presentation(&self) -> Result<String, DocumentError> {
        let lines = self
            .blocks
            .iter()
            .map(|b| self.slice(b.content_range()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(lines.join("\n"))
    }

    /// Indices of the current blocks that replacing `range` with
    /// `replacement` would discard. Nothing is modified.
    pub fn block_range_for_edit(
        &self,
        range: CharRange,
        replacement: &str,
    ) -> Result<Option<Range<usize>>, DocumentError> {
        let next = self.buffer.replaced(range, replacement)?;
        let invalidation = self.invalidate(range, replacement, &next);
        Ok(replaced_blocks(&self.blocks, &invalidation))
    }

    /// Replaces the whole text.
    pub fn set_text(
        &mut self,
        text: &str,
        observer: &mut dyn DocumentObserver,
    ) -> Result<Patch, DocumentError> {
        self.edit(CharRange::new(0, self.len()), text, observer)
    }

    /// Replaces `range` with `replacement`, reparses the affected lines and
    /// tells `observer` how the block list changed.
    ///
    /// An out-of-range edit is rejected before the observer hears anything.
    pub fn edit(
        &mut self,
        range: CharRange,
        replacement: &str,
        observer: &mut dyn DocumentObserver,
    ) -> Result<Patch, DocumentError> {
        let next = self.buffer.replaced(range, replacement).inspect_err(|e| {
            warn!("rejected edit {range}: {e}");
        })?;

        observer.will_update();
        let result = self.reparse(range, replacement, &next);
        let patch = match result {
            Ok((invalidation, reconciled)) => {
                let Reconciliation {
                    blocks,
                    notifications,
                    block_range,
                } = reconciled;
                self.buffer = next;
                self.blocks = blocks;
                self.version += 1;
                for notification in &notifications {
                    trace!("{notification}");
                    notification.dispatch(observer);
                }
                Ok(Patch {
                    invalidation,
                    block_range,
                    notifications: notifications.len(),
                    version: self.version,
                })
            }
            Err(e) => {
                warn!("edit {range} left the document unchanged: {e}");
                Err(e)
            }
        };
        observer.did_finish_update();
        patch
    }

    fn invalidate(&self, range: CharRange, replacement: &str, next: &TextBuffer) -> Invalidation {
        let invalidation =
            compute_invalidation(range, utf16_len(replacement), &self.blocks, next);
        match self.settings.full_reparse_threshold {
            Some(threshold) if invalidation.reparse.len > threshold => {
                debug!(
                    "reparse window {} exceeds {threshold}, reparsing everything",
                    invalidation.reparse
                );
                Invalidation::whole_document(self.buffer.len(), next.len())
            }
            _ => invalidation,
        }
    }

    fn reparse(
        &self,
        range: CharRange,
        replacement: &str,
        next: &TextBuffer,
    ) -> Result<(Invalidation, Reconciliation), DocumentError> {
        let invalidation = self.invalidate(range, replacement, next);
        let parsed = self.grammar.parse(next, invalidation.reparse);
        let reconciled = reconcile(&self.blocks, parsed, &invalidation)?;
        if self.settings.check_invariants {
            check_invariants(next, &reconciled.blocks)?;
        }
        Ok((invalidation, reconciled))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blocks::BlockKind;
    use crate::editing::{Notification, NullObserver};
    use crate::snapshot::MirrorObserver;
    use pretty_assertions::assert_eq;

    const THREE: &str = "⟦doc-heading⟧Title\nOne\n⟦blockquote⟧> Two";

    #[test]
    fn new_document_is_parsed() {
        let doc = Document::new(THREE);
        assert_eq!(doc.len(), 40);
        assert_eq!(doc.blocks().len(), 3);
        assert_eq!(doc.version(), 0);
        assert_eq!(doc.presentation().unwrap(), "Title\nOne\nTwo");
    }

    #[test]
    fn edit_bumps_version_and_mirrors() {
        let mut doc = Document::new(THREE);
        let mut mirror = MirrorObserver::new(doc.blocks().to_vec());

        let patch = doc.edit(CharRange::new(21, 1), "", &mut mirror).unwrap();

        assert_eq!(patch.version, 1);
        assert_eq!(patch.block_range, Some(1..2));
        assert_eq!(patch.notifications, 2);
        assert_eq!(doc.text(), "⟦doc-heading⟧Title\nOn\n⟦blockquote⟧> Two");
        assert_eq!(mirror.blocks, doc.blocks());
        assert!(mirror.is_balanced());
    }

    #[test]
    fn out_of_range_edit_notifies_nothing() {
        let mut doc = Document::new("One");
        let mut seen: Vec<Notification> = Vec::new();
        let mut mirror = MirrorObserver::default();

        let err = doc.edit(CharRange::new(2, 5), "", &mut seen).unwrap_err();
        assert!(matches!(err, DocumentError::Buffer(BufferError::OutOfBounds { .. })));
        assert!(doc.edit(CharRange::new(9, 0), "x", &mut mirror).is_err());

        assert!(seen.is_empty());
        assert!(mirror.transcript.is_empty());
        assert_eq!(doc.text(), "One");
        assert_eq!(doc.version(), 0);
    }

    struct RunawayGrammar;

    impl Grammar for RunawayGrammar {
        fn parse(&self, buffer: &TextBuffer, _window: CharRange) -> Vec<BlockNode> {
            // Ignores the window and claims the whole buffer.
            vec![crate::blocks::Paragraph::new(CharRange::new(0, buffer.len())).into()]
        }
    }

    #[test]
    fn failed_reconciliation_commits_nothing() {
        let mut doc = Document::with_grammar("One\nTwo", RunawayGrammar, ReparseSettings::default());
        let before = doc.blocks().to_vec();
        let mut mirror = MirrorObserver::new(before.clone());

        let err = doc.edit(CharRange::new(5, 1), "", &mut mirror).unwrap_err();

        assert!(matches!(err, DocumentError::Reconcile(ReconcileError::OutsideWindow { .. })));
        assert_eq!(doc.text(), "One\nTwo");
        assert_eq!(doc.blocks(), before.as_slice());
        assert_eq!(doc.version(), 0);
        assert_eq!(mirror.render(), "begin\nend");
        assert!(mirror.is_balanced());
    }

    struct OverreachingGrammar;

    impl Grammar for OverreachingGrammar {
        fn parse(&self, buffer: &TextBuffer, _window: CharRange) -> Vec<BlockNode> {
            vec![crate::blocks::Paragraph::new(CharRange::new(0, buffer.len() + 4)).into()]
        }
    }

    #[test]
    fn presentation_reports_block_past_buffer_end() {
        let doc = Document::with_grammar("One", OverreachingGrammar, ReparseSettings::default());
        assert!(matches!(
            doc.presentation(),
            Err(DocumentError::Buffer(BufferError::OutOfBounds { .. }))
        ));
    }

    #[test]
    fn block_range_for_edit_is_read_only() {
        let doc = Document::new("⟦doc-heading⟧Title\nOne\nTwo\nThree");
        assert_eq!(
            doc.block_range_for_edit(CharRange::new(22, 5), "").unwrap(),
            Some(1..4)
        );
        assert_eq!(doc.block_range_for_edit(CharRange::empty(19), "New\n").unwrap(), None);
        assert_eq!(doc.version(), 0);
        assert!(doc.block_range_for_edit(CharRange::new(40, 1), "").is_err());
    }

    #[test]
    fn full_reparse_threshold_replaces_everything() {
        let settings = ReparseSettings {
            full_reparse_threshold: Some(0),
            check_invariants: true,
        };
        let mut doc = Document::with_settings("One\nTwo\nThree", settings);

        let patch = doc.edit(CharRange::new(4, 3), "2", &mut NullObserver).unwrap();

        assert_eq!(patch.invalidation.replaced, CharRange::new(0, 13));
        assert_eq!(patch.invalidation.reparse, CharRange::new(0, 11));
        assert_eq!(patch.block_range, Some(0..3));
        assert_eq!(doc.presentation().unwrap(), "One\n2\nThree");
    }

    #[test]
    fn set_text_replaces_document() {
        let mut doc = Document::default();
        let mut mirror = MirrorObserver::default();

        doc.set_text("⟦doc-heading⟧Title\n⟦unordered-0⟧- Milk", &mut mirror).unwrap();

        let kinds: Vec<_> = doc.blocks().iter().map(BlockNode::kind).collect();
        assert_eq!(kinds, vec![BlockKind::Title, BlockKind::ListItem]);
        assert_eq!(mirror.blocks, doc.blocks());
    }

    #[test]
    fn block_at_includes_line_end() {
        let doc = Document::new(THREE);
        assert_eq!(doc.block_at(0).map(|(i, _)| i), Some(0));
        assert_eq!(doc.block_at(18).map(|(i, _)| i), Some(0));
        assert_eq!(doc.block_at(19).map(|(i, _)| i), Some(1));
        assert_eq!(doc.block_at(40).map(|(i, _)| i), Some(2));
        assert_eq!(doc.block_at(41), None);
        assert_eq!(Document::default().block_at(0), None);
    }
}
