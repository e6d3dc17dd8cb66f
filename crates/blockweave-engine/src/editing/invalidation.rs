use log::debug;

use crate::blocks::{BlockNode, Node};
use crate::text::range::signed_delta;
use crate::text::{CharRange, TextBuffer};

/// The lines an edit destroyed, before and after the edit.
///
/// Both windows start at the same offset and are line aligned: each covers
/// whole lines together with their terminators, except that a window running
/// to the end of its buffer also covers the last (unterminated) line. The two
/// windows differ only by the edit's length delta, so everything after them is
/// untouched text that merely moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Invalidation {
    /// Window of the pre-edit buffer whose blocks are discarded.
    pub replaced: CharRange,
    /// The same lines in the post-edit buffer; handed to the grammar.
    pub reparse: CharRange,
    /// Whether both windows run to the end of their buffers.
    pub reaches_end: bool,
}

impl Invalidation {
    /// Invalidates everything: the whole old buffer is replaced by a full
    /// parse of the new one.
    pub fn whole_document(old_len: usize, new_len: usize) -> Self {
        Self {
            replaced: CharRange::new(0, old_len),
            reparse: CharRange::new(0, new_len),
            reaches_end: true,
        }
    }

    /// Distance every block after the windows moves by.
    pub fn delta(&self) -> isize {
        signed_delta(self.reparse.end(), self.replaced.end())
    }

    /// Whether the pre-edit block `block` lives on a line inside `replaced`.
    ///
    /// Mirrors the grammar's coverage rule: the block's terminator must be
    /// inside the window, or the block must be the last line of a window that
    /// runs to the end of the buffer.
    pub fn replaces(&self, block: &BlockNode) -> bool {
        let enclosing = block.enclosing_range();
        enclosing.start >= self.replaced.start
            && (enclosing.end() < self.replaced.end()
                || (self.reaches_end && enclosing.end() == self.replaced.end()))
    }
}

/// Works out which lines must be reparsed after replacing `edit` (pre-edit
/// coordinates) with `replacement_len` code units, producing `buffer`.
///
/// The working range starts as the inserted text in the new buffer and is
/// then fixed up against the existing blocks:
///
/// - if the edit removes text starting exactly at a block's trailing
///   terminator, that boundary is being joined away; the range grows one to
///   the left so the block before the boundary is reparsed with the one after
/// - if a block starts exactly where the removed text ended and the new text
///   ends on a line start, everything from there on is untouched and the
///   window stops at that line start instead of swallowing the next line
///
/// Finally the range grows to whole lines of the new buffer.
pub fn compute_invalidation(
    edit: CharRange,
    replacement_len: usize,
    blocks: &[BlockNode],
    buffer: &TextBuffer,
) -> Invalidation {
    let new_len = buffer.len();
    let old_end = edit.end();
    let mut working = CharRange::new(edit.start, replacement_len);
    let mut untouched_tail = false;

    for block in blocks {
        let enclosing = block.enclosing_range();
        if enclosing.start >= old_end {
            untouched_tail = enclosing.start == old_end;
            break;
        }
        if !edit.is_empty()
            && enclosing.end() == edit.start
            && working.start == edit.start
            && let Some(start) = working.start.checked_sub(1)
        {
            working = CharRange::new(start, working.len + 1);
        }
    }

    let start = buffer.line_start(working.start);
    let end = if untouched_tail && buffer.is_line_start(working.end()) {
        working.end()
    } else {
        buffer.line_end(working.end())
    };

    let reparse = CharRange::new(start, end - start);
    let replaced = CharRange::new(start, end - replacement_len + edit.len - start);
    let invalidation = Invalidation {
        replaced,
        reparse,
        reaches_end: reparse.end() == new_len,
    };
    debug!(
        "edit {edit} (+{replacement_len}) invalidates {} -> reparse {}",
        invalidation.replaced, invalidation.reparse
    );
    invalidation
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blocks::{NativeGrammar, parse_document};
    use pretty_assertions::assert_eq;

    fn invalidate(text: &str, edit: CharRange, replacement: &str) -> Invalidation {
        let before = TextBuffer::new(text);
        let blocks = parse_document(&NativeGrammar, &before);
        let after = before.replaced(edit, replacement).unwrap();
        compute_invalidation(edit, crate::text::utf16_len(replacement), &blocks, &after)
    }

    const THREE: &str = "⟦doc-heading⟧Title\nOne\n⟦blockquote⟧> Two";

    #[test]
    fn removing_whole_line_leaves_next_line_untouched() {
        let inv = invalidate(THREE, CharRange::new(19, 4), "");
        assert_eq!(inv.replaced, CharRange::new(19, 4));
        assert_eq!(inv.reparse, CharRange::empty(19));
        assert!(!inv.reaches_end);
        assert_eq!(inv.delta(), -4);
    }

    #[test]
    fn removing_last_character_reparses_its_line() {
        let inv = invalidate(THREE, CharRange::new(21, 1), "");
        assert_eq!(inv.replaced, CharRange::new(19, 4));
        assert_eq!(inv.reparse, CharRange::new(19, 3));
    }

    #[test]
    fn joining_lines_reparses_both() {
        let inv = invalidate("⟦doc-heading⟧Title\nOne\nTwo", CharRange::new(22, 1), "");
        assert_eq!(inv.replaced, CharRange::new(19, 7));
        assert_eq!(inv.reparse, CharRange::new(19, 6));
        assert!(inv.reaches_end);
    }

    #[test]
    fn typing_in_empty_document() {
        let inv = invalidate("", CharRange::empty(0), "Hello");
        assert_eq!(inv.replaced, CharRange::empty(0));
        assert_eq!(inv.reparse, CharRange::new(0, 5));
    }

    #[test]
    fn inserting_line_before_block_stops_at_that_block() {
        let inv = invalidate("One\nTwo", CharRange::empty(4), "New\n");
        assert_eq!(inv.replaced, CharRange::empty(4));
        assert_eq!(inv.reparse, CharRange::new(4, 4));
    }

    #[test]
    fn splitting_a_line_reparses_both_halves() {
        let inv = invalidate("One\nTwo", CharRange::empty(3), "\n");
        assert_eq!(inv.replaced, CharRange::new(0, 4));
        assert_eq!(inv.reparse, CharRange::new(0, 5));
    }

    #[test]
    fn removing_terminator_after_empty_line_pulls_in_previous_line() {
        // The empty line at 4 ends where the edit starts.
        let inv = invalidate("One\n\nTwo", CharRange::new(4, 1), "");
        assert_eq!(inv.replaced, CharRange::new(0, 5));
        assert_eq!(inv.reparse, CharRange::new(0, 4));
    }

    #[test]
    fn replaces_uses_buffer_end_for_last_line() {
        let inv = invalidate("One\nTwo", CharRange::new(5, 1), "");
        let blocks = parse_document(&NativeGrammar, &TextBuffer::new("One\nTwo"));
        assert!(!inv.replaces(&blocks[0]));
        assert!(inv.replaces(&blocks[1]));
    }

    #[test]
    fn whole_document_delta() {
        let inv = Invalidation::whole_document(10, 7);
        assert_eq!(inv.delta(), -3);
        assert!(inv.reaches_end);
    }
}
