use crate::text::{CharRange, TextBuffer};

use super::classify::NativeLineClassifier;
use super::types::BlockNode;

/// Produces the blocks for a window of the buffer.
///
/// Implementations must be pure functions of `(buffer, window)`: the document
/// reparses only the lines an edit touched and splices the result into the
/// blocks it already has, so a parse may not depend on anything outside the
/// window. The returned blocks must be ordered and lie inside `window`.
pub trait Grammar {
    fn parse(&self, buffer: &TextBuffer, window: CharRange) -> Vec<BlockNode>;
}

/// The line-based native format: every covered line is exactly one block.
#[derive(Debug, Default, Clone, Copy)]
pub struct NativeGrammar;

impl Grammar for NativeGrammar {
    fn parse(&self, buffer: &TextBuffer, window: CharRange) -> Vec<BlockNode> {
        let classifier = NativeLineClassifier;
        buffer
            .lines(window)
            .into_iter()
            .map(|line| classifier.classify(&buffer.line_text(&line), line.range))
            .collect()
    }
}

/// Parses the whole buffer.
pub fn parse_document(grammar: &dyn Grammar, buffer: &TextBuffer) -> Vec<BlockNode> {
    grammar.parse(buffer, CharRange::new(0, buffer.len()))
}
