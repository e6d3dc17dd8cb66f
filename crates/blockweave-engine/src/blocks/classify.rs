use crate::text::CharRange;

use super::kinds::{
    Blockquote, ChecklistItem, CodeBlock, HorizontalRule, ListItem, Paragraph, Title,
};
use super::native::NativePrefix;
use super::types::BlockNode;

/// Turns a single line into a block.
///
/// Each line is classified on its own; nothing about surrounding lines is
/// consulted, which is what lets a window of lines be reparsed in isolation.
pub struct NativeLineClassifier;

impl NativeLineClassifier {
    /// Classifies `text`, the content of the line occupying `line` (no
    /// terminator). Lines without a recognised native prefix are paragraphs.
    pub fn classify(&self, text: &str, line: CharRange) -> BlockNode {
        NativePrefix::parse(text, line.start)
            .and_then(|prefix| Self::classify_prefixed(&prefix, line))
            .unwrap_or_else(|| Paragraph::new(line).into())
    }

    fn classify_prefixed(prefix: &NativePrefix<'_>, line: CharRange) -> Option<BlockNode> {
        match prefix.name {
            Title::NAME => Title::parse(prefix, line).map(Into::into),
            Blockquote::NAME => Blockquote::parse(prefix, line).map(Into::into),
            HorizontalRule::NAME => HorizontalRule::parse(prefix, line).map(Into::into),
            name if name.starts_with(CodeBlock::NAME) => {
                CodeBlock::parse(prefix, line).map(Into::into)
            }
            name if name.starts_with(ListItem::NAME_PREFIX) => {
                ListItem::parse(prefix, line).map(Into::into)
            }
            name if name.starts_with(ChecklistItem::NAME_PREFIX) => {
                ChecklistItem::parse(prefix, line).map(Into::into)
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blocks::types::{BlockKind, Node};
    use crate::text::utf16_len;
    use rstest::rstest;

    fn classify(text: &str) -> BlockNode {
        NativeLineClassifier.classify(text, CharRange::new(0, utf16_len(text)))
    }

    #[rstest]
    #[case("⟦doc-heading⟧Title", BlockKind::Title)]
    #[case("One", BlockKind::Paragraph)]
    #[case("", BlockKind::Paragraph)]
    #[case("⟦blockquote⟧> Two", BlockKind::Blockquote)]
    #[case("⟦code⟧x", BlockKind::CodeBlock)]
    #[case("⟦code-rust⟧x", BlockKind::CodeBlock)]
    #[case("⟦unordered-0⟧- Milk", BlockKind::ListItem)]
    #[case("⟦checklist-1⟧- [ ] Eggs", BlockKind::ChecklistItem)]
    #[case("⟦checklist-done-0⟧- [x] Eggs", BlockKind::ChecklistItem)]
    #[case("⟦horizontal-rule⟧", BlockKind::HorizontalRule)]
    fn kinds(#[case] text: &str, #[case] expected: BlockKind) {
        assert_eq!(classify(text).kind(), expected);
    }

    #[rstest]
    #[case("⟦blockquote⟧Two")]
    #[case("⟦horizontal-rule⟧x")]
    #[case("⟦unordered-9⟧- Milk")]
    #[case("⟦mystery⟧text")]
    #[case("⟦doc-heading Title")]
    fn malformed_prefixes_degrade_to_paragraph(#[case] text: &str) {
        let block = classify(text);
        assert_eq!(block.kind(), BlockKind::Paragraph);
        assert_eq!(block.content_range(), CharRange::new(0, utf16_len(text)));
    }
}
