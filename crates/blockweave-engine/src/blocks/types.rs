use serde::Serialize;

use crate::text::CharRange;

use super::kinds::{
    Blockquote, ChecklistItem, CodeBlock, HorizontalRule, ListItem, Paragraph, Title,
};

/// Range-bearing behaviour shared by every block variant.
pub trait Node: Sized {
    /// The meaningful text, excluding structural prefixes.
    fn content_range(&self) -> CharRange;

    /// The whole line the block occupies, excluding its trailing terminator.
    fn enclosing_range(&self) -> CharRange;

    /// A copy of the node with every range moved by `delta`.
    ///
    /// Returns `None` if a range would start before the buffer.
    fn offset(&self, delta: isize) -> Option<Self>;
}

/// Type tag of a block, compared to decide between a content replacement and
/// a remove/insert pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum BlockKind {
    Title,
    Paragraph,
    Blockquote,
    CodeBlock,
    ListItem,
    ChecklistItem,
    HorizontalRule,
}

impl BlockKind {
    pub fn as_str(self) -> &'static str {
        match self {
            BlockKind::Title => "title",
            BlockKind::Paragraph => "paragraph",
            BlockKind::Blockquote => "blockquote",
            BlockKind::CodeBlock => "code-block",
            BlockKind::ListItem => "list-item",
            BlockKind::ChecklistItem => "checklist-item",
            BlockKind::HorizontalRule => "horizontal-rule",
        }
    }
}

impl std::fmt::Display for BlockKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A parsed block. Values are immutable; a block that moves is replaced by
/// the result of [`Node::offset`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum BlockNode {
    Title(Title),
    Paragraph(Paragraph),
    Blockquote(Blockquote),
    CodeBlock(CodeBlock),
    ListItem(ListItem),
    ChecklistItem(ChecklistItem),
    HorizontalRule(HorizontalRule),
}

impl BlockNode {
    pub fn kind(&self) -> BlockKind {
        match self {
            BlockNode::Title(_) => BlockKind::Title,
            BlockNode::Paragraph(_) => BlockKind::Paragraph,
            BlockNode::Blockquote(_) => BlockKind::Blockquote,
            BlockNode::CodeBlock(_) => BlockKind::CodeBlock,
            BlockNode::ListItem(_) => BlockKind::ListItem,
            BlockNode::ChecklistItem(_) => BlockKind::ChecklistItem,
            BlockNode::HorizontalRule(_) => BlockKind::HorizontalRule,
        }
    }

    /// Whether `other` has the same type tag. Content is not compared.
    pub fn same_kind(&self, other: &BlockNode) -> bool {
        self.kind() == other.kind()
    }

    fn as_node(&self) -> &dyn NodeRanges {
        match self {
            BlockNode::Title(b) => b,
            BlockNode::Paragraph(b) => b,
            BlockNode::Blockquote(b) => b,
            BlockNode::CodeBlock(b) => b,
            BlockNode::ListItem(b) => b,
            BlockNode::ChecklistItem(b) => b,
            BlockNode::HorizontalRule(b) => b,
        }
    }
}

/// Object-safe half of [`Node`], used to read ranges without matching on
/// every variant twice.
trait NodeRanges {
    fn content(&self) -> CharRange;
    fn enclosing(&self) -> CharRange;
}

impl<T: Node> NodeRanges for T {
    fn content(&self) -> CharRange {
        self.content_range()
    }

    fn enclosing(&self) -> CharRange {
        self.enclosing_range()
    }
}

impl Node for BlockNode {
    fn content_range(&self) -> CharRange {
        self.as_node().content()
    }

    fn enclosing_range(&self) -> CharRange {
        self.as_node().enclosing()
    }

    fn offset(&self, delta: isize) -> Option<Self> {
        Some(match self {
            BlockNode::Title(b) => BlockNode::Title(b.offset(delta)?),
            BlockNode::Paragraph(b) => BlockNode::Paragraph(b.offset(delta)?),
            BlockNode::Blockquote(b) => BlockNode::Blockquote(b.offset(delta)?),
            BlockNode::CodeBlock(b) => BlockNode::CodeBlock(b.offset(delta)?),
            BlockNode::ListItem(b) => BlockNode::ListItem(b.offset(delta)?),
            BlockNode::ChecklistItem(b) => BlockNode::ChecklistItem(b.offset(delta)?),
            BlockNode::HorizontalRule(b) => BlockNode::HorizontalRule(b.offset(delta)?),
        })
    }
}

macro_rules! impl_from_kind {
    ($($variant:ident),*) => {
        $(
            impl From<$variant> for BlockNode {
                fn from(b: $variant) -> Self {
                    BlockNode::$variant(b)
                }
            }
        )*
    };
}

impl_from_kind!(
    Title,
    Paragraph,
    Blockquote,
    CodeBlock,
    ListItem,
    ChecklistItem,
    HorizontalRule
);
