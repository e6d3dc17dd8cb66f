use serde::Serialize;

use crate::blocks::types::Node;
use crate::text::CharRange;

/// Paragraph block.
///
/// Paragraphs have no delimiters - they are the default block for any line
/// no other kind claims, including empty lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Paragraph {
    pub range: CharRange,
}

impl Paragraph {
    pub fn new(range: CharRange) -> Self {
        Self { range }
    }
}

impl Node for Paragraph {
    fn content_range(&self) -> CharRange {
        self.range
    }

    fn enclosing_range(&self) -> CharRange {
        self.range
    }

    fn offset(&self, delta: isize) -> Option<Self> {
        Some(Self {
            range: self.range.offset(delta)?,
        })
    }
}
