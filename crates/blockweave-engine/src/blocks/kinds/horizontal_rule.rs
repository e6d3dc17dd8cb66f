use serde::Serialize;

use crate::blocks::native::NativePrefix;
use crate::blocks::types::Node;
use crate::text::CharRange;

/// `⟦horizontal-rule⟧` on a line of its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HorizontalRule {
    pub native_prefix_range: CharRange,
    pub enclosing_range: CharRange,
}

impl HorizontalRule {
    pub const NAME: &'static str = "horizontal-rule";

    pub fn parse(prefix: &NativePrefix<'_>, line: CharRange) -> Option<Self> {
        if prefix.name != Self::NAME || !prefix.rest.is_empty() {
            return None;
        }
        Some(Self {
            native_prefix_range: prefix.range,
            enclosing_range: line,
        })
    }
}

impl Node for HorizontalRule {
    /// A rule has no text; its content is the empty range at the line end.
    fn content_range(&self) -> CharRange {
        CharRange::empty(self.enclosing_range.end())
    }

    fn enclosing_range(&self) -> CharRange {
        self.enclosing_range
    }

    fn offset(&self, delta: isize) -> Option<Self> {
        Some(Self {
            native_prefix_range: self.native_prefix_range.offset(delta)?,
            enclosing_range: self.enclosing_range.offset(delta)?,
        })
    }
}
