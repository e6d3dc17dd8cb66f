use serde::Serialize;

use crate::blocks::native::NativePrefix;
use crate::blocks::types::Node;
use crate::text::CharRange;

/// Document title, `⟦doc-heading⟧Text`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Title {
    pub native_prefix_range: CharRange,
    pub content_range: CharRange,
    pub enclosing_range: CharRange,
}

impl Title {
    pub const NAME: &'static str = "doc-heading";

    pub fn parse(prefix: &NativePrefix<'_>, line: CharRange) -> Option<Self> {
        if prefix.name != Self::NAME {
            return None;
        }
        Some(Self {
            native_prefix_range: prefix.range,
            content_range: CharRange::from_bounds(prefix.end(), line.end())?,
            enclosing_range: line,
        })
    }
}

impl Node for Title {
    fn content_range(&self) -> CharRange {
        self.content_range
    }

    fn enclosing_range(&self) -> CharRange {
        self.enclosing_range
    }

    fn offset(&self, delta: isize) -> Option<Self> {
        Some(Self {
            native_prefix_range: self.native_prefix_range.offset(delta)?,
            content_range: self.content_range.offset(delta)?,
            enclosing_range: self.enclosing_range.offset(delta)?,
        })
    }
}
