use serde::Serialize;

use crate::blocks::native::NativePrefix;
use crate::blocks::types::Node;
use crate::text::CharRange;

/// Quoted line, `⟦blockquote⟧> Text`.
///
/// Owns the quote marker; a `blockquote` prefix without `> ` is not a quote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Blockquote {
    pub native_prefix_range: CharRange,
    pub marker_range: CharRange,
    pub content_range: CharRange,
    pub enclosing_range: CharRange,
}

impl Blockquote {
    pub const NAME: &'static str = "blockquote";
    /// The markdown marker following the native prefix.
    pub const MARKER: &'static str = "> ";

    pub fn parse(prefix: &NativePrefix<'_>, line: CharRange) -> Option<Self> {
        if prefix.name != Self::NAME || !prefix.rest.starts_with(Self::MARKER) {
            return None;
        }
        let marker_range = CharRange::new(prefix.end(), Self::MARKER.len());
        Some(Self {
            native_prefix_range: prefix.range,
            marker_range,
            content_range: CharRange::from_bounds(marker_range.end(), line.end())?,
            enclosing_range: line,
        })
    }
}

impl Node for Blockquote {
    fn content_range(&self) -> CharRange {
        self.content_range
    }

    fn enclosing_range(&self) -> CharRange {
        self.enclosing_range
    }

    fn offset(&self, delta: isize) -> Option<Self> {
        Some(Self {
            native_prefix_range: self.native_prefix_range.offset(delta)?,
            marker_range: self.marker_range.offset(delta)?,
            content_range: self.content_range.offset(delta)?,
            enclosing_range: self.enclosing_range.offset(delta)?,
        })
    }
}
