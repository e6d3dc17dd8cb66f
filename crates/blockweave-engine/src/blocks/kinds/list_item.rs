use serde::Serialize;

use crate::blocks::native::NativePrefix;
use crate::blocks::types::Node;
use crate::text::CharRange;

/// Unordered list item, `⟦unordered-<indent>⟧- Text`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListItem {
    pub native_prefix_range: CharRange,
    pub indentation: u8,
    pub marker_range: CharRange,
    pub content_range: CharRange,
    pub enclosing_range: CharRange,
}

impl ListItem {
    pub const NAME_PREFIX: &'static str = "unordered-";
    pub const MARKER: &'static str = "- ";
    /// Deepest indentation level a list item may declare.
    pub const MAX_INDENTATION: u8 = 3;

    pub fn parse(prefix: &NativePrefix<'_>, line: CharRange) -> Option<Self> {
        let indentation = parse_indentation(prefix.name.strip_prefix(Self::NAME_PREFIX)?)?;
        if !prefix.rest.starts_with(Self::MARKER) {
            return None;
        }
        let marker_range = CharRange::new(prefix.end(), Self::MARKER.len());
        Some(Self {
            native_prefix_range: prefix.range,
            indentation,
            marker_range,
            content_range: CharRange::from_bounds(marker_range.end(), line.end())?,
            enclosing_range: line,
        })
    }
}

/// Parses an indentation suffix such as `0` or `2`.
pub(crate) fn parse_indentation(s: &str) -> Option<u8> {
    let level: u8 = s.parse().ok()?;
    (level <= ListItem::MAX_INDENTATION).then_some(level)
}

impl Node for ListItem {
    fn content_range(&self) -> CharRange {
        self.content_range
    }

    fn enclosing_range(&self) -> CharRange {
        self.enclosing_range
    }

    fn offset(&self, delta: isize) -> Option<Self> {
        Some(Self {
            native_prefix_range: self.native_prefix_range.offset(delta)?,
            indentation: self.indentation,
            marker_range: self.marker_range.offset(delta)?,
            content_range: self.content_range.offset(delta)?,
            enclosing_range: self.enclosing_range.offset(delta)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn parses_indented_item() {
        let prefix = NativePrefix::parse("⟦unordered-1⟧- Milk", 4).unwrap();
        let item = ListItem::parse(&prefix, CharRange::new(4, 19)).unwrap();
        assert_eq!(item.indentation, 1);
        assert_eq!(item.marker_range, CharRange::new(17, 2));
        assert_eq!(item.content_range, CharRange::new(19, 4));
    }

    #[rstest]
    #[case("0", Some(0))]
    #[case("3", Some(3))]
    #[case("4", None)]
    #[case("x", None)]
    #[case("", None)]
    fn indentation_levels(#[case] input: &str, #[case] expected: Option<u8>) {
        assert_eq!(parse_indentation(input), expected);
    }

    #[test]
    fn missing_marker_is_not_an_item() {
        let prefix = NativePrefix::parse("⟦unordered-0⟧Milk", 0).unwrap();
        assert_eq!(ListItem::parse(&prefix, CharRange::new(0, 17)), None);
    }
}
