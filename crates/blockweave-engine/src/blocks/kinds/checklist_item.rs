use serde::Serialize;

use crate::blocks::native::NativePrefix;
use crate::blocks::types::Node;
use crate::text::CharRange;

use super::list_item::parse_indentation;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Completion {
    Incomplete,
    Complete,
}

impl Completion {
    fn marker(self) -> &'static str {
        match self {
            Completion::Incomplete => "- [ ] ",
            Completion::Complete => "- [x] ",
        }
    }
}

/// Checklist item, `⟦checklist-<indent>⟧- [ ] Text` or
/// `⟦checklist-done-<indent>⟧- [x] Text`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChecklistItem {
    pub native_prefix_range: CharRange,
    pub indentation: u8,
    pub completion: Completion,
    pub marker_range: CharRange,
    pub content_range: CharRange,
    pub enclosing_range: CharRange,
}

impl ChecklistItem {
    pub const DONE_PREFIX: &'static str = "checklist-done-";
    pub const NAME_PREFIX: &'static str = "checklist-";

    pub fn parse(prefix: &NativePrefix<'_>, line: CharRange) -> Option<Self> {
        let (completion, level) = match prefix.name.strip_prefix(Self::DONE_PREFIX) {
            Some(level) => (Completion::Complete, level),
            None => (
                Completion::Incomplete,
                prefix.name.strip_prefix(Self::NAME_PREFIX)?,
            ),
        };
        let indentation = parse_indentation(level)?;
        let marker = completion.marker();
        if !prefix.rest.starts_with(marker) {
            return None;
        }
        let marker_range = CharRange::new(prefix.end(), marker.len());
        Some(Self {
            native_prefix_range: prefix.range,
            indentation,
            completion,
            marker_range,
            content_range: CharRange::from_bounds(marker_range.end(), line.end())?,
            enclosing_range: line,
        })
    }
}

impl Node for ChecklistItem {
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
            completion: self.completion,
            marker_range: self.marker_range.offset(delta)?,
            content_range: self.content_range.offset(delta)?,
            enclosing_range: self.enclosing_range.offset(delta)?,
        })
    }
}
