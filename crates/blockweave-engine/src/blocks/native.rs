//! The native prefix every structured line starts with: `⟦name⟧`.

use crate::text::{CharRange, utf16_len};

pub const LEADING_NATIVE_PREFIX: char = '⟦';
pub const TRAILING_NATIVE_PREFIX: char = '⟧';

/// A native prefix found at the start of a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NativePrefix<'a> {
    /// The name between the delimiters, e.g. `doc-heading`.
    pub name: &'a str,
    /// Range of the whole `⟦name⟧` delimiter.
    pub range: CharRange,
    /// Line text following the delimiter.
    pub rest: &'a str,
}

impl<'a> NativePrefix<'a> {
    /// Splits a native prefix off `line`, which starts at buffer offset `start`.
    pub fn parse(line: &'a str, start: usize) -> Option<Self> {
        let inner = line.strip_prefix(LEADING_NATIVE_PREFIX)?;
        let close = inner.find(TRAILING_NATIVE_PREFIX)?;
        let name = &inner[..close];
        if name.is_empty() {
            return None;
        }
        let rest = &inner[close + TRAILING_NATIVE_PREFIX.len_utf8()..];
        let len = utf16_len(&line[..line.len() - rest.len()]);
        Some(Self {
            name,
            range: CharRange::new(start, len),
            rest,
        })
    }

    /// Offset of the first character after the delimiter.
    pub fn end(&self) -> usize {
        self.range.end()
    }
}

/// Renders `⟦name⟧` followed by `text`.
pub fn native_representation(name: &str, text: &str) -> String {
    format!("{LEADING_NATIVE_PREFIX}{name}{TRAILING_NATIVE_PREFIX}{text}")
}
