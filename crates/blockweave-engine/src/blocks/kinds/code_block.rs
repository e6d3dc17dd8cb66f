use serde::Serialize;

use crate::blocks::native::NativePrefix;
use crate::blocks::types::Node;
use crate::text::CharRange;

/// One line of code, `⟦code⟧text` or `⟦code-rust⟧text`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CodeBlock {
    pub native_prefix_range: CharRange,
    pub language: Option<String>,
    pub content_range: CharRange,
    pub enclosing_range: CharRange,
}

impl CodeBlock {
    pub const NAME: &'static str = "code";

    pub fn parse(prefix: &NativePrefix<'_>, line: CharRange) -> Option<Self> {
        let language = if prefix.name == Self::NAME {
            None
        } else {
            let lang = prefix.name.strip_prefix("code-")?;
            if lang.is_empty() {
                return None;
            }
            Some(lang.to_string())
        };
        Some(Self {
            native_prefix_range: prefix.range,
            language,
            content_range: CharRange::from_bounds(prefix.end(), line.end())?,
            enclosing_range: line,
        })
    }
}

impl Node for CodeBlock {
    fn content_range(&self) -> CharRange {
        self.content_range
    }

    fn enclosing_range(&self) -> CharRange {
        self.enclosing_range
    }

    fn offset(&self, delta: isize) -> Option<Self> {
        Some(Self {
            native_prefix_range: self.native_prefix_range.offset(delta)?,
            language: self.language.clone(),
            content_range: self.content_range.offset(delta)?,
            enclosing_range: self.enclosing_range.offset(delta)?,
        })
    }
}
