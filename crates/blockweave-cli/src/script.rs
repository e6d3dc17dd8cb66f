use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

/// An edit script: initial text plus edits applied in order.
///
/// ```toml
/// text = "⟦doc-heading⟧Title\nOne\nTwo"
///
/// [[edits]]
/// start = 22
/// length = 1
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Script {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub edits: Vec<ScriptEdit>,
}

/// Replace `length` code units at `start` with `replacement`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ScriptEdit {
    pub start: usize,
    #[serde(default)]
    pub length: usize,
    #[serde(default)]
    pub replacement: String,
}

impl Script {
    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read script {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("Failed to parse script {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_text_and_edits() {
        let script = Script::parse(
            r#"
text = "One\nTwo"

[[edits]]
start = 3
length = 1

[[edits]]
start = 0
replacement = "⟦doc-heading⟧"
"#,
        )
        .unwrap();

        assert_eq!(script.text, "One\nTwo");
        assert_eq!(
            script.edits,
            vec![
                ScriptEdit {
                    start: 3,
                    length: 1,
                    replacement: String::new(),
                },
                ScriptEdit {
                    start: 0,
                    length: 0,
                    replacement: "⟦doc-heading⟧".into(),
                },
            ]
        );
    }

    #[test]
    fn empty_script_is_empty_document() {
        let script = Script::parse("").unwrap();
        assert!(script.text.is_empty());
        assert!(script.edits.is_empty());
    }

    #[test]
    fn rejects_edit_without_start() {
        assert!(Script::parse("[[edits]]\nlength = 2\n").is_err());
    }
}
