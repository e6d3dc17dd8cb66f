use std::collections::BTreeMap;

use serde::Serialize;

use crate::blocks::{BlockNode, Node};
use crate::text::{CharRange, TextBuffer};

#[derive(Debug, Serialize)]
pub struct Snap {
    pub text: String,
    pub blocks: Vec<BlockSnap>,
}

#[derive(Debug, Serialize)]
pub struct BlockSnap {
    pub kind: String,
    pub enclosing: (usize, usize),
    pub content: (usize, usize),
    pub text: String,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub attrs: BTreeMap<String, String>,
}

fn pair(range: CharRange) -> (usize, usize) {
    (range.start, range.len)
}

fn attrs(block: &BlockNode) -> BTreeMap<String, String> {
    let mut attrs = BTreeMap::new();
    match block {
        BlockNode::CodeBlock(b) => {
            if let Some(language) = &b.language {
                attrs.insert("language".into(), language.clone());
            }
        }
        BlockNode::ListItem(b) => {
            attrs.insert("indentation".into(), b.indentation.to_string());
        }
        BlockNode::ChecklistItem(b) => {
            attrs.insert("indentation".into(), b.indentation.to_string());
            attrs.insert("completion".into(), format!("{:?}", b.completion));
        }
        _ => {}
    }
    attrs
}

/// Stable, human-readable view of a document for `insta` snapshots.
pub fn normalize(buffer: &TextBuffer, blocks: &[BlockNode]) -> Snap {
    let blocks = blocks
        .iter()
        .map(|b| BlockSnap {
            kind: b.kind().to_string(),
            enclosing: pair(b.enclosing_range()),
            content: pair(b.content_range()),
            text: buffer
                .slice(b.content_range())
                .map(|t| t.into_owned())
                .unwrap_or_else(|e| format!("<{e}>")),
            attrs: attrs(b),
        })
        .collect();

    Snap {
        text: buffer.to_string(),
        blocks,
    }
}
