//! # Blocks
//!
//! Typed, range-bearing units of document structure and the grammar that
//! produces them.
//!
//! ## Modules
//!
//! - **`types`**: `BlockNode` (closed set of variants), `BlockKind` (type tag)
//!   and the `Node` capability trait
//! - **`kinds`**: one type per variant, each owning its delimiter syntax
//! - **`native`**: the `⟦name⟧` prefix shared by structured lines
//! - **`classify`**: `NativeLineClassifier`, one line to one block
//! - **`grammar`**: the `Grammar` trait the document reparses through, and the
//!   bundled `NativeGrammar`
//!
//! ## Key Invariants
//!
//! - A block's enclosing range is its whole line without the terminator; the
//!   single `\n` between two lines is the gap between their blocks
//! - Classification looks at one line only

pub mod classify;
pub mod grammar;
pub mod kinds;
pub mod native;
pub mod types;

pub use classify::NativeLineClassifier;
pub use grammar::{Grammar, NativeGrammar, parse_document};
pub use kinds::{
    Blockquote, ChecklistItem, CodeBlock, Completion, HorizontalRule, ListItem, Paragraph, Title,
};
pub use native::{LEADING_NATIVE_PREFIX, NativePrefix, TRAILING_NATIVE_PREFIX, native_representation};
pub use types::{BlockKind, BlockNode, Node};
