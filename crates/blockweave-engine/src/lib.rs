pub mod blocks;
pub mod editing;
pub mod snapshot;
pub mod text;

// Re-export key types for easier usage
pub use blocks::{BlockKind, BlockNode, Grammar, NativeGrammar, Node};
pub use editing::*;
pub use snapshot::{InvariantViolation, MirrorObserver};
pub use text::{BufferError, CharRange, TextBuffer};
