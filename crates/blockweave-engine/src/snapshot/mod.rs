//! # Snapshot and Consistency Support
//!
//! Tools for checking the engine from the outside.
//!
//! ## Modules
//!
//! - **`invariants`**: partition checks over a block list (ranges in bounds,
//!   content inside enclosing, ordered blocks separated by single `\n`s).
//!   The document runs these after every edit when configured to
//! - **`normalize`**: converts a document to a stable, serializable `Snap`
//!   for `insta` snapshot testing
//! - **`mirror`**: `MirrorObserver`, an observer that rebuilds the block list
//!   from notifications and keeps a transcript of them

pub mod invariants;
pub mod mirror;
pub mod normalize;

pub use invariants::{InvariantViolation, check as check_invariants};
pub use mirror::MirrorObserver;
pub use normalize::{BlockSnap, Snap, normalize};
