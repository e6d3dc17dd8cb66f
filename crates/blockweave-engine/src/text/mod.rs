//! Text storage and range arithmetic.
//!
//! - **`range`**: `CharRange`, the `(start, len)` pair every block and edit is
//!   expressed in
//! - **`buffer`**: `TextBuffer`, the rope-backed document text with UTF-16
//!   offsets and line lookups

pub mod buffer;
pub mod range;

pub use buffer::{BufferError, LineRef, TextBuffer, utf16_len};
pub use range::CharRange;
