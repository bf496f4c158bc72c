//! # input_core
//!
//! UI-agnostic editing state for a single-line entry field.
//!
//! - [`EntryBuffer`]: value, caret, selection and a change revision
//! - [`SelectionRange`]: a normalized byte range
//! - boundary helpers that keep carets on UTF-8 character boundaries
//!
//! Nothing here knows about layout, painting or the DOM; hosts translate
//! their key events into the buffer's editing operations.

mod buffer;
mod text;

pub use buffer::{EntryBuffer, SelectionRange};
pub use text::{clamp_to_char_boundary, next_char_boundary, prev_char_boundary, strip_line_breaks};
