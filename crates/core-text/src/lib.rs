//! Byte-level text primitives shared by the buffer and the views.
//!
//! Lines are stored as UTF-8 and every cursor column in the editor is a
//! *character* index. `Str` is the borrowed view that converts between the
//! two index spaces, decodes single characters and scans keyword runs. It is
//! deliberately tolerant of malformed input: counting and index conversion
//! only look at leading bytes, while `decode_at` reports malformed sequences
//! through `DecodeError` instead of guessing.
//!
//! The helpers in [`class`] and [`motion`] are pure functions over a single
//! line; they never see the buffer or window state.

pub mod class;
pub mod motion;
mod utf8;

pub use class::{WordClass, block_indent, is_blank, leading_spaces};
pub use utf8::{Chars, DecodeError, Str, sequence_width};

/// Bytes that belong to a keyword run (C-locale `isalpha`).
#[inline]
pub fn is_keyword_byte(b: u8) -> bool {
    b.is_ascii_alphabetic()
}
