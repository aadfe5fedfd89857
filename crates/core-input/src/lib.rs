//! Keyboard input: decoding and the default keymap.
//!
//! Keys reach the editor either as crossterm events or as a raw byte
//! stream (pasted text, scripted input). Both are normalised into
//! [`KeyEvent`]s in the terminal's own vocabulary: printable characters,
//! control letters (`Ctrl-A` ... `Ctrl-_`) and meta characters (a key
//! typed after `ESC`). [`KeyTranslator`] maps those onto abstract
//! [`Command`](core_actions::Command)s.

mod decode;
mod key;
mod keymap;

pub use decode::ByteDecoder;
pub use key::{KeyCode, KeyEvent, KeyModifiers, from_crossterm};
pub use keymap::KeyTranslator;
