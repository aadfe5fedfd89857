//! Raw byte stream decoding.
//!
//! * `ESC` marks the next ASCII byte as a meta key; repeated `ESC`s keep the
//!   prefix pending.
//! * Bytes below 0x20 are control letters; `DEL` (0x7F) is `Ctrl-H`.
//! * Everything else is printable; multi-byte UTF-8 sequences are assembled
//!   before a key is emitted, and malformed sequences are dropped.

use core_text::{Str, sequence_width};
use tracing::debug;

use crate::key::{KeyCode, KeyEvent, KeyModifiers};

const ESC: u8 = 0x1B;
const DEL: u8 = 0x7F;

#[derive(Debug, Default)]
pub struct ByteDecoder {
    meta: bool,
    pending: Vec<u8>,
    width: usize,
}

impl ByteDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// True while an `ESC` prefix or a partial UTF-8 sequence is buffered.
    pub fn is_pending(&self) -> bool {
        self.meta || !self.pending.is_empty()
    }

    pub fn feed(&mut self, bytes: &[u8]) -> Vec<KeyEvent> {
        bytes.iter().filter_map(|&b| self.push(b)).collect()
    }

    pub fn push(&mut self, byte: u8) -> Option<KeyEvent> {
        if !self.pending.is_empty() {
            if byte & 0xC0 == 0x80 {
                self.pending.push(byte);
                return self.finish_sequence();
            }
            debug!(target: "input.decode", expected = self.width, got = self.pending.len(), "truncated_sequence");
            self.pending.clear();
        }

        if std::mem::take(&mut self.meta) {
            if byte == ESC {
                self.meta = true;
                return None;
            }
            if byte.is_ascii() {
                return Some(KeyEvent::new(KeyCode::Char(char::from(byte)), KeyModifiers::META));
            }
            debug!(target: "input.decode", byte, "meta_prefix_dropped");
        }

        match byte {
            ESC => {
                self.meta = true;
                None
            }
            0x00..0x20 => Some(KeyEvent::from_control_byte(byte)),
            DEL => Some(KeyEvent::ctrl('H')),
            0x20..DEL => Some(KeyEvent::plain(char::from(byte))),
            _ => match sequence_width(byte) {
                Some(width) => {
                    self.width = width;
                    self.pending.push(byte);
                    None
                }
                None => {
                    debug!(target: "input.decode", byte, "invalid_lead_byte");
                    None
                }
            },
        }
    }

    fn finish_sequence(&mut self) -> Option<KeyEvent> {
        if self.pending.len() < self.width {
            return None;
        }
        let decoded = Str::from_bytes(&self.pending).decode_at(0);
        self.pending.clear();
        match decoded {
            Ok(c) => Some(KeyEvent::plain(c)),
            Err(err) => {
                debug!(target: "input.decode", error = %err, "invalid_sequence");
                None
            }
        }
    }
}
