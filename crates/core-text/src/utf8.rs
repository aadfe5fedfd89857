use std::io::{self, Write};
use std::ops::Range;

use thiserror::Error;

use crate::is_keyword_byte;

/// Malformed or out-of-range character access.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("character index {index} is past the end of the text")]
    OutOfRange { index: usize },
    #[error("invalid UTF-8 lead byte {byte:#04x} at byte offset {offset}")]
    InvalidLead { offset: usize, byte: u8 },
    #[error("truncated UTF-8 sequence at byte offset {offset}")]
    Truncated { offset: usize },
    #[error("overlong UTF-8 encoding at byte offset {offset}")]
    Overlong { offset: usize },
    #[error("code point {value:#x} at byte offset {offset} is not a scalar value")]
    InvalidScalar { offset: usize, value: u32 },
}

#[inline]
fn is_continuation(b: u8) -> bool {
    b & 0xC0 == 0x80
}

/// Borrowed UTF-8 text indexed by character.
///
/// Character positions are defined by *leading* bytes (any byte that is not
/// `10xxxxxx`), so `char_len` and the index conversions stay total even for
/// malformed input. Round-trip holds on character boundaries:
/// `index_bytes_to_chars(index_chars_to_bytes(n)) == n` for `n <= char_len()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Str<'a> {
    bytes: &'a [u8],
}

impl<'a> Str<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            bytes: text.as_bytes(),
        }
    }

    pub fn from_bytes(bytes: &'a [u8]) -> Self {
        Self { bytes }
    }

    pub fn as_bytes(&self) -> &'a [u8] {
        self.bytes
    }

    pub fn byte_len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Number of characters (leading bytes).
    pub fn char_len(&self) -> usize {
        self.bytes.iter().filter(|b| !is_continuation(**b)).count()
    }

    /// Byte offset of the `n`th character; `byte_len()` when `n` is past the end.
    pub fn index_chars_to_bytes(&self, n: usize) -> usize {
        let mut seen = 0;
        for (i, b) in self.bytes.iter().enumerate() {
            if is_continuation(*b) {
                continue;
            }
            if seen == n {
                return i;
            }
            seen += 1;
        }
        self.bytes.len()
    }

    /// Number of characters that start before byte offset `n` (clamped to the end).
    pub fn index_bytes_to_chars(&self, n: usize) -> usize {
        let end = n.min(self.bytes.len());
        self.bytes[..end]
            .iter()
            .filter(|b| !is_continuation(**b))
            .count()
    }

    /// Decode the `n`th character. Sequences longer than four bytes,
    /// overlong forms and surrogates are rejected.
    pub fn decode_at(&self, n: usize) -> Result<char, DecodeError> {
        let offset = self.index_chars_to_bytes(n);
        if offset >= self.bytes.len() {
            return Err(DecodeError::OutOfRange { index: n });
        }
        decode_sequence(self.bytes, offset)
    }

    /// Raw bytes of the `n`th character (empty past the end).
    pub fn char_bytes(&self, n: usize) -> &'a [u8] {
        self.byte_range(n..n + 1)
            .map(|r| &self.bytes[r])
            .unwrap_or(&[])
    }

    /// Byte range covering the character range `chars`, clamped to the text.
    pub fn byte_range(&self, chars: Range<usize>) -> Option<Range<usize>> {
        let start = self.index_chars_to_bytes(chars.start);
        if start >= self.bytes.len() && chars.start < chars.end {
            return None;
        }
        let end = self.index_chars_to_bytes(chars.end).max(start);
        Some(start..end)
    }

    /// Write the raw bytes of the `n`th character; nothing past the end.
    pub fn output_char<W: Write + ?Sized>(&self, n: usize, out: &mut W) -> io::Result<()> {
        out.write_all(self.char_bytes(n))
    }

    /// Character iterator. Malformed sequences yield one `Err` each.
    pub fn chars(&self) -> Chars<'a> {
        Chars {
            bytes: self.bytes,
            pos: skip_continuations(self.bytes, 0),
        }
    }

    /// Character index of the first keyword run at or after character `start`
    /// that exactly equals one of `keywords`.
    ///
    /// Runs are maximal stretches of ASCII letters beginning at `start` or
    /// later; a keyword must match a whole run, never a prefix or suffix of
    /// one.
    pub fn search_keyword<K: AsRef<str>>(&self, keywords: &[K], start: usize) -> Option<usize> {
        let len = self.bytes.len();
        let mut i = self.index_chars_to_bytes(start);
        while i < len {
            if !is_keyword_byte(self.bytes[i]) {
                i += 1;
                continue;
            }
            let run_start = i;
            while i < len && is_keyword_byte(self.bytes[i]) {
                i += 1;
            }
            let run = &self.bytes[run_start..i];
            if keywords.iter().any(|k| k.as_ref().as_bytes() == run) {
                return Some(self.index_bytes_to_chars(run_start));
            }
        }
        None
    }

    /// Keyword equal to the run that begins exactly at character `pos`.
    pub fn match_keyword<'k, K: AsRef<str>>(&self, keywords: &'k [K], pos: usize) -> Option<&'k str> {
        let start = self.index_chars_to_bytes(pos);
        let end = self.bytes[start..]
            .iter()
            .position(|b| !is_keyword_byte(*b))
            .map_or(self.bytes.len(), |p| start + p);
        if start == end {
            return None;
        }
        let run = &self.bytes[start..end];
        keywords
            .iter()
            .map(|k| k.as_ref())
            .find(|k| k.as_bytes() == run)
    }

    /// Character range of the keyword run containing `column`. The cursor
    /// must sit on a letter; anything else yields `None`.
    pub fn keyword_run_at(&self, column: usize) -> Option<Range<usize>> {
        let len = self.char_len();
        let letter = |i: usize| {
            let bytes = self.char_bytes(i);
            bytes.len() == 1 && is_keyword_byte(bytes[0])
        };
        if column >= len || !letter(column) {
            return None;
        }
        let mut start = column;
        while start > 0 && letter(start - 1) {
            start -= 1;
        }
        let mut end = column + 1;
        while end < len && letter(end) {
            end += 1;
        }
        Some(start..end)
    }
}

impl<'a> From<&'a str> for Str<'a> {
    fn from(text: &'a str) -> Self {
        Self::new(text)
    }
}

/// Iterator returned by [`Str::chars`].
pub struct Chars<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl Iterator for Chars<'_> {
    type Item = Result<char, DecodeError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.pos >= self.bytes.len() {
            return None;
        }
        let item = decode_sequence(self.bytes, self.pos);
        self.pos = skip_continuations(self.bytes, self.pos + 1);
        Some(item)
    }
}

fn skip_continuations(bytes: &[u8], mut pos: usize) -> usize {
    while pos < bytes.len() && is_continuation(bytes[pos]) {
        pos += 1;
    }
    pos
}

/// Length of the sequence introduced by `lead`, or `None` when `lead`
/// cannot start a sequence of at most four bytes.
pub fn sequence_width(lead: u8) -> Option<usize> {
    match lead {
        0x00..=0x7F => Some(1),
        0xC0..=0xDF => Some(2),
        0xE0..=0xEF => Some(3),
        0xF0..=0xF7 => Some(4),
        _ => None,
    }
}

fn decode_sequence(bytes: &[u8], offset: usize) -> Result<char, DecodeError> {
    let lead = bytes[offset];
    let (width, initial, min) = match sequence_width(lead) {
        Some(1) => return Ok(char::from(lead)),
        Some(2) => (2, u32::from(lead & 0x1F), 0x80),
        Some(3) => (3, u32::from(lead & 0x0F), 0x800),
        Some(4) => (4, u32::from(lead & 0x07), 0x1_0000),
        _ => return Err(DecodeError::InvalidLead { offset, byte: lead }),
    };
    let tail = bytes
        .get(offset + 1..offset + width)
        .ok_or(DecodeError::Truncated { offset })?;
    let mut value = initial;
    for b in tail {
        if !is_continuation(*b) {
            return Err(DecodeError::Truncated { offset });
        }
        value = (value << 6) | u32::from(b & 0x3F);
    }
    if value < min {
        return Err(DecodeError::Overlong { offset });
    }
    char::from_u32(value).ok_or(DecodeError::InvalidScalar { offset, value })
}
