//! File reading and writing for the buffer.
//!
//! Files are split on `\n` with the separator removed; a final newline does
//! not produce an extra empty line. Writing appends `\n` to every line.

use std::fs;
use std::io::{self, ErrorKind};
use std::path::Path;

use crate::undo::Line;

/// Result of reading one source file.
#[derive(Debug)]
pub enum ReadOutcome {
    Loaded(Vec<Line>),
    /// The file could not be read; it will be created on save.
    Missing(io::Error),
}

pub fn read_lines(path: &Path) -> ReadOutcome {
    match fs::read(path) {
        Ok(bytes) => {
            let text = String::from_utf8_lossy(&bytes);
            if let std::borrow::Cow::Owned(_) = text {
                tracing::warn!(target: "io", file = %path.display(), "file_not_utf8_lossy_decode");
            }
            let lines = split_lines(&text);
            tracing::debug!(target: "io", file = %path.display(), size_bytes = bytes.len(), line_count = lines.len(), "file_read_ok");
            ReadOutcome::Loaded(lines)
        }
        Err(e) => {
            if e.kind() == ErrorKind::NotFound {
                tracing::info!(target: "io", file = %path.display(), "file_new");
            } else {
                tracing::error!(target: "io", file = %path.display(), ?e, "file_open_error");
            }
            ReadOutcome::Missing(e)
        }
    }
}

pub fn split_lines(text: &str) -> Vec<Line> {
    let body = text.strip_suffix('\n').unwrap_or(text);
    if text.is_empty() {
        return Vec::new();
    }
    body.split('\n').map(Line::from).collect()
}

pub fn write_lines(path: &Path, lines: &[Line]) -> io::Result<()> {
    let size: usize = lines.iter().map(|l| l.len() + 1).sum();
    let mut content = String::with_capacity(size);
    for line in lines {
        content.push_str(line);
        content.push('\n');
    }
    fs::write(path, content.as_bytes())?;
    tracing::debug!(target: "io", file = %path.display(), size_bytes = size, line_count = lines.len(), "file_write_ok");
    Ok(())
}
