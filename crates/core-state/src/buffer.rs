//! Line buffer spanning one or more source files.
//!
//! All files opened for a session are concatenated into a single sequence of
//! lines. `file_lines[i]` records how many of those lines belong to file `i`,
//! and the counts always sum to the total line count; every line mutation
//! updates the owning file's count.
//!
//! Each mutating operation first checkpoints the undo history. Callers that
//! perform several mutations as one logical edit wrap them in
//! [`TextBuffer::begin_group`] / [`TextBuffer::end_group`] so only the first
//! one checkpoints.

use std::io;
use std::path::{Path, PathBuf};

use core_text::Str;
use thiserror::Error;
use tracing::{debug, trace, warn};

use crate::io::{ReadOutcome, read_lines, write_lines};
use crate::undo::{Line, UndoHistory};

/// One file that could not be written.
#[derive(Debug)]
pub struct SaveFailure {
    pub path: PathBuf,
    pub source: io::Error,
}

#[derive(Debug, Error)]
pub enum BufferError {
    #[error("failed to save {} of {total} file(s)", failed.len())]
    Save {
        total: usize,
        failed: Vec<SaveFailure>,
    },
}

#[derive(Debug, Default)]
pub struct TextBuffer {
    lines: Vec<Line>,
    paths: Vec<PathBuf>,
    file_lines: Vec<usize>,
    dirty: bool,
    new_file: bool,
    undo: UndoHistory,
    group_depth: usize,
    group_checkpointed: bool,
}

impl TextBuffer {
    /// Load every path in order. Unreadable files contribute no lines and
    /// mark the buffer as new.
    pub fn open<P: AsRef<Path>>(paths: &[P]) -> Self {
        let mut buffer = Self::default();
        for path in paths {
            buffer.load(path.as_ref());
        }
        buffer
    }

    /// In-memory buffer attributed to a single path (nothing is read).
    pub fn from_lines<I, S>(path: impl Into<PathBuf>, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let lines: Vec<Line> = lines.into_iter().map(|s| Line::from(s.as_ref())).collect();
        Self {
            file_lines: vec![lines.len()],
            paths: vec![path.into()],
            lines,
            ..Self::default()
        }
    }

    /// Append the lines of `path`. The undo history restarts at the loaded
    /// state.
    pub fn load(&mut self, path: &Path) {
        let count = match read_lines(path) {
            ReadOutcome::Loaded(lines) => {
                let count = lines.len();
                self.lines.extend(lines);
                count
            }
            ReadOutcome::Missing(_) => {
                self.new_file = true;
                0
            }
        };
        self.paths.push(path.to_path_buf());
        self.file_lines.push(count);
        self.undo.clear();
        debug!(target: "state.buffer", files = self.paths.len(), lines = self.lines.len(), "load");
    }

    /// Write each file's line range back to its path. Every file is
    /// attempted; flags are cleared only when all of them succeed.
    pub fn save(&mut self) -> Result<(), BufferError> {
        let mut failed = Vec::new();
        let mut start = 0;
        for (path, &count) in self.paths.iter().zip(&self.file_lines) {
            let range = self.lines.get(start..start + count).unwrap_or_default();
            start += count;
            if let Err(source) = write_lines(path, range) {
                tracing::error!(target: "io", file = %path.display(), ?source, "file_write_error");
                failed.push(SaveFailure {
                    path: path.clone(),
                    source,
                });
            }
        }
        if failed.is_empty() {
            self.dirty = false;
            self.new_file = false;
            debug!(target: "state.buffer", files = self.paths.len(), "save_ok");
            Ok(())
        } else {
            Err(BufferError::Save {
                total: self.paths.len(),
                failed,
            })
        }
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    pub fn get_line(&self, n: usize) -> Option<&str> {
        self.lines.get(n).map(|l| &**l)
    }

    /// Character length of line `n`; 0 when out of range.
    pub fn line_length_chars(&self, n: usize) -> usize {
        self.get_line(n).map_or(0, |l| Str::new(l).char_len())
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn is_new_file(&self) -> bool {
        self.new_file
    }

    pub fn file_count(&self) -> usize {
        self.paths.len()
    }

    /// `(path, line count)` per source file.
    pub fn files(&self) -> impl Iterator<Item = (&Path, usize)> {
        self.paths
            .iter()
            .map(PathBuf::as_path)
            .zip(self.file_lines.iter().copied())
    }

    /// Index of the file owning line `n`. Lines at or past the end belong to
    /// the last file, which is where appended lines go.
    pub fn file_index_for_line(&self, n: usize) -> Option<usize> {
        let mut start = 0;
        for (i, count) in self.file_lines.iter().enumerate() {
            if n < start + count {
                return Some(i);
            }
            start += count;
        }
        self.file_lines.len().checked_sub(1)
    }

    pub fn filename_for_line(&self, n: usize) -> Option<&Path> {
        self.file_index_for_line(n)
            .and_then(|i| self.paths.get(i))
            .map(PathBuf::as_path)
    }

    pub fn delete_line(&mut self, n: usize) -> bool {
        if n >= self.lines.len() {
            return false;
        }
        let Some(file) = self.file_index_for_line(n) else {
            return false;
        };
        self.before_mutation();
        self.lines.remove(n);
        self.file_lines[file] -= 1;
        trace!(target: "state.buffer", line = n, file, "delete_line");
        true
    }

    /// Insert an empty line before `n` (`n == line_count()` appends).
    pub fn insert_empty_line(&mut self, n: usize) -> bool {
        if n > self.lines.len() {
            return false;
        }
        let Some(file) = self.file_index_for_line(n) else {
            warn!(target: "state.buffer", line = n, "insert_without_file");
            return false;
        };
        self.before_mutation();
        self.lines.insert(n, Line::from(""));
        self.file_lines[file] += 1;
        trace!(target: "state.buffer", line = n, file, "insert_empty_line");
        true
    }

    pub fn replace_line(&mut self, n: usize, text: &str) -> bool {
        match self.lines.get(n) {
            Some(current) if &**current != text => {}
            _ => return false,
        }
        self.before_mutation();
        self.lines[n] = Line::from(text);
        trace!(target: "state.buffer", line = n, "replace_line");
        true
    }

    /// Rotate `range` lines starting at `start` left by `distance`; a
    /// negative distance rotates right. No-op when the span does not fit.
    pub fn rotate_lines(&mut self, start: usize, range: usize, distance: isize) -> bool {
        let fits = start
            .checked_add(range)
            .is_some_and(|end| end <= self.lines.len());
        if range == 0 || !fits {
            return false;
        }
        let shift = distance.rem_euclid(range as isize) as usize;
        if shift == 0 {
            return false;
        }
        self.before_mutation();
        self.lines[start..start + range].rotate_left(shift);
        trace!(target: "state.buffer", start, range, shift, "rotate_lines");
        true
    }

    /// Record the live state in the undo history if it changed since the
    /// snapshot at the current position.
    pub fn undo_checkpoint(&mut self) -> bool {
        self.undo.checkpoint(&self.lines, &self.file_lines)
    }

    /// Move through the undo history (negative = undo, positive = redo).
    /// The live state is checkpointed first so a redo can return to it.
    pub fn undo_step(&mut self, direction: isize) -> bool {
        self.undo_checkpoint();
        match self.undo.step(direction) {
            Some(snapshot) => {
                self.lines = snapshot.lines.clone();
                self.file_lines = snapshot.file_lines.clone();
                self.dirty = true;
                true
            }
            None => false,
        }
    }

    pub fn undo_position(&self) -> usize {
        self.undo.position()
    }

    pub fn undo_len(&self) -> usize {
        self.undo.len()
    }

    /// Start a compound edit: only the first mutation inside the group
    /// checkpoints. Groups nest.
    pub fn begin_group(&mut self) {
        if self.group_depth == 0 {
            self.group_checkpointed = false;
        }
        self.group_depth += 1;
    }

    pub fn end_group(&mut self) {
        self.group_depth = self.group_depth.saturating_sub(1);
    }

    fn before_mutation(&mut self) {
        if self.group_depth == 0 || !self.group_checkpointed {
            self.undo_checkpoint();
            self.group_checkpointed = self.group_depth > 0;
        }
        self.dirty = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn text(buf: &TextBuffer) -> Vec<String> {
        buf.lines().iter().map(|l| l.to_string()).collect()
    }

    fn two_files() -> (tempfile::TempDir, TextBuffer) {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.txt");
        let b = dir.path().join("b.txt");
        std::fs::write(&a, "a1\na2\n").unwrap();
        std::fs::write(&b, "b1\n").unwrap();
        let buf = TextBuffer::open(&[a, b]);
        (dir, buf)
    }

    #[test]
    fn open_concatenates_files_in_order() {
        let (dir, buf) = two_files();
        assert_eq!(text(&buf), vec!["a1", "a2", "b1"]);
        assert_eq!(buf.filename_for_line(1), Some(dir.path().join("a.txt").as_path()));
        assert_eq!(buf.filename_for_line(2), Some(dir.path().join("b.txt").as_path()));
        assert_eq!(buf.filename_for_line(99), Some(dir.path().join("b.txt").as_path()));
        assert!(!buf.is_dirty());
        assert!(!buf.is_new_file());
    }

    #[test]
    fn missing_file_marks_new() {
        let dir = tempfile::tempdir().unwrap();
        let buf = TextBuffer::open(&[dir.path().join("nope.txt")]);
        assert_eq!(buf.line_count(), 0);
        assert!(buf.is_new_file());
        assert_eq!(buf.file_count(), 1);
    }

    #[test]
    fn line_mutations_keep_file_counts() {
        let (_dir, mut buf) = two_files();
        assert!(buf.insert_empty_line(2));
        assert!(buf.insert_empty_line(4));
        assert!(buf.delete_line(0));
        let counts: Vec<usize> = buf.files().map(|(_, n)| n).collect();
        assert_eq!(counts, vec![1, 3]);
        assert_eq!(counts.iter().sum::<usize>(), buf.line_count());
        assert!(buf.is_dirty());
    }

    #[test]
    fn out_of_range_operations_are_noops() {
        let mut buf = TextBuffer::from_lines("t", ["x"]);
        assert!(!buf.delete_line(1));
        assert!(!buf.insert_empty_line(2));
        assert!(!buf.replace_line(3, "y"));
        assert!(!buf.rotate_lines(0, 2, 1));
        assert_eq!(buf.line_length_chars(7), 0);
        assert!(!buf.is_dirty());
        assert_eq!(buf.undo_len(), 0);
    }

    #[test]
    fn rotate_left_and_right() {
        let mut buf = TextBuffer::from_lines("t", ["a", "b", "c", "d"]);
        assert!(buf.rotate_lines(0, 3, 1));
        assert_eq!(text(&buf), vec!["b", "c", "a", "d"]);
        assert!(buf.rotate_lines(0, 3, -1));
        assert_eq!(text(&buf), vec!["a", "b", "c", "d"]);
        assert!(!buf.rotate_lines(1, 3, 3));
        assert!(buf.rotate_lines(1, 3, 4));
        assert_eq!(text(&buf), vec!["a", "c", "d", "b"]);
    }

    #[test]
    fn undo_returns_to_loaded_state_and_redo_back() {
        let mut buf = TextBuffer::from_lines("t", ["one", "two"]);
        buf.replace_line(0, "uno");
        buf.delete_line(1);
        buf.insert_empty_line(0);
        let edited = text(&buf);
        while buf.undo_step(-1) {}
        assert_eq!(text(&buf), vec!["one", "two"]);
        while buf.undo_step(1) {}
        assert_eq!(text(&buf), edited);
    }

    #[test]
    fn undo_past_the_start_is_a_no_op() {
        let mut buf = TextBuffer::from_lines("t", ["a"]);
        buf.replace_line(0, "b");
        buf.replace_line(0, "c");
        assert!(!buf.undo_step(-5));
        assert_eq!(text(&buf), vec!["c"]);
        assert_eq!(buf.undo_position(), 2);
        assert!(!buf.undo_step(3));
        assert_eq!(buf.undo_position(), 2);
        assert!(buf.undo_step(-2));
        assert_eq!(text(&buf), vec!["a"]);
    }

    #[test]
    fn group_records_a_single_step() {
        let mut buf = TextBuffer::from_lines("t", ["ab"]);
        buf.begin_group();
        buf.insert_empty_line(1);
        buf.replace_line(0, "a");
        buf.replace_line(1, "b");
        buf.end_group();
        assert_eq!(text(&buf), vec!["a", "b"]);
        assert!(buf.undo_step(-1));
        assert_eq!(text(&buf), vec!["ab"]);
        assert!(!buf.undo_step(-1));
    }

    #[test]
    fn save_writes_each_file_and_clears_flags() {
        let (dir, mut buf) = two_files();
        buf.replace_line(2, "B1");
        buf.insert_empty_line(3);
        buf.save().unwrap();
        assert!(!buf.is_dirty());
        assert_eq!(std::fs::read_to_string(dir.path().join("a.txt")).unwrap(), "a1\na2\n");
        assert_eq!(std::fs::read_to_string(dir.path().join("b.txt")).unwrap(), "B1\n\n");
    }

    #[test]
    fn failed_save_keeps_going_and_stays_dirty() {
        let dir = tempfile::tempdir().unwrap();
        let bad = dir.path().join("no-such-dir").join("x.txt");
        let good = dir.path().join("good.txt");
        let mut buf = TextBuffer::open(&[bad.clone(), good.clone()]);
        buf.insert_empty_line(0);
        buf.replace_line(0, "kept");
        let err = buf.save().unwrap_err();
        let BufferError::Save { total, failed } = err;
        assert_eq!(total, 2);
        assert_eq!(failed.len(), 1);
        assert_eq!(failed[0].path, bad);
        assert_eq!(std::fs::read_to_string(&good).unwrap(), "kept\n");
        assert!(buf.is_dirty());
        assert!(buf.is_new_file());
    }
}
