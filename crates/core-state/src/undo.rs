use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use tracing::trace;

/// A buffer line. Snapshots share lines with the live buffer, so a
/// checkpoint copies pointers, never text.
pub type Line = Arc<str>;

/// Full buffer state captured for undo.
#[derive(Clone, Debug)]
pub struct Snapshot {
    pub lines: Vec<Line>,
    /// Line count of each source file, in file order.
    pub file_lines: Vec<usize>,
    hash: u64,
}

impl Snapshot {
    fn same_content(&self, lines: &[Line], file_lines: &[usize], hash: u64) -> bool {
        self.hash == hash
            && self.file_lines == file_lines
            && self.lines.len() == lines.len()
            && self
                .lines
                .iter()
                .zip(lines)
                .all(|(a, b)| Arc::ptr_eq(a, b) || a == b)
    }
}

/// Linear snapshot history with a movable position.
///
/// Snapshots are only ever appended. Undo and redo move `position` through
/// the list; the entry at `position` is the state the live buffer was last
/// synchronised with. A checkpoint appends the live state when it differs
/// from that entry, so states abandoned by undoing and then editing remain
/// reachable further down the list.
#[derive(Debug, Default)]
pub struct UndoHistory {
    snapshots: Vec<Snapshot>,
    position: usize,
    skipped: u64,
}

impl UndoHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn position(&self) -> usize {
        self.position
    }

    /// Count of checkpoints that found nothing new to record.
    pub fn snapshots_skipped(&self) -> u64 {
        self.skipped
    }

    pub fn clear(&mut self) {
        self.snapshots.clear();
        self.position = 0;
    }

    /// Record the live state unless it equals the snapshot at the current
    /// position. Returns true when a snapshot was appended.
    pub fn checkpoint(&mut self, lines: &[Line], file_lines: &[usize]) -> bool {
        let hash = content_hash(lines, file_lines);
        if let Some(current) = self.snapshots.get(self.position)
            && current.same_content(lines, file_lines, hash)
        {
            self.skipped += 1;
            trace!(target: "state.undo", position = self.position, len = self.snapshots.len(), hash, "snapshot_dedupe_skip");
            return false;
        }
        self.snapshots.push(Snapshot {
            lines: lines.to_vec(),
            file_lines: file_lines.to_vec(),
            hash,
        });
        self.position = self.snapshots.len() - 1;
        trace!(target: "state.undo", position = self.position, lines = lines.len(), hash, "push_snapshot");
        true
    }

    /// Move the position by `direction` (negative = undo). Returns the
    /// snapshot to restore, or `None` without moving when the target lies
    /// outside the history.
    pub fn step(&mut self, direction: isize) -> Option<&Snapshot> {
        if direction == 0 {
            return None;
        }
        let target = self
            .position
            .checked_add_signed(direction)
            .filter(|&t| t < self.snapshots.len());
        let Some(target) = target else {
            trace!(target: "state.undo", position = self.position, direction, "undo_step_out_of_range");
            return None;
        };
        self.position = target;
        trace!(target: "state.undo", position = target, direction, "undo_step");
        self.snapshots.get(target)
    }
}

fn content_hash(lines: &[Line], file_lines: &[usize]) -> u64 {
    let mut h = DefaultHasher::new();
    file_lines.hash(&mut h);
    for line in lines {
        line.hash(&mut h);
    }
    h.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(items: &[&str]) -> Vec<Line> {
        items.iter().map(|s| Line::from(*s)).collect()
    }

    #[test]
    fn identical_state_is_not_pushed_twice() {
        let mut h = UndoHistory::new();
        let a = lines(&["a"]);
        assert!(h.checkpoint(&a, &[1]));
        assert!(!h.checkpoint(&a, &[1]));
        assert_eq!(h.len(), 1);
        assert_eq!(h.snapshots_skipped(), 1);
    }

    #[test]
    fn out_of_range_step_stays_put() {
        let mut h = UndoHistory::new();
        h.checkpoint(&lines(&["a"]), &[1]);
        h.checkpoint(&lines(&["b"]), &[1]);
        h.checkpoint(&lines(&["c"]), &[1]);
        assert_eq!(h.position(), 2);
        assert_eq!(&*h.step(-1).unwrap().lines[0], "b");
        assert!(h.step(-5).is_none());
        assert_eq!(h.position(), 1);
        assert_eq!(&*h.step(-1).unwrap().lines[0], "a");
        assert!(h.step(-1).is_none());
        assert!(h.step(9).is_none());
        assert_eq!(h.position(), 0);
        assert_eq!(&*h.step(2).unwrap().lines[0], "c");
        assert!(h.step(1).is_none());
        assert_eq!(h.position(), 2);
    }

    #[test]
    fn checkpoint_after_rewind_appends_at_end() {
        let mut h = UndoHistory::new();
        h.checkpoint(&lines(&["a"]), &[1]);
        h.checkpoint(&lines(&["b"]), &[1]);
        h.step(-1);
        assert!(h.checkpoint(&lines(&["x"]), &[1]));
        assert_eq!(h.len(), 3);
        assert_eq!(h.position(), 2);
    }

    #[test]
    fn file_counts_take_part_in_equality() {
        let mut h = UndoHistory::new();
        let a = lines(&["a", "b"]);
        h.checkpoint(&a, &[2, 0]);
        assert!(h.checkpoint(&a, &[1, 1]));
    }
}
