//! Editor state: the multi-file line buffer, its undo history, the keyword
//! set and the presentation mode.
//!
//! The buffer owns its lines exclusively; views and the mode controller only
//! ever borrow it. Undo works on whole-buffer snapshots whose lines are
//! shared (`Arc<str>`) with the live buffer, so checkpointing costs one
//! pointer copy per line.

pub mod buffer;
pub mod io;
pub mod keywords;
pub mod mode;
pub mod undo;

pub use buffer::{BufferError, SaveFailure, TextBuffer};
pub use keywords::KeywordSet;
pub use mode::Mode;
pub use undo::{Line, Snapshot, UndoHistory};

/// Everything a view reads or edits: the buffer and the keywords.
#[derive(Debug, Default)]
pub struct EditorState {
    pub buffer: TextBuffer,
    pub keywords: KeywordSet,
}

impl EditorState {
    pub fn new(buffer: TextBuffer) -> Self {
        Self {
            buffer,
            keywords: KeywordSet::new(),
        }
    }
}
