//! View strategies: the lenses through which the buffer is displayed and
//! edited.
//!
//! Every strategy implements [`ViewStrategy`]. The trait lists the full
//! editing vocabulary (motions, line edits, character edits, keyword
//! commands) and gives every operation a default implementation that does
//! nothing and reports [`Outcome::Unsupported`]. A strategy opts in to each
//! capability explicitly, so what a filtered view refuses is visible in its
//! impl block rather than hidden behind inheritance.
//!
//! Strategies never own the buffer. Each call receives the
//! [`EditorState`](core_state::EditorState) by reference, and a strategy can
//! be rebuilt at any time from the buffer plus a target line and cursor row;
//! the mode controller relies on this when switching modes.
//!
//! Shared cursor state and the line-editing primitives live in [`Window`].
//! `PlainView` and `TableView` forward to them; the filtered views
//! (`ParagraphView`, `IncrementalSearchView`, `BlockView`) reinterpret the
//! cursor row as an index into their filtered row set.

/// Trait methods shared by the line-oriented views, forwarded to the
/// view's `window` field. Row-relative and word motions are left to each
/// view.
macro_rules! line_editing_ops {
    () => {
        fn page_down(&mut self, _state: &EditorState) -> Outcome {
            self.window.page_down()
        }
        fn page_up(&mut self, _state: &EditorState) -> Outcome {
            self.window.page_up()
        }
        fn window_top(&mut self, _state: &EditorState) -> Outcome {
            self.window.window_top()
        }
        fn window_bottom(&mut self, state: &EditorState) -> Outcome {
            self.window.window_bottom(state)
        }
        fn window_centre_cursor(&mut self, _state: &EditorState) -> Outcome {
            self.window.centre_cursor()
        }
        fn resize_window(&mut self, delta: isize) -> Outcome {
            self.window.resize(delta)
        }

        fn cursor_move_row_abs(&mut self, _state: &EditorState, row: isize) -> Outcome {
            self.window.row_abs(row)
        }
        fn cursor_move_row_end(&mut self, _state: &EditorState) -> Outcome {
            self.window.row_end()
        }
        fn cursor_move_char_abs(&mut self, state: &EditorState, column: usize) -> Outcome {
            self.window.char_abs(state, column)
        }
        fn cursor_move_char_rel(&mut self, state: &EditorState, delta: isize) -> Outcome {
            self.window.char_rel(state, delta)
        }
        fn cursor_move_char_end(&mut self, state: &EditorState) -> Outcome {
            self.window.char_end(state)
        }
        fn cursor_move_para_next(&mut self, state: &EditorState) -> Outcome {
            self.window.para_next(state)
        }
        fn cursor_move_para_prev(&mut self, state: &EditorState) -> Outcome {
            self.window.para_prev(state)
        }

        fn keyword_search_next(&mut self, state: &EditorState) -> Outcome {
            self.window.keyword_search_next(state)
        }
        // Accepted but has no effect.
        fn keyword_search_prev(&mut self, _state: &EditorState) -> Outcome {
            Outcome::Applied
        }
        fn keyword_toggle(&mut self, state: &mut EditorState) -> Outcome {
            self.window.keyword_toggle(state)
        }

        fn indent(&mut self, state: &mut EditorState) -> Outcome {
            self.window.indent(state)
        }
        fn exdent(&mut self, state: &mut EditorState) -> Outcome {
            self.window.exdent(state)
        }
        fn join(&mut self, state: &mut EditorState) -> Outcome {
            self.window.join(state)
        }
        fn duplicate_line(&mut self, state: &mut EditorState) -> Outcome {
            self.window.duplicate_line(state)
        }
        fn transpose_lines(&mut self, state: &mut EditorState) -> Outcome {
            self.window.transpose_lines(state)
        }
        fn transpose_lines_up(&mut self, state: &mut EditorState) -> Outcome {
            self.window.transpose_lines_up(state)
        }
        fn transpose_chars(&mut self, state: &mut EditorState) -> Outcome {
            self.window.transpose_chars(state)
        }
        fn new_line(&mut self, state: &mut EditorState) -> Outcome {
            self.window.new_line(state)
        }
        fn insert_new_line(&mut self, state: &mut EditorState, follow: bool) -> Outcome {
            self.window.insert_new_line(state, follow)
        }
        fn char_insert(&mut self, state: &mut EditorState, c: char) -> Outcome {
            self.window.char_insert(state, c)
        }
        fn char_delete_forward(&mut self, state: &mut EditorState) -> Outcome {
            self.window.char_delete_forward(state)
        }
        fn char_delete_backward(&mut self, state: &mut EditorState) -> Outcome {
            self.window.char_delete_backward(state)
        }
        fn char_delete_to_eol(&mut self, state: &mut EditorState) -> Outcome {
            self.window.char_delete_to_eol(state)
        }
        fn char_delete_to_bol(&mut self, state: &mut EditorState) -> Outcome {
            self.window.char_delete_to_bol(state)
        }
        fn char_rotate_variant(&mut self, state: &mut EditorState) -> Outcome {
            self.window.char_rotate_variant(state, &self.variants)
        }
    };
}

mod block;
mod filter;
mod furniture;
mod isearch;
mod paragraph;
mod plain;
mod table;
pub mod variants;
mod window;

use std::sync::Arc;

use core_render::Frame;
use core_state::{EditorState, Mode};
use core_text::WordClass;

pub use block::BlockView;
pub use isearch::IncrementalSearchView;
pub use paragraph::{ParagraphView, is_paragraph_anchor};
pub use plain::PlainView;
pub use table::TableView;
pub use variants::VariantTable;
pub use window::Window;

/// Whether a strategy implements an operation. Unsupported operations have
/// no effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Applied,
    Unsupported,
}

impl Outcome {
    pub fn is_applied(self) -> bool {
        self == Outcome::Applied
    }
}

/// Geometry and tunables handed to every strategy at construction.
#[derive(Debug, Clone)]
pub struct ViewSettings {
    pub width: usize,
    /// Rows available to buffer lines.
    pub height: usize,
    pub table_cell_width: usize,
    /// Byte bound of the incremental search pattern.
    pub search_pattern_max: usize,
    pub variants: Arc<VariantTable>,
}

impl Default for ViewSettings {
    fn default() -> Self {
        Self {
            width: 80,
            height: 18,
            table_cell_width: 16,
            search_pattern_max: 80,
            variants: Arc::new(VariantTable::default()),
        }
    }
}

impl ViewSettings {
    /// Settings for a terminal of `columns` x `rows` with `reserved` rows
    /// kept for furniture.
    pub fn for_terminal(columns: u16, rows: u16, reserved: u16) -> Self {
        Self {
            width: usize::from(columns),
            height: usize::from(rows.saturating_sub(reserved).max(1)),
            ..Self::default()
        }
    }
}

/// Construct a fresh strategy for `mode`.
pub fn build_view(mode: Mode, settings: &ViewSettings) -> Box<dyn ViewStrategy> {
    match mode {
        Mode::Plain => Box::new(PlainView::new(settings)),
        Mode::Table => Box::new(TableView::new(settings)),
        Mode::Paragraph => Box::new(ParagraphView::new(settings)),
        Mode::IncrementalSearch => Box::new(IncrementalSearchView::new(settings)),
        Mode::Block => Box::new(BlockView::new(settings)),
    }
}

/// A presentation strategy over the shared buffer.
///
/// Row and line values are signed: the window may be scrolled above line 0,
/// and operations on lines outside the buffer are silent no-ops.
pub trait ViewStrategy {
    fn mode(&self) -> Mode;
    fn window(&self) -> &Window;
    fn window_mut(&mut self) -> &mut Window;
    fn render(&self, state: &EditorState, frame: &mut Frame);

    /// Absolute buffer line of the logical cursor.
    fn current_line(&self, state: &EditorState) -> isize;
    /// Reposition so the logical cursor lands on `line`.
    fn set_current_line(&mut self, state: &EditorState, line: isize);

    /// Reposition after a mode switch, keeping the cursor on the same
    /// screen row where the strategy can.
    fn restore_position(&mut self, state: &EditorState, line: isize, _row: isize) {
        self.set_current_line(state, line);
    }

    /// Called when a previewed mode is committed.
    fn commit(&mut self, _state: &mut EditorState) -> Outcome {
        Outcome::Applied
    }

    fn page_down(&mut self, _state: &EditorState) -> Outcome {
        Outcome::Unsupported
    }
    fn page_up(&mut self, _state: &EditorState) -> Outcome {
        Outcome::Unsupported
    }
    fn window_top(&mut self, _state: &EditorState) -> Outcome {
        Outcome::Unsupported
    }
    fn window_bottom(&mut self, _state: &EditorState) -> Outcome {
        Outcome::Unsupported
    }
    fn window_centre_cursor(&mut self, _state: &EditorState) -> Outcome {
        Outcome::Unsupported
    }
    /// Grow (positive) or shrink (negative) the number of text rows.
    fn resize_window(&mut self, _delta: isize) -> Outcome {
        Outcome::Unsupported
    }

    fn cursor_move_row_abs(&mut self, _state: &EditorState, _row: isize) -> Outcome {
        Outcome::Unsupported
    }
    fn cursor_move_row_rel(&mut self, _state: &EditorState, _delta: isize) -> Outcome {
        Outcome::Unsupported
    }
    fn cursor_move_row_end(&mut self, _state: &EditorState) -> Outcome {
        Outcome::Unsupported
    }
    fn cursor_move_char_abs(&mut self, _state: &EditorState, _column: usize) -> Outcome {
        Outcome::Unsupported
    }
    fn cursor_move_char_rel(&mut self, _state: &EditorState, _delta: isize) -> Outcome {
        Outcome::Unsupported
    }
    fn cursor_move_char_end(&mut self, _state: &EditorState) -> Outcome {
        Outcome::Unsupported
    }
    fn cursor_move_word_next(&mut self, _state: &EditorState, _class: WordClass) -> Outcome {
        Outcome::Unsupported
    }
    fn cursor_move_word_prev(&mut self, _state: &EditorState, _class: WordClass) -> Outcome {
        Outcome::Unsupported
    }
    fn cursor_move_para_next(&mut self, _state: &EditorState) -> Outcome {
        Outcome::Unsupported
    }
    fn cursor_move_para_prev(&mut self, _state: &EditorState) -> Outcome {
        Outcome::Unsupported
    }

    fn keyword_search_next(&mut self, _state: &EditorState) -> Outcome {
        Outcome::Unsupported
    }
    fn keyword_search_prev(&mut self, _state: &EditorState) -> Outcome {
        Outcome::Unsupported
    }
    fn keyword_toggle(&mut self, _state: &mut EditorState) -> Outcome {
        Outcome::Unsupported
    }

    fn indent(&mut self, _state: &mut EditorState) -> Outcome {
        Outcome::Unsupported
    }
    fn exdent(&mut self, _state: &mut EditorState) -> Outcome {
        Outcome::Unsupported
    }
    fn join(&mut self, _state: &mut EditorState) -> Outcome {
        Outcome::Unsupported
    }
    fn duplicate_line(&mut self, _state: &mut EditorState) -> Outcome {
        Outcome::Unsupported
    }
    fn transpose_lines(&mut self, _state: &mut EditorState) -> Outcome {
        Outcome::Unsupported
    }
    /// Swap the cursor line with the one above it; the cursor follows.
    fn transpose_lines_up(&mut self, _state: &mut EditorState) -> Outcome {
        Outcome::Unsupported
    }
    fn transpose_chars(&mut self, _state: &mut EditorState) -> Outcome {
        Outcome::Unsupported
    }
    fn new_line(&mut self, _state: &mut EditorState) -> Outcome {
        Outcome::Unsupported
    }
    /// Split the line at the cursor; with `follow` the cursor moves to the
    /// start of the new lower line.
    fn insert_new_line(&mut self, _state: &mut EditorState, _follow: bool) -> Outcome {
        Outcome::Unsupported
    }
    fn char_insert(&mut self, _state: &mut EditorState, _c: char) -> Outcome {
        Outcome::Unsupported
    }
    fn char_delete_forward(&mut self, _state: &mut EditorState) -> Outcome {
        Outcome::Unsupported
    }
    fn char_delete_backward(&mut self, _state: &mut EditorState) -> Outcome {
        Outcome::Unsupported
    }
    fn char_delete_to_eol(&mut self, _state: &mut EditorState) -> Outcome {
        Outcome::Unsupported
    }
    fn char_delete_to_bol(&mut self, _state: &mut EditorState) -> Outcome {
        Outcome::Unsupported
    }
    fn char_rotate_variant(&mut self, _state: &mut EditorState) -> Outcome {
        Outcome::Unsupported
    }
}
