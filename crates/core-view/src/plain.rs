//! The full-buffer editing view.

use std::sync::Arc;

use core_render::{Frame, Role};
use core_state::{EditorState, Mode};
use core_text::WordClass;

use crate::furniture::{self, headline, highlighted_text, lnum_col, numbered_rows, ruler};
use crate::{Outcome, VariantTable, ViewSettings, ViewStrategy, Window};

#[derive(Debug, Clone)]
pub struct PlainView {
    window: Window,
    variants: Arc<VariantTable>,
}

impl PlainView {
    pub fn new(settings: &ViewSettings) -> Self {
        Self {
            window: Window::new(settings),
            variants: Arc::clone(&settings.variants),
        }
    }
}

impl ViewStrategy for PlainView {
    fn mode(&self) -> Mode {
        Mode::Plain
    }

    fn window(&self) -> &Window {
        &self.window
    }

    fn window_mut(&mut self) -> &mut Window {
        &mut self.window
    }

    fn render(&self, state: &EditorState, frame: &mut Frame) {
        let w = &self.window;
        let number_width = lnum_col(w.offset).max(lnum_col(w.offset + w.height - 1));
        let avail = usize::try_from(w.width).unwrap_or(0).saturating_sub(number_width + 2);
        let keywords = state.keywords.as_slice();

        headline(frame, state, w);
        ruler(frame, number_width + 2, w.column, w.width);
        numbered_rows(frame, state, w, Role::LineNr, true, |row, text, cursor| {
            highlighted_text(row, text, keywords, cursor, avail);
        });
        furniture::keyword_rows(frame, keywords);
        furniture::rot13_row(frame, state, w);
    }

    fn current_line(&self, _state: &EditorState) -> isize {
        self.window.current_line()
    }

    fn set_current_line(&mut self, _state: &EditorState, line: isize) {
        self.window.row = line - self.window.offset;
        self.window.follow_cursor();
    }

    fn restore_position(&mut self, _state: &EditorState, line: isize, row: isize) {
        self.window.offset = line - row;
        self.window.row = row;
        self.window.follow_cursor();
    }

    fn cursor_move_row_rel(&mut self, _state: &EditorState, delta: isize) -> Outcome {
        self.window.row_rel(delta)
    }
    fn cursor_move_word_next(&mut self, state: &EditorState, class: WordClass) -> Outcome {
        self.window.word_next(state, class)
    }
    fn cursor_move_word_prev(&mut self, state: &EditorState, class: WordClass) -> Outcome {
        self.window.word_prev(state, class)
    }

    line_editing_ops!();
}
