//! Indentation filter: only lines indented at most as deep as the cursor
//! column are shown, so the column acts as a folding threshold.

use core_render::{Frame, Role};
use core_state::{EditorState, Mode};
use core_text::{Str, block_indent};

use crate::filter;
use crate::furniture::{lnum_col, mode_line, ruler};
use crate::{Outcome, ViewSettings, ViewStrategy, Window};

#[derive(Debug, Clone)]
pub struct BlockView {
    window: Window,
}

impl BlockView {
    pub fn new(settings: &ViewSettings) -> Self {
        Self {
            window: Window::new(settings),
        }
    }

    pub fn threshold(&self) -> usize {
        self.window.column
    }

    fn set_threshold(&mut self, state: &EditorState, column: usize) -> Outcome {
        self.window.column = column;
        self.cursor_move_row_rel(state, 0)
    }
}

fn within(state: &EditorState, threshold: usize) -> impl Fn(usize) -> bool + '_ {
    move |i| {
        state
            .buffer
            .get_line(i)
            .is_some_and(|l| block_indent(l) <= threshold)
    }
}

impl ViewStrategy for BlockView {
    fn mode(&self) -> Mode {
        Mode::Block
    }

    fn window(&self) -> &Window {
        &self.window
    }

    fn window_mut(&mut self) -> &mut Window {
        &mut self.window
    }

    fn render(&self, state: &EditorState, frame: &mut Frame) {
        let column = self.threshold();
        mode_line(frame, state, self.current_line(state), Mode::Block.as_str());
        let padding = lnum_col(state.buffer.line_count() as isize) + 2;
        ruler(frame, padding, column, self.window.width);
        let keep = within(state, column);
        filter::filtered_rows(frame, state, &self.window, &keep, |row, _, text, cursor| {
            let s = Str::new(text);
            match s.byte_range(column..column + 1).filter(|_| cursor) {
                Some(at) => {
                    row.text(&text[..at.start])
                        .styled(Role::GreyBg, &text[at.clone()])
                        .text(&text[at.end..]);
                }
                None => {
                    row.text(text);
                }
            }
        });
    }

    fn current_line(&self, state: &EditorState) -> isize {
        filter::current_line(&self.window, state, &within(state, self.threshold()))
    }

    /// Show `line` on the first row with the threshold at its indentation.
    fn set_current_line(&mut self, state: &EditorState, line: isize) {
        self.window.offset = line.max(0);
        self.window.row = 0;
        if let Some(text) = usize::try_from(line).ok().and_then(|n| state.buffer.get_line(n)) {
            self.window.column = block_indent(text);
        }
    }

    fn cursor_move_row_abs(&mut self, state: &EditorState, row: isize) -> Outcome {
        let keep = within(state, self.threshold());
        filter::row_abs(&mut self.window, state, row, &keep);
        Outcome::Applied
    }

    fn cursor_move_row_rel(&mut self, state: &EditorState, delta: isize) -> Outcome {
        let keep = within(state, self.threshold());
        filter::row_rel(&mut self.window, state, delta, &keep);
        Outcome::Applied
    }

    fn cursor_move_row_end(&mut self, state: &EditorState) -> Outcome {
        let last = self.window.height - 1;
        self.cursor_move_row_abs(state, last)
    }

    fn cursor_move_char_abs(&mut self, state: &EditorState, column: usize) -> Outcome {
        self.set_threshold(state, column)
    }

    fn cursor_move_char_rel(&mut self, state: &EditorState, delta: isize) -> Outcome {
        let column = self.window.column.saturating_add_signed(delta);
        self.set_threshold(state, column)
    }
}
