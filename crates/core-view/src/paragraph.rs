//! One row per paragraph: only lines that start a paragraph are shown.

use core_render::{Frame, Role};
use core_state::{EditorState, Mode};

use crate::filter::{self, Keep};
use crate::furniture::mode_line;
use crate::{Outcome, ViewSettings, ViewStrategy, Window};

/// Line `i` starts a paragraph when it is the first line, or when it is
/// non-empty and follows an empty line. Lines holding only spaces are not
/// empty.
pub fn is_paragraph_anchor(state: &EditorState, i: usize) -> bool {
    let lines = state.buffer.lines();
    match i {
        0 => !lines.is_empty(),
        _ => lines.get(i).is_some_and(|l| !l.is_empty()) && lines[i - 1].is_empty(),
    }
}

#[derive(Debug, Clone)]
pub struct ParagraphView {
    window: Window,
}

impl ParagraphView {
    pub fn new(settings: &ViewSettings) -> Self {
        Self {
            window: Window::new(settings),
        }
    }
}

fn anchors(state: &EditorState) -> impl Fn(usize) -> bool + '_ {
    move |i| is_paragraph_anchor(state, i)
}

impl ViewStrategy for ParagraphView {
    fn mode(&self) -> Mode {
        Mode::Paragraph
    }

    fn window(&self) -> &Window {
        &self.window
    }

    fn window_mut(&mut self) -> &mut Window {
        &mut self.window
    }

    fn render(&self, state: &EditorState, frame: &mut Frame) {
        mode_line(frame, state, self.current_line(state), Mode::Paragraph.as_str());
        let keep = anchors(state);
        filter::filtered_rows(frame, state, &self.window, &keep, |row, _, text, cursor| {
            let text = format!("{text} ...");
            if cursor {
                row.styled(Role::GreyBg, text);
            } else {
                row.text(text);
            }
        });
    }

    fn current_line(&self, state: &EditorState) -> isize {
        filter::current_line(&self.window, state, &anchors(state))
    }

    /// Show the paragraph containing `line` on the first row.
    fn set_current_line(&mut self, state: &EditorState, line: isize) {
        let last = state.buffer.line_count().saturating_sub(1);
        let line = usize::try_from(line).unwrap_or(0).min(last);
        let anchor = (0..=line)
            .rev()
            .find(|&i| is_paragraph_anchor(state, i))
            .unwrap_or(0);
        self.window.offset = anchor as isize;
        self.window.row = 0;
    }

    fn cursor_move_row_abs(&mut self, state: &EditorState, row: isize) -> Outcome {
        filter::row_abs(&mut self.window, state, row, &anchors(state));
        Outcome::Applied
    }

    fn cursor_move_row_rel(&mut self, state: &EditorState, delta: isize) -> Outcome {
        filter::row_rel(&mut self.window, state, delta, &anchors(state));
        Outcome::Applied
    }

    fn cursor_move_row_end(&mut self, state: &EditorState) -> Outcome {
        let last = self.window.height - 1;
        self.cursor_move_row_abs(state, last)
    }

    fn cursor_move_para_next(&mut self, state: &EditorState) -> Outcome {
        self.cursor_move_row_rel(state, 1)
    }

    fn cursor_move_para_prev(&mut self, state: &EditorState) -> Outcome {
        self.cursor_move_row_rel(state, -1)
    }

    /// Swap the paragraph under the cursor with the next one. The last
    /// paragraph has no trailing separator, so an empty line is borrowed
    /// while rotating and dropped again afterwards.
    fn transpose_lines(&mut self, state: &mut EditorState) -> Outcome {
        let Ok(row) = usize::try_from(self.window.row) else {
            return Outcome::Applied;
        };
        let found: Vec<usize> = {
            let keep = anchors(state);
            let keep: Keep<'_> = &keep;
            filter::matching(state, self.window.offset, keep)
                .skip(row)
                .take(3)
                .collect()
        };
        let (n0, n1) = match found[..] {
            [n0, n1, ..] => (n0, n1),
            _ => return Outcome::Applied,
        };
        let distance = (n1 - n0) as isize;
        match found.get(2) {
            Some(&n2) => {
                state.buffer.rotate_lines(n0, n2 - n0, distance);
            }
            None => {
                let end = state.buffer.line_count();
                state.buffer.insert_empty_line(end);
                state.buffer.rotate_lines(n0, end + 1 - n0, distance);
                state.buffer.delete_line(end);
            }
        }
        Outcome::Applied
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_state::TextBuffer;
    use pretty_assertions::assert_eq;

    fn state(lines: &[&str]) -> EditorState {
        EditorState::new(TextBuffer::from_lines("p.txt", lines.iter().copied()))
    }

    #[test]
    fn anchors_ignore_blank_separators() {
        let st = state(&["a", "b", "", "c", "  ", "d"]);
        let found: Vec<usize> = (0..6).filter(|&i| is_paragraph_anchor(&st, i)).collect();
        assert_eq!(found, vec![0, 3]);
    }

    #[test]
    fn render_shows_one_row_per_paragraph() {
        let st = state(&["a", "b", "", "c", "", "d"]);
        let view = ParagraphView::new(&ViewSettings::default());
        let mut frame = Frame::new();
        view.render(&st, &mut frame);
        assert_eq!(
            frame.plain_lines(),
            vec!["== p.txt [par] ==", "0: a ...", "3: c ...", "5: d ..."]
        );
    }

    #[test]
    fn set_current_line_snaps_to_anchor() {
        let st = state(&["a", "b", "", "c", "x", "", "d"]);
        let mut view = ParagraphView::new(&ViewSettings::default());
        view.set_current_line(&st, 4);
        assert_eq!(view.current_line(&st), 3);
        view.set_current_line(&st, 99);
        assert_eq!(view.current_line(&st), 6);
    }

    #[test]
    fn transpose_swaps_with_next_paragraph() {
        let mut st = state(&["a", "", "b1", "b2", "", "c"]);
        let mut view = ParagraphView::new(&ViewSettings::default());
        view.transpose_lines(&mut st);
        let lines: Vec<&str> = st.buffer.lines().iter().map(|l| &**l).collect();
        assert_eq!(lines, vec!["b1", "b2", "", "a", "", "c"]);
    }

    #[test]
    fn transpose_last_two_paragraphs() {
        let mut st = state(&["a", "", "b"]);
        let mut view = ParagraphView::new(&ViewSettings::default());
        view.transpose_lines(&mut st);
        let lines: Vec<&str> = st.buffer.lines().iter().map(|l| &**l).collect();
        assert_eq!(lines, vec!["b", "", "a"]);
    }

    /// Trailing blank lines travel with the last paragraph: they end up
    /// between the swapped paragraphs, and no line is lost.
    #[test]
    fn transpose_last_paragraph_with_trailing_blank() {
        let mut st = state(&["a", "", "b", ""]);
        let mut view = ParagraphView::new(&ViewSettings::default());
        view.transpose_lines(&mut st);
        let lines: Vec<&str> = st.buffer.lines().iter().map(|l| &**l).collect();
        assert_eq!(lines, vec!["b", "", "", "a"]);
        assert_eq!(st.buffer.line_count(), 4);
    }

    #[test]
    fn editing_is_unsupported() {
        let mut st = state(&["a"]);
        let mut view = ParagraphView::new(&ViewSettings::default());
        assert_eq!(view.char_insert(&mut st, 'x'), Outcome::Unsupported);
        assert_eq!(view.join(&mut st), Outcome::Unsupported);
        assert_eq!(st.buffer.lines().len(), 1);
    }
}
