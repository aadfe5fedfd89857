//! Colon-separated lines drawn as fixed-width cells.

use std::sync::Arc;

use core_render::{Frame, Role, Row};
use core_state::{EditorState, Mode};
use core_text::WordClass;

use crate::furniture::{self, file_flag, file_label, keyword_marks, numbered_rows};
use crate::{Outcome, VariantTable, ViewSettings, ViewStrategy, Window};

#[derive(Debug, Clone)]
pub struct TableView {
    window: Window,
    variants: Arc<VariantTable>,
    cell_width: usize,
}

impl TableView {
    pub fn new(settings: &ViewSettings) -> Self {
        Self {
            window: Window::new(settings),
            variants: Arc::clone(&settings.variants),
            cell_width: settings.table_cell_width.max(2),
        }
    }

    fn current_chars(&self, state: &EditorState) -> Option<Vec<char>> {
        let line = usize::try_from(self.window.current_line()).ok()?;
        state.buffer.get_line(line).map(|l| l.chars().collect())
    }
}

/// Draw `text` as cells. Each `:` becomes a bar at the next cell boundary;
/// a cell too long for its width is cut with `>`, or shows the cursor
/// character in that spot when the cursor is hidden in the cut part.
fn cells(row: &mut Row, text: &str, keywords: &[String], cursor: Option<usize>, width: usize) {
    let chars: Vec<char> = text.chars().collect();
    let marks = keyword_marks(text, keywords);
    let mut buf = [0u8; 4];
    let mut cell_col = 0;

    for (i, &c) in chars.iter().enumerate() {
        if c == ':' {
            row.text(" ".repeat(width.saturating_sub(cell_col)));
            if cursor == Some(i) {
                row.styled(Role::GreyBg, ":");
            } else {
                row.styled(Role::TableBar, "|");
            }
            cell_col = 1;
            continue;
        }
        if cell_col == width - 1 && chars.get(i + 1) != Some(&':') {
            let cell_end = chars[i..]
                .iter()
                .position(|&c| c == ':')
                .map_or(chars.len(), |p| i + p);
            match cursor.filter(|k| (i..cell_end).contains(k)) {
                Some(k) => row.styled(Role::GreyBg, &*chars[k].encode_utf8(&mut buf)),
                None => row.styled(Role::Cyan, ">"),
            };
            cell_col += 1;
        }
        if cell_col >= width {
            continue;
        }
        let s = &*c.encode_utf8(&mut buf);
        if cursor == Some(i) {
            row.styled(Role::GreyBg, s);
        } else if marks.get(i).copied().unwrap_or(false) {
            row.styled(Role::Red, s);
        } else {
            row.text(s);
        }
        cell_col += 1;
    }

    let end = if cursor == Some(chars.len()) { Role::GreyBg } else { Role::Grey };
    row.styled(end, "$");
}

/// Full text of the cell under the cursor.
fn cell_under_cursor(row: &mut Row, text: &str, column: usize) {
    let chars: Vec<char> = text.chars().collect();
    let column = column.min(chars.len());
    let start = chars[..column]
        .iter()
        .rposition(|&c| c == ':')
        .map_or(0, |p| p + 1);
    let mut buf = [0u8; 4];
    for (j, &c) in chars.iter().enumerate().skip(start) {
        if c == ':' {
            break;
        }
        let s = &*c.encode_utf8(&mut buf);
        if j == column {
            row.styled(Role::GreyBg, s);
        } else {
            row.text(s);
        }
    }
    if chars.get(column) == Some(&':') {
        row.styled(Role::GreyBg, ":");
    }
    if column == chars.len() {
        row.styled(Role::GreyBg, "$");
    }
}

impl ViewStrategy for TableView {
    fn mode(&self) -> Mode {
        Mode::Table
    }

    fn window(&self) -> &Window {
        &self.window
    }

    fn window_mut(&mut self) -> &mut Window {
        &mut self.window
    }

    fn render(&self, state: &EditorState, frame: &mut Frame) {
        let w = &self.window;
        let keywords = state.keywords.as_slice();
        let headline = format!(
            "== {}{} [{}:{}] ==",
            file_label(state, w.current_line()),
            file_flag(state),
            w.offset,
            w.offset + w.height
        );
        frame.row().styled(Role::GreyBg, headline);

        let cursor_text = usize::try_from(w.current_line())
            .ok()
            .and_then(|n| state.buffer.get_line(n));
        let row = frame.row();
        if let Some(text) = cursor_text {
            cell_under_cursor(row, text, w.column);
        }

        numbered_rows(frame, state, w, Role::Grey, false, |row, text, cursor| {
            cells(row, text, keywords, cursor, self.cell_width);
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

    /// Move rows keeping the cursor in the same cell: the column lands just
    /// after the same-numbered `:` on the new line, or at 0.
    fn cursor_move_row_rel(&mut self, state: &EditorState, delta: isize) -> Outcome {
        let colons = self.current_chars(state).map(|chars| {
            chars
                .iter()
                .take(self.window.column + 1)
                .filter(|&&c| c == ':')
                .count()
        });
        self.window.row += delta;
        self.window.column = 0;
        self.window.follow_cursor();

        let (Some(colons), Some(chars)) = (colons, self.current_chars(state)) else {
            return Outcome::Applied;
        };
        if colons > 0
            && let Some((pos, _)) = chars
                .iter()
                .enumerate()
                .filter(|(_, c)| **c == ':')
                .nth(colons - 1)
        {
            self.window.column = pos + 1;
        }
        Outcome::Applied
    }

    /// Jump just past the next `:`.
    fn cursor_move_word_next(&mut self, state: &EditorState, _class: WordClass) -> Outcome {
        let Some(chars) = self.current_chars(state) else {
            return Outcome::Applied;
        };
        let column = self.window.column;
        if column > chars.len() {
            return Outcome::Applied;
        }
        if let Some(i) = (column + 1..chars.len()).find(|&i| chars[i] == ':') {
            self.window.column = i + 1;
        }
        Outcome::Applied
    }

    line_editing_ops!();
}
