//! Cursor geometry plus the editing primitives shared by the line-oriented
//! views.

use core_state::EditorState;
use core_text::{Str, WordClass, is_blank, leading_spaces, motion};
use tracing::trace;

use crate::{Outcome, ViewSettings, VariantTable};

/// The visible slice of the buffer and the cursor inside it.
///
/// `offset` is the buffer line shown on screen row 0 and may be negative.
/// `row` is relative to `offset`; `column` counts characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Window {
    pub offset: isize,
    pub height: isize,
    pub width: isize,
    pub row: isize,
    pub column: usize,
}

fn line_at(state: &EditorState, line: isize) -> Option<(usize, &str)> {
    let n = usize::try_from(line).ok()?;
    state.buffer.get_line(n).map(|text| (n, text))
}

/// Nearest non-blank line above `line` indented less than `indent`.
fn parent_indent(state: &EditorState, line: usize, indent: usize) -> Option<usize> {
    (0..line).rev().find_map(|l| {
        let text = state.buffer.get_line(l)?;
        let n = leading_spaces(text);
        (!is_blank(text) && n < indent).then_some(n)
    })
}

impl Window {
    pub fn new(settings: &ViewSettings) -> Self {
        Self {
            offset: 0,
            height: settings.height.max(1) as isize,
            width: settings.width as isize,
            row: 0,
            column: 0,
        }
    }

    pub fn current_line(&self) -> isize {
        self.offset + self.row
    }

    /// Adopt new dimensions, scrolling so the cursor stays visible.
    pub fn set_geometry(&mut self, width: usize, height: usize) {
        self.width = width as isize;
        self.height = height.max(1) as isize;
        self.follow_cursor();
    }

    /// Scroll so the cursor row is inside `0..height`.
    pub(crate) fn follow_cursor(&mut self) {
        if self.row < 0 {
            self.offset += self.row;
            self.row = 0;
        } else if self.row >= self.height {
            self.offset += self.row - self.height + 1;
            self.row = self.height - 1;
        }
    }

    fn current<'s>(&self, state: &'s EditorState) -> Option<(usize, &'s str)> {
        line_at(state, self.current_line())
    }

    fn current_len(&self, state: &EditorState) -> usize {
        self.current(state).map_or(0, |(_, text)| Str::new(text).char_len())
    }

    // Window commands.

    pub(crate) fn page_down(&mut self) -> Outcome {
        self.offset += self.height;
        Outcome::Applied
    }

    pub(crate) fn page_up(&mut self) -> Outcome {
        self.offset -= self.height;
        Outcome::Applied
    }

    pub(crate) fn window_top(&mut self) -> Outcome {
        self.offset = 0;
        Outcome::Applied
    }

    pub(crate) fn window_bottom(&mut self, state: &EditorState) -> Outcome {
        self.offset = state.buffer.line_count() as isize - self.height;
        Outcome::Applied
    }

    pub(crate) fn centre_cursor(&mut self) -> Outcome {
        let target = self.height / 2;
        self.offset += self.row - target;
        self.row = target;
        Outcome::Applied
    }

    pub(crate) fn resize(&mut self, delta: isize) -> Outcome {
        self.height = (self.height + delta).max(1);
        self.follow_cursor();
        Outcome::Applied
    }

    // Cursor motion.

    pub(crate) fn row_abs(&mut self, row: isize) -> Outcome {
        self.row = row;
        self.follow_cursor();
        Outcome::Applied
    }

    pub(crate) fn row_rel(&mut self, delta: isize) -> Outcome {
        self.row_abs(self.row + delta)
    }

    pub(crate) fn row_end(&mut self) -> Outcome {
        self.row = self.height - 1;
        Outcome::Applied
    }

    pub(crate) fn char_abs(&mut self, state: &EditorState, column: usize) -> Outcome {
        self.column = column.min(self.current_len(state));
        Outcome::Applied
    }

    pub(crate) fn char_rel(&mut self, state: &EditorState, delta: isize) -> Outcome {
        let target = self.column.saturating_add_signed(delta);
        self.char_abs(state, target)
    }

    pub(crate) fn char_end(&mut self, state: &EditorState) -> Outcome {
        self.column = self.current_len(state);
        Outcome::Applied
    }

    pub(crate) fn word_next(&mut self, state: &EditorState, class: WordClass) -> Outcome {
        if let Some((_, text)) = self.current(state)
            && let Some(column) = motion::word_next(Str::new(text), self.column, class)
        {
            self.column = column;
        }
        Outcome::Applied
    }

    pub(crate) fn word_prev(&mut self, state: &EditorState, class: WordClass) -> Outcome {
        if let Some((_, text)) = self.current(state)
            && let Some(column) = motion::word_prev(Str::new(text), self.column, class)
        {
            self.column = column;
        }
        Outcome::Applied
    }

    /// Next line that starts a paragraph after an empty separator line.
    pub(crate) fn para_next(&mut self, state: &EditorState) -> Outcome {
        let lines = state.buffer.lines();
        let start = usize::try_from(self.current_line() + 1).unwrap_or(0);
        let found = (start..lines.len())
            .find(|&i| lines[i].is_empty() && lines.get(i + 1).is_some_and(|l| !l.is_empty()));
        if let Some(i) = found {
            self.row = i as isize + 1 - self.offset;
            self.follow_cursor();
        }
        Outcome::Applied
    }

    /// Previous line that starts a paragraph.
    pub(crate) fn para_prev(&mut self, state: &EditorState) -> Outcome {
        let lines = state.buffer.lines();
        let upper = (self.current_line() - 1).min(lines.len() as isize - 1);
        let Ok(upper) = usize::try_from(upper) else {
            return Outcome::Applied;
        };
        let found = (0..=upper)
            .rev()
            .find(|&i| (i == 0 || lines[i - 1].is_empty()) && !lines[i].is_empty());
        if let Some(i) = found {
            self.row = i as isize - self.offset;
            self.follow_cursor();
        }
        Outcome::Applied
    }

    // Keywords.

    /// Move to the next keyword occurrence on the visible rows at or below
    /// the cursor.
    pub(crate) fn keyword_search_next(&mut self, state: &EditorState) -> Outcome {
        let keywords = state.keywords.as_slice();
        let from = self.current_line();
        let to = self.offset + self.height;
        for (i, line) in (from..to).enumerate() {
            let Some((_, text)) = line_at(state, line) else {
                if line < 0 {
                    continue;
                }
                break;
            };
            let start = if i == 0 { self.column + 1 } else { 0 };
            if let Some(found) = Str::new(text).search_keyword(keywords, start) {
                self.row += i as isize;
                self.column = found;
                break;
            }
        }
        Outcome::Applied
    }

    pub(crate) fn keyword_toggle(&mut self, state: &mut EditorState) -> Outcome {
        let Some((_, text)) = self.current(state) else {
            return Outcome::Applied;
        };
        let s = Str::new(text);
        let Some(range) = s.keyword_run_at(self.column).and_then(|r| s.byte_range(r)) else {
            return Outcome::Applied;
        };
        let word = text[range].to_owned();
        let added = state.keywords.toggle(&word);
        trace!(target: "view.keywords", word = %word, added, "keyword_toggle");
        Outcome::Applied
    }

    // Line edits.

    pub(crate) fn indent(&mut self, state: &mut EditorState) -> Outcome {
        let Some((line, s0)) = self.current(state) else {
            return Outcome::Applied;
        };
        if line == 0 {
            return Outcome::Applied;
        }
        let n0 = leading_spaces(s0);
        let mut above = line - 1;
        if above > 0 && state.buffer.get_line(above).is_some_and(is_blank) {
            above -= 1;
        }
        let mut n1 = state.buffer.get_line(above).map_or(0, leading_spaces);
        if n1 == n0 {
            let Some(parent) = parent_indent(state, line, n0) else {
                return Outcome::Applied;
            };
            n1 = 2 * n0 - parent;
        }
        let text = format!("{}{}", " ".repeat(n1), &s0[n0..]);
        state.buffer.replace_line(line, &text);
        self.column = n1;
        Outcome::Applied
    }

    pub(crate) fn exdent(&mut self, state: &mut EditorState) -> Outcome {
        let Some((line, s0)) = self.current(state) else {
            return Outcome::Applied;
        };
        let n0 = leading_spaces(s0);
        if line == 0 || n0 == 0 {
            return Outcome::Applied;
        }
        let Some(n1) = parent_indent(state, line, n0) else {
            return Outcome::Applied;
        };
        let text = format!("{}{}", " ".repeat(n1), &s0[n0..]);
        state.buffer.replace_line(line, &text);
        self.column = n1;
        Outcome::Applied
    }

    pub(crate) fn join(&mut self, state: &mut EditorState) -> Outcome {
        let Some((line, s0)) = self.current(state) else {
            return Outcome::Applied;
        };
        let Some(s1) = state.buffer.get_line(line + 1) else {
            return Outcome::Applied;
        };
        if s0.is_empty() {
            state.buffer.delete_line(line);
        } else if s1.is_empty() {
            state.buffer.delete_line(line + 1);
        } else {
            let joined = format!("{s0}{s1}");
            state.buffer.replace_line(line, &joined);
            state.buffer.delete_line(line + 1);
        }
        Outcome::Applied
    }

    pub(crate) fn duplicate_line(&mut self, state: &mut EditorState) -> Outcome {
        let Some((line, text)) = self.current(state) else {
            return Outcome::Applied;
        };
        let copy = text.to_owned();
        state.buffer.insert_empty_line(line);
        state.buffer.replace_line(line, &copy);
        Outcome::Applied
    }

    /// Swap the cursor line with the one below it.
    pub(crate) fn transpose_lines(&mut self, state: &mut EditorState) -> Outcome {
        if let Some((line, _)) = self.current(state)
            && line + 1 < state.buffer.line_count()
        {
            state.buffer.rotate_lines(line, 2, 1);
        }
        Outcome::Applied
    }

    /// Swap the cursor line with the one above it, following it upwards.
    pub(crate) fn transpose_lines_up(&mut self, state: &mut EditorState) -> Outcome {
        if let Some((line, _)) = self.current(state)
            && line > 0
        {
            state.buffer.rotate_lines(line - 1, 2, 1);
            self.row -= 1;
            self.follow_cursor();
        }
        Outcome::Applied
    }

    /// Swap the two characters before the cursor when both are single bytes.
    pub(crate) fn transpose_chars(&mut self, state: &mut EditorState) -> Outcome {
        let Some((line, text)) = self.current(state) else {
            return Outcome::Applied;
        };
        let s = Str::new(text);
        let column = self.column.min(s.char_len());
        if column < 2 {
            return Outcome::Applied;
        }
        let o0 = s.index_chars_to_bytes(column - 2);
        let o1 = s.index_chars_to_bytes(column - 1);
        let o2 = s.index_chars_to_bytes(column);
        if o1 - o0 != 1 || o2 - o1 != 1 {
            return Outcome::Applied;
        }
        let swapped = format!("{}{}{}{}", &text[..o0], &text[o1..o2], &text[o0..o1], &text[o2..]);
        state.buffer.replace_line(line, &swapped);
        Outcome::Applied
    }

    /// Insert an empty line at the cursor and move down with the old line.
    pub(crate) fn new_line(&mut self, state: &mut EditorState) -> Outcome {
        let Ok(line) = usize::try_from(self.current_line()) else {
            return Outcome::Applied;
        };
        if state.buffer.insert_empty_line(line) {
            self.row += 1;
            self.follow_cursor();
        }
        Outcome::Applied
    }

    pub(crate) fn insert_new_line(&mut self, state: &mut EditorState, follow: bool) -> Outcome {
        let Some((line, text)) = self.current(state) else {
            return Outcome::Applied;
        };
        if text.is_empty() {
            return self.new_line(state);
        }
        let at = Str::new(text).index_chars_to_bytes(self.column);
        let (top, bottom) = (text[..at].to_owned(), text[at..].to_owned());
        state.buffer.insert_empty_line(line);
        state.buffer.replace_line(line, &top);
        state.buffer.replace_line(line + 1, &bottom);
        if follow {
            self.row += 1;
            self.column = 0;
            self.follow_cursor();
        }
        Outcome::Applied
    }

    // Character edits.

    pub(crate) fn char_insert(&mut self, state: &mut EditorState, c: char) -> Outcome {
        let Ok(line) = usize::try_from(self.current_line()) else {
            return Outcome::Applied;
        };
        if line == state.buffer.line_count() {
            state.buffer.insert_empty_line(line);
        }
        let Some(text) = state.buffer.get_line(line) else {
            return Outcome::Applied;
        };
        let s = Str::new(text);
        self.column = self.column.min(s.char_len());
        let at = s.index_chars_to_bytes(self.column);
        let mut edited = String::with_capacity(text.len() + c.len_utf8());
        edited.push_str(&text[..at]);
        edited.push(c);
        edited.push_str(&text[at..]);
        state.buffer.replace_line(line, &edited);
        self.column += 1;
        Outcome::Applied
    }

    /// Delete the character under the cursor; at end of line, join with the
    /// next line.
    pub(crate) fn char_delete_forward(&mut self, state: &mut EditorState) -> Outcome {
        let Some((line, text)) = self.current(state) else {
            return Outcome::Applied;
        };
        let s = Str::new(text);
        let len = s.char_len();
        if self.column >= len {
            self.column = len;
            return self.join(state);
        }
        let Some(range) = s.byte_range(self.column..self.column + 1) else {
            return Outcome::Applied;
        };
        let edited = format!("{}{}", &text[..range.start], &text[range.end..]);
        state.buffer.replace_line(line, &edited);
        Outcome::Applied
    }

    /// Delete the character before the cursor; at column 0, join with the
    /// previous line. At the first line the cursor clamps to column 0.
    pub(crate) fn char_delete_backward(&mut self, state: &mut EditorState) -> Outcome {
        self.column = self.column.min(self.current_len(state));
        if self.column > 0 {
            self.column -= 1;
            return self.char_delete_forward(state);
        }
        let line = self.current_line();
        let Some((_, above)) = line_at(state, line - 1) else {
            return Outcome::Applied;
        };
        self.column = Str::new(above).char_len();
        self.row -= 1;
        self.follow_cursor();
        self.join(state)
    }

    pub(crate) fn char_delete_to_eol(&mut self, state: &mut EditorState) -> Outcome {
        let Some((line, text)) = self.current(state) else {
            return Outcome::Applied;
        };
        let s = Str::new(text);
        if self.column < s.char_len() {
            let at = s.index_chars_to_bytes(self.column);
            let kept = text[..at].to_owned();
            state.buffer.replace_line(line, &kept);
        }
        Outcome::Applied
    }

    pub(crate) fn char_delete_to_bol(&mut self, state: &mut EditorState) -> Outcome {
        let Some((line, text)) = self.current(state) else {
            return Outcome::Applied;
        };
        let s = Str::new(text);
        let at = s.index_chars_to_bytes(self.column.min(s.char_len()));
        let kept = text[at..].to_owned();
        state.buffer.replace_line(line, &kept);
        self.column = 0;
        Outcome::Applied
    }

    /// Replace the character under the cursor with its next variant.
    pub(crate) fn char_rotate_variant(
        &mut self,
        state: &mut EditorState,
        variants: &VariantTable,
    ) -> Outcome {
        let Some((line, text)) = self.current(state) else {
            return Outcome::Applied;
        };
        let s = Str::new(text);
        let Ok(c) = s.decode_at(self.column) else {
            return Outcome::Applied;
        };
        let Some(next) = variants.next(c) else {
            return Outcome::Applied;
        };
        let Some(range) = s.byte_range(self.column..self.column + 1) else {
            return Outcome::Applied;
        };
        let edited = format!("{}{}{}", &text[..range.start], next, &text[range.end..]);
        state.buffer.replace_line(line, &edited);
        Outcome::Applied
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_state::TextBuffer;
    use pretty_assertions::assert_eq;

    fn state(lines: &[&str]) -> EditorState {
        EditorState::new(TextBuffer::from_lines("t.txt", lines.iter().copied()))
    }

    fn window() -> Window {
        Window::new(&ViewSettings {
            height: 10,
            ..ViewSettings::default()
        })
    }

    fn lines(state: &EditorState) -> Vec<&str> {
        state.buffer.lines().iter().map(|l| &**l).collect()
    }

    #[test]
    fn indent_matches_previous_line() {
        let mut st = state(&["    a", "b"]);
        let mut w = window();
        w.row = 1;
        w.indent(&mut st);
        assert_eq!(lines(&st), vec!["    a", "    b"]);
        assert_eq!(w.column, 4);
    }

    #[test]
    fn indent_steps_past_equal_sibling() {
        let mut st = state(&["a", "  b", "  c"]);
        let mut w = window();
        w.row = 2;
        w.indent(&mut st);
        assert_eq!(lines(&st), vec!["a", "  b", "    c"]);
    }

    #[test]
    fn indent_skips_one_blank_line() {
        let mut st = state(&["  a", "", "b"]);
        let mut w = window();
        w.row = 2;
        w.indent(&mut st);
        assert_eq!(lines(&st)[2], "  b");
    }

    #[test]
    fn exdent_to_parent_level() {
        let mut st = state(&["x", "  y", "    z"]);
        let mut w = window();
        w.row = 2;
        w.exdent(&mut st);
        assert_eq!(lines(&st), vec!["x", "  y", "  z"]);
        assert_eq!(w.column, 2);
    }

    #[test]
    fn join_handles_empty_sides() {
        let mut st = state(&["ab", "cd", "", "ef"]);
        let mut w = window();
        w.join(&mut st);
        assert_eq!(lines(&st), vec!["abcd", "", "ef"]);
        w.join(&mut st);
        assert_eq!(lines(&st), vec!["abcd", "ef"]);
        w.row = 1;
        w.join(&mut st);
        assert_eq!(lines(&st), vec!["abcd", "ef"]);
    }

    #[test]
    fn char_insert_on_line_past_end_creates_it() {
        let mut st = state(&["a"]);
        let mut w = window();
        w.row = 1;
        w.char_insert(&mut st, 'z');
        assert_eq!(lines(&st), vec!["a", "z"]);
        assert_eq!(w.column, 1);
    }

    #[test]
    fn char_insert_respects_multibyte_columns() {
        let mut st = state(&["éa"]);
        let mut w = window();
        w.column = 1;
        w.char_insert(&mut st, 'ü');
        assert_eq!(lines(&st), vec!["éüa"]);
    }

    #[test]
    fn delete_backward_joins_with_previous_line() {
        let mut st = state(&["ab", "cd"]);
        let mut w = window();
        w.row = 1;
        w.char_delete_backward(&mut st);
        assert_eq!(lines(&st), vec!["abcd"]);
        assert_eq!((w.row, w.column), (0, 2));
    }

    #[test]
    fn delete_backward_at_origin_is_noop() {
        let mut st = state(&["ab"]);
        let mut w = window();
        w.column = 0;
        w.char_delete_backward(&mut st);
        assert_eq!(lines(&st), vec!["ab"]);
        assert_eq!((w.row, w.column), (0, 0));
    }

    #[test]
    fn delete_backward_clamps_sticky_column() {
        let mut st = state(&["abc"]);
        let mut w = window();
        w.column = 9;
        w.char_delete_backward(&mut st);
        assert_eq!(lines(&st), vec!["ab"]);
        assert_eq!(w.column, 2);
    }

    #[test]
    fn delete_to_line_ends() {
        let mut st = state(&["hello world"]);
        let mut w = window();
        w.column = 5;
        w.char_delete_to_eol(&mut st);
        assert_eq!(lines(&st), vec!["hello"]);
        w.column = 2;
        w.char_delete_to_bol(&mut st);
        assert_eq!(lines(&st), vec!["llo"]);
        assert_eq!(w.column, 0);
    }

    #[test]
    fn transpose_chars_swaps_ascii_only() {
        let mut st = state(&["abc", "éb"]);
        let mut w = window();
        w.column = 2;
        w.transpose_chars(&mut st);
        assert_eq!(lines(&st)[0], "bac");
        w.row = 1;
        w.transpose_chars(&mut st);
        assert_eq!(lines(&st)[1], "éb");
    }

    #[test]
    fn insert_new_line_splits_and_follows() {
        let mut st = state(&["abcd"]);
        let mut w = window();
        w.column = 2;
        w.insert_new_line(&mut st, true);
        assert_eq!(lines(&st), vec!["ab", "cd"]);
        assert_eq!((w.row, w.column), (1, 0));
        w.insert_new_line(&mut st, false);
        assert_eq!(lines(&st), vec!["ab", "", "cd"]);
        assert_eq!((w.row, w.column), (1, 0));
    }

    #[test]
    fn paragraph_motions() {
        let st = state(&["a", "b", "", "c", "", "", "d"]);
        let mut w = window();
        w.para_next(&st);
        assert_eq!(w.current_line(), 3);
        w.para_next(&st);
        assert_eq!(w.current_line(), 6);
        w.para_next(&st);
        assert_eq!(w.current_line(), 6);
        w.para_prev(&st);
        assert_eq!(w.current_line(), 3);
        w.para_prev(&st);
        assert_eq!(w.current_line(), 0);
    }

    #[test]
    fn keyword_toggle_needs_letter_under_cursor() {
        let mut st = state(&["let x = foo;"]);
        let mut w = window();
        w.column = 9;
        w.keyword_toggle(&mut st);
        assert!(st.keywords.contains("foo"));
        w.column = 3;
        w.keyword_toggle(&mut st);
        assert_eq!(st.keywords.len(), 1);
    }

    #[test]
    fn keyword_toggle_twice_restores_set() {
        let mut st = state(&["if cond then body"]);
        st.keywords.toggle("then");
        let before = st.keywords.as_slice().to_vec();
        let mut w = window();
        for column in [0, 4, 10] {
            w.column = column;
            w.keyword_toggle(&mut st);
            w.keyword_toggle(&mut st);
            assert_eq!(st.keywords.as_slice(), before.as_slice());
        }
        w.column = 5;
        w.keyword_toggle(&mut st);
        assert!(st.keywords.contains("cond"));
        w.keyword_toggle(&mut st);
        assert!(!st.keywords.contains("cond"));
    }

    #[test]
    fn keyword_search_starts_after_cursor() {
        let mut st = state(&["foo bar foo", "x", "bar"]);
        st.keywords.toggle("foo");
        st.keywords.toggle("bar");
        let mut w = window();
        w.keyword_search_next(&st);
        assert_eq!((w.row, w.column), (0, 4));
        w.keyword_search_next(&st);
        assert_eq!((w.row, w.column), (0, 8));
        w.keyword_search_next(&st);
        assert_eq!((w.row, w.column), (2, 0));
    }

    #[test]
    fn row_motion_scrolls_and_keeps_column() {
        let st = state(&["abcdef", "a"]);
        let mut w = window();
        w.char_abs(&st, 4);
        w.row_rel(1);
        assert_eq!(w.column, 4);
        w.row_rel(-3);
        assert_eq!((w.offset, w.row), (-2, 0));
    }

    #[test]
    fn rotate_variant_cycles_group() {
        let mut st = state(&["ae"]);
        let mut w = window();
        let table = VariantTable::default();
        w.char_rotate_variant(&mut st, &table);
        assert_eq!(lines(&st)[0], "àe");
        assert_eq!(w.column, 0);
    }
}
