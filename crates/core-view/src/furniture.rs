//! Rows shared by several views: headlines, the ruler, numbered buffer
//! rows and the bottom furniture.

use core_render::{Frame, Role, Row};
use core_state::EditorState;
use core_text::Str;

use crate::Window;

/// Columns needed to print `n`, sign included.
pub(crate) fn lnum_col(n: isize) -> usize {
    let digits = n.unsigned_abs().checked_ilog10().map_or(1, |d| d as usize + 1);
    if n < 0 { digits + 1 } else { digits }
}

pub(crate) fn file_label(state: &EditorState, line: isize) -> String {
    let n = usize::try_from(line).unwrap_or(0);
    state
        .buffer
        .filename_for_line(n)
        .map(|p| p.display().to_string())
        .unwrap_or_default()
}

pub(crate) fn file_flag(state: &EditorState) -> &'static str {
    if state.buffer.is_new_file() {
        " N"
    } else if state.buffer.is_dirty() {
        " *"
    } else {
        ""
    }
}

/// `== file * [from:to] == { uN }` above the plain view.
pub(crate) fn headline(frame: &mut Frame, state: &EditorState, window: &Window) {
    let from = window.offset;
    let to = window.offset + window.height;
    let text = format!(
        "== {}{} [{from}:{to}] == {{ u{} }}",
        file_label(state, window.current_line()),
        file_flag(state),
        state.buffer.undo_position()
    );
    frame.row().styled(Role::Headline, text);
}

/// Mode line of the filtered views.
pub(crate) fn mode_line<'f>(
    frame: &'f mut Frame,
    state: &EditorState,
    line: isize,
    tag: &str,
) -> &'f mut Row {
    let text = format!("== {}{} [{tag}] ==", file_label(state, line), file_flag(state));
    frame.row().styled(Role::GreyBg, text)
}

/// Column ruler with octal tick labels every 8 columns and a `*` over the
/// cursor column.
pub(crate) fn ruler(frame: &mut Frame, padding: usize, column: usize, width: isize) {
    let mut text = " ".repeat(padding);
    let groups = (width - padding as isize - 1).max(0) / 8;
    for i in 0..groups {
        text.push_str(&format!("0    {:>3o}", i + 1));
    }
    text.push('0');
    frame
        .row()
        .styled(Role::Ruler, text)
        .overlay(padding + column, Role::RulerIndex, "*");
}

/// Window rows of a line-oriented view: numbered buffer lines, with `#`
/// rows above and below the buffer. `content` draws the text of each
/// buffer line, receiving the cursor column on the cursor line.
pub(crate) fn numbered_rows<F>(
    frame: &mut Frame,
    state: &EditorState,
    window: &Window,
    line_role: Role,
    marker: bool,
    mut content: F,
) where
    F: FnMut(&mut Row, &str, Option<usize>),
{
    let from = window.offset;
    let to = window.offset + window.height;
    let cursor = window.current_line();
    let width = lnum_col(from).max(lnum_col(to - 1));

    for i in from..to {
        let row = frame.row();
        row.text(" ".repeat(width.saturating_sub(lnum_col(i))));
        let text = usize::try_from(i).ok().and_then(|n| state.buffer.get_line(n));
        let Some(text) = text else {
            let tail = if i == cursor { '>' } else { '#' };
            row.styled(line_role, format!("{i}{tail}"));
            continue;
        };
        row.styled(line_role, format!("{i}: "));
        let column = (i == cursor).then(|| window.column.min(Str::new(text).char_len()));
        content(row, text, column);

        if marker && let Some(m) = column {
            let cp = Str::new(text).decode_at(m).map_or(0, u32::from);
            frame
                .row()
                .text(" ".repeat(width + 2 + m))
                .styled(Role::Cursor, format!("^{m}#{cp:x}"));
        }
    }
}

/// Per-character flags marking whole-run keyword occurrences.
pub(crate) fn keyword_marks(text: &str, keywords: &[String]) -> Vec<bool> {
    let s = Str::new(text);
    let mut marks = vec![false; s.char_len()];
    let mut pos = 0;
    while let Some(found) = s.search_keyword(keywords, pos) {
        let Some(word) = s.match_keyword(keywords, found) else {
            break;
        };
        let end = (found + word.len()).min(marks.len());
        marks[found..end].fill(true);
        pos = end;
    }
    marks
}

/// Line text with keywords and the cursor highlighted, cut with `>` when it
/// does not fit in `avail` columns, and ended with `$` otherwise.
pub(crate) fn highlighted_text(
    row: &mut Row,
    text: &str,
    keywords: &[String],
    cursor: Option<usize>,
    avail: usize,
) {
    let marks = keyword_marks(text, keywords);
    let mut buf = [0u8; 4];
    for (i, c) in text.chars().enumerate() {
        if i + 1 == avail {
            row.styled(Role::Eol, ">");
            return;
        }
        let c = &*c.encode_utf8(&mut buf);
        if cursor == Some(i) {
            row.styled(Role::Cursor, c);
        } else if marks.get(i).copied().unwrap_or(false) {
            row.styled(Role::Keyword, c);
        } else {
            row.text(c);
        }
    }
    let end = if cursor == Some(marks.len()) { Role::Cursor } else { Role::Eol };
    row.styled(end, "$");
}

/// `[keywords a b c]`, wrapped at 80 columns.
pub(crate) fn keyword_rows(frame: &mut Frame, keywords: &[String]) {
    let mut line = String::from("[keywords");
    for k in keywords {
        if line.len() + k.len() + 1 > 80 {
            frame.row().styled(Role::Bottom, std::mem::take(&mut line));
        }
        line.push(' ');
        line.push_str(k);
    }
    line.push(']');
    frame.row().styled(Role::Bottom, line);
}

fn rot13(c: char) -> char {
    match c {
        'a'..='z' => (((c as u8 - b'a') + 13) % 26 + b'a') as char,
        'A'..='Z' => (((c as u8 - b'A') + 13) % 26 + b'A') as char,
        _ => c,
    }
}

/// rot13 rendering of the cursor line, when it exists.
pub(crate) fn rot13_row(frame: &mut Frame, state: &EditorState, window: &Window) {
    let Some(text) = usize::try_from(window.current_line())
        .ok()
        .and_then(|n| state.buffer.get_line(n))
    else {
        return;
    };
    let take = usize::try_from(window.width - 4).unwrap_or(0);
    let rotated: String = text.chars().take(take).map(rot13).collect();
    frame.row().styled(Role::Bottom, format!("r13 {rotated}"));
}
