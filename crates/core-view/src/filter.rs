//! Cursor handling for views that show a filtered subset of lines.
//!
//! A filtered view keeps `offset` as the first buffer line it considers and
//! `row` as an index into the lines at or after `offset` that pass its
//! predicate. The predicate is a property of a single line (and the buffer
//! around it), never of the window, so the same line set is seen from any
//! offset.

use core_render::{Frame, Role, Row};
use core_state::EditorState;

use crate::Window;
use crate::furniture::lnum_col;

pub(crate) type Keep<'a> = &'a dyn Fn(usize) -> bool;

/// Lines at or after `offset` that pass `keep`.
pub(crate) fn matching<'a>(
    state: &EditorState,
    offset: isize,
    keep: Keep<'a>,
) -> impl Iterator<Item = usize> + use<'a> {
    let start = usize::try_from(offset).unwrap_or(0);
    (start..state.buffer.line_count()).filter(move |&i| keep(i))
}

/// Buffer line under the filtered cursor, or the line count when the row
/// is past the last match.
pub(crate) fn current_line(window: &Window, state: &EditorState, keep: Keep<'_>) -> isize {
    usize::try_from(window.row)
        .ok()
        .and_then(|row| matching(state, window.offset, keep).nth(row))
        .unwrap_or(state.buffer.line_count()) as isize
}

/// Move the filtered cursor by `delta` rows, scrolling the offset to the
/// neighbouring matches when the cursor leaves the window.
pub(crate) fn row_rel(window: &mut Window, state: &EditorState, delta: isize, keep: Keep<'_>) {
    let mut row = window.row + delta;
    while row < 0 {
        let before = usize::try_from(window.offset)
            .unwrap_or(0)
            .min(state.buffer.line_count());
        match (0..before).rev().find(|&i| keep(i)) {
            Some(line) => {
                window.offset = line as isize;
                row += 1;
            }
            None => row = 0,
        }
    }

    let found: Vec<usize> = matching(state, window.offset, keep)
        .take(row as usize + 1)
        .collect();
    row = row.min(found.len() as isize - 1).max(0);
    if row >= window.height {
        let shift = (row - window.height + 1) as usize;
        window.offset = found[shift] as isize;
        row = window.height - 1;
    }
    window.row = row;
}

pub(crate) fn row_abs(window: &mut Window, state: &EditorState, row: isize, keep: Keep<'_>) {
    window.row = 0;
    row_rel(window, state, row.max(0), keep);
}

/// Numbered rows for the matches on screen. `content` draws a line's text
/// and learns whether it is the cursor row.
pub(crate) fn filtered_rows<F>(
    frame: &mut Frame,
    state: &EditorState,
    window: &Window,
    keep: Keep<'_>,
    mut content: F,
) where
    F: FnMut(&mut Row, usize, &str, bool),
{
    let width = lnum_col(state.buffer.line_count() as isize);
    let visible = matching(state, window.offset, keep).take(window.height.max(0) as usize);
    for (n, line) in visible.enumerate() {
        let Some(text) = state.buffer.get_line(line) else {
            break;
        };
        let row = frame.row();
        row.text(" ".repeat(width.saturating_sub(lnum_col(line as isize))))
            .styled(Role::Grey, format!("{line}: "));
        content(row, line, text, n as isize == window.row);
    }
}
