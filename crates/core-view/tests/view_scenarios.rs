use core_render::Frame;
use core_state::{EditorState, Mode, TextBuffer};
use core_view::{Outcome, ViewSettings, ViewStrategy, build_view};
use pretty_assertions::assert_eq;

fn state(lines: &[&str]) -> EditorState {
    EditorState::new(TextBuffer::from_lines("scenario.txt", lines.iter().copied()))
}

fn lines(state: &EditorState) -> Vec<String> {
    state.buffer.lines().iter().map(|l| l.to_string()).collect()
}

#[test]
fn join_drops_blank_next_line() {
    let mut st = state(&["one", "", "two"]);
    let mut view = build_view(Mode::Plain, &ViewSettings::default());
    view.join(&mut st);
    assert_eq!(lines(&st), vec!["one", "two"]);
}

#[test]
fn exdent_returns_to_sibling_indent() {
    let mut st = state(&["  a", "    b", "  c"]);
    let mut view = build_view(Mode::Plain, &ViewSettings::default());
    view.cursor_move_row_abs(&st, 1);
    view.exdent(&mut st);
    assert_eq!(lines(&st), vec!["  a", "  b", "  c"]);
    assert_eq!(view.window().column, 2);
}

#[test]
fn paragraph_rows_and_anchor_mapping() {
    let st = state(&["p1a", "p1b", "", "p2a", "", "p3a"]);
    let mut view = build_view(Mode::Paragraph, &ViewSettings::default());
    let mut frame = Frame::new();
    view.render(&st, &mut frame);
    assert_eq!(frame.len(), 1 + 3);
    view.set_current_line(&st, 3);
    assert_eq!(view.current_line(&st), 3);
}

#[test]
fn search_and_replace_on_commit() {
    let mut st = state(&["one", "two", "three"]);
    let mut view = build_view(Mode::IncrementalSearch, &ViewSettings::default());
    for c in "two/2".chars() {
        view.char_insert(&mut st, c);
    }
    assert_eq!(lines(&st), vec!["one", "two", "three"]);
    assert_eq!(view.current_line(&st), 1);
    view.cursor_move_row_rel(&st, 1);
    assert_eq!(view.current_line(&st), 1);

    view.commit(&mut st);
    assert_eq!(lines(&st), vec!["one", "2", "three"]);
}

#[test]
fn filtered_views_refuse_line_edits() {
    for mode in [Mode::Paragraph, Mode::IncrementalSearch, Mode::Block] {
        let mut st = state(&["a", "b"]);
        let mut view = build_view(mode, &ViewSettings::default());
        assert_eq!(view.mode(), mode);
        assert_eq!(view.join(&mut st), Outcome::Unsupported, "{mode}");
        assert_eq!(view.indent(&mut st), Outcome::Unsupported, "{mode}");
        assert_eq!(view.duplicate_line(&mut st), Outcome::Unsupported, "{mode}");
        assert_eq!(lines(&st), vec!["a", "b"]);
    }
}

#[test]
fn plain_edits_are_undoable() {
    let mut st = state(&["abc"]);
    let mut view = build_view(Mode::Plain, &ViewSettings::default());
    view.cursor_move_char_end(&st);
    view.char_insert(&mut st, 'd');
    view.duplicate_line(&mut st);
    assert_eq!(lines(&st), vec!["abcd", "abcd"]);
    while st.buffer.undo_step(-1) {}
    assert_eq!(lines(&st), vec!["abc"]);
}
