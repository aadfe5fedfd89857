mod common;

use common::{capture_logs, controller, lines, type_text};
use core_actions::{Command, DeleteKind, Motion, TransposeKind};
use core_state::{EditorState, Mode, TextBuffer};
use pretty_assertions::assert_eq;

#[test]
fn cancelled_preview_restores_origin() {
    let mut ctl = controller(&["one", "two", "three", "four"], Mode::Plain);
    ctl.dispatch(Command::Move(Motion::RowRel(3)));
    ctl.dispatch(Command::PreviewMode(Mode::IncrementalSearch));
    assert!(ctl.is_previewing());
    type_text(&mut ctl, "t");
    ctl.dispatch(Command::Move(Motion::RowAbs(0)));

    ctl.dispatch(Command::CancelMode);
    assert!(!ctl.is_previewing());
    assert_eq!(ctl.active_mode(), Mode::Plain);
    assert_eq!(ctl.current_line(), 3);
    assert_eq!(ctl.view().window().row, 3);
    assert!(!ctl.state().buffer.is_dirty());
}

#[test]
fn committed_search_replaces_and_undoes_in_one_step() {
    let mut ctl = controller(&["cat", "dog", "cat dog cat"], Mode::Plain);
    ctl.dispatch(Command::PreviewMode(Mode::IncrementalSearch));
    type_text(&mut ctl, "cat/cow");
    assert_eq!(lines(&ctl), vec!["cat", "dog", "cat dog cat"]);

    ctl.dispatch(Command::CommitMode);
    assert_eq!(lines(&ctl), vec!["cow", "dog", "cow dog cow"]);
    assert_eq!(ctl.committed_mode(), Mode::IncrementalSearch);
    assert_eq!(ctl.active_mode(), Mode::IncrementalSearch);
    assert!(!ctl.is_previewing());

    ctl.dispatch(Command::Undo);
    assert_eq!(lines(&ctl), vec!["cat", "dog", "cat dog cat"]);
    ctl.dispatch(Command::Redo);
    assert_eq!(lines(&ctl), vec!["cow", "dog", "cow dog cow"]);
}

#[test]
fn split_line_is_one_undo_step() {
    let mut ctl = controller(&["hello"], Mode::Plain);
    ctl.dispatch(Command::Move(Motion::CharAbs(2)));
    ctl.dispatch(Command::InsertNewLine { follow: true });
    assert_eq!(lines(&ctl), vec!["he", "llo"]);
    assert_eq!(ctl.current_line(), 1);
    ctl.dispatch(Command::Undo);
    assert_eq!(lines(&ctl), vec!["hello"]);
}

#[test]
fn transpose_down_follows_the_line() {
    let mut ctl = controller(&["a", "b", "c"], Mode::Plain);
    ctl.dispatch(Command::Transpose(TransposeKind::LinesDown));
    assert_eq!(lines(&ctl), vec!["b", "a", "c"]);
    assert_eq!(ctl.current_line(), 1);
    ctl.dispatch(Command::Transpose(TransposeKind::LinesUp));
    assert_eq!(lines(&ctl), vec!["a", "b", "c"]);
    assert_eq!(ctl.current_line(), 0);
}

#[test]
fn filtered_mode_reports_unsupported_edits() {
    let mut ctl = controller(&["a", "", "b"], Mode::Paragraph);
    let r = ctl.dispatch(Command::InsertChar('x'));
    assert!(r.unsupported);
    assert!(!r.dirty);
    let r = ctl.dispatch(Command::Delete(DeleteKind::ToLineEnd));
    assert!(r.unsupported);
    assert_eq!(lines(&ctl), vec!["a", "", "b"]);
    assert!(!ctl.state().buffer.is_dirty());
}

#[test]
fn resize_keeps_cursor_visible_and_reaches_new_views() {
    let mut ctl = controller(&["0", "1", "2", "3", "4"], Mode::Plain);
    ctl.dispatch(Command::Move(Motion::RowRel(4)));
    ctl.dispatch(Command::Resize { width: 40, height: 2 });
    assert_eq!(ctl.current_line(), 4);
    assert_eq!(ctl.view().window().row, 1);

    ctl.dispatch(Command::SwitchMode(Mode::Table));
    assert_eq!(ctl.view().window().height, 2);
    assert_eq!(ctl.view().window().width, 40);
    assert_eq!(ctl.current_line(), 4);
}

#[test]
fn window_height_change_survives_rebuild() {
    let mut ctl = controller(&["a"], Mode::Plain);
    ctl.dispatch(Command::Window(core_actions::WindowOp::Grow));
    ctl.dispatch(Command::SwitchMode(Mode::Block));
    assert_eq!(ctl.view().window().height, 6);
}

#[test]
fn save_writes_files_and_clears_dirty() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("s.txt");
    std::fs::write(&path, "x\n").unwrap();
    let state = EditorState::new(TextBuffer::open(&[&path]));
    let mut ctl = core_actions::ModeController::new(state, Mode::Plain, Default::default());

    ctl.dispatch(Command::InsertChar('y'));
    assert!(ctl.state().buffer.is_dirty());
    ctl.dispatch(Command::Save);
    assert!(!ctl.state().buffer.is_dirty());
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "yx\n");
}

#[test]
fn quit_is_reported() {
    let mut ctl = controller(&["a"], Mode::Plain);
    let r = ctl.dispatch(Command::Quit);
    assert!(r.quit);
}

#[test]
fn mode_transitions_are_logged() {
    let mut ctl = controller(&["a"], Mode::Plain);
    let logs = capture_logs(|| {
        ctl.dispatch(Command::PreviewMode(Mode::Block));
        ctl.dispatch(Command::CancelMode);
    });
    assert!(logs.contains("actions.mode"), "{logs}");
    assert!(logs.contains("preview_cancelled"), "{logs}");
    assert!(logs.contains("view_rebuilt"), "{logs}");
}
