use super::DispatchResult;
use crate::command::{Motion, WindowOp};
use crate::controller::ModeController;

pub(crate) fn handle_motion(motion: Motion, ctl: &mut ModeController) -> DispatchResult {
    let state = &ctl.state;
    let view = ctl.view.as_mut();
    let outcome = match motion {
        Motion::RowAbs(row) => view.cursor_move_row_abs(state, row),
        Motion::RowRel(delta) => view.cursor_move_row_rel(state, delta),
        Motion::RowEnd => view.cursor_move_row_end(state),
        Motion::CharAbs(column) => view.cursor_move_char_abs(state, column),
        Motion::CharRel(delta) => view.cursor_move_char_rel(state, delta),
        Motion::CharEnd => view.cursor_move_char_end(state),
        Motion::WordNext(class) => view.cursor_move_word_next(state, class),
        Motion::WordPrev(class) => view.cursor_move_word_prev(state, class),
        Motion::ParaNext => view.cursor_move_para_next(state),
        Motion::ParaPrev => view.cursor_move_para_prev(state),
    };
    DispatchResult::from_outcome(outcome, "motion")
}

pub(crate) fn handle_window(op: WindowOp, ctl: &mut ModeController) -> DispatchResult {
    let state = &ctl.state;
    let view = ctl.view.as_mut();
    let outcome = match op {
        WindowOp::PageDown => view.page_down(state),
        WindowOp::PageUp => view.page_up(state),
        WindowOp::Top => view.window_top(state),
        WindowOp::Bottom => view.window_bottom(state),
        WindowOp::CentreCursor => view.window_centre_cursor(state),
        WindowOp::Grow => view.resize_window(1),
        WindowOp::Shrink => view.resize_window(-1),
    };
    if matches!(op, WindowOp::Grow | WindowOp::Shrink) && outcome.is_applied() {
        // Views built later keep the new height.
        ctl.settings.height = usize::try_from(view.window().height).unwrap_or(1);
    }
    DispatchResult::from_outcome(outcome, "window")
}
