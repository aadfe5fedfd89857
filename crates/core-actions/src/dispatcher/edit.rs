//! Buffer-mutating commands.
//!
//! Every command runs inside one undo group: a view operation that touches
//! several lines (join, paragraph transpose, search-and-replace) checkpoints
//! once and is undone in one step.

use super::DispatchResult;
use crate::command::{Command, DeleteKind, TransposeKind};
use crate::controller::ModeController;
use core_view::Outcome;

pub(crate) fn handle_edit(command: Command, ctl: &mut ModeController) -> DispatchResult {
    let state = &mut ctl.state;
    let view = ctl.view.as_mut();
    state.buffer.begin_group();
    let (outcome, op) = match command {
        Command::InsertChar(c) => (view.char_insert(state, c), "insert_char"),
        Command::Delete(kind) => match kind {
            DeleteKind::Forward => (view.char_delete_forward(state), "delete_forward"),
            DeleteKind::Backward => (view.char_delete_backward(state), "delete_backward"),
            DeleteKind::ToLineEnd => (view.char_delete_to_eol(state), "delete_to_eol"),
            DeleteKind::ToLineStart => (view.char_delete_to_bol(state), "delete_to_bol"),
        },
        Command::Indent => (view.indent(state), "indent"),
        Command::Exdent => (view.exdent(state), "exdent"),
        Command::Join => (view.join(state), "join"),
        Command::DuplicateLine => (view.duplicate_line(state), "duplicate_line"),
        Command::NewLine => (view.new_line(state), "new_line"),
        Command::InsertNewLine { follow } => (view.insert_new_line(state, follow), "split_line"),
        Command::Transpose(kind) => match kind {
            TransposeKind::Lines => (view.transpose_lines(state), "transpose_lines"),
            TransposeKind::LinesDown => {
                let outcome = view.transpose_lines(state);
                if outcome.is_applied() {
                    view.cursor_move_row_rel(state, 1);
                }
                (outcome, "transpose_down")
            }
            TransposeKind::LinesUp => (view.transpose_lines_up(state), "transpose_up"),
            TransposeKind::Chars => (view.transpose_chars(state), "transpose_chars"),
        },
        Command::RotateVariant => (view.char_rotate_variant(state), "rotate_variant"),
        Command::ToggleKeyword => (view.keyword_toggle(state), "toggle_keyword"),
        other => {
            tracing::debug!(target: "actions.dispatch", command = ?other, "not_an_edit");
            (Outcome::Unsupported, "edit")
        }
    };
    state.buffer.end_group();
    tracing::trace!(
        target: "actions.dispatch",
        op,
        applied = outcome.is_applied(),
        lines = state.buffer.line_count(),
        "edit"
    );
    DispatchResult::from_outcome(outcome, op)
}
