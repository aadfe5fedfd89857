//! Undo / redo and save.
//!
//! Undo steps through the buffer's snapshot history; the view keeps its
//! window and only the buffer content changes underneath it.

use super::DispatchResult;
use crate::controller::ModeController;

pub(crate) fn handle_undo(ctl: &mut ModeController) -> DispatchResult {
    step(ctl, -1, "undo")
}

pub(crate) fn handle_redo(ctl: &mut ModeController) -> DispatchResult {
    step(ctl, 1, "redo")
}

fn step(ctl: &mut ModeController, direction: isize, op: &'static str) -> DispatchResult {
    let buffer = &mut ctl.state.buffer;
    if buffer.undo_step(direction) {
        tracing::trace!(
            target: "actions.dispatch",
            op,
            position = buffer.undo_position(),
            len = buffer.undo_len(),
            "undo_step"
        );
        DispatchResult::dirty()
    } else {
        DispatchResult::clean()
    }
}

/// Write every file. Failures are logged; the buffer stays dirty so the
/// headline keeps showing unsaved changes.
pub(crate) fn handle_save(ctl: &mut ModeController) -> DispatchResult {
    match ctl.state.buffer.save() {
        Ok(()) => {
            tracing::info!(target: "actions.dispatch", files = ctl.state.buffer.file_count(), "saved");
        }
        Err(err) => {
            tracing::warn!(target: "actions.dispatch", error = %err, "save_failed");
        }
    }
    DispatchResult::dirty()
}
