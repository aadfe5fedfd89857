//! Mode transitions.
//!
//! * `switch`  - toggle the committed mode (switching to the committed
//!   mode again returns to Plain); any open preview is dropped.
//! * `preview` - open a mode temporarily, remembering where it started.
//! * `commit`  - let the previewed view apply its pending effect, then make
//!   its mode the committed one.
//! * `cancel`  - close the preview and restore the committed view exactly
//!   where the preview started.
//!
//! Every transition rebuilds the view strategy from the buffer plus the
//! captured position.

use core_state::Mode;
use tracing::{debug, info};

use super::DispatchResult;
use crate::controller::ModeController;

pub(crate) fn handle_switch(mode: Mode, ctl: &mut ModeController) -> DispatchResult {
    let target = if ctl.committed == mode && !ctl.is_previewing() {
        Mode::Plain
    } else {
        mode
    };
    let at = ctl.position();
    ctl.preview_origin = None;
    ctl.committed = target;
    ctl.rebuild(target, at);
    DispatchResult::dirty()
}

pub(crate) fn handle_preview(mode: Mode, ctl: &mut ModeController) -> DispatchResult {
    if ctl.is_previewing() {
        debug!(target: "actions.mode", active = %ctl.view.mode(), requested = %mode, "preview_already_open");
        return DispatchResult::clean();
    }
    let at = ctl.position();
    ctl.preview_origin = Some(at);
    ctl.rebuild(mode, at);
    DispatchResult::dirty()
}

pub(crate) fn handle_commit(ctl: &mut ModeController) -> DispatchResult {
    if ctl.preview_origin.take().is_none() {
        return DispatchResult::clean();
    }
    let mode = ctl.view.mode();
    let at = ctl.position();
    ctl.state.buffer.begin_group();
    ctl.view.commit(&mut ctl.state);
    ctl.state.buffer.end_group();
    ctl.committed = mode;
    info!(target: "actions.mode", mode = %mode, "preview_committed");
    ctl.rebuild(mode, at);
    DispatchResult::dirty()
}

pub(crate) fn handle_cancel(ctl: &mut ModeController) -> DispatchResult {
    let Some(origin) = ctl.preview_origin.take() else {
        return DispatchResult::clean();
    };
    info!(target: "actions.mode", mode = %ctl.view.mode(), "preview_cancelled");
    let committed = ctl.committed;
    ctl.rebuild(committed, origin);
    DispatchResult::dirty()
}

/// New terminal geometry: the active window adopts it and every view built
/// afterwards starts with it.
pub(crate) fn handle_resize(width: usize, height: usize, ctl: &mut ModeController) -> DispatchResult {
    let height = height.max(1);
    ctl.settings.width = width;
    ctl.settings.height = height;
    ctl.view.window_mut().set_geometry(width, height);
    debug!(target: "actions.mode", width, height, "resize");
    DispatchResult::dirty()
}
