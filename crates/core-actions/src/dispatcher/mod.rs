//! Dispatcher applying a [`Command`] to the controller.
//!
//! Sub-modules by concern:
//! * `motion` - cursor and window movement, delegated to the active view
//! * `edit`   - buffer and keyword mutation, one undo group per command
//! * `mode`   - switch / preview / commit / cancel transitions and resize
//! * `undo`   - undo / redo and save
//!
//! Operations the active view does not support leave everything untouched
//! and are reported through [`DispatchResult::unsupported`].

use core_view::Outcome;

use crate::command::Command;
use crate::controller::ModeController;

mod edit;
mod mode;
mod motion;
mod undo;

/// Result of dispatching a single command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchResult {
    pub dirty: bool,
    pub quit: bool,
    /// The active view does not implement the command; nothing changed.
    pub unsupported: bool,
}

impl DispatchResult {
    pub fn dirty() -> Self {
        Self {
            dirty: true,
            quit: false,
            unsupported: false,
        }
    }
    pub fn clean() -> Self {
        Self {
            dirty: false,
            quit: false,
            unsupported: false,
        }
    }
    pub fn quit() -> Self {
        Self {
            dirty: true,
            quit: true,
            unsupported: false,
        }
    }
    pub fn unsupported() -> Self {
        Self {
            dirty: false,
            quit: false,
            unsupported: true,
        }
    }

    pub(crate) fn from_outcome(outcome: Outcome, op: &'static str) -> Self {
        match outcome {
            Outcome::Applied => Self::dirty(),
            Outcome::Unsupported => {
                tracing::trace!(target: "actions.dispatch", op, "unsupported");
                Self::unsupported()
            }
        }
    }
}

pub(crate) fn dispatch(ctl: &mut ModeController, command: Command) -> DispatchResult {
    tracing::trace!(target: "actions.dispatch", ?command, mode = %ctl.view.mode(), "dispatch");
    match command {
        Command::Move(motion) => motion::handle_motion(motion, ctl),
        Command::Window(op) => motion::handle_window(op, ctl),
        Command::SearchNext => {
            let outcome = ctl.view.keyword_search_next(&ctl.state);
            DispatchResult::from_outcome(outcome, "search_next")
        }
        Command::SearchPrev => {
            let outcome = ctl.view.keyword_search_prev(&ctl.state);
            DispatchResult::from_outcome(outcome, "search_prev")
        }
        Command::SwitchMode(mode) => mode::handle_switch(mode, ctl),
        Command::PreviewMode(mode) => mode::handle_preview(mode, ctl),
        Command::CommitMode => mode::handle_commit(ctl),
        Command::CancelMode => mode::handle_cancel(ctl),
        Command::Resize { width, height } => mode::handle_resize(width, height, ctl),
        Command::Undo => undo::handle_undo(ctl),
        Command::Redo => undo::handle_redo(ctl),
        Command::Save => undo::handle_save(ctl),
        Command::Quit => {
            tracing::info!(target: "actions.dispatch", dirty = ctl.state.buffer.is_dirty(), "quit");
            DispatchResult::quit()
        }
        other => edit::handle_edit(other, ctl),
    }
}
