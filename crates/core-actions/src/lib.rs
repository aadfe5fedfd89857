//! Abstract editor commands and the controller that applies them.
//!
//! Input decoding produces [`Command`] values; [`ModeController::dispatch`]
//! applies one command to completion and reports through
//! [`DispatchResult`] whether a re-render is needed or the session ended.
//! The controller exclusively owns the [`EditorState`](core_state::EditorState)
//! and the active view strategy, and rebuilds the strategy on every mode
//! transition.

mod command;
mod controller;
mod dispatcher;

pub use command::{Command, DeleteKind, Motion, TransposeKind, WindowOp};
pub use controller::ModeController;
pub use dispatcher::DispatchResult;
