//! The mode state machine.
//!
//! Two modes are tracked: the committed mode, which a cancelled preview
//! returns to, and the active mode of the current view strategy. While a
//! preview is open the position it started from is kept so cancelling can
//! restore it exactly.

use core_render::Frame;
use core_state::{EditorState, Mode};
use core_view::{ViewSettings, ViewStrategy, build_view};
use tracing::info;

use crate::command::Command;
use crate::dispatcher::{self, DispatchResult};

/// Where the logical cursor sits, captured across strategy rebuilds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Position {
    pub line: isize,
    pub row: isize,
    pub column: usize,
}

pub struct ModeController {
    pub(crate) state: EditorState,
    pub(crate) view: Box<dyn ViewStrategy>,
    pub(crate) settings: ViewSettings,
    pub(crate) committed: Mode,
    pub(crate) preview_origin: Option<Position>,
}

impl ModeController {
    pub fn new(state: EditorState, mode: Mode, settings: ViewSettings) -> Self {
        let view = build_view(mode, &settings);
        Self {
            state,
            view,
            settings,
            committed: mode,
            preview_origin: None,
        }
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    pub fn view(&self) -> &dyn ViewStrategy {
        self.view.as_ref()
    }

    pub fn settings(&self) -> &ViewSettings {
        &self.settings
    }

    pub fn committed_mode(&self) -> Mode {
        self.committed
    }

    pub fn active_mode(&self) -> Mode {
        self.view.mode()
    }

    pub fn is_previewing(&self) -> bool {
        self.preview_origin.is_some()
    }

    pub fn current_line(&self) -> isize {
        self.view.current_line(&self.state)
    }

    /// Put the cursor on `line` with the window centred on it.
    pub fn jump_to_line(&mut self, line: isize) {
        self.view.set_current_line(&self.state, line);
        self.view.window_centre_cursor(&self.state);
    }

    /// Draw the active view into `frame`, replacing its previous content.
    pub fn render(&self, frame: &mut Frame) {
        frame.clear();
        self.view.render(&self.state, frame);
    }

    pub fn dispatch(&mut self, command: Command) -> DispatchResult {
        dispatcher::dispatch(self, command)
    }

    pub(crate) fn position(&self) -> Position {
        Position {
            line: self.view.current_line(&self.state),
            row: self.view.window().row,
            column: self.view.window().column,
        }
    }

    /// Replace the strategy with a fresh one for `mode` placed at `at`.
    pub(crate) fn rebuild(&mut self, mode: Mode, at: Position) {
        let from = self.view.mode();
        let mut view = build_view(mode, &self.settings);
        view.window_mut().column = at.column;
        view.restore_position(&self.state, at.line, at.row);
        self.view = view;
        info!(
            target: "actions.mode",
            from = %from,
            to = %mode,
            committed = %self.committed,
            line = at.line,
            "view_rebuilt"
        );
    }
}

impl std::fmt::Debug for ModeController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModeController")
            .field("committed", &self.committed)
            .field("active", &self.view.mode())
            .field("preview_origin", &self.preview_origin)
            .field("window", self.view.window())
            .finish()
    }
}
