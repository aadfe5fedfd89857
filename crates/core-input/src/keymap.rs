//! Default keymap.
//!
//! Printable keys insert themselves. Control letters carry the common
//! motions and edits, meta keys the less frequent commands and the mode
//! switches. While a mode is being previewed, `Enter` commits it and
//! `Ctrl-G` cancels it.

use core_actions::{Command, DeleteKind, Motion, TransposeKind, WindowOp};
use core_state::Mode;
use core_text::WordClass;
use tracing::trace;

use crate::key::{KeyCode, KeyEvent, KeyModifiers};

/// Turns key events into commands. A lone `Esc` (as crossterm reports it)
/// makes the next key a meta key, the same way the byte decoder treats an
/// `ESC` byte.
#[derive(Debug, Default)]
pub struct KeyTranslator {
    pending_meta: bool,
}

impl KeyTranslator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn translate(&mut self, key: KeyEvent, previewing: bool) -> Option<Command> {
        if key.code == KeyCode::Esc {
            self.pending_meta = true;
            return None;
        }
        let mut mods = key.mods;
        if std::mem::take(&mut self.pending_meta) {
            mods |= KeyModifiers::META;
        }
        let command = match key.code {
            KeyCode::Char(c) if mods.contains(KeyModifiers::META) => meta_command(c),
            KeyCode::Char(c) if mods.contains(KeyModifiers::CTRL) => control_command(c, previewing),
            KeyCode::Char(c) => Some(Command::InsertChar(c)),
            KeyCode::Up => Some(Command::Move(Motion::RowRel(-1))),
            KeyCode::Down => Some(Command::Move(Motion::RowRel(1))),
            KeyCode::Left => Some(Command::Move(Motion::CharRel(-1))),
            KeyCode::Right => Some(Command::Move(Motion::CharRel(1))),
            KeyCode::Home => Some(Command::Move(Motion::CharAbs(0))),
            KeyCode::End => Some(Command::Move(Motion::CharEnd)),
            KeyCode::PageUp => Some(Command::Window(WindowOp::PageUp)),
            KeyCode::PageDown => Some(Command::Window(WindowOp::PageDown)),
            KeyCode::Delete => Some(Command::Delete(DeleteKind::Forward)),
            KeyCode::Esc => None,
        };
        if command.is_none() {
            trace!(target: "input.decode", ?key, meta = mods.contains(KeyModifiers::META), "unbound_key");
        }
        command
    }
}

fn meta_command(c: char) -> Option<Command> {
    let command = match c {
        '#' => Command::SwitchMode(Mode::Table),
        '$' => Command::SwitchMode(Mode::Paragraph),
        '%' => Command::SwitchMode(Mode::Block),
        '?' => Command::SwitchMode(Mode::IncrementalSearch),
        '/' => Command::PreviewMode(Mode::IncrementalSearch),
        '<' => Command::Window(WindowOp::Top),
        '>' => Command::Window(WindowOp::Bottom),
        'v' => Command::Window(WindowOp::PageUp),
        '+' => Command::Window(WindowOp::Grow),
        '-' => Command::Window(WindowOp::Shrink),
        'j' => Command::Join,
        'd' => Command::DuplicateLine,
        'o' => Command::NewLine,
        't' => Command::Transpose(TransposeKind::LinesDown),
        'T' => Command::Transpose(TransposeKind::LinesUp),
        'f' => Command::Move(Motion::WordNext(WordClass::Alpha)),
        'b' => Command::Move(Motion::WordPrev(WordClass::Alpha)),
        'F' => Command::Move(Motion::WordNext(WordClass::Graph)),
        'B' => Command::Move(Motion::WordPrev(WordClass::Graph)),
        'h' => Command::Move(Motion::RowAbs(0)),
        'l' => Command::Move(Motion::RowEnd),
        ']' => Command::Move(Motion::ParaNext),
        '[' => Command::Move(Motion::ParaPrev),
        's' => Command::Save,
        'k' => Command::ToggleKeyword,
        'n' => Command::SearchNext,
        'p' => Command::SearchPrev,
        'r' => Command::RotateVariant,
        'u' => Command::Undo,
        'U' => Command::Redo,
        _ => return None,
    };
    Some(command)
}

fn control_command(c: char, previewing: bool) -> Option<Command> {
    let command = match c {
        'J' | 'M' if previewing => Command::CommitMode,
        'G' if previewing => Command::CancelMode,
        'N' => Command::Move(Motion::RowRel(1)),
        'P' => Command::Move(Motion::RowRel(-1)),
        'F' => Command::Move(Motion::CharRel(1)),
        'B' => Command::Move(Motion::CharRel(-1)),
        'A' => Command::Move(Motion::CharAbs(0)),
        'E' => Command::Move(Motion::CharEnd),
        'L' => Command::Window(WindowOp::CentreCursor),
        'V' => Command::Window(WindowOp::PageDown),
        'I' => Command::Indent,
        'O' => Command::Exdent,
        'J' | 'M' => Command::InsertNewLine { follow: true },
        'Y' => Command::InsertNewLine { follow: false },
        'T' => Command::Transpose(TransposeKind::Chars),
        'D' => Command::Delete(DeleteKind::Forward),
        'H' => Command::Delete(DeleteKind::Backward),
        'K' => Command::Delete(DeleteKind::ToLineEnd),
        'U' => Command::Delete(DeleteKind::ToLineStart),
        'X' => Command::Quit,
        _ => return None,
    };
    Some(command)
}
