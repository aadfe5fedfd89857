use bitflags::bitflags;
use crossterm::event::{
    KeyCode as CKeyCode, KeyEvent as CKeyEvent, KeyEventKind as CKeyEventKind,
    KeyModifiers as CKeyModifiers,
};

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct KeyModifiers: u8 {
        /// A control byte; the code holds the upper-case letter.
        const CTRL = 0b0000_0001;
        /// Prefixed by `ESC` (or Alt held down).
        const META = 0b0000_0010;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    Char(char),
    Esc,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
    Delete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyEvent {
    pub code: KeyCode,
    pub mods: KeyModifiers,
}

impl KeyEvent {
    pub fn new(code: KeyCode, mods: KeyModifiers) -> Self {
        Self { code, mods }
    }

    pub fn plain(c: char) -> Self {
        Self::new(KeyCode::Char(c), KeyModifiers::empty())
    }

    /// Control letter, e.g. `ctrl('N')`.
    pub fn ctrl(c: char) -> Self {
        Self::new(KeyCode::Char(c.to_ascii_uppercase()), KeyModifiers::CTRL)
    }

    pub fn meta(c: char) -> Self {
        Self::new(KeyCode::Char(c), KeyModifiers::META)
    }

    /// The control letter for a byte below 0x20 (`0x0E` is `Ctrl-N`).
    pub(crate) fn from_control_byte(b: u8) -> Self {
        Self::new(KeyCode::Char(char::from(b + b'@')), KeyModifiers::CTRL)
    }

    fn with_meta(mut self, mods: KeyModifiers) -> Self {
        self.mods |= mods & KeyModifiers::META;
        self
    }
}

/// Map a crossterm key event onto the editor's key vocabulary.
///
/// Enter, Tab and Backspace become the control letters a terminal sends for
/// them (`Ctrl-J`, `Ctrl-I`, `Ctrl-H`). Release events and keys without a
/// counterpart return `None`.
pub fn from_crossterm(event: &CKeyEvent) -> Option<KeyEvent> {
    if event.kind == CKeyEventKind::Release {
        return None;
    }
    let mut mods = map_mods(event.modifiers);
    let code = match event.code {
        CKeyCode::Char(c) if mods.contains(KeyModifiers::CTRL) => {
            KeyCode::Char(c.to_ascii_uppercase())
        }
        CKeyCode::Char(c) => KeyCode::Char(c),
        CKeyCode::Enter => return Some(KeyEvent::ctrl('J').with_meta(mods)),
        CKeyCode::Tab => return Some(KeyEvent::ctrl('I').with_meta(mods)),
        CKeyCode::Backspace => return Some(KeyEvent::ctrl('H').with_meta(mods)),
        CKeyCode::Esc => {
            mods = KeyModifiers::empty();
            KeyCode::Esc
        }
        CKeyCode::Up => KeyCode::Up,
        CKeyCode::Down => KeyCode::Down,
        CKeyCode::Left => KeyCode::Left,
        CKeyCode::Right => KeyCode::Right,
        CKeyCode::Home => KeyCode::Home,
        CKeyCode::End => KeyCode::End,
        CKeyCode::PageUp => KeyCode::PageUp,
        CKeyCode::PageDown => KeyCode::PageDown,
        CKeyCode::Delete => KeyCode::Delete,
        _ => return None,
    };
    Some(KeyEvent::new(code, mods))
}

pub(crate) fn map_mods(m: CKeyModifiers) -> KeyModifiers {
    let mut out = KeyModifiers::empty();
    if m.contains(CKeyModifiers::CONTROL) {
        out |= KeyModifiers::CTRL;
    }
    if m.intersects(CKeyModifiers::ALT | CKeyModifiers::META) {
        out |= KeyModifiers::META;
    }
    out
}
