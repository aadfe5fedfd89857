//! Terminal backend abstraction and crossterm implementation.
//!
//! Two seams live here: `TerminalBackend` owns the session-level state (raw
//! mode, alternate screen, size query) and `TerminalControl` is the small set
//! of output controls the frame writer needs on top of plain `Write`.

use anyhow::Result;
use crossterm::{
    cursor::{Hide, MoveRight, MoveTo, RestorePosition, SavePosition, Show},
    event::{DisableBracketedPaste, EnableBracketedPaste},
    execute, queue,
    style::Print,
    terminal::{
        Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode,
        enable_raw_mode,
    },
};
use std::io::{self, Write, stdout};

pub trait TerminalBackend {
    fn enter(&mut self) -> Result<()>;
    fn leave(&mut self) -> Result<()>;
    /// `(columns, rows)`.
    fn size(&self) -> Result<(u16, u16)>;
}

/// Output controls used while drawing a frame. Implementations queue the
/// escape sequences; nothing reaches the terminal before `flush`.
pub trait TerminalControl: Write {
    fn clear_screen(&mut self) -> Result<()>;
    fn clear_to_eol(&mut self) -> Result<()>;
    fn clear_below(&mut self) -> Result<()>;
    fn move_home(&mut self) -> Result<()>;
    fn next_line(&mut self) -> Result<()>;
    fn save_cursor(&mut self) -> Result<()>;
    fn restore_cursor(&mut self) -> Result<()>;
    fn cursor_forward(&mut self, columns: u16) -> Result<()>;
}

/// `TerminalControl` over any writer using ANSI sequences.
pub struct AnsiTerminal<W: Write> {
    out: W,
}

impl<W: Write> AnsiTerminal<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn get_ref(&self) -> &W {
        &self.out
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Write for AnsiTerminal<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.out.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }
}

impl<W: Write> TerminalControl for AnsiTerminal<W> {
    fn clear_screen(&mut self) -> Result<()> {
        queue!(self.out, Clear(ClearType::All), MoveTo(0, 0))?;
        Ok(())
    }

    fn clear_to_eol(&mut self) -> Result<()> {
        queue!(self.out, Clear(ClearType::UntilNewLine))?;
        Ok(())
    }

    fn clear_below(&mut self) -> Result<()> {
        queue!(self.out, Clear(ClearType::FromCursorDown))?;
        Ok(())
    }

    fn move_home(&mut self) -> Result<()> {
        queue!(self.out, MoveTo(0, 0))?;
        Ok(())
    }

    fn next_line(&mut self) -> Result<()> {
        // Raw mode: no implicit carriage return on '\n'.
        queue!(self.out, Print("\r\n"))?;
        Ok(())
    }

    fn save_cursor(&mut self) -> Result<()> {
        queue!(self.out, SavePosition)?;
        Ok(())
    }

    fn restore_cursor(&mut self) -> Result<()> {
        queue!(self.out, RestorePosition)?;
        Ok(())
    }

    fn cursor_forward(&mut self, columns: u16) -> Result<()> {
        if columns > 0 {
            queue!(self.out, MoveRight(columns))?;
        }
        Ok(())
    }
}

pub struct CrosstermBackend {
    entered: bool,
}

/// RAII guard ensuring terminal state restoration even if caller early-returns or panics.
pub struct TerminalGuard<'a> {
    backend: &'a mut CrosstermBackend,
    active: bool,
}

impl Default for CrosstermBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl CrosstermBackend {
    pub fn new() -> Self {
        Self { entered: false }
    }

    /// Enter and return a guard that will leave on drop.
    pub fn enter_guard(&mut self) -> Result<TerminalGuard<'_>> {
        self.enter()?;
        Ok(TerminalGuard {
            backend: self,
            active: true,
        })
    }
}

impl TerminalGuard<'_> {
    pub fn size(&self) -> Result<(u16, u16)> {
        self.backend.size()
    }
}

impl TerminalBackend for CrosstermBackend {
    fn enter(&mut self) -> Result<()> {
        if !self.entered {
            enable_raw_mode()?;
            execute!(
                stdout(),
                EnterAlternateScreen,
                EnableBracketedPaste,
                Hide,
                Clear(ClearType::All)
            )?;
            self.entered = true;
        }
        Ok(())
    }

    fn leave(&mut self) -> Result<()> {
        if self.entered {
            execute!(stdout(), DisableBracketedPaste, LeaveAlternateScreen, Show)?;
            disable_raw_mode()?;
            self.entered = false;
        }
        Ok(())
    }

    fn size(&self) -> Result<(u16, u16)> {
        Ok(crossterm::terminal::size()?)
    }
}

impl Drop for CrosstermBackend {
    fn drop(&mut self) {
        let _ = self.leave();
    }
}

impl<'a> Drop for TerminalGuard<'a> {
    fn drop(&mut self) {
        if self.active {
            let _ = self.backend.leave();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn emitted(f: impl FnOnce(&mut AnsiTerminal<Vec<u8>>) -> Result<()>) -> String {
        let mut term = AnsiTerminal::new(Vec::new());
        f(&mut term).unwrap();
        String::from_utf8(term.into_inner()).unwrap()
    }

    #[test]
    fn controls_emit_ansi_sequences() {
        assert_eq!(emitted(|t| t.clear_to_eol()), "\x1b[K");
        assert_eq!(emitted(|t| t.move_home()), "\x1b[1;1H");
        assert_eq!(emitted(|t| t.cursor_forward(4)), "\x1b[4C");
        assert_eq!(emitted(|t| t.next_line()), "\r\n");
    }

    #[test]
    fn zero_forward_emits_nothing() {
        assert_eq!(emitted(|t| t.cursor_forward(0)), "");
    }
}
