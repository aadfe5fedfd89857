//! Terminal writer: batches a frame into terminal commands and flushes once.
//!
//! Invariants:
//! * Commands preserve ordering; no flushing mid-frame.
//! * Every row is followed by a clear-to-end-of-line so shorter rows never
//!   leave residue from the previous frame; the area below the last row is
//!   cleared as well.
//! * Overlays are drawn after the row text with the cursor saved and
//!   restored around them.

use anyhow::Result;
use core_terminal::TerminalControl;
use crossterm::{
    queue,
    style::{Print, PrintStyledContent},
};

use crate::{Frame, Palette, Role};

#[derive(Debug, PartialEq, Eq)]
pub enum Command {
    Home,
    Print(String),
    Styled(Role, String),
    ClearEol,
    SaveCursor,
    RestoreCursor,
    CarriageReturn,
    Forward(u16),
    NextLine,
    ClearBelow,
}

#[derive(Default)]
pub struct Writer {
    cmds: Vec<Command>,
}

impl Writer {
    pub fn new() -> Self {
        Self { cmds: Vec::new() }
    }

    pub fn from_frame(frame: &Frame) -> Self {
        let mut w = Self::new();
        w.cmds.push(Command::Home);
        for (i, row) in frame.rows().iter().enumerate() {
            if i > 0 {
                w.cmds.push(Command::NextLine);
            }
            for seg in &row.segments {
                w.cmds.push(match seg.role {
                    Some(role) => Command::Styled(role, seg.text.clone()),
                    None => Command::Print(seg.text.clone()),
                });
            }
            w.cmds.push(Command::ClearEol);
            for overlay in &row.overlays {
                w.cmds.push(Command::SaveCursor);
                w.cmds.push(Command::CarriageReturn);
                w.cmds.push(Command::Forward(
                    u16::try_from(overlay.column).unwrap_or(u16::MAX),
                ));
                w.cmds.push(match overlay.role {
                    Some(role) => Command::Styled(role, overlay.text.clone()),
                    None => Command::Print(overlay.text.clone()),
                });
                w.cmds.push(Command::RestoreCursor);
            }
        }
        w.cmds.push(Command::NextLine);
        w.cmds.push(Command::ClearBelow);
        w
    }

    pub fn commands(&self) -> &[Command] {
        &self.cmds
    }

    pub fn flush<T: TerminalControl>(self, out: &mut T, palette: &Palette) -> Result<()> {
        let count = self.cmds.len();
        for c in self.cmds {
            match c {
                Command::Home => out.move_home()?,
                Command::Print(s) => queue!(out, Print(s))?,
                Command::Styled(role, s) => {
                    queue!(out, PrintStyledContent(palette.style(role).apply(s)))?
                }
                Command::ClearEol => out.clear_to_eol()?,
                Command::SaveCursor => out.save_cursor()?,
                Command::RestoreCursor => out.restore_cursor()?,
                Command::CarriageReturn => queue!(out, Print('\r'))?,
                Command::Forward(n) => out.cursor_forward(n)?,
                Command::NextLine => out.next_line()?,
                Command::ClearBelow => out.clear_below()?,
            }
        }
        out.flush()?;
        tracing::trace!(target: "render.writer", commands = count, "frame_flushed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_terminal::AnsiTerminal;
    use pretty_assertions::assert_eq;

    #[test]
    fn frame_translates_to_ordered_commands() {
        let mut frame = Frame::new();
        frame.row().text("ab").styled(Role::Eol, "$");
        frame.row().text("--").overlay(1, Role::RulerIndex, "*");
        let w = Writer::from_frame(&frame);
        assert_eq!(
            w.commands(),
            &[
                Command::Home,
                Command::Print("ab".into()),
                Command::Styled(Role::Eol, "$".into()),
                Command::ClearEol,
                Command::NextLine,
                Command::Print("--".into()),
                Command::ClearEol,
                Command::SaveCursor,
                Command::CarriageReturn,
                Command::Forward(1),
                Command::Styled(Role::RulerIndex, "*".into()),
                Command::RestoreCursor,
                Command::NextLine,
                Command::ClearBelow,
            ]
        );
    }

    #[test]
    fn flush_emits_text_and_sgr() {
        let mut frame = Frame::new();
        frame.row().text("hi").styled(Role::Keyword, "kw");
        let mut term = AnsiTerminal::new(Vec::new());
        Writer::from_frame(&frame)
            .flush(&mut term, &Palette::default())
            .unwrap();
        let out = String::from_utf8(term.into_inner()).unwrap();
        assert!(out.starts_with("\x1b[1;1Hhi"));
        assert!(out.contains("\x1b[38;5;212m"));
        assert!(out.contains("kw"));
        assert!(out.contains("\x1b[K"));
    }
}
