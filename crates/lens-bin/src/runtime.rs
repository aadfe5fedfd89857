//! Blocking event loop: read a terminal event, dispatch, redraw.

use std::io::Write;

use anyhow::Result;
use core_actions::{Command, ModeController};
use core_config::{Config, ConfigContext};
use core_input::{ByteDecoder, KeyEvent, KeyTranslator, from_crossterm};
use core_render::{Frame, Palette, Writer};
use core_terminal::{AnsiTerminal, TerminalControl};
use crossterm::event::Event;
use tracing::{debug, info, trace};

pub struct EditorRuntime<W: Write> {
    ctl: ModeController,
    keys: KeyTranslator,
    paste: ByteDecoder,
    config: Config,
    frame: Frame,
    palette: Palette,
    out: AnsiTerminal<W>,
}

impl<W: Write> EditorRuntime<W> {
    pub fn new(ctl: ModeController, config: Config, out: W) -> Self {
        Self {
            ctl,
            keys: KeyTranslator::new(),
            paste: ByteDecoder::new(),
            config,
            frame: Frame::new(),
            palette: Palette::default(),
            out: AnsiTerminal::new(out),
        }
    }

    pub fn run(&mut self) -> Result<()> {
        self.out.clear_screen()?;
        self.draw()?;
        loop {
            let event = crossterm::event::read()?;
            if self.handle_event(event)? {
                info!(target: "runtime", dirty = self.ctl.state().buffer.is_dirty(), "quit");
                return Ok(());
            }
        }
    }

    /// Apply one terminal event, redrawing when something changed. Returns
    /// true once the session should end.
    pub fn handle_event(&mut self, event: Event) -> Result<bool> {
        let mut dirty = false;
        match event {
            Event::Key(key) => {
                if let Some(key) = from_crossterm(&key) {
                    let (changed, quit) = self.apply_key(key);
                    if quit {
                        return Ok(true);
                    }
                    dirty |= changed;
                }
            }
            Event::Paste(text) => {
                trace!(target: "runtime", bytes = text.len(), "paste");
                for key in self.paste.feed(text.as_bytes()) {
                    let (changed, quit) = self.apply_key(key);
                    if quit {
                        return Ok(true);
                    }
                    dirty |= changed;
                }
            }
            Event::Resize(columns, rows) => {
                dirty = self.resize(columns, rows).dirty;
            }
            other => {
                trace!(target: "runtime", event = ?other, "event_ignored");
            }
        }
        if dirty {
            self.draw()?;
        }
        Ok(false)
    }

    fn apply_key(&mut self, key: KeyEvent) -> (bool, bool) {
        let Some(command) = self.keys.translate(key, self.ctl.is_previewing()) else {
            return (false, false);
        };
        let result = self.ctl.dispatch(command);
        (result.dirty, result.quit)
    }

    fn resize(&mut self, columns: u16, rows: u16) -> core_actions::DispatchResult {
        let ctx = ConfigContext::new(columns, rows);
        if let Some(effective) = self.config.recompute_with_context(ctx) {
            debug!(target: "runtime", reserved_rows = effective.reserved_rows, "view_config_changed");
        }
        let reserved = self
            .config
            .effective
            .map_or(self.config.file.view.reserved_rows, |e| e.reserved_rows);
        self.ctl.dispatch(Command::Resize {
            width: usize::from(columns),
            height: usize::from(rows.saturating_sub(reserved).max(1)),
        })
    }

    fn draw(&mut self) -> Result<()> {
        self.ctl.render(&mut self.frame);
        Writer::from_frame(&self.frame).flush(&mut self.out, &self.palette)
    }

    pub fn controller(&self) -> &ModeController {
        &self.ctl
    }

    pub fn output(&self) -> &W {
        self.out.get_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_state::{EditorState, Mode, TextBuffer};
    use core_view::ViewSettings;
    use crossterm::event::{KeyCode, KeyEvent as CKeyEvent, KeyModifiers};
    use pretty_assertions::assert_eq;

    fn runtime(lines: &[&str]) -> EditorRuntime<Vec<u8>> {
        let state = EditorState::new(TextBuffer::from_lines("r.txt", lines.iter().copied()));
        let settings = ViewSettings {
            width: 40,
            height: 4,
            ..ViewSettings::default()
        };
        let ctl = ModeController::new(state, Mode::Plain, settings);
        EditorRuntime::new(ctl, Config::default(), Vec::new())
    }

    fn key(code: KeyCode, mods: KeyModifiers) -> Event {
        Event::Key(CKeyEvent::new(code, mods))
    }

    fn lines(rt: &EditorRuntime<Vec<u8>>) -> Vec<String> {
        rt.controller()
            .state()
            .buffer
            .lines()
            .iter()
            .map(|l| l.to_string())
            .collect()
    }

    #[test]
    fn keys_edit_and_redraw() {
        let mut rt = runtime(&["abc"]);
        assert!(!rt.handle_event(key(KeyCode::Char('x'), KeyModifiers::NONE)).unwrap());
        assert_eq!(lines(&rt), vec!["xabc"]);
        let drawn = String::from_utf8_lossy(rt.output()).into_owned();
        assert!(drawn.contains("== r.txt *"), "{drawn}");
    }

    #[test]
    fn esc_then_key_is_meta() {
        let mut rt = runtime(&["a", "b"]);
        rt.handle_event(key(KeyCode::Esc, KeyModifiers::NONE)).unwrap();
        rt.handle_event(key(KeyCode::Char('t'), KeyModifiers::NONE)).unwrap();
        assert_eq!(lines(&rt), vec!["b", "a"]);
    }

    #[test]
    fn paste_goes_through_the_byte_decoder() {
        let mut rt = runtime(&[""]);
        rt.handle_event(Event::Paste("ab\ncd".into())).unwrap();
        assert_eq!(lines(&rt), vec!["ab", "cd"]);
    }

    #[test]
    fn resize_reserves_furniture_rows() {
        let mut rt = runtime(&["a"]);
        rt.handle_event(Event::Resize(50, 20)).unwrap();
        let window = rt.controller().view().window();
        assert_eq!((window.width, window.height), (50, 14));
    }

    #[test]
    fn ctrl_x_ends_the_session() {
        let mut rt = runtime(&["a"]);
        assert!(rt.handle_event(key(KeyCode::Char('x'), KeyModifiers::CONTROL)).unwrap());
    }
}
