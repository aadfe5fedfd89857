#![allow(dead_code)]

use std::io::Write;
use std::sync::{Arc, Mutex, MutexGuard};

use core_actions::{Command, ModeController};
use core_state::{EditorState, Mode, TextBuffer};
use core_view::ViewSettings;
use tracing::Level;
use tracing::subscriber::with_default;
use tracing_subscriber::fmt::MakeWriter;

pub fn controller(lines: &[&str], mode: Mode) -> ModeController {
    let state = EditorState::new(TextBuffer::from_lines("t.txt", lines.iter().copied()));
    let settings = ViewSettings {
        width: 60,
        height: 5,
        ..ViewSettings::default()
    };
    ModeController::new(state, mode, settings)
}

pub fn lines(ctl: &ModeController) -> Vec<String> {
    ctl.state()
        .buffer
        .lines()
        .iter()
        .map(|l| l.to_string())
        .collect()
}

pub fn type_text(ctl: &mut ModeController, text: &str) {
    for c in text.chars() {
        ctl.dispatch(Command::InsertChar(c));
    }
}

#[derive(Clone)]
struct BufferWriter {
    inner: Arc<Mutex<Vec<u8>>>,
}

struct LockedWriter<'a> {
    guard: MutexGuard<'a, Vec<u8>>,
}

impl Write for LockedWriter<'_> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.guard.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for BufferWriter {
    type Writer = LockedWriter<'a>;

    fn make_writer(&'a self) -> Self::Writer {
        LockedWriter {
            guard: self.inner.lock().expect("log buffer poisoned"),
        }
    }
}

/// Run `f` with an INFO-level subscriber and return what it logged.
pub fn capture_logs(f: impl FnOnce()) -> String {
    let buffer = Arc::new(Mutex::new(Vec::new()));
    let writer = BufferWriter {
        inner: buffer.clone(),
    };
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .with_target(true)
        .with_ansi(false)
        .without_time()
        .with_writer(writer)
        .finish();
    with_default(subscriber, f);
    let bytes = buffer.lock().unwrap().clone();
    String::from_utf8(bytes).unwrap()
}
