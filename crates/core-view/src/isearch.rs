//! Live regex search over the buffer with an optional replacement.
//!
//! Typed characters extend the pattern instead of editing the buffer. The
//! pattern text is `regex` or `regex/replacement`; the replacement is
//! literal and only touches the buffer when the view is committed.

use core_render::{Frame, Role, Row};
use core_state::{EditorState, Mode};
use regex::{NoExpand, Regex};
use tracing::{debug, info};

use crate::filter;
use crate::furniture::mode_line;
use crate::{Outcome, ViewSettings, ViewStrategy, Window};

#[derive(Debug, Clone)]
pub struct IncrementalSearchView {
    window: Window,
    pattern: String,
    max_len: usize,
    compiled: Result<Regex, regex::Error>,
}

fn compile(pattern: &str) -> Result<Regex, regex::Error> {
    let source = pattern.split_once('/').map_or(pattern, |(re, _)| re);
    Regex::new(source)
}

impl IncrementalSearchView {
    pub fn new(settings: &ViewSettings) -> Self {
        Self {
            window: Window::new(settings),
            pattern: String::new(),
            max_len: settings.search_pattern_max,
            compiled: compile(""),
        }
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn replacement(&self) -> Option<&str> {
        self.pattern.split_once('/').map(|(_, r)| r)
    }

    fn set_pattern(&mut self, pattern: String) {
        self.compiled = compile(&pattern);
        if let Err(err) = &self.compiled {
            debug!(target: "view.isearch", pattern = %pattern, error = %err, "pattern_invalid");
        }
        self.pattern = pattern;
    }
}

fn keep<'a>(
    compiled: &'a Result<Regex, regex::Error>,
    state: &'a EditorState,
) -> impl Fn(usize) -> bool + 'a {
    move |i| match (compiled, state.buffer.get_line(i)) {
        (Ok(re), Some(text)) => re.is_match(text),
        _ => false,
    }
}

impl ViewStrategy for IncrementalSearchView {
    fn mode(&self) -> Mode {
        Mode::IncrementalSearch
    }

    fn window(&self) -> &Window {
        &self.window
    }

    fn window_mut(&mut self) -> &mut Window {
        &mut self.window
    }

    fn render(&self, state: &EditorState, frame: &mut Frame) {
        mode_line(frame, state, self.current_line(state), Mode::IncrementalSearch.as_str())
            .styled(Role::GreyBg, " ")
            .text(format!("[{}]", self.pattern));

        let re = match &self.compiled {
            Ok(re) => re,
            Err(err) => {
                let message = err.to_string();
                let summary = message.lines().last().unwrap_or_default().trim();
                frame
                    .row()
                    .styled(Role::Red, format!("invalid pattern: {summary}"));
                return;
            }
        };
        let replacement = self.replacement();
        let keep = keep(&self.compiled, state);
        filter::filtered_rows(frame, state, &self.window, &keep, |row, _, text, cursor| {
            let base = cursor.then_some(Role::GreyBg);
            let plain = |row: &mut Row, s: &str| {
                match base {
                    Some(role) => row.styled(role, s),
                    None => row.text(s),
                };
            };
            let mut last = 0;
            for m in re.find_iter(text) {
                plain(row, &text[last..m.start()]);
                match replacement {
                    Some(r) => row.styled(Role::Subst, r),
                    None => row.styled(Role::Highlight, m.as_str()),
                };
                last = m.end();
            }
            plain(row, &text[last..]);
            plain(row, "$");
        });
    }

    fn current_line(&self, state: &EditorState) -> isize {
        filter::current_line(&self.window, state, &keep(&self.compiled, state))
    }

    fn set_current_line(&mut self, _state: &EditorState, line: isize) {
        self.window.offset = line.max(0);
        self.window.row = 0;
    }

    /// Replace every match on every line when a replacement is present.
    fn commit(&mut self, state: &mut EditorState) -> Outcome {
        let (Ok(re), Some(replacement)) = (&self.compiled, self.replacement()) else {
            return Outcome::Applied;
        };
        let mut changed = 0usize;
        for i in 0..state.buffer.line_count() {
            let Some(text) = state.buffer.get_line(i) else {
                continue;
            };
            if !re.is_match(text) {
                continue;
            }
            let edited = re.replace_all(text, NoExpand(replacement)).into_owned();
            if state.buffer.replace_line(i, &edited) {
                changed += 1;
            }
        }
        info!(target: "view.isearch", pattern = %self.pattern, lines = changed, "replace_all");
        Outcome::Applied
    }

    fn cursor_move_row_abs(&mut self, state: &EditorState, row: isize) -> Outcome {
        filter::row_abs(&mut self.window, state, row, &keep(&self.compiled, state));
        Outcome::Applied
    }

    fn cursor_move_row_rel(&mut self, state: &EditorState, delta: isize) -> Outcome {
        filter::row_rel(&mut self.window, state, delta, &keep(&self.compiled, state));
        Outcome::Applied
    }

    fn cursor_move_row_end(&mut self, state: &EditorState) -> Outcome {
        let last = self.window.height - 1;
        self.cursor_move_row_abs(state, last)
    }

    /// Extend the pattern; characters that would exceed the byte bound are
    /// dropped.
    fn char_insert(&mut self, _state: &mut EditorState, c: char) -> Outcome {
        if self.pattern.len() + c.len_utf8() > self.max_len {
            return Outcome::Applied;
        }
        let mut pattern = std::mem::take(&mut self.pattern);
        pattern.push(c);
        self.set_pattern(pattern);
        Outcome::Applied
    }

    fn char_delete_backward(&mut self, _state: &mut EditorState) -> Outcome {
        let mut pattern = std::mem::take(&mut self.pattern);
        pattern.pop();
        self.set_pattern(pattern);
        Outcome::Applied
    }

    fn char_delete_to_bol(&mut self, _state: &mut EditorState) -> Outcome {
        self.set_pattern(String::new());
        Outcome::Applied
    }
}
