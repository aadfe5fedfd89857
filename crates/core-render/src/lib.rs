//! Frame model and emission.
//!
//! A view renders into a [`Frame`]: an ordered list of rows, each a sequence
//! of text segments optionally tagged with a colour [`Role`]. Rows may carry
//! overlays, short strings drawn at an absolute column after the row's text
//! (the ruler's cursor marker uses this). The [`writer`] turns a frame into
//! terminal output through `core_terminal::TerminalControl`.
//!
//! Frames are plain data so tests can compare `Frame::plain_lines()` without
//! caring about escape sequences.

pub mod style;
pub mod writer;

pub use style::{Palette, Role};
pub use writer::Writer;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Segment {
    pub role: Option<Role>,
    pub text: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Overlay {
    pub column: usize,
    pub role: Option<Role>,
    pub text: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Row {
    pub segments: Vec<Segment>,
    pub overlays: Vec<Overlay>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&mut self, text: impl Into<String>) -> &mut Self {
        self.push(None, text.into())
    }

    pub fn styled(&mut self, role: Role, text: impl Into<String>) -> &mut Self {
        self.push(Some(role), text.into())
    }

    pub fn overlay(&mut self, column: usize, role: Role, text: impl Into<String>) -> &mut Self {
        self.overlays.push(Overlay {
            column,
            role: Some(role),
            text: text.into(),
        });
        self
    }

    fn push(&mut self, role: Option<Role>, text: String) -> &mut Self {
        if text.is_empty() {
            return self;
        }
        match self.segments.last_mut() {
            Some(last) if last.role == role => last.text.push_str(&text),
            _ => self.segments.push(Segment { role, text }),
        }
        self
    }

    /// Row text without styling, overlays applied by character column.
    pub fn plain(&self) -> String {
        let mut chars: Vec<char> = self
            .segments
            .iter()
            .flat_map(|s| s.text.chars())
            .collect();
        for overlay in &self.overlays {
            for (i, c) in overlay.text.chars().enumerate() {
                let at = overlay.column + i;
                if chars.len() <= at {
                    chars.resize(at + 1, ' ');
                }
                chars[at] = c;
            }
        }
        chars.into_iter().collect()
    }

    /// Text of all segments tagged with `role`, in order.
    pub fn text_with_role(&self, role: Role) -> Vec<&str> {
        self.segments
            .iter()
            .filter(|s| s.role == Some(role))
            .map(|s| s.text.as_str())
            .collect()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Frame {
    rows: Vec<Row>,
}

impl Frame {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new row and return it for filling.
    pub fn row(&mut self) -> &mut Row {
        self.rows.push(Row::new());
        let last = self.rows.len() - 1;
        &mut self.rows[last]
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn clear(&mut self) {
        self.rows.clear();
    }

    pub fn plain_lines(&self) -> Vec<String> {
        self.rows.iter().map(Row::plain).collect()
    }
}
