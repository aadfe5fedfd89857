use std::fmt;

/// Presentation mode of the editor. Each mode maps to one view strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Mode {
    #[default]
    Plain,
    Table,
    Paragraph,
    IncrementalSearch,
    Block,
}

impl Mode {
    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Plain => "plain",
            Mode::Table => "table",
            Mode::Paragraph => "par",
            Mode::IncrementalSearch => "isearch",
            Mode::Block => "block",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
