//! Colour roles and the palette that maps them to terminal styles.
//!
//! Views tag text with a `Role`; only the writer resolves roles to concrete
//! SGR sequences through a `Palette`, so frames stay comparable as plain text
//! in tests.

use crossterm::style::{Color, ContentStyle, Stylize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Role {
    /// Mode line and furniture rows below the text.
    Bottom,
    /// Character under the cursor.
    Cursor,
    /// End-of-line and overflow markers.
    Eol,
    Headline,
    /// Cursor row in filtered views and search matches.
    Highlight,
    Keyword,
    LineNr,
    Ruler,
    RulerIndex,
    /// Replacement text previewed by incremental search.
    Subst,
    TableBar,
    Grey,
    GreyBg,
    Red,
    Cyan,
}

#[derive(Clone, Debug)]
pub struct Palette {
    styles: Vec<(Role, ContentStyle)>,
}

fn fg(n: u8) -> ContentStyle {
    ContentStyle::new().with(Color::AnsiValue(n))
}

fn bg(n: u8) -> ContentStyle {
    ContentStyle::new().on(Color::AnsiValue(n))
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            styles: vec![
                (Role::Bottom, fg(62)),
                (Role::Cursor, fg(235).on(Color::AnsiValue(216))),
                (Role::Eol, fg(124)),
                (Role::Headline, bg(62)),
                (Role::Highlight, bg(56)),
                (Role::Keyword, fg(212)),
                (Role::LineNr, fg(61)),
                (Role::Ruler, fg(104)),
                (Role::RulerIndex, fg(154)),
                (Role::Subst, fg(122)),
                (Role::TableBar, fg(44)),
                (Role::Grey, fg(248)),
                (Role::GreyBg, bg(248)),
                (Role::Red, ContentStyle::new().with(Color::DarkRed)),
                (Role::Cyan, ContentStyle::new().with(Color::DarkCyan)),
            ],
        }
    }
}

impl Palette {
    pub fn style(&self, role: Role) -> ContentStyle {
        self.styles
            .iter()
            .find(|(r, _)| *r == role)
            .map(|(_, s)| *s)
            .unwrap_or_default()
    }
}
