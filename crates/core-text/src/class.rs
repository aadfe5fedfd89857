//! Character classes and indentation measures.

/// Predicate used by word motions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WordClass {
    /// Letters only.
    Alpha,
    /// Any printable, non-space character.
    Graph,
}

impl WordClass {
    pub fn contains(self, c: char) -> bool {
        match self {
            WordClass::Alpha => c.is_alphabetic(),
            WordClass::Graph => !c.is_whitespace() && !c.is_control(),
        }
    }
}

/// Count of leading ASCII spaces.
pub fn leading_spaces(line: &str) -> usize {
    line.bytes().take_while(|b| *b == b' ').count()
}

/// True when the line is empty or holds only spaces.
pub fn is_blank(line: &str) -> bool {
    leading_spaces(line) == line.len()
}

/// Indentation used by the block filter: an all-space line counts as 0.
pub fn block_indent(line: &str) -> usize {
    if is_blank(line) { 0 } else { leading_spaces(line) }
}
