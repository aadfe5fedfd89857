//! Character variant groups used by `char_rotate_variant`.
//!
//! A group is an ordered cycle of characters: rotating replaces a character
//! with the one after it, wrapping at the end of the group.

use tracing::warn;

const BUILTIN: &[&str] = &[
    "aàáâäãåā",
    "AÀÁÂÄÃÅĀ",
    "eèéêëē",
    "EÈÉÊËĒ",
    "iìíîïī",
    "IÌÍÎÏĪ",
    "oòóôöõøō",
    "OÒÓÔÖÕØŌ",
    "uùúûüū",
    "UÙÚÛÜŪ",
    "cç",
    "CÇ",
    "nñ",
    "NÑ",
    "sš",
    "SŠ",
    "zž",
    "ZŽ",
    "yýÿ",
    "YÝ",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantTable {
    groups: Vec<Vec<char>>,
}

impl Default for VariantTable {
    fn default() -> Self {
        Self::with_groups(std::iter::empty::<&str>())
    }
}

impl VariantTable {
    /// Built-in groups followed by `extra`. A character keeps the first
    /// group it appears in; later groups naming it are ignored for that
    /// character.
    pub fn with_groups<I, S>(extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut groups: Vec<Vec<char>> = BUILTIN.iter().map(|g| g.chars().collect()).collect();
        for group in extra {
            let chars: Vec<char> = group.as_ref().chars().collect();
            if chars.len() < 2 {
                warn!(target: "view.variants", group = group.as_ref(), "variant_group_too_short");
                continue;
            }
            groups.push(chars);
        }
        Self { groups }
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Successor of `c` in its group.
    pub fn next(&self, c: char) -> Option<char> {
        self.groups.iter().find_map(|group| {
            let i = group.iter().position(|&g| g == c)?;
            Some(group[(i + 1) % group.len()])
        })
    }
}
