//! Word motions over a single line.
//!
//! Both functions work in character columns and return `None` when the
//! cursor should stay where it is.

use crate::{Str, WordClass};

fn in_class(line: &[Option<char>], i: usize, class: WordClass) -> bool {
    line.get(i).copied().flatten().is_some_and(|c| class.contains(c))
}

fn decode(line: Str<'_>) -> Vec<Option<char>> {
    line.chars().map(Result::ok).collect()
}

/// Column just past the next class boundary at or after `column`: the first
/// `i >= column` where `i` is outside the class and `i + 1` is inside.
pub fn word_next(line: Str<'_>, column: usize, class: WordClass) -> Option<usize> {
    let chars = decode(line);
    (column..chars.len())
        .find(|&i| !in_class(&chars, i, class) && in_class(&chars, i + 1, class))
        .map(|i| i + 1)
}

/// Start of the word before `column`. Falls back to column 0 when the
/// line itself starts with a word character.
pub fn word_prev(line: Str<'_>, column: usize, class: WordClass) -> Option<usize> {
    let chars = decode(line);
    let upper = column.min(chars.len());
    (1..upper)
        .rev()
        .find(|&i| !in_class(&chars, i - 1, class) && in_class(&chars, i, class))
        .or_else(|| (column > 0 && in_class(&chars, 0, class)).then_some(0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_word_start() {
        let line = Str::new("foo  bar-baz");
        assert_eq!(word_next(line, 0, WordClass::Alpha), Some(5));
        assert_eq!(word_next(line, 5, WordClass::Alpha), Some(9));
        assert_eq!(word_next(line, 5, WordClass::Graph), None);
        assert_eq!(word_next(line, 9, WordClass::Alpha), None);
    }

    #[test]
    fn prev_word_start() {
        let line = Str::new("foo  bar-baz");
        assert_eq!(word_prev(line, 12, WordClass::Alpha), Some(9));
        assert_eq!(word_prev(line, 9, WordClass::Alpha), Some(5));
        assert_eq!(word_prev(line, 9, WordClass::Graph), Some(5));
        assert_eq!(word_prev(line, 3, WordClass::Alpha), Some(0));
        assert_eq!(word_prev(line, 0, WordClass::Alpha), None);
        assert_eq!(word_prev(Str::new("  x"), 2, WordClass::Alpha), None);
    }
}
