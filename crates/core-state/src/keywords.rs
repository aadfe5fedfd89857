/// Highlighted keywords, kept in insertion order.
///
/// Owned by the editor state and handed to views and `Str` keyword scans by
/// reference.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeywordSet {
    words: Vec<String>,
}

impl KeywordSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `word` if absent, otherwise remove it. Returns true when added.
    /// Empty words are ignored.
    pub fn toggle(&mut self, word: &str) -> bool {
        if word.is_empty() {
            return false;
        }
        if let Some(i) = self.words.iter().position(|w| w == word) {
            self.words.remove(i);
            tracing::debug!(target: "state.keywords", count = self.words.len(), "keyword_removed");
            false
        } else {
            self.words.push(word.to_owned());
            tracing::debug!(target: "state.keywords", count = self.words.len(), "keyword_added");
            true
        }
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.iter().any(|w| w == word)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.words
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}
