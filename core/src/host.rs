//! Capability traits the embedding host implements.
//!
//! The engine never talks to a platform text field directly. The host hands
//! a `TextSurface` into each event call; lookups that need a dictionary or a
//! spell checker go through `CandidateProvider` and `SpellChecker`.

/// The text field the session writes into.
pub trait TextSurface {
    /// Insert text at the field's cursor.
    fn insert_text(&mut self, text: &str);
    /// Delete one character before the field's cursor.
    fn delete_backward(&mut self);
    /// Text before the field's cursor, as far back as the host exposes.
    fn text_before_cursor(&self) -> String;
}

/// Supplies reading-to-candidate conversions (e.g. kana to kanji).
pub trait CandidateProvider {
    /// Up to `max` candidates for `reading`, best first. Empty when none.
    fn convert(&self, reading: &str, max: usize) -> Vec<String>;
}

/// Word-level spell checking for auto-correction.
pub trait SpellChecker {
    fn is_misspelled(&self, word: &str) -> bool;
    /// Replacement guesses, best first. Empty when none.
    fn guesses(&self, word: &str) -> Vec<String>;
}

/// In-memory `TextSurface` for tests and demos.
#[derive(Debug, Default, Clone)]
pub struct MemorySurface {
    text: String,
}

impl MemorySurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

impl TextSurface for MemorySurface {
    fn insert_text(&mut self, text: &str) {
        self.text.push_str(text);
    }

    fn delete_backward(&mut self) {
        self.text.pop();
    }

    fn text_before_cursor(&self) -> String {
        self.text.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_surface_edits() {
        let mut surface = MemorySurface::new();
        surface.insert_text("ab");
        surface.insert_text("字");
        surface.delete_backward();
        assert_eq!(surface.text(), "ab");
        assert_eq!(surface.text_before_cursor(), "ab");
    }
}
