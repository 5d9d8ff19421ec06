//! Suggestion candidates surfaced to the host's suggestion bar.

use serde::{Deserialize, Serialize};

/// What accepting the suggestion does to the buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionKind {
    /// Replaces the composing text in place (kana to kanji, spelling fix).
    Conversion,
    /// Replaces the whole confirmed text with a rewrite in another language.
    Translation,
}

/// One candidate shown in the suggestion bar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    /// Text inserted when the candidate is accepted
    pub text: String,
    /// Source text the candidate replaces
    pub original_text: String,
    pub kind: SuggestionKind,
}

impl Suggestion {
    pub fn conversion(text: impl Into<String>, original: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            original_text: original.into(),
            kind: SuggestionKind::Conversion,
        }
    }

    pub fn translation(text: impl Into<String>, original: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            original_text: original.into(),
            kind: SuggestionKind::Translation,
        }
    }
}
