//! Debounced suggestion requests with latest-request-wins delivery.
//!
//! The session never sleeps or performs lookups itself. Each relevant
//! change yields at most one [`SuggestionRequest`] carrying a token and a
//! delay; the host waits out the delay, re-checks the token, then fulfils
//! the request. Results carrying a superseded token are dropped.

use composekit_core::{Mode, RequestToken};
use std::time::Duration;

/// Characters that end a sentence for correction purposes.
pub const SENTENCE_BOUNDARIES: [char; 7] = ['.', '!', '?', '。', '！', '？', '\n'];

/// Minimum sentence length before corrections are requested.
pub fn min_correction_len(mode: Mode) -> usize {
    match mode {
        Mode::EnglishCorrection => 5,
        _ => 2,
    }
}

/// What the host should look up once the delay has passed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestKind {
    /// Kana-to-kanji candidates for the composing text (local provider).
    Conversion { composing: String },
    /// Sentence rewrite candidates (remote service).
    Correction { sentence: String },
    /// Whole-text translation (remote service).
    Translation { text: String },
}

/// One scheduled lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestionRequest {
    pub token: RequestToken,
    pub delay: Duration,
    pub kind: RequestKind,
}

/// The sentence being typed: everything after the last boundary, trimmed.
pub fn current_sentence(before: &str) -> String {
    let tail = match before.rfind(|c| SENTENCE_BOUNDARIES.contains(&c)) {
        Some(pos) => {
            let boundary_len = before[pos..].chars().next().map_or(0, char::len_utf8);
            &before[pos + boundary_len..]
        }
        None => before,
    };
    tail.trim().to_string()
}

/// Staged debounce keyed on what was just typed: a boundary fires
/// immediately, a space soon, anything else waits for the typing pause.
pub fn correction_delay(before: &str) -> Duration {
    match before.chars().last() {
        Some(last) if SENTENCE_BOUNDARIES.contains(&last) => Duration::ZERO,
        Some(' ') => Duration::from_millis(200),
        _ => Duration::from_millis(800),
    }
}
