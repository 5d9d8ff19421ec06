//! Recoverable auto-correction and auto-conversion.
//!
//! Both trackers apply a rewrite speculatively and keep a receipt so the
//! very next backspace can restore the user's original text. A receipt is
//! valid only while the surrounding text still matches what the rewrite
//! produced; anything else invalidates it and backspace falls through to
//! its normal behavior.

use composekit_core::{CandidateProvider, ComposingBuffer, CorrectionStrength, SpellChecker,
    Suggestion, SuggestionKind, TextSurface};
use tracing::debug;

/// Receipt for one applied English word correction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorrectionRecord {
    pub original_word: String,
    pub corrected_word: String,
    pub delimiter: String,
}

/// Receipt for one applied Japanese kana-to-kanji conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionRecord {
    pub previous_confirmed: String,
    pub original_composing: String,
    pub converted_text: String,
}

/// Word-level English auto-correction, applied when a delimiter is typed.
#[derive(Debug, Default)]
pub struct EnglishAutoCorrector {
    pending: Option<CorrectionRecord>,
}

impl EnglishAutoCorrector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear_pending(&mut self) {
        self.pending = None;
    }

    /// Correct the word before the cursor and insert `delimiter` after it.
    ///
    /// Returns whether a correction was applied; when it was, the
    /// delimiter has already been inserted.
    pub fn apply_before_delimiter(
        &mut self,
        surface: &mut dyn TextSurface,
        checker: &dyn SpellChecker,
        strength: CorrectionStrength,
        delimiter: &str,
    ) -> bool {
        if strength == CorrectionStrength::Off {
            return false;
        }
        let before = surface.text_before_cursor();
        let Some(original) = extract_last_word(&before) else {
            return false;
        };
        if !checker.is_misspelled(&original) {
            return false;
        }
        let guesses = checker.guesses(&original);
        let Some(corrected) = best_guess(&original, &guesses, strength) else {
            return false;
        };
        if corrected.eq_ignore_ascii_case(&original) {
            return false;
        }

        for _ in 0..original.chars().count() {
            surface.delete_backward();
        }
        surface.insert_text(&corrected);
        surface.insert_text(delimiter);
        debug!(%original, %corrected, "applied auto-correction");

        self.pending = Some(CorrectionRecord {
            original_word: original,
            corrected_word: corrected,
            delimiter: delimiter.to_string(),
        });
        true
    }

    /// Restore the original word if the correction is still the exact
    /// suffix of the text. The delimiter is removed, not re-added.
    pub fn undo(&mut self, surface: &mut dyn TextSurface) -> bool {
        let Some(pending) = self.pending.take() else {
            return false;
        };
        let before = surface.text_before_cursor();
        let expected = format!("{}{}", pending.corrected_word, pending.delimiter);
        if !before.ends_with(&expected) {
            debug!("auto-correction receipt stale, dropping");
            return false;
        }
        for _ in 0..expected.chars().count() {
            surface.delete_backward();
        }
        surface.insert_text(&pending.original_word);
        debug!(original = %pending.original_word, "undid auto-correction");
        true
    }
}

/// Japanese auto-conversion applied at confirm time.
#[derive(Debug, Default)]
pub struct JapaneseAutoConverter {
    pending: Option<ConversionRecord>,
}

impl JapaneseAutoConverter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear_pending(&mut self) {
        self.pending = None;
    }

    /// Pick the conversion to auto-apply for `composing`, if any.
    ///
    /// Already-fetched conversion suggestions take priority over a fresh
    /// provider lookup. Under `Conservative` the candidate must stay
    /// within 2 characters of the source length.
    pub fn preferred_conversion(
        &self,
        composing: &str,
        suggestions: &[Suggestion],
        provider: &dyn CandidateProvider,
        strength: CorrectionStrength,
    ) -> Option<String> {
        if strength == CorrectionStrength::Off {
            return None;
        }
        if !composing.chars().any(composekit_kana::modifiers::is_hiragana) {
            return None;
        }

        let existing: Vec<String> = suggestions
            .iter()
            .filter(|s| s.kind == SuggestionKind::Conversion)
            .map(|s| s.text.clone())
            .collect();
        let candidates = if existing.is_empty() {
            provider.convert(composing, 1)
        } else {
            existing
        };

        let best = candidates.into_iter().next()?;
        if best == composing {
            return None;
        }
        if strength == CorrectionStrength::Conservative {
            let delta = best.chars().count().abs_diff(composing.chars().count());
            if delta > 2 {
                return None;
            }
        }
        Some(best)
    }

    /// Record a conversion that was just committed.
    pub fn record(&mut self, record: ConversionRecord) {
        debug!(converted = %record.converted_text, "applied auto-conversion");
        self.pending = Some(record);
    }

    /// Reopen the converted text as composing. Only valid while the
    /// cursor sits at the logical end, composing is empty and the
    /// confirmed text is exactly what the conversion produced.
    pub fn undo(&mut self, buffer: &mut ComposingBuffer) -> bool {
        let Some(pending) = self.pending.take() else {
            return false;
        };
        if buffer.cursor().is_some() || !buffer.composing().is_empty() {
            self.pending = Some(pending);
            return false;
        }
        let expected = format!("{}{}", pending.previous_confirmed, pending.converted_text);
        if buffer.confirmed() != expected {
            debug!("auto-conversion receipt stale, dropping");
            return false;
        }
        buffer.set_confirmed(&pending.previous_confirmed);
        buffer.set_composing(&pending.original_composing);
        debug!(composing = %pending.original_composing, "undid auto-conversion");
        true
    }
}

/// The word immediately before the cursor: at least 2 chars, ASCII
/// letters with apostrophes allowed, and directly adjacent to the cursor.
fn extract_last_word(text: &str) -> Option<String> {
    let chars: Vec<char> = text.chars().collect();
    if chars.is_empty() || chars[chars.len() - 1].is_whitespace() {
        return None;
    }
    let mut start = chars.len();
    while start > 0 && is_word_char(chars[start - 1]) {
        start -= 1;
    }
    let word: String = chars[start..].iter().collect();
    if word.chars().count() < 2 {
        return None;
    }
    if !word.chars().any(|c| c.is_ascii_alphabetic()) {
        return None;
    }
    if !word.chars().all(is_word_char) {
        return None;
    }
    Some(word)
}

fn is_word_char(ch: char) -> bool {
    ch.is_ascii_alphabetic() || ch == '\''
}

/// Best guess within the strength's edit-distance budget, ranked by
/// distance then length, with its case matched to the original word.
fn best_guess(original: &str, guesses: &[String], strength: CorrectionStrength) -> Option<String> {
    let max_distance = match strength {
        CorrectionStrength::Off => return None,
        CorrectionStrength::Conservative => 1,
        CorrectionStrength::Aggressive => 2.max(original.chars().count() / 3),
    };

    let original_lower = original.to_lowercase();
    let mut ranked: Vec<(usize, usize, &String)> = guesses
        .iter()
        .filter(|g| !g.is_empty() && g.chars().all(is_word_char))
        .map(|g| {
            (
                edit_distance(&original_lower, &g.to_lowercase()),
                g.chars().count(),
                g,
            )
        })
        .collect();
    ranked.sort_by(|a, b| a.0.cmp(&b.0).then(a.1.cmp(&b.1)));

    let selected = ranked
        .into_iter()
        .find(|&(distance, _, _)| distance <= max_distance)
        .map(|(_, _, g)| g)?;
    Some(match_case(selected, original))
}

/// Apply the original word's case pattern to the guess.
fn match_case(guess: &str, original: &str) -> String {
    if original == "i" || original == "I" {
        return "I".to_string();
    }
    if original.chars().count() > 1 && original == original.to_uppercase() {
        return guess.to_uppercase();
    }
    let mut original_chars = original.chars();
    if let Some(first) = original_chars.next() {
        let rest: String = original_chars.collect();
        if first.is_uppercase() && rest == rest.to_lowercase() {
            let mut out = String::new();
            let mut guess_chars = guess.chars();
            if let Some(g) = guess_chars.next() {
                out.extend(g.to_uppercase());
            }
            out.push_str(&guess_chars.as_str().to_lowercase());
            return out;
        }
    }
    guess.to_lowercase()
}

/// Levenshtein distance over chars, single rolling row.
pub(crate) fn edit_distance(lhs: &str, rhs: &str) -> usize {
    let lhs: Vec<char> = lhs.chars().collect();
    let rhs: Vec<char> = rhs.chars().collect();
    if lhs.is_empty() {
        return rhs.len();
    }
    if rhs.is_empty() {
        return lhs.len();
    }

    let mut previous: Vec<usize> = (0..=rhs.len()).collect();
    for (i, &lch) in lhs.iter().enumerate() {
        let mut current = vec![0; rhs.len() + 1];
        current[0] = i + 1;
        for (j, &rch) in rhs.iter().enumerate() {
            let cost = usize::from(lch != rch);
            current[j + 1] = (previous[j + 1] + 1)
                .min(current[j] + 1)
                .min(previous[j] + cost);
        }
        previous = current;
    }
    previous[rhs.len()]
}

#[cfg(test)]
mod tests {
    use super::*;
    use composekit_core::MemorySurface;
    use std::collections::HashMap;

    struct MapChecker {
        guesses: HashMap<&'static str, Vec<&'static str>>,
    }

    impl MapChecker {
        fn new(entries: &[(&'static str, &[&'static str])]) -> Self {
            Self {
                guesses: entries
                    .iter()
                    .map(|&(w, g)| (w, g.to_vec()))
                    .collect(),
            }
        }
    }

    impl SpellChecker for MapChecker {
        fn is_misspelled(&self, word: &str) -> bool {
            self.guesses.contains_key(word)
        }
        fn guesses(&self, word: &str) -> Vec<String> {
            self.guesses
                .get(word)
                .map(|g| g.iter().map(|s| s.to_string()).collect())
                .unwrap_or_default()
        }
    }

    struct FixedProvider(Vec<&'static str>);

    impl CandidateProvider for FixedProvider {
        fn convert(&self, _reading: &str, max: usize) -> Vec<String> {
            self.0.iter().take(max).map(|s| s.to_string()).collect()
        }
    }

    #[test]
    fn applies_and_undoes_correction() {
        let mut corrector = EnglishAutoCorrector::new();
        let checker = MapChecker::new(&[("helo", &["hello", "helot"])]);
        let mut surface = MemorySurface::new();
        surface.insert_text("say helo");

        assert!(corrector.apply_before_delimiter(
            &mut surface,
            &checker,
            CorrectionStrength::Conservative,
            " ",
        ));
        assert_eq!(surface.text(), "say hello ");

        // Undo removes the correction and its delimiter
        assert!(corrector.undo(&mut surface));
        assert_eq!(surface.text(), "say helo");
    }

    #[test]
    fn stale_receipt_falls_through() {
        let mut corrector = EnglishAutoCorrector::new();
        let checker = MapChecker::new(&[("helo", &["hello"])]);
        let mut surface = MemorySurface::new();
        surface.insert_text("helo");
        assert!(corrector.apply_before_delimiter(
            &mut surface,
            &checker,
            CorrectionStrength::Conservative,
            " ",
        ));

        // More typing after the correction invalidates the receipt
        surface.insert_text("x");
        assert!(!corrector.undo(&mut surface));
        assert_eq!(surface.text(), "hello x");
    }

    #[test]
    fn conservative_rejects_distant_guesses() {
        let checker = MapChecker::new(&[("wrd", &["world"])]);
        let mut corrector = EnglishAutoCorrector::new();
        let mut surface = MemorySurface::new();
        surface.insert_text("wrd");
        // distance wrd -> world is 2
        assert!(!corrector.apply_before_delimiter(
            &mut surface,
            &checker,
            CorrectionStrength::Conservative,
            " ",
        ));
        assert!(corrector.apply_before_delimiter(
            &mut surface,
            &checker,
            CorrectionStrength::Aggressive,
            " ",
        ));
        assert_eq!(surface.text(), "world ");
    }

    #[test]
    fn case_pattern_is_preserved() {
        assert_eq!(match_case("the", "Teh"), "The");
        assert_eq!(match_case("the", "TEH"), "THE");
        assert_eq!(match_case("the", "teh"), "the");
        assert_eq!(match_case("im", "i"), "I");
    }

    #[test]
    fn word_extraction_requires_adjacency() {
        assert_eq!(extract_last_word("say teh"), Some("teh".to_string()));
        // Trailing whitespace means the word is not at the cursor
        assert_eq!(extract_last_word("say teh "), None);
        assert_eq!(extract_last_word("a"), None);
        assert_eq!(extract_last_word("don't"), Some("don't".to_string()));
        assert_eq!(extract_last_word("''"), None);
        assert_eq!(extract_last_word("x123"), None);
    }

    #[test]
    fn edit_distance_basics() {
        assert_eq!(edit_distance("teh", "the"), 2);
        assert_eq!(edit_distance("kitten", "sitting"), 3);
        assert_eq!(edit_distance("", "ab"), 2);
        assert_eq!(edit_distance("same", "same"), 0);
    }

    #[test]
    fn conversion_prefers_existing_suggestions() {
        let converter = JapaneseAutoConverter::new();
        let provider = FixedProvider(vec!["漢字"]);
        let suggestions = vec![Suggestion::conversion("感じ", "かんじ")];
        let best = converter.preferred_conversion(
            "かんじ",
            &suggestions,
            &provider,
            CorrectionStrength::Conservative,
        );
        assert_eq!(best, Some("感じ".to_string()));
    }

    #[test]
    fn conversion_conservative_length_bound() {
        let converter = JapaneseAutoConverter::new();
        let provider = FixedProvider(vec!["会"]);
        // かいぎしつ (5 chars) -> 会 (1 char), delta 4 > 2
        assert_eq!(
            converter.preferred_conversion(
                "かいぎしつ",
                &[],
                &provider,
                CorrectionStrength::Conservative,
            ),
            None
        );
        assert_eq!(
            converter.preferred_conversion(
                "かいぎしつ",
                &[],
                &provider,
                CorrectionStrength::Aggressive,
            ),
            Some("会".to_string())
        );
    }

    #[test]
    fn conversion_requires_hiragana() {
        let converter = JapaneseAutoConverter::new();
        let provider = FixedProvider(vec!["abc"]);
        assert_eq!(
            converter.preferred_conversion("ABC", &[], &provider, CorrectionStrength::Aggressive),
            None
        );
    }

    #[test]
    fn conversion_undo_restores_composing() {
        let mut converter = JapaneseAutoConverter::new();
        let mut buffer = ComposingBuffer::new();
        buffer.set_confirmed("今日は漢字");
        converter.record(ConversionRecord {
            previous_confirmed: "今日は".to_string(),
            original_composing: "かんじ".to_string(),
            converted_text: "漢字".to_string(),
        });

        assert!(converter.undo(&mut buffer));
        assert_eq!(buffer.confirmed(), "今日は");
        assert_eq!(buffer.composing(), "かんじ");
    }

    #[test]
    fn conversion_undo_guards() {
        let mut converter = JapaneseAutoConverter::new();
        let mut buffer = ComposingBuffer::new();
        buffer.set_confirmed("違う");
        converter.record(ConversionRecord {
            previous_confirmed: String::new(),
            original_composing: "かんじ".to_string(),
            converted_text: "漢字".to_string(),
        });
        // Confirmed text no longer matches: receipt dropped
        assert!(!converter.undo(&mut buffer));
        // And a second undo finds nothing pending
        assert!(!converter.undo(&mut buffer));
    }
}
