//! Composition session: one struct owning every sub-machine and
//! dispatching input events by mode.
//!
//! The host text surface is passed into each handler and never stored.
//! Handlers that change the composing text or the surrounding sentence
//! return an optional [`SuggestionRequest`] for the host to schedule; the
//! session itself performs no lookups and never sleeps.

use crate::autocorrect::{ConversionRecord, EnglishAutoCorrector, JapaneseAutoConverter};
use crate::suggest::{self, RequestKind, SuggestionRequest};
use composekit_core::{
    CandidateProvider, ComposingBuffer, Config, CorrectionStrength, Mode, RequestSequencer,
    RequestToken, SpellChecker, Suggestion, SuggestionKind, TapCycle, TapOutcome, TextSurface,
};
use composekit_hangul::{ComposeResult, HangulComposer};
use composekit_kana::{modifiers, FlickKey, RomajiConverter};
use std::time::{Duration, Instant};
use tracing::{debug, trace};

/// Punctuation that triggers the auto-correct check in English mode.
const CORRECTION_DELIMITERS: [char; 6] = ['.', ',', '!', '?', ';', ':'];

/// Cursor movement direction for cursor sessions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorDirection {
    Left,
    Right,
}

/// One composition session. Fully reset on mode switch.
pub struct ComposeSession {
    mode: Mode,
    strength: CorrectionStrength,
    config: Config,
    buffer: ComposingBuffer,
    hangul: HangulComposer,
    romaji: RomajiConverter,
    tap_cycle: TapCycle,
    corrector: EnglishAutoCorrector,
    converter: JapaneseAutoConverter,
    suggestions: Vec<Suggestion>,
    sequencer: RequestSequencer,
    // Raw-insert mode while the host shows a movable cursor
    cursor_session_active: bool,
}

impl ComposeSession {
    pub fn new(config: Config) -> Self {
        Self {
            mode: config.default_mode,
            strength: config.correction_strength,
            tap_cycle: TapCycle::with_timeout(Duration::from_millis(config.tap_cycle_timeout_ms)),
            config,
            buffer: ComposingBuffer::new(),
            hangul: HangulComposer::new(),
            romaji: RomajiConverter::new(),
            corrector: EnglishAutoCorrector::new(),
            converter: JapaneseAutoConverter::new(),
            suggestions: Vec::new(),
            sequencer: RequestSequencer::new(),
            cursor_session_active: false,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn suggestions(&self) -> &[Suggestion] {
        &self.suggestions
    }

    pub fn buffer(&self) -> &ComposingBuffer {
        &self.buffer
    }

    /// What the host renders: combined text plus the effective cursor.
    pub fn preview_text(&self) -> (String, usize) {
        (self.buffer.combined(), self.buffer.effective_cursor())
    }

    /// Switch input mode, resetting every sub-state.
    pub fn switch_mode(&mut self, mode: Mode) {
        debug!(from = self.mode.display_name(), to = mode.display_name(), "mode switch");
        self.mode = mode;
        self.suggestions.clear();
        self.buffer.clear();
        self.hangul.reset();
        self.romaji.reset();
        self.tap_cycle.commit();
        self.corrector.clear_pending();
        self.converter.clear_pending();
        self.sequencer.invalidate_all();
        self.cursor_session_active = false;
    }

    // --- Character input ---

    /// Feed one typed character, dispatched by mode.
    pub fn handle_character(
        &mut self,
        ch: char,
        surface: &mut dyn TextSurface,
        checker: &dyn SpellChecker,
    ) -> Option<SuggestionRequest> {
        trace!(%ch, mode = self.mode.display_name(), "character");
        match self.mode {
            Mode::EnglishCorrection => {
                if CORRECTION_DELIMITERS.contains(&ch) {
                    let delimiter = ch.to_string();
                    if self.corrector.apply_before_delimiter(
                        surface,
                        checker,
                        self.strength,
                        &delimiter,
                    ) {
                        return self.plan_correction(surface);
                    }
                }
                self.corrector.clear_pending();
                surface.insert_text(&ch.to_string());
                self.plan_correction(surface)
            }

            Mode::KoreanCorrection => {
                let result = self.hangul.process(&ch.to_string());
                apply_compose_result(surface, &result);
                self.plan_correction(surface)
            }

            Mode::JapaneseToEnglish | Mode::JapaneseToKorean => {
                self.converter.clear_pending();
                if self.buffer.cursor().is_some() || self.cursor_session_active {
                    // Cursor positioned: raw insert, no transliteration
                    self.buffer.insert(&ch.to_string());
                } else {
                    let tail = self.romaji.display_text().chars().count();
                    self.romaji.process(ch);
                    self.replace_romaji_tail(tail);
                }
                self.plan_conversion()
            }
        }
    }

    // --- Kana (flick) input ---

    /// Insert kana produced by a flick gesture.
    pub fn handle_kana(&mut self, kana: &str) -> Option<SuggestionRequest> {
        self.converter.clear_pending();
        self.tap_cycle.commit();
        self.freeze_romaji();
        self.insert_into_buffer(kana);
        self.plan_conversion()
    }

    /// Replace the character just entered (repeated-tap punctuation
    /// cycling on keys outside the tap-cycle machinery).
    pub fn handle_kana_replace_last(
        &mut self,
        kana: &str,
        surface: &mut dyn TextSurface,
    ) -> Option<SuggestionRequest> {
        self.converter.clear_pending();
        self.tap_cycle.commit();
        self.freeze_romaji();
        if !self.buffer.composing().is_empty() {
            if self.buffer.cursor().is_some() {
                self.buffer.delete_one();
                self.buffer.insert(kana);
            } else {
                self.buffer.pop_composing();
                self.buffer.push_composing(kana);
            }
        } else {
            // Already committed to the surface; replace there
            surface.delete_backward();
            surface.insert_text(kana);
        }
        self.plan_conversion()
    }

    /// Repeated taps on one flick key cycle through its characters.
    pub fn handle_kana_tap(&mut self, key: &FlickKey, now: Instant) -> Option<SuggestionRequest> {
        self.converter.clear_pending();
        self.freeze_romaji();
        let cycle = key.toggle_cycle();
        match self.tap_cycle.tap(key.center, &cycle, now)? {
            TapOutcome::Insert(text) => self.insert_into_buffer(&text),
            TapOutcome::Replace(text) => {
                if !self.buffer.composing().is_empty() {
                    if self.buffer.cursor().is_some() {
                        self.buffer.delete_one();
                    } else {
                        self.buffer.pop_composing();
                    }
                }
                self.insert_into_buffer(&text);
            }
        }
        self.plan_conversion()
    }

    /// Lock the current tap-cycle character so the next tap starts fresh.
    pub fn handle_advance(&mut self) {
        self.tap_cycle.commit();
    }

    /// Step the live tap cycle back one character.
    pub fn handle_undo_kana(&mut self, now: Instant) -> Option<SuggestionRequest> {
        let previous = self.tap_cycle.undo(now)?;
        self.freeze_romaji();
        if !self.buffer.composing().is_empty() {
            self.buffer.pop_composing();
        }
        self.buffer.push_composing(&previous);
        self.plan_conversion()
    }

    /// Cycle the character before the cursor through its modifier
    /// variants (base, small, dakuten, handakuten).
    pub fn handle_modifier_toggle(&mut self) -> Option<SuggestionRequest> {
        self.converter.clear_pending();
        self.tap_cycle.commit();
        self.freeze_romaji();
        if self.buffer.composing().is_empty() {
            return None;
        }
        // Only the composing region is editable
        if self.buffer.effective_cursor() <= self.buffer.confirmed_chars() {
            return None;
        }
        let last = self.buffer.char_before_cursor()?;
        let next = modifiers::next_variant(last)?;
        self.buffer.replace_composing_char_before_cursor(next);
        self.plan_conversion()
    }

    // --- Cursor sessions ---

    /// Enter cursor-editing mode. Any unresolved romaji is frozen into
    /// the composing buffer so edits are positional from here on.
    pub fn begin_cursor_session(&mut self) {
        self.tap_cycle.commit();
        self.freeze_romaji();
        self.cursor_session_active = true;
    }

    pub fn end_cursor_session(&mut self) {
        self.cursor_session_active = false;
    }

    pub fn move_cursor(&mut self, direction: CursorDirection) {
        match direction {
            CursorDirection::Left => {
                self.buffer.move_left();
            }
            CursorDirection::Right => {
                self.buffer.move_right();
            }
        }
    }

    pub fn reset_cursor_to_end(&mut self) {
        self.buffer.reset_cursor_to_end();
    }

    // --- Backspace ---

    /// Per-mode backspace with tracker undo tried first.
    pub fn handle_backspace(&mut self, surface: &mut dyn TextSurface) -> Option<SuggestionRequest> {
        self.tap_cycle.commit();
        match self.mode {
            Mode::EnglishCorrection => {
                if self.corrector.undo(surface) {
                    return self.plan_correction(surface);
                }
                self.corrector.clear_pending();
                surface.delete_backward();
                self.plan_correction(surface)
            }

            Mode::KoreanCorrection => {
                let result = self.hangul.backspace();
                apply_compose_result(surface, &result);
                self.plan_correction(surface)
            }

            Mode::JapaneseToEnglish | Mode::JapaneseToKorean => self.japanese_backspace(surface),
        }
    }

    fn japanese_backspace(&mut self, surface: &mut dyn TextSurface) -> Option<SuggestionRequest> {
        if self.converter.undo(&mut self.buffer) {
            return self.plan_conversion();
        }
        if self.buffer.cursor().is_some() {
            self.buffer.delete_one();
            if self.buffer.is_empty() {
                self.suggestions.clear();
                self.buffer.reset_cursor_to_end();
            }
            return self.plan_conversion();
        }
        if !self.romaji.is_empty() {
            // Unresolved romaji is deleted before any resolved kana
            let tail = self.romaji.display_text().chars().count();
            self.romaji.backspace();
            self.replace_romaji_tail(tail);
            return self.plan_conversion();
        }
        if !self.buffer.composing().is_empty() {
            self.buffer.pop_composing();
            return self.plan_conversion();
        }
        if !self.buffer.confirmed().is_empty() {
            self.buffer.pop_confirmed();
            if self.buffer.confirmed().is_empty() {
                self.suggestions.clear();
            }
            return None;
        }
        if !self.suggestions.is_empty() {
            self.suggestions.clear();
            return None;
        }
        surface.delete_backward();
        None
    }

    // --- Space / Return ---

    pub fn handle_space(
        &mut self,
        surface: &mut dyn TextSurface,
        checker: &dyn SpellChecker,
        provider: &dyn CandidateProvider,
    ) -> Option<SuggestionRequest> {
        self.tap_cycle.commit();
        match self.mode {
            Mode::EnglishCorrection => {
                if self
                    .corrector
                    .apply_before_delimiter(surface, checker, self.strength, " ")
                {
                    return self.plan_correction(surface);
                }
                self.corrector.clear_pending();
                surface.insert_text(" ");
                self.plan_correction(surface)
            }
            Mode::KoreanCorrection => {
                if let Some(text) = self.hangul.finalize() {
                    surface.insert_text(&text);
                }
                surface.insert_text(" ");
                self.plan_correction(surface)
            }
            Mode::JapaneseToEnglish | Mode::JapaneseToKorean => {
                if self.buffer.is_empty() {
                    surface.insert_text(" ");
                    return None;
                }
                self.confirm_input(surface, provider)
            }
        }
    }

    pub fn handle_return(
        &mut self,
        surface: &mut dyn TextSurface,
        checker: &dyn SpellChecker,
        provider: &dyn CandidateProvider,
    ) -> Option<SuggestionRequest> {
        self.tap_cycle.commit();
        match self.mode {
            Mode::EnglishCorrection => {
                if self
                    .corrector
                    .apply_before_delimiter(surface, checker, self.strength, "\n")
                {
                    return self.plan_correction(surface);
                }
                self.corrector.clear_pending();
                surface.insert_text("\n");
                self.plan_correction(surface)
            }
            Mode::KoreanCorrection => {
                if let Some(text) = self.hangul.finalize() {
                    surface.insert_text(&text);
                }
                surface.insert_text("\n");
                self.plan_correction(surface)
            }
            Mode::JapaneseToEnglish | Mode::JapaneseToKorean => {
                if self.buffer.is_empty() {
                    surface.insert_text("\n");
                    return None;
                }
                self.confirm_input(surface, provider)
            }
        }
    }

    // --- Confirm / suggestions ---

    /// Japanese confirm: lock composing text (auto-converting when
    /// possible), or request a translation of the confirmed text.
    pub fn confirm_input(
        &mut self,
        _surface: &mut dyn TextSurface,
        provider: &dyn CandidateProvider,
    ) -> Option<SuggestionRequest> {
        let composing = self.buffer.composing().to_string();

        let request = if !composing.is_empty() {
            self.romaji.reset();
            let previous_confirmed = self.buffer.confirmed().to_string();
            match self.converter.preferred_conversion(
                &composing,
                &self.suggestions,
                provider,
                self.strength,
            ) {
                Some(converted) => {
                    self.buffer.append_confirmed(&converted);
                    self.converter.record(ConversionRecord {
                        previous_confirmed,
                        original_composing: composing,
                        converted_text: converted,
                    });
                }
                None => {
                    self.buffer.append_confirmed(&composing);
                    self.converter.clear_pending();
                }
            }
            self.buffer.clear_composing();
            self.suggestions.clear();
            self.sequencer.invalidate_all();
            None
        } else if !self.buffer.confirmed().is_empty() {
            self.converter.clear_pending();
            let translations: Vec<Suggestion> = self
                .suggestions
                .iter()
                .filter(|s| s.kind == SuggestionKind::Translation)
                .cloned()
                .collect();
            let text = self.buffer.confirmed().to_string();
            self.buffer.clear();
            self.romaji.reset();
            if translations.is_empty() {
                debug!(chars = text.chars().count(), "requesting translation");
                Some(SuggestionRequest {
                    token: self.sequencer.issue(),
                    delay: Duration::ZERO,
                    kind: RequestKind::Translation { text },
                })
            } else {
                // Reuse translations fetched while the text was confirmed
                self.suggestions = translations;
                self.sequencer.invalidate_all();
                None
            }
        } else {
            None
        };

        self.buffer.reset_cursor_to_end();
        request
    }

    /// Accept one suggestion.
    pub fn apply_suggestion(&mut self, suggestion: &Suggestion, surface: &mut dyn TextSurface) {
        if self.mode.is_japanese_input() && suggestion.kind == SuggestionKind::Conversion {
            // Conversion candidates lock into confirmed text; typing can
            // continue before the final translate step.
            self.buffer.append_confirmed(&suggestion.text);
            self.buffer.clear_composing();
            self.romaji.reset();
            self.suggestions.clear();
            self.converter.clear_pending();
            self.sequencer.invalidate_all();
            self.buffer.reset_cursor_to_end();
            return;
        }

        if self.mode.is_japanese_input() {
            surface.insert_text(&suggestion.text);
            self.buffer.clear();
            self.romaji.reset();
            self.converter.clear_pending();
        } else {
            replace_tail(surface, &suggestion.original_text, &suggestion.text);
        }
        self.corrector.clear_pending();
        self.suggestions.clear();
        self.sequencer.invalidate_all();
        self.buffer.reset_cursor_to_end();
    }

    // --- Request fulfilment ---

    /// Populate conversion candidates from the local provider. Stale
    /// tokens are dropped without side effects.
    pub fn fulfill_conversion(&mut self, token: RequestToken, provider: &dyn CandidateProvider) -> bool {
        if !self.sequencer.is_current(token) {
            trace!("dropping stale conversion result");
            return false;
        }
        let composing = self.buffer.composing().to_string();
        self.suggestions = provider
            .convert(&composing, self.config.max_conversion_candidates)
            .into_iter()
            .map(|text| Suggestion::conversion(text, composing.clone()))
            .collect();
        true
    }

    /// Hand back results of a remote correction/translation call.
    pub fn apply_remote_results(&mut self, token: RequestToken, results: Vec<Suggestion>) -> bool {
        if !self.sequencer.is_current(token) {
            trace!("dropping stale remote results");
            return false;
        }
        self.suggestions = results;
        true
    }

    // --- Internal ---

    fn insert_into_buffer(&mut self, text: &str) {
        self.buffer.insert(text);
    }

    /// The composing region always ends with `romaji.display_text()`;
    /// swap that tail after the converter state changed.
    fn replace_romaji_tail(&mut self, old_chars: usize) {
        for _ in 0..old_chars {
            self.buffer.pop_composing();
        }
        let display = self.romaji.display_text();
        if !display.is_empty() {
            self.buffer.push_composing(&display);
        }
    }

    /// Keep kana entered outside the romaji path: the converter's
    /// display is already in the buffer, so dropping its state turns
    /// any unresolved romaji into plain composing text.
    fn freeze_romaji(&mut self) {
        self.romaji.reset();
    }

    fn plan_conversion(&mut self) -> Option<SuggestionRequest> {
        if !self.mode.is_japanese_input() {
            return None;
        }
        let composing = self.buffer.composing().to_string();
        if composing.is_empty() {
            self.suggestions.clear();
            self.sequencer.invalidate_all();
            return None;
        }
        Some(SuggestionRequest {
            token: self.sequencer.issue(),
            delay: Duration::from_millis(self.config.conversion_debounce_ms),
            kind: RequestKind::Conversion { composing },
        })
    }

    fn plan_correction(&mut self, surface: &dyn TextSurface) -> Option<SuggestionRequest> {
        if self.mode.is_japanese_input() {
            return None;
        }
        let before = surface.text_before_cursor();
        let sentence = suggest::current_sentence(&before);
        if sentence.chars().count() < suggest::min_correction_len(self.mode) {
            self.suggestions.clear();
            self.sequencer.invalidate_all();
            return None;
        }
        Some(SuggestionRequest {
            token: self.sequencer.issue(),
            delay: suggest::correction_delay(&before),
            kind: RequestKind::Correction { sentence },
        })
    }
}

fn apply_compose_result(surface: &mut dyn TextSurface, result: &ComposeResult) {
    for _ in 0..result.delete_count.unwrap_or(0) {
        surface.delete_backward();
    }
    if let Some(text) = &result.commit_text {
        surface.insert_text(text);
    }
}

/// Delete as much of `original` as is present before the cursor, then
/// insert `replacement`.
fn replace_tail(surface: &mut dyn TextSurface, original: &str, replacement: &str) {
    let before = surface.text_before_cursor();
    let matched = original.chars().count().min(before.chars().count());
    for _ in 0..matched {
        surface.delete_backward();
    }
    surface.insert_text(replacement);
}

#[cfg(test)]
mod tests {
    use super::*;
    use composekit_core::MemorySurface;

    struct NoChecker;
    impl SpellChecker for NoChecker {
        fn is_misspelled(&self, _word: &str) -> bool {
            false
        }
        fn guesses(&self, _word: &str) -> Vec<String> {
            vec![]
        }
    }

    struct NoProvider;
    impl CandidateProvider for NoProvider {
        fn convert(&self, _reading: &str, _max: usize) -> Vec<String> {
            vec![]
        }
    }

    fn japanese_session() -> ComposeSession {
        let mut config = Config::default();
        config.default_mode = Mode::JapaneseToEnglish;
        ComposeSession::new(config)
    }

    #[test]
    fn korean_typing_drives_composer() {
        let mut config = Config::default();
        config.default_mode = Mode::KoreanCorrection;
        let mut session = ComposeSession::new(config);
        let mut surface = MemorySurface::new();
        for ch in "gksrmf".chars() {
            session.handle_character(ch, &mut surface, &NoChecker);
        }
        assert_eq!(surface.text(), "한글");
    }

    #[test]
    fn romaji_typing_fills_composing_buffer() {
        let mut session = japanese_session();
        let mut surface = MemorySurface::new();
        for ch in "kana".chars() {
            session.handle_character(ch, &mut surface, &NoChecker);
        }
        assert_eq!(session.buffer().composing(), "かな");
        // Nothing reaches the surface while composing
        assert_eq!(surface.text(), "");
    }

    #[test]
    fn cursor_session_switches_to_raw_insert() {
        let mut session = japanese_session();
        let mut surface = MemorySurface::new();
        for ch in "ka".chars() {
            session.handle_character(ch, &mut surface, &NoChecker);
        }
        session.begin_cursor_session();
        session.move_cursor(CursorDirection::Left);
        session.handle_character('x', &mut surface, &NoChecker);
        assert_eq!(session.buffer().composing(), "xか");
    }

    #[test]
    fn mode_switch_resets_everything() {
        let mut session = japanese_session();
        let mut surface = MemorySurface::new();
        for ch in "ka".chars() {
            session.handle_character(ch, &mut surface, &NoChecker);
        }
        session.switch_mode(Mode::EnglishCorrection);
        assert!(session.buffer().is_empty());
        assert!(session.suggestions().is_empty());
        let (preview, cursor) = session.preview_text();
        assert_eq!(preview, "");
        assert_eq!(cursor, 0);
    }

    #[test]
    fn conversion_request_tokens_supersede() {
        let mut session = japanese_session();
        let mut surface = MemorySurface::new();
        let first = session
            .handle_character('k', &mut surface, &NoChecker)
            .unwrap();
        let second = session
            .handle_character('a', &mut surface, &NoChecker)
            .unwrap();

        struct OneProvider;
        impl CandidateProvider for OneProvider {
            fn convert(&self, _reading: &str, max: usize) -> Vec<String> {
                vec!["仮".to_string()].into_iter().take(max).collect()
            }
        }

        // The superseded token must be dropped without side effects
        assert!(!session.fulfill_conversion(first.token, &OneProvider));
        assert!(session.suggestions().is_empty());
        assert!(session.fulfill_conversion(second.token, &OneProvider));
        assert_eq!(session.suggestions()[0].text, "仮");
        assert_eq!(session.suggestions()[0].original_text, "か");
    }

    #[test]
    fn modifier_toggle_survives_next_romaji_key() {
        let mut session = japanese_session();
        let mut surface = MemorySurface::new();
        for ch in "ha".chars() {
            session.handle_character(ch, &mut surface, &NoChecker);
        }
        session.handle_modifier_toggle();
        assert_eq!(session.buffer().composing(), "ば");
        // The toggled character stays put when romaji typing resumes
        session.handle_character('k', &mut surface, &NoChecker);
        assert_eq!(session.buffer().composing(), "ばk");
        session.handle_character('a', &mut surface, &NoChecker);
        assert_eq!(session.buffer().composing(), "ばか");
    }

    #[test]
    fn backspace_unwinds_romaji_before_kana() {
        let mut session = japanese_session();
        let mut surface = MemorySurface::new();
        for ch in "kak".chars() {
            session.handle_character(ch, &mut surface, &NoChecker);
        }
        assert_eq!(session.buffer().composing(), "かk");
        session.handle_backspace(&mut surface);
        assert_eq!(session.buffer().composing(), "か");
        session.handle_backspace(&mut surface);
        assert_eq!(session.buffer().composing(), "");
        // With the buffer empty, backspace reaches the surface
        surface.insert_text("x");
        session.handle_backspace(&mut surface);
        assert_eq!(surface.text(), "");
    }
}
