//! Hangul syllable composition state machine.
//!
//! Each keystroke produces a [`ComposeResult`] telling the host what to
//! delete and what to emit. The partial syllable is always rendered into
//! the host text as soon as it exists, so most transitions replace the
//! previous rendering (`delete_count = Some(1)`) with the refined one.

use crate::jamo;

/// Edit the host applies for one event: delete `delete_count` characters
/// before the cursor, then insert `commit_text`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComposeResult {
    pub commit_text: Option<String>,
    pub delete_count: Option<usize>,
}

impl ComposeResult {
    fn emit(text: impl Into<String>) -> Self {
        Self {
            commit_text: Some(text.into()),
            delete_count: None,
        }
    }

    fn replace(text: impl Into<String>) -> Self {
        Self {
            commit_text: Some(text.into()),
            delete_count: Some(1),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Empty,
    Choseong(char),
    ChoseongJungseong(char, char),
    Complete(char, char, char),
}

/// Dubeolsik composer. One live partial syllable at a time.
#[derive(Debug)]
pub struct HangulComposer {
    state: State,
}

impl Default for HangulComposer {
    fn default() -> Self {
        Self::new()
    }
}

impl HangulComposer {
    pub fn new() -> Self {
        Self { state: State::Empty }
    }

    pub fn reset(&mut self) {
        self.state = State::Empty;
    }

    /// Whether a partial syllable is live.
    pub fn is_composing(&self) -> bool {
        self.state != State::Empty
    }

    /// Feed one key press.
    pub fn process(&mut self, key: &str) -> ComposeResult {
        let Some(jamo) = jamo::jamo_for_key(key) else {
            return self.process_passthrough(key);
        };
        let vowel = jamo::is_vowel(jamo);

        match self.state {
            State::Empty => {
                if vowel {
                    // Lone vowel, nothing to attach to
                    ComposeResult::emit(jamo)
                } else {
                    self.state = State::Choseong(jamo);
                    ComposeResult::emit(jamo)
                }
            }

            State::Choseong(cho) => {
                if vowel {
                    self.state = State::ChoseongJungseong(cho, jamo);
                    self.render_replace(cho, jamo, None)
                } else {
                    // Second initial in a row: the first stands alone
                    self.state = State::Choseong(jamo);
                    ComposeResult::emit(jamo)
                }
            }

            State::ChoseongJungseong(cho, jung) => {
                if vowel {
                    if let Some(compound) = jamo::compound_vowel(jung, jamo) {
                        self.state = State::ChoseongJungseong(cho, compound);
                        self.render_replace(cho, compound, None)
                    } else {
                        // Medial cannot extend. The rendered syllable stays
                        // as is and the vowel lands standalone after it.
                        self.state = State::Empty;
                        ComposeResult::emit(jamo)
                    }
                } else if jamo::jongseong_index(jamo).is_some() {
                    self.state = State::Complete(cho, jung, jamo);
                    self.render_replace(cho, jung, Some(jamo))
                } else {
                    // ㄸ/ㅃ/ㅉ cannot close a syllable; start a new one
                    self.state = State::Choseong(jamo);
                    ComposeResult::emit(jamo)
                }
            }

            State::Complete(cho, jung, jong) => {
                if vowel {
                    // The final (or its second half) migrates to the next
                    // syllable's initial.
                    let (kept, moved) = match jamo::split_compound_jongseong(jong) {
                        Some((first, second)) => (Some(first), second),
                        None => (None, jong),
                    };
                    let prev = render(cho, jung, kept);
                    self.state = State::ChoseongJungseong(moved, jamo);
                    let next = render(moved, jamo, None);
                    ComposeResult {
                        commit_text: Some(format!("{prev}{next}")),
                        delete_count: Some(1),
                    }
                } else if let Some(compound) = jamo::compound_jongseong(jong, jamo) {
                    self.state = State::Complete(cho, jung, compound);
                    self.render_replace(cho, jung, Some(compound))
                } else {
                    self.state = State::Choseong(jamo);
                    ComposeResult::emit(jamo)
                }
            }
        }
    }

    /// Undo one keystroke's worth of composition.
    ///
    /// Each arm is the inverse of the transition that produced the state,
    /// so repeated backspaces walk the syllable apart jamo by jamo.
    pub fn backspace(&mut self) -> ComposeResult {
        match self.state {
            State::Empty => ComposeResult {
                commit_text: None,
                delete_count: Some(1),
            },

            State::Choseong(_) => {
                self.state = State::Empty;
                ComposeResult {
                    commit_text: None,
                    delete_count: Some(1),
                }
            }

            State::ChoseongJungseong(cho, jung) => {
                if let Some((first, _)) = jamo::split_compound_vowel(jung) {
                    self.state = State::ChoseongJungseong(cho, first);
                    self.render_replace(cho, first, None)
                } else {
                    self.state = State::Choseong(cho);
                    ComposeResult::replace(cho)
                }
            }

            State::Complete(cho, jung, jong) => {
                if let Some((first, _)) = jamo::split_compound_jongseong(jong) {
                    self.state = State::Complete(cho, jung, first);
                    self.render_replace(cho, jung, Some(first))
                } else {
                    self.state = State::ChoseongJungseong(cho, jung);
                    self.render_replace(cho, jung, None)
                }
            }
        }
    }

    /// End composition. The partial syllable is already rendered in the
    /// host text, so there is never anything left to flush.
    pub fn finalize(&mut self) -> Option<String> {
        self.state = State::Empty;
        None
    }

    fn process_passthrough(&mut self, key: &str) -> ComposeResult {
        let live = self.current_rendering();
        self.state = State::Empty;
        match live {
            // Replace the rendered partial with itself plus the raw key so
            // the partial is locked and the key lands after it.
            Some(rendering) => ComposeResult {
                commit_text: Some(format!("{rendering}{key}")),
                delete_count: Some(1),
            },
            None => ComposeResult::emit(key),
        }
    }

    fn current_rendering(&self) -> Option<String> {
        match self.state {
            State::Empty => None,
            State::Choseong(cho) => Some(cho.to_string()),
            State::ChoseongJungseong(cho, jung) => Some(render(cho, jung, None)),
            State::Complete(cho, jung, jong) => Some(render(cho, jung, Some(jong))),
        }
    }

    fn render_replace(&self, cho: char, jung: char, jong: Option<char>) -> ComposeResult {
        ComposeResult::replace(render(cho, jung, jong))
    }
}

fn render(cho: char, jung: char, jong: Option<char>) -> String {
    match jamo::compose_syllable(cho, jung, jong) {
        Some(s) => s.to_string(),
        // Out-of-table jamo degrade to the raw sequence
        None => {
            let mut s = String::new();
            s.push(cho);
            s.push(jung);
            if let Some(j) = jong {
                s.push(j);
            }
            s
        }
    }
}
