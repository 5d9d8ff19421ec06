//! composekit
//!
//! Multi-script input composition engine. A [`ComposeSession`] turns
//! keystroke and gesture events into committed text for three input
//! styles: Hangul syllable composition, romaji transliteration and
//! flick-style kana entry, with recoverable auto-correction and a
//! debounced suggestion pipeline.
//!
//! The session owns all composition state; the host supplies the text
//! surface, the candidate provider and the spell checker through the
//! capability traits in `composekit-core`.

pub mod autocorrect;
pub mod remote;
pub mod session;
pub mod suggest;

pub use composekit_core::{
    CandidateProvider, ComposingBuffer, Config, CorrectionStrength, MemorySurface, Mode,
    RequestToken, SpellChecker, Suggestion, SuggestionKind, TextSurface,
};
pub use session::{ComposeSession, CursorDirection};
pub use suggest::{RequestKind, SuggestionRequest};
