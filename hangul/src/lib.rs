//! composekit-hangul
//!
//! Hangul input for the Dubeolsik (2-set) QWERTY layout: static jamo
//! tables in [`jamo`] and the syllable composition state machine in
//! [`composer`].

pub mod composer;
pub mod jamo;

pub use composer::{ComposeResult, HangulComposer};
