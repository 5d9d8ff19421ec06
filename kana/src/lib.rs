//! composekit-kana
//!
//! Japanese kana input pieces: the romaji transliterator in [`romaji`],
//! dakuten/handakuten/small-kana tables in [`modifiers`], the flick key
//! grid in [`flick`] and the bigram row predictor in [`predict`].

pub mod flick;
pub mod modifiers;
pub mod predict;
pub mod romaji;

pub use flick::{FlickDirection, FlickKey};
pub use romaji::RomajiConverter;
