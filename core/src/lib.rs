//! composekit-core
//!
//! Script-agnostic building blocks shared by the composekit input crates
//! (composekit-hangul, composekit-kana, composekit):
//!
//! - `ComposingBuffer` - confirmed/composing text with a cursor model
//! - `TapCycle` - repeated-key disambiguation state
//! - `Suggestion` - conversion/translation candidates
//! - `RequestSequencer` - latest-request-wins cancellation
//! - `TextSurface` / `CandidateProvider` / `SpellChecker` - host capabilities
//! - `Config` - session configuration and feature flags

use serde::{Deserialize, Serialize};

pub mod buffer;
pub use buffer::ComposingBuffer;

pub mod tap_cycle;
pub use tap_cycle::{TapCycle, TapOutcome};

pub mod suggestion;
pub use suggestion::{Suggestion, SuggestionKind};

pub mod sequence;
pub use sequence::{RequestSequencer, RequestToken};

pub mod host;
pub use host::{CandidateProvider, MemorySurface, SpellChecker, TextSurface};

/// Input mode of a composition session.
///
/// Raw values match the settings store of the host application so that a
/// persisted default mode round-trips through TOML unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mode {
    /// English typing with local auto-correction and remote rewrite suggestions
    #[serde(rename = "en_correction")]
    EnglishCorrection,
    /// Hangul composition with remote rewrite suggestions
    #[serde(rename = "kr_correction")]
    KoreanCorrection,
    /// Japanese kana entry translated to English on confirm
    #[serde(rename = "jp_to_en")]
    JapaneseToEnglish,
    /// Japanese kana entry translated to Korean on confirm
    #[serde(rename = "jp_to_kr")]
    JapaneseToKorean,
}

impl Mode {
    /// Whether this mode composes Japanese text in the in-memory buffer.
    pub fn is_japanese_input(self) -> bool {
        matches!(self, Mode::JapaneseToEnglish | Mode::JapaneseToKorean)
    }

    /// Whether the host should present a QWERTY layout for this mode.
    pub fn uses_qwerty_layout(self) -> bool {
        !matches!(self, Mode::KoreanCorrection)
    }

    /// Short label for UI affordances.
    pub fn display_name(self) -> &'static str {
        match self {
            Mode::EnglishCorrection => "EN",
            Mode::KoreanCorrection => "KR",
            Mode::JapaneseToEnglish => "J>E",
            Mode::JapaneseToKorean => "J>K",
        }
    }
}

impl Default for Mode {
    fn default() -> Self {
        Mode::EnglishCorrection
    }
}

/// How eagerly automatic corrections and conversions are applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CorrectionStrength {
    /// Never rewrite automatically
    Off,
    /// Edit distance <= 1 for words; conversions within 2 chars of source
    Conservative,
    /// Edit distance <= max(2, len/3); no conversion length bound
    Aggressive,
}

impl Default for CorrectionStrength {
    fn default() -> Self {
        CorrectionStrength::Conservative
    }
}

/// Session configuration.
///
/// Read once at session start; the engine never persists it. Host-owned
/// settings (layout, haptics, onboarding) do not belong here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Mode a fresh session starts in
    pub default_mode: Mode,

    /// Auto-correction / auto-conversion eagerness
    pub correction_strength: CorrectionStrength,

    /// Opaque credential forwarded to the remote correction service
    pub api_key: String,

    /// Remote correction/translation endpoint; empty disables remote calls
    pub remote_endpoint: String,

    /// Timeout for a single remote request
    pub remote_timeout_ms: u64,

    /// Window during which repeated taps on one key keep cycling
    pub tap_cycle_timeout_ms: u64,

    /// Debounce before local conversion candidates are looked up
    pub conversion_debounce_ms: u64,

    /// Upper bound on conversion candidates requested from the provider
    pub max_conversion_candidates: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_mode: Mode::EnglishCorrection,
            correction_strength: CorrectionStrength::Conservative,
            api_key: String::new(),
            remote_endpoint: String::new(),
            remote_timeout_ms: 15_000,
            tap_cycle_timeout_ms: 700,
            conversion_debounce_ms: 300,
            max_conversion_candidates: 5,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load_toml<P: AsRef<std::path::Path>>(path: P) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        let config: Self = toml::from_str(&content)?;
        tracing::debug!(path = %path.as_ref().display(), "loaded configuration");
        Ok(config)
    }

    /// Save configuration to a TOML file.
    pub fn save_toml<P: AsRef<std::path::Path>>(&self, path: P) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Load configuration from a TOML string.
    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Serialize configuration to a TOML string.
    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}
