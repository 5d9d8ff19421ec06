//! Repeated-tap disambiguation for multi-character keys.
//!
//! Flick-grid keys carry several kana on one key. Tapping the same key
//! repeatedly within the timeout cycles through them in place; tapping a
//! different key or letting the timeout lapse commits the current character
//! and starts a fresh cycle. The timeout is evaluated lazily against the
//! caller-supplied clock, so no timer thread is needed.

use std::time::{Duration, Instant};

/// What the host should do with the character produced by a tap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TapOutcome {
    /// Insert the character as new text.
    Insert(String),
    /// Replace the previously inserted character with this one.
    Replace(String),
}

/// Tracks the in-flight cycle for one key.
#[derive(Debug, Clone, Default)]
pub struct TapCycle {
    key: String,
    chars: Vec<String>,
    index: usize,
    last_tap: Option<Instant>,
    timeout: Duration,
}

impl TapCycle {
    pub fn new() -> Self {
        Self::with_timeout(Duration::from_millis(700))
    }

    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            timeout,
            ..Self::default()
        }
    }

    /// Register a tap on `key`, which offers the characters in `cycle`.
    ///
    /// Returns `None` when `cycle` is empty. A tap on the active key within
    /// the timeout advances the cycle and yields `Replace`; anything else
    /// commits the previous cycle and yields `Insert` of the first character.
    pub fn tap(&mut self, key: &str, cycle: &[&str], now: Instant) -> Option<TapOutcome> {
        if cycle.is_empty() {
            return None;
        }
        let live = self.is_live_at(now) && self.key == key;
        if live {
            self.index = (self.index + 1) % self.chars.len();
            self.last_tap = Some(now);
            Some(TapOutcome::Replace(self.chars[self.index].clone()))
        } else {
            self.key = key.to_string();
            self.chars = cycle.iter().map(|s| s.to_string()).collect();
            self.index = 0;
            self.last_tap = Some(now);
            Some(TapOutcome::Insert(self.chars[0].clone()))
        }
    }

    /// Current character of a live cycle, for replacement-style edits.
    pub fn current(&self, now: Instant) -> Option<&str> {
        if self.is_live_at(now) {
            Some(self.chars[self.index].as_str())
        } else {
            None
        }
    }

    /// Step a live cycle back one position. Returns the character to show,
    /// or `None` when the cycle is at its first position or not live.
    pub fn undo(&mut self, now: Instant) -> Option<String> {
        if !self.is_live_at(now) || self.index == 0 {
            return None;
        }
        self.index -= 1;
        self.last_tap = Some(now);
        Some(self.chars[self.index].clone())
    }

    /// End the cycle so the next tap on the same key starts fresh.
    pub fn commit(&mut self) {
        self.last_tap = None;
        self.chars.clear();
        self.index = 0;
        self.key.clear();
    }

    pub fn is_active(&self) -> bool {
        self.last_tap.is_some()
    }

    fn is_live_at(&self, now: Instant) -> bool {
        match self.last_tap {
            Some(at) => !self.chars.is_empty() && now.duration_since(at) <= self.timeout,
            None => false,
        }
    }
}
