//! Latest-request-wins sequencing for debounced lookups.
//!
//! Every edit that schedules a suggestion lookup gets a fresh token; when a
//! result arrives it is applied only if its token is still the newest one
//! issued. Stale results are dropped without side effects.

/// Opaque handle identifying one scheduled request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestToken(u64);

/// Monotonic token source.
#[derive(Debug, Default)]
pub struct RequestSequencer {
    next: u64,
}

impl RequestSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a new token, superseding all previously issued ones.
    pub fn issue(&mut self) -> RequestToken {
        self.next += 1;
        RequestToken(self.next)
    }

    /// Whether `token` is the most recently issued one.
    pub fn is_current(&self, token: RequestToken) -> bool {
        token.0 == self.next
    }

    /// Supersede every outstanding token without issuing a usable one.
    pub fn invalidate_all(&mut self) {
        self.next += 1;
    }
}
