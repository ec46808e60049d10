//! Viewer configuration supplied by the hosting page.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Tunables for loading and typesetting. Every field has a default, so a
/// host only passes what it wants to change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// Ask intermediaries not to serve a cached deck.
    pub bypass_cache: bool,
    /// Readiness checks before giving up on the math engine.
    pub ready_attempts: u32,
    pub ready_backoff_ms: u64,
    pub ready_backoff_max_ms: u64,
    /// Bound on a single wait for the readiness signal.
    pub ready_timeout_ms: u64,
    /// Bound on a single typeset request once the engine is ready.
    pub typeset_timeout_ms: u64,
    pub no_cards_message: String,
    pub load_error_prefix: String,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            bypass_cache: true,
            ready_attempts: 20,
            ready_backoff_ms: 150,
            ready_backoff_max_ms: 1200,
            ready_timeout_ms: 5000,
            typeset_timeout_ms: 10_000,
            no_cards_message: "No cards available".to_string(),
            load_error_prefix: "Error loading cards".to_string(),
        }
    }
}

impl ViewerConfig {
    /// Parse host overrides; absent fields keep their defaults.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Delay before readiness retry number `attempt` (zero-based), doubling up to the cap.
    pub fn ready_backoff(&self, attempt: u32) -> Duration {
        let factor = 1u64.checked_shl(attempt.min(16)).unwrap_or(u64::MAX);
        let millis = self
            .ready_backoff_ms
            .saturating_mul(factor)
            .min(self.ready_backoff_max_ms);
        Duration::from_millis(millis)
    }

    pub fn ready_timeout(&self) -> Duration {
        Duration::from_millis(self.ready_timeout_ms)
    }

    pub fn typeset_timeout(&self) -> Duration {
        Duration::from_millis(self.typeset_timeout_ms)
    }
}
