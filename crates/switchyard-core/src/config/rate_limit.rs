//! Requests-per-minute gate settings

use serde::{Deserialize, Serialize};

/// Settings for the optional per-endpoint RPM gate.
///
/// When enabled, endpoints that carry an `rpm` hint are skipped (not called)
/// once their token bucket is empty, the same way cooling endpoints are.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RateLimitSettings {
    /// Whether the gate is consulted at all
    pub enabled: bool,
    /// Extra requests allowed in a burst on top of one minute's budget
    pub burst: u32,
}

impl RateLimitSettings {
    /// Enabled gate with no extra burst
    pub fn enabled() -> Self {
        Self {
            enabled: true,
            burst: 0,
        }
    }

    /// Set burst size
    pub fn with_burst(mut self, burst: u32) -> Self {
        self.burst = burst;
        self
    }
}
