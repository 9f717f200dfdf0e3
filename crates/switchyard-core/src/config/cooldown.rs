//! Cooldown duration table

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::classify::ErrorKind;

/// How long an endpoint is suppressed after a retriable failure, per kind.
///
/// Non-retriable kinds have no entry: they never put an endpoint on cooldown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CooldownDurations {
    #[serde(with = "humantime_serde")]
    pub rate_limit: Duration,
    #[serde(with = "humantime_serde")]
    pub timeout: Duration,
    #[serde(with = "humantime_serde")]
    pub server_error: Duration,
    #[serde(with = "humantime_serde")]
    pub auth: Duration,
    #[serde(with = "humantime_serde")]
    pub billing: Duration,
}

impl Default for CooldownDurations {
    fn default() -> Self {
        Self {
            rate_limit: Duration::from_secs(60),
            timeout: Duration::from_secs(30),
            server_error: Duration::from_secs(120),
            auth: Duration::from_secs(300),
            billing: Duration::from_secs(120),
        }
    }
}

impl CooldownDurations {
    /// Same duration for every retriable kind
    pub fn uniform(duration: Duration) -> Self {
        Self {
            rate_limit: duration,
            timeout: duration,
            server_error: duration,
            auth: duration,
            billing: duration,
        }
    }

    /// Suppression window for `kind`, `None` for non-retriable kinds
    pub fn duration_for(&self, kind: ErrorKind) -> Option<Duration> {
        match kind {
            ErrorKind::RateLimit => Some(self.rate_limit),
            ErrorKind::Timeout => Some(self.timeout),
            ErrorKind::ServerError => Some(self.server_error),
            ErrorKind::Auth => Some(self.auth),
            ErrorKind::Billing => Some(self.billing),
            ErrorKind::FormatError
            | ErrorKind::UnsupportedInput
            | ErrorKind::UserAbort
            | ErrorKind::Unknown => None,
        }
    }

    /// Override the window for one kind. Non-retriable kinds are ignored.
    pub fn with_duration(mut self, kind: ErrorKind, duration: Duration) -> Self {
        match kind {
            ErrorKind::RateLimit => self.rate_limit = duration,
            ErrorKind::Timeout => self.timeout = duration,
            ErrorKind::ServerError => self.server_error = duration,
            ErrorKind::Auth => self.auth = duration,
            ErrorKind::Billing => self.billing = duration,
            _ => {}
        }
        self
    }
}
