//! Error kind taxonomy

use serde::{Deserialize, Serialize};

/// Fixed taxonomy of backend failure kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Provider throttled the caller (HTTP 429, quota)
    RateLimit,
    /// Deadline exceeded before the provider answered
    Timeout,
    /// Provider-side failure (HTTP 5xx, overloaded)
    ServerError,
    /// Account out of credits or balance
    Billing,
    /// Credentials rejected or expired
    Auth,
    /// Request is malformed for the provider's schema
    FormatError,
    /// Payload exceeds a hard backend limit
    UnsupportedInput,
    /// Caller cancelled the request
    UserAbort,
    /// Nothing matched
    Unknown,
}

impl ErrorKind {
    /// All kinds, in taxonomy order
    pub const ALL: [ErrorKind; 9] = [
        Self::RateLimit,
        Self::Timeout,
        Self::ServerError,
        Self::Billing,
        Self::Auth,
        Self::FormatError,
        Self::UnsupportedInput,
        Self::UserAbort,
        Self::Unknown,
    ];

    /// Whether a different endpoint could plausibly succeed.
    ///
    /// Unknown failures are not retried so real bugs are not masked as
    /// transient provider trouble.
    pub fn is_retriable(self) -> bool {
        matches!(
            self,
            Self::RateLimit | Self::Timeout | Self::ServerError | Self::Billing | Self::Auth
        )
    }

    /// Stable snake_case name, matches the serde representation
    pub fn as_str(self) -> &'static str {
        match self {
            Self::RateLimit => "rate_limit",
            Self::Timeout => "timeout",
            Self::ServerError => "server_error",
            Self::Billing => "billing",
            Self::Auth => "auth",
            Self::FormatError => "format_error",
            Self::UnsupportedInput => "unsupported_input",
            Self::UserAbort => "user_abort",
            Self::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
