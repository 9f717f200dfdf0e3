//! Failure type returned by caller-supplied work functions

use std::fmt;

/// Out-of-band failure signal that does not depend on error text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureSignal {
    /// Caller-initiated cancellation
    Cancelled,
    /// A deadline or context timeout fired
    DeadlineExceeded,
}

/// A failed backend call, as seen by the routing engine.
///
/// Work functions convert whatever their transport produced into this type.
/// Only the status code, the message text and the optional signal take part
/// in classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendError {
    status: Option<u16>,
    message: String,
    signal: Option<FailureSignal>,
}

impl BackendError {
    /// Create an error from free-form text
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            status: None,
            message: message.into(),
            signal: None,
        }
    }

    /// Create an error from an HTTP response
    pub fn http(status: u16, message: impl Into<String>) -> Self {
        Self {
            status: Some(status),
            message: message.into(),
            signal: None,
        }
    }

    /// Create a deadline-exceeded error
    pub fn timeout(message: impl Into<String>) -> Self {
        Self {
            status: None,
            message: message.into(),
            signal: Some(FailureSignal::DeadlineExceeded),
        }
    }

    /// Create a caller-cancellation error
    pub fn cancelled() -> Self {
        Self {
            status: None,
            message: "request cancelled".to_string(),
            signal: Some(FailureSignal::Cancelled),
        }
    }

    /// Attach an HTTP status code
    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    /// Attach an out-of-band signal
    pub fn with_signal(mut self, signal: FailureSignal) -> Self {
        self.signal = Some(signal);
        self
    }

    pub fn status(&self) -> Option<u16> {
        self.status
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn signal(&self) -> Option<FailureSignal> {
        self.signal
    }
}

impl fmt::Display for BackendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.status {
            Some(status) => write!(f, "HTTP {}: {}", status, self.message),
            None => f.write_str(&self.message),
        }
    }
}

impl std::error::Error for BackendError {}

impl From<tokio::time::error::Elapsed> for BackendError {
    fn from(err: tokio::time::error::Elapsed) -> Self {
        Self::timeout(err.to_string())
    }
}

impl From<std::io::Error> for BackendError {
    fn from(err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::TimedOut => Self::timeout(err.to_string()),
            _ => Self::new(err.to_string()),
        }
    }
}

impl From<String> for BackendError {
    fn from(message: String) -> Self {
        Self::new(message)
    }
}

impl From<&str> for BackendError {
    fn from(message: &str) -> Self {
        Self::new(message)
    }
}
