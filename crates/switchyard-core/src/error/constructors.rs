//! Constructor methods for RoutingError

use super::exhausted::ExhaustedError;
use super::types::RoutingError;
use crate::fallback::AttemptRecord;

impl RoutingError {
    /// Create a not-found error for a logical model name
    pub fn not_found(name: impl Into<String>) -> Self {
        Self::NotFound { name: name.into() }
    }

    /// Create a new configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            field: None,
            context: None,
        }
    }

    /// Create a configuration error pointing at a specific field
    pub fn config_field(message: impl Into<String>, field: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            field: Some(field.into()),
            context: None,
        }
    }

    /// Create an exhaustion error from the attempt trail
    pub fn exhausted(attempts: Vec<AttemptRecord>) -> Self {
        Self::Exhausted(ExhaustedError { attempts })
    }
}
