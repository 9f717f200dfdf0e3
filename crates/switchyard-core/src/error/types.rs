//! Core error types for the routing engine

use thiserror::Error;

use super::exhausted::ExhaustedError;
use crate::classify::{BackendError, ErrorKind};
use crate::fallback::AttemptRecord;
use crate::registry::EndpointId;

/// Result type alias for routing operations
pub type RoutingResult<T> = Result<T, RoutingError>;

/// Main error type for the routing engine
#[derive(Error, Debug, Clone)]
pub enum RoutingError {
    /// No endpoint group is registered under the logical name
    #[error("Model not found: {name}")]
    NotFound { name: String },

    /// A candidate failed in a way no other provider can fix
    #[error("Non-retriable {kind} error from '{candidate}': {source}")]
    NonRetriable {
        kind: ErrorKind,
        candidate: String,
        endpoint: Option<EndpointId>,
        #[source]
        source: BackendError,
        /// Attempts made before (and including) the aborting one
        attempts: Vec<AttemptRecord>,
    },

    /// Every candidate in the chain failed or was skipped
    #[error(transparent)]
    Exhausted(#[from] ExhaustedError),

    /// Invalid endpoint or routing configuration
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        field: Option<String>,
        context: Option<String>,
    },
}

impl RoutingError {
    /// Get the error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "ROUTING_NOT_FOUND",
            Self::NonRetriable { .. } => "ROUTING_NON_RETRIABLE",
            Self::Exhausted(_) => "ROUTING_EXHAUSTED",
            Self::Config { .. } => "ROUTING_CONFIG",
        }
    }

    /// The classified kind, for errors that came out of a backend call
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            Self::NonRetriable { kind, .. } => Some(*kind),
            Self::Exhausted(exhausted) => exhausted.last_kind(),
            Self::NotFound { .. } | Self::Config { .. } => None,
        }
    }

    /// Attempt trail carried by the error, empty for non-routing failures
    pub fn attempts(&self) -> &[AttemptRecord] {
        match self {
            Self::NonRetriable { attempts, .. } => attempts,
            Self::Exhausted(exhausted) => &exhausted.attempts,
            Self::NotFound { .. } | Self::Config { .. } => &[],
        }
    }

    /// Whether trying the same call again later could plausibly succeed
    pub fn is_retriable(&self) -> bool {
        matches!(self, Self::Exhausted(_))
    }

    /// Whether the caller cancelled the call
    pub fn is_user_abort(&self) -> bool {
        matches!(
            self,
            Self::NonRetriable {
                kind: ErrorKind::UserAbort,
                ..
            }
        )
    }
}

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to an error
    fn context<C: std::fmt::Display>(self, context: C) -> RoutingResult<T>;
}

impl<T> ResultExt<T> for RoutingResult<T> {
    fn context<C: std::fmt::Display>(self, context: C) -> RoutingResult<T> {
        self.map_err(|e| match e {
            RoutingError::Config {
                message,
                field,
                context: None,
            } => RoutingError::Config {
                message,
                field,
                context: Some(context.to_string()),
            },
            RoutingError::Config {
                message,
                field,
                context: Some(existing),
            } => RoutingError::Config {
                message,
                field,
                context: Some(format!("{}: {}", context, existing)),
            },
            other => other,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use crate::fallback::AttemptOutcome;

    #[test]
    fn test_error_codes() {
        assert_eq!(
            RoutingError::not_found("m").error_code(),
            "ROUTING_NOT_FOUND"
        );
        assert_eq!(RoutingError::config("bad").error_code(), "ROUTING_CONFIG");
        assert_eq!(
            RoutingError::exhausted(Vec::new()).error_code(),
            "ROUTING_EXHAUSTED"
        );
    }

    #[test]
    fn test_kind_of_exhausted_is_last_attempt_kind() {
        let attempts = vec![
            AttemptRecord {
                candidate: "a".into(),
                endpoint: None,
                outcome: AttemptOutcome::RetriableFailure,
                error_kind: Some(ErrorKind::RateLimit),
                elapsed: Duration::ZERO,
            },
            AttemptRecord {
                candidate: "b".into(),
                endpoint: None,
                outcome: AttemptOutcome::RetriableFailure,
                error_kind: Some(ErrorKind::Timeout),
                elapsed: Duration::ZERO,
            },
        ];
        let err = RoutingError::exhausted(attempts);
        assert_eq!(err.kind(), Some(ErrorKind::Timeout));
        assert_eq!(err.attempts().len(), 2);
        assert!(err.is_retriable());
    }

    #[test]
    fn test_context_only_decorates_config_errors() {
        let result: RoutingResult<()> = Err(RoutingError::config_field("missing", "model"));
        let err = result.context("model_list[2]").unwrap_err();
        match err {
            RoutingError::Config { context, .. } => {
                assert_eq!(context.as_deref(), Some("model_list[2]"))
            }
            other => panic!("unexpected error: {other}"),
        }

        let result: RoutingResult<()> = Err(RoutingError::not_found("m"));
        assert!(matches!(
            result.context("ignored"),
            Err(RoutingError::NotFound { .. })
        ));
    }

    #[test]
    fn test_user_abort_detection() {
        let err = RoutingError::NonRetriable {
            kind: ErrorKind::UserAbort,
            candidate: "m".into(),
            endpoint: None,
            source: BackendError::cancelled(),
            attempts: Vec::new(),
        };
        assert!(err.is_user_abort());
        assert!(!err.is_retriable());
        assert!(err.to_string().contains("user_abort"));
    }
}
