//! Attempt trail types

use std::fmt;
use std::time::Duration;

use crate::classify::ErrorKind;
use crate::registry::{EndpointId, EndpointRecord};

/// Why a candidate was passed over without a call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The resolved endpoint is on cooldown
    Cooldown,
    /// The resolved endpoint spent its requests-per-minute budget
    Throttled,
}

/// How one attempt ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttemptOutcome {
    Success,
    RetriableFailure,
    NonRetriableFailure,
    Skipped(SkipReason),
}

impl AttemptOutcome {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::RetriableFailure => "retriable_failure",
            Self::NonRetriableFailure => "non_retriable_failure",
            Self::Skipped(SkipReason::Cooldown) => "skipped_cooldown",
            Self::Skipped(SkipReason::Throttled) => "skipped_throttled",
        }
    }

    pub fn is_skip(self) -> bool {
        matches!(self, Self::Skipped(_))
    }
}

impl fmt::Display for AttemptOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One step of a fallback walk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttemptRecord {
    /// Logical name tried at this step
    pub candidate: String,
    /// Endpoint that was called, `None` when the step was skipped
    pub endpoint: Option<EndpointId>,
    pub outcome: AttemptOutcome,
    /// Classified failure kind; for cooldown skips, the kind that caused
    /// the cooldown
    pub error_kind: Option<ErrorKind>,
    pub elapsed: Duration,
}

impl AttemptRecord {
    pub(crate) fn skipped(
        candidate: &str,
        reason: SkipReason,
        error_kind: Option<ErrorKind>,
    ) -> Self {
        Self {
            candidate: candidate.to_string(),
            endpoint: None,
            outcome: AttemptOutcome::Skipped(reason),
            error_kind,
            elapsed: Duration::ZERO,
        }
    }

    pub(crate) fn called(
        candidate: &str,
        endpoint: &EndpointId,
        outcome: AttemptOutcome,
        error_kind: Option<ErrorKind>,
        elapsed: Duration,
    ) -> Self {
        Self {
            candidate: candidate.to_string(),
            endpoint: Some(endpoint.clone()),
            outcome,
            error_kind,
            elapsed,
        }
    }
}

impl fmt::Display for AttemptRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.endpoint {
            Some(endpoint) => write!(f, "{} via {}: {}", self.candidate, endpoint, self.outcome)?,
            None => write!(f, "{}: {}", self.candidate, self.outcome)?,
        }
        if let Some(kind) = self.error_kind {
            write!(f, " ({})", kind)?;
        }
        if !self.outcome.is_skip() {
            write!(f, " after {}ms", self.elapsed.as_millis())?;
        }
        Ok(())
    }
}

/// A successful routed call
#[derive(Debug, Clone)]
pub struct Routed<T> {
    /// Value produced by the work function
    pub value: T,
    /// Endpoint that produced it
    pub endpoint: EndpointRecord,
    /// Full attempt trail, the last entry is the success
    pub attempts: Vec<AttemptRecord>,
}

impl<T> Routed<T> {
    pub fn into_inner(self) -> T {
        self.value
    }

    /// Whether anything before the serving endpoint was tried or skipped
    pub fn fell_back(&self) -> bool {
        self.attempts.len() > 1
    }
}
