//! Per-attempt observability hook

use serde::Serialize;

use super::types::{AttemptOutcome, AttemptRecord, SkipReason};
use crate::classify::ErrorKind;

/// Structured event emitted once per attempt, for logs and metrics
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttemptEvent {
    pub candidate: String,
    /// Endpoint identity, or `skipped-cooldown` / `skipped-throttled`
    pub endpoint: String,
    pub outcome: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<ErrorKind>,
    pub elapsed_ms: u64,
}

impl From<&AttemptRecord> for AttemptEvent {
    fn from(record: &AttemptRecord) -> Self {
        let endpoint = match (&record.endpoint, record.outcome) {
            (Some(id), _) => id.to_string(),
            (None, AttemptOutcome::Skipped(SkipReason::Throttled)) => {
                "skipped-throttled".to_string()
            }
            (None, _) => "skipped-cooldown".to_string(),
        };
        Self {
            candidate: record.candidate.clone(),
            endpoint,
            outcome: record.outcome.as_str(),
            error_kind: record.error_kind,
            elapsed_ms: u64::try_from(record.elapsed.as_millis()).unwrap_or(u64::MAX),
        }
    }
}

/// Receives one event per attempt. Must not block.
#[cfg_attr(test, mockall::automock)]
pub trait AttemptObserver: Send + Sync {
    fn on_attempt(&self, event: &AttemptEvent);
}

/// Default observer: forwards events to `tracing`
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl AttemptObserver for TracingObserver {
    fn on_attempt(&self, event: &AttemptEvent) {
        match event.error_kind {
            Some(kind) => tracing::debug!(
                candidate = %event.candidate,
                endpoint = %event.endpoint,
                outcome = event.outcome,
                kind = %kind,
                elapsed_ms = event.elapsed_ms,
                "Routing attempt"
            ),
            None => tracing::debug!(
                candidate = %event.candidate,
                endpoint = %event.endpoint,
                outcome = event.outcome,
                elapsed_ms = event.elapsed_ms,
                "Routing attempt"
            ),
        }
    }
}
