//! Aggregated failure for a fully walked fallback chain

use std::fmt;

use crate::classify::ErrorKind;
use crate::fallback::{AttemptOutcome, AttemptRecord};

/// Every candidate failed with a retriable error or was skipped
#[derive(Debug, Clone)]
pub struct ExhaustedError {
    /// Ordered attempt trail, one entry per tried or skipped candidate
    pub attempts: Vec<AttemptRecord>,
}

impl ExhaustedError {
    /// Kind of the last recorded failure or suppression
    pub fn last_kind(&self) -> Option<ErrorKind> {
        self.attempts.iter().rev().find_map(|a| a.error_kind)
    }

    /// Number of attempts that actually invoked a backend
    pub fn live_attempts(&self) -> usize {
        self.attempts
            .iter()
            .filter(|a| !matches!(a.outcome, AttemptOutcome::Skipped(_)))
            .count()
    }
}

impl fmt::Display for ExhaustedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.attempts.is_empty() {
            return write!(f, "All candidates exhausted: no endpoint configured");
        }

        write!(
            f,
            "All candidates exhausted after {} attempt(s)",
            self.attempts.len()
        )?;
        for attempt in &self.attempts {
            write!(f, "\n  - {}", attempt)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExhaustedError {}
