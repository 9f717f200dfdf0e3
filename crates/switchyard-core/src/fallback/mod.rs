//! Fallback orchestration
//!
//! Walks `[primary] + fallbacks` strictly in order. For each candidate it
//! resolves one endpoint, skips it while cooling down, otherwise calls the
//! caller's work function. Success returns at once, a non-retriable failure
//! aborts the whole chain, a retriable failure cools the endpoint down and
//! moves on. Walking off the end yields an exhaustion error carrying every
//! attempt.

mod observer;
mod orchestrator;
mod types;

#[cfg(test)]
mod tests;

pub use observer::{AttemptEvent, AttemptObserver, TracingObserver};
pub use orchestrator::FallbackOrchestrator;
pub use types::{AttemptOutcome, AttemptRecord, Routed, SkipReason};

#[cfg(test)]
pub(crate) use observer::MockAttemptObserver;
