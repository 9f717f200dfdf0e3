//! Fallback orchestrator

use std::future::Future;
use std::sync::Arc;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use super::observer::{AttemptEvent, AttemptObserver, TracingObserver};
use super::types::{AttemptOutcome, AttemptRecord, Routed, SkipReason};
use crate::classify::{BackendError, Classification, ErrorClassifier, ErrorKind};
use crate::config::{ModelSelection, RoutingConfig};
use crate::cooldown::CooldownTracker;
use crate::error::{RoutingError, RoutingResult};
use crate::registry::{EndpointRecord, EndpointRegistry};
use crate::throttle::RpmGate;

/// Drives one logical call across a fallback chain.
///
/// Holds only shared handles; all routing state lives in the registry and
/// the cooldown tracker, so one orchestrator serves any number of concurrent
/// calls.
#[derive(Clone)]
pub struct FallbackOrchestrator {
    registry: Arc<EndpointRegistry>,
    cooldowns: Arc<CooldownTracker>,
    classifier: Arc<ErrorClassifier>,
    rpm_gate: Option<Arc<RpmGate>>,
    observer: Arc<dyn AttemptObserver>,
}

impl FallbackOrchestrator {
    /// Create an orchestrator with the built-in classifier, no RPM gate and
    /// the tracing observer
    pub fn new(registry: Arc<EndpointRegistry>, cooldowns: Arc<CooldownTracker>) -> Self {
        Self {
            registry,
            cooldowns,
            classifier: Arc::new(ErrorClassifier::new()),
            rpm_gate: None,
            observer: Arc::new(TracingObserver),
        }
    }

    /// Build registry, tracker and gate from configuration
    pub fn from_config(config: &RoutingConfig) -> RoutingResult<Self> {
        config.validate()?;
        let registry = Arc::new(EndpointRegistry::from_configs(&config.model_list)?);
        let cooldowns = Arc::new(CooldownTracker::with_durations(config.cooldown.clone()));

        let mut orchestrator = Self::new(registry, cooldowns);
        if config.rate_limit.enabled {
            orchestrator = orchestrator
                .with_rpm_gate(Arc::new(RpmGate::from_settings(&config.rate_limit)));
        }
        Ok(orchestrator)
    }

    /// Use a custom classifier
    pub fn with_classifier(mut self, classifier: ErrorClassifier) -> Self {
        self.classifier = Arc::new(classifier);
        self
    }

    /// Gate endpoints that carry an `rpm` hint
    pub fn with_rpm_gate(mut self, gate: Arc<RpmGate>) -> Self {
        self.rpm_gate = Some(gate);
        self
    }

    /// Receive one event per attempt
    pub fn with_observer(mut self, observer: Arc<dyn AttemptObserver>) -> Self {
        self.observer = observer;
        self
    }

    pub fn registry(&self) -> &Arc<EndpointRegistry> {
        &self.registry
    }

    pub fn cooldowns(&self) -> &Arc<CooldownTracker> {
        &self.cooldowns
    }

    /// Run `work` against `primary`, then each of `fallbacks` in order,
    /// until one succeeds.
    ///
    /// `work` receives the chosen endpoint and a child of `cancel`. If
    /// `cancel` fires while `work` is in flight, the work future is dropped
    /// and the call fails with [`ErrorKind::UserAbort`] without trying any
    /// further candidate.
    pub async fn execute<T, F, Fut>(
        &self,
        primary: &str,
        fallbacks: &[&str],
        cancel: &CancellationToken,
        mut work: F,
    ) -> RoutingResult<Routed<T>>
    where
        F: FnMut(EndpointRecord, CancellationToken) -> Fut,
        Fut: Future<Output = Result<T, BackendError>>,
    {
        let candidates = std::iter::once(primary).chain(fallbacks.iter().copied());
        self.walk(candidates, cancel, &mut work).await
    }

    /// [`execute`](Self::execute) over a configured selection
    pub async fn execute_selection<T, F, Fut>(
        &self,
        selection: &ModelSelection,
        cancel: &CancellationToken,
        mut work: F,
    ) -> RoutingResult<Routed<T>>
    where
        F: FnMut(EndpointRecord, CancellationToken) -> Fut,
        Fut: Future<Output = Result<T, BackendError>>,
    {
        self.walk(selection.candidates(), cancel, &mut work).await
    }

    async fn walk<'a, T, F, Fut>(
        &self,
        candidates: impl Iterator<Item = &'a str>,
        cancel: &CancellationToken,
        work: &mut F,
    ) -> RoutingResult<Routed<T>>
    where
        F: FnMut(EndpointRecord, CancellationToken) -> Fut,
        Fut: Future<Output = Result<T, BackendError>>,
    {
        let mut attempts = Vec::new();

        for candidate in candidates {
            if cancel.is_cancelled() {
                return Err(self.abort(
                    candidate,
                    None,
                    BackendError::cancelled(),
                    ErrorKind::UserAbort,
                    attempts,
                ));
            }

            // Unconfigured names are a silent skip, not a failure
            let endpoint = match self.registry.resolve(candidate) {
                Ok(endpoint) => endpoint,
                Err(_) => {
                    tracing::debug!(candidate, "No endpoints registered, skipping candidate");
                    continue;
                }
            };
            let id = endpoint.id().clone();
            let now = Instant::now();

            if let Some(entry) = self.cooldowns.active_entry(&id, now) {
                tracing::debug!(
                    candidate,
                    endpoint = %id,
                    kind = %entry.last_error_kind,
                    remaining_secs = entry.suppressed_until.saturating_duration_since(now).as_secs(),
                    "Endpoint cooling down, skipping candidate"
                );
                self.push(
                    &mut attempts,
                    AttemptRecord::skipped(
                        candidate,
                        SkipReason::Cooldown,
                        Some(entry.last_error_kind),
                    ),
                );
                continue;
            }

            if let (Some(gate), Some(rpm)) = (&self.rpm_gate, endpoint.rpm_hint()) {
                if !gate.try_acquire(&id, rpm, now) {
                    self.push(
                        &mut attempts,
                        AttemptRecord::skipped(candidate, SkipReason::Throttled, None),
                    );
                    continue;
                }
            }

            tracing::debug!(candidate, endpoint = %id, "Dispatching to endpoint");
            let started = Instant::now();
            let call = work(endpoint.clone(), cancel.child_token());
            let result = tokio::select! {
                biased;
                _ = cancel.cancelled() => Err(BackendError::cancelled()),
                result = call => result,
            };
            let elapsed = started.elapsed();

            let error = match result {
                Ok(value) => {
                    self.cooldowns.record_success(&id);
                    self.push(
                        &mut attempts,
                        AttemptRecord::called(
                            candidate,
                            &id,
                            AttemptOutcome::Success,
                            None,
                            elapsed,
                        ),
                    );
                    if attempts.len() > 1 {
                        tracing::info!(
                            candidate,
                            endpoint = %id,
                            attempts = attempts.len(),
                            "Request served after fallback"
                        );
                    }
                    return Ok(Routed {
                        value,
                        endpoint,
                        attempts,
                    });
                }
                Err(error) => error,
            };

            // Caller cancellation is decided here, never by the rule table
            let classification = if cancel.is_cancelled() {
                Classification::from(ErrorKind::UserAbort)
            } else {
                self.classifier.classify(&error)
            };
            if !classification.retriable {
                self.push(
                    &mut attempts,
                    AttemptRecord::called(
                        candidate,
                        &id,
                        AttemptOutcome::NonRetriableFailure,
                        Some(classification.kind),
                        elapsed,
                    ),
                );
                return Err(self.abort(candidate, Some(&endpoint), error, classification.kind, attempts));
            }

            self.cooldowns
                .record_failure(&id, classification.kind, Instant::now());
            self.push(
                &mut attempts,
                AttemptRecord::called(
                    candidate,
                    &id,
                    AttemptOutcome::RetriableFailure,
                    Some(classification.kind),
                    elapsed,
                ),
            );
            tracing::warn!(
                candidate,
                endpoint = %id,
                kind = %classification.kind,
                error = %error,
                "Candidate failed with retriable error, advancing"
            );
        }

        tracing::warn!(attempts = attempts.len(), "Fallback chain exhausted");
        Err(RoutingError::exhausted(attempts))
    }

    fn push(&self, attempts: &mut Vec<AttemptRecord>, record: AttemptRecord) {
        self.observer.on_attempt(&AttemptEvent::from(&record));
        attempts.push(record);
    }

    fn abort(
        &self,
        candidate: &str,
        endpoint: Option<&EndpointRecord>,
        error: BackendError,
        kind: ErrorKind,
        attempts: Vec<AttemptRecord>,
    ) -> RoutingError {
        tracing::warn!(
            candidate,
            kind = %kind,
            error = %error,
            "Non-retriable failure, aborting fallback chain"
        );
        RoutingError::NonRetriable {
            kind,
            candidate: candidate.to_string(),
            endpoint: endpoint.map(|e| e.id().clone()),
            source: error,
            attempts,
        }
    }
}

impl std::fmt::Debug for FallbackOrchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FallbackOrchestrator")
            .field("models", &self.registry.list_names().len())
            .field("cooling_down", &self.cooldowns.len())
            .field("rpm_gate", &self.rpm_gate.is_some())
            .finish()
    }
}
