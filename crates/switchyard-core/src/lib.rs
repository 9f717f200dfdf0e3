//! Switchyard Core Library
//!
//! Provider selection and fallback for LLM calls: a registry of concrete
//! endpoints grouped under logical model names, round-robin load spreading,
//! error classification, per-endpoint cooldowns and an orchestrator that
//! walks a primary plus fallbacks until one call succeeds.
//!
//! The crate performs no I/O of its own. Callers hand the orchestrator a
//! work function that talks to the chosen endpoint.

pub mod classify;
pub mod config;
pub mod cooldown;
pub mod error;
pub mod fallback;
pub mod registry;
pub mod throttle;

// Re-export commonly used types
pub use classify::{BackendError, Classification, ErrorClassifier, ErrorKind, classify};
pub use config::{
    AgentModelDefaults, CooldownDurations, ModelEndpointConfig, ModelSelection,
    RateLimitSettings, RoutingConfig,
};
pub use cooldown::{CooldownStatus, CooldownTracker};
pub use error::{ExhaustedError, RoutingError, RoutingResult};
pub use fallback::{
    AttemptEvent, AttemptObserver, AttemptOutcome, AttemptRecord, FallbackOrchestrator, Routed,
    SkipReason, TracingObserver,
};
pub use registry::{Credentials, EndpointId, EndpointRecord, EndpointRegistry};
pub use throttle::RpmGate;
pub use tokio_util::sync::CancellationToken;
