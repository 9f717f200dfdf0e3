//! Routing configuration
//!
//! Serde types for the configuration this engine consumes. Loading files and
//! binding environment variables is left to the embedding application; these
//! types only describe and validate the already-parsed values.

mod cooldown;
mod endpoint;
mod rate_limit;
mod routing;
mod selection;

pub use cooldown::CooldownDurations;
pub use endpoint::{DEFAULT_PROTOCOL, ModelEndpointConfig};
pub use rate_limit::RateLimitSettings;
pub use routing::RoutingConfig;
pub use selection::{AgentModelDefaults, ModelSelection};
