//! Error types for Switchyard
//!
//! Every fallible operation in the engine returns [`RoutingResult`]. Callers see
//! one of three routing outcomes besides configuration problems:
//! - `NotFound`: a logical name has no registered endpoints
//! - `NonRetriable`: the request itself is unusable, the chain stopped early
//! - `Exhausted`: every candidate failed or was skipped

mod constructors;
mod exhausted;
mod types;

pub use exhausted::ExhaustedError;
pub use types::{ResultExt, RoutingError, RoutingResult};
