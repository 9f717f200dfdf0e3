//! Endpoint registry
//!
//! Groups concrete endpoint records under their logical model name and
//! spreads load across duplicates with a per-group round-robin cursor.
//! Groups are independent: resolving one name never contends with another.

mod group;
mod record;
mod store;


pub use record::{Credentials, EndpointId, EndpointRecord};
pub use store::EndpointRegistry;
