//! Cooldown tracking
//!
//! Timed suppression of endpoints that failed with a retriable error. An
//! endpoint on cooldown is skipped without being called until its window
//! passes or it serves a request successfully.

mod tracker;


pub use tracker::{CooldownEntry, CooldownStatus, CooldownTracker};
