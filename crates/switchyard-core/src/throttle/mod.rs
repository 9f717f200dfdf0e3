//! Requests-per-minute gate
//!
//! Non-blocking token buckets keyed by endpoint identity. The orchestrator
//! asks the gate before calling an endpoint that carries an `rpm` hint and
//! skips the endpoint when its bucket is empty. Nothing here ever waits.

mod bucket;
mod gate;

pub use gate::RpmGate;
