//! Error classification
//!
//! Maps any backend failure onto a fixed taxonomy of [`ErrorKind`]s and
//! decides whether another provider is worth trying. Classification is a
//! rule table: ordered `(predicate, kind)` pairs evaluated top to bottom,
//! first match wins, [`ErrorKind::Unknown`] when nothing matches.

mod backend;
mod classifier;
mod kind;
mod rules;


pub use backend::{BackendError, FailureSignal};
pub use classifier::{Classification, ErrorClassifier, classify};
pub use kind::ErrorKind;
pub use rules::{ClassificationRule, Predicate, default_rules};
