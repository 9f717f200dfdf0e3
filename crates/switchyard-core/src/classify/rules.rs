//! Classification rule table

use super::backend::{BackendError, FailureSignal};
use super::kind::ErrorKind;

/// Condition a rule tests against a failure
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    /// The failure carries this out-of-band signal
    Signal(FailureSignal),
    /// The failure carries one of these HTTP status codes
    Status(Vec<u16>),
    /// The lowercased message contains any of these needles
    Contains(Vec<String>),
}

impl Predicate {
    /// Build a text predicate, needles are lowercased once here
    pub fn contains<I, S>(needles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::Contains(
            needles
                .into_iter()
                .map(|n| n.as_ref().to_lowercase())
                .collect(),
        )
    }

    /// Build a status predicate
    pub fn status(codes: &[u16]) -> Self {
        Self::Status(codes.to_vec())
    }

    /// `message_lower` must already be lowercased
    pub(super) fn matches(&self, error: &BackendError, message_lower: &str) -> bool {
        match self {
            Self::Signal(signal) => error.signal() == Some(*signal),
            Self::Status(codes) => error.status().is_some_and(|s| codes.contains(&s)),
            Self::Contains(needles) => needles.iter().any(|n| message_lower.contains(n.as_str())),
        }
    }
}

/// One `(predicate, kind)` row of the table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassificationRule {
    pub predicate: Predicate,
    pub kind: ErrorKind,
}

impl ClassificationRule {
    pub fn new(predicate: Predicate, kind: ErrorKind) -> Self {
        Self { predicate, kind }
    }
}

/// Built-in rules, in evaluation order.
///
/// Out-of-band signals beat everything, then unambiguous status codes, then
/// message text. Generic 400/422 statuses come last so a more specific text
/// signal (e.g. an oversized context reported as 400) wins over them.
pub fn default_rules() -> Vec<ClassificationRule> {
    use ErrorKind::*;

    vec![
        ClassificationRule::new(Predicate::Signal(FailureSignal::Cancelled), UserAbort),
        ClassificationRule::new(Predicate::Signal(FailureSignal::DeadlineExceeded), Timeout),
        ClassificationRule::new(Predicate::status(&[429]), RateLimit),
        ClassificationRule::new(Predicate::status(&[402]), Billing),
        ClassificationRule::new(Predicate::status(&[401]), Auth),
        ClassificationRule::new(Predicate::status(&[413]), UnsupportedInput),
        ClassificationRule::new(Predicate::status(&[500, 502, 503, 529]), ServerError),
        ClassificationRule::new(Predicate::status(&[408, 504]), Timeout),
        ClassificationRule::new(
            Predicate::contains(["context canceled", "context cancelled", "cancelled by user"]),
            UserAbort,
        ),
        ClassificationRule::new(
            Predicate::contains([
                "deadline exceeded",
                "timeout",
                "timed out",
                "time-out",
                "gateway timeout",
            ]),
            Timeout,
        ),
        ClassificationRule::new(
            Predicate::contains([
                "rate_limit",
                "rate limit",
                "quota exceeded",
                "too many requests",
            ]),
            RateLimit,
        ),
        ClassificationRule::new(
            Predicate::contains([
                "insufficient credits",
                "insufficient balance",
                "payment required",
            ]),
            Billing,
        ),
        ClassificationRule::new(
            Predicate::contains([
                "invalid api key",
                "invalid_api_key",
                "expired token",
                "token expired",
            ]),
            Auth,
        ),
        ClassificationRule::new(
            Predicate::contains([
                "context_length_exceeded",
                "maximum context length",
                "too large",
                "exceeds the limit",
            ]),
            UnsupportedInput,
        ),
        ClassificationRule::new(
            Predicate::contains([
                "invalid_request",
                "schema",
                "string should match pattern",
                "invalid field",
                "malformed",
            ]),
            FormatError,
        ),
        ClassificationRule::new(
            Predicate::contains([
                "overloaded",
                "internal server error",
                "service unavailable",
                "bad gateway",
            ]),
            ServerError,
        ),
        ClassificationRule::new(Predicate::status(&[400, 422]), FormatError),
    ]
}
