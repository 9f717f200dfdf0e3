//! Rule-table driven error classifier

use once_cell::sync::Lazy;

use super::backend::BackendError;
use super::kind::ErrorKind;
use super::rules::{ClassificationRule, default_rules};

static DEFAULT_CLASSIFIER: Lazy<ErrorClassifier> = Lazy::new(ErrorClassifier::new);

/// Classify with the built-in rule table
pub fn classify(error: &BackendError) -> Classification {
    DEFAULT_CLASSIFIER.classify(error)
}

/// Result of classifying one failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub kind: ErrorKind,
    pub retriable: bool,
}

impl From<ErrorKind> for Classification {
    fn from(kind: ErrorKind) -> Self {
        Self {
            kind,
            retriable: kind.is_retriable(),
        }
    }
}

/// Maps backend failures onto [`ErrorKind`]s.
///
/// Stateless once built; share it freely behind an `Arc`.
#[derive(Debug, Clone)]
pub struct ErrorClassifier {
    rules: Vec<ClassificationRule>,
}

impl ErrorClassifier {
    /// Create a classifier with the built-in rules
    pub fn new() -> Self {
        Self {
            rules: default_rules(),
        }
    }

    /// Create a classifier with custom rules evaluated before the built-ins
    pub fn with_rules(custom: impl IntoIterator<Item = ClassificationRule>) -> Self {
        let mut rules: Vec<_> = custom.into_iter().collect();
        rules.extend(default_rules());
        Self { rules }
    }

    /// Create a classifier from exactly these rules, no built-ins
    pub fn from_rules(rules: Vec<ClassificationRule>) -> Self {
        Self { rules }
    }

    /// Rules in evaluation order
    pub fn rules(&self) -> &[ClassificationRule] {
        &self.rules
    }

    /// Classify a failure. First matching rule wins.
    pub fn classify(&self, error: &BackendError) -> Classification {
        let message_lower = error.message().to_lowercase();

        let kind = self
            .rules
            .iter()
            .find(|rule| rule.predicate.matches(error, &message_lower))
            .map(|rule| rule.kind)
            .unwrap_or(ErrorKind::Unknown);

        Classification::from(kind)
    }
}

impl Default for ErrorClassifier {
    fn default() -> Self {
        Self::new()
    }
}
