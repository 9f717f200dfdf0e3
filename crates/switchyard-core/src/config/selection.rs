//! Primary model + fallback selection

use serde::{Deserialize, Serialize};

/// Which logical model to use, and what to try next when it fails.
///
/// Deserializes from either a bare name or a structured value:
///
/// ```
/// use switchyard_core::config::ModelSelection;
///
/// let flat: ModelSelection = serde_json::from_str(r#""coding""#).unwrap();
/// assert_eq!(flat.primary, "coding");
///
/// let full: ModelSelection =
///     serde_json::from_str(r#"{"primary": "coding", "fallbacks": ["cheap"]}"#).unwrap();
/// assert_eq!(full.fallbacks, vec!["cheap"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawSelection")]
pub struct ModelSelection {
    pub primary: String,
    pub fallbacks: Vec<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawSelection {
    Name(String),
    Structured {
        primary: String,
        #[serde(default)]
        fallbacks: Vec<String>,
    },
}

impl From<RawSelection> for ModelSelection {
    fn from(raw: RawSelection) -> Self {
        match raw {
            RawSelection::Name(primary) => Self {
                primary,
                fallbacks: Vec::new(),
            },
            RawSelection::Structured { primary, fallbacks } => Self { primary, fallbacks },
        }
    }
}

impl ModelSelection {
    /// Selection without fallbacks
    pub fn new(primary: impl Into<String>) -> Self {
        Self {
            primary: primary.into(),
            fallbacks: Vec::new(),
        }
    }

    /// Append a fallback candidate
    pub fn with_fallback(mut self, name: impl Into<String>) -> Self {
        self.fallbacks.push(name.into());
        self
    }

    /// `[primary] + fallbacks`, order and duplicates preserved
    pub fn candidates(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.primary.as_str()).chain(self.fallbacks.iter().map(String::as_str))
    }
}

/// Per-agent default model settings.
///
/// `model` may itself be structured; `model_fallbacks` is the flat-pair form.
/// When both carry fallbacks, the structured ones come first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentModelDefaults {
    pub model: ModelSelection,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub model_fallbacks: Vec<String>,
}

impl AgentModelDefaults {
    /// Merge both forms into one selection
    pub fn selection(&self) -> ModelSelection {
        let mut selection = self.model.clone();
        selection
            .fallbacks
            .extend(self.model_fallbacks.iter().cloned());
        selection
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_candidates_preserve_order_and_duplicates() {
        let selection = ModelSelection::new("a")
            .with_fallback("b")
            .with_fallback("a")
            .with_fallback("c");
        let names: Vec<_> = selection.candidates().collect();
        assert_eq!(names, vec!["a", "b", "a", "c"]);
    }

    #[test]
    fn test_flat_pair_form() {
        let json = r#"{"model": "primary", "model_fallbacks": ["f1", "f2"]}"#;
        let defaults: AgentModelDefaults = serde_json::from_str(json).unwrap();
        let selection = defaults.selection();
        assert_eq!(selection.primary, "primary");
        assert_eq!(selection.fallbacks, vec!["f1", "f2"]);
    }

    #[test]
    fn test_structured_form() {
        let json = r#"{"model": {"primary": "p", "fallbacks": ["s1"]}, "model_fallbacks": ["f1"]}"#;
        let defaults: AgentModelDefaults = serde_json::from_str(json).unwrap();
        assert_eq!(defaults.selection().fallbacks, vec!["s1", "f1"]);
    }

    #[test]
    fn test_structured_without_fallbacks() {
        let selection: ModelSelection = serde_json::from_str(r#"{"primary": "p"}"#).unwrap();
        assert_eq!(selection, ModelSelection::new("p"));
    }

    #[test]
    fn test_serialized_form_reads_back() {
        let selection = ModelSelection::new("p").with_fallback("f");
        let json = serde_json::to_string(&selection).unwrap();
        let back: ModelSelection = serde_json::from_str(&json).unwrap();
        assert_eq!(back, selection);
    }
}
