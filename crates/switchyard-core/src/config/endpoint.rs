//! Endpoint entries of the `model_list`

use serde::{Deserialize, Serialize};

use crate::error::{RoutingError, RoutingResult};
use crate::registry::{Credentials, EndpointRecord};

/// Protocol assumed when `model` carries no `protocol/` prefix
pub const DEFAULT_PROTOCOL: &str = "openai";

/// One configured endpoint.
///
/// `model_name` is the user-facing alias and is not unique: several entries
/// with the same alias are load-balanced round-robin.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelEndpointConfig {
    /// User-facing alias for the model
    pub model_name: String,
    /// `[protocol/]model-identifier`, e.g. `anthropic/claude-sonnet-4`
    pub model: String,
    /// API endpoint URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_base: Option<String>,
    /// API authentication key
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// HTTP proxy URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proxy: Option<String>,
    /// Authentication method for special providers (oauth, token)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth_method: Option<String>,
    /// Connection mode for CLI-backed providers (stdio, grpc)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connect_mode: Option<String>,
    /// Requests per minute the endpoint tolerates
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rpm: Option<u32>,
    /// Name of the max-tokens request field, e.g. `max_completion_tokens`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens_field: Option<String>,
}

impl ModelEndpointConfig {
    /// Create a config with the two required fields
    pub fn new(model_name: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            model_name: model_name.into(),
            model: model.into(),
            ..Default::default()
        }
    }

    /// Set the API key
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Set the API base URL
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = Some(api_base.into());
        self
    }

    /// Set the proxy URL
    pub fn with_proxy(mut self, proxy: impl Into<String>) -> Self {
        self.proxy = Some(proxy.into());
        self
    }

    /// Set the requests-per-minute hint
    pub fn with_rpm(mut self, rpm: u32) -> Self {
        self.rpm = Some(rpm);
        self
    }

    /// Check that all required fields are present
    pub fn validate(&self) -> RoutingResult<()> {
        if self.model_name.trim().is_empty() {
            return Err(RoutingError::config_field(
                "model_name is required",
                "model_name",
            ));
        }
        if self.model.trim().is_empty() {
            return Err(RoutingError::config_field("model is required", "model"));
        }
        Ok(())
    }

    /// Split `model` into protocol and model identifier.
    ///
    /// Only the first `/` separates, so `nvidia/meta/llama-3.1` yields
    /// `("nvidia", "meta/llama-3.1")`. No prefix means [`DEFAULT_PROTOCOL`].
    pub fn parse_protocol(&self) -> (&str, &str) {
        match self.model.split_once('/') {
            Some((protocol, model_id)) => (protocol, model_id),
            None => (DEFAULT_PROTOCOL, self.model.as_str()),
        }
    }

    /// Credential fields of this entry
    pub fn credentials(&self) -> Credentials {
        Credentials {
            api_key: self.api_key.clone(),
            api_base: self.api_base.clone(),
            proxy: self.proxy.clone(),
            auth_method: self.auth_method.clone(),
            connect_mode: self.connect_mode.clone(),
        }
    }

    /// Validate and convert into a registry record
    pub fn to_record(&self) -> RoutingResult<EndpointRecord> {
        self.validate()?;
        let (protocol, model_id) = self.parse_protocol();
        let record = EndpointRecord::new(
            self.model_name.clone(),
            format!("{}/{}", protocol, model_id),
            self.credentials(),
        )
        .with_rpm_hint(self.rpm.filter(|rpm| *rpm > 0))
        .with_max_tokens_field(self.max_tokens_field.clone());
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_protocol() {
        let config = ModelEndpointConfig::new("gpt", "openai/gpt-4o");
        assert_eq!(config.parse_protocol(), ("openai", "gpt-4o"));

        let config = ModelEndpointConfig::new("claude", "anthropic/claude-3");
        assert_eq!(config.parse_protocol(), ("anthropic", "claude-3"));

        let config = ModelEndpointConfig::new("gpt", "gpt-4o");
        assert_eq!(config.parse_protocol(), ("openai", "gpt-4o"));

        let config = ModelEndpointConfig::new("llama", "nvidia/meta/llama-3.1-8b-instruct");
        assert_eq!(
            config.parse_protocol(),
            ("nvidia", "meta/llama-3.1-8b-instruct")
        );
    }

    #[test]
    fn test_validate() {
        assert!(ModelEndpointConfig::new("a", "openai/x").validate().is_ok());

        let err = ModelEndpointConfig::new("", "openai/x").validate().unwrap_err();
        assert!(matches!(err, RoutingError::Config { field: Some(ref f), .. } if f == "model_name"));

        let err = ModelEndpointConfig::new("a", " ").validate().unwrap_err();
        assert!(matches!(err, RoutingError::Config { field: Some(ref f), .. } if f == "model"));
    }

    #[test]
    fn test_to_record_normalizes_target() {
        let record = ModelEndpointConfig::new("fast", "gpt-4o-mini")
            .with_api_key("sk-test")
            .with_rpm(0)
            .to_record()
            .unwrap();

        assert_eq!(record.logical_name(), "fast");
        assert_eq!(record.target(), "openai/gpt-4o-mini");
        assert_eq!(record.rpm_hint(), None);
    }

    #[test]
    fn test_to_record_carries_max_tokens_field() {
        let json = r#"{
            "model_name": "reasoning",
            "model": "openai/o3",
            "api_key": "sk-test",
            "max_tokens_field": "max_completion_tokens"
        }"#;
        let config: ModelEndpointConfig = serde_json::from_str(json).unwrap();
        let record = config.to_record().unwrap();
        assert_eq!(record.max_tokens_field(), Some("max_completion_tokens"));

        // Same target and credentials share cooldown state regardless of the field
        let plain = ModelEndpointConfig::new("reasoning", "openai/o3")
            .with_api_key("sk-test")
            .to_record()
            .unwrap();
        assert_eq!(plain.max_tokens_field(), None);
        assert_eq!(plain.id(), record.id());
    }

    #[test]
    fn test_deserialize_from_json() {
        let json = r#"{
            "model_name": "coding",
            "model": "anthropic/claude-sonnet-4",
            "api_key": "sk-ant-123",
            "rpm": 50
        }"#;
        let config: ModelEndpointConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.model_name, "coding");
        assert_eq!(config.rpm, Some(50));
        assert!(config.proxy.is_none());
    }
}
