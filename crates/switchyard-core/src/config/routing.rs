//! Top-level routing configuration

use serde::{Deserialize, Serialize};

use super::cooldown::CooldownDurations;
use super::endpoint::ModelEndpointConfig;
use super::rate_limit::RateLimitSettings;
use crate::error::{ResultExt, RoutingResult};

/// Everything the engine needs to build a registry and its policies
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoutingConfig {
    /// Configured endpoints, grouped by `model_name` in list order
    pub model_list: Vec<ModelEndpointConfig>,
    /// Cooldown window per error kind
    pub cooldown: CooldownDurations,
    /// Optional RPM gate
    pub rate_limit: RateLimitSettings,
}

impl RoutingConfig {
    /// Create a config from an endpoint list with default policies
    pub fn new(model_list: Vec<ModelEndpointConfig>) -> Self {
        Self {
            model_list,
            ..Default::default()
        }
    }

    /// Set the cooldown table
    pub fn with_cooldown(mut self, cooldown: CooldownDurations) -> Self {
        self.cooldown = cooldown;
        self
    }

    /// Set the RPM gate settings
    pub fn with_rate_limit(mut self, rate_limit: RateLimitSettings) -> Self {
        self.rate_limit = rate_limit;
        self
    }

    /// Validate every `model_list` entry, reporting the offending index
    pub fn validate(&self) -> RoutingResult<()> {
        for (i, entry) in self.model_list.iter().enumerate() {
            entry.validate().context(format!("model_list[{}]", i))?;
        }
        Ok(())
    }
}
