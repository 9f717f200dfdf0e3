//! Per-endpoint RPM gate

use dashmap::DashMap;
use tokio::time::Instant;

use super::bucket::TokenBucket;
use crate::config::RateLimitSettings;
use crate::registry::EndpointId;

/// Per-endpoint token buckets sized from each endpoint's `rpm` hint
#[derive(Debug, Default)]
pub struct RpmGate {
    buckets: DashMap<EndpointId, TokenBucket>,
    burst: u32,
}

impl RpmGate {
    /// Create a gate with no extra burst
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a gate from settings
    pub fn from_settings(settings: &RateLimitSettings) -> Self {
        Self {
            buckets: DashMap::new(),
            burst: settings.burst,
        }
    }

    /// Take a request slot for `endpoint` at `now`.
    ///
    /// `rpm == 0` means unlimited. A bucket whose rate no longer matches the
    /// hint (the group was reconfigured) starts over full.
    pub fn try_acquire(&self, endpoint: &EndpointId, rpm: u32, now: Instant) -> bool {
        if rpm == 0 {
            return true;
        }

        let mut bucket = self
            .buckets
            .entry(endpoint.clone())
            .or_insert_with(|| TokenBucket::new(rpm, self.burst, now));
        if !bucket.matches_rate(rpm, self.burst) {
            *bucket = TokenBucket::new(rpm, self.burst, now);
        }

        let acquired = bucket.try_take(now);
        if !acquired {
            tracing::debug!(endpoint = %endpoint, rpm, "Endpoint request budget spent");
        }
        acquired
    }

    /// Whole tokens left for `endpoint`, `None` if it was never gated
    pub fn available(&self, endpoint: &EndpointId, now: Instant) -> Option<u32> {
        self.buckets
            .get_mut(endpoint)
            .map(|mut bucket| bucket.available(now).floor() as u32)
    }

    /// Forget all buckets
    pub fn reset(&self) {
        self.buckets.clear();
    }
}
