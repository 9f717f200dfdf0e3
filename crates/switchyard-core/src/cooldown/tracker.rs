//! Cooldown tracker implementation

use dashmap::DashMap;
use std::time::Duration;
use tokio::time::Instant;

use crate::classify::ErrorKind;
use crate::config::CooldownDurations;
use crate::registry::EndpointId;

/// Suppression state of one endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CooldownEntry {
    /// Endpoint is eligible again from this instant on
    pub suppressed_until: Instant,
    /// Kind of the failure that set or last refreshed the entry
    pub last_error_kind: ErrorKind,
    /// Retriable failures since the entry was created
    pub failures: u32,
}

/// Snapshot row for introspection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CooldownStatus {
    pub endpoint: EndpointId,
    pub last_error_kind: ErrorKind,
    pub failures: u32,
    pub remaining: Duration,
}

/// Per-endpoint cooldown state.
///
/// Entries live in a sharded map so unrelated endpoints never contend. Time
/// is always passed in by the caller; the tracker never reads the clock.
#[derive(Debug, Default)]
pub struct CooldownTracker {
    entries: DashMap<EndpointId, CooldownEntry>,
    durations: CooldownDurations,
}

impl CooldownTracker {
    /// Create a tracker with the default duration table
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a tracker with a custom duration table
    pub fn with_durations(durations: CooldownDurations) -> Self {
        Self {
            entries: DashMap::new(),
            durations,
        }
    }

    pub fn durations(&self) -> &CooldownDurations {
        &self.durations
    }

    /// Whether `endpoint` may be called at `now`
    pub fn is_eligible(&self, endpoint: &EndpointId, now: Instant) -> bool {
        self.active_entry(endpoint, now).is_none()
    }

    /// The entry suppressing `endpoint` at `now`, if any. Expired entries
    /// read as absent.
    pub fn active_entry(&self, endpoint: &EndpointId, now: Instant) -> Option<CooldownEntry> {
        self.entries
            .get(endpoint)
            .map(|entry| *entry.value())
            .filter(|entry| now < entry.suppressed_until)
    }

    /// Record a failure at `now`.
    ///
    /// Retriable kinds set or refresh the entry; the window always restarts
    /// from `now` and the kind is overwritten. Non-retriable kinds leave the
    /// state untouched. Returns the new `suppressed_until`, if any.
    pub fn record_failure(
        &self,
        endpoint: &EndpointId,
        kind: ErrorKind,
        now: Instant,
    ) -> Option<Instant> {
        let duration = self.durations.duration_for(kind)?;
        let suppressed_until = now + duration;

        let failures = {
            let mut entry = self
                .entries
                .entry(endpoint.clone())
                .or_insert(CooldownEntry {
                    suppressed_until,
                    last_error_kind: kind,
                    failures: 0,
                });
            entry.suppressed_until = suppressed_until;
            entry.last_error_kind = kind;
            entry.failures = entry.failures.saturating_add(1);
            entry.failures
        };

        tracing::warn!(
            endpoint = %endpoint,
            kind = %kind,
            failures,
            cooldown_secs = duration.as_secs(),
            "Endpoint placed on cooldown"
        );
        Some(suppressed_until)
    }

    /// Record a success: any entry is dropped immediately.
    /// Returns whether an entry existed.
    pub fn record_success(&self, endpoint: &EndpointId) -> bool {
        let cleared = self.entries.remove(endpoint).is_some();
        if cleared {
            tracing::info!(endpoint = %endpoint, "Endpoint recovered, cooldown cleared");
        }
        cleared
    }

    /// Active entries at `now`, ordered by endpoint id
    pub fn snapshot(&self, now: Instant) -> Vec<CooldownStatus> {
        let mut rows: Vec<_> = self
            .entries
            .iter()
            .filter(|entry| now < entry.value().suppressed_until)
            .map(|entry| CooldownStatus {
                endpoint: entry.key().clone(),
                last_error_kind: entry.value().last_error_kind,
                failures: entry.value().failures,
                remaining: entry.value().suppressed_until - now,
            })
            .collect();
        rows.sort_by(|a, b| a.endpoint.cmp(&b.endpoint));
        rows
    }

    /// Drop entries whose window has passed. Returns how many were dropped.
    pub fn purge_expired(&self, now: Instant) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, entry| now < entry.suppressed_until);
        before.saturating_sub(self.entries.len())
    }

    /// Forget all cooldown state
    pub fn reset(&self) {
        self.entries.clear();
    }

    /// Number of stored entries, expired ones included
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
