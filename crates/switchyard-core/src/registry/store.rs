//! Endpoint registry

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use std::collections::HashSet;
use std::sync::Arc;

use super::group::EndpointGroup;
use super::record::EndpointRecord;
use crate::config::ModelEndpointConfig;
use crate::error::{ResultExt, RoutingError, RoutingResult};

/// Registry of endpoint groups keyed by logical model name.
///
/// Construct one per application (or per test) and share it behind an `Arc`.
/// Each name lives in its own map shard entry with its own cursor, so there
/// is no registry-wide lock on the resolve path.
#[derive(Debug, Default)]
pub struct EndpointRegistry {
    groups: DashMap<String, Arc<EndpointGroup>>,
}

impl EndpointRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from a `model_list`, preserving list order per name
    pub fn from_configs(configs: &[ModelEndpointConfig]) -> RoutingResult<Self> {
        let registry = Self::new();
        for (i, config) in configs.iter().enumerate() {
            let record = config.to_record().context(format!("model_list[{}]", i))?;
            registry.register(record);
        }
        tracing::debug!(
            groups = registry.groups.len(),
            endpoints = configs.len(),
            "Endpoint registry built"
        );
        Ok(registry)
    }

    /// Append a record to its logical name's group, creating the group.
    ///
    /// Duplicate targets are allowed; they spread load across keys.
    pub fn register(&self, record: EndpointRecord) {
        match self.groups.entry(record.logical_name().to_string()) {
            Entry::Occupied(entry) => entry.get().append(record),
            Entry::Vacant(entry) => {
                entry.insert(Arc::new(EndpointGroup::new(vec![record])));
            }
        }
    }

    /// Remove a whole group and its cursor. No-op for unknown names.
    pub fn unregister(&self, logical_name: &str) {
        if self.groups.remove(logical_name).is_some() {
            tracing::debug!(model = %logical_name, "Endpoint group removed");
        }
    }

    /// Swap the full membership of a group at once.
    ///
    /// Records whose logical name differs from `logical_name` are rejected.
    /// An empty list removes the group. The cursor of an existing group is
    /// kept so rotation continues rather than restarting.
    pub fn replace_group(
        &self,
        logical_name: &str,
        records: Vec<EndpointRecord>,
    ) -> RoutingResult<()> {
        if let Some(stray) = records.iter().find(|r| r.logical_name() != logical_name) {
            return Err(RoutingError::config_field(
                format!(
                    "record for '{}' cannot join group '{}'",
                    stray.logical_name(),
                    logical_name
                ),
                "model_name",
            ));
        }

        if records.is_empty() {
            self.unregister(logical_name);
            return Ok(());
        }

        match self.groups.entry(logical_name.to_string()) {
            Entry::Occupied(entry) => entry.get().replace(records),
            Entry::Vacant(entry) => {
                entry.insert(Arc::new(EndpointGroup::new(records)));
            }
        }
        Ok(())
    }

    /// Pick a concrete endpoint for `logical_name`
    pub fn resolve(&self, logical_name: &str) -> RoutingResult<EndpointRecord> {
        // Clone the group handle out so the shard lock is not held while selecting
        let group = self
            .groups
            .get(logical_name)
            .map(|entry| Arc::clone(entry.value()))
            .ok_or_else(|| RoutingError::not_found(logical_name))?;

        group
            .select()
            .ok_or_else(|| RoutingError::not_found(logical_name))
    }

    /// All registered logical names
    pub fn list_names(&self) -> HashSet<String> {
        self.groups.iter().map(|entry| entry.key().clone()).collect()
    }

    /// Number of records registered under `logical_name`
    pub fn count_for(&self, logical_name: &str) -> usize {
        self.groups
            .get(logical_name)
            .map(|entry| entry.value().len())
            .unwrap_or(0)
    }

    /// Records of a group in insertion order
    pub fn records(&self, logical_name: &str) -> Vec<EndpointRecord> {
        self.groups
            .get(logical_name)
            .map(|entry| entry.value().snapshot().to_vec())
            .unwrap_or_default()
    }

    /// Round-robin cursor of a group, `None` if the name is unknown
    pub fn cursor(&self, logical_name: &str) -> Option<u64> {
        self.groups
            .get(logical_name)
            .map(|entry| entry.value().cursor())
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}
