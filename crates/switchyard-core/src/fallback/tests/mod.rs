//! Fallback orchestrator tests

mod observer;

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::classify::BackendError;
use crate::cooldown::CooldownTracker;
use crate::registry::{Credentials, EndpointRecord, EndpointRegistry};

use super::FallbackOrchestrator;

/// Scripted backend: each target answers from a queue, the last answer
/// repeats once the queue runs dry
#[derive(Clone, Default)]
pub(super) struct ScriptedBackend {
    script: Arc<Mutex<HashMap<String, Vec<Result<String, BackendError>>>>>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl ScriptedBackend {
    pub(super) fn answer(&self, target: &str, result: Result<&str, BackendError>) -> &Self {
        self.script
            .lock()
            .entry(target.to_string())
            .or_default()
            .push(result.map(str::to_string));
        self
    }

    pub(super) fn call(&self, endpoint: &EndpointRecord) -> Result<String, BackendError> {
        let target = endpoint.target().to_string();
        self.calls.lock().push(target.clone());
        let mut script = self.script.lock();
        let queue = script
            .get_mut(&target)
            .unwrap_or_else(|| panic!("no script for {target}"));
        if queue.len() > 1 {
            queue.remove(0)
        } else {
            queue[0].clone()
        }
    }

    pub(super) fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }
}

pub(super) fn record(name: &str, target: &str) -> EndpointRecord {
    EndpointRecord::new(name, target, Credentials::api_key(format!("key-{target}")))
}

pub(super) fn orchestrator(records: Vec<EndpointRecord>) -> FallbackOrchestrator {
    let registry = EndpointRegistry::new();
    for record in records {
        registry.register(record);
    }
    FallbackOrchestrator::new(Arc::new(registry), Arc::new(CooldownTracker::new()))
}
