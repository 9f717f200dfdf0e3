//! Endpoint group with round-robin cursor

use parking_lot::RwLock;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use super::record::EndpointRecord;

/// Insertion-ordered records sharing one logical name.
///
/// The record list is swapped as a whole on membership changes, so a
/// resolver always sees either the old list or the new one. The cursor is
/// shared by every concurrent resolver of this name.
#[derive(Debug)]
pub(super) struct EndpointGroup {
    records: RwLock<Arc<[EndpointRecord]>>,
    cursor: AtomicU64,
}

impl EndpointGroup {
    pub fn new(records: Vec<EndpointRecord>) -> Self {
        Self {
            records: RwLock::new(records.into()),
            cursor: AtomicU64::new(0),
        }
    }

    /// Current record list
    pub fn snapshot(&self) -> Arc<[EndpointRecord]> {
        Arc::clone(&self.records.read())
    }

    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    pub fn cursor(&self) -> u64 {
        self.cursor.load(Ordering::Relaxed)
    }

    /// Pick the next record. A single-record group never touches the cursor.
    pub fn select(&self) -> Option<EndpointRecord> {
        let records = self.snapshot();
        match records.len() {
            0 => None,
            1 => Some(records[0].clone()),
            n => {
                let ticket = self.cursor.fetch_add(1, Ordering::Relaxed);
                Some(records[(ticket % n as u64) as usize].clone())
            }
        }
    }

    pub fn append(&self, record: EndpointRecord) {
        let mut records = self.records.write();
        let mut next = Vec::with_capacity(records.len() + 1);
        next.extend(records.iter().cloned());
        next.push(record);
        *records = next.into();
    }

    pub fn replace(&self, records: Vec<EndpointRecord>) {
        *self.records.write() = records.into();
    }
}
