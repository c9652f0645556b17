//! In-memory record store for testing and small datasets.

use parking_lot::RwLock;

use crate::error::Result;
use crate::record::AnalysisRecord;
use crate::store::{GeoQuery, PersistenceStore, RecordId, StoredRecord};

/// An in-memory store.
///
/// Records keep their insertion order; queries return them ordered by
/// `created_on`, ties in insertion order.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: RwLock<Vec<StoredRecord>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a record by id.
    pub fn get(&self, id: &RecordId) -> Option<AnalysisRecord> {
        self.records
            .read()
            .iter()
            .find(|stored| stored.id == *id)
            .map(|stored| stored.record.clone())
    }

    /// Snapshot of all records in insertion order.
    pub fn records(&self) -> Vec<StoredRecord> {
        self.records.read().clone()
    }

    /// Run a compound geo + time query.
    pub fn query(&self, query: &GeoQuery) -> Result<Vec<StoredRecord>> {
        query.validate()?;

        let mut hits: Vec<StoredRecord> = self
            .records
            .read()
            .iter()
            .filter(|stored| query.matches(&stored.record))
            .cloned()
            .collect();
        hits.sort_by_key(|stored| stored.record.created_on());

        Ok(hits)
    }

    /// Remove all records.
    pub fn clear(&self) {
        self.records.write().clear();
    }
}

impl PersistenceStore for MemoryStore {
    fn insert_many(&self, records: &[AnalysisRecord]) -> Result<Vec<RecordId>> {
        let stored: Vec<StoredRecord> = records
            .iter()
            .map(|record| StoredRecord {
                id: RecordId::new(),
                record: record.clone(),
            })
            .collect();
        let ids = stored.iter().map(|s| s.id).collect();

        self.records.write().extend(stored);
        Ok(ids)
    }

    fn len(&self) -> Result<usize> {
        Ok(self.records.read().len())
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}
