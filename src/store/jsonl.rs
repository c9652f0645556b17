//! Append-only JSON Lines record store.

use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use log::debug;
use parking_lot::Mutex;

use crate::error::{Result, SentigeoError};
use crate::record::AnalysisRecord;
use crate::store::{PersistenceStore, RecordId, StoredRecord};

/// Appends records, one JSON object per line, to a file.
#[derive(Debug)]
pub struct JsonlStore {
    path: PathBuf,
    file: Mutex<File>,
}

impl JsonlStore {
    /// Open a store, creating the file and its parent directories as needed.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| {
                SentigeoError::storage(format!("cannot open {}: {e}", path.display()))
            })?;

        Ok(JsonlStore {
            path,
            file: Mutex::new(file),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read every stored record back, in write order.
    pub fn load(&self) -> Result<Vec<StoredRecord>> {
        let _guard = self.file.lock();
        read_records(&self.path)
    }
}

fn read_records(path: &Path) -> Result<Vec<StoredRecord>> {
    let reader = BufReader::new(File::open(path)?);
    let mut records = Vec::new();

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let stored = serde_json::from_str(&line).map_err(|e| {
            SentigeoError::storage(format!(
                "corrupt record on line {} of {}: {e}",
                index + 1,
                path.display()
            ))
        })?;
        records.push(stored);
    }

    Ok(records)
}

impl PersistenceStore for JsonlStore {
    fn insert_many(&self, records: &[AnalysisRecord]) -> Result<Vec<RecordId>> {
        let mut buffer = Vec::new();
        let mut ids = Vec::with_capacity(records.len());

        for record in records {
            let stored = StoredRecord {
                id: RecordId::new(),
                record: record.clone(),
            };
            serde_json::to_writer(&mut buffer, &stored)?;
            buffer.push(b'\n');
            ids.push(stored.id);
        }

        // One write per batch so concurrent batches never interleave lines.
        let mut file = self.file.lock();
        file.write_all(&buffer)?;
        file.flush()?;

        debug!("appended {} records to {}", ids.len(), self.path.display());
        Ok(ids)
    }

    fn len(&self) -> Result<usize> {
        Ok(self.load()?.len())
    }

    fn name(&self) -> &'static str {
        "jsonl"
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use tempfile::TempDir;

    use super::*;
    use crate::geo::GeoPoint;
    use crate::record::RecordBuilder;

    fn record(author: &str) -> AnalysisRecord {
        RecordBuilder::new().build(
            author,
            Utc.with_ymd_and_hms(2019, 7, 1, 8, 30, 0).unwrap(),
            GeoPoint::new(-1.0, -1.0).unwrap(),
            vec!["sun".to_string(), "#beach".to_string()],
            -0.25,
            "en",
        )
    }

    #[test]
    fn test_append_and_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("records.jsonl");

        let store = JsonlStore::open(&path).unwrap();
        let first = store.insert_many(&[record("a"), record("b")]).unwrap();
        let second = store.insert(&record("c")).unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded.len(), 3);
        assert_eq!(loaded[0].id, first[0]);
        assert_eq!(loaded[1].record, record("b"));
        assert_eq!(loaded[2].id, second);
    }

    #[test]
    fn test_reopen_appends() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("records.jsonl");

        JsonlStore::open(&path)
            .unwrap()
            .insert(&record("a"))
            .unwrap();
        let store = JsonlStore::open(&path).unwrap();
        store.insert(&record("b")).unwrap();

        assert_eq!(store.len().unwrap(), 2);
    }

    #[test]
    fn test_corrupt_line() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("records.jsonl");
        fs::write(&path, "{not json}\n").unwrap();

        let store = JsonlStore::open(&path).unwrap();
        assert!(matches!(store.load(), Err(SentigeoError::Storage(_))));
    }
}
