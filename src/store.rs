//! Persistence of analysis records.
//!
//! A [`PersistenceStore`] accepts batches of records and hands back one
//! [`RecordId`] per record, in input order. Stores are plain values passed to
//! whoever needs them; there is no global handle.
//!
//! # Store Types
//!
//! ## MemoryStore
//! - Keeps records in a vector behind a read-write lock
//! - Answers compound geo + time queries ([`GeoQuery`])
//!
//! ## JsonlStore
//! - Appends one JSON object per record to a file
//! - Survives restarts; read back with [`JsonlStore::load`]
//!
//! Connecting to a store that may not be up yet goes through
//! [`retry::connect_with_retry`].
//!
//! # Example
//!
//! ```
//! use chrono::{TimeZone, Utc};
//! use sentigeo::geo::GeoPoint;
//! use sentigeo::record::RecordBuilder;
//! use sentigeo::store::{GeoQuery, PersistenceStore};
//! use sentigeo::store::memory::MemoryStore;
//!
//! # fn main() -> sentigeo::error::Result<()> {
//! let store = MemoryStore::new();
//! let record = RecordBuilder::new().build(
//!     "alice",
//!     Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap(),
//!     GeoPoint::new(13.4, 52.5)?,
//!     vec!["love".to_string()],
//!     0.5,
//!     "en",
//! );
//! let ids = store.insert_many(&[record])?;
//! assert_eq!(ids.len(), 1);
//!
//! let berlin = GeoQuery::new(GeoPoint::new(13.4, 52.5)?, 10.0);
//! assert_eq!(store.query(&berlin)?.len(), 1);
//! # Ok(())
//! # }
//! ```

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{Result, SentigeoError};
use crate::geo::GeoPoint;
use crate::record::AnalysisRecord;

pub mod jsonl;
pub mod memory;
pub mod retry;

pub use jsonl::JsonlStore;
pub use memory::MemoryStore;
pub use retry::{RetryPolicy, connect_with_retry};

/// Identifier assigned to a stored record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(Uuid);

impl RecordId {
    /// Generate a fresh random id.
    pub fn new() -> Self {
        RecordId(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for RecordId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// A record together with the id it was stored under.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StoredRecord {
    pub id: RecordId,

    #[serde(flatten)]
    pub record: AnalysisRecord,
}

/// A sink for analysis records.
pub trait PersistenceStore: Send + Sync + fmt::Debug {
    /// Store records and return their ids in input order.
    fn insert_many(&self, records: &[AnalysisRecord]) -> Result<Vec<RecordId>>;

    /// Store a single record.
    fn insert(&self, record: &AnalysisRecord) -> Result<RecordId> {
        self.insert_many(std::slice::from_ref(record))?
            .pop()
            .ok_or_else(|| SentigeoError::storage("store returned no id"))
    }

    /// Number of stored records.
    fn len(&self) -> Result<usize>;

    /// Whether the store holds no records.
    fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }

    /// Get the name of this store (for debugging and configuration).
    fn name(&self) -> &'static str;
}

/// Records within a radius of a point, optionally within a time range.
///
/// The time range is half-open: `from <= created_on < until`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GeoQuery {
    /// Center of the search circle
    pub center: GeoPoint,

    /// Radius in kilometers (great-circle distance)
    pub radius_km: f64,

    /// Inclusive lower bound on `created_on`
    pub from: Option<DateTime<Utc>>,

    /// Exclusive upper bound on `created_on`
    pub until: Option<DateTime<Utc>>,
}

impl GeoQuery {
    /// Create a query without a time range.
    pub fn new(center: GeoPoint, radius_km: f64) -> Self {
        GeoQuery {
            center,
            radius_km,
            from: None,
            until: None,
        }
    }

    /// Restrict to records created in `[from, until)`.
    pub fn between(mut self, from: DateTime<Utc>, until: DateTime<Utc>) -> Self {
        self.from = Some(from);
        self.until = Some(until);
        self
    }

    /// Restrict to records created at or after `from`.
    pub fn since(mut self, from: DateTime<Utc>) -> Self {
        self.from = Some(from);
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !self.radius_km.is_finite() || self.radius_km < 0.0 {
            return Err(SentigeoError::invalid_argument(format!(
                "radius must be a non-negative number of kilometers, got {}",
                self.radius_km
            )));
        }
        if let (Some(from), Some(until)) = (self.from, self.until) {
            if from > until {
                return Err(SentigeoError::invalid_argument(
                    "time range start is after its end",
                ));
            }
        }
        Ok(())
    }

    /// Whether a record satisfies the query.
    pub fn matches(&self, record: &AnalysisRecord) -> bool {
        let created_on = record.created_on();
        if self.from.is_some_and(|from| created_on < from) {
            return false;
        }
        if self.until.is_some_and(|until| created_on >= until) {
            return false;
        }
        self.center.distance_to(&record.location()) <= self.radius_km
    }
}
