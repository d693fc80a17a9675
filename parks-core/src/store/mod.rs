//! Keyed persistence for park records.
//!
//! The ingestion pipeline only needs an upsert keyed by `pma_id` plus a bulk
//! clear for full reloads; readers get point lookups and a count.

use crate::ParkRecord;

#[cfg(feature = "store-sqlite")]
mod sqlite;

#[cfg(feature = "store-sqlite")]
pub use sqlite::{SqliteParkStore, SqliteParkStoreError};

/// Whether an upsert inserted a new record or overwrote an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum UpsertOutcome {
    /// No record with the key existed beforehand.
    Created,
    /// A record with the key existed and its fields were replaced.
    Updated,
}

/// Storage capability for park records.
///
/// `upsert` replaces every mutable field of an existing record with the same
/// `pma_id`; it never merges. Implementations are not expected to coordinate
/// concurrent writers.
///
/// # Examples
///
/// ```rust
/// use std::collections::HashMap;
/// use std::convert::Infallible;
/// use geo::Coord;
/// use parks_core::{ParkRecord, ParkStore, UpsertOutcome};
///
/// #[derive(Default)]
/// struct MapStore(HashMap<String, ParkRecord>);
///
/// impl ParkStore for MapStore {
///     type Error = Infallible;
///
///     fn upsert(&mut self, record: &ParkRecord) -> Result<UpsertOutcome, Self::Error> {
///         Ok(match self.0.insert(record.pma_id.clone(), record.clone()) {
///             Some(_) => UpsertOutcome::Updated,
///             None => UpsertOutcome::Created,
///         })
///     }
///
///     fn clear(&mut self) -> Result<usize, Self::Error> {
///         let removed = self.0.len();
///         self.0.clear();
///         Ok(removed)
///     }
///
///     fn get(&self, pma_id: &str) -> Result<Option<ParkRecord>, Self::Error> {
///         Ok(self.0.get(pma_id).cloned())
///     }
///
///     fn count(&self) -> Result<usize, Self::Error> {
///         Ok(self.0.len())
///     }
/// }
///
/// let mut store = MapStore::default();
/// let park = ParkRecord::new("7", "Kerry Park", Coord { x: -122.36, y: 47.63 });
/// assert_eq!(store.upsert(&park).unwrap(), UpsertOutcome::Created);
/// assert_eq!(store.upsert(&park).unwrap(), UpsertOutcome::Updated);
/// assert_eq!(store.count().unwrap(), 1);
/// ```
pub trait ParkStore {
    /// Failure raised by the backing storage.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Insert `record`, or overwrite the record sharing its `pma_id`.
    fn upsert(&mut self, record: &ParkRecord) -> Result<UpsertOutcome, Self::Error>;

    /// Remove every record, returning how many were deleted.
    fn clear(&mut self) -> Result<usize, Self::Error>;

    /// Fetch the record stored under `pma_id`.
    fn get(&self, pma_id: &str) -> Result<Option<ParkRecord>, Self::Error>;

    /// Number of stored records.
    fn count(&self) -> Result<usize, Self::Error>;
}
