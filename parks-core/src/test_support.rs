//! Test-only, in-memory `ParkStore` used by unit and behaviour tests.

use std::collections::BTreeMap;
use std::convert::Infallible;

use crate::{ParkRecord, ParkStore, UpsertOutcome};

/// In-memory `ParkStore` keyed by `pma_id`.
#[derive(Default, Debug, Clone)]
pub struct MemoryParkStore {
    records: BTreeMap<String, ParkRecord>,
}

impl MemoryParkStore {
    /// Create a store pre-populated with `records`.
    pub fn with_records<I>(records: I) -> Self
    where
        I: IntoIterator<Item = ParkRecord>,
    {
        Self {
            records: records
                .into_iter()
                .map(|record| (record.pma_id.clone(), record))
                .collect(),
        }
    }

    /// Iterate over stored records in key order.
    pub fn records(&self) -> impl Iterator<Item = &ParkRecord> {
        self.records.values()
    }
}

impl ParkStore for MemoryParkStore {
    type Error = Infallible;

    fn upsert(&mut self, record: &ParkRecord) -> Result<UpsertOutcome, Self::Error> {
        let previous = self.records.insert(record.pma_id.clone(), record.clone());
        Ok(if previous.is_some() {
            UpsertOutcome::Updated
        } else {
            UpsertOutcome::Created
        })
    }

    fn clear(&mut self) -> Result<usize, Self::Error> {
        let removed = self.records.len();
        self.records.clear();
        Ok(removed)
    }

    fn get(&self, pma_id: &str) -> Result<Option<ParkRecord>, Self::Error> {
        Ok(self.records.get(pma_id).cloned())
    }

    fn count(&self) -> Result<usize, Self::Error> {
        Ok(self.records.len())
    }
}
