use std::fmt;

use parks_core::UpsertOutcome;

/// Counters accumulated across one ingestion run.
///
/// `with_signs` and `without_signs` count every boundary that reached the
/// sign lookup, including boundaries later rejected for their location or
/// skipped on error. They therefore need not sum to `created + updated`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IngestReport {
    /// Records inserted for the first time.
    pub created: usize,
    /// Existing records overwritten.
    pub updated: usize,
    /// Features rejected or failed.
    pub skipped: usize,
    /// Boundaries with at least one rainbow sign.
    pub with_signs: usize,
    /// Boundaries with no rainbow sign.
    pub without_signs: usize,
}

impl IngestReport {
    pub(super) const fn record_upsert(&mut self, outcome: UpsertOutcome) {
        match outcome {
            UpsertOutcome::Created => self.created += 1,
            UpsertOutcome::Updated => self.updated += 1,
        }
    }

    pub(super) const fn record_skip(&mut self) {
        self.skipped += 1;
    }

    pub(super) const fn record_sign_match(&mut self, has_signs: bool) {
        if has_signs {
            self.with_signs += 1;
        } else {
            self.without_signs += 1;
        }
    }

    /// Number of records written, created or updated.
    pub const fn stored(&self) -> usize {
        self.created + self.updated
    }
}

impl fmt::Display for IngestReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Done! Created: {}, Updated: {}, Skipped: {}",
            self.created, self.updated, self.skipped
        )?;
        write!(
            f,
            "Parks with rainbow signs: {}, Parks without: {}",
            self.with_signs, self.without_signs
        )
    }
}
