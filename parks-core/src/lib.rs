//! Core domain types for the parks tracker.
//!
//! A [`ParkRecord`] is the normalised form of one municipal park boundary,
//! with its marker position and boundary already in WGS84. Records are
//! persisted through the [`ParkStore`] trait, keyed by the park management
//! area identifier.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod area;
pub mod park;
pub mod store;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use area::ServiceArea;
pub use park::{ParkRecord, SignLocationsError, round_acres, square_feet_to_acres};
pub use store::{ParkStore, UpsertOutcome};

#[cfg(feature = "store-sqlite")]
pub use store::{SqliteParkStore, SqliteParkStoreError};
