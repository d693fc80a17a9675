//! Facade crate for the parks tracker.
//!
//! This crate re-exports the core park types and exposes the SQLite store and
//! the source-layer ingestion pipeline behind feature flags.

#![forbid(unsafe_code)]

pub use parks_core::{ParkRecord, ParkStore, ServiceArea, UpsertOutcome};

#[cfg(feature = "store-sqlite")]
pub use parks_core::{SqliteParkStore, SqliteParkStoreError};

#[cfg(feature = "ingest")]
pub use parks_data::{
    CoordinateProjector, GeometryTransformer, IngestReport, ParkIngestor, SignIndex,
    SourceFeature, read_feature_collection,
};
