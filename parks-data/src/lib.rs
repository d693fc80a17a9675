//! Source-layer ingestion for the parks tracker.
//!
//! Reads the municipal park boundary and park sign GeoJSON layers, projects
//! them from Washington State Plane North feet into WGS84, matches rainbow
//! signs to parks, and upserts the resulting records into a
//! [`parks_core::ParkStore`].

#![forbid(unsafe_code)]

pub mod geometry;
pub mod ingest;
pub mod projection;
pub mod signs;
pub mod source;

pub use geometry::{GeometryError, GeometryTransformer, NO_CENTROID};
pub use ingest::{FeatureError, IngestReport, ParkIngestor};
pub use projection::{CoordinateProjector, ProjectionError, SOURCE_EPSG, TARGET_EPSG};
pub use signs::{RAINBOW_SIGN_TYPE, SignFeature, SignIndex};
pub use source::{SourceError, SourceFeature, parse_feature_collection, read_feature_collection};
