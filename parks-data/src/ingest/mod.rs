//! Boundary ingestion: turns source features into stored park records.

use std::error::Error as StdError;

use geo::Coord;
use log::{debug, info, warn};
use parks_core::{ParkRecord, ParkStore, ServiceArea, UpsertOutcome};
use thiserror::Error;

mod properties;
mod report;

pub use report::IngestReport;

use crate::geometry::{GeometryError, GeometryTransformer, NO_CENTROID};
use crate::projection::ProjectionError;
use crate::signs::{SignFeature, SignIndex};
use crate::source::SourceFeature;

/// Reasons a single boundary feature failed after passing the filters.
///
/// These never abort a run; the feature is logged and counted as skipped.
#[derive(Debug, Error)]
pub enum FeatureError {
    #[error("invalid {key} value {value}")]
    InvalidProperty { key: &'static str, value: String },
    #[error("failed to compute centroid: {0}")]
    Centroid(#[source] ProjectionError),
    #[error("rainbow sign for park {pma_id} has no point geometry")]
    SignGeometry { pma_id: String },
    #[error("failed to project rainbow sign for park {pma_id}: {source}")]
    SignProjection {
        pma_id: String,
        #[source]
        source: ProjectionError,
    },
    #[error("{0}")]
    Boundary(#[from] GeometryError),
    #[error("failed to encode boundary: {0}")]
    BoundaryEncoding(#[source] serde_json::Error),
    #[error("failed to store park {pma_id}: {source}")]
    Store {
        pma_id: String,
        #[source]
        source: Box<dyn StdError + Send + Sync>,
    },
}

/// Converts boundary features into [`ParkRecord`]s and upserts them.
///
/// # Examples
/// ```
/// use parks_core::test_support::MemoryParkStore;
/// use parks_data::{
///     CoordinateProjector, GeometryTransformer, ParkIngestor, SignIndex, SourceFeature,
/// };
/// use serde_json::json;
///
/// # fn main() -> Result<(), parks_data::ProjectionError> {
/// let ingestor = ParkIngestor::new(GeometryTransformer::new(CoordinateProjector::new()?));
/// let boundaries = vec![SourceFeature::from_json(json!({
///     "properties": {"NAME": "Cal Anderson Park", "PMA": 281},
///     "geometry": {"type": "Polygon", "coordinates": [[
///         [1270000.0, 220000.0], [1270000.0, 221000.0],
///         [1271000.0, 221000.0], [1271000.0, 220000.0]
///     ]]}
/// }))];
/// let mut store = MemoryParkStore::default();
/// let report = ingestor.ingest(&boundaries, &SignIndex::default(), &mut store);
/// assert_eq!(report.created, 1);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct ParkIngestor {
    transformer: GeometryTransformer,
    area: ServiceArea,
}

impl ParkIngestor {
    /// Ingestor validating positions against [`ServiceArea::SEATTLE`].
    pub const fn new(transformer: GeometryTransformer) -> Self {
        Self {
            transformer,
            area: ServiceArea::SEATTLE,
        }
    }

    #[must_use]
    pub fn with_service_area(mut self, area: ServiceArea) -> Self {
        self.area = area;
        self
    }

    pub const fn service_area(&self) -> ServiceArea {
        self.area
    }

    /// Process every boundary feature in order and upsert accepted parks.
    ///
    /// Rejected and failed features are counted as skipped; no per-feature
    /// problem stops the run.
    pub fn ingest<S: ParkStore>(
        &self,
        boundaries: &[SourceFeature],
        signs: &SignIndex,
        store: &mut S,
    ) -> IngestReport {
        let mut report = IngestReport::default();
        for (index, feature) in boundaries.iter().enumerate() {
            match self.ingest_feature(feature, signs, store, &mut report) {
                Ok(Some(outcome)) => report.record_upsert(outcome),
                Ok(None) => report.record_skip(),
                Err(err) => {
                    warn!(
                        "error processing boundary feature {index} ({}): {err}",
                        feature_label(feature)
                    );
                    report.record_skip();
                }
            }
        }
        info!(
            "processed {} boundary features: {} created, {} updated, {} skipped",
            boundaries.len(),
            report.created,
            report.updated,
            report.skipped
        );
        report
    }

    fn ingest_feature<S: ParkStore>(
        &self,
        feature: &SourceFeature,
        signs: &SignIndex,
        store: &mut S,
        report: &mut IngestReport,
    ) -> Result<Option<UpsertOutcome>, FeatureError> {
        let Some(name) = properties::park_name(feature) else {
            debug!("skipping boundary without a usable name");
            return Ok(None);
        };
        let Some(pma_id) = properties::park_id(feature)? else {
            debug!("skipping {name}: no park management area id");
            return Ok(None);
        };

        let matched = signs.signs_for(&pma_id);
        report.record_sign_match(!matched.is_empty());

        let location = match feature.geometry() {
            Some(geometry) => self
                .transformer
                .centroid(&geometry.value)
                .map_err(FeatureError::Centroid)?,
            None => NO_CENTROID,
        };
        let rainbow_sign_locations = matched
            .iter()
            .map(|sign| self.project_sign(sign))
            .collect::<Result<Vec<_>, _>>()?;

        if !self.area.contains(location) {
            warn!(
                "Invalid coordinates for {name}: ({}, {})",
                location.y, location.x
            );
            return Ok(None);
        }

        let boundary_geojson = feature
            .geometry()
            .map(|geometry| {
                let reprojected = self.transformer.reproject(geometry)?;
                serde_json::to_string(&reprojected).map_err(FeatureError::BoundaryEncoding)
            })
            .transpose()?;

        let record = ParkRecord {
            acres: properties::acres(feature)?,
            external_id: properties::external_id(feature),
            boundary_geojson,
            rainbow_sign_locations,
            ..ParkRecord::new(pma_id, name, location)
        };
        let outcome = store
            .upsert(&record)
            .map_err(|source| FeatureError::Store {
                pma_id: record.pma_id.clone(),
                source: Box::new(source),
            })?;
        debug!("{outcome:?} {} ({})", record.name, record.pma_id);
        Ok(Some(outcome))
    }

    fn project_sign(&self, sign: &SignFeature) -> Result<Coord<f64>, FeatureError> {
        let (x, y) = sign.position().ok_or_else(|| FeatureError::SignGeometry {
            pma_id: sign.pma_id.clone(),
        })?;
        self.transformer
            .projector()
            .project(x, y)
            .map_err(|source| FeatureError::SignProjection {
                pma_id: sign.pma_id.clone(),
                source,
            })
    }
}

fn feature_label(feature: &SourceFeature) -> String {
    match feature.property(properties::NAME_KEY) {
        Some(serde_json::Value::String(name)) => name.clone(),
        _ => "unnamed".to_owned(),
    }
}

#[cfg(test)]
mod tests;
