//! Rainbow sign lookup keyed by park management area.

use std::collections::HashMap;

use log::debug;
use serde_json::Value as JsonValue;

use crate::source::SourceFeature;

/// `SIGN_TP` value identifying a rainbow sign.
pub const RAINBOW_SIGN_TYPE: &str = "RAINBOW";

/// A rainbow sign retained for matching against park boundaries.
#[derive(Debug, Clone, PartialEq)]
pub struct SignFeature {
    /// Park management area the sign belongs to.
    pub pma_id: String,
    /// Sign geometry as published, in state-plane feet.
    pub geometry: Option<geojson::Geometry>,
}

impl SignFeature {
    /// Planar `(x, y)` position of a point sign.
    ///
    /// Returns `None` when the geometry is absent, is not a `Point`, or has
    /// fewer than two ordinates.
    pub fn position(&self) -> Option<(f64, f64)> {
        match self.geometry.as_ref().map(|geometry| &geometry.value) {
            Some(geojson::Value::Point(position)) => match position.as_slice() {
                [x, y, ..] => Some((*x, *y)),
                _ => None,
            },
            _ => None,
        }
    }
}

/// Rainbow signs grouped by `PMAID`.
///
/// Within each group signs keep the order in which they appeared in the
/// source layer.
///
/// # Examples
/// ```
/// use parks_data::{SignIndex, SourceFeature};
/// use serde_json::json;
///
/// let features = vec![
///     SourceFeature::from_json(json!({
///         "properties": {"SIGN_TP": "RAINBOW", "PMAID": "281"},
///         "geometry": {"type": "Point", "coordinates": [1271188.78, 222452.29]}
///     })),
///     SourceFeature::from_json(json!({
///         "properties": {"SIGN_TP": "ENTRY", "PMAID": "281"},
///         "geometry": null
///     })),
/// ];
/// let index = SignIndex::build(&features);
/// assert_eq!(index.signs_for("281").len(), 1);
/// assert!(index.signs_for("999").is_empty());
/// ```
#[derive(Debug, Clone, Default)]
pub struct SignIndex {
    by_park: HashMap<String, Vec<SignFeature>>,
}

impl SignIndex {
    /// Index the rainbow signs among `features`.
    ///
    /// Features whose `SIGN_TP` is not exactly `RAINBOW`, or whose `PMAID`
    /// is missing, null, empty, or not a string, are ignored.
    pub fn build(features: &[SourceFeature]) -> Self {
        let mut by_park: HashMap<String, Vec<SignFeature>> = HashMap::new();
        for (index, feature) in features.iter().enumerate() {
            if !matches!(
                feature.property("SIGN_TP"),
                Some(JsonValue::String(kind)) if kind == RAINBOW_SIGN_TYPE
            ) {
                continue;
            }
            let Some(JsonValue::String(pma_id)) = feature.property("PMAID") else {
                debug!("sign feature {index}: rainbow sign without a string PMAID ignored");
                continue;
            };
            if pma_id.is_empty() {
                debug!("sign feature {index}: rainbow sign with an empty PMAID ignored");
                continue;
            }
            by_park
                .entry(pma_id.clone())
                .or_default()
                .push(SignFeature {
                    pma_id: pma_id.clone(),
                    geometry: feature.geometry().cloned(),
                });
        }
        Self { by_park }
    }

    /// Signs recorded for `pma_id`, or an empty slice.
    pub fn signs_for(&self, pma_id: &str) -> &[SignFeature] {
        self.by_park
            .get(pma_id)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Total number of indexed signs.
    pub fn sign_count(&self) -> usize {
        self.by_park.values().map(Vec::len).sum()
    }

    /// Number of distinct parks with at least one sign.
    pub fn park_count(&self) -> usize {
        self.by_park.len()
    }
}
