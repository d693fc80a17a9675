//! Attribute extraction for park boundary features.
//!
//! Each helper reads one attribute from a [`SourceFeature`] and normalises
//! it into the shape stored on a [`parks_core::ParkRecord`].

use parks_core::{round_acres, square_feet_to_acres};
use serde_json::Value as JsonValue;

use super::FeatureError;
use crate::source::SourceFeature;

pub(super) const NAME_KEY: &str = "NAME";
pub(super) const PMA_KEY: &str = "PMA";
pub(super) const AREA_KEY: &str = "PARKSBND_AREA";
pub(super) const OBJECT_ID_KEY: &str = "OBJECTID";

/// Name given to unnamed boundaries in the source layer.
pub(super) const PLACEHOLDER_NAME: &str = "Unknown Park";

/// Usable park name, or `None` for missing, empty, non-text, or
/// placeholder names.
pub(super) fn park_name(feature: &SourceFeature) -> Option<&str> {
    match feature.property(NAME_KEY) {
        Some(JsonValue::String(name)) if !name.is_empty() && name != PLACEHOLDER_NAME => {
            Some(name.as_str())
        }
        _ => None,
    }
}

/// Park management area identifier rendered as text.
///
/// Numbers render as their JSON text (`281`, `281.5`); strings are used
/// verbatim. Missing or null identifiers yield `Ok(None)`.
pub(super) fn park_id(feature: &SourceFeature) -> Result<Option<String>, FeatureError> {
    match feature.property(PMA_KEY) {
        None | Some(JsonValue::Null) => Ok(None),
        Some(JsonValue::Number(number)) => Ok(Some(number.to_string())),
        Some(JsonValue::String(text)) => Ok(Some(text.clone())),
        Some(other) => Err(FeatureError::InvalidProperty {
            key: PMA_KEY,
            value: other.to_string(),
        }),
    }
}

/// Park area in acres rounded to two decimals.
///
/// A zero, null, or absent area is treated as unknown.
pub(super) fn acres(feature: &SourceFeature) -> Result<Option<f64>, FeatureError> {
    match feature.property(AREA_KEY) {
        None | Some(JsonValue::Null) => Ok(None),
        Some(JsonValue::Number(number)) => match number.as_f64() {
            Some(square_feet) if square_feet == 0.0 => Ok(None),
            Some(square_feet) => Ok(Some(round_acres(square_feet_to_acres(square_feet)))),
            None => Err(FeatureError::InvalidProperty {
                key: AREA_KEY,
                value: number.to_string(),
            }),
        },
        Some(other) => Err(FeatureError::InvalidProperty {
            key: AREA_KEY,
            value: other.to_string(),
        }),
    }
}

/// Source object identifier as text, or `None` when missing, null, or
/// empty.
pub(super) fn external_id(feature: &SourceFeature) -> Option<String> {
    match feature.property(OBJECT_ID_KEY)? {
        JsonValue::Number(number) => Some(number.to_string()),
        JsonValue::String(text) if !text.is_empty() => Some(text.clone()),
        _ => None,
    }
}
