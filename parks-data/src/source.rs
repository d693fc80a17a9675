//! Reading GeoJSON feature collections from disk.
//!
//! Only the top-level shape is strict: the document must parse and carry a
//! `features` array. Individual features are decoded leniently so one odd
//! record cannot abort a whole load; downstream stages decide what to do with
//! missing properties or geometry.

use std::io::{BufReader, Read};

use camino::{Utf8Path, Utf8PathBuf};
use geojson::{Geometry, JsonObject};
use log::warn;
use serde::Deserialize;
use serde_json::Value as JsonValue;
use thiserror::Error;

/// Errors raised while loading a feature collection.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("failed to open feature collection at {path}")]
    Open {
        #[source]
        source: std::io::Error,
        path: Utf8PathBuf,
    },
    #[error("failed to parse feature collection at {path}: {source}")]
    Parse {
        #[source]
        source: serde_json::Error,
        path: Utf8PathBuf,
    },
}

/// One feature of a source layer: its properties and optional geometry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SourceFeature {
    properties: JsonObject,
    geometry: Option<Geometry>,
}

impl SourceFeature {
    pub const fn new(properties: JsonObject, geometry: Option<Geometry>) -> Self {
        Self {
            properties,
            geometry,
        }
    }

    /// Decode a feature from raw JSON.
    ///
    /// Missing or non-object `properties` become an empty map. A `geometry`
    /// that is absent, null, or not a valid GeoJSON geometry becomes `None`;
    /// the last case is logged.
    pub fn from_json(value: JsonValue) -> Self {
        let JsonValue::Object(mut object) = value else {
            warn!("ignoring feature that is not a JSON object");
            return Self::default();
        };
        let properties = match object.remove("properties") {
            Some(JsonValue::Object(properties)) => properties,
            _ => JsonObject::new(),
        };
        let geometry = match object.remove("geometry") {
            None | Some(JsonValue::Null) => None,
            Some(raw) => match serde_json::from_value::<Geometry>(raw) {
                Ok(geometry) => Some(geometry),
                Err(err) => {
                    warn!("ignoring undecodable feature geometry: {err}");
                    None
                }
            },
        };
        Self {
            properties,
            geometry,
        }
    }

    /// Property value by key. JSON `null` is returned as `Some(Null)`.
    pub fn property(&self, key: &str) -> Option<&JsonValue> {
        self.properties.get(key)
    }

    pub const fn properties(&self) -> &JsonObject {
        &self.properties
    }

    pub const fn geometry(&self) -> Option<&Geometry> {
        self.geometry.as_ref()
    }
}

#[derive(Deserialize)]
struct RawFeatureCollection {
    features: Vec<JsonValue>,
}

/// Parse a feature collection from any reader.
pub fn parse_feature_collection<R: Read>(reader: R) -> Result<Vec<SourceFeature>, serde_json::Error> {
    let collection: RawFeatureCollection = serde_json::from_reader(BufReader::new(reader))?;
    Ok(collection
        .features
        .into_iter()
        .map(SourceFeature::from_json)
        .collect())
}

/// Read the feature collection stored at `path`.
///
/// # Examples
/// ```no_run
/// use camino::Utf8Path;
/// use parks_data::read_feature_collection;
///
/// # fn main() -> Result<(), parks_data::SourceError> {
/// let features = read_feature_collection(Utf8Path::new("data/boundaries.geojson"))?;
/// println!("Read {} features", features.len());
/// # Ok(())
/// # }
/// ```
pub fn read_feature_collection(path: &Utf8Path) -> Result<Vec<SourceFeature>, SourceError> {
    let file = parks_fs::open_utf8_file(path).map_err(|source| SourceError::Open {
        source,
        path: path.to_path_buf(),
    })?;
    parse_feature_collection(file).map_err(|source| SourceError::Parse {
        source,
        path: path.to_path_buf(),
    })
}
