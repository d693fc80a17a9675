//! The persisted park entity.

use geo::Coord;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Square feet in one acre.
pub const SQUARE_FEET_PER_ACRE: f64 = 43_560.0;

/// A normalised park, ready to be upserted by `pma_id`.
///
/// Coordinates are WGS84 with `x = longitude` and `y = latitude`. Whether the
/// park carries a rainbow sign is derived from `rainbow_sign_locations`, so a
/// record cannot claim a sign without a location for it.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use parks_core::ParkRecord;
///
/// let mut park = ParkRecord::new("4021", "Cal Anderson Park", Coord { x: -122.319, y: 47.617 });
/// assert!(!park.has_rainbow_sign());
///
/// park.rainbow_sign_locations.push(Coord { x: -122.3192, y: 47.6171 });
/// assert!(park.has_rainbow_sign());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ParkRecord {
    /// Park management area identifier, the upsert key.
    pub pma_id: String,
    /// Human-readable park name.
    pub name: String,
    /// Marker position derived from the boundary centroid.
    pub location: Coord<f64>,
    /// Surface area in acres, rounded to two decimals.
    pub acres: Option<f64>,
    /// Identifier of the source row in the municipal data portal.
    pub external_id: Option<String>,
    /// Boundary geometry serialised as a GeoJSON geometry object.
    pub boundary_geojson: Option<String>,
    /// Positions of matched rainbow signs, in source order.
    pub rainbow_sign_locations: Vec<Coord<f64>>,
}

impl ParkRecord {
    /// Construct a record with only its identity and position populated.
    pub fn new(pma_id: impl Into<String>, name: impl Into<String>, location: Coord<f64>) -> Self {
        Self {
            pma_id: pma_id.into(),
            name: name.into(),
            location,
            acres: None,
            external_id: None,
            boundary_geojson: None,
            rainbow_sign_locations: Vec::new(),
        }
    }

    /// Longitude of the marker.
    pub const fn longitude(&self) -> f64 {
        self.location.x
    }

    /// Latitude of the marker.
    pub const fn latitude(&self) -> f64 {
        self.location.y
    }

    /// True when at least one rainbow sign was matched to this park.
    pub fn has_rainbow_sign(&self) -> bool {
        !self.rainbow_sign_locations.is_empty()
    }

    /// Encode the sign locations as a JSON array of `[lon, lat]` pairs.
    ///
    /// Returns `None` when the park has no signs, mirroring the nullable
    /// column the web layer reads.
    ///
    /// # Examples
    /// ```
    /// use geo::Coord;
    /// use parks_core::ParkRecord;
    ///
    /// let mut park = ParkRecord::new("1", "Volunteer Park", Coord { x: -122.315, y: 47.63 });
    /// assert_eq!(park.sign_locations_json().unwrap(), None);
    ///
    /// park.rainbow_sign_locations.push(Coord { x: -122.5, y: 47.25 });
    /// assert_eq!(
    ///     park.sign_locations_json().unwrap().as_deref(),
    ///     Some("[[-122.5,47.25]]")
    /// );
    /// ```
    pub fn sign_locations_json(&self) -> Result<Option<String>, SignLocationsError> {
        if self.rainbow_sign_locations.is_empty() {
            return Ok(None);
        }
        let pairs: Vec<[f64; 2]> = self
            .rainbow_sign_locations
            .iter()
            .map(|coord| [coord.x, coord.y])
            .collect();
        serde_json::to_string(&pairs)
            .map(Some)
            .map_err(SignLocationsError::Encode)
    }

    /// Decode a stored sign location column back into coordinates.
    pub fn parse_sign_locations(json: Option<&str>) -> Result<Vec<Coord<f64>>, SignLocationsError> {
        let Some(json) = json else {
            return Ok(Vec::new());
        };
        let pairs: Vec<[f64; 2]> = serde_json::from_str(json).map_err(SignLocationsError::Decode)?;
        Ok(pairs.into_iter().map(|[x, y]| Coord { x, y }).collect())
    }
}

/// Failure converting sign locations to or from their JSON column form.
#[derive(Debug, Error)]
pub enum SignLocationsError {
    /// Serialising the `[lon, lat]` pairs failed.
    #[error("failed to encode sign locations")]
    Encode(#[source] serde_json::Error),
    /// The stored column was not a JSON array of `[lon, lat]` pairs.
    #[error("failed to decode sign locations")]
    Decode(#[source] serde_json::Error),
}

/// Convert a surface area in square feet to acres rounded to two decimals.
///
/// # Examples
/// ```
/// use parks_core::square_feet_to_acres;
///
/// assert_eq!(square_feet_to_acres(87_120.0), 2.0);
/// assert_eq!(square_feet_to_acres(100_000.0), 2.3);
/// ```
pub fn square_feet_to_acres(square_feet: f64) -> f64 {
    round_acres(square_feet / SQUARE_FEET_PER_ACRE)
}

/// Round to two decimal places using correctly rounded decimal conversion,
/// so values such as `2.675` (stored as `2.67499…`) round down.
pub fn round_acres(acres: f64) -> f64 {
    format!("{acres:.2}").parse().unwrap_or(acres)
}
