//! Coordinate conversion between the municipal state-plane grid and WGS84.
//!
//! The source layers use NAD83(HARN) / Washington North in US survey feet
//! (EPSG:2926). Stored records use longitude/latitude degrees (EPSG:4326).

use geo::Coord;
use proj4rs::Proj;
use thiserror::Error;

/// EPSG code of the source layers.
pub const SOURCE_EPSG: u16 = 2926;
/// EPSG code of stored coordinates.
pub const TARGET_EPSG: u16 = 4326;

const SOURCE_DEFINITION: &str = "+proj=lcc +lat_1=48.73333333333333 +lat_2=47.5 +lat_0=47 \
     +lon_0=-120.8333333333333 +x_0=500000.0001016001 +y_0=0 +ellps=GRS80 \
     +towgs84=0,0,0,0,0,0,0 +units=us-ft +no_defs";
const TARGET_DEFINITION: &str = "+proj=longlat +datum=WGS84 +no_defs";

/// Errors raised while building or applying the projection.
#[derive(Debug, Error)]
pub enum ProjectionError {
    /// A projection definition was rejected by the projection engine.
    #[error("invalid projection definition for EPSG:{epsg}: {reason}")]
    Definition { epsg: u16, reason: String },
    /// A coordinate could not be transformed.
    #[error("failed to transform ({x}, {y}) from EPSG:{from} to EPSG:{to}: {reason}")]
    Transform {
        x: f64,
        y: f64,
        from: u16,
        to: u16,
        reason: String,
    },
}

/// Converts planar state-plane coordinates to geographic degrees and back.
///
/// Both projection definitions are parsed once and reused for every point.
///
/// # Examples
/// ```
/// use parks_data::CoordinateProjector;
///
/// # fn main() -> Result<(), parks_data::ProjectionError> {
/// let projector = CoordinateProjector::new()?;
/// let location = projector.project(1_270_000.0, 220_000.0)?;
/// assert!((location.x + 122.33).abs() < 0.01);
/// assert!((location.y - 47.59).abs() < 0.01);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct CoordinateProjector {
    source: Proj,
    target: Proj,
}

impl CoordinateProjector {
    /// Build the EPSG:2926 to EPSG:4326 projector.
    pub fn new() -> Result<Self, ProjectionError> {
        Ok(Self {
            source: parse_definition(SOURCE_EPSG, SOURCE_DEFINITION)?,
            target: parse_definition(TARGET_EPSG, TARGET_DEFINITION)?,
        })
    }

    /// Convert state-plane feet to `(longitude, latitude)` degrees.
    ///
    /// The returned coordinate uses `x = longitude` and `y = latitude`.
    pub fn project(&self, x: f64, y: f64) -> Result<Coord<f64>, ProjectionError> {
        let mut point = (x, y, 0.0);
        proj4rs::transform::transform(&self.source, &self.target, &mut point).map_err(|err| {
            ProjectionError::Transform {
                x,
                y,
                from: SOURCE_EPSG,
                to: TARGET_EPSG,
                reason: format!("{err:?}"),
            }
        })?;
        ensure_finite(point, x, y, SOURCE_EPSG, TARGET_EPSG)?;
        Ok(Coord {
            x: point.0.to_degrees(),
            y: point.1.to_degrees(),
        })
    }

    /// Convert `(longitude, latitude)` degrees back to state-plane feet.
    pub fn unproject(&self, longitude: f64, latitude: f64) -> Result<Coord<f64>, ProjectionError> {
        let mut point = (longitude.to_radians(), latitude.to_radians(), 0.0);
        proj4rs::transform::transform(&self.target, &self.source, &mut point).map_err(|err| {
            ProjectionError::Transform {
                x: longitude,
                y: latitude,
                from: TARGET_EPSG,
                to: SOURCE_EPSG,
                reason: format!("{err:?}"),
            }
        })?;
        ensure_finite(point, longitude, latitude, TARGET_EPSG, SOURCE_EPSG)?;
        Ok(Coord {
            x: point.0,
            y: point.1,
        })
    }
}

fn parse_definition(epsg: u16, definition: &str) -> Result<Proj, ProjectionError> {
    Proj::from_proj_string(definition).map_err(|err| ProjectionError::Definition {
        epsg,
        reason: format!("{err:?}"),
    })
}

fn ensure_finite(
    point: (f64, f64, f64),
    x: f64,
    y: f64,
    from: u16,
    to: u16,
) -> Result<(), ProjectionError> {
    if point.0.is_finite() && point.1.is_finite() {
        Ok(())
    } else {
        Err(ProjectionError::Transform {
            x,
            y,
            from,
            to,
            reason: "result is not finite".to_owned(),
        })
    }
}
