//! Centroid estimation and whole-geometry reprojection for boundary shapes.

use geo::Coord;
use geojson::{Geometry, PolygonType, Position, Value};
use thiserror::Error;

use crate::projection::{CoordinateProjector, ProjectionError};

/// Marker position returned when no centroid can be derived.
///
/// `(0, 0)` always falls outside the service area, so features that yield it
/// are rejected by the bounding-box check rather than by a separate branch.
pub const NO_CENTROID: Coord<f64> = Coord { x: 0.0, y: 0.0 };

/// Errors raised while reprojecting a geometry.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("position has {len} ordinate(s), expected at least 2")]
    MalformedPosition { len: usize },
    #[error("failed to reproject geometry: {0}")]
    Projection(#[from] ProjectionError),
}

/// Applies a [`CoordinateProjector`] to GeoJSON boundary geometries.
#[derive(Debug)]
pub struct GeometryTransformer {
    projector: CoordinateProjector,
}

impl GeometryTransformer {
    pub const fn new(projector: CoordinateProjector) -> Self {
        Self { projector }
    }

    /// Projector used for individual points.
    pub const fn projector(&self) -> &CoordinateProjector {
        &self.projector
    }

    /// Estimate a marker position for a boundary.
    ///
    /// The estimate is the arithmetic mean of the vertices of the outer ring,
    /// taken in state-plane feet and then projected to WGS84. For a
    /// `MultiPolygon` only the first polygon's outer ring is considered. The
    /// closing vertex is counted like any other, so this is a vertex average
    /// and not an area-weighted centroid.
    ///
    /// Unsupported geometry types and malformed or empty rings yield
    /// [`NO_CENTROID`]. Only a projection failure is reported as an error.
    pub fn centroid(&self, geometry: &Value) -> Result<Coord<f64>, ProjectionError> {
        let Some(average) = outer_ring(geometry).and_then(vertex_average) else {
            return Ok(NO_CENTROID);
        };
        self.projector.project(average.x, average.y)
    }

    /// Reproject every position of a boundary into WGS84 degrees.
    ///
    /// Polygons and multipolygons keep their ring structure; each position
    /// becomes `[longitude, latitude]`. Any other geometry type is returned
    /// unchanged.
    pub fn reproject(&self, geometry: &Geometry) -> Result<Geometry, GeometryError> {
        let value = match &geometry.value {
            Value::Polygon(rings) => Value::Polygon(self.reproject_rings(rings)?),
            Value::MultiPolygon(polygons) => Value::MultiPolygon(
                polygons
                    .iter()
                    .map(|rings| self.reproject_rings(rings))
                    .collect::<Result<_, _>>()?,
            ),
            other => other.clone(),
        };
        Ok(Geometry::new(value))
    }

    fn reproject_rings(&self, rings: &[Vec<Position>]) -> Result<PolygonType, GeometryError> {
        rings
            .iter()
            .map(|ring| {
                ring.iter()
                    .map(|position| self.reproject_position(position))
                    .collect()
            })
            .collect()
    }

    fn reproject_position(&self, position: &[f64]) -> Result<Position, GeometryError> {
        let [x, y, ..] = position else {
            return Err(GeometryError::MalformedPosition {
                len: position.len(),
            });
        };
        let projected = self.projector.project(*x, *y)?;
        Ok(vec![projected.x, projected.y])
    }
}

fn outer_ring(geometry: &Value) -> Option<&[Position]> {
    match geometry {
        Value::Polygon(rings) => rings.first().map(Vec::as_slice),
        Value::MultiPolygon(polygons) => polygons
            .first()
            .and_then(|rings| rings.first())
            .map(Vec::as_slice),
        _ => None,
    }
}

fn vertex_average(ring: &[Position]) -> Option<Coord<f64>> {
    if ring.is_empty() {
        return None;
    }
    let mut sum = Coord { x: 0.0, y: 0.0 };
    for position in ring {
        let [x, y, ..] = position.as_slice() else {
            return None;
        };
        sum.x += x;
        sum.y += y;
    }
    let count = ring.len() as f64;
    Some(Coord {
        x: sum.x / count,
        y: sum.y / count,
    })
}
