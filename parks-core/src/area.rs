//! Geographic sanity bounds for computed park positions.

use geo::Coord;

/// An open longitude/latitude rectangle that accepted park markers must fall
/// strictly inside.
///
/// Points on an edge are rejected, as are non-finite coordinates.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use parks_core::ServiceArea;
///
/// assert!(ServiceArea::SEATTLE.contains(Coord { x: -122.33, y: 47.6 }));
/// assert!(!ServiceArea::SEATTLE.contains(Coord { x: 0.0, y: 0.0 }));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ServiceArea {
    /// Western longitude limit, exclusive.
    pub min_lon: f64,
    /// Eastern longitude limit, exclusive.
    pub max_lon: f64,
    /// Southern latitude limit, exclusive.
    pub min_lat: f64,
    /// Northern latitude limit, exclusive.
    pub max_lat: f64,
}

impl ServiceArea {
    /// The Seattle metropolitan box: `-123 < lon < -121`, `47 < lat < 48`.
    pub const SEATTLE: Self = Self {
        min_lon: -123.0,
        max_lon: -121.0,
        min_lat: 47.0,
        max_lat: 48.0,
    };

    /// Whether `location` (`x = longitude`, `y = latitude`) lies strictly
    /// inside the area.
    pub fn contains(&self, location: Coord<f64>) -> bool {
        self.min_lon < location.x
            && location.x < self.max_lon
            && self.min_lat < location.y
            && location.y < self.max_lat
    }
}

impl Default for ServiceArea {
    fn default() -> Self {
        Self::SEATTLE
    }
}
