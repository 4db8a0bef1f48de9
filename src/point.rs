//! Geographic points.
//!
//! A [`Point`] is a `(lat, lng)` pair in degrees. Distances between points are
//! plain Euclidean distances over degree differences, not geodesic distances:
//! at the scale of a city heatmap the difference does not matter, and it keeps
//! the neighborhood test a pair of multiplications.
//!
//! Points are compared by value. Two incidents recorded at the same address
//! are equal points, and they hash to the same key. The hash contract works on
//! a canonical bit pattern so that `-0.0` and `0.0` agree with `==`.

use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A `(lat, lng)` coordinate pair.
///
/// Serializes as a `[lat, lng]` array, the shape mapping widgets expect.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Point {
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lng: f64,
}

impl Point {
    /// Create a point from latitude and longitude.
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Whether both coordinates are finite.
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lng.is_finite()
    }

    /// Squared Euclidean distance in degree space.
    #[inline]
    pub fn squared_distance(&self, other: &Point) -> f64 {
        let dlat = self.lat - other.lat;
        let dlng = self.lng - other.lng;
        dlat * dlat + dlng * dlng
    }

    /// Euclidean distance in degree space.
    #[inline]
    pub fn distance(&self, other: &Point) -> f64 {
        self.squared_distance(other).sqrt()
    }

    fn key(&self) -> (u64, u64) {
        (canonical_bits(self.lat), canonical_bits(self.lng))
    }
}

// `-0.0 == 0.0`, so both must share one key.
#[inline]
fn canonical_bits(v: f64) -> u64 {
    if v == 0.0 {
        0.0f64.to_bits()
    } else {
        v.to_bits()
    }
}

impl PartialEq for Point {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Point {}

impl Hash for Point {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

impl From<(f64, f64)> for Point {
    fn from((lat, lng): (f64, f64)) -> Self {
        Self::new(lat, lng)
    }
}

impl From<[f64; 2]> for Point {
    fn from([lat, lng]: [f64; 2]) -> Self {
        Self::new(lat, lng)
    }
}

impl From<Point> for [f64; 2] {
    fn from(p: Point) -> Self {
        [p.lat, p.lng]
    }
}

/// Reject any point with a NaN or infinite coordinate.
pub(crate) fn validate_points(points: &[Point]) -> Result<()> {
    if points.iter().all(Point::is_finite) {
        Ok(())
    } else {
        Err(Error::invalid("points", "coordinates must be finite"))
    }
}
