//! Coordinates, exact hash keys, and topological locations.

use nalgebra::Vector2;

/// Planar coordinate with an optional z ordinate (ignored by all predicates).
///
/// Two-dimensional equality is exact: near-equal coordinates stay distinct.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "Vec<f64>", into = "Vec<f64>")
)]
pub struct Coordinate {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Coordinate {
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y, z: 0.0 }
    }
    #[inline]
    pub const fn new_3d(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
    /// Exact equality of x and y.
    #[inline]
    pub fn equals_2d(&self, other: &Coordinate) -> bool {
        self.x == other.x && self.y == other.y
    }
    /// 2D Euclidean distance.
    #[inline]
    pub fn distance(&self, other: &Coordinate) -> f64 {
        (self.vec2() - other.vec2()).norm()
    }
    #[inline]
    pub fn vec2(&self) -> Vector2<f64> {
        Vector2::new(self.x, self.y)
    }
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
    #[inline]
    pub fn key(&self) -> CoordKey {
        CoordKey::from(*self)
    }
}

impl From<(f64, f64)> for Coordinate {
    fn from((x, y): (f64, f64)) -> Self {
        Coordinate::new(x, y)
    }
}

impl TryFrom<Vec<f64>> for Coordinate {
    type Error = String;

    fn try_from(v: Vec<f64>) -> Result<Self, Self::Error> {
        match v.as_slice() {
            [x, y] => Ok(Coordinate::new(*x, *y)),
            [x, y, z] => Ok(Coordinate::new_3d(*x, *y, *z)),
            other => Err(format!(
                "coordinate needs 2 or 3 ordinates, got {}",
                other.len()
            )),
        }
    }
}

impl From<Coordinate> for Vec<f64> {
    fn from(c: Coordinate) -> Self {
        if c.z == 0.0 {
            vec![c.x, c.y]
        } else {
            vec![c.x, c.y, c.z]
        }
    }
}

/// Hashable 2D key over the raw bit patterns of x and y.
///
/// `-0.0` is folded into `0.0`; no other normalization happens.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CoordKey(u64, u64);

impl From<Coordinate> for CoordKey {
    #[inline]
    fn from(c: Coordinate) -> Self {
        // -0.0 + 0.0 == +0.0 under round-to-nearest.
        CoordKey((c.x + 0.0).to_bits(), (c.y + 0.0).to_bits())
    }
}

/// Location of a point relative to a geometry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Location {
    Interior,
    Boundary,
    Exterior,
}

impl Location {
    /// Row/column index in the intersection matrix.
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Location::Interior => 0,
            Location::Boundary => 1,
            Location::Exterior => 2,
        }
    }

    pub const ALL: [Location; 3] = [Location::Interior, Location::Boundary, Location::Exterior];
}
