//! Planar geometry value model consumed by the topology engine.
//!
//! A closed sum type: every consumer matches exhaustively, so there is no
//! "unsupported geometry kind" at runtime.
//!
//! With the `serde` feature, geometries read and write a GeoJSON-like shape:
//! `{"type": "Polygon", "coordinates": [[[0, 0], [1, 0], ...]]}`, and
//! collections carry `"geometries"`.

use std::fmt;

use crate::kernel::{Coordinate, Envelope};

/// Polygon as a closed shell with zero or more closed holes.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Polygon {
    pub shell: Vec<Coordinate>,
    pub holes: Vec<Vec<Coordinate>>,
}

impl Polygon {
    pub fn new(shell: Vec<Coordinate>, holes: Vec<Vec<Coordinate>>) -> Self {
        Self { shell, holes }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.shell.is_empty()
    }

    /// Shell followed by holes.
    pub fn rings(&self) -> impl Iterator<Item = &Vec<Coordinate>> {
        std::iter::once(&self.shell).chain(self.holes.iter())
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(from = "json::GeometryJson", into = "json::GeometryJson")
)]
pub enum Geometry {
    Point(Coordinate),
    LineString(Vec<Coordinate>),
    Polygon(Polygon),
    MultiPoint(Vec<Coordinate>),
    MultiLineString(Vec<Vec<Coordinate>>),
    MultiPolygon(Vec<Polygon>),
    GeometryCollection(Vec<Geometry>),
}

/// Variant tag of a `Geometry`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GeometryKind {
    Point,
    LineString,
    Polygon,
    MultiPoint,
    MultiLineString,
    MultiPolygon,
    GeometryCollection,
}

impl fmt::Display for GeometryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            GeometryKind::Point => "Point",
            GeometryKind::LineString => "LineString",
            GeometryKind::Polygon => "Polygon",
            GeometryKind::MultiPoint => "MultiPoint",
            GeometryKind::MultiLineString => "MultiLineString",
            GeometryKind::MultiPolygon => "MultiPolygon",
            GeometryKind::GeometryCollection => "GeometryCollection",
        };
        f.write_str(s)
    }
}

fn line_is_closed(pts: &[Coordinate]) -> bool {
    match (pts.first(), pts.last()) {
        (Some(a), Some(b)) => a.equals_2d(b),
        _ => false,
    }
}

impl Geometry {
    pub fn kind(&self) -> GeometryKind {
        match self {
            Geometry::Point(_) => GeometryKind::Point,
            Geometry::LineString(_) => GeometryKind::LineString,
            Geometry::Polygon(_) => GeometryKind::Polygon,
            Geometry::MultiPoint(_) => GeometryKind::MultiPoint,
            Geometry::MultiLineString(_) => GeometryKind::MultiLineString,
            Geometry::MultiPolygon(_) => GeometryKind::MultiPolygon,
            Geometry::GeometryCollection(_) => GeometryKind::GeometryCollection,
        }
    }

    /// Topological dimension: 0 points, 1 lines, 2 areas; a collection takes
    /// the maximum over its children, -1 when it has none.
    pub fn dimension(&self) -> i8 {
        match self {
            Geometry::Point(_) | Geometry::MultiPoint(_) => 0,
            Geometry::LineString(_) | Geometry::MultiLineString(_) => 1,
            Geometry::Polygon(_) | Geometry::MultiPolygon(_) => 2,
            Geometry::GeometryCollection(gs) => gs.iter().map(Geometry::dimension).max().unwrap_or(-1),
        }
    }

    /// Dimension of the boundary; -1 when the boundary is empty.
    pub fn boundary_dimension(&self) -> i8 {
        match self {
            Geometry::Point(_) | Geometry::MultiPoint(_) => -1,
            Geometry::LineString(_) | Geometry::MultiLineString(_) => {
                if self.is_closed() {
                    -1
                } else {
                    0
                }
            }
            Geometry::Polygon(_) | Geometry::MultiPolygon(_) => 1,
            Geometry::GeometryCollection(gs) => gs
                .iter()
                .map(Geometry::boundary_dimension)
                .max()
                .unwrap_or(-1),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Geometry::Point(_) => false,
            Geometry::LineString(pts) | Geometry::MultiPoint(pts) => pts.is_empty(),
            Geometry::Polygon(p) => p.is_empty(),
            Geometry::MultiLineString(ls) => ls.iter().all(Vec::is_empty),
            Geometry::MultiPolygon(ps) => ps.iter().all(Polygon::is_empty),
            Geometry::GeometryCollection(gs) => gs.iter().all(Geometry::is_empty),
        }
    }

    /// Whether a line geometry is closed. A multi-line is closed iff it is
    /// non-empty and every component is closed. Non-line kinds report `false`.
    pub fn is_closed(&self) -> bool {
        match self {
            Geometry::LineString(pts) => line_is_closed(pts),
            Geometry::MultiLineString(ls) => !ls.is_empty() && ls.iter().all(|l| line_is_closed(l)),
            _ => false,
        }
    }

    /// Whether every linework component is a polygon ring.
    pub fn is_rings(&self) -> bool {
        matches!(self, Geometry::Polygon(_) | Geometry::MultiPolygon(_))
    }

    /// Bounding box of all coordinates; `None` when empty.
    pub fn envelope(&self) -> Option<Envelope> {
        let mut env: Option<Envelope> = None;
        self.for_each_coord(&mut |c: &Coordinate| match env.as_mut() {
            Some(e) => e.expand_to_include(*c),
            None => env = Some(Envelope::of_point(*c)),
        });
        env
    }

    pub fn num_coordinates(&self) -> usize {
        let mut n = 0usize;
        self.for_each_coord(&mut |_: &Coordinate| n += 1);
        n
    }

    /// Visit every coordinate in storage order.
    pub fn for_each_coord(&self, f: &mut impl FnMut(&Coordinate)) {
        match self {
            Geometry::Point(c) => f(c),
            Geometry::LineString(pts) | Geometry::MultiPoint(pts) => pts.iter().for_each(f),
            Geometry::Polygon(p) => p.rings().flatten().for_each(f),
            Geometry::MultiLineString(ls) => ls.iter().flatten().for_each(f),
            Geometry::MultiPolygon(ps) => ps.iter().flat_map(|p| p.rings()).flatten().for_each(f),
            Geometry::GeometryCollection(gs) => {
                for g in gs {
                    g.for_each_coord(f);
                }
            }
        }
    }
}

#[cfg(feature = "serde")]
mod json {
    use serde::{Deserialize, Serialize};

    use super::{Geometry, Polygon};
    use crate::kernel::Coordinate;

    #[derive(Serialize, Deserialize)]
    #[serde(tag = "type")]
    pub(super) enum GeometryJson {
        Point { coordinates: Coordinate },
        LineString { coordinates: Vec<Coordinate> },
        Polygon { coordinates: Vec<Vec<Coordinate>> },
        MultiPoint { coordinates: Vec<Coordinate> },
        MultiLineString { coordinates: Vec<Vec<Coordinate>> },
        MultiPolygon { coordinates: Vec<Vec<Vec<Coordinate>>> },
        GeometryCollection { geometries: Vec<Geometry> },
    }

    fn polygon_from_rings(mut rings: Vec<Vec<Coordinate>>) -> Polygon {
        if rings.is_empty() {
            return Polygon::default();
        }
        let shell = rings.remove(0);
        Polygon::new(shell, rings)
    }

    fn polygon_to_rings(p: Polygon) -> Vec<Vec<Coordinate>> {
        if p.is_empty() {
            return Vec::new();
        }
        let mut rings = Vec::with_capacity(1 + p.holes.len());
        rings.push(p.shell);
        rings.extend(p.holes);
        rings
    }

    impl From<GeometryJson> for Geometry {
        fn from(g: GeometryJson) -> Self {
            match g {
                GeometryJson::Point { coordinates } => Geometry::Point(coordinates),
                GeometryJson::LineString { coordinates } => Geometry::LineString(coordinates),
                GeometryJson::Polygon { coordinates } => Geometry::Polygon(polygon_from_rings(coordinates)),
                GeometryJson::MultiPoint { coordinates } => Geometry::MultiPoint(coordinates),
                GeometryJson::MultiLineString { coordinates } => Geometry::MultiLineString(coordinates),
                GeometryJson::MultiPolygon { coordinates } => {
                    Geometry::MultiPolygon(coordinates.into_iter().map(polygon_from_rings).collect())
                }
                GeometryJson::GeometryCollection { geometries } => Geometry::GeometryCollection(geometries),
            }
        }
    }

    impl From<Geometry> for GeometryJson {
        fn from(g: Geometry) -> Self {
            match g {
                Geometry::Point(c) => GeometryJson::Point { coordinates: c },
                Geometry::LineString(coordinates) => GeometryJson::LineString { coordinates },
                Geometry::Polygon(p) => GeometryJson::Polygon {
                    coordinates: polygon_to_rings(p),
                },
                Geometry::MultiPoint(coordinates) => GeometryJson::MultiPoint { coordinates },
                Geometry::MultiLineString(coordinates) => GeometryJson::MultiLineString { coordinates },
                Geometry::MultiPolygon(ps) => GeometryJson::MultiPolygon {
                    coordinates: ps.into_iter().map(polygon_to_rings).collect(),
                },
                Geometry::GeometryCollection(geometries) => GeometryJson::GeometryCollection { geometries },
            }
        }
    }
}
