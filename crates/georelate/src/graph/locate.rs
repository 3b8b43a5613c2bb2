//! Point-in-geometry location with the robust orientation kernel.

use crate::cfg::BoundaryNodeRule;
use crate::geometry::{Geometry, Polygon};
use crate::kernel::{orientation_index, Coordinate, Envelope, Location, COLLINEAR};

/// Location of `p` relative to `geom`.
///
/// Multi-part geometries count boundary hits per component and resolve them
/// with `rule`, so a point shared by the boundaries of two touching polygons
/// of a multipolygon is interior under `Mod2`.
pub fn locate(p: Coordinate, geom: &Geometry, rule: BoundaryNodeRule) -> Location {
    locate_parts(p, geom, rule, true)
}

/// Location of `p` relative to the lineal and areal parts of `geom`.
///
/// Used for points inside edge pieces: a point component can coincide
/// with such a point but never contains the piece around it.
pub fn locate_non_puntal(p: Coordinate, geom: &Geometry, rule: BoundaryNodeRule) -> Location {
    locate_parts(p, geom, rule, false)
}

fn locate_parts(p: Coordinate, geom: &Geometry, rule: BoundaryNodeRule, points: bool) -> Location {
    if geom.is_empty() {
        return Location::Exterior;
    }
    match geom {
        Geometry::LineString(pts) => locate_on_line_string(p, pts),
        Geometry::Polygon(poly) => locate_in_polygon(p, poly),
        _ => {
            let mut acc = LocationCount {
                points,
                ..LocationCount::default()
            };
            acc.visit(p, geom);
            if rule.in_boundary(acc.boundaries) {
                Location::Boundary
            } else if acc.boundaries > 0 || acc.inside {
                Location::Interior
            } else {
                Location::Exterior
            }
        }
    }
}

#[derive(Default)]
struct LocationCount {
    points: bool,
    inside: bool,
    boundaries: usize,
}

impl LocationCount {
    fn update(&mut self, loc: Location) {
        match loc {
            Location::Interior => self.inside = true,
            Location::Boundary => self.boundaries += 1,
            Location::Exterior => {}
        }
    }

    fn visit(&mut self, p: Coordinate, geom: &Geometry) {
        match geom {
            Geometry::Point(_) | Geometry::MultiPoint(_) if !self.points => {}
            Geometry::Point(q) => self.update(locate_on_point(p, *q)),
            Geometry::MultiPoint(qs) => qs.iter().for_each(|q| self.update(locate_on_point(p, *q))),
            Geometry::LineString(pts) => self.update(locate_on_line_string(p, pts)),
            Geometry::MultiLineString(ls) => ls
                .iter()
                .for_each(|l| self.update(locate_on_line_string(p, l))),
            Geometry::Polygon(poly) => self.update(locate_in_polygon(p, poly)),
            Geometry::MultiPolygon(ps) => ps.iter().for_each(|poly| self.update(locate_in_polygon(p, poly))),
            Geometry::GeometryCollection(gs) => gs.iter().for_each(|g| self.visit(p, g)),
        }
    }
}

fn locate_on_point(p: Coordinate, q: Coordinate) -> Location {
    if p.equals_2d(&q) {
        Location::Interior
    } else {
        Location::Exterior
    }
}

fn locate_on_line_string(p: Coordinate, pts: &[Coordinate]) -> Location {
    let Some(env) = Envelope::of_coords(pts) else {
        return Location::Exterior;
    };
    if !env.contains_point(p) {
        return Location::Exterior;
    }
    let (first, last) = (pts[0], pts[pts.len() - 1]);
    let closed = first.equals_2d(&last);
    if !closed && (p.equals_2d(&first) || p.equals_2d(&last)) {
        return Location::Boundary;
    }
    if is_on_line(p, pts) {
        Location::Interior
    } else {
        Location::Exterior
    }
}

fn locate_in_polygon(p: Coordinate, poly: &Polygon) -> Location {
    if poly.is_empty() {
        return Location::Exterior;
    }
    match locate_in_ring_with_envelope(p, &poly.shell) {
        Location::Interior => {}
        other => return other,
    }
    for hole in &poly.holes {
        match locate_in_ring_with_envelope(p, hole) {
            Location::Interior => return Location::Exterior,
            Location::Boundary => return Location::Boundary,
            Location::Exterior => {}
        }
    }
    Location::Interior
}

fn locate_in_ring_with_envelope(p: Coordinate, ring: &[Coordinate]) -> Location {
    match Envelope::of_coords(ring) {
        Some(env) if env.contains_point(p) => locate_point_in_ring(p, ring),
        _ => Location::Exterior,
    }
}

/// Whether `p` lies on the closed segment `a b`.
pub fn is_on_segment(p: Coordinate, a: Coordinate, b: Coordinate) -> bool {
    Envelope::new(a, b).contains_point(p) && orientation_index(a, b, p) == COLLINEAR
}

/// Whether `p` lies on any segment of `pts`.
pub fn is_on_line(p: Coordinate, pts: &[Coordinate]) -> bool {
    match pts {
        [single] => p.equals_2d(single),
        _ => pts.windows(2).any(|w| is_on_segment(p, w[0], w[1])),
    }
}

/// Ray-crossing location of `p` in a closed ring; points on a segment are Boundary.
pub fn locate_point_in_ring(p: Coordinate, ring: &[Coordinate]) -> Location {
    let mut counter = RayCrossingCounter::new(p);
    for w in ring.windows(2) {
        counter.count_segment(w[1], w[0]);
        if counter.on_segment {
            return Location::Boundary;
        }
    }
    counter.location()
}

/// Counts crossings of a rightward horizontal ray from `p`.
struct RayCrossingCounter {
    p: Coordinate,
    crossings: usize,
    on_segment: bool,
}

impl RayCrossingCounter {
    fn new(p: Coordinate) -> Self {
        Self {
            p,
            crossings: 0,
            on_segment: false,
        }
    }

    fn count_segment(&mut self, p1: Coordinate, p2: Coordinate) {
        let p = self.p;
        // Entirely left of the ray origin.
        if p1.x < p.x && p2.x < p.x {
            return;
        }
        if p.equals_2d(&p2) {
            self.on_segment = true;
            return;
        }
        if p1.y == p.y && p2.y == p.y {
            let (min_x, max_x) = (p1.x.min(p2.x), p1.x.max(p2.x));
            if p.x >= min_x && p.x <= max_x {
                self.on_segment = true;
            }
            return;
        }
        // Half-open in y so shared vertices are counted once.
        if (p1.y > p.y && p2.y <= p.y) || (p2.y > p.y && p1.y <= p.y) {
            let mut orient = orientation_index(p1, p2, p);
            if orient == COLLINEAR {
                self.on_segment = true;
                return;
            }
            if p2.y < p1.y {
                orient = -orient;
            }
            if orient > 0 {
                self.crossings += 1;
            }
        }
    }

    fn location(&self) -> Location {
        if self.on_segment {
            Location::Boundary
        } else if self.crossings % 2 == 1 {
            Location::Interior
        } else {
            Location::Exterior
        }
    }
}
