//! Robust segment/segment intersection.
//!
//! Classification is decided by exact orientation signs only; coordinates
//! are computed in floating point and, where an input vertex is the answer,
//! copied rather than recomputed.

use nalgebra::Vector3;

use crate::kernel::{distance_point_to_segment, orientation_index, Coordinate, Envelope};

/// Outcome of intersecting two segments.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SegmentIntersection {
    None,
    /// A single point; `proper` iff interior to both segments.
    Point { pt: Coordinate, proper: bool },
    /// Collinear overlap bounded by two distinct points.
    Collinear([Coordinate; 2]),
}

impl SegmentIntersection {
    #[inline]
    pub fn has_intersection(&self) -> bool {
        !matches!(self, SegmentIntersection::None)
    }

    #[inline]
    pub fn is_proper(&self) -> bool {
        matches!(self, SegmentIntersection::Point { proper: true, .. })
    }

    /// Intersection points (0, 1, or 2).
    pub fn points(&self) -> &[Coordinate] {
        match self {
            SegmentIntersection::None => &[],
            SegmentIntersection::Point { pt, .. } => std::slice::from_ref(pt),
            SegmentIntersection::Collinear(pts) => pts,
        }
    }
}

/// Intersect segments `p1p2` and `q1q2`.
pub fn intersect_segments(p1: Coordinate, p2: Coordinate, q1: Coordinate, q2: Coordinate) -> SegmentIntersection {
    if !Envelope::segments_intersect(p1, p2, q1, q2) {
        return SegmentIntersection::None;
    }

    let pq1 = orientation_index(p1, p2, q1);
    let pq2 = orientation_index(p1, p2, q2);
    if (pq1 > 0 && pq2 > 0) || (pq1 < 0 && pq2 < 0) {
        return SegmentIntersection::None;
    }
    let qp1 = orientation_index(q1, q2, p1);
    let qp2 = orientation_index(q1, q2, p2);
    if (qp1 > 0 && qp2 > 0) || (qp1 < 0 && qp2 < 0) {
        return SegmentIntersection::None;
    }

    if pq1 == 0 && pq2 == 0 && qp1 == 0 && qp2 == 0 {
        return collinear_intersection(p1, p2, q1, q2);
    }

    if pq1 == 0 || pq2 == 0 || qp1 == 0 || qp2 == 0 {
        // Endpoint touch: the answer is an input vertex.
        let pt = if p1.equals_2d(&q1) || p1.equals_2d(&q2) {
            p1
        } else if p2.equals_2d(&q1) || p2.equals_2d(&q2) {
            p2
        } else if pq1 == 0 {
            q1
        } else if pq2 == 0 {
            q2
        } else if qp1 == 0 {
            p1
        } else {
            p2
        };
        return SegmentIntersection::Point { pt, proper: false };
    }

    SegmentIntersection::Point {
        pt: proper_intersection(p1, p2, q1, q2),
        proper: true,
    }
}

fn collinear_intersection(p1: Coordinate, p2: Coordinate, q1: Coordinate, q2: Coordinate) -> SegmentIntersection {
    let p1_in_q = Envelope::segment_contains(q1, q2, p1);
    let p2_in_q = Envelope::segment_contains(q1, q2, p2);
    let q1_in_p = Envelope::segment_contains(p1, p2, q1);
    let q2_in_p = Envelope::segment_contains(p1, p2, q2);

    let pair_or_touch = |a: Coordinate, b: Coordinate, lonely: bool| {
        if a.equals_2d(&b) && lonely {
            SegmentIntersection::Point { pt: a, proper: false }
        } else {
            SegmentIntersection::Collinear([a, b])
        }
    };

    if q1_in_p && q2_in_p {
        return SegmentIntersection::Collinear([q1, q2]);
    }
    if p1_in_q && p2_in_q {
        return SegmentIntersection::Collinear([p1, p2]);
    }
    if q1_in_p && p1_in_q {
        return pair_or_touch(q1, p1, !q2_in_p && !p2_in_q);
    }
    if q1_in_p && p2_in_q {
        return pair_or_touch(q1, p2, !q2_in_p && !p1_in_q);
    }
    if q2_in_p && p1_in_q {
        return pair_or_touch(q2, p1, !q1_in_p && !p2_in_q);
    }
    if q2_in_p && p2_in_q {
        return pair_or_touch(q2, p2, !q1_in_p && !p1_in_q);
    }
    SegmentIntersection::None
}

/// Crossing point of two properly intersecting segments.
///
/// Inputs are translated so the centre of the envelope overlap is the origin,
/// then intersected in homogeneous coordinates. A non-finite result or one
/// outside either segment envelope falls back to the nearest endpoint.
fn proper_intersection(p1: Coordinate, p2: Coordinate, q1: Coordinate, q2: Coordinate) -> Coordinate {
    let centre = Envelope::new(p1, p2)
        .intersection(&Envelope::new(q1, q2))
        .map(|e| e.centre())
        .unwrap_or_default();

    let shifted = |c: Coordinate| Vector3::new(c.x - centre.x, c.y - centre.y, 1.0);
    let line_p = shifted(p1).cross(&shifted(p2));
    let line_q = shifted(q1).cross(&shifted(q2));
    let h = line_p.cross(&line_q);

    let candidate = Coordinate::new(h.x / h.z + centre.x, h.y / h.z + centre.y);
    if candidate.is_finite()
        && Envelope::segment_contains(p1, p2, candidate)
        && Envelope::segment_contains(q1, q2, candidate)
    {
        return candidate;
    }
    nearest_endpoint(p1, p2, q1, q2)
}

/// Endpoint of either segment closest to the other segment. Ties go to the
/// lexicographically smaller coordinate so argument order does not matter.
fn nearest_endpoint(p1: Coordinate, p2: Coordinate, q1: Coordinate, q2: Coordinate) -> Coordinate {
    let mut nearest = p1;
    let mut min_dist = distance_point_to_segment(p1, q1, q2);
    for (pt, a, b) in [(p2, q1, q2), (q1, p1, p2), (q2, p1, p2)] {
        let d = distance_point_to_segment(pt, a, b);
        let closer = d
            .total_cmp(&min_dist)
            .then(pt.x.total_cmp(&nearest.x))
            .then(pt.y.total_cmp(&nearest.y))
            .is_lt();
        if closer {
            min_dist = d;
            nearest = pt;
        }
    }
    nearest
}

/// Monotone distance of `p` along segment `p0p1`, exact for vertices.
///
/// Not the Euclidean distance: it is the larger axis offset, which orders
/// points on one segment consistently and is exactly 0 at `p0`.
pub fn edge_distance(p: Coordinate, p0: Coordinate, p1: Coordinate) -> f64 {
    let dx = (p1.x - p0.x).abs();
    let dy = (p1.y - p0.y).abs();
    if p.equals_2d(&p0) {
        return 0.0;
    }
    if p.equals_2d(&p1) {
        return dx.max(dy);
    }
    let pdx = (p.x - p0.x).abs();
    let pdy = (p.y - p0.y).abs();
    let mut dist = if dx > dy { pdx } else { pdy };
    if dist == 0.0 {
        dist = pdx.max(pdy);
    }
    debug_assert!(dist > 0.0, "non-vertex point reported at distance 0");
    dist
}
