//! Segment intersector: the sweep's visitor that records intersections into
//! edges and tracks proper crossings.

use std::collections::HashSet;

use super::line::{intersect_segments, SegmentIntersection};
use super::sweep::{SegRef, SegmentVisitor};
use crate::graph::Edge;
use crate::kernel::{CoordKey, Coordinate};

#[derive(Clone, Debug, Default)]
pub struct SegmentIntersector {
    include_proper: bool,
    record_isolation: bool,
    stop_on_first_proper: bool,
    boundary_nodes: HashSet<CoordKey>,

    has_intersection: bool,
    has_proper: bool,
    has_proper_interior: bool,
    proper_point: Option<Coordinate>,
    num_tests: usize,
    num_intersections: usize,
    done: bool,
}

impl SegmentIntersector {
    /// `include_proper`: record proper crossings into edges, not only detect them.
    /// `record_isolation`: clear the isolated flag on edges found to intersect.
    pub fn new(include_proper: bool, record_isolation: bool) -> Self {
        Self {
            include_proper,
            record_isolation,
            ..Self::default()
        }
    }

    /// Report done at the first proper intersection.
    pub fn stop_on_first_proper(mut self, stop: bool) -> Self {
        self.stop_on_first_proper = stop;
        self
    }

    /// Boundary nodes of both inputs; a proper point on one of them is not
    /// an interior crossing.
    pub fn with_boundary_nodes(mut self, nodes: impl IntoIterator<Item = Coordinate>) -> Self {
        self.boundary_nodes.extend(nodes.into_iter().map(|c| c.key()));
        self
    }

    /// Any non-trivial intersection was found.
    #[inline]
    pub fn has_intersection(&self) -> bool {
        self.has_intersection
    }

    #[inline]
    pub fn has_proper(&self) -> bool {
        self.has_proper
    }

    /// A proper intersection away from every boundary node was found.
    #[inline]
    pub fn has_proper_interior(&self) -> bool {
        self.has_proper_interior
    }

    #[inline]
    pub fn proper_point(&self) -> Option<Coordinate> {
        self.proper_point
    }

    #[inline]
    pub fn num_tests(&self) -> usize {
        self.num_tests
    }

    #[inline]
    pub fn num_intersections(&self) -> usize {
        self.num_intersections
    }

    /// A single shared vertex between consecutive segments of one edge, or
    /// between the first and last segment of a closed edge.
    fn is_trivial(edge: &Edge, seg0: usize, seg1: usize, li: &SegmentIntersection) -> bool {
        if !matches!(li, SegmentIntersection::Point { .. }) {
            return false;
        }
        if seg0.abs_diff(seg1) == 1 {
            return true;
        }
        if edge.is_closed() {
            let max_seg = edge.num_points() - 1;
            if (seg0 == 0 && seg1 == max_seg - 1) || (seg1 == 0 && seg0 == max_seg - 1) {
                return true;
            }
        }
        false
    }
}

impl SegmentVisitor<Edge> for SegmentIntersector {
    fn visit(&mut self, sets: &mut [&mut Vec<Edge>], a: SegRef, b: SegRef) {
        let same_edge = a.set == b.set && a.edge == b.edge;
        if same_edge && a.seg == b.seg {
            return;
        }
        self.num_tests += 1;

        let (p1, p2) = {
            let pts = sets[a.set][a.edge].coords();
            (pts[a.seg], pts[a.seg + 1])
        };
        let (q1, q2) = {
            let pts = sets[b.set][b.edge].coords();
            (pts[b.seg], pts[b.seg + 1])
        };
        let li = intersect_segments(p1, p2, q1, q2);
        if !li.has_intersection() {
            return;
        }

        if self.record_isolation {
            sets[a.set][a.edge].set_isolated(false);
            sets[b.set][b.edge].set_isolated(false);
        }
        self.num_intersections += 1;

        if same_edge && Self::is_trivial(&sets[a.set][a.edge], a.seg, b.seg, &li) {
            return;
        }
        self.has_intersection = true;

        if self.include_proper || !li.is_proper() {
            sets[a.set][a.edge].add_intersections(&li, a.seg);
            sets[b.set][b.edge].add_intersections(&li, b.seg);
        }
        if let SegmentIntersection::Point { pt, proper: true } = li {
            self.proper_point = Some(pt);
            self.has_proper = true;
            if self.stop_on_first_proper {
                self.done = true;
            }
            if !self.boundary_nodes.contains(&pt.key()) {
                self.has_proper_interior = true;
            }
        }
    }

    #[inline]
    fn is_done(&self) -> bool {
        self.done
    }
}
