//! Edges, their intersection sets, and splitting into pieces.

use std::cmp::Ordering;
use std::collections::BTreeSet;

use super::types::Label;
use crate::error::RelateError;
use crate::intersect::line::{edge_distance, SegmentIntersection};
use crate::intersect::{ChainSource, MonotoneChainEdge};
use crate::kernel::Coordinate;

/// A point on an edge, keyed by `(segment index, distance along it, coordinate)`.
///
/// The segment index is normalized: a point equal to the next vertex is
/// stored on the following segment at distance 0.
#[derive(Clone, Copy, Debug)]
pub struct EdgeIntersection {
    pub coord: Coordinate,
    pub seg: usize,
    pub dist: f64,
}

impl PartialEq for EdgeIntersection {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for EdgeIntersection {}

impl PartialOrd for EdgeIntersection {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for EdgeIntersection {
    fn cmp(&self, other: &Self) -> Ordering {
        self.seg
            .cmp(&other.seg)
            .then(self.dist.total_cmp(&other.dist))
            .then(self.coord.key().cmp(&other.coord.key()))
    }
}

/// One ring or line component of an input geometry.
#[derive(Clone, Debug)]
pub struct Edge {
    pts: Vec<Coordinate>,
    pub label: Label,
    chains: Option<MonotoneChainEdge>,
    intersections: BTreeSet<EdgeIntersection>,
    isolated: bool,
}

impl Edge {
    /// `pts` must hold at least two points with no consecutive duplicates.
    pub fn new(pts: Vec<Coordinate>, label: Label) -> Self {
        Self {
            pts,
            label,
            chains: None,
            intersections: BTreeSet::new(),
            isolated: true,
        }
    }

    #[inline]
    pub fn coords(&self) -> &[Coordinate] {
        &self.pts
    }

    #[inline]
    pub fn num_points(&self) -> usize {
        self.pts.len()
    }

    pub fn is_closed(&self) -> bool {
        match (self.pts.first(), self.pts.last()) {
            (Some(a), Some(b)) => a.equals_2d(b),
            _ => false,
        }
    }

    #[inline]
    pub fn is_isolated(&self) -> bool {
        self.isolated
    }

    #[inline]
    pub fn set_isolated(&mut self, isolated: bool) {
        self.isolated = isolated;
    }

    pub fn intersections(&self) -> impl Iterator<Item = &EdgeIntersection> {
        self.intersections.iter()
    }

    /// Record every point of `li` as lying on segment `seg` of this edge.
    pub fn add_intersections(&mut self, li: &SegmentIntersection, seg: usize) {
        for pt in li.points() {
            self.add_intersection(*pt, seg);
        }
    }

    /// Record `pt` on segment `seg`, normalizing onto the next segment when
    /// `pt` is that segment's start vertex.
    pub fn add_intersection(&mut self, pt: Coordinate, seg: usize) {
        let mut seg_index = seg;
        let mut dist = edge_distance(pt, self.pts[seg], self.pts[seg + 1]);
        let next = seg + 1;
        if next < self.pts.len() && pt.equals_2d(&self.pts[next]) {
            seg_index = next;
            dist = 0.0;
        }
        self.intersections.insert(EdgeIntersection {
            coord: pt,
            seg: seg_index,
            dist,
        });
    }

    /// Vertex sequences between consecutive intersections, endpoints included.
    pub fn split_pieces(&self) -> Vec<Vec<Coordinate>> {
        let (Some(first), Some(last)) = (self.pts.first(), self.pts.last()) else {
            return Vec::new();
        };
        let mut cuts = self.intersections.clone();
        cuts.insert(EdgeIntersection {
            coord: *first,
            seg: 0,
            dist: 0.0,
        });
        cuts.insert(EdgeIntersection {
            coord: *last,
            seg: self.pts.len() - 1,
            dist: 0.0,
        });
        let cuts: Vec<EdgeIntersection> = cuts.into_iter().collect();
        cuts.windows(2)
            .map(|w| self.piece_between(&w[0], &w[1]))
            .filter(|piece| piece.len() >= 2)
            .collect()
    }

    fn piece_between(&self, ei0: &EdgeIntersection, ei1: &EdgeIntersection) -> Vec<Coordinate> {
        let last_seg_start = self.pts[ei1.seg];
        let use_end_point = ei1.dist > 0.0 || !ei1.coord.equals_2d(&last_seg_start);
        let mut piece = Vec::with_capacity(ei1.seg - ei0.seg + 2);
        piece.push(ei0.coord);
        for p in &self.pts[ei0.seg + 1..=ei1.seg] {
            if !piece.last().is_some_and(|q| q.equals_2d(p)) {
                piece.push(*p);
            }
        }
        if use_end_point && !piece.last().is_some_and(|q| q.equals_2d(&ei1.coord)) {
            piece.push(ei1.coord);
        }
        piece
    }
}

impl ChainSource for Edge {
    #[inline]
    fn coords(&self) -> &[Coordinate] {
        &self.pts
    }

    fn monotone_chains(&mut self) -> Result<&MonotoneChainEdge, RelateError> {
        let chains = match self.chains.take() {
            Some(c) => c,
            None => MonotoneChainEdge::build(&self.pts)?,
        };
        Ok(self.chains.insert(chains))
    }
}
