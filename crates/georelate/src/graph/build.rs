//! Per-geometry topology graph: construction, boundary bookkeeping, and
//! self-noding.

use tracing::debug;

use super::edge::Edge;
use super::types::{Label, NodeMap, Position};
use crate::cfg::{BoundaryNodeRule, RelateCfg};
use crate::error::RelateError;
use crate::geometry::{Geometry, Polygon};
use crate::intersect::{compute_intersections, SegmentIntersector, SweepMode};
use crate::kernel::{is_ccw, remove_repeated_points, Coordinate, Location};

/// Nodes and edges derived from one input geometry, labeled at `arg_index`.
#[derive(Clone, Debug)]
pub struct GeometryGraph<'g> {
    geometry: &'g Geometry,
    arg_index: usize,
    boundary_rule: BoundaryNodeRule,
    /// Off for multipolygons: shells may share boundary edges.
    use_boundary_rule: bool,
    polygons: usize,
    edges: Vec<Edge>,
    nodes: NodeMap,
}

fn check_finite(pts: &[Coordinate]) -> Result<(), RelateError> {
    match pts.iter().find(|c| !c.is_finite()) {
        Some(c) => Err(RelateError::validation(format!(
            "non-finite ordinate at ({}, {})",
            c.x, c.y
        ))),
        None => Ok(()),
    }
}

impl<'g> GeometryGraph<'g> {
    /// Walk `geometry` into nodes and edges. Self-noding is a separate step.
    pub fn build(geometry: &'g Geometry, arg_index: usize, cfg: &RelateCfg) -> Result<Self, RelateError> {
        debug_assert!(arg_index < 2);
        let mut g = Self {
            geometry,
            arg_index,
            boundary_rule: cfg.boundary_rule,
            use_boundary_rule: true,
            polygons: 0,
            edges: Vec::new(),
            nodes: NodeMap::new(),
        };
        g.add(geometry)?;
        if g.polygons > 1 {
            g.use_boundary_rule = false;
        }
        debug!(
            arg_index,
            kind = %geometry.kind(),
            edges = g.edges.len(),
            nodes = g.nodes.len(),
            "graph built"
        );
        Ok(g)
    }

    #[inline]
    pub fn geometry(&self) -> &'g Geometry {
        self.geometry
    }

    #[inline]
    pub fn arg_index(&self) -> usize {
        self.arg_index
    }

    #[inline]
    pub fn boundary_rule(&self) -> BoundaryNodeRule {
        self.boundary_rule
    }

    /// More than one polygon was added, so shells may share edges and a
    /// Boundary-labeled edge can run through the interior.
    #[inline]
    pub fn merges_areas(&self) -> bool {
        self.polygons > 1
    }

    #[inline]
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    #[inline]
    pub fn nodes(&self) -> &NodeMap {
        &self.nodes
    }

    fn add(&mut self, g: &Geometry) -> Result<(), RelateError> {
        if g.is_empty() {
            return Ok(());
        }
        match g {
            Geometry::Point(c) => self.add_point(*c),
            Geometry::LineString(pts) => self.add_line_string(pts),
            Geometry::Polygon(p) => self.add_polygon(p),
            Geometry::MultiPoint(pts) => pts.iter().try_for_each(|c| self.add_point(*c)),
            Geometry::MultiLineString(ls) => ls.iter().try_for_each(|l| self.add_line_string(l)),
            Geometry::MultiPolygon(ps) => {
                self.use_boundary_rule = false;
                ps.iter().try_for_each(|p| self.add_polygon(p))
            }
            Geometry::GeometryCollection(gs) => gs.iter().try_for_each(|child| self.add(child)),
        }
    }

    fn add_point(&mut self, c: Coordinate) -> Result<(), RelateError> {
        check_finite(std::slice::from_ref(&c))?;
        self.insert_point(c, Location::Interior);
        Ok(())
    }

    fn add_line_string(&mut self, pts: &[Coordinate]) -> Result<(), RelateError> {
        if pts.is_empty() {
            return Ok(());
        }
        check_finite(pts)?;
        let coords = remove_repeated_points(pts);
        let (first, last) = match coords.as_slice() {
            [first, .., last] => (*first, *last),
            _ => {
                return Err(RelateError::validation(format!(
                    "line must have at least 2 distinct points, found {}",
                    coords.len()
                )))
            }
        };
        self.edges
            .push(Edge::new(coords, Label::on(self.arg_index, Location::Interior)));
        self.insert_boundary_point(first);
        self.insert_boundary_point(last);
        Ok(())
    }

    fn add_polygon(&mut self, p: &Polygon) -> Result<(), RelateError> {
        if p.is_empty() {
            return Ok(());
        }
        self.polygons += 1;
        self.add_polygon_ring(&p.shell, Location::Exterior, Location::Interior)?;
        for hole in &p.holes {
            self.add_polygon_ring(hole, Location::Interior, Location::Exterior)?;
        }
        Ok(())
    }

    /// Add a ring labeled for clockwise traversal; CCW rings swap sides.
    fn add_polygon_ring(&mut self, ring: &[Coordinate], cw_left: Location, cw_right: Location) -> Result<(), RelateError> {
        if ring.is_empty() {
            return Ok(());
        }
        check_finite(ring)?;
        let coords = remove_repeated_points(ring);
        if coords.len() < 4 {
            return Err(RelateError::validation(format!(
                "polygon ring has too few points, found {}",
                coords.len()
            )));
        }
        let (left, right) = if is_ccw(&coords)? {
            (cw_right, cw_left)
        } else {
            (cw_left, cw_right)
        };
        let start = coords[0];
        self.edges.push(Edge::new(
            coords,
            Label::area(self.arg_index, Location::Boundary, left, right),
        ));
        self.insert_point(start, Location::Boundary);
        Ok(())
    }

    /// Set the On-location of the node at `c`, creating it if needed.
    fn insert_point(&mut self, c: Coordinate, loc: Location) {
        let i = self.nodes.add_node(c);
        self.nodes
            .node_mut(i)
            .label
            .set_location(self.arg_index, Position::On, loc);
    }

    /// Count one more line-endpoint touch at `c` and re-derive its location.
    fn insert_boundary_point(&mut self, c: Coordinate) {
        let idx = self.arg_index;
        let rule = self.boundary_rule;
        let i = self.nodes.add_node(c);
        let node = self.nodes.node_mut(i);
        node.boundary_touches[idx] += 1;
        let loc = if rule.in_boundary(node.boundary_touches[idx]) {
            Location::Boundary
        } else {
            Location::Interior
        };
        node.label.set_location(idx, Position::On, loc);
    }

    pub fn is_boundary_node(&self, c: &Coordinate) -> bool {
        self.nodes
            .find(c)
            .and_then(|n| n.label.on_location(self.arg_index))
            == Some(Location::Boundary)
    }

    /// Coordinates of every node on this geometry's boundary.
    pub fn boundary_nodes(&self) -> Vec<Coordinate> {
        self.nodes
            .iter()
            .filter(|n| n.label.on_location(self.arg_index) == Some(Location::Boundary))
            .map(|n| n.coord)
            .collect()
    }

    /// Intersect the graph's edges with each other and turn every
    /// non-trivial intersection into a node.
    pub fn compute_self_nodes(&mut self) -> Result<SegmentIntersector, RelateError> {
        let mut si = SegmentIntersector::new(true, true);
        // Closed rings only: chains of one ring are not compared.
        let mode = if self.geometry.is_rings() {
            SweepMode::SkipSameEdge
        } else {
            SweepMode::AllPairs
        };
        let stats = compute_intersections(&mut [&mut self.edges], mode, &mut si)?;
        self.add_self_intersection_nodes();
        debug!(
            arg_index = self.arg_index,
            ?mode,
            segment_pairs = stats.segment_pairs,
            intersections = si.num_intersections(),
            edges = self.edges.len(),
            nodes = self.nodes.len(),
            "self nodes computed"
        );
        Ok(si)
    }

    /// Intersect this graph's edges against `other`'s, recording into both.
    pub fn compute_edge_intersections(
        &mut self,
        other: &mut GeometryGraph<'_>,
        include_proper: bool,
        stop_on_first_proper: bool,
    ) -> Result<SegmentIntersector, RelateError> {
        let boundary: Vec<Coordinate> = self
            .boundary_nodes()
            .into_iter()
            .chain(other.boundary_nodes())
            .collect();
        let mut si = SegmentIntersector::new(include_proper, true)
            .stop_on_first_proper(stop_on_first_proper)
            .with_boundary_nodes(boundary);
        let stats = compute_intersections(
            &mut [&mut self.edges, &mut other.edges],
            SweepMode::SkipSameSet,
            &mut si,
        )?;
        debug!(
            segment_pairs = stats.segment_pairs,
            intersections = si.num_intersections(),
            proper = si.has_proper(),
            "edge intersections computed"
        );
        Ok(si)
    }

    fn add_self_intersection_nodes(&mut self) {
        let idx = self.arg_index;
        let pending: Vec<(Coordinate, Location)> = self
            .edges
            .iter()
            .flat_map(|e| {
                let loc = e.label.on_location(idx).unwrap_or(Location::Interior);
                e.intersections().map(move |ei| (ei.coord, loc))
            })
            .collect();
        for (coord, loc) in pending {
            if self.is_boundary_node(&coord) {
                continue;
            }
            if loc == Location::Boundary && self.use_boundary_rule {
                self.insert_boundary_point(coord);
            } else {
                self.insert_point(coord, loc);
            }
        }
    }
}
