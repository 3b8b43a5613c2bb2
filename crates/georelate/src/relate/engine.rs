//! Relate: build both graphs, node them against each other, label, and fill
//! the intersection matrix.
//!
//! Matrix population
//! - Every edge is split at its intersections into pieces. Pieces of one
//!   geometry with identical vertex sequences (either direction) are merged:
//!   a side is Interior if any member says so, and a piece Interior on both
//!   sides is itself Interior.
//! - Pieces present in both geometries contribute their On/On cell (dim 1)
//!   and their side cells (dim 2).
//! - Any other piece lies entirely in one location of the other geometry,
//!   found by locating the midpoint of its first segment against the
//!   other geometry's lineal and areal parts.
//! - Every node contributes its On/On cell (dim 0). In a geometry with
//!   several polygons, a node whose incident area pieces are all Interior
//!   on both sides is Interior, whatever its edges' On labels say.

use std::collections::HashMap;

use tracing::debug;

use super::matrix::{IntersectionMatrix, FALSE as F};
use crate::cfg::RelateCfg;
use crate::error::RelateError;
use crate::geometry::Geometry;
use crate::graph::{locate, locate_non_puntal, GeometryGraph, NodeMap, Position};
use crate::intersect::SegmentIntersector;
use crate::kernel::{envelopes_intersect, CoordKey, Coordinate, Location};

/// DE-9IM matrix of `a` against `b` with default configuration.
pub fn relate(a: &Geometry, b: &Geometry) -> Result<IntersectionMatrix, RelateError> {
    relate_with_cfg(a, b, &RelateCfg::default())
}

pub fn relate_with_cfg(a: &Geometry, b: &Geometry, cfg: &RelateCfg) -> Result<IntersectionMatrix, RelateError> {
    check_size(a, b, cfg)?;
    let mut im = IntersectionMatrix::new();

    if !envelopes_intersect(a.envelope().as_ref(), b.envelope().as_ref()) {
        compute_disjoint_im(a, b, &mut im);
        debug!(a = %a.kind(), b = %b.kind(), %im, "relate (disjoint envelopes)");
        return Ok(im);
    }

    let mut ga = GeometryGraph::build(a, 0, cfg).map_err(|e| e.in_argument(0))?;
    let mut gb = GeometryGraph::build(b, 1, cfg).map_err(|e| e.in_argument(1))?;
    ga.compute_self_nodes().map_err(|e| e.in_argument(0))?;
    gb.compute_self_nodes().map_err(|e| e.in_argument(1))?;
    let si = ga.compute_edge_intersections(&mut gb, true, false)?;
    let (pieces_a, pieces_b) = (MergedPieces::of(&ga), MergedPieces::of(&gb));

    let mut nodes = NodeMap::new();
    compute_intersection_nodes(&ga, &mut nodes);
    compute_intersection_nodes(&gb, &mut nodes);
    copy_nodes_and_labels(&ga, &mut nodes);
    copy_nodes_and_labels(&gb, &mut nodes);
    resolve_merged_area_nodes(&ga, &pieces_a, &mut nodes);
    resolve_merged_area_nodes(&gb, &pieces_b, &mut nodes);
    label_isolated_nodes(&mut nodes, [&ga, &gb], cfg);

    if has_plain_proper_crossings(&ga) && has_plain_proper_crossings(&gb) {
        compute_proper_intersection_im(&si, a.dimension(), b.dimension(), &mut im);
    }
    update_im_from_edges([&ga, &gb], [&pieces_a, &pieces_b], cfg, &mut im);
    for n in nodes.iter() {
        im.set_at_least_if_valid(n.label.on_location(0), n.label.on_location(1), 0);
    }

    debug!(
        a = %a.kind(),
        b = %b.kind(),
        nodes = nodes.len(),
        proper = si.has_proper(),
        %im,
        "relate"
    );
    Ok(im)
}

/// Whether some segment of `a` properly crosses a segment of `b`.
///
/// Stops at the first proper crossing; no matrix is built.
pub fn has_proper_intersection(a: &Geometry, b: &Geometry) -> Result<bool, RelateError> {
    let cfg = RelateCfg::default();
    check_size(a, b, &cfg)?;
    if !envelopes_intersect(a.envelope().as_ref(), b.envelope().as_ref()) {
        return Ok(false);
    }
    let mut ga = GeometryGraph::build(a, 0, &cfg).map_err(|e| e.in_argument(0))?;
    let mut gb = GeometryGraph::build(b, 1, &cfg).map_err(|e| e.in_argument(1))?;
    let si = ga.compute_edge_intersections(&mut gb, false, true)?;
    Ok(si.has_proper())
}

fn check_size(a: &Geometry, b: &Geometry, cfg: &RelateCfg) -> Result<(), RelateError> {
    let coordinates = a.num_coordinates() + b.num_coordinates();
    if coordinates > cfg.max_coordinates {
        return Err(RelateError::ResourceLimit {
            coordinates,
            limit: cfg.max_coordinates,
        });
    }
    Ok(())
}

/// Each geometry meets only the other's exterior.
fn compute_disjoint_im(a: &Geometry, b: &Geometry, im: &mut IntersectionMatrix) {
    if !a.is_empty() {
        im.set(Location::Interior, Location::Exterior, a.dimension());
        im.set(Location::Boundary, Location::Exterior, a.boundary_dimension());
    }
    if !b.is_empty() {
        im.set(Location::Exterior, Location::Interior, b.dimension());
        im.set(Location::Exterior, Location::Boundary, b.boundary_dimension());
    }
}

/// Fold every recorded edge intersection into `nodes`, labeling only
/// positions not yet set.
fn compute_intersection_nodes(g: &GeometryGraph<'_>, nodes: &mut NodeMap) {
    let idx = g.arg_index();
    for e in g.edges() {
        let loc = match e.label.on_location(idx) {
            Some(Location::Boundary) => Location::Boundary,
            _ => Location::Interior,
        };
        for ei in e.intersections() {
            let n = nodes.add_node(ei.coord);
            let label = &mut nodes.node_mut(n).label;
            if label.is_null(idx) {
                label.set_location(idx, Position::On, loc);
            }
        }
    }
}

/// Graph nodes overwrite the label at their own argument index.
fn copy_nodes_and_labels(g: &GeometryGraph<'_>, nodes: &mut NodeMap) {
    let idx = g.arg_index();
    for n in g.nodes().iter() {
        let i = nodes.add_node(n.coord);
        if let Some(loc) = n.label.on_location(idx) {
            nodes.node_mut(i).label.set_location(idx, Position::On, loc);
        }
    }
}

/// Relabel Boundary nodes of `g` that only touch pieces lying inside the
/// union of its polygons.
fn resolve_merged_area_nodes(g: &GeometryGraph<'_>, merged: &MergedPieces, nodes: &mut NodeMap) {
    if !g.merges_areas() {
        return;
    }
    let idx = g.arg_index();
    let mut ends: HashMap<CoordKey, Location> = HashMap::new();
    for p in merged.pieces.iter().filter(|p| p.is_area()) {
        for c in [p.pts[0], p.pts[p.pts.len() - 1]] {
            let loc = ends.entry(c.key()).or_insert(Location::Interior);
            if p.on == Location::Boundary {
                *loc = Location::Boundary;
            }
        }
    }
    for n in nodes.iter_mut() {
        if n.label.on_location(idx) == Some(Location::Boundary)
            && ends.get(&n.coord.key()) == Some(&Location::Interior)
        {
            n.label.set_location(idx, Position::On, Location::Interior);
        }
    }
}

fn label_isolated_nodes(nodes: &mut NodeMap, graphs: [&GeometryGraph<'_>; 2], cfg: &RelateCfg) {
    for n in nodes.iter_mut() {
        if !n.is_isolated() {
            continue;
        }
        let target = if n.label.is_null(0) { 0 } else { 1 };
        let loc = locate(n.coord, graphs[target].geometry(), cfg.boundary_rule);
        n.label.set_all_locations(target, loc);
    }
}

/// Whether a proper crossing on an edge of `g` is known to separate its
/// interior from its exterior. Not so for collections (the crossing may be on
/// a lineal member) or for shared polygon edges.
fn has_plain_proper_crossings(g: &GeometryGraph<'_>) -> bool {
    !g.merges_areas() && !matches!(g.geometry(), Geometry::GeometryCollection(_))
}

const PROPER_AREA_AREA: [[i8; 3]; 3] = [[2, 1, 2], [1, 0, 1], [2, 1, 2]];
const PROPER_AREA_LINE: [[i8; 3]; 3] = [[F, F, F], [0, F, F], [F, F, 2]];
const PROPER_INTERIOR_AREA_LINE: [[i8; 3]; 3] = [[1, F, F], [F, F, F], [1, F, F]];
const PROPER_LINE_AREA: [[i8; 3]; 3] = [[F, 0, F], [F, F, F], [F, F, 2]];
const PROPER_INTERIOR_LINE_AREA: [[i8; 3]; 3] = [[1, F, 1], [F, F, F], [F, F, F]];
const PROPER_INTERIOR_LINE_LINE: [[i8; 3]; 3] = [[0, F, F], [F, F, F], [F, F, F]];

fn compute_proper_intersection_im(si: &SegmentIntersector, dim_a: i8, dim_b: i8, im: &mut IntersectionMatrix) {
    let proper = si.has_proper();
    let proper_interior = si.has_proper_interior();
    match (dim_a, dim_b) {
        (2, 2) => {
            if proper {
                im.set_at_least_cells(&PROPER_AREA_AREA);
            }
        }
        (2, 1) => {
            if proper {
                im.set_at_least_cells(&PROPER_AREA_LINE);
            }
            if proper_interior {
                im.set_at_least_cells(&PROPER_INTERIOR_AREA_LINE);
            }
        }
        (1, 2) => {
            if proper {
                im.set_at_least_cells(&PROPER_LINE_AREA);
            }
            if proper_interior {
                im.set_at_least_cells(&PROPER_INTERIOR_LINE_AREA);
            }
        }
        (1, 1) => {
            if proper_interior {
                im.set_at_least_cells(&PROPER_INTERIOR_LINE_LINE);
            }
        }
        _ => {}
    }
}

/// An edge piece merged over all edges of one geometry that trace it.
#[derive(Clone, Debug)]
struct Piece {
    /// Vertices in canonical direction.
    pts: Vec<Coordinate>,
    on: Location,
    left: Option<Location>,
    right: Option<Location>,
}

impl Piece {
    #[inline]
    fn is_area(&self) -> bool {
        self.left.is_some() || self.right.is_some()
    }

    /// A point of the piece away from its end nodes.
    fn interior_point(&self) -> Coordinate {
        let (a, b) = (self.pts[0], self.pts[1]);
        Coordinate::new(a.x + (b.x - a.x) / 2.0, a.y + (b.y - a.y) / 2.0)
    }
}

fn merge_side(acc: Option<Location>, next: Option<Location>) -> Option<Location> {
    match (acc, next) {
        (Some(Location::Interior), _) | (_, Some(Location::Interior)) => Some(Location::Interior),
        (None, x) => x,
        (x, _) => x,
    }
}

/// Edge pieces of one graph, merged by canonical vertex sequence.
struct MergedPieces {
    pieces: Vec<Piece>,
    index: HashMap<Vec<CoordKey>, usize>,
}

impl MergedPieces {
    /// Split every edge of `g` and merge identical pieces.
    fn of(g: &GeometryGraph<'_>) -> Self {
        let idx = g.arg_index();
        let mut pieces: Vec<Piece> = Vec::new();
        let mut index: HashMap<Vec<CoordKey>, usize> = HashMap::new();
        for e in g.edges() {
            let tl = *e.label.get(idx);
            for mut pts in e.split_pieces() {
                let fwd: Vec<CoordKey> = pts.iter().map(Coordinate::key).collect();
                let rev: Vec<CoordKey> = fwd.iter().rev().copied().collect();
                let (key, reversed) = if rev < fwd { (rev, true) } else { (fwd, false) };
                let mut side = tl;
                if reversed {
                    pts.reverse();
                    side.flip();
                }
                let (left, right) = (side.left, side.right);
                match index.get(&key) {
                    Some(&i) => {
                        let p = &mut pieces[i];
                        p.left = merge_side(p.left, left);
                        p.right = merge_side(p.right, right);
                    }
                    None => {
                        index.insert(key, pieces.len());
                        pieces.push(Piece {
                            pts,
                            on: Location::Interior,
                            left,
                            right,
                        });
                    }
                }
            }
        }
        for p in &mut pieces {
            let inside = p.left == Some(Location::Interior) && p.right == Some(Location::Interior);
            p.on = if p.is_area() && !inside {
                Location::Boundary
            } else {
                Location::Interior
            };
        }
        Self { pieces, index }
    }
}

/// Location of an unmatched piece against `other`.
fn locate_piece(p: &Piece, other: &Geometry, cfg: &RelateCfg) -> Location {
    locate_non_puntal(p.interior_point(), other, cfg.boundary_rule)
}

fn update_im_from_edges(
    graphs: [&GeometryGraph<'_>; 2],
    merged: [&MergedPieces; 2],
    cfg: &RelateCfg,
    im: &mut IntersectionMatrix,
) {
    let (geom_a, geom_b) = (graphs[0].geometry(), graphs[1].geometry());
    let [ma, mb] = merged;
    let ext = Location::Exterior;

    for (key, &ia) in &ma.index {
        let pa = &ma.pieces[ia];
        match mb.index.get(key) {
            Some(&ib) => {
                let pb = &mb.pieces[ib];
                im.set_at_least(pa.on, pb.on, 1);
                if pa.is_area() || pb.is_area() {
                    im.set_at_least(pa.left.unwrap_or(ext), pb.left.unwrap_or(ext), 2);
                    im.set_at_least(pa.right.unwrap_or(ext), pb.right.unwrap_or(ext), 2);
                }
            }
            None => {
                let loc = locate_piece(pa, geom_b, cfg);
                im.set_at_least(pa.on, loc, 1);
                let area_loc = if geom_b.dimension() == 2 { loc } else { ext };
                for side in [pa.left, pa.right].into_iter().flatten() {
                    im.set_at_least(side, area_loc, 2);
                }
            }
        }
    }
    for (key, &ib) in &mb.index {
        if ma.index.contains_key(key) {
            continue;
        }
        let pb = &mb.pieces[ib];
        let loc = locate_piece(pb, geom_a, cfg);
        im.set_at_least(loc, pb.on, 1);
        let area_loc = if geom_a.dimension() == 2 { loc } else { ext };
        for side in [pb.left, pb.right].into_iter().flatten() {
            im.set_at_least(area_loc, side, 2);
        }
    }
}
