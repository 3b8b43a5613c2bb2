use super::*;
use crate::cfg::{BoundaryNodeRule, RelateCfg};
use crate::error::RelateError;
use crate::geometry::{Geometry, Polygon};
use crate::kernel::{Coordinate, Location};

fn c(x: f64, y: f64) -> Coordinate {
    Coordinate::new(x, y)
}

fn ring(pts: &[(f64, f64)]) -> Vec<Coordinate> {
    pts.iter().map(|&(x, y)| c(x, y)).collect()
}

fn square(x0: f64, y0: f64, side: f64) -> Vec<Coordinate> {
    ring(&[(x0, y0), (x0 + side, y0), (x0 + side, y0 + side), (x0, y0 + side), (x0, y0)])
}

fn star(arms: usize) -> Geometry {
    let ends = [(1.0, 0.0), (0.0, 1.0), (-1.0, 0.0), (0.0, -1.0)];
    Geometry::MultiLineString(ends[..arms].iter().map(|&(x, y)| vec![c(0.0, 0.0), c(x, y)]).collect())
}

fn on_at(g: &GeometryGraph<'_>, x: f64, y: f64) -> Option<Location> {
    g.nodes().find(&c(x, y)).and_then(|n| n.label.on_location(g.arg_index()))
}

#[test]
fn point_graph_has_one_interior_node() {
    let geom = Geometry::Point(c(3.0, 4.0));
    let g = GeometryGraph::build(&geom, 1, &RelateCfg::default()).unwrap();
    assert!(g.edges().is_empty());
    assert_eq!(g.nodes().len(), 1);
    assert_eq!(on_at(&g, 3.0, 4.0), Some(Location::Interior));
    assert!(g.nodes().node(0).label.is_null(0));
}

#[test]
fn line_endpoints_are_boundary() {
    let geom = Geometry::LineString(vec![c(0.0, 0.0), c(1.0, 0.0), c(1.0, 0.0), c(2.0, 1.0)]);
    let g = GeometryGraph::build(&geom, 0, &RelateCfg::default()).unwrap();
    assert_eq!(g.edges().len(), 1);
    // Repeated point dropped.
    assert_eq!(g.edges()[0].num_points(), 3);
    assert_eq!(on_at(&g, 0.0, 0.0), Some(Location::Boundary));
    assert_eq!(on_at(&g, 2.0, 1.0), Some(Location::Boundary));
    assert!(g.is_boundary_node(&c(2.0, 1.0)));
    assert_eq!(g.boundary_nodes().len(), 2);
}

#[test]
fn closed_line_has_no_boundary() {
    let geom = Geometry::LineString(square(0.0, 0.0, 1.0));
    let g = GeometryGraph::build(&geom, 0, &RelateCfg::default()).unwrap();
    assert_eq!(on_at(&g, 0.0, 0.0), Some(Location::Interior));
    assert!(g.boundary_nodes().is_empty());
}

#[test]
fn mod2_counts_endpoint_touches() {
    let cfg = RelateCfg::default();
    let three = star(3);
    let g = GeometryGraph::build(&three, 0, &cfg).unwrap();
    assert_eq!(on_at(&g, 0.0, 0.0), Some(Location::Boundary));

    let four = star(4);
    let g = GeometryGraph::build(&four, 0, &cfg).unwrap();
    assert_eq!(on_at(&g, 0.0, 0.0), Some(Location::Interior));
    assert_eq!(on_at(&g, 0.0, -1.0), Some(Location::Boundary));

    let endpoint = RelateCfg {
        boundary_rule: BoundaryNodeRule::EndPoint,
        ..RelateCfg::default()
    };
    let g = GeometryGraph::build(&four, 0, &endpoint).unwrap();
    assert_eq!(on_at(&g, 0.0, 0.0), Some(Location::Boundary));
}

#[test]
fn figure_eight_gets_one_crossing_node() {
    let geom = Geometry::LineString(ring(&[(0.0, 0.0), (2.0, 2.0), (2.0, 0.0), (0.0, 2.0)]));
    let mut g = GeometryGraph::build(&geom, 0, &RelateCfg::default()).unwrap();
    assert_eq!(g.nodes().len(), 2);

    let si = g.compute_self_nodes().unwrap();
    assert!(si.has_proper());
    assert_eq!(si.proper_point(), Some(c(1.0, 1.0)));
    assert_eq!(g.nodes().len(), 3);
    assert_eq!(on_at(&g, 1.0, 1.0), Some(Location::Interior));

    let edge = &g.edges()[0];
    assert!(!edge.is_isolated());
    let segs: Vec<usize> = edge.intersections().map(|ei| ei.seg).collect();
    assert_eq!(segs, vec![0, 2]);
    assert!(edge.intersections().all(|ei| ei.coord.equals_2d(&c(1.0, 1.0))));
}

#[test]
fn simple_polygon_has_no_self_nodes() {
    let geom = Geometry::Polygon(Polygon::new(square(0.0, 0.0, 4.0), vec![square(1.0, 1.0, 1.0)]));
    let mut g = GeometryGraph::build(&geom, 0, &RelateCfg::default()).unwrap();
    let si = g.compute_self_nodes().unwrap();
    assert!(!si.has_intersection());
    assert_eq!(g.nodes().len(), 2);
    assert!(g.edges().iter().all(|e| e.intersections().next().is_none()));
}

#[test]
fn polygon_ring_labels_follow_orientation() {
    let ccw = square(0.0, 0.0, 4.0);
    let mut hole = square(1.0, 1.0, 1.0);
    hole.reverse();
    let geom = Geometry::Polygon(Polygon::new(ccw, vec![hole]));
    let g = GeometryGraph::build(&geom, 0, &RelateCfg::default()).unwrap();
    assert_eq!(g.edges().len(), 2);

    let shell = g.edges()[0].label;
    assert_eq!(shell.location(0, Position::On), Some(Location::Boundary));
    assert_eq!(shell.location(0, Position::Left), Some(Location::Interior));
    assert_eq!(shell.location(0, Position::Right), Some(Location::Exterior));

    // Clockwise hole: polygon interior on its left.
    let hole = g.edges()[1].label;
    assert_eq!(hole.location(0, Position::Left), Some(Location::Interior));
    assert_eq!(hole.location(0, Position::Right), Some(Location::Exterior));

    let mut cw = square(0.0, 0.0, 4.0);
    cw.reverse();
    let geom = Geometry::Polygon(Polygon::new(cw, Vec::new()));
    let g = GeometryGraph::build(&geom, 1, &RelateCfg::default()).unwrap();
    let shell = g.edges()[0].label;
    assert_eq!(shell.location(1, Position::Left), Some(Location::Exterior));
    assert_eq!(shell.location(1, Position::Right), Some(Location::Interior));
    assert!(shell.is_null(0));
    assert_eq!(on_at(&g, 0.0, 0.0), Some(Location::Boundary));
}

#[test]
fn invalid_components_are_rejected() {
    let cfg = RelateCfg::default();
    let cases = [
        Geometry::LineString(vec![c(1.0, 1.0), c(1.0, 1.0)]),
        Geometry::Polygon(Polygon::new(ring(&[(0.0, 0.0), (1.0, 0.0), (0.0, 0.0)]), Vec::new())),
        Geometry::Polygon(Polygon::new(
            ring(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]),
            Vec::new(),
        )),
        Geometry::Point(c(f64::NAN, 0.0)),
        Geometry::LineString(vec![c(0.0, 0.0), c(f64::INFINITY, 1.0)]),
    ];
    for geom in &cases {
        let err = GeometryGraph::build(geom, 0, &cfg).unwrap_err();
        assert!(matches!(err, RelateError::Validation { .. }), "{geom:?}: {err}");
    }
}

#[test]
fn empty_components_are_skipped() {
    let geom = Geometry::GeometryCollection(vec![
        Geometry::LineString(Vec::new()),
        Geometry::Polygon(Polygon::default()),
        Geometry::Point(c(1.0, 1.0)),
    ]);
    let g = GeometryGraph::build(&geom, 0, &RelateCfg::default()).unwrap();
    assert!(g.edges().is_empty());
    assert_eq!(g.nodes().len(), 1);
}

#[test]
fn line_crossing_square_records_proper_point_in_both() {
    let line = Geometry::LineString(vec![c(-2.0, 1.0), c(2.0, 3.0)]);
    let poly = Geometry::Polygon(Polygon::new(square(0.0, 0.0, 4.0), Vec::new()));
    let cfg = RelateCfg::default();
    let mut ga = GeometryGraph::build(&line, 0, &cfg).unwrap();
    let mut gb = GeometryGraph::build(&poly, 1, &cfg).unwrap();
    let si = ga.compute_edge_intersections(&mut gb, true, false).unwrap();

    assert!(si.has_proper());
    assert!(si.has_proper_interior());
    let crossing = c(0.0, 2.0);
    assert_eq!(si.proper_point(), Some(crossing));
    for g in [&ga, &gb] {
        let e = &g.edges()[0];
        assert!(!e.is_isolated());
        let hits: Vec<_> = e.intersections().collect();
        assert_eq!(hits.len(), 1);
        assert!(hits[0].coord.equals_2d(&crossing));
        assert!(hits[0].dist > 0.0);
        assert!(!e.coords().iter().any(|v| v.equals_2d(&crossing)));
    }
}

#[test]
fn proper_point_on_boundary_node_is_not_interior() {
    // A second line of `a` ends exactly on the crossing.
    let a = Geometry::MultiLineString(vec![vec![c(0.0, 0.0), c(2.0, 2.0)], vec![c(1.0, 1.0), c(1.0, 3.0)]]);
    let b = Geometry::LineString(vec![c(0.0, 2.0), c(2.0, 0.0)]);
    let cfg = RelateCfg::default();
    let mut ga = GeometryGraph::build(&a, 0, &cfg).unwrap();
    let mut gb = GeometryGraph::build(&b, 1, &cfg).unwrap();
    let si = ga.compute_edge_intersections(&mut gb, true, false).unwrap();
    assert!(si.has_proper());
    assert_eq!(si.proper_point(), Some(c(1.0, 1.0)));
    assert!(ga.is_boundary_node(&c(1.0, 1.0)));
    assert!(!si.has_proper_interior());
}

#[test]
fn stop_on_first_proper_ends_early() {
    let a = Geometry::LineString((0..20).map(|i| c(i as f64, if i % 2 == 0 { -1.0 } else { 1.0 })).collect());
    let b = Geometry::LineString(vec![c(-1.0, 0.0), c(20.0, 0.0)]);
    let cfg = RelateCfg::default();
    let mut ga = GeometryGraph::build(&a, 0, &cfg).unwrap();
    let mut gb = GeometryGraph::build(&b, 1, &cfg).unwrap();
    let si = ga.compute_edge_intersections(&mut gb, false, true).unwrap();
    assert!(si.has_proper());
    assert_eq!(si.num_intersections(), 1);
    // Detection only: nothing recorded.
    assert!(ga.edges()[0].intersections().next().is_none());
}

#[test]
fn edge_intersection_normalizes_onto_next_segment() {
    let mut e = Edge::new(ring(&[(0.0, 0.0), (4.0, 0.0), (4.0, 4.0)]), Label::on(0, Location::Interior));
    e.add_intersection(c(4.0, 0.0), 0);
    e.add_intersection(c(4.0, 0.0), 1);
    let all: Vec<_> = e.intersections().copied().collect();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].seg, 1);
    assert_eq!(all[0].dist, 0.0);
}

#[test]
fn split_pieces_cuts_at_intersections() {
    let mut e = Edge::new(ring(&[(0.0, 0.0), (4.0, 0.0), (4.0, 4.0)]), Label::on(0, Location::Interior));
    assert_eq!(e.split_pieces(), vec![e.coords().to_vec()]);

    e.add_intersection(c(4.0, 0.0), 0);
    e.add_intersection(c(2.0, 0.0), 0);
    e.add_intersection(c(4.0, 1.0), 1);
    let pieces = e.split_pieces();
    assert_eq!(
        pieces,
        vec![
            ring(&[(0.0, 0.0), (2.0, 0.0)]),
            ring(&[(2.0, 0.0), (4.0, 0.0)]),
            ring(&[(4.0, 0.0), (4.0, 1.0)]),
            ring(&[(4.0, 1.0), (4.0, 4.0)]),
        ]
    );
}

#[test]
fn split_pieces_keep_interior_vertices() {
    let mut e = Edge::new(square(0.0, 0.0, 2.0), Label::on(0, Location::Interior));
    e.add_intersection(c(2.0, 1.0), 1);
    let pieces = e.split_pieces();
    assert_eq!(pieces.len(), 2);
    assert_eq!(pieces[0], ring(&[(0.0, 0.0), (2.0, 0.0), (2.0, 1.0)]));
    assert_eq!(pieces[1], ring(&[(2.0, 1.0), (2.0, 2.0), (0.0, 2.0), (0.0, 0.0)]));
}

#[test]
fn labels_and_node_map() {
    let mut tl = TopologyLocation::area(Location::Boundary, Location::Interior, Location::Exterior);
    assert!(tl.is_area());
    tl.flip();
    assert_eq!(tl.get(Position::Left), Some(Location::Exterior));
    assert_eq!(tl.get(Position::Right), Some(Location::Interior));
    assert!(!TopologyLocation::line(Location::Interior).is_area());

    let mut l = Label::on(1, Location::Boundary);
    assert!(l.is_null(0));
    assert_eq!(l.geometry_count(), 1);
    l.set_all_locations(0, Location::Exterior);
    assert_eq!(l.location(0, Position::Right), Some(Location::Exterior));
    assert_eq!(l.geometry_count(), 2);

    let mut nodes = NodeMap::new();
    assert!(nodes.is_empty());
    let a = nodes.add_node(c(0.0, 0.0));
    let b = nodes.add_node(c(-0.0, 0.0));
    let d = nodes.add_node(c(1.0, 0.0));
    assert_eq!(a, b);
    assert_ne!(a, d);
    assert_eq!(nodes.len(), 2);
    nodes.node_mut(d).label.set_location(0, Position::On, Location::Interior);
    assert!(nodes.node(d).is_isolated());
    assert!(!nodes.node(a).is_isolated());
    assert!(nodes.find(&c(5.0, 5.0)).is_none());
}

#[test]
fn locate_in_polygon_with_hole() {
    let poly = Geometry::Polygon(Polygon::new(square(0.0, 0.0, 10.0), vec![square(4.0, 4.0, 2.0)]));
    let rule = BoundaryNodeRule::Mod2;
    assert_eq!(locate(c(1.0, 1.0), &poly, rule), Location::Interior);
    assert_eq!(locate(c(5.0, 5.0), &poly, rule), Location::Exterior);
    assert_eq!(locate(c(4.0, 5.0), &poly, rule), Location::Boundary);
    assert_eq!(locate(c(0.0, 5.0), &poly, rule), Location::Boundary);
    assert_eq!(locate(c(10.0, 10.0), &poly, rule), Location::Boundary);
    assert_eq!(locate(c(11.0, 5.0), &poly, rule), Location::Exterior);
}

#[test]
fn locate_on_lines_and_points() {
    let rule = BoundaryNodeRule::Mod2;
    let line = Geometry::LineString(ring(&[(0.0, 0.0), (2.0, 0.0), (2.0, 2.0)]));
    assert_eq!(locate(c(0.0, 0.0), &line, rule), Location::Boundary);
    assert_eq!(locate(c(2.0, 1.0), &line, rule), Location::Interior);
    assert_eq!(locate(c(2.0, 0.0), &line, rule), Location::Interior);
    assert_eq!(locate(c(1.0, 1.0), &line, rule), Location::Exterior);

    let closed = Geometry::LineString(square(0.0, 0.0, 1.0));
    assert_eq!(locate(c(0.0, 0.0), &closed, rule), Location::Interior);

    // Two endpoints meet at the origin.
    let two = star(2);
    assert_eq!(locate(c(0.0, 0.0), &two, rule), Location::Interior);
    assert_eq!(locate(c(0.0, 0.0), &two, BoundaryNodeRule::EndPoint), Location::Boundary);
    assert_eq!(locate(c(0.0, 1.0), &two, rule), Location::Boundary);

    let pt = Geometry::MultiPoint(vec![c(1.0, 1.0), c(2.0, 2.0)]);
    assert_eq!(locate(c(2.0, 2.0), &pt, rule), Location::Interior);
    assert_eq!(locate(c(1.5, 1.5), &pt, rule), Location::Exterior);
    assert_eq!(locate(c(0.0, 0.0), &Geometry::GeometryCollection(Vec::new()), rule), Location::Exterior);
}

#[test]
fn locate_shared_multipolygon_edge_is_interior() {
    let mp = Geometry::MultiPolygon(vec![
        Polygon::new(square(0.0, 0.0, 1.0), Vec::new()),
        Polygon::new(square(1.0, 0.0, 1.0), Vec::new()),
    ]);
    let rule = BoundaryNodeRule::Mod2;
    assert_eq!(locate(c(1.0, 0.5), &mp, rule), Location::Interior);
    assert_eq!(locate(c(0.0, 0.5), &mp, rule), Location::Boundary);
    assert_eq!(locate(c(1.5, 0.5), &mp, rule), Location::Interior);
}

#[test]
fn locate_non_puntal_ignores_point_members() {
    let rule = BoundaryNodeRule::Mod2;
    let gc = Geometry::GeometryCollection(vec![
        Geometry::Point(c(0.0, 0.0)),
        Geometry::LineString(ring(&[(0.0, 1.0), (2.0, 1.0)])),
    ]);
    assert_eq!(locate(c(0.0, 0.0), &gc, rule), Location::Interior);
    assert_eq!(locate_non_puntal(c(0.0, 0.0), &gc, rule), Location::Exterior);
    assert_eq!(locate_non_puntal(c(1.0, 1.0), &gc, rule), Location::Interior);
    assert_eq!(locate_non_puntal(c(0.0, 1.0), &gc, rule), Location::Boundary);
    assert_eq!(
        locate_non_puntal(c(3.0, 3.0), &Geometry::Point(c(3.0, 3.0)), rule),
        Location::Exterior
    );
}

#[test]
fn several_polygons_merge_areas() {
    let cfg = RelateCfg::default();
    let one = Geometry::Polygon(Polygon::new(square(0.0, 0.0, 1.0), Vec::new()));
    let two = vec![
        Geometry::Polygon(Polygon::new(square(0.0, 0.0, 1.0), Vec::new())),
        Geometry::Polygon(Polygon::new(square(1.0, 0.0, 1.0), Vec::new())),
    ];
    let mp = Geometry::MultiPolygon(vec![
        Polygon::new(square(0.0, 0.0, 1.0), Vec::new()),
        Polygon::new(square(1.0, 0.0, 1.0), Vec::new()),
    ]);
    let gc = Geometry::GeometryCollection(two);

    assert!(!GeometryGraph::build(&one, 0, &cfg).unwrap().merges_areas());
    assert!(GeometryGraph::build(&mp, 0, &cfg).unwrap().merges_areas());

    let mut g = GeometryGraph::build(&gc, 0, &cfg).unwrap();
    assert!(g.merges_areas());
    g.compute_self_nodes().unwrap();
    assert_eq!(on_at(&g, 1.0, 1.0), Some(Location::Boundary));
}

#[test]
fn ring_location_and_segment_tests() {
    let sq = square(0.0, 0.0, 2.0);
    assert_eq!(locate_point_in_ring(c(1.0, 1.0), &sq), Location::Interior);
    assert_eq!(locate_point_in_ring(c(2.0, 2.0), &sq), Location::Boundary);
    assert_eq!(locate_point_in_ring(c(1.0, 0.0), &sq), Location::Boundary);
    assert_eq!(locate_point_in_ring(c(3.0, 1.0), &sq), Location::Exterior);
    // Ray passes through a vertex.
    let diamond = ring(&[(0.0, -1.0), (1.0, 0.0), (0.0, 1.0), (-1.0, 0.0), (0.0, -1.0)]);
    assert_eq!(locate_point_in_ring(c(-0.5, 0.0), &diamond), Location::Interior);
    assert_eq!(locate_point_in_ring(c(-2.0, 0.0), &diamond), Location::Exterior);

    assert!(is_on_segment(c(1.0, 1.0), c(0.0, 0.0), c(3.0, 3.0)));
    assert!(!is_on_segment(c(4.0, 4.0), c(0.0, 0.0), c(3.0, 3.0)));
    assert!(is_on_line(c(1.0, 1.0), &[c(1.0, 1.0)]));
}
