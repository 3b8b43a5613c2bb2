//! Random test geometries (radial jitter + replay tokens).
//!
//! Model
//! - Polygons: `n` sorted angles on [0, 2π) with bounded angular and radial
//!   jitter, joined in angle order. The result is star-shaped around its
//!   centre, hence simple.
//! - Lines: `n` uniform points in a square, joined in draw order (self
//!   crossings are expected).
//! - Multipolygons: distinct cells of a 3×3 grid, so parts share edges and
//!   corners.
//! - Optional grid snapping produces shared vertices and collinear overlaps
//!   between independent draws.
//! - Determinism uses a replay token `(seed, index)` mixed into a single RNG.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::geometry::{Geometry, Polygon};
use crate::kernel::{remove_repeated_points, Coordinate};

/// Vertex count distribution.
#[derive(Clone, Copy, Debug)]
pub enum VertexCount {
    Fixed(usize),
    Uniform { min: usize, max: usize },
}

impl VertexCount {
    fn sample<R: Rng>(&self, rng: &mut R, floor: usize) -> usize {
        match *self {
            VertexCount::Fixed(n) => n.max(floor),
            VertexCount::Uniform { min, max } => {
                let lo = min.max(floor);
                let hi = max.max(lo);
                rng.gen_range(lo..=hi)
            }
        }
    }
}

/// Radial-jitter sampler configuration.
#[derive(Clone, Copy, Debug)]
pub struct RadialCfg {
    pub vertex_count: VertexCount,
    /// Angular jitter as a fraction of the base spacing Δ=2π/n. Clamped to [0, 0.49].
    pub angle_jitter_frac: f64,
    /// Radii are `base_radius * (1 + u)` with `u ∈ [-radial_jitter, radial_jitter]`.
    pub radial_jitter: f64,
    pub base_radius: f64,
    pub centre: Coordinate,
    pub random_phase: bool,
    /// Round coordinates to multiples of this step when > 0.
    pub grid: f64,
}

impl Default for RadialCfg {
    fn default() -> Self {
        Self {
            vertex_count: VertexCount::Fixed(12),
            angle_jitter_frac: 0.3,
            radial_jitter: 0.25,
            base_radius: 1.0,
            centre: Coordinate::new(0.0, 0.0),
            random_phase: true,
            grid: 0.0,
        }
    }
}

/// Replay token to make draws reproducible and indexable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReplayToken {
    pub seed: u64,
    pub index: u64,
}

impl ReplayToken {
    #[inline]
    fn to_std_rng(self) -> StdRng {
        // SplitMix64 finalizer.
        fn mix(mut x: u64) -> u64 {
            x ^= x >> 30;
            x = x.wrapping_mul(0xbf58476d1ce4e5b9);
            x ^= x >> 27;
            x = x.wrapping_mul(0x94d049bb133111eb);
            x ^ (x >> 31)
        }
        let k = mix(self.seed ^ mix(self.index.wrapping_add(0x9e3779b97f4a7c15)));
        StdRng::seed_from_u64(k)
    }
}

fn snap(c: Coordinate, grid: f64) -> Coordinate {
    if grid > 0.0 {
        Coordinate::new((c.x / grid).round() * grid, (c.y / grid).round() * grid)
    } else {
        c
    }
}

/// Draw a star-shaped polygon. `None` if grid snapping collapsed the ring.
pub fn draw_polygon_radial(cfg: RadialCfg, tok: ReplayToken) -> Option<Polygon> {
    let mut rng = tok.to_std_rng();
    let n = cfg.vertex_count.sample(&mut rng, 3);
    let aj = cfg.angle_jitter_frac.clamp(0.0, 0.49);
    let rj = cfg.radial_jitter.clamp(0.0, 0.95);
    let r0 = cfg.base_radius.max(1e-9);
    let delta = std::f64::consts::TAU / (n as f64);
    let phase = if cfg.random_phase {
        rng.gen::<f64>() * std::f64::consts::TAU
    } else {
        0.0
    };
    let mut angles: Vec<f64> = (0..n)
        .map(|k| {
            let jitter = (rng.gen::<f64>() * 2.0 - 1.0) * aj * delta;
            (k as f64) * delta + jitter
        })
        .collect();
    angles.sort_by(f64::total_cmp);
    let mut ring: Vec<Coordinate> = angles
        .into_iter()
        .map(|th| {
            let u = (rng.gen::<f64>() * 2.0 - 1.0) * rj;
            let r = (1.0 + u) * r0;
            let th = th + phase;
            snap(
                Coordinate::new(cfg.centre.x + th.cos() * r, cfg.centre.y + th.sin() * r),
                cfg.grid,
            )
        })
        .collect();
    ring.push(ring[0]);
    let ring = remove_repeated_points(&ring);
    if ring.len() < 4 {
        return None;
    }
    Some(Polygon::new(ring, Vec::new()))
}

/// Draw a polyline with vertices uniform in `[centre ± half_extent]²`.
/// `None` if grid snapping left fewer than two distinct points.
pub fn draw_line_string(
    vertex_count: VertexCount,
    centre: Coordinate,
    half_extent: f64,
    grid: f64,
    tok: ReplayToken,
) -> Option<Vec<Coordinate>> {
    let mut rng = tok.to_std_rng();
    let n = vertex_count.sample(&mut rng, 2);
    let pts: Vec<Coordinate> = (0..n)
        .map(|_| {
            let x = centre.x + (rng.gen::<f64>() * 2.0 - 1.0) * half_extent;
            let y = centre.y + (rng.gen::<f64>() * 2.0 - 1.0) * half_extent;
            snap(Coordinate::new(x, y), grid)
        })
        .collect();
    let pts = remove_repeated_points(&pts);
    (pts.len() >= 2).then_some(pts)
}

/// Draw 2 to 5 distinct cells of a 3×3 grid of side `base_radius`
/// centred on `centre`.
pub fn draw_cell_multipolygon(cfg: RadialCfg, tok: ReplayToken) -> Geometry {
    let mut rng = tok.to_std_rng();
    let s = cfg.base_radius;
    let xs: Vec<f64> = (0..4).map(|i| cfg.centre.x + (i as f64 - 1.5) * s).collect();
    let ys: Vec<f64> = (0..4).map(|i| cfg.centre.y + (i as f64 - 1.5) * s).collect();
    let corner = |i: usize, j: usize| snap(Coordinate::new(xs[i], ys[j]), cfg.grid);
    let k = rng.gen_range(2..=5);
    let cells = rand::seq::index::sample(&mut rng, 9, k);
    let polys = cells
        .into_iter()
        .map(|cell| {
            let (i, j) = (cell % 3, cell / 3);
            let shell = vec![
                corner(i, j),
                corner(i + 1, j),
                corner(i + 1, j + 1),
                corner(i, j + 1),
                corner(i, j),
            ];
            Polygon::new(shell, Vec::new())
        })
        .collect();
    Geometry::MultiPolygon(polys)
}

/// Draw a geometry by kind: 0 point, 1 line, 2 polygon, 3 grid-cell
/// multipolygon, anything else a collection of one point, line and polygon.
pub fn draw_geometry(kind: u8, cfg: RadialCfg, tok: ReplayToken) -> Option<Geometry> {
    match kind {
        0 => {
            let mut rng = tok.to_std_rng();
            let r = cfg.base_radius;
            let p = Coordinate::new(
                cfg.centre.x + (rng.gen::<f64>() * 2.0 - 1.0) * r,
                cfg.centre.y + (rng.gen::<f64>() * 2.0 - 1.0) * r,
            );
            Some(Geometry::Point(snap(p, cfg.grid)))
        }
        1 => draw_line_string(cfg.vertex_count, cfg.centre, cfg.base_radius, cfg.grid, tok)
            .map(Geometry::LineString),
        2 => draw_polygon_radial(cfg, tok).map(Geometry::Polygon),
        3 => Some(draw_cell_multipolygon(cfg, tok)),
        _ => {
            let members: Vec<Geometry> = (0..3u8)
                .filter_map(|k| {
                    let member_tok = ReplayToken {
                        seed: tok.seed ^ (u64::from(k) + 1),
                        index: tok.index,
                    };
                    draw_geometry(k, cfg, member_tok)
                })
                .collect();
            Some(Geometry::GeometryCollection(members))
        }
    }
}
