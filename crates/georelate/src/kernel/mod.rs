//! Coordinate kernel: coordinates, envelopes, and exact orientation.
//!
//! - `orientation_index` never lies about a sign; everything that classifies
//!   (collinearity, ring orientation, disjointness) goes through it.
//! - `distance_point_to_segment` is plain floating point and only used as a
//!   last-resort heuristic.

mod coordinate;
mod envelope;
mod orientation;

pub use coordinate::{CoordKey, Coordinate, Location};
pub use envelope::{envelopes_intersect, Envelope};
pub use orientation::{
    distance_point_to_segment, is_ccw, orientation_index, CLOCKWISE, COLLINEAR, COUNTER_CLOCKWISE,
};
#[cfg(test)]
pub(crate) use orientation::{orientation_index_exact, orientation_index_filter};

/// Remove consecutive 2D-duplicate coordinates.
pub fn remove_repeated_points(pts: &[Coordinate]) -> Vec<Coordinate> {
    let mut out: Vec<Coordinate> = Vec::with_capacity(pts.len());
    for p in pts {
        if out.last().map_or(true, |q| !q.equals_2d(p)) {
            out.push(*p);
        }
    }
    out
}
