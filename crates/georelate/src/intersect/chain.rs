//! Compass quadrants and monotone-chain decomposition.

use crate::error::RelateError;
use crate::kernel::{Coordinate, Envelope};

/// Quadrant of a direction vector. A zero delta counts as non-negative, so
/// north and east are NE, west is NW, south is SE.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Quadrant {
    NE,
    NW,
    SW,
    SE,
}

impl Quadrant {
    pub fn of_delta(dx: f64, dy: f64) -> Result<Quadrant, RelateError> {
        if dx == 0.0 && dy == 0.0 {
            return Err(RelateError::validation(
                "cannot compute the quadrant of a zero-length segment",
            ));
        }
        Ok(match (dx >= 0.0, dy >= 0.0) {
            (true, true) => Quadrant::NE,
            (true, false) => Quadrant::SE,
            (false, true) => Quadrant::NW,
            (false, false) => Quadrant::SW,
        })
    }

    #[inline]
    pub fn of_segment(p0: Coordinate, p1: Coordinate) -> Result<Quadrant, RelateError> {
        Self::of_delta(p1.x - p0.x, p1.y - p0.y)
    }
}

/// Breakpoints splitting an edge's coordinates into monotone chains.
///
/// `starts` holds the first index of every chain plus the last coordinate
/// index as sentinel, so chain `i` spans `starts[i]..=starts[i + 1]`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MonotoneChainEdge {
    starts: Vec<usize>,
}

impl MonotoneChainEdge {
    /// Decompose `pts` (at least two points, no zero-length segments).
    pub fn build(pts: &[Coordinate]) -> Result<Self, RelateError> {
        if pts.len() < 2 {
            return Err(RelateError::validation(format!(
                "monotone chains need at least 2 points, got {}",
                pts.len()
            )));
        }
        let mut starts = vec![0];
        let mut start = 0;
        while start < pts.len() - 1 {
            let last = find_chain_end(pts, start)?;
            starts.push(last);
            start = last;
        }
        Ok(Self { starts })
    }

    #[inline]
    pub fn start_indices(&self) -> &[usize] {
        &self.starts
    }

    #[inline]
    pub fn chain_count(&self) -> usize {
        self.starts.len() - 1
    }

    /// Coordinate index range `(start, end)` of chain `i`.
    #[inline]
    pub fn chain_range(&self, i: usize) -> (usize, usize) {
        (self.starts[i], self.starts[i + 1])
    }

    /// Chain ranges in order.
    pub fn ranges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.starts.windows(2).map(|w| (w[0], w[1]))
    }
}

/// Index of the last coordinate of the chain starting at `start`.
fn find_chain_end(pts: &[Coordinate], start: usize) -> Result<usize, RelateError> {
    let chain_quad = Quadrant::of_segment(pts[start], pts[start + 1])?;
    let mut last = start + 1;
    while last < pts.len() - 1 {
        if Quadrant::of_segment(pts[last], pts[last + 1])? != chain_quad {
            break;
        }
        last += 1;
    }
    Ok(last)
}

/// Envelope of the monotone run `pts[start..=end]`, read off its endpoints.
#[inline]
pub fn run_envelope(pts: &[Coordinate], start: usize, end: usize) -> Envelope {
    Envelope::new(pts[start], pts[end])
}
