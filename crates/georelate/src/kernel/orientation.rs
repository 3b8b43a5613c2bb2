//! Robust orientation predicate, ring orientation, and point/segment distance.
//!
//! The orientation test is a floating-point filter backed by an exact
//! evaluation over big integers. Every f64 is a dyadic rational
//! `m · 2^e`, so after shifting all inputs to a common exponent the 2×2
//! determinant is an integer expression with the same sign.

use num_bigint::{BigInt, Sign};

use super::Coordinate;
use crate::cfg::DP_SAFE_EPSILON;
use crate::error::RelateError;

pub const CLOCKWISE: i8 = -1;
pub const COLLINEAR: i8 = 0;
pub const COUNTER_CLOCKWISE: i8 = 1;

/// Products below this magnitude skip the filter.
const UNDERFLOW_GUARD: f64 = 1e-290;

/// Side of `q` relative to the directed line `p1 → p2`:
/// `+1` counter-clockwise, `-1` clockwise, `0` collinear.
///
/// Non-finite inputs report collinear.
pub fn orientation_index(p1: Coordinate, p2: Coordinate, q: Coordinate) -> i8 {
    if let Some(s) = orientation_index_filter(p1, p2, q) {
        return s;
    }
    if !(p1.is_finite() && p2.is_finite() && q.is_finite()) {
        return COLLINEAR;
    }
    orientation_index_exact(p1, p2, q)
}

/// Fast path. `None` when the determinant is within the rounding error bound.
pub(crate) fn orientation_index_filter(p1: Coordinate, p2: Coordinate, q: Coordinate) -> Option<i8> {
    let (a, b) = (p1.x - q.x, p2.y - q.y);
    let (c, d) = (p1.y - q.y, p2.x - q.x);
    let detleft = a * b;
    let detright = c * d;
    // Differences of finite doubles are zero only when exact; products may underflow.
    if (detleft.abs() < UNDERFLOW_GUARD && a != 0.0 && b != 0.0)
        || (detright.abs() < UNDERFLOW_GUARD && c != 0.0 && d != 0.0)
    {
        return None;
    }
    let det = detleft - detright;

    let detsum = if detleft > 0.0 {
        if detright <= 0.0 {
            return Some(signum(det));
        }
        detleft + detright
    } else if detleft < 0.0 {
        if detright >= 0.0 {
            return Some(signum(det));
        }
        -detleft - detright
    } else {
        return Some(signum(det));
    };

    let errbound = DP_SAFE_EPSILON * detsum;
    if det >= errbound || -det >= errbound {
        return Some(signum(det));
    }
    None
}

/// Exact sign of `(p1 - q) × (p2 - q)`; inputs must be finite.
pub(crate) fn orientation_index_exact(p1: Coordinate, p2: Coordinate, q: Coordinate) -> i8 {
    let parts = [p1.x, p1.y, p2.x, p2.y, q.x, q.y].map(decompose);
    let e0 = parts
        .iter()
        .filter(|(m, _)| *m != 0)
        .map(|(_, e)| *e)
        .min()
        .unwrap_or(0);
    let [p1x, p1y, p2x, p2y, qx, qy] = parts.map(|(m, e)| {
        let v = BigInt::from(m);
        if m == 0 {
            v
        } else {
            v << ((e - e0) as usize)
        }
    });
    let det = (&p1x - &qx) * (&p2y - &qy) - (&p1y - &qy) * (&p2x - &qx);
    match det.sign() {
        Sign::Plus => COUNTER_CLOCKWISE,
        Sign::Minus => CLOCKWISE,
        Sign::NoSign => COLLINEAR,
    }
}

/// Split a finite f64 into `(signed mantissa, exponent)` with `v = m · 2^e`.
fn decompose(v: f64) -> (i64, i32) {
    if v == 0.0 {
        return (0, 0);
    }
    let bits = v.to_bits();
    let negative = bits >> 63 == 1;
    let exp_bits = ((bits >> 52) & 0x7ff) as i32;
    let frac = (bits & ((1u64 << 52) - 1)) as i64;
    let (m, e) = if exp_bits == 0 {
        (frac, -1074)
    } else {
        (frac | (1i64 << 52), exp_bits - 1075)
    };
    (if negative { -m } else { m }, e)
}

#[inline]
fn signum(x: f64) -> i8 {
    if x > 0.0 {
        COUNTER_CLOCKWISE
    } else if x < 0.0 {
        CLOCKWISE
    } else {
        COLLINEAR
    }
}

/// Whether a closed ring is oriented counter-clockwise.
///
/// Degenerate rings (flat around the highest vertex) report `false`.
pub fn is_ccw(ring: &[Coordinate]) -> Result<bool, RelateError> {
    if ring.len() < 4 {
        return Err(RelateError::validation("ring must have at least 3 points"));
    }
    let n_pts = ring.len() - 1;
    if !ring[0].equals_2d(&ring[n_pts]) {
        return Err(RelateError::validation("ring must be closed"));
    }

    let mut hi_index = 0;
    for (i, p) in ring.iter().enumerate().take(n_pts + 1).skip(1) {
        if p.y > ring[hi_index].y {
            hi_index = i;
        }
    }
    let hi = ring[hi_index];

    let mut i_prev = hi_index;
    loop {
        i_prev = if i_prev == 0 { n_pts } else { i_prev - 1 };
        if !ring[i_prev].equals_2d(&hi) || i_prev == hi_index {
            break;
        }
    }
    let mut i_next = hi_index;
    loop {
        i_next = (i_next + 1) % n_pts;
        if !ring[i_next].equals_2d(&hi) || i_next == hi_index {
            break;
        }
    }
    let prev = ring[i_prev];
    let next = ring[i_next];

    if prev.equals_2d(&hi) || next.equals_2d(&hi) || prev.equals_2d(&next) {
        return Ok(false);
    }
    let disc = orientation_index(prev, hi, next);
    Ok(if disc == COLLINEAR {
        prev.x > next.x
    } else {
        disc > 0
    })
}

/// Euclidean distance from `p` to segment `ab` (plain floating point).
pub fn distance_point_to_segment(p: Coordinate, a: Coordinate, b: Coordinate) -> f64 {
    if a.equals_2d(&b) {
        return p.distance(&a);
    }
    let ab = b.vec2() - a.vec2();
    let ap = p.vec2() - a.vec2();
    let len2 = ab.norm_squared();
    let r = ap.dot(&ab) / len2;
    if r <= 0.0 {
        return p.distance(&a);
    }
    if r >= 1.0 {
        return p.distance(&b);
    }
    let s = (ab.x * ap.y - ab.y * ap.x) / len2;
    s.abs() * len2.sqrt()
}
