//! Axis-aligned envelopes used as O(1) rejection filters.

use super::Coordinate;

/// Closed axis-aligned rectangle. An absent envelope is `Option::None`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Envelope {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl Envelope {
    /// Envelope spanned by two corners (order irrelevant).
    #[inline]
    pub fn new(p1: Coordinate, p2: Coordinate) -> Self {
        Self {
            min_x: p1.x.min(p2.x),
            max_x: p1.x.max(p2.x),
            min_y: p1.y.min(p2.y),
            max_y: p1.y.max(p2.y),
        }
    }

    #[inline]
    pub fn of_point(p: Coordinate) -> Self {
        Self::new(p, p)
    }

    /// Envelope of a coordinate slice; `None` when empty.
    pub fn of_coords(pts: &[Coordinate]) -> Option<Self> {
        let (first, rest) = pts.split_first()?;
        let mut env = Self::of_point(*first);
        for p in rest {
            env.expand_to_include(*p);
        }
        Some(env)
    }

    #[inline]
    pub fn expand_to_include(&mut self, p: Coordinate) {
        self.min_x = self.min_x.min(p.x);
        self.max_x = self.max_x.max(p.x);
        self.min_y = self.min_y.min(p.y);
        self.max_y = self.max_y.max(p.y);
    }

    #[inline]
    pub fn expand_to_include_envelope(&mut self, other: &Envelope) {
        self.min_x = self.min_x.min(other.min_x);
        self.max_x = self.max_x.max(other.max_x);
        self.min_y = self.min_y.min(other.min_y);
        self.max_y = self.max_y.max(other.max_y);
    }

    /// Inclusive rectangle overlap.
    #[inline]
    pub fn intersects(&self, other: &Envelope) -> bool {
        !(other.min_x > self.max_x
            || other.max_x < self.min_x
            || other.min_y > self.max_y
            || other.max_y < self.min_y)
    }

    /// Inclusive point containment.
    #[inline]
    pub fn contains_point(&self, p: Coordinate) -> bool {
        p.x >= self.min_x && p.x <= self.max_x && p.y >= self.min_y && p.y <= self.max_y
    }

    /// Overlap rectangle, if any.
    pub fn intersection(&self, other: &Envelope) -> Option<Envelope> {
        if !self.intersects(other) {
            return None;
        }
        Some(Envelope {
            min_x: self.min_x.max(other.min_x),
            max_x: self.max_x.min(other.max_x),
            min_y: self.min_y.max(other.min_y),
            max_y: self.max_y.min(other.max_y),
        })
    }

    #[inline]
    pub fn centre(&self) -> Coordinate {
        Coordinate::new(
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }

    /// Overlap test for the envelopes of segments `p1p2` and `q1q2`.
    #[inline]
    pub fn segments_intersect(p1: Coordinate, p2: Coordinate, q1: Coordinate, q2: Coordinate) -> bool {
        Envelope::new(p1, p2).intersects(&Envelope::new(q1, q2))
    }

    /// Whether `q` lies in the envelope of segment `p1p2`.
    #[inline]
    pub fn segment_contains(p1: Coordinate, p2: Coordinate, q: Coordinate) -> bool {
        Envelope::new(p1, p2).contains_point(q)
    }
}

/// Overlap test where an absent envelope intersects nothing.
#[inline]
pub fn envelopes_intersect(a: Option<&Envelope>, b: Option<&Envelope>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => a.intersects(b),
        _ => false,
    }
}
