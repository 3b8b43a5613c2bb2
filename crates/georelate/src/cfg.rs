//! Tolerances and run configuration.
//!
//! Policy
//! - Predicates are exact (filtered orientation with an arbitrary-precision
//!   fallback), so the only float constant here is the filter's error scale.
//! - `RelateCfg` carries the few knobs a caller may want to turn; everything
//!   else is fixed.

/// Relative error scale of the fast orientation filter.
pub(crate) const DP_SAFE_EPSILON: f64 = 1e-15;

/// Rule deciding whether a point touched `count` times by line endpoints is
/// on the boundary.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BoundaryNodeRule {
    /// OGC parity rule: odd touch counts are boundary.
    #[default]
    Mod2,
    /// Any endpoint is boundary, regardless of how many lines meet there.
    EndPoint,
}

impl BoundaryNodeRule {
    #[inline]
    pub fn in_boundary(self, count: usize) -> bool {
        match self {
            BoundaryNodeRule::Mod2 => count % 2 == 1,
            BoundaryNodeRule::EndPoint => count > 0,
        }
    }
}

/// Configuration for `relate` and graph construction.
#[derive(Clone, Copy, Debug)]
pub struct RelateCfg {
    /// Upper bound on the combined coordinate count of both inputs.
    pub max_coordinates: usize,
    pub boundary_rule: BoundaryNodeRule,
}

impl Default for RelateCfg {
    fn default() -> Self {
        Self {
            max_coordinates: 10_000_000,
            boundary_rule: BoundaryNodeRule::Mod2,
        }
    }
}
