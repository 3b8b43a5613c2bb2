//! Segment intersection: the robust line intersector, monotone chains, the
//! sweep-line candidate finder, and the recording segment intersector.

pub mod chain;
pub mod line;
pub mod segment;
pub mod sweep;

pub use chain::{MonotoneChainEdge, Quadrant};
pub use line::{intersect_segments, SegmentIntersection};
pub use segment::SegmentIntersector;
pub use sweep::{compute_intersections, ChainSource, SegRef, SegmentVisitor, SweepMode, SweepStats};
