//! Relate engine and the DE-9IM intersection matrix.

pub mod engine;
pub mod matrix;

pub use engine::{has_proper_intersection, relate, relate_with_cfg};
pub use matrix::{IntersectionMatrix, MatrixParseError};
