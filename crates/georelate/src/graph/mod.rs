//! Topology graph of one input geometry.
//!
//! - `types`: labels, nodes, and the coordinate-keyed node table.
//! - `edge`: edges with their intersection sets and splitting.
//! - `build`: `GeometryGraph` construction and self-noding.
//! - `locate`: point-in-geometry location.
//!
//! Node keys compare coordinates exactly; near-equal coordinates are distinct
//! nodes.

pub mod build;
pub mod edge;
pub mod locate;
pub mod types;

pub use build::GeometryGraph;
pub use edge::{Edge, EdgeIntersection};
pub use locate::{is_on_line, is_on_segment, locate, locate_non_puntal, locate_point_in_ring};
pub use types::{Label, Node, NodeMap, Position, TopologyLocation};

#[cfg(test)]
mod tests;
