//! Planar topology: DE-9IM relate over points, lines, and polygons.
//!
//! Layers, leaves first:
//! - `kernel`: coordinates, envelopes, exact orientation.
//! - `intersect`: segment intersection, monotone chains, sweep line, and the
//!   recording segment intersector.
//! - `graph`: per-geometry topology graph (labels, nodes, edges, self-noding)
//!   and point location.
//! - `relate`: the relate engine and `IntersectionMatrix`.
//!
//! Numeric policy
//! - Every classification (side, collinearity, ring orientation, crossing)
//!   is decided by exact orientation signs.
//! - Node and intersection keys compare coordinates exactly; there is no
//!   snapping tolerance.

pub mod cfg;
pub mod error;
pub mod geometry;
pub mod graph;
pub mod intersect;
pub mod kernel;
pub mod relate;
pub mod sample;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use cfg::{BoundaryNodeRule, RelateCfg};
pub use error::RelateError;
pub use geometry::{Geometry, GeometryKind, Polygon};
pub use kernel::{Coordinate, Envelope, Location};
pub use relate::{has_proper_intersection, relate, relate_with_cfg, IntersectionMatrix};

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::geometry::{Geometry, GeometryKind, Polygon};
    pub use crate::kernel::{is_ccw, orientation_index, Coordinate, Envelope, Location};
    pub use crate::relate::{has_proper_intersection, relate, relate_with_cfg, IntersectionMatrix};
    pub use crate::sample::{
        draw_cell_multipolygon, draw_geometry, draw_line_string, draw_polygon_radial, RadialCfg, ReplayToken,
        VertexCount,
    };
    pub use crate::{BoundaryNodeRule, RelateCfg, RelateError};
}
