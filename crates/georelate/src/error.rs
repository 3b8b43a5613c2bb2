//! Errors surfaced by graph construction and `relate`.
//!
//! Arithmetic degeneracies (non-finite homogeneous intersections) never show up
//! here: the line intersector recovers from them locally.

use std::fmt;

/// Errors surfaced by the topology engine.
#[derive(Debug, Clone, PartialEq)]
pub enum RelateError {
    /// Malformed input geometry (short or open ring, repeated point fed to a
    /// quadrant computation, non-finite ordinate).
    Validation { reason: String },
    /// Combined input size exceeds `RelateCfg::max_coordinates`.
    ResourceLimit { coordinates: usize, limit: usize },
    /// Failure while building the graph of argument `index` (0 or 1).
    Argument {
        index: usize,
        source: Box<RelateError>,
    },
}

impl RelateError {
    pub(crate) fn validation(reason: impl Into<String>) -> Self {
        Self::Validation {
            reason: reason.into(),
        }
    }

    pub(crate) fn in_argument(self, index: usize) -> Self {
        Self::Argument {
            index,
            source: Box::new(self),
        }
    }
}

impl fmt::Display for RelateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RelateError::Validation { reason } => write!(f, "invalid geometry: {reason}"),
            RelateError::ResourceLimit { coordinates, limit } => write!(
                f,
                "input has {coordinates} coordinates, above the configured limit of {limit}"
            ),
            RelateError::Argument { index, source } => {
                write!(f, "geometry argument {index}: {source}")
            }
        }
    }
}

impl std::error::Error for RelateError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RelateError::Argument { source, .. } => Some(source.as_ref()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::RelateError;
    use std::error::Error;

    #[test]
    fn argument_wraps_and_exposes_source() {
        let err = RelateError::validation("ring must be closed").in_argument(1);
        assert_eq!(
            err.to_string(),
            "geometry argument 1: invalid geometry: ring must be closed"
        );
        let inner = err.source().expect("source");
        assert_eq!(inner.to_string(), "invalid geometry: ring must be closed");
    }

    #[test]
    fn resource_limit_message() {
        let err = RelateError::ResourceLimit {
            coordinates: 12,
            limit: 10,
        };
        assert!(err.to_string().contains("above the configured limit of 10"));
    }
}
