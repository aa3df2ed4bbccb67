//! Error types for cable routing.
//!
//! Every variant here is a caller contract violation. Geometric outcomes such
//! as "no intersection" or "no collision" are ordinary data and never errors.

use thiserror::Error;

/// Result type for cable routing operations.
pub type CableResult<T> = std::result::Result<T, CableError>;

/// Errors raised when routing inputs break the geometric contract.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CableError {
    /// Rotation axis or edge has zero length.
    #[error("degenerate axis: endpoints coincide (length {length})")]
    DegenerateAxis {
        /// Measured axis length.
        length: f64,
    },

    /// Three points passed to a facet normal are collinear.
    #[error("collinear facet: normal has length {length}")]
    CollinearFacet {
        /// Length of the unnormalized cross product.
        length: f64,
    },

    /// Shared-corner index is not valid for the given number of chain points.
    #[error("invalid shared vertex index {index} for a chain of {points} points")]
    InvalidSharedVertex {
        /// The index that was supplied (1-based).
        index: usize,
        /// Number of chain points.
        points: usize,
    },

    /// Edge chain has an unsupported number of edges.
    #[error("edge chain must contain 1 to 3 edges, got {edges}")]
    InvalidChainLength {
        /// Number of edges supplied.
        edges: usize,
    },

    /// Consecutive edges of a chain do not share an endpoint.
    #[error("edge {edge} does not share an endpoint with edge {}", edge + 1)]
    DisconnectedChain {
        /// Index of the first edge of the offending pair.
        edge: usize,
    },
}

impl CableError {
    /// Create a degenerate axis error.
    #[must_use]
    pub const fn degenerate_axis(length: f64) -> Self {
        Self::DegenerateAxis { length }
    }

    /// Create a collinear facet error.
    #[must_use]
    pub const fn collinear_facet(length: f64) -> Self {
        Self::CollinearFacet { length }
    }

    /// Create an invalid shared vertex error.
    #[must_use]
    pub const fn invalid_shared_vertex(index: usize, points: usize) -> Self {
        Self::InvalidSharedVertex { index, points }
    }

    /// Create an invalid chain length error.
    #[must_use]
    pub const fn invalid_chain_length(edges: usize) -> Self {
        Self::InvalidChainLength { edges }
    }

    /// Create a disconnected chain error.
    #[must_use]
    pub const fn disconnected_chain(edge: usize) -> Self {
        Self::DisconnectedChain { edge }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CableError::degenerate_axis(0.0);
        assert!(format!("{err}").contains("degenerate axis"));

        let err = CableError::invalid_shared_vertex(2, 3);
        let msg = format!("{err}");
        assert!(msg.contains("index 2"));
        assert!(msg.contains("3 points"));

        let err = CableError::disconnected_chain(1);
        assert!(format!("{err}").contains("edge 1 does not share an endpoint with edge 2"));
    }
}
