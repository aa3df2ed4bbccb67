//! Error types for workspace sampling.

use cable_types::CableError;
use cable_wrench::WrenchError;
use thiserror::Error;

/// Result type alias for workspace operations.
pub type WorkspaceResult<T> = Result<T, WorkspaceError>;

/// Errors that can occur while sampling a workspace.
#[derive(Debug, Error)]
pub enum WorkspaceError {
    /// Grid bounds or counts are unusable.
    #[error("invalid grid: {0}")]
    InvalidGrid(String),

    /// The rig has no cables.
    #[error("cable rig has no anchors")]
    EmptyRig,

    /// Cable index does not exist on the rig.
    #[error("cable {index} out of range for a rig with {cables} cables")]
    CableOutOfRange {
        /// Requested cable.
        index: usize,
        /// Number of cables on the rig.
        cables: usize,
    },

    /// Writing results failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Routing rejected its input.
    #[error("routing failed: {0}")]
    Cable(#[from] CableError),

    /// Feasibility analysis rejected its input.
    #[error("feasibility analysis failed: {0}")]
    Wrench(#[from] WrenchError),
}

impl WorkspaceError {
    /// Create an invalid grid error.
    #[must_use]
    pub fn invalid_grid(details: impl Into<String>) -> Self {
        Self::InvalidGrid(details.into())
    }

    /// Create a cable out of range error.
    #[must_use]
    pub const fn cable_out_of_range(index: usize, cables: usize) -> Self {
        Self::CableOutOfRange { index, cables }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = WorkspaceError::invalid_grid("zero x samples");
        assert!(format!("{err}").contains("zero x samples"));

        let err = WorkspaceError::EmptyRig;
        assert!(format!("{err}").contains("no anchors"));

        let err = WorkspaceError::cable_out_of_range(5, 4);
        assert!(format!("{err}").contains("cable 5"));

        let err: WorkspaceError = CableError::degenerate_axis(0.0).into();
        assert!(format!("{err}").contains("degenerate axis"));

        let err: WorkspaceError = WrenchError::too_few_columns(1).into();
        assert!(format!("{err}").contains("feasibility"));
    }
}
