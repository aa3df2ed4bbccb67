//! Error types for wrench-feasibility analysis.

use thiserror::Error;

/// Errors that can occur while evaluating a wrench-feasibility margin.
///
/// An infeasible pose is not an error; it is reported as
/// [`INFEASIBLE_MARGIN`](crate::INFEASIBLE_MARGIN).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum WrenchError {
    /// Fewer than two direction columns.
    #[error("need at least 2 direction columns, got {columns}")]
    TooFewColumns {
        /// Number of columns supplied.
        columns: usize,
    },

    /// Lower tension bound exceeds the upper bound.
    #[error("invalid tension bounds: t_min {t_min} > t_max {t_max}")]
    InvalidTensionBounds {
        /// Lower bound.
        t_min: f64,
        /// Upper bound.
        t_max: f64,
    },

    /// A parameter or matrix entry is NaN or infinite.
    #[error("non-finite input: {0}")]
    NonFiniteInput(String),

    /// Every pair of columns is parallel, so no facet exists.
    #[error("direction columns span no plane: all {columns} columns are parallel")]
    DegenerateSpan {
        /// Number of columns supplied.
        columns: usize,
    },

    /// A cable exit point coincides with the end effector.
    #[error("cable {index} has zero length: exit point coincides with the end effector")]
    CoincidentPoints {
        /// Index of the offending cable.
        index: usize,
    },
}

impl WrenchError {
    /// Create a too-few-columns error.
    #[must_use]
    pub const fn too_few_columns(columns: usize) -> Self {
        Self::TooFewColumns { columns }
    }

    /// Create an invalid tension bounds error.
    #[must_use]
    pub const fn invalid_tension_bounds(t_min: f64, t_max: f64) -> Self {
        Self::InvalidTensionBounds { t_min, t_max }
    }

    /// Create a non-finite input error.
    pub fn non_finite(what: impl Into<String>) -> Self {
        Self::NonFiniteInput(what.into())
    }

    /// Create a degenerate span error.
    #[must_use]
    pub const fn degenerate_span(columns: usize) -> Self {
        Self::DegenerateSpan { columns }
    }

    /// Create a coincident points error.
    #[must_use]
    pub const fn coincident_points(index: usize) -> Self {
        Self::CoincidentPoints { index }
    }
}

/// Result type for wrench-feasibility operations.
pub type WrenchResult<T> = std::result::Result<T, WrenchError>;
