//! Grid layout and sampling parameters.

// Grid counts are small; the usize -> f64 casts are exact.
#![allow(clippy::cast_precision_loss)]

use cable_types::RouterConfig;
use cable_wrench::FeasibilityParams;
use nalgebra::Point3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{WorkspaceError, WorkspaceResult};

/// A regular grid of end-effector positions, bounds inclusive.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GridSpec {
    /// Lowest corner.
    pub min: Point3<f64>,
    /// Highest corner.
    pub max: Point3<f64>,
    /// Samples along x, y and z.
    pub counts: [usize; 3],
}

impl GridSpec {
    /// Create a grid spanning `min..=max`.
    #[must_use]
    pub const fn new(min: Point3<f64>, max: Point3<f64>, counts: [usize; 3]) -> Self {
        Self { min, max, counts }
    }

    /// Grid under a square anchor frame: `inset` away from the frame's sides,
    /// from the floor to `inset` below the anchors, `count` samples per axis.
    #[must_use]
    pub fn under_frame(half_side: f64, height: f64, inset: f64, count: usize) -> Self {
        let side = half_side - inset;
        Self {
            min: Point3::new(-side, -side, 0.0),
            max: Point3::new(side, side, height - inset),
            counts: [count; 3],
        }
    }

    /// Check counts and bounds.
    ///
    /// # Errors
    ///
    /// Returns [`WorkspaceError::InvalidGrid`] for a zero count, non-finite
    /// bounds or `min > max` on any axis.
    pub fn validate(&self) -> WorkspaceResult<()> {
        for axis in 0..3 {
            if self.counts[axis] == 0 {
                return Err(WorkspaceError::invalid_grid(format!("zero samples on axis {axis}")));
            }
            if !self.min[axis].is_finite() || !self.max[axis].is_finite() {
                return Err(WorkspaceError::invalid_grid(format!("non-finite bound on axis {axis}")));
            }
            if self.min[axis] > self.max[axis] {
                return Err(WorkspaceError::invalid_grid(format!(
                    "min {} exceeds max {} on axis {axis}",
                    self.min[axis], self.max[axis]
                )));
            }
        }
        Ok(())
    }

    /// Total number of cells.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.counts[0] * self.counts[1] * self.counts[2]
    }

    /// Whether the grid has no cells.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Row-major position of cell `(ix, iy, iz)`, z fastest.
    #[must_use]
    pub const fn flat_index(&self, ix: usize, iy: usize, iz: usize) -> usize {
        (ix * self.counts[1] + iy) * self.counts[2] + iz
    }

    /// Cell indices of a row-major position.
    #[must_use]
    pub const fn cell(&self, flat: usize) -> (usize, usize, usize) {
        let iz = flat % self.counts[2];
        let rest = flat / self.counts[2];
        (rest / self.counts[1], rest % self.counts[1], iz)
    }

    /// Position of cell `(ix, iy, iz)`.
    #[must_use]
    pub fn point(&self, ix: usize, iy: usize, iz: usize) -> Point3<f64> {
        Point3::new(
            self.coordinate(0, ix),
            self.coordinate(1, iy),
            self.coordinate(2, iz),
        )
    }

    fn coordinate(&self, axis: usize, index: usize) -> f64 {
        let count = self.counts[axis];
        if count <= 1 {
            return self.min[axis];
        }
        let step = (self.max[axis] - self.min[axis]) / (count - 1) as f64;
        self.min[axis] + step * index as f64
    }
}

/// Parameters for sampling a workspace.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SampleParams {
    /// Points tested along each straight cable by the collision gate.
    pub line_samples: usize,
    /// Tension limits and load.
    pub feasibility: FeasibilityParams,
    /// Router tolerances.
    pub router: RouterConfig,
}

impl Default for SampleParams {
    fn default() -> Self {
        Self {
            line_samples: 100,
            feasibility: FeasibilityParams::default(),
            router: RouterConfig::default(),
        }
    }
}

impl SampleParams {
    /// Set the number of collision samples per cable.
    #[must_use]
    pub const fn line_samples(mut self, samples: usize) -> Self {
        self.line_samples = samples;
        self
    }

    /// Set the feasibility parameters.
    #[must_use]
    pub const fn feasibility(mut self, feasibility: FeasibilityParams) -> Self {
        self.feasibility = feasibility;
        self
    }

    /// Set the router tolerances.
    #[must_use]
    pub const fn router(mut self, router: RouterConfig) -> Self {
        self.router = router;
        self
    }
}
