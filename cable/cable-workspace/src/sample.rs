//! Parallel evaluation of the feasibility margin over a grid.

use cable_wrench::{direction_matrix, hyperplane_shifting_margin};
use itertools::Itertools;
use nalgebra::Point3;
use rayon::prelude::*;
use tracing::{debug, info, warn};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{WorkspaceError, WorkspaceResult};
use crate::obstacle::Obstacle;
use crate::params::{GridSpec, SampleParams};
use crate::rig::CableRig;

/// Margin recorded for cells inside the obstacle or with an unroutable cable.
pub const BLOCKED_MARGIN: f64 = 0.0;

/// Outcome of evaluating one cell.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum CellMargin {
    /// Every cable reaches the end effector; the pose has this margin.
    Routed(f64),
    /// The end effector is inside the obstacle.
    Inside,
    /// Some cable collides and none of its candidate chains wraps it.
    Unroutable,
}

impl CellMargin {
    /// Value stored in a [`MarginGrid`].
    #[must_use]
    pub const fn value(self) -> f64 {
        match self {
            Self::Routed(margin) => margin,
            Self::Inside | Self::Unroutable => BLOCKED_MARGIN,
        }
    }
}

/// Feasibility margins over a grid, row-major with z fastest.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MarginGrid {
    /// Grid layout.
    pub spec: GridSpec,
    /// One value per cell; NaN where evaluation failed.
    pub values: Vec<f64>,
    /// Cells inside the obstacle or with an unroutable cable.
    pub blocked_cells: usize,
    /// Cells whose routing or analysis rejected the geometry.
    pub failed_cells: usize,
}

impl MarginGrid {
    /// Value at cell `(ix, iy, iz)`.
    #[must_use]
    pub fn get(&self, ix: usize, iy: usize, iz: usize) -> Option<f64> {
        let [nx, ny, nz] = self.spec.counts;
        if ix >= nx || iy >= ny || iz >= nz {
            return None;
        }
        self.values.get(self.spec.flat_index(ix, iy, iz)).copied()
    }

    /// Array shape `(nx, ny, nz)`.
    #[must_use]
    pub const fn shape(&self) -> [usize; 3] {
        self.spec.counts
    }

    /// Largest finite margin.
    #[must_use]
    pub fn max_margin(&self) -> Option<f64> {
        self.values
            .iter()
            .copied()
            .filter(|v| v.is_finite())
            .reduce(f64::max)
    }
}

/// Evaluate the margin at one end-effector position.
///
/// When cables have several routing alternatives, every combination is
/// analyzed and the largest margin is kept.
///
/// # Errors
///
/// Returns [`WorkspaceError::EmptyRig`] for a rig without cables and
/// propagates router and feasibility contract violations.
pub fn sample_cell<O: Obstacle + ?Sized>(
    rig: &CableRig,
    obstacle: &O,
    position: &Point3<f64>,
    params: &SampleParams,
) -> WorkspaceResult<CellMargin> {
    if rig.is_empty() {
        return Err(WorkspaceError::EmptyRig);
    }
    if obstacle.contains(position) {
        return Ok(CellMargin::Inside);
    }
    let alternatives = rig.exit_alternatives(position, obstacle, params)?;
    if alternatives.iter().any(Vec::is_empty) {
        return Ok(CellMargin::Unroutable);
    }

    let mut best = None;
    for exits in alternatives.iter().map(|a| a.iter().copied()).multi_cartesian_product() {
        let directions = direction_matrix(position, &exits)?;
        let margin = hyperplane_shifting_margin(&directions, &params.feasibility)?;
        best = Some(best.map_or(margin, |b: f64| b.max(margin)));
    }
    best.map(CellMargin::Routed).ok_or(WorkspaceError::EmptyRig)
}

/// Evaluate the feasibility margin at every cell of `grid`, in parallel.
///
/// Cells inside the obstacle, and cells where a colliding cable has no
/// wrapping candidate, get [`BLOCKED_MARGIN`]. Cells where routing or the
/// analysis rejects the geometry (for example an end effector collinear with
/// an obstacle edge) are logged and stored as NaN.
///
/// # Errors
///
/// Returns an error for an invalid grid, an empty rig or invalid
/// feasibility parameters.
///
/// # Example
///
/// ```
/// use cable_workspace::{CableRig, GridSpec, RoofedBox, SampleParams, sample_margin_grid};
/// use nalgebra::Point3;
///
/// let rig = CableRig::square_frame(1.0, 2.0);
/// let housing = RoofedBox::new(0.2, 0.2, 0.3, 0.5);
/// let grid = GridSpec::new(Point3::new(-0.5, -0.5, 0.8), Point3::new(0.5, 0.5, 1.5), [3, 3, 3]);
///
/// let margins = sample_margin_grid(&rig, &housing, &grid, &SampleParams::default())?;
/// assert_eq!(margins.values.len(), 27);
/// assert!(margins.values.iter().all(|m| *m > 0.0));
/// # Ok::<(), cable_workspace::WorkspaceError>(())
/// ```
pub fn sample_margin_grid<O: Obstacle + ?Sized>(
    rig: &CableRig,
    obstacle: &O,
    grid: &GridSpec,
    params: &SampleParams,
) -> WorkspaceResult<MarginGrid> {
    grid.validate()?;
    if rig.is_empty() {
        return Err(WorkspaceError::EmptyRig);
    }
    params.feasibility.validate()?;

    info!(
        cells = grid.len(),
        cables = rig.len(),
        "Starting workspace margin sampling"
    );

    let cells: Vec<Option<CellMargin>> = (0..grid.len())
        .into_par_iter()
        .map(|flat| {
            let (ix, iy, iz) = grid.cell(flat);
            let position = grid.point(ix, iy, iz);
            match sample_cell(rig, obstacle, &position, params) {
                Ok(cell) => {
                    if !matches!(cell, CellMargin::Routed(_)) {
                        debug!(ix, iy, iz, ?cell, "Cell blocked");
                    }
                    Some(cell)
                }
                Err(err) => {
                    warn!(ix, iy, iz, error = %err, "Cell evaluation failed");
                    None
                }
            }
        })
        .collect();

    let blocked_cells = cells
        .iter()
        .filter(|c| matches!(c, Some(CellMargin::Inside | CellMargin::Unroutable)))
        .count();
    let failed_cells = cells.iter().filter(|c| c.is_none()).count();
    let values: Vec<f64> = cells
        .into_iter()
        .map(|c| c.map_or(f64::NAN, CellMargin::value))
        .collect();

    info!(
        cells = values.len(),
        blocked = blocked_cells,
        failed = failed_cells,
        "Workspace margin sampling complete"
    );

    Ok(MarginGrid {
        spec: *grid,
        values,
        blocked_cells,
        failed_cells,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::obstacle::RoofedBox;
    use approx::assert_relative_eq;

    #[test]
    fn test_inside_cell() {
        let rig = CableRig::square_frame(1.0, 2.0);
        let housing = RoofedBox::new(0.5, 0.5, 0.5, 0.8);
        let cell = sample_cell(&rig, &housing, &Point3::new(0.0, 0.0, 0.2), &SampleParams::default());
        assert!(matches!(cell, Ok(CellMargin::Inside)));
        assert!(CellMargin::Inside.value().abs() < f64::EPSILON);
    }

    #[test]
    fn test_clear_cell_matches_direct_margin() {
        let rig = CableRig::square_frame(1.0, 2.0);
        let housing = RoofedBox::new(0.1, 0.1, 0.1, 0.2);
        let params = SampleParams::default();
        let position = Point3::new(0.2, -0.1, 1.0);

        let cell = sample_cell(&rig, &housing, &position, &params).unwrap();
        let directions = direction_matrix(&position, rig.anchors()).unwrap();
        let direct = hyperplane_shifting_margin(&directions, &params.feasibility).unwrap();

        match cell {
            CellMargin::Routed(m) => assert_relative_eq!(m, direct, epsilon = 1e-12),
            other => panic!("unexpected outcome {other:?}"),
        }
    }

    #[test]
    fn test_grid_rejects_empty_rig() {
        let grid = GridSpec::new(Point3::origin(), Point3::new(1.0, 1.0, 1.0), [2, 2, 2]);
        let result = sample_margin_grid(
            &CableRig::default(),
            &RoofedBox::default(),
            &grid,
            &SampleParams::default(),
        );
        assert!(matches!(result, Err(WorkspaceError::EmptyRig)));

        let cell = sample_cell(
            &CableRig::default(),
            &RoofedBox::default(),
            &Point3::new(0.0, 0.0, 1.0),
            &SampleParams::default(),
        );
        assert!(matches!(cell, Err(WorkspaceError::EmptyRig)));
    }

    #[test]
    fn test_grid_get_bounds() {
        let spec = GridSpec::new(Point3::origin(), Point3::new(1.0, 1.0, 1.0), [1, 2, 2]);
        let grid = MarginGrid {
            spec,
            values: vec![1.0, 2.0, 3.0, f64::NAN],
            blocked_cells: 0,
            failed_cells: 1,
        };
        assert_eq!(grid.get(0, 1, 0), Some(3.0));
        assert_eq!(grid.get(1, 0, 0), None);
        assert_eq!(grid.max_margin(), Some(3.0));
        assert_eq!(grid.shape(), [1, 2, 2]);
    }
}
