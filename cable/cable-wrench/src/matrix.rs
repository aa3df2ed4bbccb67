//! Assembly of the direction matrix from routed cables.

use nalgebra::{Matrix3xX, Point3, Unit};

use crate::error::{WrenchError, WrenchResult};

/// Unit pull directions at `end_effector`, one column per cable.
///
/// Column `k` points from the end effector toward `exit_points[k]`, the last
/// point the cable touches before reaching the platform (its last bend, or
/// its anchor when it runs straight).
///
/// # Errors
///
/// Returns [`WrenchError::CoincidentPoints`] when an exit point coincides with
/// the end effector, and [`WrenchError::NonFiniteInput`] for non-finite
/// coordinates.
pub fn direction_matrix(
    end_effector: &Point3<f64>,
    exit_points: &[Point3<f64>],
) -> WrenchResult<Matrix3xX<f64>> {
    let mut directions = Matrix3xX::zeros(exit_points.len());
    for (index, exit) in exit_points.iter().enumerate() {
        let pull = exit - end_effector;
        if pull.iter().any(|v| !v.is_finite()) {
            return Err(WrenchError::non_finite(format!("cable {index} exit point")));
        }
        let unit = Unit::try_new(pull, f64::EPSILON).ok_or(WrenchError::coincident_points(index))?;
        directions.set_column(index, &unit.into_inner());
    }
    Ok(directions)
}
