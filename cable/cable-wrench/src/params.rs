//! Tension limits and load for the feasibility analysis.

use nalgebra::Vector3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{WrenchError, WrenchResult};

/// Tension bounds and the gravity load carried by the platform.
///
/// # Example
///
/// ```
/// use cable_wrench::FeasibilityParams;
///
/// let params = FeasibilityParams::default();
/// assert!((params.t_max - 50.0).abs() < 1e-12);
///
/// let heavy = FeasibilityParams::default().mass(4.0).tension_bounds(1.0, 80.0);
/// assert!(heavy.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FeasibilityParams {
    /// Minimum cable tension.
    pub t_min: f64,

    /// Maximum cable tension.
    pub t_max: f64,

    /// Platform mass.
    pub mass: f64,

    /// Gravitational acceleration.
    pub gravity: Vector3<f64>,
}

impl Default for FeasibilityParams {
    fn default() -> Self {
        Self {
            t_min: 0.0,
            t_max: 50.0,
            mass: 1.0,
            gravity: Vector3::new(0.0, 0.0, -9.8),
        }
    }
}

impl FeasibilityParams {
    /// Create params with the given tension bounds and mass under standard gravity.
    #[must_use]
    pub fn new(t_min: f64, t_max: f64, mass: f64) -> Self {
        Self {
            t_min,
            t_max,
            mass,
            ..Self::default()
        }
    }

    /// Set both tension bounds.
    #[must_use]
    pub const fn tension_bounds(mut self, t_min: f64, t_max: f64) -> Self {
        self.t_min = t_min;
        self.t_max = t_max;
        self
    }

    /// Set the platform mass.
    #[must_use]
    pub const fn mass(mut self, mass: f64) -> Self {
        self.mass = mass;
        self
    }

    /// Set the gravity vector.
    #[must_use]
    pub const fn gravity(mut self, gravity: Vector3<f64>) -> Self {
        self.gravity = gravity;
        self
    }

    /// Force exerted by gravity on the platform.
    #[must_use]
    pub fn weight(&self) -> Vector3<f64> {
        self.gravity * self.mass
    }

    /// Check that every value is finite and `t_min <= t_max`.
    ///
    /// # Errors
    ///
    /// Returns [`WrenchError::NonFiniteInput`] or
    /// [`WrenchError::InvalidTensionBounds`].
    pub fn validate(&self) -> WrenchResult<()> {
        if !self.t_min.is_finite() || !self.t_max.is_finite() {
            return Err(WrenchError::non_finite("tension bounds"));
        }
        if !self.mass.is_finite() {
            return Err(WrenchError::non_finite("mass"));
        }
        if self.gravity.iter().any(|g| !g.is_finite()) {
            return Err(WrenchError::non_finite("gravity"));
        }
        if self.t_min > self.t_max {
            return Err(WrenchError::invalid_tension_bounds(self.t_min, self.t_max));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_params() {
        let params = FeasibilityParams::default();
        assert!(params.t_min.abs() < f64::EPSILON);
        assert!((params.t_max - 50.0).abs() < f64::EPSILON);
        assert!((params.mass - 1.0).abs() < f64::EPSILON);
        assert!((params.gravity.z + 9.8).abs() < f64::EPSILON);
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_builder_pattern() {
        let params = FeasibilityParams::new(1.0, 10.0, 2.0).gravity(Vector3::new(0.0, -9.81, 0.0));
        assert!((params.weight().y + 19.62).abs() < 1e-12);
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_bounds() {
        let params = FeasibilityParams::default().tension_bounds(10.0, 1.0);
        assert!(matches!(
            params.validate(),
            Err(WrenchError::InvalidTensionBounds { .. })
        ));

        let params = FeasibilityParams::default().mass(f64::NAN);
        assert!(matches!(params.validate(), Err(WrenchError::NonFiniteInput(_))));
    }
}
