//! Tolerances used by the wrap router.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Numerical tolerances for edge/cable intersection.
///
/// # Example
///
/// ```
/// use cable_types::RouterConfig;
///
/// let config = RouterConfig::default();
/// assert!((config.coplanarity_tolerance - 1e-4).abs() < 1e-12);
/// assert!(config.check_cable_extent);
///
/// let loose = RouterConfig::default().ratio_tolerance(1e-9);
/// assert!(loose.ratio_tolerance > 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RouterConfig {
    /// Maximum `|v3 · (v1 × v2)|` for an edge and the unfolded cable to count
    /// as coplanar.
    pub coplanarity_tolerance: f64,

    /// Slack added to both ends of the `[0, 1]` intersection window.
    pub ratio_tolerance: f64,

    /// Also require the intersection to lie within the unfolded cable segment,
    /// not just on its supporting line.
    pub check_cable_extent: bool,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl RouterConfig {
    /// Default tolerances.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            coplanarity_tolerance: 1e-4,
            ratio_tolerance: 0.0,
            check_cable_extent: true,
        }
    }

    /// Set the coplanarity tolerance.
    #[must_use]
    pub const fn coplanarity_tolerance(mut self, tolerance: f64) -> Self {
        self.coplanarity_tolerance = tolerance;
        self
    }

    /// Set the ratio window slack.
    #[must_use]
    pub const fn ratio_tolerance(mut self, tolerance: f64) -> Self {
        self.ratio_tolerance = tolerance;
        self
    }

    /// Enable or disable the cable extent check.
    #[must_use]
    pub const fn check_cable_extent(mut self, enabled: bool) -> Self {
        self.check_cable_extent = enabled;
        self
    }

    /// Whether `ratio` falls inside the widened `[0, 1]` window.
    #[must_use]
    pub fn accepts_ratio(&self, ratio: f64) -> bool {
        ratio >= -self.ratio_tolerance && ratio <= 1.0 + self.ratio_tolerance
    }
}
