//! Hyperplane shifting over the positive span of cable directions.
//!
//! Cable tensions `t ∈ [t_min, t_max]^n` acting along unit directions `w_k`
//! produce the forces `W t`. That set is a zonotope whose facets are normal
//! to `c = w_i × w_j` for every pair of columns. For each facet the support
//! values
//!
//! ```text
//! d1 =  m (c · g) + Σ_k max(t_min (c · w_k), t_max (c · w_k))
//! d2 = -m (c · g) - Σ_k min(t_min (c · w_k), t_max (c · w_k))
//! ```
//!
//! measure how far the required force `-m g` sits inside the two shifted
//! hyperplanes. Opposite signs mean the load lies outside that slab; otherwise
//! the slab margin is `min(|d1|, |d2|) / ‖c‖`. The pose margin is the smallest
//! slab margin.

use itertools::Itertools;
use nalgebra::{Matrix3xX, Vector3};
use tracing::{debug, trace};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{WrenchError, WrenchResult};
use crate::params::FeasibilityParams;

/// Margin reported for a pose whose load cannot be balanced.
pub const INFEASIBLE_MARGIN: f64 = -1.0;

/// Facet normals shorter than this come from parallel columns and are skipped.
pub const PARALLEL_EPSILON: f64 = 1e-12;

/// Number of unordered column pairs for `n` columns.
#[must_use]
pub const fn pair_count(n: usize) -> usize {
    n * n.saturating_sub(1) / 2
}

/// Position of pair `(i, j)`, `i < j < n`, in lexicographic pair order.
#[must_use]
pub const fn pair_index(i: usize, j: usize, n: usize) -> usize {
    i * (2 * n - i - 1) / 2 + (j - i - 1)
}

/// Shifted support values of one facet of the tension zonotope.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Facet {
    /// Column pair `(i, j)` spanning the facet.
    pub columns: (usize, usize),

    /// Unnormalized facet normal `w_i × w_j`.
    pub normal: Vector3<f64>,

    /// Support value on the positive side of the normal (`d1`).
    pub upper: f64,

    /// Support value on the negative side of the normal (`d2`).
    pub lower: f64,
}

impl Facet {
    /// Compute the shifted support values for columns `i` and `j`.
    #[must_use]
    pub fn compute(
        directions: &Matrix3xX<f64>,
        i: usize,
        j: usize,
        params: &FeasibilityParams,
    ) -> Self {
        let normal = directions.column(i).cross(&directions.column(j));
        let load = normal.dot(&params.weight());

        let mut upper = load;
        let mut lower = -load;
        for column in directions.column_iter() {
            let projection = normal.dot(&column);
            if projection > 0.0 {
                upper += params.t_max * projection;
                lower -= params.t_min * projection;
            } else if projection < 0.0 {
                upper += params.t_min * projection;
                lower -= params.t_max * projection;
            }
        }

        Self {
            columns: (i, j),
            normal,
            upper,
            lower,
        }
    }

    /// Whether the two columns are parallel.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        self.normal.norm() <= PARALLEL_EPSILON
    }

    /// Whether the load lies between the two shifted hyperplanes.
    #[must_use]
    pub fn is_feasible(&self) -> bool {
        self.upper * self.lower >= 0.0
    }

    /// Slab margin, [`INFEASIBLE_MARGIN`] outside the slab, or `None` for a
    /// degenerate pair.
    #[must_use]
    pub fn margin(&self) -> Option<f64> {
        if self.is_degenerate() {
            return None;
        }
        if !self.is_feasible() {
            return Some(INFEASIBLE_MARGIN);
        }
        Some(self.upper.abs().min(self.lower.abs()) / self.normal.norm())
    }
}

/// Every facet of a pose plus the resulting margin.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct WrenchAnalysis {
    /// Facets in lexicographic pair order, see [`pair_index`].
    pub facets: Vec<Facet>,

    /// Smallest slab margin over non-degenerate facets.
    pub margin: f64,

    /// Column pair of the binding facet.
    pub binding: (usize, usize),

    /// Number of direction columns.
    pub columns: usize,
}

impl WrenchAnalysis {
    /// Facet spanned by columns `i` and `j`, in either order.
    #[must_use]
    pub fn facet(&self, i: usize, j: usize) -> Option<&Facet> {
        let (i, j) = if i < j { (i, j) } else { (j, i) };
        if i == j || j >= self.columns {
            return None;
        }
        self.facets.get(pair_index(i, j, self.columns))
    }

    /// Whether the load can be balanced.
    #[must_use]
    pub fn is_feasible(&self) -> bool {
        self.margin >= 0.0
    }
}

fn validate_directions(directions: &Matrix3xX<f64>) -> WrenchResult<()> {
    if directions.ncols() < 2 {
        return Err(WrenchError::too_few_columns(directions.ncols()));
    }
    if directions.iter().any(|v| !v.is_finite()) {
        return Err(WrenchError::non_finite("direction matrix"));
    }
    Ok(())
}

/// Evaluate every facet of the tension zonotope for one pose.
///
/// # Errors
///
/// Returns an error for fewer than two columns, non-finite input, invalid
/// parameters, or when every column pair is parallel.
pub fn analyze_wrench(
    directions: &Matrix3xX<f64>,
    params: &FeasibilityParams,
) -> WrenchResult<WrenchAnalysis> {
    params.validate()?;
    validate_directions(directions)?;

    let n = directions.ncols();
    let mut facets = Vec::with_capacity(pair_count(n));
    let mut binding: Option<(f64, (usize, usize))> = None;

    for (i, j) in (0..n).tuple_combinations() {
        let facet = Facet::compute(directions, i, j, params);
        match facet.margin() {
            None => trace!(i, j, "Skipping parallel column pair"),
            Some(margin) => {
                if binding.is_none_or(|(best, _)| margin < best) {
                    binding = Some((margin, (i, j)));
                }
            }
        }
        facets.push(facet);
    }

    let Some((margin, pair)) = binding else {
        return Err(WrenchError::degenerate_span(n));
    };
    debug!(margin, i = pair.0, j = pair.1, "Binding facet");

    Ok(WrenchAnalysis {
        facets,
        margin,
        binding: pair,
        columns: n,
    })
}

/// Feasibility margin of a pose: the distance from the load to the nearest
/// shifted facet, or [`INFEASIBLE_MARGIN`] when no admissible tensions
/// balance it.
///
/// # Errors
///
/// See [`analyze_wrench`].
///
/// # Example
///
/// ```
/// use cable_wrench::{FeasibilityParams, INFEASIBLE_MARGIN, hyperplane_shifting_margin};
/// use nalgebra::{Matrix3xX, Vector3};
///
/// let k = 1.0 / 3.0_f64.sqrt();
/// let directions = Matrix3xX::from_columns(&[
///     Vector3::new(k, k, k),
///     Vector3::new(-k, k, k),
///     Vector3::new(-k, -k, k),
///     Vector3::new(k, -k, k),
/// ]);
///
/// let margin = hyperplane_shifting_margin(&directions, &FeasibilityParams::default())?;
/// assert!(margin > 0.0);
///
/// let slack = FeasibilityParams::default().tension_bounds(0.0, 0.0);
/// assert_eq!(hyperplane_shifting_margin(&directions, &slack)?, INFEASIBLE_MARGIN);
/// # Ok::<(), cable_wrench::WrenchError>(())
/// ```
pub fn hyperplane_shifting_margin(
    directions: &Matrix3xX<f64>,
    params: &FeasibilityParams,
) -> WrenchResult<f64> {
    analyze_wrench(directions, params).map(|analysis| analysis.margin)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn pyramid() -> Matrix3xX<f64> {
        let k = 1.0 / 3.0_f64.sqrt();
        Matrix3xX::from_columns(&[
            Vector3::new(k, k, k),
            Vector3::new(-k, k, k),
            Vector3::new(-k, -k, k),
            Vector3::new(k, -k, k),
        ])
    }

    #[test]
    fn test_pair_indexing() {
        assert_eq!(pair_count(4), 6);
        assert_eq!(pair_count(1), 0);
        let pairs: Vec<_> = (0..5_usize).tuple_combinations().collect();
        for (position, (i, j)) in pairs.into_iter().enumerate() {
            assert_eq!(pair_index(i, j, 5), position);
        }
    }

    #[test]
    fn test_pyramid_margin() {
        let margin = hyperplane_shifting_margin(&pyramid(), &FeasibilityParams::default()).unwrap();
        assert_relative_eq!(margin, 9.8 / 2.0_f64.sqrt(), epsilon = 1e-9);
    }

    #[test]
    fn test_pyramid_binds_on_adjacent_pair() {
        let analysis = analyze_wrench(&pyramid(), &FeasibilityParams::default()).unwrap();

        assert_eq!(analysis.facets.len(), 6);
        assert!(matches!(analysis.binding, (0, 1) | (1, 2) | (2, 3) | (0, 3)));
        assert!(analysis.is_feasible());

        // Diagonal pairs sit much further from the load
        let diagonal = analysis.facet(2, 0).and_then(Facet::margin);
        assert!(diagonal.is_some_and(|m| m > 40.0));
    }

    #[test]
    fn test_zero_tension_is_infeasible() {
        let params = FeasibilityParams::default().tension_bounds(0.0, 0.0);
        let margin = hyperplane_shifting_margin(&pyramid(), &params);
        assert_eq!(margin, Ok(INFEASIBLE_MARGIN));
    }

    #[test]
    fn test_margin_scales_with_load_and_tension() {
        let base = hyperplane_shifting_margin(&pyramid(), &FeasibilityParams::default()).unwrap();
        let scaled =
            hyperplane_shifting_margin(&pyramid(), &FeasibilityParams::new(0.0, 150.0, 3.0))
                .unwrap();
        assert_relative_eq!(scaled, 3.0 * base, epsilon = 1e-9);
    }

    #[test]
    fn test_parallel_pairs_are_skipped() {
        let directions = Matrix3xX::from_columns(&[
            Vector3::new(0.0, 0.0, 1.0),
            Vector3::new(0.0, 0.0, 1.0),
            Vector3::new(1.0, 0.0, 1.0).normalize(),
        ]);
        let analysis = analyze_wrench(&directions, &FeasibilityParams::default());
        let Ok(analysis) = analysis else {
            panic!("analysis failed");
        };
        assert!(analysis.facets[0].is_degenerate());
        assert_eq!(analysis.facets[0].margin(), None);
        assert_ne!(analysis.binding, (0, 1));
    }

    #[test]
    fn test_all_parallel_is_degenerate() {
        let up = Vector3::new(0.0, 0.0, 1.0);
        let directions = Matrix3xX::from_columns(&[up, up, up]);
        let result = hyperplane_shifting_margin(&directions, &FeasibilityParams::default());
        assert_eq!(result, Err(WrenchError::degenerate_span(3)));
    }

    #[test]
    fn test_input_validation() {
        let single = Matrix3xX::from_columns(&[Vector3::new(0.0, 0.0, 1.0)]);
        assert_eq!(
            hyperplane_shifting_margin(&single, &FeasibilityParams::default()),
            Err(WrenchError::too_few_columns(1))
        );

        let mut bad = pyramid();
        bad[(0, 0)] = f64::NAN;
        assert!(matches!(
            hyperplane_shifting_margin(&bad, &FeasibilityParams::default()),
            Err(WrenchError::NonFiniteInput(_))
        ));
    }
}
