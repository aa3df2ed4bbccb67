//! Geometry kernel: rotations about edges, facet normals and the
//! edge/cable intersection test.
//!
//! Pure functions over `nalgebra` points. Contract violations (zero-length
//! axis, collinear facet) are errors; "no intersection" is `None`.

use cable_types::{CableError, CableResult, Edge, RouterConfig};
use nalgebra::{Isometry3, Point3, Unit, UnitQuaternion, Vector3};

/// Facet normals shorter than this are treated as collinear input.
pub const COLLINEAR_EPSILON: f64 = 1e-12;

/// Rigid rotation by `angle` about the line through `pivot` along `axis`.
///
/// Positive angles follow the right-hand rule around `axis`.
#[must_use]
pub fn hinge(pivot: &Point3<f64>, axis: &Unit<Vector3<f64>>, angle: f64) -> Isometry3<f64> {
    Isometry3::rotation_wrt_point(UnitQuaternion::from_axis_angle(axis, angle), *pivot)
}

/// Rotate `point` by `theta` about the axis running from `axis_start` to
/// `axis_end`.
///
/// # Errors
///
/// Returns [`CableError::DegenerateAxis`] when the axis endpoints coincide.
///
/// # Example
///
/// ```
/// use cable_wrap::rotate_about;
/// use nalgebra::Point3;
/// use std::f64::consts::FRAC_PI_2;
///
/// let p = rotate_about(
///     &Point3::new(0.0, 1.0, 0.0),
///     &Point3::origin(),
///     &Point3::new(0.0, 0.0, 1.0),
///     FRAC_PI_2,
/// )?;
/// assert!((p - Point3::new(-1.0, 0.0, 0.0)).norm() < 1e-12);
/// # Ok::<(), cable_types::CableError>(())
/// ```
pub fn rotate_about(
    point: &Point3<f64>,
    axis_start: &Point3<f64>,
    axis_end: &Point3<f64>,
    theta: f64,
) -> CableResult<Point3<f64>> {
    let axis = Edge::new(*axis_start, *axis_end).axis()?;
    Ok(hinge(axis_start, &axis, theta) * point)
}

/// Unit normal of the triangle `p0, p1, p2`: `(p1 - p0) × (p2 - p1)`.
///
/// With edges oriented counter-clockwise seen from outside, this points out
/// of the solid.
///
/// # Errors
///
/// Returns [`CableError::CollinearFacet`] when the three points are collinear.
pub fn outward_normal(
    p0: &Point3<f64>,
    p1: &Point3<f64>,
    p2: &Point3<f64>,
) -> CableResult<Unit<Vector3<f64>>> {
    let normal = (p1 - p0).cross(&(p2 - p1));
    Unit::try_new(normal, COLLINEAR_EPSILON).ok_or_else(|| CableError::collinear_facet(normal.norm()))
}

/// Angle between two unit normals, in `[0, π]`.
#[must_use]
pub fn dihedral_angle(n1: &Unit<Vector3<f64>>, n2: &Unit<Vector3<f64>>) -> f64 {
    n1.into_inner().dot(&n2.into_inner()).clamp(-1.0, 1.0).acos()
}

/// Intersection of the cable segment `a0–a1` with the edge segment `b0–b1`.
///
/// The segments must be coplanar within `config.coplanarity_tolerance`, and
/// the crossing must fall within the edge (and, with
/// `config.check_cable_extent`, within the cable). Returns the crossing on
/// the edge, or `None`.
#[must_use]
pub fn segment_intersection(
    a0: &Point3<f64>,
    a1: &Point3<f64>,
    b0: &Point3<f64>,
    b1: &Point3<f64>,
    config: &RouterConfig,
) -> Option<Point3<f64>> {
    let edge = b1 - b0;
    let cable = a1 - a0;
    let offset = a0 - b0;

    let s1 = edge.cross(&cable);
    if offset.dot(&s1).abs() >= config.coplanarity_tolerance {
        return None;
    }

    let s1_sq = s1.norm_squared();
    if s1_sq <= f64::EPSILON * edge.norm_squared() * cable.norm_squared() {
        return None; // parallel
    }

    let edge_ratio = offset.cross(&cable).dot(&s1) / s1_sq;
    if !config.accepts_ratio(edge_ratio) {
        return None;
    }

    if config.check_cable_extent {
        let cable_ratio = offset.cross(&edge).dot(&s1) / s1_sq;
        if !config.accepts_ratio(cable_ratio) {
            return None;
        }
    }

    Some(b0 + edge * edge_ratio)
}

/// Whether the infinite line through `from` and `to` passes through the
/// solid side of `edge`.
///
/// Compares the outward normals of the facets `(from, left, right)` and
/// `(to, right, left)`: the line is blocked when their cross product points
/// along the edge direction, i.e. the fold between the facets is convex.
///
/// # Errors
///
/// Returns an error when the edge is degenerate or either point is collinear
/// with it.
pub fn is_blocked(from: &Point3<f64>, to: &Point3<f64>, edge: &Edge) -> CableResult<bool> {
    let axis = edge.axis()?;
    let n1 = outward_normal(from, &edge.left, &edge.right)?;
    let n2 = outward_normal(to, &edge.right, &edge.left)?;
    Ok(n1.cross(&n2.into_inner()).dot(&axis.into_inner()) > 0.0)
}
