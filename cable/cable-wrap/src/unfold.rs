//! Progressive-rotation unfolding of an edge chain.
//!
//! A taut cable wrapping over `k` consecutive edges touches `k + 1` facets:
//! the facet spanned by the anchor and the first edge, one facet between each
//! pair of neighbouring edges, and the facet spanned by the last edge and the
//! end effector. Rotating every facet about its hinge edge into one common
//! plane turns the wrapped path into a straight segment. Its crossings with
//! the unfolded edges, rotated back, are the bend points.
//!
//! ```text
//!   facet 0      facet 1      facet 2      facet 3
//!   (A, e1)  e1  (e1, e2) e2  (e2, e3) e3  (e3, B)
//!      A ───────────── ... unfolded straight ... ─────────── B
//! ```
//!
//! The common plane is facet `max(k - 1, 1)`: the middle facet for pairs, the
//! facet between edges 2 and 3 for triples, and B's facet for a single edge.

use cable_types::{CableResult, EdgeChain, MAX_CHAIN_EDGES, RouterConfig};
use nalgebra::{Isometry3, Point3, Unit, Vector3};
use smallvec::SmallVec;

use crate::geometry::{dihedral_angle, hinge, is_blocked, outward_normal, segment_intersection};

/// Normals and frames for every facet around a chain.
type Facets<T> = SmallVec<[T; MAX_CHAIN_EDGES + 1]>;

/// Outward normals of facets `0..=k`, anchor side first.
fn facet_normals(
    a: &Point3<f64>,
    b: &Point3<f64>,
    chain: &EdgeChain,
) -> CableResult<Facets<Unit<Vector3<f64>>>> {
    let edges = chain.edges();
    let mut normals = Facets::new();

    if let Some(first) = edges.first() {
        normals.push(outward_normal(a, &first.left, &first.right)?);
    }
    for (index, edge) in edges.iter().enumerate() {
        let far = chain.exit_vertex(index).unwrap_or(*b);
        normals.push(outward_normal(&far, &edge.right, &edge.left)?);
    }
    Ok(normals)
}

/// Rigid transforms taking each facet into the common plane.
fn facet_frames(
    a: &Point3<f64>,
    b: &Point3<f64>,
    chain: &EdgeChain,
) -> CableResult<Facets<Isometry3<f64>>> {
    let normals = facet_normals(a, b, chain)?;

    // hinges[i] rotates facet i onto facet i + 1 about edge i
    let mut hinges: SmallVec<[Isometry3<f64>; MAX_CHAIN_EDGES]> = SmallVec::new();
    for (index, edge) in chain.edges().iter().enumerate() {
        let axis = edge.axis()?;
        let angle = dihedral_angle(&normals[index], &normals[index + 1]);
        hinges.push(hinge(&edge.left, &axis, angle));
    }

    let facets = hinges.len() + 1;
    let pivot = hinges.len().saturating_sub(1).max(1);
    let mut frames: Facets<Isometry3<f64>> = SmallVec::from_elem(Isometry3::identity(), facets);
    for index in (0..pivot).rev() {
        frames[index] = frames[index + 1] * hinges[index];
    }
    for index in pivot + 1..facets {
        frames[index] = frames[index - 1] * hinges[index - 1].inverse();
    }
    Ok(frames)
}

/// Bend points of a cable wrapping every edge of `chain`, one per edge.
///
/// Returns `None` when the straight unfolded cable misses any edge: the cable
/// cannot touch all edges at once.
///
/// # Errors
///
/// Returns an error for degenerate edges or collinear facets.
pub fn unfold_chain(
    a: &Point3<f64>,
    b: &Point3<f64>,
    chain: &EdgeChain,
    config: &RouterConfig,
) -> CableResult<Option<SmallVec<[Point3<f64>; MAX_CHAIN_EDGES]>>> {
    let frames = facet_frames(a, b, chain)?;
    let (Some(first), Some(last)) = (frames.first(), frames.last()) else {
        return Ok(None);
    };
    let a_flat = first * a;
    let b_flat = last * b;

    let mut bends = SmallVec::new();
    for (index, edge) in chain.edges().iter().enumerate() {
        // Edge i is shared by facets i and i + 1, which agree on it
        let frame = &frames[index + 1];
        let left = frame * edge.left;
        let right = frame * edge.right;
        let Some(crossing) = segment_intersection(&a_flat, &b_flat, &left, &right, config) else {
            return Ok(None);
        };
        bends.push(frame.inverse_transform_point(&crossing));
    }
    Ok(Some(bends))
}

/// Whether every edge of `chain` blocks the proxy line through its
/// neighbouring facets.
///
/// Edge `i` is tested against the line from the previous edge's private end
/// (or `a`) to the next edge's private end (or `b`).
///
/// # Errors
///
/// Returns an error for degenerate edges or collinear facets.
pub fn all_edges_blocked(
    a: &Point3<f64>,
    b: &Point3<f64>,
    chain: &EdgeChain,
) -> CableResult<bool> {
    for (index, edge) in chain.edges().iter().enumerate() {
        let from = chain.entry_vertex(index).unwrap_or(*a);
        let to = chain.exit_vertex(index).unwrap_or(*b);
        if !is_blocked(&from, &to, edge)? {
            return Ok(false);
        }
    }
    Ok(true)
}

/// Whether any edge of `chain` blocks the straight line from `a` to `b`.
///
/// # Errors
///
/// Returns an error for degenerate edges or collinear facets.
pub fn any_edge_blocked(a: &Point3<f64>, b: &Point3<f64>, chain: &EdgeChain) -> CableResult<bool> {
    for edge in chain.edges() {
        if is_blocked(a, b, edge)? {
            return Ok(true);
        }
    }
    Ok(false)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use cable_types::SharedCorner;

    #[test]
    fn test_single_edge_unfold() {
        let chain = EdgeChain::single(Point3::new(-1.0, 0.0, 0.0), Point3::new(1.0, 0.0, 0.0));
        let a = Point3::new(0.0, 1.0, 1.0);
        let b = Point3::new(0.0, 1.0, -1.0);

        let bends = unfold_chain(&a, &b, &chain, &RouterConfig::default())
            .unwrap()
            .unwrap();
        assert_eq!(bends.len(), 1);
        assert_relative_eq!(bends[0], Point3::origin(), epsilon = 1e-9);
    }

    #[test]
    fn test_single_edge_frames_fold_anchor_into_far_facet() {
        let chain = EdgeChain::single(Point3::new(-1.0, 0.0, 0.0), Point3::new(1.0, 0.0, 0.0));
        let a = Point3::new(0.0, 1.0, 1.0);
        let b = Point3::new(0.0, 1.0, -1.0);

        let frames = facet_frames(&a, &b, &chain).unwrap();
        assert_eq!(frames.len(), 2);
        assert_relative_eq!(frames[0] * a, Point3::new(0.0, -1.0, 1.0), epsilon = 1e-9);
        assert_relative_eq!(frames[1] * b, b, epsilon = 1e-12);
    }

    #[test]
    fn test_cube_corner_facet_normals() {
        let s = 2.0_f64.sqrt();
        let chain = EdgeChain::pair(
            Point3::new(-1.0, 1.0, 1.0),
            Point3::new(1.0, -1.0, 1.0),
            Point3::new(1.0, 1.0, 1.0),
            SharedCorner::Last,
        );
        let a = Point3::new(-s, 2.0, 0.0);
        let b = Point3::new(2.0, -s, 0.0);

        let normals = facet_normals(&a, &b, &chain).unwrap();
        assert_eq!(normals.len(), 3);
        // Middle facet is the cube's top face
        assert_relative_eq!(normals[1].into_inner(), Vector3::z(), epsilon = 1e-12);
    }

    #[test]
    fn test_cube_corner_unfold() {
        let s = 2.0_f64.sqrt();
        let chain = EdgeChain::pair(
            Point3::new(-1.0, 1.0, 1.0),
            Point3::new(1.0, -1.0, 1.0),
            Point3::new(1.0, 1.0, 1.0),
            SharedCorner::Last,
        );
        let a = Point3::new(-s, 2.0, 0.0);
        let b = Point3::new(2.0, -s, 0.0);

        assert_eq!(all_edges_blocked(&a, &b, &chain), Ok(true));
        let bends = unfold_chain(&a, &b, &chain, &RouterConfig::default())
            .unwrap()
            .unwrap();
        assert_eq!(bends.len(), 2);
        assert_relative_eq!(bends[0], Point3::new(0.0, 1.0, 1.0), epsilon = 1e-9);
        assert_relative_eq!(bends[1], Point3::new(1.0, 0.0, 1.0), epsilon = 1e-9);
    }

    #[test]
    fn test_any_edge_blocked_clear_line() {
        let chain = EdgeChain::single(Point3::new(-1.0, -1.0, 1.0), Point3::new(-1.0, 1.0, 1.0));
        let a = Point3::new(0.0, 2.0, 0.0);
        let b = Point3::new(0.0, 2.0, 3.0);
        assert_eq!(any_edge_blocked(&a, &b, &chain), Ok(false));
    }
}
