//! Wrap routers for one, two and three edges.
//!
//! Every router reduces to [`route_chain`]. A single edge is unfolded
//! directly. Longer chains run layered checks in a fixed order, each able to
//! replace the result of the one before:
//!
//! 1. all edges at once, when every edge blocks its proxy line;
//! 2. the chain without its last edge, accepted only if the cable from the
//!    last bend to the end effector clears the dropped edge;
//! 3. the chain without its first edge, accepted only if the cable from the
//!    anchor to the first bend clears the dropped edge;
//! 4. otherwise the cable runs straight.
//!
//! A three-edge chain therefore delegates to two-edge routing over edges 1–2
//! and 2–3, which in turn delegates to single-edge routing.

use cable_types::{CableResult, EdgeChain, RouterConfig, Separation, SharedCorner};
use nalgebra::Point3;
use tracing::{debug, trace};

use crate::geometry::{is_blocked, outward_normal};
use crate::unfold::{all_edges_blocked, any_edge_blocked, unfold_chain};

/// Route a cable from anchor `a` to end effector `b` over `chain`.
///
/// # Errors
///
/// Returns an error for degenerate edges or when `a` or `b` is collinear
/// with an edge it is tested against.
pub fn route_chain(
    a: &Point3<f64>,
    b: &Point3<f64>,
    chain: &EdgeChain,
    config: &RouterConfig,
) -> CableResult<Separation> {
    let separation = route_layered(a, b, chain, config)?;
    debug!(
        edges = chain.len(),
        pattern = %separation.pattern(),
        "Routed cable over edge chain"
    );
    Ok(separation)
}

fn route_layered(
    a: &Point3<f64>,
    b: &Point3<f64>,
    chain: &EdgeChain,
    config: &RouterConfig,
) -> CableResult<Separation> {
    let edges = chain.len();
    if edges <= 1 {
        return route_single(a, b, chain, config);
    }

    let mut result = Separation::free();

    // Check 1: the cable touches every edge
    if all_edges_blocked(a, b, chain)? {
        match unfold_chain(a, b, chain, config)?.and_then(|bends| Separation::contact(0, bends)) {
            Some(found) => {
                trace!(edges, pattern = %found.pattern(), "Full chain contact");
                result = found;
            }
            None => trace!(edges, "Full chain unfold missed an edge"),
        }
    }

    // Check 2: contact ends before the last edge
    let head = chain.sub_chain(0, edges - 1)?;
    if any_edge_blocked(a, b, &head)? {
        let found = route_layered(a, b, &head, config)?;
        if !found.is_free() {
            let tail = chain.sub_chain(edges - 1, edges)?;
            let exit = found.exit_point(a);
            if clears_dropped_edge(&exit, b, &exit, &tail, config)? {
                accept(&mut result, found, "head");
            } else {
                trace!(pattern = %found.pattern(), "Head contact discarded: last edge still blocks");
            }
        }
    }

    // Check 3: contact starts after the first edge
    let rest = chain.sub_chain(1, edges)?;
    if any_edge_blocked(a, b, &rest)? {
        let found = route_layered(a, b, &rest, config)?;
        if let (Some(entry), Some(shifted)) = (found.bends().first().copied(), found.clone().shifted(1)) {
            let lead = chain.sub_chain(0, 1)?;
            if clears_dropped_edge(a, &entry, &entry, &lead, config)? {
                accept(&mut result, shifted, "tail");
            } else {
                trace!(pattern = %shifted.pattern(), "Tail contact discarded: first edge still blocks");
            }
        }
    }

    Ok(result)
}

/// Later checks take precedence over earlier ones.
fn accept(result: &mut Separation, found: Separation, check: &str) {
    if result.is_free() {
        trace!(check, pattern = %found.pattern(), "Partial chain contact");
    } else {
        trace!(
            check,
            previous = %result.pattern(),
            pattern = %found.pattern(),
            "Later check overrides earlier contact"
        );
    }
    *result = found;
}

/// Whether the cable piece `from → to` runs straight past the single edge of
/// `dropped`.
///
/// `bend` is the end of the piece the router computed itself. A bend on the
/// dropped edge's line is the corner the two edges share, and the edge cannot
/// block a cable leaving from it.
fn clears_dropped_edge(
    from: &Point3<f64>,
    to: &Point3<f64>,
    bend: &Point3<f64>,
    dropped: &EdgeChain,
    config: &RouterConfig,
) -> CableResult<bool> {
    let on_line = dropped
        .edge(0)
        .is_some_and(|edge| outward_normal(bend, &edge.left, &edge.right).is_err());
    if on_line {
        trace!("Bend lies on the dropped edge's line");
        return Ok(true);
    }
    Ok(route_single(from, to, dropped, config)?.is_free())
}

fn route_single(
    a: &Point3<f64>,
    b: &Point3<f64>,
    chain: &EdgeChain,
    config: &RouterConfig,
) -> CableResult<Separation> {
    let Some(edge) = chain.edge(0) else {
        return Ok(Separation::free());
    };
    if !is_blocked(a, b, edge)? {
        return Ok(Separation::free());
    }
    let bends = unfold_chain(a, b, chain, config)?;
    if bends.is_none() {
        trace!("Edge blocks the line but the unfolded cable misses it");
    }
    Ok(bends
        .and_then(|bends| Separation::contact(0, bends))
        .unwrap_or_default())
}

/// Route over the single edge `left → right` with default tolerances.
///
/// # Errors
///
/// See [`route_chain`].
///
/// # Example
///
/// ```
/// use cable_types::{CollisionPattern, Point3};
/// use cable_wrap::route_over_one_edge;
///
/// let a = Point3::new(0.0, 1.0, 1.0);
/// let b = Point3::new(0.0, 1.0, -1.0);
/// let sep = route_over_one_edge(
///     &a,
///     &b,
///     &Point3::new(-1.0, 0.0, 0.0),
///     &Point3::new(1.0, 0.0, 0.0),
/// )?;
/// assert_eq!(sep.pattern(), CollisionPattern::Edge1);
/// assert!((sep.length(&a, &b) - 2.0 * 2.0_f64.sqrt()).abs() < 1e-9);
/// # Ok::<(), cable_types::CableError>(())
/// ```
pub fn route_over_one_edge(
    a: &Point3<f64>,
    b: &Point3<f64>,
    left: &Point3<f64>,
    right: &Point3<f64>,
) -> CableResult<Separation> {
    route_chain(a, b, &EdgeChain::single(*left, *right), &RouterConfig::default())
}

/// Route over the two edges spanned by corners `c1, c2, c3` (see
/// [`EdgeChain::pair`]) with default tolerances.
///
/// # Errors
///
/// See [`route_chain`].
pub fn route_over_two_edges(
    a: &Point3<f64>,
    b: &Point3<f64>,
    c1: &Point3<f64>,
    c2: &Point3<f64>,
    c3: &Point3<f64>,
    shared: SharedCorner,
) -> CableResult<Separation> {
    let chain = EdgeChain::pair(*c1, *c2, *c3, shared);
    route_chain(a, b, &chain, &RouterConfig::default())
}

/// Route over the three edges spanned by corners `c1, c2, c3, c4` (see
/// [`EdgeChain::triple`]) with default tolerances.
///
/// # Errors
///
/// See [`route_chain`].
pub fn route_over_three_edges(
    a: &Point3<f64>,
    b: &Point3<f64>,
    c1: &Point3<f64>,
    c2: &Point3<f64>,
    c3: &Point3<f64>,
    c4: &Point3<f64>,
    shared: SharedCorner,
) -> CableResult<Separation> {
    let chain = EdgeChain::triple(*c1, *c2, *c3, *c4, shared);
    route_chain(a, b, &chain, &RouterConfig::default())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use cable_types::CollisionPattern;

    fn route(a: &Point3<f64>, b: &Point3<f64>, chain: &EdgeChain) -> Separation {
        route_chain(a, b, chain, &RouterConfig::default()).unwrap()
    }

    #[test]
    fn test_single_edge_blocked() {
        let chain = EdgeChain::single(Point3::new(-1.0, 0.0, 0.0), Point3::new(1.0, 0.0, 0.0));
        let a = Point3::new(0.0, 1.0, 1.0);
        let b = Point3::new(0.0, 1.0, -1.0);

        let sep = route(&a, &b, &chain);
        assert_eq!(sep.pattern(), CollisionPattern::Edge1);
        assert_eq!(sep.bends().len(), 1);
        assert_relative_eq!(sep.bends()[0], Point3::origin(), epsilon = 1e-9);
        assert_relative_eq!(sep.length(&a, &b), 2.0 * 2.0_f64.sqrt(), epsilon = 1e-9);
    }

    #[test]
    fn test_single_edge_beyond_extent_is_free() {
        // Blocked as an infinite line, but the unfolded cable passes the end
        let chain = EdgeChain::single(Point3::new(-1.0, 0.0, 0.0), Point3::new(1.0, 0.0, 0.0));
        let a = Point3::new(3.0, 1.0, 1.0);
        let b = Point3::new(3.0, 1.0, -1.0);

        assert_eq!(is_blocked(&a, &b, &chain.edges()[0]), Ok(true));
        let sep = route(&a, &b, &chain);
        assert!(sep.is_free());
        assert!(sep.bends().is_empty());
    }

    #[test]
    fn test_notch_is_free() {
        let chain = EdgeChain::single(Point3::new(-1.0, 0.0, 0.0), Point3::new(1.0, 0.0, 0.0));
        let a = Point3::new(0.0, 0.0, 1.0);
        let b = Point3::new(0.0, 0.0, -1.0);

        let sep = route(&a, &b, &chain);
        assert!(sep.is_free());
        assert_relative_eq!(sep.length(&a, &b), 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_two_edges_both() {
        let s = 2.0_f64.sqrt();
        let chain = EdgeChain::pair(
            Point3::new(-1.0, 1.0, 1.0),
            Point3::new(1.0, -1.0, 1.0),
            Point3::new(1.0, 1.0, 1.0),
            SharedCorner::Last,
        );
        let a = Point3::new(-s, 2.0, 0.0);
        let b = Point3::new(2.0, -s, 0.0);

        let sep = route(&a, &b, &chain);
        assert_eq!(sep.pattern(), CollisionPattern::Edges12);
        assert_relative_eq!(sep.length(&a, &b), 4.0 + s, epsilon = 1e-9);
    }

    #[test]
    fn test_two_edges_first_only() {
        let s = 2.0_f64.sqrt();
        let chain = EdgeChain::pair(
            Point3::new(-1.0, 1.0, 1.0),
            Point3::new(1.0, -1.0, 1.0),
            Point3::new(1.0, 1.0, 1.0),
            SharedCorner::Last,
        );
        let a = Point3::new(0.0, 2.0, 0.0);
        let b = Point3::new(0.0, -1.0, 2.0);

        let sep = route(&a, &b, &chain);
        assert_eq!(sep.pattern(), CollisionPattern::Edge1);
        assert_relative_eq!(sep.bends()[0], Point3::new(0.0, 1.0, 1.0), epsilon = 1e-9);
        assert_relative_eq!(sep.length(&a, &b), s + 5.0_f64.sqrt(), epsilon = 1e-9);
    }

    #[test]
    fn test_corner_wrappers_agree_with_chain() {
        let c1 = Point3::new(-1.0, 1.0, 1.0);
        let c2 = Point3::new(1.0, -1.0, 1.0);
        let c3 = Point3::new(1.0, 1.0, 1.0);
        let a = Point3::new(0.0, 2.0, 0.0);
        let b = Point3::new(0.0, -1.0, 2.0);

        let direct = route_over_two_edges(&a, &b, &c1, &c2, &c3, SharedCorner::Last);
        let chained = route_chain(
            &a,
            &b,
            &EdgeChain::pair(c1, c2, c3, SharedCorner::Last),
            &RouterConfig::default(),
        );
        assert_eq!(direct, chained);
    }

    #[test]
    fn test_bend_on_dropped_edge_line_clears_it() {
        let corner = Point3::new(1.0, 1.0, 1.0);
        let dropped = EdgeChain::single(Point3::new(1.0, -1.0, 1.0), corner);
        let b = Point3::new(1.0, 0.0, 1.2);
        let config = RouterConfig::default();

        assert!(route_single(&corner, &b, &dropped, &config).is_err());
        assert_eq!(clears_dropped_edge(&corner, &b, &corner, &dropped, &config), Ok(true));
    }
}
