//! Cable anchors and the edge chains each cable may wrap over.

use cable_types::{EdgeChain, Separation};
use cable_wrap::route_chain;
use nalgebra::Point3;
use tracing::{debug, trace};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{WorkspaceError, WorkspaceResult};
use crate::obstacle::{Obstacle, segment_collides};
use crate::params::SampleParams;

/// A set of cables, each fixed to an anchor and attached to one end-effector
/// point.
///
/// Every cable carries an ordered list of candidate edge chains. When its
/// straight line to the end effector enters the obstacle, each candidate the
/// cable actually wraps over is a routing alternative. Sampling evaluates
/// every combination of alternatives across cables and keeps the best margin.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CableRig {
    anchors: Vec<Point3<f64>>,
    candidates: Vec<Vec<EdgeChain>>,
}

impl CableRig {
    /// Create a rig with the given anchors and no candidate chains.
    #[must_use]
    pub fn new(anchors: Vec<Point3<f64>>) -> Self {
        let candidates = vec![Vec::new(); anchors.len()];
        Self {
            anchors,
            candidates,
        }
    }

    /// Four anchors at `(±half_side, ±half_side, height)`, counter-clockwise
    /// from `(+x, +y)`.
    #[must_use]
    pub fn square_frame(half_side: f64, height: f64) -> Self {
        let h = half_side;
        Self::new(vec![
            Point3::new(h, h, height),
            Point3::new(-h, h, height),
            Point3::new(-h, -h, height),
            Point3::new(h, -h, height),
        ])
    }

    /// Append a candidate chain for `cable`.
    ///
    /// # Errors
    ///
    /// Returns [`WorkspaceError::CableOutOfRange`] for an unknown cable.
    pub fn with_candidate(mut self, cable: usize, chain: EdgeChain) -> WorkspaceResult<Self> {
        let cables = self.anchors.len();
        self.candidates
            .get_mut(cable)
            .ok_or_else(|| WorkspaceError::cable_out_of_range(cable, cables))?
            .push(chain);
        Ok(self)
    }

    /// Anchor positions.
    #[must_use]
    pub fn anchors(&self) -> &[Point3<f64>] {
        &self.anchors
    }

    /// Candidate chains of `cable`, in trial order.
    #[must_use]
    pub fn candidates(&self, cable: usize) -> &[EdgeChain] {
        self.candidates.get(cable).map(Vec::as_slice).unwrap_or_default()
    }

    /// Number of cables.
    #[must_use]
    pub fn len(&self) -> usize {
        self.anchors.len()
    }

    /// Whether the rig has no cables.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.anchors.is_empty()
    }

    /// Every way `cable` can reach `end_effector` around `obstacle`.
    ///
    /// A single free separation when the straight cable clears the obstacle,
    /// otherwise one separation per candidate the cable wraps over, in
    /// candidate order. Empty when no candidate explains the collision.
    ///
    /// # Errors
    ///
    /// Returns [`WorkspaceError::CableOutOfRange`] for an unknown cable and
    /// propagates router contract violations.
    pub fn route_alternatives<O: Obstacle + ?Sized>(
        &self,
        cable: usize,
        end_effector: &Point3<f64>,
        obstacle: &O,
        params: &SampleParams,
    ) -> WorkspaceResult<Vec<Separation>> {
        let anchor = self
            .anchors
            .get(cable)
            .ok_or_else(|| WorkspaceError::cable_out_of_range(cable, self.len()))?;

        if !segment_collides(obstacle, end_effector, anchor, params.line_samples) {
            return Ok(vec![Separation::free()]);
        }

        let mut routes = Vec::new();
        for (index, chain) in self.candidates(cable).iter().enumerate() {
            let separation = route_chain(anchor, end_effector, chain, &params.router)?;
            if !separation.is_free() {
                trace!(cable, candidate = index, pattern = %separation.pattern(), "Cable wrapped");
                routes.push(separation);
            }
        }

        if routes.is_empty() {
            debug!(cable, "Straight cable collides and no candidate chain wraps it");
        }
        Ok(routes)
    }

    /// Route `cable` to `end_effector` around `obstacle`.
    ///
    /// Returns a free separation when the straight cable clears the obstacle,
    /// the first candidate with contact when it does not, and `None` when no
    /// candidate explains the collision.
    ///
    /// # Errors
    ///
    /// See [`CableRig::route_alternatives`].
    pub fn route_cable<O: Obstacle + ?Sized>(
        &self,
        cable: usize,
        end_effector: &Point3<f64>,
        obstacle: &O,
        params: &SampleParams,
    ) -> WorkspaceResult<Option<Separation>> {
        Ok(self
            .route_alternatives(cable, end_effector, obstacle, params)?
            .into_iter()
            .next())
    }

    /// The point each cable leaves toward the end effector along its first
    /// routing, or `None` when some cable cannot be routed.
    ///
    /// # Errors
    ///
    /// See [`CableRig::route_alternatives`].
    pub fn exit_points<O: Obstacle + ?Sized>(
        &self,
        end_effector: &Point3<f64>,
        obstacle: &O,
        params: &SampleParams,
    ) -> WorkspaceResult<Option<Vec<Point3<f64>>>> {
        let mut exits = Vec::with_capacity(self.len());
        for (cable, anchor) in self.anchors.iter().enumerate() {
            match self.route_cable(cable, end_effector, obstacle, params)? {
                Some(separation) => exits.push(separation.exit_point(anchor)),
                None => return Ok(None),
            }
        }
        Ok(Some(exits))
    }

    /// Exit points of every routing alternative, one list per cable.
    ///
    /// A cable with an empty list cannot be routed.
    ///
    /// # Errors
    ///
    /// See [`CableRig::route_alternatives`].
    pub fn exit_alternatives<O: Obstacle + ?Sized>(
        &self,
        end_effector: &Point3<f64>,
        obstacle: &O,
        params: &SampleParams,
    ) -> WorkspaceResult<Vec<Vec<Point3<f64>>>> {
        self.anchors
            .iter()
            .enumerate()
            .map(|(cable, anchor)| {
                let routes = self.route_alternatives(cable, end_effector, obstacle, params)?;
                Ok(routes.iter().map(|sep| sep.exit_point(anchor)).collect())
            })
            .collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::obstacle::RoofedBox;
    use approx::assert_relative_eq;

    #[test]
    fn test_square_frame() {
        let rig = CableRig::square_frame(0.342, 0.727);
        assert_eq!(rig.len(), 4);
        assert_relative_eq!(rig.anchors()[1], Point3::new(-0.342, 0.342, 0.727), epsilon = 1e-12);
        assert!(rig.candidates(0).is_empty());
        assert!(rig.candidates(9).is_empty());
    }

    #[test]
    fn test_with_candidate_bounds() {
        let chain = EdgeChain::single(Point3::origin(), Point3::new(1.0, 0.0, 0.0));
        let rig = CableRig::square_frame(1.0, 1.0).with_candidate(2, chain.clone()).unwrap();
        assert_eq!(rig.candidates(2).len(), 1);

        let err = CableRig::square_frame(1.0, 1.0).with_candidate(4, chain);
        assert!(matches!(err, Err(WorkspaceError::CableOutOfRange { index: 4, cables: 4 })));
    }

    #[test]
    fn test_clear_cables_run_straight() {
        let rig = CableRig::square_frame(1.0, 2.0);
        let housing = RoofedBox::new(0.2, 0.2, 0.2, 0.3);
        let params = SampleParams::default();
        let end = Point3::new(0.5, 0.5, 1.0);

        let exits = rig.exit_points(&end, &housing, &params);
        assert!(matches!(exits, Ok(Some(ref e)) if e.as_slice() == rig.anchors()));
    }

    #[test]
    fn test_unexplained_collision() {
        let rig = CableRig::square_frame(1.0, 2.0);
        let housing = RoofedBox::new(0.5, 0.5, 1.0, 1.0);
        let params = SampleParams::default();
        // Under the block, every cable passes through it
        let end = Point3::new(0.0, 0.0, 0.5);

        assert!(matches!(rig.route_cable(0, &end, &housing, &params), Ok(None)));
        assert!(matches!(rig.exit_points(&end, &housing, &params), Ok(None)));
        assert!(rig.route_cable(7, &end, &housing, &params).is_err());
    }
}
