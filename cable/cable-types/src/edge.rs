//! Obstacle edges and edge chains.
//!
//! An obstacle boundary is described by up to three edges ("bars") that share
//! endpoints consecutively. Every edge is oriented so that the facets on
//! either side read counter-clockwise when seen from outside the solid; the
//! sign of facet normals and the direction of unfolding rotations depend on
//! that orientation.
//!
//! ```text
//!   pair, SharedCorner::First          pair, SharedCorner::Last
//!
//!             A                                  A
//!   c1 ─────────────── c3              c1 ─────────────── c3
//!    │   edge 0                             edge 0        │
//!    │ edge 1                                      edge 1 │
//!   c2                 B              B                   c2
//! ```

use nalgebra::{Point3, Unit, Vector3};
use smallvec::SmallVec;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{CableError, CableResult};

/// Edges shorter than this cannot serve as a rotation axis.
pub const AXIS_EPSILON: f64 = 1e-12;

/// Maximum number of edges in a chain.
pub const MAX_CHAIN_EDGES: usize = 3;

/// A single oriented obstacle edge.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Edge {
    /// Left endpoint.
    pub left: Point3<f64>,
    /// Right endpoint.
    pub right: Point3<f64>,
}

impl Edge {
    /// Create an edge from its left and right endpoints.
    #[must_use]
    pub const fn new(left: Point3<f64>, right: Point3<f64>) -> Self {
        Self { left, right }
    }

    /// The same segment with opposite orientation.
    #[must_use]
    pub const fn reversed(&self) -> Self {
        Self {
            left: self.right,
            right: self.left,
        }
    }

    /// Vector from left to right.
    #[must_use]
    pub fn direction(&self) -> Vector3<f64> {
        self.right - self.left
    }

    /// Segment length.
    #[must_use]
    pub fn length(&self) -> f64 {
        self.direction().norm()
    }

    /// Unit direction from left to right.
    ///
    /// # Errors
    ///
    /// Returns [`CableError::DegenerateAxis`] when both endpoints coincide.
    pub fn axis(&self) -> CableResult<Unit<Vector3<f64>>> {
        let direction = self.direction();
        Unit::try_new(direction, AXIS_EPSILON)
            .ok_or_else(|| CableError::degenerate_axis(direction.norm()))
    }

    /// Point at `ratio` along the edge (0 = left, 1 = right).
    #[must_use]
    pub fn point_at(&self, ratio: f64) -> Point3<f64> {
        self.left + self.direction() * ratio
    }

    /// Distance from `point` to the closest point of the segment.
    #[must_use]
    pub fn distance_to(&self, point: &Point3<f64>) -> f64 {
        let direction = self.direction();
        let length_sq = direction.norm_squared();
        if length_sq < AXIS_EPSILON * AXIS_EPSILON {
            return (point - self.left).norm();
        }
        let ratio = ((point - self.left).dot(&direction) / length_sq).clamp(0.0, 1.0);
        (point - self.point_at(ratio)).norm()
    }

    /// Whether `point` is one of the two endpoints.
    #[must_use]
    pub fn has_endpoint(&self, point: &Point3<f64>) -> bool {
        self.left == *point || self.right == *point
    }

    /// Number of endpoints shared with `other`.
    #[must_use]
    pub fn shared_endpoints(&self, other: &Self) -> usize {
        usize::from(other.has_endpoint(&self.left)) + usize::from(other.has_endpoint(&self.right))
    }

    /// The endpoint of `self` that `other` does not touch.
    ///
    /// For two edges sharing exactly one endpoint this is the private end of
    /// `self`; otherwise the right endpoint is returned.
    #[must_use]
    pub fn far_endpoint(&self, other: &Self) -> Point3<f64> {
        if other.has_endpoint(&self.right) {
            self.left
        } else {
            self.right
        }
    }
}

/// Which corner two consecutive edges of a pair or triple have in common.
///
/// Chains are built from 3 (pair) or 4 (triple) corner points numbered from 1.
/// The first edge always runs from the first to the last corner; the shared
/// corner decides where the next edge attaches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SharedCorner {
    /// Corner 1 is shared.
    First,
    /// The last corner (3 for a pair, 4 for a triple) is shared.
    Last,
}

impl SharedCorner {
    /// Interpret a 1-based corner index for a chain of `points` corners.
    ///
    /// Valid inputs are 1 or 3 for a pair (`points == 3`) and 1 or 4 for a
    /// triple (`points == 4`).
    ///
    /// # Errors
    ///
    /// Returns [`CableError::InvalidSharedVertex`] for any other combination.
    pub const fn from_index(index: usize, points: usize) -> CableResult<Self> {
        match (index, points) {
            (1, 3 | 4) => Ok(Self::First),
            (3, 3) | (4, 4) => Ok(Self::Last),
            _ => Err(CableError::invalid_shared_vertex(index, points)),
        }
    }

    /// The 1-based corner index for a chain of `points` corners.
    #[must_use]
    pub const fn index(self, points: usize) -> usize {
        match self {
            Self::First => 1,
            Self::Last => points,
        }
    }
}

/// One to three edges sharing endpoints consecutively.
///
/// Edge `i` and edge `i + 1` share exactly one endpoint. Edges are ordered
/// from the anchor side to the end-effector side of the cable.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EdgeChain {
    edges: SmallVec<[Edge; MAX_CHAIN_EDGES]>,
}

impl EdgeChain {
    /// Build a chain from explicit edges.
    ///
    /// # Errors
    ///
    /// Returns [`CableError::InvalidChainLength`] for zero or more than three
    /// edges, and [`CableError::DisconnectedChain`] when two consecutive edges
    /// do not share exactly one endpoint.
    pub fn new(edges: impl IntoIterator<Item = Edge>) -> CableResult<Self> {
        let edges: SmallVec<[Edge; MAX_CHAIN_EDGES]> = edges.into_iter().collect();
        if edges.is_empty() || edges.len() > MAX_CHAIN_EDGES {
            return Err(CableError::invalid_chain_length(edges.len()));
        }
        for (index, pair) in edges.windows(2).enumerate() {
            if pair[0].shared_endpoints(&pair[1]) != 1 {
                return Err(CableError::disconnected_chain(index));
            }
        }
        Ok(Self { edges })
    }

    /// A chain with a single edge.
    #[must_use]
    pub fn single(left: Point3<f64>, right: Point3<f64>) -> Self {
        let mut edges = SmallVec::new();
        edges.push(Edge::new(left, right));
        Self { edges }
    }

    /// Two edges spanned by three corners.
    ///
    /// Edge 0 runs `c1 → c3`. Edge 1 runs `c1 → c2` when the first corner is
    /// shared and `c2 → c3` when the last corner is shared, so `c2` is always
    /// the private end of edge 1.
    #[must_use]
    pub fn pair(c1: Point3<f64>, c2: Point3<f64>, c3: Point3<f64>, shared: SharedCorner) -> Self {
        let second = match shared {
            SharedCorner::First => Edge::new(c1, c2),
            SharedCorner::Last => Edge::new(c2, c3),
        };
        Self {
            edges: SmallVec::from_slice(&[Edge::new(c1, c3), second]),
        }
    }

    /// Three edges spanned by four corners.
    ///
    /// Edge 0 runs `c1 → c4` and edge 2 runs `c2 → c3`. The middle edge runs
    /// `c2 → c4` when the last corner is shared and `c1 → c3` when the first
    /// corner is shared.
    #[must_use]
    pub fn triple(
        c1: Point3<f64>,
        c2: Point3<f64>,
        c3: Point3<f64>,
        c4: Point3<f64>,
        shared: SharedCorner,
    ) -> Self {
        let middle = match shared {
            SharedCorner::Last => Edge::new(c2, c4),
            SharedCorner::First => Edge::new(c1, c3),
        };
        Self {
            edges: SmallVec::from_slice(&[Edge::new(c1, c4), middle, Edge::new(c2, c3)]),
        }
    }

    /// The edges in cable order.
    #[must_use]
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Number of edges.
    #[must_use]
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    /// Always false for a validly constructed chain.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Edge at `index`.
    #[must_use]
    pub fn edge(&self, index: usize) -> Option<&Edge> {
        self.edges.get(index)
    }

    /// Contiguous sub-chain `start..end`.
    ///
    /// # Errors
    ///
    /// Returns [`CableError::InvalidChainLength`] for an empty or out-of-range
    /// selection.
    pub fn sub_chain(&self, start: usize, end: usize) -> CableResult<Self> {
        let slice = self
            .edges
            .get(start..end)
            .ok_or_else(|| CableError::invalid_chain_length(end.saturating_sub(start)))?;
        Self::new(slice.iter().copied())
    }

    /// Private end of the edge before `index`, seen from edge `index`.
    ///
    /// This is the third corner of the facet between edges `index - 1` and
    /// `index`. `None` for the first edge.
    #[must_use]
    pub fn entry_vertex(&self, index: usize) -> Option<Point3<f64>> {
        let previous = self.edges.get(index.checked_sub(1)?)?;
        let current = self.edges.get(index)?;
        Some(previous.far_endpoint(current))
    }

    /// Private end of the edge after `index`, seen from edge `index`.
    ///
    /// This is the third corner of the facet between edges `index` and
    /// `index + 1`. `None` for the last edge.
    #[must_use]
    pub fn exit_vertex(&self, index: usize) -> Option<Point3<f64>> {
        let current = self.edges.get(index)?;
        let next = self.edges.get(index + 1)?;
        Some(next.far_endpoint(current))
    }
}
