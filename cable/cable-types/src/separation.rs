//! Routing results: which edges a cable touches and where it bends.

use std::fmt;

use nalgebra::{Point3, Unit, Vector3};
use smallvec::SmallVec;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::edge::MAX_CHAIN_EDGES;

/// Which edges of a chain the cable wraps over.
///
/// Edge numbers are 1-based in labels to match how chains are usually drawn.
/// For a two-edge chain [`CollisionPattern::Edges12`] means "both".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum CollisionPattern {
    /// Straight cable, no contact.
    #[default]
    None,
    /// Contact with edge 1 only.
    Edge1,
    /// Contact with edge 2 only.
    Edge2,
    /// Contact with edge 3 only.
    Edge3,
    /// Contact with edges 1 and 2.
    Edges12,
    /// Contact with edges 2 and 3.
    Edges23,
    /// Contact with edges 1, 2 and 3.
    All,
}

impl CollisionPattern {
    /// Pattern for a contiguous run of `count` edges starting at 0-based
    /// index `first`.
    ///
    /// Returns `None` for runs that do not fit in a three-edge chain.
    #[must_use]
    pub const fn from_span(first: usize, count: usize) -> Option<Self> {
        match (first, count) {
            (_, 0) => Some(Self::None),
            (0, 1) => Some(Self::Edge1),
            (1, 1) => Some(Self::Edge2),
            (2, 1) => Some(Self::Edge3),
            (0, 2) => Some(Self::Edges12),
            (1, 2) => Some(Self::Edges23),
            (0, 3) => Some(Self::All),
            _ => None,
        }
    }

    /// First touched edge (0-based) and number of touched edges.
    ///
    /// `None` for [`CollisionPattern::None`].
    #[must_use]
    pub const fn span(self) -> Option<(usize, usize)> {
        match self {
            Self::None => None,
            Self::Edge1 => Some((0, 1)),
            Self::Edge2 => Some((1, 1)),
            Self::Edge3 => Some((2, 1)),
            Self::Edges12 => Some((0, 2)),
            Self::Edges23 => Some((1, 2)),
            Self::All => Some((0, 3)),
        }
    }

    /// Number of bend points a separation with this pattern carries.
    #[must_use]
    pub const fn bend_count(self) -> usize {
        match self.span() {
            Some((_, count)) => count,
            None => 0,
        }
    }

    /// Whether the cable runs straight.
    #[must_use]
    pub const fn is_free(self) -> bool {
        matches!(self, Self::None)
    }

    /// Whether the 0-based edge `index` is touched.
    #[must_use]
    pub const fn touches(self, index: usize) -> bool {
        match self.span() {
            Some((first, count)) => index >= first && index < first + count,
            None => false,
        }
    }

    /// The same run of edges moved `offset` positions along a longer chain.
    ///
    /// Used when a sub-chain result is reported against its parent chain.
    #[must_use]
    pub const fn shifted(self, offset: usize) -> Option<Self> {
        match self.span() {
            Some((first, count)) => Self::from_span(first + offset, count),
            None => Some(Self::None),
        }
    }

    /// Short label: `none`, `1`, `2`, `3`, `1&2`, `2&3` or `all`.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Edge1 => "1",
            Self::Edge2 => "2",
            Self::Edge3 => "3",
            Self::Edges12 => "1&2",
            Self::Edges23 => "2&3",
            Self::All => "all",
        }
    }
}

impl fmt::Display for CollisionPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Where a cable bends over an edge chain.
///
/// The number of bend points always equals the number of touched edges, and
/// bends are ordered from the anchor toward the end effector.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Separation {
    bends: SmallVec<[Point3<f64>; MAX_CHAIN_EDGES]>,
    pattern: CollisionPattern,
}

impl Separation {
    /// Straight cable.
    #[must_use]
    pub fn free() -> Self {
        Self::default()
    }

    /// Contact with consecutive edges starting at 0-based index `first`,
    /// one bend point per edge.
    ///
    /// Returns `None` when the run does not fit a three-edge chain.
    #[must_use]
    pub fn contact(first: usize, bends: impl IntoIterator<Item = Point3<f64>>) -> Option<Self> {
        let bends: SmallVec<[Point3<f64>; MAX_CHAIN_EDGES]> = bends.into_iter().collect();
        let pattern = CollisionPattern::from_span(first, bends.len())?;
        Some(Self { bends, pattern })
    }

    /// Bend points in cable order.
    #[must_use]
    pub fn bends(&self) -> &[Point3<f64>] {
        &self.bends
    }

    /// Touched edges.
    #[must_use]
    pub const fn pattern(&self) -> CollisionPattern {
        self.pattern
    }

    /// Whether the cable runs straight.
    #[must_use]
    pub const fn is_free(&self) -> bool {
        self.pattern.is_free()
    }

    /// Report this result against a chain whose edges start `offset`
    /// positions earlier.
    #[must_use]
    pub fn shifted(self, offset: usize) -> Option<Self> {
        let pattern = self.pattern.shifted(offset)?;
        Some(Self {
            bends: self.bends,
            pattern,
        })
    }

    /// Anchor, bends, then end effector.
    pub fn waypoints<'a>(
        &'a self,
        anchor: &'a Point3<f64>,
        end: &'a Point3<f64>,
    ) -> impl Iterator<Item = &'a Point3<f64>> + 'a {
        std::iter::once(anchor)
            .chain(self.bends.iter())
            .chain(std::iter::once(end))
    }

    /// Total cable length through all bend points.
    #[must_use]
    pub fn length(&self, anchor: &Point3<f64>, end: &Point3<f64>) -> f64 {
        path_length(anchor, &self.bends, end)
    }

    /// The point the cable leaves toward the end effector: the last bend, or
    /// the anchor for a straight cable.
    #[must_use]
    pub fn exit_point(&self, anchor: &Point3<f64>) -> Point3<f64> {
        self.bends.last().copied().unwrap_or(*anchor)
    }

    /// Unit direction of the cable pull at the end effector.
    ///
    /// Points from `end` toward [`Separation::exit_point`]. `None` when the
    /// two coincide.
    #[must_use]
    pub fn exit_direction(
        &self,
        anchor: &Point3<f64>,
        end: &Point3<f64>,
    ) -> Option<Unit<Vector3<f64>>> {
        Unit::try_new(self.exit_point(anchor) - end, f64::EPSILON)
    }
}

/// Length of the polyline `anchor → bends… → end`.
#[must_use]
pub fn path_length(anchor: &Point3<f64>, bends: &[Point3<f64>], end: &Point3<f64>) -> f64 {
    let mut length = 0.0;
    let mut previous = anchor;
    for point in bends.iter().chain(std::iter::once(end)) {
        length += (point - previous).norm();
        previous = point;
    }
    length
}
