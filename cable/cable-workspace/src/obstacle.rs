//! Obstacles and the straight-cable collision gate.

// Sample counts are small; the usize -> f64 casts are exact.
#![allow(clippy::cast_precision_loss)]

use nalgebra::Point3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A solid the cables must not pass through.
pub trait Obstacle: Send + Sync {
    /// Whether `point` lies strictly inside the solid.
    fn contains(&self, point: &Point3<f64>) -> bool;
}

/// A rectangular block standing on `z = 0`, topped by a pyramid roof.
///
/// The walls rise to `wall_height`; above that the cross-section shrinks
/// linearly to a point at `apex_height` over the block's center.
///
/// ```text
///            apex
///            /\
///           /  \
///          /    \   wall_height
///         |      |
///         |      |
///   ──────┴──────┴────── z = 0
///        -hx     +hx
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RoofedBox {
    /// Half extent along x.
    pub half_x: f64,
    /// Half extent along y.
    pub half_y: f64,
    /// Height of the vertical walls.
    pub wall_height: f64,
    /// Height of the roof apex.
    pub apex_height: f64,
}

impl Default for RoofedBox {
    fn default() -> Self {
        Self {
            half_x: 0.113,
            half_y: 0.1125,
            wall_height: 0.172,
            apex_height: 0.337,
        }
    }
}

impl RoofedBox {
    /// Create a roofed box.
    #[must_use]
    pub const fn new(half_x: f64, half_y: f64, wall_height: f64, apex_height: f64) -> Self {
        Self {
            half_x,
            half_y,
            wall_height,
            apex_height,
        }
    }

    /// Roof apex.
    #[must_use]
    pub const fn apex(&self) -> Point3<f64> {
        Point3::new(0.0, 0.0, self.apex_height)
    }

    /// Corners at the top of the walls, counter-clockwise from `(+x, +y)`.
    #[must_use]
    pub const fn wall_corners(&self) -> [Point3<f64>; 4] {
        self.ring(self.wall_height)
    }

    /// Corners on the ground, counter-clockwise from `(+x, +y)`.
    #[must_use]
    pub const fn base_corners(&self) -> [Point3<f64>; 4] {
        self.ring(0.0)
    }

    const fn ring(&self, z: f64) -> [Point3<f64>; 4] {
        let (x, y) = (self.half_x, self.half_y);
        [
            Point3::new(x, y, z),
            Point3::new(-x, y, z),
            Point3::new(-x, -y, z),
            Point3::new(x, -y, z),
        ]
    }
}

impl Obstacle for RoofedBox {
    fn contains(&self, point: &Point3<f64>) -> bool {
        if point.z <= 0.0 || point.z >= self.apex_height {
            return false;
        }
        let scale = if point.z < self.wall_height {
            1.0
        } else {
            (self.apex_height - point.z) / (self.apex_height - self.wall_height)
        };
        point.x.abs() < self.half_x * scale && point.y.abs() < self.half_y * scale
    }
}

/// Whether the straight segment `from → to` enters `obstacle`.
///
/// Tests `samples` evenly spaced points, including `from` and excluding `to`.
#[must_use]
pub fn segment_collides<O: Obstacle + ?Sized>(
    obstacle: &O,
    from: &Point3<f64>,
    to: &Point3<f64>,
    samples: usize,
) -> bool {
    let step = to - from;
    (0..samples).any(|i| obstacle.contains(&(from + step * (i as f64 / samples as f64))))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_walls_and_roof() {
        let housing = RoofedBox::new(1.0, 0.5, 1.0, 2.0);

        assert!(housing.contains(&Point3::new(0.9, 0.4, 0.5)));
        assert!(!housing.contains(&Point3::new(1.1, 0.0, 0.5)));
        assert!(!housing.contains(&Point3::new(0.0, 0.6, 0.5)));
        assert!(!housing.contains(&Point3::new(0.0, 0.0, -0.1)));

        // Halfway up the roof the footprint is halved
        assert!(housing.contains(&Point3::new(0.4, 0.2, 1.5)));
        assert!(!housing.contains(&Point3::new(0.6, 0.0, 1.5)));
        assert!(!housing.contains(&Point3::new(0.0, 0.3, 1.5)));
        assert!(!housing.contains(&Point3::new(0.0, 0.0, 2.0)));
    }

    #[test]
    fn test_flat_roof() {
        let block = RoofedBox::new(1.0, 1.0, 1.0, 1.0);
        assert!(block.contains(&Point3::new(0.0, 0.0, 0.99)));
        assert!(!block.contains(&Point3::new(0.0, 0.0, 1.0)));
    }

    #[test]
    fn test_default_corners() {
        let housing = RoofedBox::default();
        let walls = housing.wall_corners();
        assert!((walls[0].x - 0.113).abs() < 1e-12);
        assert!((walls[1].x + 0.113).abs() < 1e-12);
        assert!((walls[2].y + 0.1125).abs() < 1e-12);
        assert!((housing.apex().z - 0.337).abs() < 1e-12);
        assert!(housing.base_corners().iter().all(|c| c.z == 0.0));
    }

    #[test]
    fn test_segment_collides() {
        let housing = RoofedBox::new(1.0, 1.0, 1.0, 2.0);
        let outside = Point3::new(-3.0, 0.0, 0.5);

        assert!(segment_collides(&housing, &outside, &Point3::new(3.0, 0.0, 0.5), 100));
        assert!(!segment_collides(&housing, &outside, &Point3::new(-3.0, 3.0, 0.5), 100));

        // Over the roof
        assert!(!segment_collides(
            &housing,
            &Point3::new(-3.0, 0.0, 2.5),
            &Point3::new(3.0, 0.0, 2.5),
            100
        ));
        assert!(!segment_collides(&housing, &outside, &Point3::new(3.0, 0.0, 0.5), 0));
    }

    #[test]
    fn test_segment_excludes_far_end() {
        let housing = RoofedBox::new(1.0, 1.0, 1.0, 2.0);
        let inside = Point3::new(0.0, 0.0, 0.5);
        let outside = Point3::new(0.0, 0.0, 5.0);

        // One sample checks only the start point
        assert!(!segment_collides(&housing, &outside, &inside, 1));
        assert!(segment_collides(&housing, &inside, &outside, 1));
    }
}
