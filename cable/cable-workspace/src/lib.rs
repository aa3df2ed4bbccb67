//! Workspace sampling of cable-driven platforms around obstacles.
//!
//! Combines the edge router of `cable-wrap` with the feasibility analysis of
//! `cable-wrench`: for every position of a regular grid, each cable is routed
//! around the obstacle, the direction it pulls the end effector in is taken
//! from its last bend (or its anchor), and the resulting wrench margin is
//! recorded.
//!
//! - [`Obstacle`] / [`RoofedBox`]: the solid the cables avoid
//! - [`CableRig`]: anchors plus the candidate edge chains of each cable
//! - [`sample_margin_grid`]: parallel evaluation into a [`MarginGrid`]
//! - [`MarginGrid::write_npy`]: export for plotting
//!
//! # Example
//!
//! ```
//! use cable_types::{EdgeChain, SharedCorner};
//! use cable_workspace::{CableRig, RoofedBox, SampleParams, sample_cell, CellMargin};
//! use nalgebra::Point3;
//!
//! let housing = RoofedBox::default();
//! let [c0, c1, _, _] = housing.wall_corners();
//! let rig = CableRig::square_frame(0.342, 0.727)
//!     .with_candidate(0, EdgeChain::pair(c1, c0, housing.apex(), SharedCorner::Last))?;
//!
//! let above = Point3::new(0.0, 0.0, 0.5);
//! let cell = sample_cell(&rig, &housing, &above, &SampleParams::default())?;
//! assert!(matches!(cell, CellMargin::Routed(m) if m > 0.0));
//! # Ok::<(), cable_workspace::WorkspaceError>(())
//! ```
//!
//! # Feature Flags
//!
//! - `serde`: Enables serialization/deserialization for obstacles, rigs,
//!   parameters and grids

#![doc(html_root_url = "https://docs.rs/cable-workspace/0.7.0")]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used, clippy::expect_used)]

pub mod error;
pub mod npy;
pub mod obstacle;
pub mod params;
pub mod rig;
pub mod sample;

pub use error::{WorkspaceError, WorkspaceResult};
pub use npy::{NPY_MAGIC, npy_header};
pub use obstacle::{Obstacle, RoofedBox, segment_collides};
pub use params::{GridSpec, SampleParams};
pub use rig::CableRig;
pub use sample::{BLOCKED_MARGIN, CellMargin, MarginGrid, sample_cell, sample_margin_grid};
