//! Wrench-feasibility margin of cable-driven platforms.
//!
//! Given the unit pull directions of `n` cables at an end-effector pose,
//! tension limits and the platform's weight, this crate decides whether some
//! admissible tension assignment balances the load, and how much slack the
//! tightest constraint leaves. The method is hyperplane shifting over the
//! facets spanned by each pair of cable directions (see [`shifting`]).
//!
//! # Example
//!
//! ```
//! use cable_wrench::{FeasibilityParams, analyze_wrench, direction_matrix};
//! use nalgebra::Point3;
//!
//! let platform = Point3::new(0.0, 0.0, 0.0);
//! let anchors = [
//!     Point3::new(1.0, 1.0, 1.0),
//!     Point3::new(-1.0, 1.0, 1.0),
//!     Point3::new(-1.0, -1.0, 1.0),
//!     Point3::new(1.0, -1.0, 1.0),
//! ];
//!
//! let directions = direction_matrix(&platform, &anchors)?;
//! let analysis = analyze_wrench(&directions, &FeasibilityParams::default())?;
//! assert!(analysis.is_feasible());
//! assert_eq!(analysis.facets.len(), 6);
//! # Ok::<(), cable_wrench::WrenchError>(())
//! ```
//!
//! # Feature Flags
//!
//! - `serde`: Enables serialization/deserialization for parameters and reports

#![doc(html_root_url = "https://docs.rs/cable-wrench/0.7.0")]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used, clippy::expect_used)]

pub mod error;
pub mod matrix;
pub mod params;
pub mod shifting;

pub use error::{WrenchError, WrenchResult};
pub use matrix::direction_matrix;
pub use params::FeasibilityParams;
pub use shifting::{
    Facet, INFEASIBLE_MARGIN, PARALLEL_EPSILON, WrenchAnalysis, analyze_wrench,
    hyperplane_shifting_margin, pair_count, pair_index,
};
