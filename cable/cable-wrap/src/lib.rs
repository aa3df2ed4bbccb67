//! Cable wrap routing over polyhedral edges.
//!
//! Given a cable anchor, an end-effector point and a chain of one to three
//! obstacle edges, this crate decides which edges the taut cable touches and
//! where it bends. The method unfolds the facets around the chain into a
//! common plane by rotating them about the edges, intersects the straight
//! unfolded cable with the unfolded edges, and rotates the crossings back.
//!
//! # Layers
//!
//! - [`geometry`]: rotations, facet normals, segment intersection and the
//!   [`is_blocked`] pre-filter
//! - [`unfold`]: the progressive-rotation helper shared by every chain length
//! - [`route`]: layered checks and the per-length entry points
//!
//! # Example
//!
//! ```
//! use cable_types::{CollisionPattern, EdgeChain, Point3, RouterConfig, SharedCorner};
//! use cable_wrap::route_chain;
//!
//! let s = 2.0_f64.sqrt();
//! let corner = EdgeChain::pair(
//!     Point3::new(-1.0, 1.0, 1.0),
//!     Point3::new(1.0, -1.0, 1.0),
//!     Point3::new(1.0, 1.0, 1.0),
//!     SharedCorner::Last,
//! );
//! let a = Point3::new(-s, 2.0, 0.0);
//! let b = Point3::new(2.0, -s, 0.0);
//!
//! let sep = route_chain(&a, &b, &corner, &RouterConfig::default())?;
//! assert_eq!(sep.pattern(), CollisionPattern::Edges12);
//! assert!((sep.length(&a, &b) - (4.0 + s)).abs() < 1e-9);
//! # Ok::<(), cable_types::CableError>(())
//! ```

#![doc(html_root_url = "https://docs.rs/cable-wrap/0.7.0")]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used, clippy::expect_used)]

pub mod geometry;
pub mod route;
pub mod unfold;

pub use cable_types::path_length;
pub use geometry::{dihedral_angle, is_blocked, outward_normal, rotate_about, segment_intersection};
pub use route::{route_chain, route_over_one_edge, route_over_three_edges, route_over_two_edges};
pub use unfold::unfold_chain;
