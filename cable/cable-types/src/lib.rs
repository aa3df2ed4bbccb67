//! Core types for routing cables over polyhedral obstacles.
//!
//! A cable runs in a straight line from an anchor to an end effector unless
//! an obstacle is in the way. When it is, the cable wraps over one or more
//! obstacle edges and bends at one point per touched edge. This crate holds
//! the vocabulary shared by the router, the wrench analysis and the workspace
//! sampler:
//!
//! - **Edges**: oriented obstacle edges ([`Edge`]) and chains of one to three
//!   consecutive edges ([`EdgeChain`], [`SharedCorner`])
//! - **Results**: which edges are touched ([`CollisionPattern`]) and where the
//!   cable bends ([`Separation`])
//! - **Configuration**: intersection tolerances ([`RouterConfig`])
//!
//! # Example
//!
//! ```
//! use cable_types::{EdgeChain, Point3, Separation, SharedCorner};
//!
//! let chain = EdgeChain::pair(
//!     Point3::new(-1.0, 1.0, 1.0),
//!     Point3::new(1.0, -1.0, 1.0),
//!     Point3::new(1.0, 1.0, 1.0),
//!     SharedCorner::Last,
//! );
//! assert_eq!(chain.len(), 2);
//!
//! let straight = Separation::free();
//! let a = Point3::new(0.0, 0.0, 0.0);
//! let b = Point3::new(0.0, 0.0, 2.0);
//! assert!((straight.length(&a, &b) - 2.0).abs() < 1e-12);
//! ```
//!
//! # Feature Flags
//!
//! - `serde`: Enables serialization/deserialization for all types

#![doc(html_root_url = "https://docs.rs/cable-types/0.7.0")]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used, clippy::expect_used)]

pub mod config;
pub mod edge;
pub mod error;
pub mod separation;

pub use config::RouterConfig;
pub use edge::{AXIS_EPSILON, Edge, EdgeChain, MAX_CHAIN_EDGES, SharedCorner};
pub use error::{CableError, CableResult};
pub use separation::{CollisionPattern, Separation, path_length};

// Re-export nalgebra types used throughout the API
pub use nalgebra::{Point3, Unit, Vector3};
