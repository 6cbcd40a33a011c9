//! Solid-leaf [BSP](https://en.wikipedia.org/wiki/Binary_space_partitioning)
//! trees over convex polygons: point-in-solid tests, ray casting, and CSG
//! boolean subtraction on triangle meshes.
//!
//! A [`Tree`] is built once from any [`TriangleSource`](traits::TriangleSource)
//! and then edited in place: [`Tree::subtract`] carves another solid out of
//! it, [`Tree::generate_mesh`] reads the surviving surface back out for
//! display. All storage lives in three index-addressed arenas inside the
//! tree, so trees are plain values that can be cloned and grafted into each
//! other.
//!
//! ```
//! use solidbsp::{shapes, SplittingCriteria, Tree};
//! use nalgebra::Point3;
//!
//! let world = shapes::box_mesh(20.0, 20.0, 20.0);
//! let mut tree = Tree::build(&world, &SplittingCriteria::default()).unwrap();
//! assert!(tree.point_in_solid(&Point3::origin(), 0.01));
//!
//! let brush = shapes::box_mesh(10.0, 10.0, 10.0);
//! let operand = Tree::build(&brush, &SplittingCriteria::default()).unwrap();
//! tree.subtract(&operand).unwrap();
//! assert!(!tree.point_in_solid(&Point3::origin(), 0.01));
//! ```
//!
//! # Features
//! - **f64** (default): use f64 as Real
//! - **f32**: use f32 as Real, conflicts with f64

#![forbid(unsafe_code)]
#![warn(clippy::missing_const_for_fn, clippy::approx_constant, clippy::all)]

pub mod bsp;
pub mod errors;
pub mod float_types;
pub mod plane;
pub mod shapes;
pub mod traits;
pub mod vertex;

#[cfg(any(all(feature = "f64", feature = "f32"), not(any(feature = "f64", feature = "f32"))))]
compile_error!("Either 'f64' or 'f32' feature must be specified, but not both");

pub use bsp::build::{BuildStats, SplittingCriteria};
pub use bsp::query::RayHit;
pub use bsp::triangulate::MeshBuffers;
pub use bsp::{FaceId, NodeId, NodeRef, PlaneId, Tree};
pub use errors::BspError;
pub use plane::{FaceClass, Plane, PlaneSide, PolygonSplit};
pub use vertex::Vertex;
