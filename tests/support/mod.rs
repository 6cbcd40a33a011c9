//! Test support library
//! Provides various helper functions & utilities for tests.

#![allow(dead_code)]

use nalgebra::{Point3, Vector3};
use solidbsp::float_types::Real;
use solidbsp::shapes::TriangleMesh;
use solidbsp::{SplittingCriteria, Tree, Vertex};

/// Quick helper to compare floating-point results with an acceptable tolerance.
pub fn approx_eq(a: Real, b: Real, eps: Real) -> bool {
    (a - b).abs() < eps
}

/// A vertex at `(x, y, z)` with an arbitrary +z normal; splitting only looks
/// at positions.
pub fn vertex(x: Real, y: Real, z: Real) -> Vertex {
    Vertex::new(Point3::new(x, y, z), Vector3::z())
}

/// The unit square in the z = 0 plane, counterclockwise seen from +z.
pub fn unit_square() -> Vec<Vertex> {
    vec![
        vertex(0.0, 0.0, 0.0),
        vertex(1.0, 0.0, 0.0),
        vertex(1.0, 1.0, 0.0),
        vertex(0.0, 1.0, 0.0),
    ]
}

/// Build a tree with default criteria, panicking on failure.
pub fn build(mesh: &TriangleMesh) -> Tree {
    Tree::build(mesh, &SplittingCriteria::default()).expect("tree build failed")
}
