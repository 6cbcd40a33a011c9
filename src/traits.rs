//! Abstractions at the crate boundary.

use crate::vertex::Vertex;

/// A source of triangles for [`Tree::build`](crate::Tree::build).
///
/// The tree builder makes no assumption about vertex/index buffer layout; it
/// only asks the source to visit every triangle once, as a triple of
/// [`Vertex`] values.
pub trait TriangleSource {
    fn visit_triangles<F>(&self, f: F)
    where
        F: FnMut([Vertex; 3]);
}
