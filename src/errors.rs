//! Failure modes of tree construction and CSG editing

use std::fmt::Display;

/// All the ways building or editing a tree can fail
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum BspError {
    /// (CapacityExceeded) An arena ran out of 16-bit index space
    CapacityExceeded { arena: &'static str },
    /// (DegenerateGeometry) Collinear points do not define a plane
    DegenerateGeometry,
    /// (EmptyMesh) The triangle source produced no usable triangles
    EmptyMesh,
}

impl Display for BspError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BspError::CapacityExceeded { arena } => write!(
                f,
                "(CapacityExceeded) The {} arena ran out of 16-bit index space",
                arena
            ),
            BspError::DegenerateGeometry => {
                write!(f, "(DegenerateGeometry) Collinear points do not define a plane")
            },
            BspError::EmptyMesh => {
                write!(f, "(EmptyMesh) The triangle source produced no usable triangles")
            },
        }
    }
}
