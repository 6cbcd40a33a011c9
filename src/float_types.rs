//! Scalar precision selection and the tolerance constants used across the crate.

// Our Real scalar type:
#[cfg(feature = "f32")]
pub type Real = f32;
#[cfg(feature = "f64")]
pub type Real = f64;

/// Normal-component band inside which two plane normals count as the same
/// plane when interning into a tree's plane arena.
pub const NORMAL_EPSILON: Real = 1e-5;

/// Distance band for plane interning. Much looser than [`NORMAL_EPSILON`]:
/// a plane a hundredth of a unit away still partitions the same polygons.
pub const DIST_EPSILON: Real = 0.01;

/// Point-to-plane tolerance used when splitting polygons during tree
/// construction. Vertices inside the band stick to the plane instead of
/// spawning sliver fragments.
pub const SPLIT_EPSILON: Real = 0.01;

/// Tolerance for clipping surface polygons against an operand tree during
/// subtraction. Keeping fragments 1/32 of a unit off the clip planes avoids
/// degenerate slivers along the carved seam.
pub const SURFACE_CLIP_EPSILON: Real = 1.0 / 32.0;

/// Default upper bound of the ray interval searched by
/// [`cast_ray`](crate::Tree::cast_ray).
pub const MAX_RAY_DISTANCE: Real = 1e4;
