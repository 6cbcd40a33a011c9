//! Struct and functions for working with `Vertex`s from which `Face`s are composed.

use crate::float_types::Real;
use nalgebra::{Point3, Vector2, Vector3};

/// A vertex of a polygon, holding position and the shading attributes that
/// must survive clipping: normal, tangent, texture coordinate and a scalar
/// color channel.
///
/// The renderer this feeds packs normal/tangent into bytes and the texture
/// coordinate into 16-bit pairs; that packing is a GPU-layout concern and the
/// attributes are carried unpacked here.
#[derive(Debug, Clone, PartialEq)]
pub struct Vertex {
    pub pos: Point3<Real>,
    pub normal: Vector3<Real>,
    pub tangent: Vector3<Real>,
    pub uv: Vector2<Real>,
    pub color: Real,
}

impl Vertex {
    /// Create a new [`Vertex`] with zeroed tangent, texture coordinate and color.
    ///
    /// * `pos`    – the position in model space
    /// * `normal` – (optionally non-unit) normal; it will be **copied
    ///   verbatim**, so make sure it is oriented the way you need it for
    ///   lighting / BSP tests.
    pub fn new(pos: Point3<Real>, normal: Vector3<Real>) -> Self {
        Vertex {
            pos,
            normal,
            tangent: Vector3::zeros(),
            uv: Vector2::zeros(),
            color: 0.0,
        }
    }

    /// Create a new [`Vertex`] carrying the full attribute set.
    pub const fn with_attributes(
        pos: Point3<Real>,
        normal: Vector3<Real>,
        tangent: Vector3<Real>,
        uv: Vector2<Real>,
        color: Real,
    ) -> Self {
        Vertex {
            pos,
            normal,
            tangent,
            uv,
            color,
        }
    }

    /// Flip vertex normal
    pub fn flip(&mut self) {
        self.normal = -self.normal;
    }

    /// Return the barycentric linear interpolation between `self` (`t = 0`)
    /// and `other` (`t = 1`).
    ///
    /// Every carried attribute is interpolated as well, so clipping keeps the
    /// surface shading continuous across the cut.
    pub fn interpolate(&self, other: &Vertex, t: Real) -> Vertex {
        Vertex {
            pos: self.pos + (other.pos - self.pos) * t,
            normal: self.normal + (other.normal - self.normal) * t,
            tangent: self.tangent + (other.tangent - self.tangent) * t,
            uv: self.uv + (other.uv - self.uv) * t,
            color: self.color + (other.color - self.color) * t,
        }
    }
}
