//! Plane representation and classification/splitting of convex polygons.

use crate::errors::BspError;
use crate::float_types::{NORMAL_EPSILON, Real};
use crate::vertex::Vertex;
use nalgebra::{Point3, Vector3};

/// Which side of a plane a point lies on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaneSide {
    /// Strictly on the positive side of the normal
    Front,
    /// Strictly on the negative side of the normal
    Back,
    /// Within epsilon of the plane
    On,
}

/// Relation of a whole polygon to a splitting plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaceClass {
    /// No vertex behind the plane (some strictly in front)
    Front,
    /// No vertex in front of the plane (some strictly behind)
    Back,
    /// Every vertex within epsilon of the plane
    Coplanar,
    /// Vertices strictly on both sides
    Spanning,
}

/// Outcome of [`Plane::split_polygon`].
#[derive(Debug, Clone)]
pub enum PolygonSplit {
    /// The polygon lies entirely in front; no fragments were produced.
    Front,
    /// The polygon lies entirely behind; no fragments were produced.
    Back,
    /// Every vertex lies on the plane.
    OnPlane,
    /// The polygon straddles the plane and was cut into two loops, each with
    /// at least 3 vertices. The vertices created on crossing edges appear in
    /// both loops.
    Split { front: Vec<Vertex>, back: Vec<Vertex> },
}

/// A plane in 3D space: the point set `normal · p = w`, with unit `normal`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    /// Unit normal vector of the plane
    pub normal: Vector3<Real>,
    /// Distance from origin along the normal
    pub w: Real,
}

impl Plane {
    /// Create a new plane from a normal vector and distance.
    /// The normal will be normalized.
    pub fn from_normal(normal: Vector3<Real>, w: Real) -> Self {
        Plane {
            normal: normal.normalize(),
            w,
        }
    }

    /// Create a plane from three points, following the right-hand rule:
    /// counterclockwise winding faces front.
    ///
    /// Collinear (or coincident) points have no well-defined normal and
    /// produce `Err(DegenerateGeometry)` rather than NaNs.
    pub fn from_points(
        a: &Point3<Real>,
        b: &Point3<Real>,
        c: &Point3<Real>,
    ) -> Result<Self, BspError> {
        let normal = (b - a).cross(&(c - a));
        if normal.norm_squared() < NORMAL_EPSILON * NORMAL_EPSILON {
            return Err(BspError::DegenerateGeometry);
        }
        let normal = normal.normalize();
        Ok(Plane {
            normal,
            w: normal.dot(&b.coords),
        })
    }

    /// Signed distance of `point` from the plane, positive in front.
    pub fn signed_distance(&self, point: &Point3<Real>) -> Real {
        self.normal.dot(&point.coords) - self.w
    }

    /// Classify a point with the given thick-plane tolerance.
    pub fn classify_point(&self, point: &Point3<Real>, epsilon: Real) -> PlaneSide {
        let distance = self.signed_distance(point);
        if distance > epsilon {
            PlaneSide::Front
        } else if distance < -epsilon {
            PlaneSide::Back
        } else {
            PlaneSide::On
        }
    }

    /// Classify a whole polygon against the plane.
    ///
    /// Vertices within `epsilon` count for whichever side the rest of the
    /// polygon leans toward, so a polygon touching the plane with an edge is
    /// still `Front` or `Back`, not `Spanning`.
    pub fn classify_polygon(&self, vertices: &[Vertex], epsilon: Real) -> FaceClass {
        let mut front = 0usize;
        let mut back = 0usize;
        let mut on = 0usize;

        for vertex in vertices {
            match self.classify_point(&vertex.pos, epsilon) {
                PlaneSide::Front => front += 1,
                PlaneSide::Back => back += 1,
                PlaneSide::On => on += 1,
            }
        }

        if on == vertices.len() {
            FaceClass::Coplanar
        } else if back == 0 {
            FaceClass::Front
        } else if front == 0 {
            FaceClass::Back
        } else {
            FaceClass::Spanning
        }
    }

    /// Split a convex polygon with the plane.
    ///
    /// Walks the cyclic vertex loop once: vertices within `epsilon` of the
    /// plane go to both output loops, the rest to their own side, and every
    /// crossing edge contributes one interpolated vertex to both loops. The
    /// interpolation always starts from the front-side endpoint so the two
    /// fragments agree bit-for-bit on the shared vertex, and components of
    /// axis-aligned planes are snapped exactly to the plane distance to
    /// cancel round-off on axial cuts.
    ///
    /// The input must be convex and planar; that precondition is the caller's
    /// to uphold and is only `debug_assert`ed here.
    pub fn split_polygon(&self, vertices: &[Vertex], epsilon: Real) -> PolygonSplit {
        let count = vertices.len();
        let mut dists = Vec::with_capacity(count + 1);
        let mut sides = Vec::with_capacity(count + 1);
        let mut front_count = 0usize;
        let mut back_count = 0usize;
        let mut on_count = 0usize;

        // determine sides for each point
        for vertex in vertices {
            let dist = self.signed_distance(&vertex.pos);
            let side = if dist > epsilon {
                front_count += 1;
                PlaneSide::Front
            } else if dist < -epsilon {
                back_count += 1;
                PlaneSide::Back
            } else {
                on_count += 1;
                PlaneSide::On
            };
            dists.push(dist);
            sides.push(side);
        }
        sides.push(sides[0]);
        dists.push(dists[0]);

        if on_count == count {
            return PolygonSplit::OnPlane;
        }
        if front_count == 0 {
            return PolygonSplit::Back;
        }
        if back_count == 0 {
            return PolygonSplit::Front;
        }

        // Straddles the plane - we must clip.
        let mut front = Vec::with_capacity(count + 4);
        let mut back = Vec::with_capacity(count + 4);

        for i in 0..count {
            let vertex = &vertices[i];
            match sides[i] {
                PlaneSide::On => {
                    front.push(vertex.clone());
                    back.push(vertex.clone());
                    continue;
                },
                PlaneSide::Front => front.push(vertex.clone()),
                PlaneSide::Back => back.push(vertex.clone()),
            }

            if sides[i + 1] == PlaneSide::On || sides[i + 1] == sides[i] {
                continue;
            }

            // the edge to the next vertex crosses the plane
            let next = &vertices[(i + 1) % count];
            let mid = if sides[i] == PlaneSide::Front {
                self.edge_crossing(vertex, next, dists[i] / (dists[i] - dists[i + 1]))
            } else {
                self.edge_crossing(next, vertex, dists[i + 1] / (dists[i + 1] - dists[i]))
            };
            front.push(mid.clone());
            back.push(mid);
        }

        debug_assert!(front.len() >= 3 && back.len() >= 3);
        PolygonSplit::Split { front, back }
    }

    /// Interpolate the crossing vertex at parameter `t` from the front-side
    /// endpoint, snapping axis-aligned components to avoid round off error
    /// when possible.
    fn edge_crossing(&self, from: &Vertex, to: &Vertex, t: Real) -> Vertex {
        let mut mid = from.interpolate(to, t);
        for axis in 0..3 {
            if self.normal[axis] == 1.0 {
                mid.pos[axis] = self.w;
            } else if self.normal[axis] == -1.0 {
                mid.pos[axis] = -self.w;
            }
        }
        mid
    }

    /// Flip the plane in place so front and back trade places.
    pub fn flip(&mut self) {
        self.normal = -self.normal;
        self.w = -self.w;
    }

    /// Return the flipped plane.
    pub fn flipped(&self) -> Plane {
        Plane {
            normal: -self.normal,
            w: -self.w,
        }
    }

    /// `true` when the plane is exactly perpendicular to a coordinate axis.
    /// Axial splitting planes make cheaper queries and fewer numeric
    /// surprises, so splitter selection prefers them.
    pub fn is_axial(&self) -> bool {
        let zero_x = self.normal.x == 0.0;
        let zero_y = self.normal.y == 0.0;
        let zero_z = self.normal.z == 0.0;
        (zero_x && zero_y) || (zero_x && zero_z) || (zero_y && zero_z)
    }

    /// Component-wise comparison within separate normal and distance bands,
    /// the equality used for plane interning. Flipped planes do **not**
    /// compare equal.
    pub fn approx_eq(&self, other: &Plane, normal_epsilon: Real, dist_epsilon: Real) -> bool {
        if (self.w - other.w).abs() > dist_epsilon {
            return false;
        }
        (self.normal - other.normal).amax() <= normal_epsilon
    }
}
