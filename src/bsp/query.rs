//! Point and ray queries against a built tree.

use crate::float_types::{MAX_RAY_DISTANCE, Real};
use crate::plane::PlaneSide;
use nalgebra::{Point3, Vector3};

use super::{NodeRef, Tree};

/// A solid hit reported by ray casting.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    /// Ray parameter at which the solid region begins
    pub t: Real,
    /// `origin + direction * t`
    pub position: Point3<Real>,
}

impl Tree {
    /// `true` when `point` lies in solid space.
    ///
    /// Descends from the root, front on the positive side of each plane and
    /// back otherwise; points within `epsilon` of a plane descend back, so
    /// boundary points count as solid.
    pub fn point_in_solid(&self, point: &Point3<Real>, epsilon: Real) -> bool {
        self.point_in_solid_from(self.root(), point, epsilon)
    }

    /// [`point_in_solid`](Tree::point_in_solid) starting at an arbitrary
    /// subtree, e.g. one half of a
    /// [`partition_node_with_plane`](Tree::partition_node_with_plane) result.
    pub fn point_in_solid_from(
        &self,
        start: NodeRef,
        point: &Point3<Real>,
        epsilon: Real,
    ) -> bool {
        let mut current = start;
        loop {
            match current {
                NodeRef::Solid => return true,
                NodeRef::Empty => return false,
                NodeRef::Node(id) => {
                    let node = self.node(id);
                    let plane = self.plane(node.plane);
                    current = match plane.classify_point(point, epsilon) {
                        PlaneSide::Front => node.front,
                        PlaneSide::Back | PlaneSide::On => node.back,
                    };
                },
            }
        }
    }

    /// Cast a ray from `origin` along `direction`, reporting the first entry
    /// into solid space within [`MAX_RAY_DISTANCE`].
    pub fn cast_ray(&self, origin: &Point3<Real>, direction: &Vector3<Real>) -> Option<RayHit> {
        self.cast_ray_bounded(origin, direction, 0.0, MAX_RAY_DISTANCE)
    }

    /// Cast a ray restricted to the parameter interval `[t_min, t_max]`.
    pub fn cast_ray_bounded(
        &self,
        origin: &Point3<Real>,
        direction: &Vector3<Real>,
        t_min: Real,
        t_max: Real,
    ) -> Option<RayHit> {
        self.cast_ray_node(self.root(), origin, direction, t_min, t_max)
            .map(|t| RayHit {
                t,
                position: origin + direction * t,
            })
    }

    /// Recursive interval march: visit the half-space containing the ray
    /// origin first over `[t_min, t]`, then the far side over `[t, t_max]`.
    /// Reaching a solid leaf is a hit at that visit's `t_min`.
    fn cast_ray_node(
        &self,
        node: NodeRef,
        origin: &Point3<Real>,
        direction: &Vector3<Real>,
        t_min: Real,
        t_max: Real,
    ) -> Option<Real> {
        let id = match node {
            NodeRef::Solid => return Some(t_min),
            NodeRef::Empty => return None,
            NodeRef::Node(id) => id,
        };

        let tree_node = self.node(id);
        let plane = self.plane(tree_node.plane);
        let distance = plane.signed_distance(origin);
        let denom = plane.normal.dot(direction);

        let (mut near, mut far) = if distance >= 0.0 {
            (tree_node.front, tree_node.back)
        } else {
            (tree_node.back, tree_node.front)
        };

        // a zero denominator means the ray parallels the plane; fall through
        // to visit only the side the origin lies on
        if denom != 0.0 {
            let t = -distance / denom;
            if (0.0..=t_max).contains(&t) {
                if t >= t_min {
                    if let Some(hit) = self.cast_ray_node(near, origin, direction, t_min, t) {
                        return Some(hit);
                    }
                    return self.cast_ray_node(far, origin, direction, t, t_max);
                }
                // the crossing is behind the interval: only the far side remains
                std::mem::swap(&mut near, &mut far);
            }
        }
        self.cast_ray_node(near, origin, direction, t_min, t_max)
    }
}
