//! Solid-leaf [BSP](https://en.wikipedia.org/wiki/Binary_space_partitioning)
//! tree storage: planes, nodes and faces held in index-addressed arenas.
//!
//! All cross-references are dense 16-bit indices into the owning [`Tree`]'s
//! three arenas, never addresses, so a tree is a plain value: it can be
//! cloned, kept as an undo copy, or have subtrees grafted across tree
//! boundaries with [`Tree::copy_subtree`] (which re-interns planes and
//! re-adds faces on the way over). Growth is append-only: CSG edits add
//! planes, nodes and faces but never compact or remove old entries.

pub mod build;
pub mod csg;
pub mod query;
pub mod triangulate;

use crate::errors::BspError;
use crate::float_types::{DIST_EPSILON, NORMAL_EPSILON, Real};
use crate::plane::Plane;
use crate::vertex::Vertex;
use nalgebra::Vector3;

/// Capacity of each arena: indices must fit in 16 bits.
pub const MAX_ARENA_ENTRIES: usize = u16::MAX as usize;

/// Index into a tree's plane arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaneId(u16);

/// Index into a tree's node arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeId(u16);

/// Index into a tree's face arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FaceId(u16);

impl PlaneId {
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl NodeId {
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl FaceId {
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// A child slot of an internal node: another node, or one of the two leaf
/// kinds. Leaves are sentinel values, not arena entries; each stands for a
/// whole region of space that is entirely solid or entirely empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeRef {
    Node(NodeId),
    Solid,
    Empty,
}

impl NodeRef {
    /// The root node. Node 0 is always the root of a built tree.
    pub const ROOT: NodeRef = NodeRef::Node(NodeId(0));

    pub const fn is_leaf(self) -> bool {
        !matches!(self, NodeRef::Node(_))
    }

    pub const fn is_solid(self) -> bool {
        matches!(self, NodeRef::Solid)
    }

    /// Leaf tags traded, internal references untouched.
    const fn complemented(self) -> NodeRef {
        match self {
            NodeRef::Solid => NodeRef::Empty,
            NodeRef::Empty => NodeRef::Solid,
            NodeRef::Node(id) => NodeRef::Node(id),
        }
    }
}

/// An internal tree node: a splitting plane, two child regions, and the
/// polygons lying exactly on the plane.
#[derive(Debug, Clone)]
pub struct Node {
    /// Splitting plane, interned in the tree's plane arena
    pub plane: PlaneId,
    /// Region on the positive side of the plane
    pub front: NodeRef,
    /// Region on the negative side of the plane
    pub back: NodeRef,
    /// Head of the coplanar face list
    pub faces: Option<FaceId>,
}

/// A convex polygon stored in the face arena, linked into per-node lists
/// through the intrusive `next` index. `None` terminates a list.
#[derive(Debug, Clone)]
pub struct Face {
    pub vertices: Vec<Vertex>,
    pub next: Option<FaceId>,
}

/// A solid-leaf BSP tree owning three arenas.
///
/// Shared access suffices for the queries
/// ([`point_in_solid`](Tree::point_in_solid), [`cast_ray`](Tree::cast_ray),
/// [`generate_mesh`](Tree::generate_mesh)); the mutating operations
/// ([`build`](Tree::build), [`subtract`](Tree::subtract),
/// [`partition_node_with_plane`](Tree::partition_node_with_plane)) take
/// exclusive access and provide no internal synchronization.
#[derive(Debug, Clone, Default)]
pub struct Tree {
    planes: Vec<Plane>,
    nodes: Vec<Node>,
    faces: Vec<Face>,
}

impl Tree {
    /// The root reference of a built tree.
    pub const fn root(&self) -> NodeRef {
        NodeRef::ROOT
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    pub fn plane(&self, id: PlaneId) -> &Plane {
        &self.planes[id.index()]
    }

    pub fn face(&self, id: FaceId) -> &Face {
        &self.faces[id.index()]
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn plane_count(&self) -> usize {
        self.planes.len()
    }

    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Number of faces in the list starting at `head`.
    pub fn face_list_len(&self, head: Option<FaceId>) -> usize {
        let mut count = 0;
        let mut cursor = head;
        while let Some(id) = cursor {
            count += 1;
            cursor = self.faces[id.index()].next;
        }
        count
    }

    /// Find an existing plane within the interning tolerance bands, or add
    /// the plane to the arena.
    pub(crate) fn intern_plane(&mut self, plane: Plane) -> Result<PlaneId, BspError> {
        for (index, existing) in self.planes.iter().enumerate() {
            if existing.approx_eq(&plane, NORMAL_EPSILON, DIST_EPSILON) {
                return Ok(PlaneId(index as u16));
            }
        }
        if self.planes.len() >= MAX_ARENA_ENTRIES {
            return Err(BspError::CapacityExceeded { arena: "plane" });
        }
        let id = PlaneId(self.planes.len() as u16);
        self.planes.push(plane);
        Ok(id)
    }

    pub(crate) fn push_node(&mut self, node: Node) -> Result<NodeId, BspError> {
        if self.nodes.len() >= MAX_ARENA_ENTRIES {
            return Err(BspError::CapacityExceeded { arena: "node" });
        }
        let id = NodeId(self.nodes.len() as u16);
        self.nodes.push(node);
        Ok(id)
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.index()]
    }

    /// Append a new face and link it at the head of `head`'s list.
    pub(crate) fn push_face(
        &mut self,
        vertices: Vec<Vertex>,
        head: &mut Option<FaceId>,
    ) -> Result<FaceId, BspError> {
        if self.faces.len() >= MAX_ARENA_ENTRIES {
            return Err(BspError::CapacityExceeded { arena: "face" });
        }
        let id = FaceId(self.faces.len() as u16);
        self.faces.push(Face {
            vertices,
            next: *head,
        });
        *head = Some(id);
        Ok(id)
    }

    /// Move an existing face record to the head of another list. O(1): only
    /// the intrusive link changes, vertex data stays put.
    pub(crate) fn relink_face(&mut self, id: FaceId, head: &mut Option<FaceId>) {
        self.faces[id.index()].next = *head;
        *head = Some(id);
    }

    pub(crate) fn face_next(&self, id: FaceId) -> Option<FaceId> {
        self.faces[id.index()].next
    }

    /// Append `b` to the end of list `a`; either may be empty.
    pub(crate) fn concat_face_lists(
        &mut self,
        a: Option<FaceId>,
        b: Option<FaceId>,
    ) -> Option<FaceId> {
        let Some(head) = a else { return b };
        let mut tail = head;
        while let Some(next) = self.faces[tail.index()].next {
            tail = next;
        }
        self.faces[tail.index()].next = b;
        Some(head)
    }

    /// Deep-copy the subtree of `src` rooted at `node` into this tree,
    /// re-interning its planes and re-adding its faces. Leaf tags are
    /// returned unchanged.
    pub fn copy_subtree(&mut self, src: &Tree, node: NodeRef) -> Result<NodeRef, BspError> {
        let NodeRef::Node(src_id) = node else {
            return Ok(node);
        };
        let src_node = src.node(src_id);
        let (src_front, src_back) = (src_node.front, src_node.back);
        let plane = self.intern_plane(*src.plane(src_node.plane))?;

        let mut faces = None;
        let mut cursor = src_node.faces;
        while let Some(face_id) = cursor {
            let face = src.face(face_id);
            cursor = face.next;
            let vertices = face.vertices.clone();
            self.push_face(vertices, &mut faces)?;
        }

        let front = self.copy_subtree(src, src_front)?;
        let back = self.copy_subtree(src, src_back)?;
        let id = self.push_node(Node {
            plane,
            front,
            back,
            faces,
        })?;
        Ok(NodeRef::Node(id))
    }

    /// Complement the solid: every solid leaf becomes empty and vice versa,
    /// and all faces flip so the surface keeps facing the solid's outside.
    pub fn invert(&mut self) {
        for node in &mut self.nodes {
            node.front = node.front.complemented();
            node.back = node.back.complemented();
        }
        for face in &mut self.faces {
            face.vertices.reverse();
            for vertex in &mut face.vertices {
                vertex.flip();
            }
        }
    }

    /// Return the complemented tree.
    pub fn inverted(&self) -> Tree {
        let mut tree = self.clone();
        tree.invert();
        tree
    }

    /// Translate the whole tree by `offset`: every face vertex moves, and
    /// every plane distance shifts by the offset's projection on its normal.
    pub fn translate(&mut self, offset: Vector3<Real>) {
        for plane in &mut self.planes {
            plane.w += plane.normal.dot(&offset);
        }
        for face in &mut self.faces {
            for vertex in &mut face.vertices {
                vertex.pos += offset;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{NodeRef, Tree};
    use crate::plane::Plane;
    use nalgebra::Vector3;

    #[test]
    fn plane_interning_reuses_within_tolerance() {
        let mut tree = Tree::default();
        let a = tree
            .intern_plane(Plane::from_normal(Vector3::y(), 1.0))
            .unwrap();
        let b = tree
            .intern_plane(Plane::from_normal(Vector3::y(), 1.005))
            .unwrap();
        let c = tree
            .intern_plane(Plane::from_normal(Vector3::y(), 1.5))
            .unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(tree.plane_count(), 2);
    }

    #[test]
    fn leaf_tags_complement() {
        assert_eq!(NodeRef::Solid.complemented(), NodeRef::Empty);
        assert_eq!(NodeRef::Empty.complemented(), NodeRef::Solid);
        assert!(NodeRef::Solid.is_leaf());
        assert!(!NodeRef::ROOT.is_leaf());
    }
}
