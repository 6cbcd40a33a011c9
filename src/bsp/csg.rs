//! CSG editing: partitioning subtrees with planes, clipping surface polygons
//! against another solid, and boolean subtraction.

use crate::errors::BspError;
use crate::float_types::{DIST_EPSILON, NORMAL_EPSILON, SPLIT_EPSILON, SURFACE_CLIP_EPSILON};
use crate::plane::{Plane, PolygonSplit};
use crate::vertex::Vertex;

use super::{FaceId, Node, NodeRef, Tree};

impl Tree {
    /// Split the subtree at `node` with `plane`, returning subtrees covering
    /// the front and back half-spaces.
    ///
    /// Leaves are returned unchanged on both sides: a leaf region extends to
    /// infinity past the partitioning boundary. A node whose own plane
    /// coincides with `plane` hands over its children directly (swapped when
    /// the normals oppose). Otherwise two nodes are allocated, both
    /// referencing the source node's plane, the coplanar faces are dealt to
    /// them (straddlers cut in two), and the partitioned children are rewired
    /// so each output covers exactly its half-space.
    ///
    /// Existing nodes and faces are never modified; the dealt faces are fresh
    /// copies. The source subtree therefore stays valid and can be
    /// partitioned again with a different plane.
    pub fn partition_node_with_plane(
        &mut self,
        plane: &Plane,
        node: NodeRef,
    ) -> Result<(NodeRef, NodeRef), BspError> {
        let NodeRef::Node(id) = node else {
            return Ok((node, node));
        };

        let source = self.node(id).clone();
        let node_plane = *self.plane(source.plane);

        if node_plane.approx_eq(plane, NORMAL_EPSILON, DIST_EPSILON) {
            return Ok((source.front, source.back));
        }
        if node_plane.approx_eq(&plane.flipped(), NORMAL_EPSILON, DIST_EPSILON) {
            return Ok((source.back, source.front));
        }

        // the general case: this node's plane crosses the partition plane
        let mut front_faces = None;
        let mut back_faces = None;
        let mut cursor = source.faces;
        while let Some(face_id) = cursor {
            cursor = self.face_next(face_id);
            let vertices = self.face(face_id).vertices.clone();
            let split = plane.split_polygon(&vertices, SPLIT_EPSILON);
            match split {
                PolygonSplit::Front => {
                    self.push_face(vertices, &mut front_faces)?;
                },
                PolygonSplit::Back => {
                    self.push_face(vertices, &mut back_faces)?;
                },
                PolygonSplit::OnPlane => {
                    // coplanar with the partition plane though the node plane
                    // is not; side with the half-space the face looks into
                    if faces_same_way(&vertices, plane) {
                        self.push_face(vertices, &mut front_faces)?;
                    } else {
                        self.push_face(vertices, &mut back_faces)?;
                    }
                },
                PolygonSplit::Split { front, back } => {
                    self.push_face(front, &mut front_faces)?;
                    self.push_face(back, &mut back_faces)?;
                },
            }
        }

        let (front_of_front, back_of_front) =
            self.partition_node_with_plane(plane, source.front)?;
        let (front_of_back, back_of_back) = self.partition_node_with_plane(plane, source.back)?;

        let new_front = self.push_node(Node {
            plane: source.plane,
            front: front_of_front,
            back: front_of_back,
            faces: front_faces,
        })?;
        let new_back = self.push_node(Node {
            plane: source.plane,
            front: back_of_front,
            back: back_of_back,
            faces: back_faces,
        })?;
        Ok((NodeRef::Node(new_front), NodeRef::Node(new_back)))
    }

    /// Carve `operand` out of this tree: afterwards a point is solid here
    /// exactly when it was solid before and is not inside `operand`.
    ///
    /// The merge works on scratch copies and commits by swap, so on error the
    /// tree is left exactly as it was. Two copies of the operand are
    /// consumed: one keeps the operand's own polarity and clips away the
    /// surface fragments that end up enclosed, the other is complemented and
    /// grafted into every solid leaf the merge reaches.
    pub fn subtract(&mut self, operand: &Tree) -> Result<(), BspError> {
        let mut scratch = self.clone();
        let mut clip = operand.clone();
        let mut graft = operand.inverted();

        let root = scratch.root();
        let clip_root = clip.root();
        let graft_root = graft.root();
        scratch.merge_subtract(root, &mut graft, graft_root, &mut clip, clip_root)?;

        *self = scratch;
        Ok(())
    }

    /// Recursive subtraction merge. Each call handles one world node and the
    /// two operand pieces covering the same region; the recursion strictly
    /// descends the (finite) world tree.
    fn merge_subtract(
        &mut self,
        world: NodeRef,
        graft: &mut Tree,
        graft_at: NodeRef,
        clip: &mut Tree,
        clip_at: NodeRef,
    ) -> Result<NodeRef, BspError> {
        let id = match world {
            // nothing to subtract from empty space
            NodeRef::Empty => return Ok(NodeRef::Empty),
            // formerly uniform solid: becomes whatever the complemented
            // operand says exists here
            NodeRef::Solid => return self.copy_subtree(graft, graft_at),
            NodeRef::Node(id) => id,
        };

        let node = self.node(id).clone();
        let plane = *self.plane(node.plane);

        // surface fragments enclosed by the operand are no longer visible
        let kept = self.clip_faces_outside(node.faces, clip, clip_at)?;
        self.node_mut(id).faces = kept;

        // align both operand pieces with this node's split, then merge each
        // half against its own piece
        let (graft_front, graft_back) = graft.partition_node_with_plane(&plane, graft_at)?;
        let (clip_front, clip_back) = clip.partition_node_with_plane(&plane, clip_at)?;

        let front = self.merge_subtract(node.front, graft, graft_front, clip, clip_front)?;
        let back = self.merge_subtract(node.back, graft, graft_back, clip, clip_back)?;

        let world_node = self.node_mut(id);
        world_node.front = front;
        world_node.back = back;
        Ok(world)
    }

    /// Push the faces of the list at `head` down the structure of `clip`,
    /// keeping only the fragments that reach its empty leaves, i.e. the parts
    /// of the surface lying outside the clipping solid. Dropped fragments
    /// keep their arena storage; only the links change.
    fn clip_faces_outside(
        &mut self,
        head: Option<FaceId>,
        clip: &Tree,
        clip_at: NodeRef,
    ) -> Result<Option<FaceId>, BspError> {
        let id = match clip_at {
            NodeRef::Empty => return Ok(head),
            NodeRef::Solid => return Ok(None),
            NodeRef::Node(id) => id,
        };
        if head.is_none() {
            return Ok(None);
        }

        let clip_node = clip.node(id);
        let plane = *clip.plane(clip_node.plane);
        let (clip_front, clip_back) = (clip_node.front, clip_node.back);

        let mut front_head = None;
        let mut back_head = None;
        let mut cursor = head;
        while let Some(face_id) = cursor {
            cursor = self.face_next(face_id);
            let split = plane.split_polygon(&self.face(face_id).vertices, SURFACE_CLIP_EPSILON);
            match split {
                PolygonSplit::Front => self.relink_face(face_id, &mut front_head),
                PolygonSplit::Back => self.relink_face(face_id, &mut back_head),
                PolygonSplit::OnPlane => {
                    // lying on a face plane of the clip solid: a fragment
                    // facing the same way belongs to the outside
                    if faces_same_way(&self.face(face_id).vertices, &plane) {
                        self.relink_face(face_id, &mut front_head);
                    } else {
                        self.relink_face(face_id, &mut back_head);
                    }
                },
                PolygonSplit::Split { front, back } => {
                    self.push_face(front, &mut front_head)?;
                    self.push_face(back, &mut back_head)?;
                },
            }
        }

        let kept_front = self.clip_faces_outside(front_head, clip, clip_front)?;
        let kept_back = self.clip_faces_outside(back_head, clip, clip_back)?;
        Ok(self.concat_face_lists(kept_front, kept_back))
    }
}

/// `true` when the polygon's winding normal agrees with `plane`'s normal.
/// Degenerate loops have no winding to compare and side with front.
fn faces_same_way(vertices: &[Vertex], plane: &Plane) -> bool {
    match Plane::from_points(&vertices[0].pos, &vertices[1].pos, &vertices[2].pos) {
        Ok(face_plane) => face_plane.normal.dot(&plane.normal) > 0.0,
        Err(_) => true,
    }
}
