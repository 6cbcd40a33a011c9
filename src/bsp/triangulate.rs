//! Turning a subtree's surviving faces back into triangle buffers.

use crate::vertex::Vertex;

use super::{NodeRef, Tree};

/// Triangle soup generated from a subtree, ready for a vertex/index buffer
/// upload by whatever consumes it.
#[derive(Debug, Clone, Default)]
pub struct MeshBuffers {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl MeshBuffers {
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

impl Tree {
    /// Collect every coplanar face of the subtree at `start` (front child
    /// first, then back) and fan-triangulate each one around its first
    /// vertex: a face with `n` vertices contributes `n - 2` triangles.
    pub fn generate_mesh(&self, start: NodeRef) -> MeshBuffers {
        let mut buffers = MeshBuffers::default();
        self.emit_node(start, &mut buffers);
        buffers
    }

    fn emit_node(&self, node: NodeRef, buffers: &mut MeshBuffers) {
        let NodeRef::Node(id) = node else {
            return;
        };
        let tree_node = self.node(id);

        let mut cursor = tree_node.faces;
        while let Some(face_id) = cursor {
            let face = self.face(face_id);
            cursor = face.next;

            let base = buffers.vertices.len() as u32;
            buffers.vertices.extend(face.vertices.iter().cloned());
            for corner in 1..face.vertices.len() as u32 - 1 {
                buffers
                    .indices
                    .extend_from_slice(&[base, base + corner, base + corner + 1]);
            }
        }

        self.emit_node(tree_node.front, buffers);
        self.emit_node(tree_node.back, buffers);
    }
}
