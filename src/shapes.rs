//! Simple indexed triangle meshes for feeding the tree builder.

use crate::float_types::Real;
use crate::traits::TriangleSource;
use crate::vertex::Vertex;
use nalgebra::{Point3, Vector2, Vector3};

/// An indexed triangle mesh: the simplest [`TriangleSource`].
#[derive(Debug, Clone, Default)]
pub struct TriangleMesh {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl TriangleSource for TriangleMesh {
    fn visit_triangles<F>(&self, mut f: F)
    where
        F: FnMut([Vertex; 3]),
    {
        for tri in self.indices.chunks_exact(3) {
            f([
                self.vertices[tri[0] as usize].clone(),
                self.vertices[tri[1] as usize].clone(),
                self.vertices[tri[2] as usize].clone(),
            ]);
        }
    }
}

/// An axis-aligned box centered at the origin, wound counterclockwise seen
/// from outside so every face normal points outward.
pub fn box_mesh(length: Real, height: Real, depth: Real) -> TriangleMesh {
    let hl = 0.5 * length;
    let hh = 0.5 * height;
    let hd = 0.5 * depth;

    type Corner = [Real; 3];
    // per face: normal, tangent, four corners
    let faces: [(Vector3<Real>, Vector3<Real>, [Corner; 4]); 6] = [
        // front
        (
            Vector3::new(0.0, 0.0, -1.0),
            Vector3::new(1.0, 0.0, 0.0),
            [[-hl, -hh, -hd], [-hl, hh, -hd], [hl, hh, -hd], [hl, -hh, -hd]],
        ),
        // back
        (
            Vector3::new(0.0, 0.0, 1.0),
            Vector3::new(-1.0, 0.0, 0.0),
            [[-hl, -hh, hd], [hl, -hh, hd], [hl, hh, hd], [-hl, hh, hd]],
        ),
        // top
        (
            Vector3::new(0.0, 1.0, 0.0),
            Vector3::new(1.0, 0.0, 0.0),
            [[-hl, hh, -hd], [-hl, hh, hd], [hl, hh, hd], [hl, hh, -hd]],
        ),
        // bottom
        (
            Vector3::new(0.0, -1.0, 0.0),
            Vector3::new(-1.0, 0.0, 0.0),
            [[-hl, -hh, -hd], [hl, -hh, -hd], [hl, -hh, hd], [-hl, -hh, hd]],
        ),
        // left
        (
            Vector3::new(-1.0, 0.0, 0.0),
            Vector3::new(0.0, 0.0, -1.0),
            [[-hl, -hh, hd], [-hl, hh, hd], [-hl, hh, -hd], [-hl, -hh, -hd]],
        ),
        // right
        (
            Vector3::new(1.0, 0.0, 0.0),
            Vector3::new(0.0, 0.0, 1.0),
            [[hl, -hh, -hd], [hl, hh, -hd], [hl, hh, hd], [hl, -hh, hd]],
        ),
    ];

    let uvs: [Vector2<Real>; 4] = [
        Vector2::new(0.0, 1.0),
        Vector2::new(0.0, 0.0),
        Vector2::new(1.0, 0.0),
        Vector2::new(1.0, 1.0),
    ];

    let mut mesh = TriangleMesh::default();
    for (normal, tangent, corners) in faces {
        let base = mesh.vertices.len() as u32;
        for (corner, uv) in corners.iter().zip(uvs.iter()) {
            mesh.vertices.push(Vertex::with_attributes(
                Point3::new(corner[0], corner[1], corner[2]),
                normal,
                tangent,
                *uv,
                0.0,
            ));
        }
        mesh.indices
            .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }
    mesh
}

/// A square quad in the XZ plane at `y = 0`, normal up, spanning
/// `[-half_size, half_size]` on both axes.
pub fn ground_quad(half_size: Real) -> TriangleMesh {
    let s = half_size;
    let normal = Vector3::new(0.0, 1.0, 0.0);
    let tangent = Vector3::new(1.0, 0.0, 0.0);

    let corners: [([Real; 3], Vector2<Real>); 4] = [
        ([-s, 0.0, -s], Vector2::new(0.0, 1.0)),
        ([-s, 0.0, s], Vector2::new(0.0, 0.0)),
        ([s, 0.0, s], Vector2::new(1.0, 0.0)),
        ([s, 0.0, -s], Vector2::new(1.0, 1.0)),
    ];

    let mut mesh = TriangleMesh::default();
    for (corner, uv) in corners {
        mesh.vertices.push(Vertex::with_attributes(
            Point3::new(corner[0], corner[1], corner[2]),
            normal,
            tangent,
            uv,
            0.0,
        ));
    }
    mesh.indices.extend_from_slice(&[0, 1, 2, 0, 2, 3]);
    mesh
}

/// Turn a mesh inside out: reverse every triangle's winding and point the
/// vertex normals the other way. A subtractive brush prebuilt this way has
/// its solid and empty regions swapped.
pub fn flip_winding(mesh: &mut TriangleMesh) {
    for tri in mesh.indices.chunks_exact_mut(3) {
        tri.swap(0, 2);
    }
    for vertex in &mut mesh.vertices {
        vertex.flip();
    }
}
