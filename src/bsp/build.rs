//! Recursive construction of a solid-leaf tree from a triangle mesh.

use std::time::Instant;

use crate::errors::BspError;
use crate::float_types::{Real, SPLIT_EPSILON};
use crate::plane::{FaceClass, Plane, PolygonSplit};
use crate::traits::TriangleSource;

use super::{FaceId, Node, NodeId, NodeRef, Tree};

/// Weights steering splitter selection.
///
/// Picking splitting planes trades two conflicting goals against each other:
/// keeping the tree balanced, and avoiding cuts through the remaining
/// polygons (every cut adds nodes and costs precision).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SplittingCriteria {
    /// Weight of the avoid-splitting term.
    pub split_cost: Real,
    /// Blend factor in `[0, 1]`: 1 scores balance only, 0 scores cut
    /// avoidance only.
    pub balance_vs_cuts: Real,
    /// Point-to-plane tolerance for the candidate scoring pass. Deliberately
    /// looser than the geometric split tolerance; it only steers the
    /// heuristic.
    pub plane_epsilon: Real,
}

impl Default for SplittingCriteria {
    fn default() -> Self {
        SplittingCriteria {
            split_cost: 1.0,
            balance_vs_cuts: 0.6,
            plane_epsilon: 0.017,
        }
    }
}

/// Counters reported after a build.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildStats {
    /// Faces collected from the triangle source
    pub polys_before: usize,
    /// Face records in the arena once construction finished
    pub polys_after: usize,
    /// Polygons cut in two while partitioning
    pub splits: usize,
    /// Unique planes after interning
    pub planes: usize,
    pub internal_nodes: usize,
    pub solid_leaves: usize,
    pub empty_leaves: usize,
    /// Input triangles dropped for having no usable plane
    pub degenerate_skipped: usize,
}

impl Tree {
    /// Build a tree from every triangle of `source`.
    ///
    /// Triangles become 3-vertex faces; construction then recursively picks a
    /// splitter, partitions the face list, and descends until every face has
    /// settled on a node, closing open sides with empty leaves and closed
    /// sides with solid leaves. Degenerate (collinear) triangles are skipped
    /// and counted, not fatal; a source yielding nothing usable is
    /// [`BspError::EmptyMesh`].
    pub fn build<S: TriangleSource>(
        source: &S,
        criteria: &SplittingCriteria,
    ) -> Result<Tree, BspError> {
        Self::build_with_stats(source, criteria).map(|(tree, _)| tree)
    }

    /// [`build`](Tree::build), also returning the construction counters.
    pub fn build_with_stats<S: TriangleSource>(
        source: &S,
        criteria: &SplittingCriteria,
    ) -> Result<(Tree, BuildStats), BspError> {
        let started = Instant::now();
        let mut tree = Tree::default();
        let mut stats = BuildStats::default();

        let mut head: Option<FaceId> = None;
        let mut collect_error: Option<BspError> = None;
        source.visit_triangles(|triangle| {
            if collect_error.is_some() {
                return;
            }
            match Plane::from_points(&triangle[0].pos, &triangle[1].pos, &triangle[2].pos) {
                Ok(_) => {
                    if let Err(error) = tree.push_face(triangle.to_vec(), &mut head) {
                        collect_error = Some(error);
                    }
                },
                Err(_) => stats.degenerate_skipped += 1,
            }
        });
        if let Some(error) = collect_error {
            return Err(error);
        }
        let Some(head) = head else {
            return Err(BspError::EmptyMesh);
        };
        if stats.degenerate_skipped > 0 {
            log::debug!(
                "bsp build: skipped {} degenerate input triangles",
                stats.degenerate_skipped
            );
        }

        stats.polys_before = tree.face_count();
        tree.build_node(head, criteria, &mut stats)?;
        stats.polys_after = tree.face_count();
        stats.planes = tree.plane_count();
        stats.internal_nodes = tree.node_count();

        log::debug!(
            "bsp build: {} -> {} faces, {} splits, {} planes, {} nodes ({} solid / {} empty leaves) in {} ms",
            stats.polys_before,
            stats.polys_after,
            stats.splits,
            stats.planes,
            stats.internal_nodes,
            stats.solid_leaves,
            stats.empty_leaves,
            started.elapsed().as_millis()
        );
        Ok((tree, stats))
    }

    /// Build one node from the face list at `head` and recurse. The node is
    /// allocated before its children so the first call claims index 0, which
    /// is the root by invariant.
    fn build_node(
        &mut self,
        head: FaceId,
        criteria: &SplittingCriteria,
        stats: &mut BuildStats,
    ) -> Result<NodeId, BspError> {
        let splitter = self.select_splitter(head, criteria)?;
        let split_plane = self.face_plane(splitter)?;

        let (front_head, back_head, on_head) =
            self.partition_faces(head, &split_plane, SPLIT_EPSILON, stats)?;

        let plane = self.intern_plane(split_plane)?;
        let node_id = self.push_node(Node {
            plane,
            front: NodeRef::Empty,
            back: NodeRef::Solid,
            faces: on_head,
        })?;

        // open space lies in front of the surface, solid matter behind it
        let front = match front_head {
            Some(faces) => NodeRef::Node(self.build_node(faces, criteria, stats)?),
            None => {
                stats.empty_leaves += 1;
                NodeRef::Empty
            },
        };
        let back = match back_head {
            Some(faces) => NodeRef::Node(self.build_node(faces, criteria, stats)?),
            None => {
                stats.solid_leaves += 1;
                NodeRef::Solid
            },
        };

        let node = self.node_mut(node_id);
        node.front = front;
        node.back = back;
        Ok(node_id)
    }

    /// Score every face in the list as a candidate splitting plane against
    /// every other face, and return the cheapest. O(n²) over the active set,
    /// an explicit trade of build speed for tree quality.
    fn select_splitter(
        &self,
        head: FaceId,
        criteria: &SplittingCriteria,
    ) -> Result<FaceId, BspError> {
        let mut best: Option<(FaceId, Real)> = None;

        let mut candidate = Some(head);
        while let Some(candidate_id) = candidate {
            candidate = self.face_next(candidate_id);

            // candidates with no usable plane cannot split anything
            let Ok(plane) = self.face_plane(candidate_id) else {
                continue;
            };

            let mut front_faces = 0i64;
            let mut back_faces = 0i64;
            let mut split_faces = 0i64;

            let mut tested = Some(head);
            while let Some(tested_id) = tested {
                let face = self.face(tested_id);
                tested = face.next;
                if tested_id == candidate_id {
                    continue;
                }
                match plane.classify_polygon(&face.vertices, criteria.plane_epsilon) {
                    FaceClass::Front => front_faces += 1,
                    FaceClass::Back => back_faces += 1,
                    FaceClass::Coplanar => {},
                    FaceClass::Spanning => split_faces += 1,
                }
            }

            // zero difference means a perfectly balanced node
            let balance = (front_faces - back_faces).abs() as Real;
            let mut score = balance * criteria.balance_vs_cuts
                + split_faces as Real * criteria.split_cost * (1.0 - criteria.balance_vs_cuts);
            if plane.is_axial() {
                score *= 0.8; // axial is better
            }

            if best.is_none_or(|(_, best_score)| score < best_score) {
                best = Some((candidate_id, score));
            }
        }

        best.map(|(id, _)| id).ok_or(BspError::DegenerateGeometry)
    }

    /// Walk the face list once and deal every face to the front, back or
    /// coplanar list. Whole faces are relinked in place; straddling faces
    /// spawn two fresh records and their old storage is simply abandoned.
    fn partition_faces(
        &mut self,
        head: FaceId,
        plane: &Plane,
        epsilon: Real,
        stats: &mut BuildStats,
    ) -> Result<(Option<FaceId>, Option<FaceId>, Option<FaceId>), BspError> {
        let mut front_head = None;
        let mut back_head = None;
        let mut on_head = None;

        let mut cursor = Some(head);
        while let Some(face_id) = cursor {
            cursor = self.face_next(face_id);
            let split = plane.split_polygon(&self.face(face_id).vertices, epsilon);
            match split {
                PolygonSplit::Front => self.relink_face(face_id, &mut front_head),
                PolygonSplit::Back => self.relink_face(face_id, &mut back_head),
                PolygonSplit::OnPlane => self.relink_face(face_id, &mut on_head),
                PolygonSplit::Split { front, back } => {
                    self.push_face(front, &mut front_head)?;
                    self.push_face(back, &mut back_head)?;
                    stats.splits += 1;
                },
            }
        }

        Ok((front_head, back_head, on_head))
    }

    /// Derive the splitting plane of a face from its first three vertices.
    pub(crate) fn face_plane(&self, id: FaceId) -> Result<Plane, BspError> {
        let vertices = &self.face(id).vertices;
        Plane::from_points(&vertices[0].pos, &vertices[1].pos, &vertices[2].pos)
    }
}
