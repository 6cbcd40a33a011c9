mod support;

use nalgebra::{Vector2, Vector3};
use solidbsp::float_types::Real;
use solidbsp::{Plane, PolygonSplit, Vertex};
use support::{unit_square, vertex};

#[test]
fn split_square_down_the_middle() {
    // unit square cut by x = 0.5: two quads, each keeping its two original
    // corners and sharing the two interpolated vertices
    let square = unit_square();
    let plane = Plane::from_normal(Vector3::x(), 0.5);

    let PolygonSplit::Split { front, back } = plane.split_polygon(&square, 0.01) else {
        panic!("expected a split");
    };

    assert_eq!(front.len(), 4);
    assert_eq!(back.len(), 4);

    for v in &front {
        assert!(v.pos.x >= 0.5);
    }
    for v in &back {
        assert!(v.pos.x <= 0.5);
    }

    // the axial snap makes the seam exact
    let on_seam = |side: &[Vertex], y: Real| {
        side.iter()
            .any(|v| v.pos.x == 0.5 && v.pos.y == y && v.pos.z == 0.0)
    };
    assert!(on_seam(&front, 0.0) && on_seam(&front, 1.0));
    assert!(on_seam(&back, 0.0) && on_seam(&back, 1.0));

    // every original corner survives on exactly one side
    for corner in &square {
        let in_front = front.iter().filter(|v| *v == corner).count();
        let in_back = back.iter().filter(|v| *v == corner).count();
        assert_eq!(in_front + in_back, 1, "corner {:?}", corner.pos);
    }
}

#[test]
fn split_interpolates_attributes() {
    let mut square = unit_square();
    square[0].uv = Vector2::new(0.0, 0.0);
    square[1].uv = Vector2::new(1.0, 0.0);
    square[2].uv = Vector2::new(1.0, 1.0);
    square[3].uv = Vector2::new(0.0, 1.0);

    let plane = Plane::from_normal(Vector3::x(), 0.5);
    let PolygonSplit::Split { front, .. } = plane.split_polygon(&square, 0.01) else {
        panic!("expected a split");
    };

    let seam = front
        .iter()
        .find(|v| v.pos.x == 0.5 && v.pos.y == 0.0)
        .expect("seam vertex missing");
    assert!(support::approx_eq(seam.uv.x, 0.5, 1e-9));
    assert!(support::approx_eq(seam.uv.y, 0.0, 1e-9));
}

#[test]
fn coplanar_polygon_is_on_plane() {
    let square = unit_square();
    let plane = Plane::from_normal(Vector3::z(), 0.0);
    assert!(matches!(
        plane.split_polygon(&square, 0.01),
        PolygonSplit::OnPlane
    ));
}

#[test]
fn one_sided_polygons_do_not_split() {
    let square = unit_square();

    let behind = Plane::from_normal(Vector3::x(), 2.0);
    assert!(matches!(
        square_split(&behind, &square),
        PolygonSplit::Back
    ));

    let in_front = Plane::from_normal(Vector3::x(), -2.0);
    assert!(matches!(
        square_split(&in_front, &square),
        PolygonSplit::Front
    ));

    // vertices within epsilon of the plane do not force a split
    let touching = Plane::from_normal(Vector3::x(), 1.0);
    assert!(matches!(
        square_split(&touching, &square),
        PolygonSplit::Back
    ));
}

fn square_split(plane: &Plane, square: &[Vertex]) -> PolygonSplit {
    plane.split_polygon(square, 0.01)
}

#[test]
fn on_vertex_lands_on_both_sides() {
    // triangle with its apex on the cutting plane splits into two triangles
    let triangle = vec![
        vertex(0.0, 1.0, 0.0),
        vertex(-1.0, -1.0, 0.0),
        vertex(1.0, -1.0, 0.0),
    ];
    let plane = Plane::from_normal(Vector3::x(), 0.0);

    let PolygonSplit::Split { front, back } = plane.split_polygon(&triangle, 0.01) else {
        panic!("expected a split");
    };

    assert_eq!(front.len(), 3);
    assert_eq!(back.len(), 3);
    assert!(front.iter().any(|v| v.pos == triangle[0].pos));
    assert!(back.iter().any(|v| v.pos == triangle[0].pos));
    // the crossing on the bottom edge snaps exactly to x = 0
    assert!(front.iter().any(|v| v.pos.x == 0.0 && v.pos.y == -1.0));
}
