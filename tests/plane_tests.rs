mod support;

use nalgebra::{Point3, Vector3};
use solidbsp::float_types::Real;
use solidbsp::{BspError, FaceClass, Plane, PlaneSide};

#[test]
fn classify_point_thick_plane() {
    let plane = Plane::from_normal(Vector3::y(), 0.0);
    let eps = 0.01;

    assert_eq!(
        plane.classify_point(&Point3::new(0.0, 0.5, 0.0), eps),
        PlaneSide::Front
    );
    assert_eq!(
        plane.classify_point(&Point3::new(0.0, -0.5, 0.0), eps),
        PlaneSide::Back
    );
    assert_eq!(
        plane.classify_point(&Point3::new(3.0, 0.005, -7.0), eps),
        PlaneSide::On
    );
    assert_eq!(
        plane.classify_point(&Point3::new(0.0, -0.009, 0.0), eps),
        PlaneSide::On
    );
}

#[test]
fn on_exactly_within_epsilon() {
    // exactly one of Front/Back/On holds, and On iff |distance| <= epsilon
    let plane = Plane::from_normal(Vector3::new(0.0, 0.0, 1.0), 2.0);
    let eps = 0.1;
    let distances: [Real; 7] = [-5.0, -0.11, -0.09, 0.0, 0.09, 0.11, 5.0];

    for d in distances {
        let point = Point3::new(1.0, -2.0, 2.0 + d);
        let side = plane.classify_point(&point, eps);
        if d.abs() <= eps {
            assert_eq!(side, PlaneSide::On, "d = {}", d);
        } else if d > 0.0 {
            assert_eq!(side, PlaneSide::Front, "d = {}", d);
        } else {
            assert_eq!(side, PlaneSide::Back, "d = {}", d);
        }
    }
}

#[test]
fn from_points_follows_right_hand_rule() {
    let plane = Plane::from_points(
        &Point3::new(0.0, 0.0, 0.0),
        &Point3::new(1.0, 0.0, 0.0),
        &Point3::new(0.0, 1.0, 0.0),
    )
    .unwrap();

    assert!(support::approx_eq(plane.normal.z, 1.0, 1e-9));
    assert!(support::approx_eq(plane.w, 0.0, 1e-9));
}

#[test]
fn from_points_rejects_collinear() {
    let result = Plane::from_points(
        &Point3::new(0.0, 0.0, 0.0),
        &Point3::new(1.0, 1.0, 1.0),
        &Point3::new(2.0, 2.0, 2.0),
    );
    assert_eq!(result, Err(BspError::DegenerateGeometry));

    let coincident = Plane::from_points(
        &Point3::new(3.0, 0.0, 0.0),
        &Point3::new(3.0, 0.0, 0.0),
        &Point3::new(0.0, 1.0, 0.0),
    );
    assert_eq!(coincident, Err(BspError::DegenerateGeometry));
}

#[test]
fn flip_swaps_sides() {
    let mut plane = Plane::from_normal(Vector3::y(), 2.0);
    let above = Point3::new(0.0, 5.0, 0.0);
    assert_eq!(plane.classify_point(&above, 0.01), PlaneSide::Front);

    plane.flip();
    assert_eq!(plane.normal, Vector3::new(0.0, -1.0, 0.0));
    assert_eq!(plane.w, -2.0);
    assert_eq!(plane.classify_point(&above, 0.01), PlaneSide::Back);
}

#[test]
fn axial_planes_are_recognized() {
    assert!(Plane::from_normal(Vector3::x(), 3.0).is_axial());
    assert!(Plane::from_normal(-Vector3::z(), 0.5).is_axial());
    assert!(!Plane::from_normal(Vector3::new(1.0, 1.0, 0.0), 0.0).is_axial());
}

#[test]
fn approx_eq_bands() {
    let plane = Plane::from_normal(Vector3::y(), 1.0);
    let close = Plane::from_normal(Vector3::y(), 1.005);
    let far = Plane::from_normal(Vector3::y(), 1.5);
    let flipped = plane.flipped();

    assert!(plane.approx_eq(&close, 1e-5, 0.01));
    assert!(!plane.approx_eq(&far, 1e-5, 0.01));
    assert!(!plane.approx_eq(&flipped, 1e-5, 0.01));
}

#[test]
fn classify_polygon_cases() {
    let square = support::unit_square();
    let eps = 0.01;

    // square lives in z = 0
    let coplanar = Plane::from_normal(Vector3::z(), 0.0);
    assert_eq!(
        coplanar.classify_polygon(&square, eps),
        FaceClass::Coplanar
    );

    let below = Plane::from_normal(Vector3::z(), -1.0);
    assert_eq!(below.classify_polygon(&square, eps), FaceClass::Front);

    let above = Plane::from_normal(Vector3::z(), 1.0);
    assert_eq!(above.classify_polygon(&square, eps), FaceClass::Back);

    let cutting = Plane::from_normal(Vector3::x(), 0.5);
    assert_eq!(cutting.classify_polygon(&square, eps), FaceClass::Spanning);

    // an edge resting on the plane leans front, not spanning
    let touching = Plane::from_normal(Vector3::x(), 0.0);
    assert_eq!(touching.classify_polygon(&square, eps), FaceClass::Front);
}
