use super::*;
use nalgebra::matrix;

#[test]
fn perpendiculars_have_requested_length_and_orientation() {
    let v = Vec2::new(3.0, 4.0);
    let cw = perpendicular_cw(v, 10.0);
    let ccw = perpendicular_ccw(v, 10.0);
    assert!((cw.norm() - 10.0).abs() < 1e-12);
    assert!((ccw.norm() - 10.0).abs() < 1e-12);
    assert!(cw.dot(&v).abs() < 1e-12);
    // cw is to the right of v, ccw to the left
    assert!(v.x * cw.y - v.y * cw.x < 0.0);
    assert!(v.x * ccw.y - v.y * ccw.x > 0.0);
    assert!((cw + ccw).norm() < 1e-12);
}

#[test]
fn zero_vector_has_no_direction() {
    assert!(normalized(Vec2::zeros()).is_none());
    assert_eq!(normalized_or_zero(Vec2::zeros()), Vec2::zeros());
    assert_eq!(perpendicular_cw(Vec2::zeros(), 5.0), Vec2::zeros());
    assert_eq!(perpendicular_ccw(Vec2::zeros(), 5.0), Vec2::zeros());
    assert!(normalized(Vec2::new(f64::NAN, 1.0)).is_none());
}

#[test]
fn offset_and_between() {
    let a = Point2::new(1.0, 2.0);
    let b = Point2::new(4.0, 6.0);
    let d = between(a, b);
    assert_eq!(d, Vec2::new(3.0, 4.0));
    let p = offset(a, normalized(d).unwrap(), 5.0);
    assert!((p - b).norm() < 1e-12);
}

#[test]
fn ring_area_sign_follows_orientation() {
    let ccw = [
        Point2::new(0.0, 0.0),
        Point2::new(2.0, 0.0),
        Point2::new(2.0, 1.0),
        Point2::new(0.0, 1.0),
    ];
    assert!((signed_ring_area(&ccw) - 2.0).abs() < 1e-12);
    let mut cw = ccw.to_vec();
    cw.reverse();
    assert!((signed_ring_area(&cw) + 2.0).abs() < 1e-12);
    assert_eq!(signed_ring_area(&ccw[..2]), 0.0);
}

#[test]
fn affine_inverse_and_compose() {
    let f = Affine2 {
        m: matrix![2.0, 0.0; 0.0, 0.5],
        t: Vec2::new(1.0, -1.0),
    };
    let inv = f.inverse().unwrap();
    let p = Point2::new(3.0, 7.0);
    assert!((inv.apply(f.apply(p)) - p).norm() < 1e-12);
    let id = f.compose(&inv);
    assert!((id.m - Affine2::identity().m).norm() < 1e-12);
    assert!(id.t.norm() < 1e-12);

    let singular = Affine2 {
        m: matrix![1.0, 2.0; 2.0, 4.0],
        t: Vec2::zeros(),
    };
    assert!(singular.inverse().is_none());
}
