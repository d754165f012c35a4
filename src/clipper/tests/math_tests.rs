use crate::clipper::math::{area, clipper_round, orientation, slopes_equal_points};
use crate::geometry::IntPoint;

#[test]
fn collinear_points_have_equal_slopes() {
    let a = IntPoint::new(0, 0);
    let b = IntPoint::new(5, 5);
    let c = IntPoint::new(10, 10);
    assert!(slopes_equal_points(&a, &b, &c, false));
    assert!(slopes_equal_points(&a, &b, &c, true));
}

#[test]
fn non_collinear_points_have_unequal_slopes() {
    let a = IntPoint::new(0, 0);
    let b = IntPoint::new(5, 5);
    let c = IntPoint::new(10, 11);
    assert!(!slopes_equal_points(&a, &b, &c, false));
    assert!(!slopes_equal_points(&a, &b, &c, true));
}

#[test]
fn slopes_equal_handles_large_coordinates_in_extended_mode() {
    let a = IntPoint::new(0, 0);
    let b = IntPoint::new(3_000_000_000, 3_000_000_000);
    let c = IntPoint::new(6_000_000_000, 6_000_000_000);
    assert!(slopes_equal_points(&a, &b, &c, true));
}

#[test]
fn square_orientation_and_area() {
    let ring = vec![
        IntPoint::new(0, 0),
        IntPoint::new(10, 0),
        IntPoint::new(10, 10),
        IntPoint::new(0, 10),
    ];
    assert!(orientation(&ring));
    assert_eq!(area(&ring), 100.0);

    let reversed: Vec<IntPoint> = ring.iter().rev().copied().collect();
    assert!(!orientation(&reversed));
    assert_eq!(area(&reversed), -100.0);
}

#[test]
fn degenerate_rings_have_zero_area() {
    assert_eq!(area(&[]), 0.0);
    assert_eq!(area(&[IntPoint::new(1, 1)]), 0.0);
    assert_eq!(area(&[IntPoint::new(1, 1), IntPoint::new(2, 2)]), 0.0);
}

#[test]
fn area_switches_to_extended_precision_for_large_coordinates() {
    let d = 2_000_000_000i64;
    let ring = vec![
        IntPoint::new(0, 0),
        IntPoint::new(d, 0),
        IntPoint::new(d, d),
        IntPoint::new(0, d),
    ];
    assert_eq!(area(&ring), d as f64 * d as f64);
}

#[test]
fn rounding_is_half_away_from_zero() {
    assert_eq!(clipper_round(2.5), 3);
    assert_eq!(clipper_round(-2.5), -3);
    assert_eq!(clipper_round(2.4), 2);
    assert_eq!(clipper_round(-2.4), -2);
}
