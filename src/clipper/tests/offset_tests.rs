use crate::clipper::enums::{JoinType, PolyFillType};
use crate::clipper::offset::{offset_polygons, reverse_polygons, simplify_polygons};
use crate::clipper::math::orientation;
use crate::clipper::tests::{square, total_area};
use crate::geometry::IntPoint;

#[test]
fn zero_delta_returns_the_input() {
    let polys = vec![square(0, 0, 100)];
    let result = offset_polygons(&polys, 0.0, JoinType::Miter, 2.0).unwrap();
    assert_eq!(result, polys);
}

#[test]
fn miter_inflation_of_a_square_is_exact() {
    let polys = vec![square(0, 0, 100)];
    let result = offset_polygons(&polys, 10.0, JoinType::Miter, 2.0).unwrap();
    assert_eq!(result.len(), 1);
    // right-angle miters push every corner out diagonally: 120 x 120
    assert_eq!(total_area(&result), 14400.0);
}

#[test]
fn deflation_shrinks_the_square() {
    let polys = vec![square(0, 0, 100)];
    let result = offset_polygons(&polys, -10.0, JoinType::Miter, 2.0).unwrap();
    assert_eq!(result.len(), 1);
    assert_eq!(total_area(&result), 6400.0);
    assert!(orientation(&result[0]));
}

#[test]
fn round_inflation_stays_between_square_and_miter() {
    let polys = vec![square(0, 0, 100)];
    let result = offset_polygons(&polys, 10.0, JoinType::Round, 2.0).unwrap();
    assert_eq!(result.len(), 1);
    let a = total_area(&result);
    // 100^2 + 4 * 100 * 10 + pi * 10^2, give or take arc flattening
    assert!(a > 14200.0 && a < 14400.0, "area was {a}");
}

#[test]
fn square_join_clips_the_corners() {
    let polys = vec![square(0, 0, 100)];
    let result = offset_polygons(&polys, 10.0, JoinType::Square, 2.0).unwrap();
    assert_eq!(result.len(), 1);
    let a = total_area(&result);
    assert!(a > 14000.0 && a < 14400.0, "area was {a}");
}

#[test]
fn outward_then_inward_offset_round_trips() {
    let polys = vec![square(0, 0, 100)];
    let grown = offset_polygons(&polys, 10.0, JoinType::Miter, 2.0).unwrap();
    let back = offset_polygons(&grown, -10.0, JoinType::Miter, 2.0).unwrap();
    assert_eq!(back.len(), 1);
    assert_eq!(total_area(&back), 10000.0);
}

#[test]
fn sharp_spike_falls_back_from_miter_to_a_bounded_square() {
    // apex angle under 2 degrees; a true miter would project hundreds of
    // units past the tip
    let spike = vec![
        IntPoint::new(0, 0),
        IntPoint::new(10, 0),
        IntPoint::new(5, 200),
    ];
    let result = offset_polygons(&vec![spike], 10.0, JoinType::Miter, 2.0).unwrap();
    assert_eq!(result.len(), 1);
    let max_y = result[0].iter().map(|p| p.y).max().unwrap();
    assert!(max_y > 200 && max_y <= 225, "tip reached y = {max_y}");
}

#[test]
fn deflating_away_the_whole_ring_leaves_nothing() {
    let polys = vec![square(0, 0, 10)];
    let result = offset_polygons(&polys, -20.0, JoinType::Miter, 2.0).unwrap();
    assert!(result.is_empty());
}

#[test]
fn single_point_inflates_to_a_circle() {
    let polys = vec![vec![IntPoint::new(50, 50)]];
    let result = offset_polygons(&polys, 10.0, JoinType::Round, 2.0).unwrap();
    assert_eq!(result.len(), 1);
    let a = total_area(&result);
    assert!(a > 250.0 && a < 330.0, "area was {a}");
}

#[test]
fn simplify_splits_a_self_intersecting_ring() {
    let bowtie = vec![
        IntPoint::new(0, 0),
        IntPoint::new(10, 10),
        IntPoint::new(10, 0),
        IntPoint::new(0, 10),
    ];
    let result = simplify_polygons(&vec![bowtie], PolyFillType::EvenOdd).unwrap();
    assert_eq!(result.len(), 2);
    assert_eq!(total_area(&result), 50.0);
}

#[test]
fn reverse_polygons_flips_winding() {
    let mut polys = vec![square(0, 0, 10)];
    assert!(orientation(&polys[0]));
    reverse_polygons(&mut polys);
    assert!(!orientation(&polys[0]));
}
