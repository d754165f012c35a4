use crate::clipper::clipper_base::ClipperBase;
use crate::clipper::constants::LO_RANGE;
use crate::clipper::enums::PolyType;
use crate::clipper::errors::ClipError;
use crate::clipper::tests::square;
use crate::geometry::IntPoint;

#[test]
fn rejects_rings_with_fewer_than_three_points() {
    let mut base = ClipperBase::new();
    let ring = vec![IntPoint::new(0, 0), IntPoint::new(10, 0)];
    assert_eq!(base.add_polygon(&ring, PolyType::Subject), Ok(false));
    assert!(base.minima.is_empty());
}

#[test]
fn rejects_rings_that_collapse_to_a_line() {
    let mut base = ClipperBase::new();
    let ring = vec![
        IntPoint::new(0, 0),
        IntPoint::new(5, 0),
        IntPoint::new(10, 0),
    ];
    assert_eq!(base.add_polygon(&ring, PolyType::Subject), Ok(false));
}

#[test]
fn drops_duplicate_and_collinear_vertices() {
    let mut base = ClipperBase::new();
    let ring = vec![
        IntPoint::new(0, 0),
        IntPoint::new(5, 0),
        IntPoint::new(5, 0),
        IntPoint::new(10, 0),
        IntPoint::new(10, 10),
        IntPoint::new(0, 10),
    ];
    assert_eq!(base.add_polygon(&ring, PolyType::Subject), Ok(true));
    // the collinear midpoint and the duplicate are gone: 4 edges remain
    assert_eq!(base.edges.len(), 4);
}

#[test]
fn square_yields_one_local_minimum() {
    let mut base = ClipperBase::new();
    assert_eq!(base.add_polygon(&square(0, 0, 10), PolyType::Subject), Ok(true));
    assert_eq!(base.minima.iter().count(), 1);
    assert_eq!(base.minima.first().y, 10);
}

#[test]
fn w_shape_yields_two_local_minima() {
    let mut base = ClipperBase::new();
    let ring = vec![
        IntPoint::new(0, 0),
        IntPoint::new(20, 0),
        IntPoint::new(15, 10),
        IntPoint::new(10, 5),
        IntPoint::new(5, 10),
    ];
    assert_eq!(base.add_polygon(&ring, PolyType::Subject), Ok(true));
    let ys: Vec<i64> = base.minima.iter().map(|lm| lm.y).collect();
    assert_eq!(ys, vec![10, 10]);
}

#[test]
fn bounds_cover_all_rings() {
    let mut base = ClipperBase::new();
    base.add_polygon(&square(0, 0, 10), PolyType::Subject)
        .unwrap();
    base.add_polygon(&square(-5, 20, 10), PolyType::Clip).unwrap();
    let r = base.get_bounds();
    assert_eq!(r.left, -5);
    assert_eq!(r.top, 0);
    assert_eq!(r.right, 10);
    assert_eq!(r.bottom, 30);
}

#[test]
fn large_coordinates_flip_the_precision_flag() {
    let mut base = ClipperBase::new();
    assert!(!base.use_full_range);
    let big = LO_RANGE + 1;
    base.add_polygon(&square(0, 0, big), PolyType::Subject)
        .unwrap();
    assert!(base.use_full_range);
}

#[test]
fn coordinates_past_the_absolute_bound_are_an_error() {
    let mut base = ClipperBase::new();
    let huge = 7_000_000_000_000_000_000i64;
    let ring = vec![
        IntPoint::new(0, 0),
        IntPoint::new(huge, 0),
        IntPoint::new(huge, huge),
    ];
    assert_eq!(
        base.add_polygon(&ring, PolyType::Subject),
        Err(ClipError::CoordinateOutOfRange)
    );
}

#[test]
fn clear_resets_everything() {
    let mut base = ClipperBase::new();
    base.add_polygon(&square(0, 0, LO_RANGE + 1), PolyType::Subject)
        .unwrap();
    base.clear();
    assert!(base.edges.is_empty());
    assert!(base.minima.is_empty());
    assert!(!base.use_full_range);
}
