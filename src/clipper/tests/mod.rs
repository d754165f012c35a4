mod clipper_base_tests;
mod clipper_tests;
mod edge_tests;
mod local_minima_tests;
mod math_tests;
mod offset_tests;
mod out_poly_tests;
mod scanbeam_tests;

use crate::geometry::IntPoint;

pub fn square(left: i64, top: i64, size: i64) -> Vec<IntPoint> {
    vec![
        IntPoint::new(left, top),
        IntPoint::new(left + size, top),
        IntPoint::new(left + size, top + size),
        IntPoint::new(left, top + size),
    ]
}

pub fn total_area(rings: &[Vec<IntPoint>]) -> f64 {
    rings.iter().map(|r| crate::clipper::math::area(r).abs()).sum()
}
