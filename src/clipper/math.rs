//! Precision-parameterized geometric primitives. Every comparison has an i64
//! fast path (valid while all coordinates stay within `LO_RANGE`) and an i128
//! extended path; callers thread the capability flag computed at ingestion.

use crate::clipper::constants::LO_RANGE;
use crate::clipper::errors::ClipError;
use crate::geometry::IntPoint;

/// dy1/dx1 == dy2/dx2, compared as cross products.
#[inline(always)]
pub fn slopes_equal_deltas(dy1: i64, dx1: i64, dy2: i64, dx2: i64, use_full_range: bool) -> bool {
    if use_full_range {
        dy1 as i128 * dx2 as i128 == dx1 as i128 * dy2 as i128
    } else {
        dy1 * dx2 - dx1 * dy2 == 0
    }
}

pub fn slopes_equal_points(
    pt1: &IntPoint,
    pt2: &IntPoint,
    pt3: &IntPoint,
    use_full_range: bool,
) -> bool {
    slopes_equal_deltas(
        pt1.y - pt2.y,
        pt1.x - pt2.x,
        pt2.y - pt3.y,
        pt2.x - pt3.x,
        use_full_range,
    )
}

pub fn slopes_equal_lines(
    pt1: &IntPoint,
    pt2: &IntPoint,
    pt3: &IntPoint,
    pt4: &IntPoint,
    use_full_range: bool,
) -> bool {
    slopes_equal_deltas(
        pt1.y - pt2.y,
        pt1.x - pt2.x,
        pt3.y - pt4.y,
        pt3.x - pt4.x,
        use_full_range,
    )
}

#[inline(always)]
pub fn exceeds_lo_range(pt: &IntPoint) -> bool {
    pt.x.abs() > LO_RANGE || pt.y.abs() > LO_RANGE
}

#[inline(always)]
pub fn checked_div(numerator: i128, denominator: i128) -> Result<i128, ClipError> {
    numerator
        .checked_div(denominator)
        .ok_or(ClipError::ZeroDenominator)
}

/// True for counter-clockwise winding (positive signed area in a Y-down
/// coordinate system). Decided at the bottommost-rightmost vertex so a single
/// cross product suffices.
pub fn orientation(poly: &[IntPoint]) -> bool {
    let high = match poly.len().checked_sub(1) {
        Some(h) if h >= 2 => h,
        _ => return false,
    };

    let mut j = 0;
    for i in 0..=high {
        if poly[i].y < poly[j].y {
            continue;
        }
        if poly[i].y > poly[j].y || poly[i].x < poly[j].x {
            j = i;
        }
    }
    let j_plus = if j == high { 0 } else { j + 1 };
    let j_minus = if j == 0 { high } else { j - 1 };

    let vec1 = IntPoint::new(poly[j].x - poly[j_minus].x, poly[j].y - poly[j_minus].y);
    let vec2 = IntPoint::new(poly[j_plus].x - poly[j].x, poly[j_plus].y - poly[j].y);

    let use_full_range = vec1.x.abs() > LO_RANGE
        || vec1.y.abs() > LO_RANGE
        || vec2.x.abs() > LO_RANGE
        || vec2.y.abs() > LO_RANGE;
    if use_full_range {
        vec1.x as i128 * vec2.y as i128 - vec2.x as i128 * vec1.y as i128 >= 0
    } else {
        vec1.x * vec2.y - vec2.x * vec1.y >= 0
    }
}

/// Signed area of a closed ring; positive for counter-clockwise winding.
pub fn area(poly: &[IntPoint]) -> f64 {
    let high = match poly.len().checked_sub(1) {
        Some(h) if h >= 2 => h,
        _ => return 0.0,
    };

    if poly.iter().any(exceeds_lo_range) {
        let mut acc: i128 = 0;
        for i in 0..=high {
            let j = if i == high { 0 } else { i + 1 };
            acc += poly[i].x as i128 * poly[j].y as i128
                - poly[j].x as i128 * poly[i].y as i128;
        }
        acc as f64 / 2.0
    } else {
        let mut acc = 0.0;
        for i in 0..=high {
            let j = if i == high { 0 } else { i + 1 };
            acc += (poly[i].x * poly[j].y - poly[j].x * poly[i].y) as f64;
        }
        acc / 2.0
    }
}

/// Rounds half away from zero, the rounding every coordinate snap uses.
#[inline(always)]
pub fn clipper_round(value: f64) -> i64 {
    value.round() as i64
}
