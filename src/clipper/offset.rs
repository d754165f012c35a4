//! Polygon offsetting (inflate/deflate) built on top of the clipping engine.
//! Each ring is expanded edge-by-edge along its outward normals, joints are
//! filled per the requested join style, and a final union pass removes the
//! self-intersections the raw expansion produces at concavities.

use std::f64::consts::PI;

use crate::clipper::clipper::{Clipper, Polygon, Polygons};
use crate::clipper::enums::{ClipType, JoinType, PolyFillType, PolyType};
use crate::clipper::errors::ClipError;
use crate::clipper::math::clipper_round;
use crate::geometry::{IntPoint, Point};

/// Offsets every ring by `delta` (positive inflates counter-clockwise rings).
/// Miter joints whose sharpness exceeds `miter_limit` fall back to squared
/// joints; limits below 1 are clamped to 1.
pub fn offset_polygons(
    polys: &Polygons,
    delta: f64,
    join_type: JoinType,
    miter_limit: f64,
) -> Result<Polygons, ClipError> {
    if delta == 0.0 {
        return Ok(polys.clone());
    }
    let miter_limit = if miter_limit <= 1.0 { 1.0 } else { miter_limit };
    let r_min = 2.0 / (miter_limit * miter_limit);

    let mut solution: Polygons = Vec::with_capacity(polys.len());
    let mut normals: Vec<Point<f64>> = Vec::new();

    for ring in polys {
        let mut len = ring.len();
        if len > 1 && ring[0] == ring[len - 1] {
            len -= 1;
        }
        if len == 0 || (len < 3 && delta <= 0.0) {
            continue;
        }
        if len == 1 {
            // a lone point inflates to a full circle
            solution.push(build_arc(ring[0], 0.0, 2.0 * PI, delta));
            continue;
        }

        normals.clear();
        for j in 0..len - 1 {
            normals.push(get_unit_normal(ring[j], ring[j + 1]));
        }
        normals.push(get_unit_normal(ring[len - 1], ring[0]));

        let mut out = Polygon::new();
        let mut k = len - 1;
        for j in 0..len {
            match join_type {
                JoinType::Miter => {
                    let r = 1.0 + normals[j].dot(&normals[k]);
                    if r >= r_min {
                        do_miter(&mut out, ring[j], &normals, j, k, delta, r);
                    } else {
                        do_square(&mut out, ring[j], &normals, j, k, delta, miter_limit);
                    }
                }
                JoinType::Round => do_round(&mut out, ring[j], &normals, j, k, delta),
                JoinType::Square => do_square(&mut out, ring[j], &normals, j, k, delta, 1.0),
            }
            k = j;
        }
        solution.push(out);
    }

    // clean up untidy corners
    let mut clipper = Clipper::new();
    clipper.add_polygons(&solution, PolyType::Subject)?;
    if delta > 0.0 {
        clipper.execute(
            ClipType::Union,
            &mut solution,
            PolyFillType::Positive,
            PolyFillType::Positive,
        )?;
    } else {
        // deflation flips winding, so union against an enclosing frame with a
        // negative fill, then drop the frame and restore the winding
        let r = clipper.get_bounds();
        let outer = vec![
            IntPoint::new(r.left - 10, r.bottom + 10),
            IntPoint::new(r.right + 10, r.bottom + 10),
            IntPoint::new(r.right + 10, r.top - 10),
            IntPoint::new(r.left - 10, r.top - 10),
        ];
        clipper.add_polygon(&outer, PolyType::Subject)?;
        clipper.execute(
            ClipType::Union,
            &mut solution,
            PolyFillType::Negative,
            PolyFillType::Negative,
        )?;
        if !solution.is_empty() {
            solution.remove(0);
            for ring in &mut solution {
                ring.reverse();
            }
        }
    }
    Ok(solution)
}

/// Removes self-intersections from rings via a self-union.
pub fn simplify_polygons(
    polys: &Polygons,
    fill_type: PolyFillType,
) -> Result<Polygons, ClipError> {
    let mut clipper = Clipper::new();
    clipper.add_polygons(polys, PolyType::Subject)?;
    let mut result = Polygons::new();
    clipper.execute(ClipType::Union, &mut result, fill_type, fill_type)?;
    Ok(result)
}

pub fn reverse_polygons(polys: &mut Polygons) {
    for ring in polys.iter_mut() {
        ring.reverse();
    }
}

/// Unit normal of the segment pt1->pt2, pointing right of the direction of
/// travel. Degenerate segments yield a zero vector.
fn get_unit_normal(pt1: IntPoint, pt2: IntPoint) -> Point<f64> {
    let d = Point::new((pt2.x - pt1.x) as f64, (pt2.y - pt1.y) as f64);
    if d.x == 0.0 && d.y == 0.0 {
        return Point::new(0.0, 0.0);
    }
    d.normalized().normal()
}

fn do_miter(
    out: &mut Polygon,
    vertex: IntPoint,
    normals: &[Point<f64>],
    j: usize,
    k: usize,
    delta: f64,
    r: f64,
) {
    if normals[k].cross(&normals[j]) * delta >= 0.0 {
        let q = delta / r;
        out.push(IntPoint::new(
            clipper_round(vertex.x as f64 + (normals[k].x + normals[j].x) * q),
            clipper_round(vertex.y as f64 + (normals[k].y + normals[j].y) * q),
        ));
    } else {
        // reflex joint: keep both offset points with the vertex between them
        out.push(IntPoint::new(
            clipper_round(vertex.x as f64 + normals[k].x * delta),
            clipper_round(vertex.y as f64 + normals[k].y * delta),
        ));
        out.push(vertex);
        out.push(IntPoint::new(
            clipper_round(vertex.x as f64 + normals[j].x * delta),
            clipper_round(vertex.y as f64 + normals[j].y * delta),
        ));
    }
}

fn do_square(
    out: &mut Polygon,
    vertex: IntPoint,
    normals: &[Point<f64>],
    j: usize,
    k: usize,
    delta: f64,
    mul: f64,
) {
    let pt1 = IntPoint::new(
        clipper_round(vertex.x as f64 + normals[k].x * delta),
        clipper_round(vertex.y as f64 + normals[k].y * delta),
    );
    let pt2 = IntPoint::new(
        clipper_round(vertex.x as f64 + normals[j].x * delta),
        clipper_round(vertex.y as f64 + normals[j].y * delta),
    );
    if normals[k].cross(&normals[j]) * delta >= 0.0 {
        let a1 = normals[k].y.atan2(normals[k].x);
        let a2 = (-normals[j].y).atan2(-normals[j].x);
        let mut a = (a2 - a1).abs();
        if a > PI {
            a = 2.0 * PI - a;
        }
        let dx = ((PI - a) / 4.0).tan() * (delta * mul).abs();
        out.push(IntPoint::new(
            (pt1.x as f64 - normals[k].y * dx) as i64,
            (pt1.y as f64 + normals[k].x * dx) as i64,
        ));
        out.push(IntPoint::new(
            (pt2.x as f64 + normals[j].y * dx) as i64,
            (pt2.y as f64 - normals[j].x * dx) as i64,
        ));
    } else {
        out.push(pt1);
        out.push(vertex);
        out.push(pt2);
    }
}

fn do_round(out: &mut Polygon, vertex: IntPoint, normals: &[Point<f64>], j: usize, k: usize, delta: f64) {
    let pt1 = IntPoint::new(
        clipper_round(vertex.x as f64 + normals[k].x * delta),
        clipper_round(vertex.y as f64 + normals[k].y * delta),
    );
    let pt2 = IntPoint::new(
        clipper_round(vertex.x as f64 + normals[j].x * delta),
        clipper_round(vertex.y as f64 + normals[j].y * delta),
    );
    out.push(pt1);
    if normals[k].cross(&normals[j]) * delta >= 0.0 {
        // round off the joint, unless the turn is too slight to matter
        if normals[j].dot(&normals[k]) < 0.985 {
            let a1 = normals[k].y.atan2(normals[k].x);
            let mut a2 = normals[j].y.atan2(normals[j].x);
            if delta > 0.0 && a2 < a1 {
                a2 += 2.0 * PI;
            } else if delta < 0.0 && a2 > a1 {
                a2 -= 2.0 * PI;
            }
            out.extend(build_arc(vertex, a1, a2, delta));
        }
    } else {
        out.push(vertex);
    }
    out.push(pt2);
}

fn build_arc(pt: IntPoint, a1: f64, a2: f64, r: f64) -> Polygon {
    let steps = ((r.abs().sqrt() * (a2 - a1).abs()) as i64).max(6);
    let n = (steps - 1) as usize;
    let da = (a2 - a1) / n as f64;
    let mut a = a1;
    let mut result = Vec::with_capacity(steps as usize);
    for _ in 0..=n {
        result.push(IntPoint::new(
            pt.x + clipper_round(a.cos() * r),
            pt.y + clipper_round(a.sin() * r),
        ));
        a += da;
    }
    result
}
