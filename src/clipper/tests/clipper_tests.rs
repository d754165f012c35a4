use crate::clipper::clipper::{Clipper, ExPolygons, Polygons};
use crate::clipper::constants::LO_RANGE;
use crate::clipper::edge::Edge;
use crate::clipper::enums::{ClipType, PolyFillType, PolyType};
use crate::clipper::join::JoinRec;
use crate::clipper::math::{area, orientation};
use crate::clipper::tests::{square, total_area};
use crate::geometry::IntPoint;

fn clip_squares(clip_type: ClipType) -> Polygons {
    let mut clipper = Clipper::new();
    clipper
        .add_polygon(&square(0, 0, 10), PolyType::Subject)
        .unwrap();
    clipper.add_polygon(&square(5, 5, 10), PolyType::Clip).unwrap();
    let mut solution = Polygons::new();
    let ok = clipper
        .execute(
            clip_type,
            &mut solution,
            PolyFillType::EvenOdd,
            PolyFillType::EvenOdd,
        )
        .unwrap();
    assert!(ok);
    solution
}

#[test]
fn intersection_of_overlapping_squares() {
    let solution = clip_squares(ClipType::Intersection);
    assert_eq!(solution.len(), 1);
    assert_eq!(total_area(&solution), 25.0);
}

#[test]
fn union_of_overlapping_squares() {
    let solution = clip_squares(ClipType::Union);
    assert_eq!(solution.len(), 1);
    assert_eq!(total_area(&solution), 175.0);
}

#[test]
fn difference_of_overlapping_squares() {
    let solution = clip_squares(ClipType::Difference);
    assert_eq!(solution.len(), 1);
    assert_eq!(total_area(&solution), 75.0);
}

#[test]
fn xor_of_overlapping_squares() {
    let solution = clip_squares(ClipType::Xor);
    assert_eq!(total_area(&solution), 150.0);
}

#[test]
fn disjoint_squares_do_not_intersect() {
    let mut clipper = Clipper::new();
    clipper
        .add_polygon(&square(0, 0, 10), PolyType::Subject)
        .unwrap();
    clipper
        .add_polygon(&square(20, 20, 10), PolyType::Clip)
        .unwrap();
    let mut solution = Polygons::new();
    clipper
        .execute(
            ClipType::Intersection,
            &mut solution,
            PolyFillType::EvenOdd,
            PolyFillType::EvenOdd,
        )
        .unwrap();
    assert!(solution.is_empty());
}

#[test]
fn union_of_disjoint_squares_keeps_both() {
    let mut clipper = Clipper::new();
    clipper
        .add_polygon(&square(0, 0, 10), PolyType::Subject)
        .unwrap();
    clipper
        .add_polygon(&square(20, 20, 10), PolyType::Clip)
        .unwrap();
    let mut solution = Polygons::new();
    clipper
        .execute(
            ClipType::Union,
            &mut solution,
            PolyFillType::EvenOdd,
            PolyFillType::EvenOdd,
        )
        .unwrap();
    assert_eq!(solution.len(), 2);
    assert_eq!(total_area(&solution), 200.0);
}

#[test]
fn contained_square_difference_produces_a_hole() {
    let mut clipper = Clipper::new();
    clipper
        .add_polygon(&square(0, 0, 20), PolyType::Subject)
        .unwrap();
    clipper.add_polygon(&square(5, 5, 10), PolyType::Clip).unwrap();
    let mut solution = ExPolygons::new();
    let ok = clipper
        .execute_ex(
            ClipType::Difference,
            &mut solution,
            PolyFillType::EvenOdd,
            PolyFillType::EvenOdd,
        )
        .unwrap();
    assert!(ok);
    assert_eq!(solution.len(), 1);
    assert_eq!(solution[0].holes.len(), 1);
    assert!(orientation(&solution[0].outer));
    assert!(!orientation(&solution[0].holes[0]));
    assert_eq!(area(&solution[0].outer), 400.0);
    assert_eq!(area(&solution[0].holes[0]), -100.0);
}

#[test]
fn self_union_is_idempotent() {
    let mut clipper = Clipper::new();
    clipper
        .add_polygon(&square(0, 0, 10), PolyType::Subject)
        .unwrap();
    let mut solution = Polygons::new();
    clipper
        .execute(
            ClipType::Union,
            &mut solution,
            PolyFillType::NonZero,
            PolyFillType::NonZero,
        )
        .unwrap();
    assert_eq!(solution.len(), 1);
    assert_eq!(total_area(&solution), 100.0);
}

#[test]
fn instance_is_reusable_across_executes() {
    let mut clipper = Clipper::new();
    clipper
        .add_polygon(&square(0, 0, 10), PolyType::Subject)
        .unwrap();
    clipper.add_polygon(&square(5, 5, 10), PolyType::Clip).unwrap();
    let mut first = Polygons::new();
    let mut second = Polygons::new();
    clipper
        .execute(
            ClipType::Intersection,
            &mut first,
            PolyFillType::EvenOdd,
            PolyFillType::EvenOdd,
        )
        .unwrap();
    clipper
        .execute(
            ClipType::Intersection,
            &mut second,
            PolyFillType::EvenOdd,
            PolyFillType::EvenOdd,
        )
        .unwrap();
    assert_eq!(first, second);
}

#[test]
fn reverse_solution_flips_output_winding() {
    let mut clipper = Clipper::with_reverse_solution(true);
    assert!(clipper.reverse_solution());
    clipper
        .add_polygon(&square(0, 0, 10), PolyType::Subject)
        .unwrap();
    let mut solution = Polygons::new();
    clipper
        .execute(
            ClipType::Union,
            &mut solution,
            PolyFillType::EvenOdd,
            PolyFillType::EvenOdd,
        )
        .unwrap();
    assert_eq!(solution.len(), 1);
    assert!(!orientation(&solution[0]));
}

#[test]
fn large_coordinates_use_extended_precision() {
    let big = LO_RANGE + 1;
    let mut clipper = Clipper::new();
    clipper
        .add_polygon(&square(0, 0, big), PolyType::Subject)
        .unwrap();
    clipper
        .add_polygon(&square(big / 2, big / 2, big), PolyType::Clip)
        .unwrap();
    assert!(clipper.base.use_full_range);
    let mut solution = Polygons::new();
    clipper
        .execute(
            ClipType::Intersection,
            &mut solution,
            PolyFillType::EvenOdd,
            PolyFillType::EvenOdd,
        )
        .unwrap();
    assert_eq!(solution.len(), 1);
    let half = (big - big / 2) as f64;
    assert_eq!(total_area(&solution), half * half);
}

#[test]
fn degenerate_input_executes_to_empty_solution() {
    let mut clipper = Clipper::new();
    let added = clipper
        .add_polygons(
            &vec![vec![
                crate::geometry::IntPoint::new(0, 0),
                crate::geometry::IntPoint::new(10, 0),
            ]],
            PolyType::Subject,
        )
        .unwrap();
    assert!(!added);
    let mut solution = Polygons::new();
    let ok = clipper
        .execute(
            ClipType::Union,
            &mut solution,
            PolyFillType::EvenOdd,
            PolyFillType::EvenOdd,
        )
        .unwrap();
    assert!(ok);
    assert!(solution.is_empty());
}

#[test]
fn shared_edge_union_merges_into_one_ring() {
    let mut clipper = Clipper::new();
    clipper
        .add_polygon(&square(0, 0, 10), PolyType::Subject)
        .unwrap();
    clipper
        .add_polygon(&square(10, 0, 10), PolyType::Subject)
        .unwrap();
    let mut solution = Polygons::new();
    clipper
        .execute(
            ClipType::Union,
            &mut solution,
            PolyFillType::NonZero,
            PolyFillType::NonZero,
        )
        .unwrap();
    assert_eq!(solution.len(), 1);
    assert_eq!(total_area(&solution), 200.0);
}

#[test]
fn union_merges_rings_meeting_along_a_shared_vertical_edge() {
    let mut clipper = Clipper::new();
    clipper
        .add_polygon(
            &vec![
                IntPoint::new(0, 0),
                IntPoint::new(10, 0),
                IntPoint::new(10, 30),
                IntPoint::new(0, 30),
            ],
            PolyType::Subject,
        )
        .unwrap();
    // touches the rectangle's right side along x = 10, y in 5..15 only
    clipper
        .add_polygon(
            &vec![
                IntPoint::new(10, 5),
                IntPoint::new(20, 5),
                IntPoint::new(20, 25),
                IntPoint::new(10, 15),
            ],
            PolyType::Subject,
        )
        .unwrap();
    let mut solution = Polygons::new();
    clipper
        .execute(
            ClipType::Union,
            &mut solution,
            PolyFillType::NonZero,
            PolyFillType::NonZero,
        )
        .unwrap();
    assert_eq!(solution.len(), 1);
    assert_eq!(total_area(&solution), 450.0);
}

#[test]
fn drifted_parallel_edges_record_no_intersection_event() {
    let mut clipper = Clipper::new();
    let mut right = Edge::new(PolyType::Subject);
    right.bot = IntPoint::new(1, 10);
    right.top = IntPoint::new(1, 0);
    right.curr = right.bot;
    right.set_dx();
    let mut left = Edge::new(PolyType::Subject);
    left.bot = IntPoint::new(0, 10);
    left.top = IntPoint::new(0, 0);
    left.curr = left.bot;
    left.set_dx();
    // the vertical at x = 1 sits before the one at x = 0, an inversion
    // with no genuine crossing to resolve it
    clipper.base.edges.push(right);
    clipper.base.edges.push(left);
    clipper.base.edges[0].next_in_ael = 1;
    clipper.base.edges[1].prev_in_ael = 0;
    clipper.active_edges = 0;

    clipper.build_intersect_list(10, 0);
    assert!(clipper.intersections.is_empty());
}

fn link_ring(clipper: &mut Clipper, rec: usize, pts: &[IntPoint]) -> Vec<usize> {
    let handles: Vec<usize> = pts
        .iter()
        .map(|&pt| clipper.arena.create_pt(pt, rec))
        .collect();
    let n = handles.len();
    for i in 0..n {
        clipper.arena.pts[handles[i]].next = handles[(i + 1) % n];
        clipper.arena.pts[handles[i]].prev = handles[(i + n - 1) % n];
    }
    clipper.arena.recs[rec].pts = handles[0];
    handles
}

#[test]
fn splitting_a_ring_relinks_dependent_holes_to_the_outer_half() {
    let mut clipper = Clipper::new();

    let enclosing = clipper.arena.create_rec();
    link_ring(
        &mut clipper,
        enclosing,
        &[
            IntPoint::new(0, 0),
            IntPoint::new(100, 0),
            IntPoint::new(100, 100),
            IntPoint::new(0, 100),
        ],
    );

    // a ring that touches itself along a doubled channel at y = 50,
    // x in 60..80, enclosing an inner square loop
    let pinched = clipper.arena.create_rec();
    link_ring(
        &mut clipper,
        pinched,
        &[
            IntPoint::new(20, 20),
            IntPoint::new(80, 20),
            IntPoint::new(80, 50),
            IntPoint::new(60, 50),
            IntPoint::new(60, 60),
            IntPoint::new(40, 60),
            IntPoint::new(40, 40),
            IntPoint::new(60, 40),
            IntPoint::new(60, 50),
            IntPoint::new(80, 50),
            IntPoint::new(80, 80),
            IntPoint::new(20, 80),
        ],
    );
    clipper.arena.recs[pinched].is_hole = true;
    clipper.arena.recs[pinched].first_left = enclosing;

    // a hole still linked to the pinched ring; its bottom point lies
    // outside the inner loop the split leaves behind
    let hole = clipper.arena.create_rec();
    let handles = link_ring(
        &mut clipper,
        hole,
        &[
            IntPoint::new(25, 70),
            IntPoint::new(30, 70),
            IntPoint::new(25, 72),
        ],
    );
    clipper.arena.recs[hole].is_hole = true;
    clipper.arena.recs[hole].first_left = pinched;
    clipper.arena.recs[hole].bottom_pt = handles[2];

    clipper.joins.push(JoinRec {
        pt1a: IntPoint::new(60, 50),
        pt1b: IntPoint::new(80, 50),
        poly1_idx: pinched,
        pt2a: IntPoint::new(60, 50),
        pt2b: IntPoint::new(80, 50),
        poly2_idx: pinched,
    });

    clipper.join_common_edges(true).unwrap();

    // the inner loop keeps the original record and is now enclosed by the
    // split-off outer half
    let split_off = clipper.arena.recs.len() - 1;
    assert!(!clipper.arena.recs[pinched].is_hole);
    assert_eq!(clipper.arena.recs[pinched].first_left, split_off);
    assert_eq!(clipper.arena.area_rec(pinched, false).abs(), 400.0);
    assert!(clipper.arena.recs[split_off].is_hole);
    assert_eq!(clipper.arena.recs[split_off].first_left, enclosing);
    assert_eq!(clipper.arena.recs[hole].first_left, split_off);
}

#[test]
fn triangle_square_intersection() {
    let mut clipper = Clipper::new();
    clipper
        .add_polygon(&square(0, 0, 10), PolyType::Subject)
        .unwrap();
    let triangle = vec![
        crate::geometry::IntPoint::new(0, 0),
        crate::geometry::IntPoint::new(10, 0),
        crate::geometry::IntPoint::new(0, 10),
    ];
    clipper.add_polygon(&triangle, PolyType::Clip).unwrap();
    let mut solution = Polygons::new();
    clipper
        .execute(
            ClipType::Intersection,
            &mut solution,
            PolyFillType::EvenOdd,
            PolyFillType::EvenOdd,
        )
        .unwrap();
    assert_eq!(solution.len(), 1);
    // the triangle's hypotenuse cuts one corner off the square
    assert_eq!(total_area(&solution), 50.0);
}
