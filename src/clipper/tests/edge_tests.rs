use crate::clipper::constants::HORIZONTAL;
use crate::clipper::edge::{intersect_point, slopes_equal_edges, Edge};
use crate::clipper::enums::PolyType;
use crate::geometry::IntPoint;

fn make_edge(bot: IntPoint, top: IntPoint) -> Edge {
    let mut e = Edge::new(PolyType::Subject);
    e.bot = bot;
    e.top = top;
    e.curr = bot;
    e.set_dx();
    e
}

#[test]
fn horizontal_edges_take_the_slope_sentinel() {
    let e = make_edge(IntPoint::new(0, 5), IntPoint::new(10, 5));
    assert_eq!(e.dx, HORIZONTAL);
    assert!(e.is_horizontal());

    let e = make_edge(IntPoint::new(0, 10), IntPoint::new(0, 0));
    assert!(!e.is_horizontal());
    assert_eq!(e.dx, 0.0);
}

#[test]
fn top_x_interpolates_along_the_edge() {
    let e = make_edge(IntPoint::new(0, 10), IntPoint::new(10, 0));
    assert_eq!(e.top_x(10), 0);
    assert_eq!(e.top_x(5), 5);
    assert_eq!(e.top_x(0), 10);
}

#[test]
fn swap_x_exchanges_endpoints_of_a_horizontal() {
    let mut e = make_edge(IntPoint::new(0, 5), IntPoint::new(10, 5));
    e.swap_x();
    assert_eq!(e.bot.x, 10);
    assert_eq!(e.top.x, 0);
}

#[test]
fn crossing_diagonals_intersect_at_the_midpoint() {
    let mut e1 = make_edge(IntPoint::new(0, 10), IntPoint::new(10, 0));
    let mut e2 = make_edge(IntPoint::new(10, 10), IntPoint::new(0, 0));
    e1.tmp_x = e1.top_x(0);
    e2.tmp_x = e2.top_x(0);
    let (pt, ok) = intersect_point(&e1, &e2, false);
    assert!(ok);
    assert_eq!(pt, IntPoint::new(5, 5));
}

#[test]
fn parallel_edges_do_not_intersect() {
    let e1 = make_edge(IntPoint::new(0, 10), IntPoint::new(10, 0));
    let e2 = make_edge(IntPoint::new(5, 10), IntPoint::new(15, 0));
    assert!(slopes_equal_edges(&e1, &e2, false));
    let (_, ok) = intersect_point(&e1, &e2, false);
    assert!(!ok);
}

#[test]
fn vertical_edge_intersection_lands_on_the_vertical() {
    let mut e1 = make_edge(IntPoint::new(5, 10), IntPoint::new(5, 0));
    let mut e2 = make_edge(IntPoint::new(0, 10), IntPoint::new(10, 0));
    e1.tmp_x = e1.top_x(0);
    e2.tmp_x = e2.top_x(0);
    let (pt, ok) = intersect_point(&e1, &e2, false);
    assert!(ok);
    assert_eq!(pt, IntPoint::new(5, 5));
}
