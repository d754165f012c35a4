use crate::clipper::out_poly::OutPolyArena;
use crate::geometry::IntPoint;

fn link_ring(arena: &mut OutPolyArena, rec: usize, pts: &[IntPoint]) -> Vec<usize> {
    let handles: Vec<usize> = pts.iter().map(|&pt| arena.create_pt(pt, rec)).collect();
    let n = handles.len();
    for i in 0..n {
        arena.pts[handles[i]].next = handles[(i + 1) % n];
        arena.pts[handles[i]].prev = handles[(i + n - 1) % n];
    }
    arena.recs[rec].pts = handles[0];
    handles
}

#[test]
fn disposing_the_bottom_pt_promotes_its_successor() {
    let mut arena = OutPolyArena::new();
    let rec = arena.create_rec();
    // the successor of the bottom point is not the lowest remaining vertex
    let handles = link_ring(
        &mut arena,
        rec,
        &[
            IntPoint::new(0, 0),
            IntPoint::new(10, 0),
            IntPoint::new(10, 10),
            IntPoint::new(0, 12),
        ],
    );
    arena.recs[rec].bottom_pt = handles[3];

    arena.dispose_bottom_pt(rec);

    assert_eq!(arena.recs[rec].bottom_pt, handles[0]);
    assert_eq!(arena.pts[handles[0]].prev, handles[2]);
    assert_eq!(arena.pts[handles[2]].next, handles[0]);
    assert_eq!(arena.point_count(arena.recs[rec].pts), 3);
}
