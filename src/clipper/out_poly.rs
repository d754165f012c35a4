use crate::clipper::constants::{HORIZONTAL, UNASSIGNED};
use crate::clipper::enums::EdgeSide;
use crate::clipper::errors::ClipError;
use crate::clipper::math::{checked_div, slopes_equal_lines, slopes_equal_points};
use crate::geometry::IntPoint;

/// One vertex on a circular output ring.
#[derive(Debug, Clone, Copy)]
pub struct OutPt {
    pub pt: IntPoint,
    /// Index of the owning ring record.
    pub idx: usize,
    pub next: usize,
    pub prev: usize,
}

/// An output ring under construction: its points, hole state, the outer ring
/// it nests under, and bookkeeping for the post-sweep fixups.
#[derive(Debug, Clone, Copy)]
pub struct OutRec {
    pub idx: usize,
    pub is_hole: bool,
    pub first_left: usize,
    pub append_link: usize,
    pub pts: usize,
    pub bottom_pt: usize,
    pub bottom_flag: usize,
    pub sides: EdgeSide,
}

/// Arena for output rings. Points and ring records live in flat vectors and
/// reference each other by index; unlinked points are simply left behind.
#[derive(Debug, Default)]
pub struct OutPolyArena {
    pub pts: Vec<OutPt>,
    pub recs: Vec<OutRec>,
}

impl OutPolyArena {
    pub fn new() -> Self {
        Self {
            pts: Vec::new(),
            recs: Vec::new(),
        }
    }

    pub fn clear(&mut self) {
        self.pts.clear();
        self.recs.clear();
    }

    pub fn create_rec(&mut self) -> usize {
        let idx = self.recs.len();
        self.recs.push(OutRec {
            idx,
            is_hole: false,
            first_left: UNASSIGNED,
            append_link: UNASSIGNED,
            pts: UNASSIGNED,
            bottom_pt: UNASSIGNED,
            bottom_flag: UNASSIGNED,
            sides: EdgeSide::Neither,
        });
        idx
    }

    /// Allocates a point that is not yet linked into any ring.
    pub fn create_pt(&mut self, pt: IntPoint, idx: usize) -> usize {
        let op = self.pts.len();
        self.pts.push(OutPt {
            pt,
            idx,
            next: UNASSIGNED,
            prev: UNASSIGNED,
        });
        op
    }

    pub fn point_count(&self, pp: usize) -> usize {
        if pp == UNASSIGNED {
            return 0;
        }
        let mut count = 0;
        let mut p = pp;
        loop {
            count += 1;
            p = self.pts[p].next;
            if p == pp {
                break;
            }
        }
        count
    }

    pub fn ring_points(&self, pp: usize) -> Vec<IntPoint> {
        let mut result = Vec::new();
        if pp == UNASSIGNED {
            return result;
        }
        let mut p = pp;
        loop {
            result.push(self.pts[p].pt);
            p = self.pts[p].next;
            if p == pp {
                break;
            }
        }
        result
    }

    pub fn reverse_links(&mut self, pp: usize) {
        if pp == UNASSIGNED {
            return;
        }
        let mut p1 = pp;
        loop {
            let p2 = self.pts[p1].next;
            self.pts[p1].next = self.pts[p1].prev;
            self.pts[p1].prev = p2;
            p1 = p2;
            if p1 == pp {
                break;
            }
        }
    }

    pub fn insert_between(&mut self, p1: usize, p2: usize, pt: IntPoint) -> usize {
        let result = self.create_pt(pt, self.pts[p1].idx);
        if p2 == self.pts[p1].next {
            self.pts[p1].next = result;
            self.pts[p2].prev = result;
            self.pts[result].next = p2;
            self.pts[result].prev = p1;
        } else {
            self.pts[p2].next = result;
            self.pts[p1].prev = result;
            self.pts[result].next = p1;
            self.pts[result].prev = p2;
        }
        result
    }

    pub fn point_is_vertex(&self, pt: &IntPoint, pp: usize) -> bool {
        let mut p = pp;
        loop {
            if self.pts[p].pt == *pt {
                return true;
            }
            p = self.pts[p].next;
            if p == pp {
                break;
            }
        }
        false
    }

    /// Even-odd crossing test of `pt` against the ring starting at `pp`.
    pub fn point_in_ring(
        &self,
        pt: &IntPoint,
        pp: usize,
        use_full_range: bool,
    ) -> Result<bool, ClipError> {
        let mut result = false;
        let mut p = pp;
        loop {
            let cur = self.pts[p].pt;
            let prev = self.pts[self.pts[p].prev].pt;
            if (cur.y <= pt.y && pt.y < prev.y) || (prev.y <= pt.y && pt.y < cur.y) {
                let crosses = if use_full_range {
                    let num = (prev.x - cur.x) as i128 * (pt.y - cur.y) as i128;
                    ((pt.x - cur.x) as i128) < checked_div(num, (prev.y - cur.y) as i128)?
                } else {
                    if prev.y == cur.y {
                        return Err(ClipError::ZeroDenominator);
                    }
                    pt.x - cur.x < (prev.x - cur.x) * (pt.y - cur.y) / (prev.y - cur.y)
                };
                if crosses {
                    result = !result;
                }
            }
            p = self.pts[p].next;
            if p == pp {
                break;
            }
        }
        Ok(result)
    }

    fn get_dx(pt1: &IntPoint, pt2: &IntPoint) -> f64 {
        if pt1.y == pt2.y {
            HORIZONTAL
        } else {
            (pt2.x - pt1.x) as f64 / (pt2.y - pt1.y) as f64
        }
    }

    /// When two candidate bottom points coincide, the one whose adjacent
    /// edges diverge least steeply anchors the ring.
    pub fn first_is_bottom_pt(&self, btm_pt1: usize, btm_pt2: usize) -> bool {
        let mut p = self.pts[btm_pt1].prev;
        while self.pts[p].pt == self.pts[btm_pt1].pt && p != btm_pt1 {
            p = self.pts[p].prev;
        }
        let dx1p = Self::get_dx(&self.pts[btm_pt1].pt, &self.pts[p].pt).abs();
        let mut p = self.pts[btm_pt1].next;
        while self.pts[p].pt == self.pts[btm_pt1].pt && p != btm_pt1 {
            p = self.pts[p].next;
        }
        let dx1n = Self::get_dx(&self.pts[btm_pt1].pt, &self.pts[p].pt).abs();

        let mut p = self.pts[btm_pt2].prev;
        while self.pts[p].pt == self.pts[btm_pt2].pt && p != btm_pt2 {
            p = self.pts[p].prev;
        }
        let dx2p = Self::get_dx(&self.pts[btm_pt2].pt, &self.pts[p].pt).abs();
        let mut p = self.pts[btm_pt2].next;
        while self.pts[p].pt == self.pts[btm_pt2].pt && p != btm_pt2 {
            p = self.pts[p].next;
        }
        let dx2n = Self::get_dx(&self.pts[btm_pt2].pt, &self.pts[p].pt).abs();

        (dx1p >= dx2p && dx1p >= dx2n) || (dx1n >= dx2p && dx1n >= dx2n)
    }

    /// Bottommost-then-leftmost vertex of a ring, with duplicate-vertex
    /// disambiguation.
    pub fn get_bottom_pt(&self, start: usize) -> usize {
        let mut pp = start;
        let mut dups = UNASSIGNED;
        let mut p = self.pts[start].next;
        while p != pp {
            if self.pts[p].pt.y > self.pts[pp].pt.y {
                pp = p;
                dups = UNASSIGNED;
            } else if self.pts[p].pt.y == self.pts[pp].pt.y && self.pts[p].pt.x <= self.pts[pp].pt.x
            {
                if self.pts[p].pt.x < self.pts[pp].pt.x {
                    dups = UNASSIGNED;
                    pp = p;
                } else if self.pts[p].next != pp && self.pts[p].prev != pp {
                    dups = p;
                }
            }
            p = self.pts[p].next;
        }
        if dups != UNASSIGNED {
            // at least two vertices share the bottom point
            let mut d = dups;
            while d != p {
                if !self.first_is_bottom_pt(p, d) {
                    pp = d;
                }
                d = self.pts[d].next;
                while self.pts[d].pt != self.pts[pp].pt {
                    d = self.pts[d].next;
                }
            }
        }
        pp
    }

    /// Of two rings about to merge, picks the one whose bottom point sits
    /// lower; that ring's hole state survives the merge.
    pub fn get_lowermost_rec(&self, rec1: usize, rec2: usize) -> usize {
        let b_pt1 = self.recs[rec1].bottom_pt;
        let b_pt2 = self.recs[rec2].bottom_pt;
        let pt1 = self.pts[b_pt1].pt;
        let pt2 = self.pts[b_pt2].pt;
        if pt1.y > pt2.y {
            rec1
        } else if pt1.y < pt2.y {
            rec2
        } else if pt1.x < pt2.x {
            rec1
        } else if pt1.x > pt2.x {
            rec2
        } else if self.pts[b_pt1].next == b_pt1 {
            rec2
        } else if self.pts[b_pt2].next == b_pt2 {
            rec1
        } else if self.first_is_bottom_pt(b_pt1, b_pt2) {
            rec1
        } else {
            rec2
        }
    }

    pub fn find_append_link_end(&self, rec: usize) -> usize {
        let mut r = rec;
        while self.recs[r].append_link != UNASSIGNED {
            r = self.recs[r].append_link;
        }
        r
    }

    /// Removes duplicate vertices and collapses collinear runs; rings that
    /// degenerate below a triangle are discarded.
    pub fn fixup_out_polygon(&mut self, rec: usize, use_full_range: bool) {
        let mut last_ok = UNASSIGNED;
        self.recs[rec].pts = self.recs[rec].bottom_pt;
        let mut pp = self.recs[rec].bottom_pt;
        loop {
            if self.pts[pp].prev == pp || self.pts[pp].prev == self.pts[pp].next {
                self.recs[rec].pts = UNASSIGNED;
                self.recs[rec].bottom_pt = UNASSIGNED;
                return;
            }
            let prev = self.pts[pp].prev;
            let next = self.pts[pp].next;
            if self.pts[pp].pt == self.pts[next].pt
                || slopes_equal_points(
                    &self.pts[prev].pt,
                    &self.pts[pp].pt,
                    &self.pts[next].pt,
                    use_full_range,
                )
            {
                last_ok = UNASSIGNED;
                if pp == self.recs[rec].bottom_pt {
                    self.recs[rec].bottom_pt = UNASSIGNED;
                }
                self.pts[prev].next = next;
                self.pts[next].prev = prev;
                pp = prev;
            } else if pp == last_ok {
                break;
            } else {
                if last_ok == UNASSIGNED {
                    last_ok = pp;
                }
                pp = self.pts[pp].next;
            }
        }
        if self.recs[rec].bottom_pt == UNASSIGNED {
            let bottom = self.get_bottom_pt(pp);
            self.pts[bottom].idx = rec;
            self.recs[rec].bottom_pt = bottom;
            self.recs[rec].pts = bottom;
        }
    }

    /// Winding direction of a ring; re-anchors the record's bottom point as a
    /// side effect, mirroring the sweep's post-pass.
    pub fn orientation_rec(&mut self, rec: usize, use_full_range: bool) -> bool {
        let start = self.recs[rec].pts;
        let mut op_bottom = start;
        let mut op = self.pts[start].next;
        while op != start {
            if self.pts[op].pt.y >= self.pts[op_bottom].pt.y
                && (self.pts[op].pt.y > self.pts[op_bottom].pt.y
                    || self.pts[op].pt.x < self.pts[op_bottom].pt.x)
            {
                op_bottom = op;
            }
            op = self.pts[op].next;
        }
        self.recs[rec].bottom_pt = op_bottom;
        self.pts[op_bottom].idx = rec;

        let op = op_bottom;
        let mut op_prev = self.pts[op].prev;
        let mut op_next = self.pts[op].next;
        while op != op_prev && self.pts[op].pt == self.pts[op_prev].pt {
            op_prev = self.pts[op_prev].prev;
        }
        while op != op_next && self.pts[op].pt == self.pts[op_next].pt {
            op_next = self.pts[op_next].next;
        }

        let vec1 = IntPoint::new(
            self.pts[op].pt.x - self.pts[op_prev].pt.x,
            self.pts[op].pt.y - self.pts[op_prev].pt.y,
        );
        let vec2 = IntPoint::new(
            self.pts[op_next].pt.x - self.pts[op].pt.x,
            self.pts[op_next].pt.y - self.pts[op].pt.y,
        );

        if use_full_range {
            let cross = vec1.x as i128 * vec2.y as i128 - vec2.x as i128 * vec1.y as i128;
            cross >= 0
        } else {
            vec1.x * vec2.y - vec2.x * vec1.y > 0
        }
    }

    /// Signed area of a ring (positive for the dominant orientation).
    pub fn area_rec(&self, rec: usize, use_full_range: bool) -> f64 {
        let start = self.recs[rec].pts;
        if start == UNASSIGNED {
            return 0.0;
        }
        if use_full_range {
            let mut a: i128 = 0;
            let mut op = start;
            loop {
                let prev = self.pts[self.pts[op].prev].pt;
                let cur = self.pts[op].pt;
                a += prev.x as i128 * cur.y as i128 - cur.x as i128 * prev.y as i128;
                op = self.pts[op].next;
                if op == start {
                    break;
                }
            }
            a as f64 / 2.0
        } else {
            let mut a = 0.0;
            let mut op = start;
            loop {
                let prev = self.pts[self.pts[op].prev].pt;
                let cur = self.pts[op].pt;
                a += prev.x as f64 * cur.y as f64 - cur.x as f64 * prev.y as f64;
                op = self.pts[op].next;
                if op == start {
                    break;
                }
            }
            a / 2.0
        }
    }

    /// Drops a bottom point flagged as a rounding artifact; its successor
    /// becomes the ring's anchor.
    pub fn dispose_bottom_pt(&mut self, rec: usize) {
        let bottom = self.recs[rec].bottom_pt;
        let next = self.pts[bottom].next;
        let prev = self.pts[bottom].prev;
        if self.recs[rec].pts == bottom {
            self.recs[rec].pts = next;
        }
        self.pts[next].prev = prev;
        self.pts[prev].next = next;
        self.recs[rec].bottom_pt = next;
    }

    /// Finds a ring segment collinear with and overlapping `pt1`..`pt2`;
    /// narrows `pt1`/`pt2` to the overlap and returns the position reached.
    pub fn find_segment(
        &self,
        pp: usize,
        pt1: &mut IntPoint,
        pt2: &mut IntPoint,
    ) -> Option<usize> {
        if pp == UNASSIGNED {
            return None;
        }
        let pt1a = *pt1;
        let pt2a = *pt2;
        let mut p = pp;
        loop {
            let cur = self.pts[p].pt;
            let prev = self.pts[self.pts[p].prev].pt;
            if slopes_equal_lines(&pt1a, &pt2a, &cur, &prev, true)
                && slopes_equal_points(&pt1a, &pt2a, &cur, true)
            {
                if let Some((a, b)) = get_overlap_segment(pt1a, pt2a, cur, prev) {
                    *pt1 = a;
                    *pt2 = b;
                    return Some(p);
                }
            }
            p = self.pts[p].next;
            if p == pp {
                break;
            }
        }
        None
    }
}

/// Overlap of two collinear segments, or `None` when they only touch.
pub fn get_overlap_segment(
    mut pt1a: IntPoint,
    mut pt1b: IntPoint,
    mut pt2a: IntPoint,
    mut pt2b: IntPoint,
) -> Option<(IntPoint, IntPoint)> {
    if pt1a.y == pt1b.y || ((pt1a.x - pt1b.x) as f64 / (pt1a.y - pt1b.y) as f64).abs() > 1.0 {
        if pt1a.x > pt1b.x {
            std::mem::swap(&mut pt1a, &mut pt1b);
        }
        if pt2a.x > pt2b.x {
            std::mem::swap(&mut pt2a, &mut pt2b);
        }
        let pt1 = if pt1a.x > pt2a.x { pt1a } else { pt2a };
        let pt2 = if pt1b.x < pt2b.x { pt1b } else { pt2b };
        if pt1.x < pt2.x {
            Some((pt1, pt2))
        } else {
            None
        }
    } else {
        if pt1a.y < pt1b.y {
            std::mem::swap(&mut pt1a, &mut pt1b);
        }
        if pt2a.y < pt2b.y {
            std::mem::swap(&mut pt2a, &mut pt2b);
        }
        let pt1 = if pt1a.y < pt2a.y { pt1a } else { pt2a };
        let pt2 = if pt1b.y > pt2b.y { pt1b } else { pt2b };
        if pt1.y > pt2.y {
            Some((pt1, pt2))
        } else {
            None
        }
    }
}

pub fn pt3_is_between_pt1_and_pt2(pt1: &IntPoint, pt2: &IntPoint, pt3: &IntPoint) -> bool {
    if pt1 == pt3 || pt2 == pt3 {
        true
    } else if pt1.x != pt2.x {
        (pt1.x < pt3.x) == (pt3.x < pt2.x)
    } else {
        (pt1.y < pt3.y) == (pt3.y < pt2.y)
    }
}
