use crate::clipper::constants::{HORIZONTAL, UNASSIGNED};
use crate::clipper::enums::{EdgeSide, PolyType};
use crate::clipper::math::{clipper_round, slopes_equal_deltas};
use crate::geometry::IntPoint;

/// Arena slot for one input segment. All links are handles into the owning
/// edge arena; `UNASSIGNED` is the null handle. Geometry is fixed after
/// ingestion, only winding/link/side fields mutate during the sweep.
#[derive(Debug, Clone)]
pub struct Edge {
    pub bot: IntPoint,
    pub curr: IntPoint,
    pub top: IntPoint,
    pub dx: f64,
    /// Projected X at the top of the scanbeam, valid only while building the
    /// intersection list.
    pub tmp_x: i64,
    pub poly_type: PolyType,
    pub side: EdgeSide,
    pub wind_delta: i32,
    pub wind_cnt: i32,
    /// Winding count of the opposite poly type.
    pub wind_cnt2: i32,
    pub out_idx: usize,
    pub next: usize,
    pub prev: usize,
    pub next_in_lml: usize,
    pub next_in_ael: usize,
    pub prev_in_ael: usize,
    pub next_in_sel: usize,
    pub prev_in_sel: usize,
}

impl Edge {
    pub fn new(poly_type: PolyType) -> Self {
        Self {
            bot: IntPoint::default(),
            curr: IntPoint::default(),
            top: IntPoint::default(),
            dx: 0.0,
            tmp_x: 0,
            poly_type,
            side: EdgeSide::Left,
            wind_delta: 0,
            wind_cnt: 0,
            wind_cnt2: 0,
            out_idx: UNASSIGNED,
            next: UNASSIGNED,
            prev: UNASSIGNED,
            next_in_lml: UNASSIGNED,
            next_in_ael: UNASSIGNED,
            prev_in_ael: UNASSIGNED,
            next_in_sel: UNASSIGNED,
            prev_in_sel: UNASSIGNED,
        }
    }

    pub fn set_dx(&mut self) {
        if self.bot.y == self.top.y {
            self.dx = HORIZONTAL;
        } else {
            self.dx = (self.top.x - self.bot.x) as f64 / (self.top.y - self.bot.y) as f64;
        }
    }

    #[inline(always)]
    pub fn is_horizontal(&self) -> bool {
        self.dx == HORIZONTAL
    }

    #[inline(always)]
    pub fn is_assigned(&self) -> bool {
        self.out_idx != UNASSIGNED
    }

    pub fn top_x(&self, current_y: i64) -> i64 {
        if current_y == self.top.y {
            self.top.x
        } else {
            self.bot.x + clipper_round(self.dx * (current_y - self.bot.y) as f64)
        }
    }

    /// Swaps a horizontal edge's bottom and top X so its bot aligns with the
    /// adjoining lower edge when walking a bound.
    pub fn swap_x(&mut self) {
        self.curr.x = self.top.x;
        self.top.x = self.bot.x;
        self.bot.x = self.curr.x;
    }
}

pub fn slopes_equal_edges(e1: &Edge, e2: &Edge, use_full_range: bool) -> bool {
    slopes_equal_deltas(
        e1.top.y - e1.bot.y,
        e1.top.x - e1.bot.x,
        e2.top.y - e2.bot.y,
        e2.top.x - e2.bot.x,
        use_full_range,
    )
}

/// Intersection of the two edges' support lines, rounded to the grid.
/// Returns false for parallel edges, and for near-top intersections whose
/// rounded Y lands on an edge top without the edges actually crossing yet.
pub fn intersect_point(e1: &Edge, e2: &Edge, use_full_range: bool) -> (IntPoint, bool) {
    let mut ip = IntPoint::default();
    if slopes_equal_edges(e1, e2, use_full_range) {
        return (ip, false);
    }

    if e1.dx == 0.0 {
        ip.x = e1.bot.x;
        if e2.is_horizontal() {
            ip.y = e2.bot.y;
        } else {
            let b2 = e2.bot.y as f64 - e2.bot.x as f64 / e2.dx;
            ip.y = clipper_round(ip.x as f64 / e2.dx + b2);
        }
    } else if e2.dx == 0.0 {
        ip.x = e2.bot.x;
        if e1.is_horizontal() {
            ip.y = e1.bot.y;
        } else {
            let b1 = e1.bot.y as f64 - e1.bot.x as f64 / e1.dx;
            ip.y = clipper_round(ip.x as f64 / e1.dx + b1);
        }
    } else {
        let b1 = e1.bot.x as f64 - e1.bot.y as f64 * e1.dx;
        let b2 = e2.bot.x as f64 - e2.bot.y as f64 * e2.dx;
        let q = (b2 - b1) / (e1.dx - e2.dx);
        ip.y = clipper_round(q);
        ip.x = clipper_round(e1.dx * q + b1);
    }

    // Rounding can pull the intersection Y exactly onto an edge top; accept it
    // only when the projected order really is inverted there.
    let ok = (ip.y == e1.top.y && ip.y >= e2.top.y && e1.tmp_x > e2.tmp_x)
        || (ip.y == e2.top.y && ip.y >= e1.top.y && e1.tmp_x > e2.tmp_x)
        || (ip.y > e1.top.y && ip.y > e2.top.y);
    (ip, ok)
}
