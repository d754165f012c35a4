use crate::clipper::clipper_base::ClipperBase;
use crate::clipper::constants::UNASSIGNED;
use crate::clipper::edge::{intersect_point, slopes_equal_edges, Edge};
use crate::clipper::enums::{ClipType, Direction, EdgeSide, PolyFillType, PolyType, Protects};
use crate::clipper::errors::ClipError;
use crate::clipper::intersect_node::IntersectList;
use crate::clipper::join::{HorzJoinRec, JoinRec};
use crate::clipper::math::slopes_equal_lines;
use crate::clipper::out_poly::{get_overlap_segment, pt3_is_between_pt1_and_pt2, OutPolyArena};
use crate::clipper::scanbeam::Scanbeam;
use crate::geometry::{IntPoint, IntRect};

pub type Polygon = Vec<IntPoint>;
pub type Polygons = Vec<Polygon>;

/// An outer ring together with the holes nested directly inside it.
#[derive(Debug, Clone, Default)]
pub struct ExPolygon {
    pub outer: Polygon,
    pub holes: Vec<Polygon>,
}

pub type ExPolygons = Vec<ExPolygon>;

/// Boolean clipping engine: ingests subject and clip polygons, then sweeps
/// them bottom-up producing the result of the requested operation.
#[derive(Debug)]
pub struct Clipper {
    pub(crate) base: ClipperBase,
    scanbeam: Scanbeam,
    pub(crate) active_edges: usize,
    sorted_edges: usize,
    pub(crate) intersections: IntersectList,
    pub(crate) arena: OutPolyArena,
    pub(crate) joins: Vec<JoinRec>,
    horz_joins: Vec<HorzJoinRec>,
    clip_type: ClipType,
    clip_fill_type: PolyFillType,
    subj_fill_type: PolyFillType,
    reverse_output: bool,
    execute_locked: bool,
}

impl Default for Clipper {
    fn default() -> Self {
        Self::new()
    }
}

impl Clipper {
    pub fn new() -> Self {
        Self {
            base: ClipperBase::new(),
            scanbeam: Scanbeam::new(),
            active_edges: UNASSIGNED,
            sorted_edges: UNASSIGNED,
            intersections: IntersectList::new(),
            arena: OutPolyArena::new(),
            joins: Vec::new(),
            horz_joins: Vec::new(),
            clip_type: ClipType::Intersection,
            clip_fill_type: PolyFillType::EvenOdd,
            subj_fill_type: PolyFillType::EvenOdd,
            reverse_output: false,
            execute_locked: false,
        }
    }

    pub fn with_reverse_solution(reverse: bool) -> Self {
        let mut clipper = Self::new();
        clipper.reverse_output = reverse;
        clipper
    }

    pub fn reverse_solution(&self) -> bool {
        self.reverse_output
    }

    pub fn set_reverse_solution(&mut self, reverse: bool) {
        self.reverse_output = reverse;
    }

    pub fn add_polygon(&mut self, pg: &[IntPoint], poly_type: PolyType) -> Result<bool, ClipError> {
        self.base.add_polygon(pg, poly_type)
    }

    pub fn add_polygons(
        &mut self,
        polygons: &[Polygon],
        poly_type: PolyType,
    ) -> Result<bool, ClipError> {
        self.base.add_polygons(polygons, poly_type)
    }

    pub fn clear(&mut self) {
        self.base.clear();
    }

    pub fn get_bounds(&self) -> IntRect {
        self.base.get_bounds()
    }

    /// Runs the requested operation and fills `solution` with flat rings.
    /// Returns `Ok(false)` only when called reentrantly. On error all sweep
    /// state is discarded; the ingested geometry remains usable.
    pub fn execute(
        &mut self,
        clip_type: ClipType,
        solution: &mut Polygons,
        subj_fill_type: PolyFillType,
        clip_fill_type: PolyFillType,
    ) -> Result<bool, ClipError> {
        if self.execute_locked {
            return Ok(false);
        }
        self.execute_locked = true;
        solution.clear();
        self.subj_fill_type = subj_fill_type;
        self.clip_fill_type = clip_fill_type;
        self.clip_type = clip_type;
        let result = self.execute_internal(false);
        self.finish_execute(result.is_err());
        result?;
        self.build_result(solution);
        Ok(true)
    }

    /// As `execute`, but groups each outer ring with the holes it contains.
    pub fn execute_ex(
        &mut self,
        clip_type: ClipType,
        solution: &mut ExPolygons,
        subj_fill_type: PolyFillType,
        clip_fill_type: PolyFillType,
    ) -> Result<bool, ClipError> {
        if self.execute_locked {
            return Ok(false);
        }
        self.execute_locked = true;
        solution.clear();
        self.subj_fill_type = subj_fill_type;
        self.clip_fill_type = clip_fill_type;
        self.clip_type = clip_type;
        let result = self.execute_internal(true);
        self.finish_execute(result.is_err());
        result?;
        self.build_result_ex(solution);
        Ok(true)
    }

    fn finish_execute(&mut self, failed: bool) {
        self.joins.clear();
        self.horz_joins.clear();
        self.execute_locked = false;
        if failed {
            self.arena.clear();
            self.active_edges = UNASSIGNED;
            self.sorted_edges = UNASSIGNED;
            self.intersections.clear();
            self.scanbeam.clear();
        }
    }

    fn reset(&mut self) {
        self.base.reset();
        self.scanbeam.clear();
        self.active_edges = UNASSIGNED;
        self.sorted_edges = UNASSIGNED;
        self.arena.clear();
        let levels: Vec<(i64, i64)> = self
            .base
            .minima
            .iter()
            .map(|lm| (lm.y, self.base.edges[lm.left_bound].top.y))
            .collect();
        for (y, top_y) in levels {
            self.scanbeam.insert(y);
            self.scanbeam.insert(top_y);
        }
    }

    fn execute_internal(&mut self, fix_hole_linkages: bool) -> Result<(), ClipError> {
        self.reset();
        if self.base.minima.is_empty() {
            return Ok(());
        }
        let full = self.base.use_full_range;
        let mut bot_y = match self.scanbeam.pop() {
            Some(y) => y,
            None => return Ok(()),
        };
        loop {
            self.insert_local_minima_into_ael(bot_y)?;
            self.horz_joins.clear();
            self.process_horizontals()?;
            let top_y = match self.scanbeam.pop() {
                Some(y) => y,
                None => break,
            };
            self.process_intersections(bot_y, top_y)?;
            self.process_edges_at_top_of_scanbeam(top_y)?;
            bot_y = top_y;
            if self.scanbeam.is_empty() {
                break;
            }
        }

        // tidy up output rings and fix orientations where necessary
        for rec in 0..self.arena.recs.len() {
            if self.arena.recs[rec].pts == UNASSIGNED {
                continue;
            }
            self.arena.fixup_out_polygon(rec, full);
            if self.arena.recs[rec].pts == UNASSIGNED {
                continue;
            }
            if self.arena.recs[rec].is_hole && fix_hole_linkages {
                self.fix_hole_linkage(rec)?;
            }
            if self.arena.recs[rec].bottom_pt == self.arena.recs[rec].bottom_flag
                && self.arena.orientation_rec(rec, full) != (self.arena.area_rec(rec, full) > 0.0)
            {
                self.arena.dispose_bottom_pt(rec);
                self.arena.fixup_out_polygon(rec, full);
                if self.arena.recs[rec].pts == UNASSIGNED {
                    continue;
                }
            }
            if self.arena.recs[rec].is_hole
                == (self.reverse_output ^ self.arena.orientation_rec(rec, full))
            {
                let pts = self.arena.recs[rec].pts;
                self.arena.reverse_links(pts);
            }
        }
        self.join_common_edges(fix_hole_linkages)?;
        Ok(())
    }

    fn is_even_odd(&self, poly_type: PolyType) -> bool {
        match poly_type {
            PolyType::Subject => self.subj_fill_type == PolyFillType::EvenOdd,
            PolyType::Clip => self.clip_fill_type == PolyFillType::EvenOdd,
        }
    }

    fn is_even_odd_alt(&self, poly_type: PolyType) -> bool {
        match poly_type {
            PolyType::Subject => self.clip_fill_type == PolyFillType::EvenOdd,
            PolyType::Clip => self.subj_fill_type == PolyFillType::EvenOdd,
        }
    }

    fn fill_types_for(&self, poly_type: PolyType) -> (PolyFillType, PolyFillType) {
        match poly_type {
            PolyType::Subject => (self.subj_fill_type, self.clip_fill_type),
            PolyType::Clip => (self.clip_fill_type, self.subj_fill_type),
        }
    }

    fn insert_local_minima_into_ael(&mut self, bot_y: i64) -> Result<(), ClipError> {
        while let Some(lm) = self.base.minima.current() {
            if lm.y != bot_y {
                break;
            }
            let lb = lm.left_bound;
            let rb = lm.right_bound;

            self.insert_edge_into_ael(lb);
            let lb_top_y = self.base.edges[lb].top.y;
            self.scanbeam.insert(lb_top_y);
            self.insert_edge_into_ael(rb);

            if self.is_even_odd(self.base.edges[lb].poly_type) {
                self.base.edges[lb].wind_delta = 1;
                self.base.edges[rb].wind_delta = 1;
            } else {
                self.base.edges[rb].wind_delta = -self.base.edges[lb].wind_delta;
            }
            self.set_winding_count(lb);
            self.base.edges[rb].wind_cnt = self.base.edges[lb].wind_cnt;
            self.base.edges[rb].wind_cnt2 = self.base.edges[lb].wind_cnt2;

            if self.base.edges[rb].is_horizontal() {
                // a horizontal right bound cannot end the bound, so queue the
                // top of the edge that follows it
                self.add_edge_to_sel(rb);
                let nl = self.base.edges[rb].next_in_lml;
                let top_y = self.base.edges[nl].top.y;
                self.scanbeam.insert(top_y);
            } else {
                let top_y = self.base.edges[rb].top.y;
                self.scanbeam.insert(top_y);
            }

            if self.is_contributing(lb) {
                let pt = IntPoint::new(self.base.edges[lb].curr.x, lm.y);
                self.add_local_min_poly(lb, rb, &pt);
            }

            if self.base.edges[rb].is_assigned() && self.base.edges[rb].is_horizontal() {
                for i in 0..self.horz_joins.len() {
                    let hj = self.horz_joins[i];
                    let hj_bot = self.base.edges[hj.edge].bot;
                    let hj_top = self.base.edges[hj.edge].top;
                    let rb_bot = self.base.edges[rb].bot;
                    let rb_top = self.base.edges[rb].top;
                    if get_overlap_segment(hj_bot, hj_top, rb_bot, rb_top).is_some() {
                        self.add_join(hj.edge, rb, hj.saved_idx, UNASSIGNED);
                    }
                }
            }

            if self.base.edges[lb].next_in_ael != rb {
                if self.base.edges[rb].is_assigned() {
                    let prev = self.base.edges[rb].prev_in_ael;
                    if prev != UNASSIGNED
                        && self.base.edges[prev].is_assigned()
                        && slopes_equal_edges(
                            &self.base.edges[prev],
                            &self.base.edges[rb],
                            self.base.use_full_range,
                        )
                    {
                        self.add_join(rb, prev, UNASSIGNED, UNASSIGNED);
                    }
                }
                let pt = self.base.edges[lb].curr;
                let mut e = self.base.edges[lb].next_in_ael;
                while e != rb {
                    if e == UNASSIGNED {
                        return Err(ClipError::MissingRightBound);
                    }
                    // order important: rb is the edge being inserted
                    self.intersect_edges(rb, e, &pt, Protects::Neither);
                    e = self.base.edges[e].next_in_ael;
                }
            }
            self.base.minima.pop();
        }
        Ok(())
    }

    fn insert_edge_into_ael(&mut self, edge: usize) {
        let edges = &mut self.base.edges;
        edges[edge].prev_in_ael = UNASSIGNED;
        edges[edge].next_in_ael = UNASSIGNED;
        if self.active_edges == UNASSIGNED {
            self.active_edges = edge;
        } else if e2_inserts_before_e1(edges, self.active_edges, edge) {
            edges[edge].next_in_ael = self.active_edges;
            let head = self.active_edges;
            edges[head].prev_in_ael = edge;
            self.active_edges = edge;
        } else {
            let mut e = self.active_edges;
            while edges[e].next_in_ael != UNASSIGNED
                && !e2_inserts_before_e1(edges, edges[e].next_in_ael, edge)
            {
                e = edges[e].next_in_ael;
            }
            let next = edges[e].next_in_ael;
            edges[edge].next_in_ael = next;
            if next != UNASSIGNED {
                edges[next].prev_in_ael = edge;
            }
            edges[edge].prev_in_ael = e;
            edges[e].next_in_ael = edge;
        }
    }

    fn set_winding_count(&mut self, edge: usize) {
        let even_odd = self.is_even_odd(self.base.edges[edge].poly_type);
        let even_odd_alt = self.is_even_odd_alt(self.base.edges[edge].poly_type);
        let active = self.active_edges;
        let edges = &mut self.base.edges;
        let mut e = edges[edge].prev_in_ael;
        while e != UNASSIGNED && edges[e].poly_type != edges[edge].poly_type {
            e = edges[e].prev_in_ael;
        }
        if e == UNASSIGNED {
            edges[edge].wind_cnt = edges[edge].wind_delta;
            edges[edge].wind_cnt2 = 0;
            e = active;
        } else if even_odd {
            edges[edge].wind_cnt = 1;
            edges[edge].wind_cnt2 = edges[e].wind_cnt2;
            e = edges[e].next_in_ael;
        } else {
            if edges[e].wind_cnt * edges[e].wind_delta < 0 {
                if edges[e].wind_cnt.abs() > 1 {
                    if edges[e].wind_delta * edges[edge].wind_delta < 0 {
                        edges[edge].wind_cnt = edges[e].wind_cnt;
                    } else {
                        edges[edge].wind_cnt = edges[e].wind_cnt + edges[edge].wind_delta;
                    }
                } else {
                    edges[edge].wind_cnt =
                        edges[e].wind_cnt + edges[e].wind_delta + edges[edge].wind_delta;
                }
            } else if edges[e].wind_cnt.abs() > 1
                && edges[e].wind_delta * edges[edge].wind_delta < 0
            {
                edges[edge].wind_cnt = edges[e].wind_cnt;
            } else if edges[e].wind_cnt + edges[edge].wind_delta == 0 {
                edges[edge].wind_cnt = edges[e].wind_cnt;
            } else {
                edges[edge].wind_cnt = edges[e].wind_cnt + edges[edge].wind_delta;
            }
            edges[edge].wind_cnt2 = edges[e].wind_cnt2;
            e = edges[e].next_in_ael;
        }

        if even_odd_alt {
            while e != edge {
                edges[edge].wind_cnt2 = if edges[edge].wind_cnt2 == 0 { 1 } else { 0 };
                e = edges[e].next_in_ael;
            }
        } else {
            while e != edge {
                edges[edge].wind_cnt2 += edges[e].wind_delta;
                e = edges[e].next_in_ael;
            }
        }
    }

    fn is_contributing(&self, edge: usize) -> bool {
        let e = &self.base.edges[edge];
        let (pft, pft2) = self.fill_types_for(e.poly_type);
        match pft {
            PolyFillType::EvenOdd | PolyFillType::NonZero => {
                if e.wind_cnt.abs() != 1 {
                    return false;
                }
            }
            PolyFillType::Positive => {
                if e.wind_cnt != 1 {
                    return false;
                }
            }
            PolyFillType::Negative => {
                if e.wind_cnt != -1 {
                    return false;
                }
            }
        }
        match self.clip_type {
            ClipType::Intersection => match pft2 {
                PolyFillType::EvenOdd | PolyFillType::NonZero => e.wind_cnt2 != 0,
                PolyFillType::Positive => e.wind_cnt2 > 0,
                PolyFillType::Negative => e.wind_cnt2 < 0,
            },
            ClipType::Union => match pft2 {
                PolyFillType::EvenOdd | PolyFillType::NonZero => e.wind_cnt2 == 0,
                PolyFillType::Positive => e.wind_cnt2 <= 0,
                PolyFillType::Negative => e.wind_cnt2 >= 0,
            },
            ClipType::Difference => {
                if e.poly_type == PolyType::Subject {
                    match pft2 {
                        PolyFillType::EvenOdd | PolyFillType::NonZero => e.wind_cnt2 == 0,
                        PolyFillType::Positive => e.wind_cnt2 <= 0,
                        PolyFillType::Negative => e.wind_cnt2 >= 0,
                    }
                } else {
                    match pft2 {
                        PolyFillType::EvenOdd | PolyFillType::NonZero => e.wind_cnt2 != 0,
                        PolyFillType::Positive => e.wind_cnt2 > 0,
                        PolyFillType::Negative => e.wind_cnt2 < 0,
                    }
                }
            }
            ClipType::Xor => true,
        }
    }

    fn add_edge_to_sel(&mut self, edge: usize) {
        // SEL links double as a simple stack of pending horizontals
        let edges = &mut self.base.edges;
        if self.sorted_edges == UNASSIGNED {
            self.sorted_edges = edge;
            edges[edge].prev_in_sel = UNASSIGNED;
            edges[edge].next_in_sel = UNASSIGNED;
        } else {
            edges[edge].next_in_sel = self.sorted_edges;
            edges[edge].prev_in_sel = UNASSIGNED;
            let head = self.sorted_edges;
            edges[head].prev_in_sel = edge;
            self.sorted_edges = edge;
        }
    }

    fn copy_ael_to_sel(&mut self) {
        let edges = &mut self.base.edges;
        let mut e = self.active_edges;
        self.sorted_edges = e;
        if e == UNASSIGNED {
            return;
        }
        edges[e].prev_in_sel = UNASSIGNED;
        edges[e].next_in_sel = UNASSIGNED;
        e = edges[e].next_in_ael;
        while e != UNASSIGNED {
            let prev = edges[e].prev_in_ael;
            edges[e].prev_in_sel = prev;
            edges[prev].next_in_sel = e;
            edges[e].next_in_sel = UNASSIGNED;
            e = edges[e].next_in_ael;
        }
    }

    fn delete_from_ael(&mut self, e: usize) {
        let edges = &mut self.base.edges;
        let prev = edges[e].prev_in_ael;
        let next = edges[e].next_in_ael;
        if prev == UNASSIGNED && next == UNASSIGNED && e != self.active_edges {
            return; // already deleted
        }
        if prev != UNASSIGNED {
            edges[prev].next_in_ael = next;
        } else {
            self.active_edges = next;
        }
        if next != UNASSIGNED {
            edges[next].prev_in_ael = prev;
        }
        edges[e].next_in_ael = UNASSIGNED;
        edges[e].prev_in_ael = UNASSIGNED;
    }

    fn delete_from_sel(&mut self, e: usize) {
        let edges = &mut self.base.edges;
        let prev = edges[e].prev_in_sel;
        let next = edges[e].next_in_sel;
        if prev == UNASSIGNED && next == UNASSIGNED && e != self.sorted_edges {
            return;
        }
        if prev != UNASSIGNED {
            edges[prev].next_in_sel = next;
        } else {
            self.sorted_edges = next;
        }
        if next != UNASSIGNED {
            edges[next].prev_in_sel = prev;
        }
        edges[e].next_in_sel = UNASSIGNED;
        edges[e].prev_in_sel = UNASSIGNED;
    }

    fn swap_positions_in_ael(&mut self, edge1: usize, edge2: usize) {
        let edges = &mut self.base.edges;
        if edges[edge1].next_in_ael == edge2 {
            let next = edges[edge2].next_in_ael;
            if next != UNASSIGNED {
                edges[next].prev_in_ael = edge1;
            }
            let prev = edges[edge1].prev_in_ael;
            if prev != UNASSIGNED {
                edges[prev].next_in_ael = edge2;
            }
            edges[edge2].prev_in_ael = prev;
            edges[edge2].next_in_ael = edge1;
            edges[edge1].prev_in_ael = edge2;
            edges[edge1].next_in_ael = next;
        } else if edges[edge2].next_in_ael == edge1 {
            let next = edges[edge1].next_in_ael;
            if next != UNASSIGNED {
                edges[next].prev_in_ael = edge2;
            }
            let prev = edges[edge2].prev_in_ael;
            if prev != UNASSIGNED {
                edges[prev].next_in_ael = edge1;
            }
            edges[edge1].prev_in_ael = prev;
            edges[edge1].next_in_ael = edge2;
            edges[edge2].prev_in_ael = edge1;
            edges[edge2].next_in_ael = next;
        } else {
            let next = edges[edge1].next_in_ael;
            let prev = edges[edge1].prev_in_ael;
            edges[edge1].next_in_ael = edges[edge2].next_in_ael;
            if edges[edge1].next_in_ael != UNASSIGNED {
                let n = edges[edge1].next_in_ael;
                edges[n].prev_in_ael = edge1;
            }
            edges[edge1].prev_in_ael = edges[edge2].prev_in_ael;
            if edges[edge1].prev_in_ael != UNASSIGNED {
                let p = edges[edge1].prev_in_ael;
                edges[p].next_in_ael = edge1;
            }
            edges[edge2].next_in_ael = next;
            if next != UNASSIGNED {
                edges[next].prev_in_ael = edge2;
            }
            edges[edge2].prev_in_ael = prev;
            if prev != UNASSIGNED {
                edges[prev].next_in_ael = edge2;
            }
        }
        if edges[edge1].prev_in_ael == UNASSIGNED {
            self.active_edges = edge1;
        } else if edges[edge2].prev_in_ael == UNASSIGNED {
            self.active_edges = edge2;
        }
    }

    fn swap_positions_in_sel(&mut self, edge1: usize, edge2: usize) {
        let edges = &mut self.base.edges;
        if edges[edge1].next_in_sel == edge2 {
            let next = edges[edge2].next_in_sel;
            if next != UNASSIGNED {
                edges[next].prev_in_sel = edge1;
            }
            let prev = edges[edge1].prev_in_sel;
            if prev != UNASSIGNED {
                edges[prev].next_in_sel = edge2;
            }
            edges[edge2].prev_in_sel = prev;
            edges[edge2].next_in_sel = edge1;
            edges[edge1].prev_in_sel = edge2;
            edges[edge1].next_in_sel = next;
        } else if edges[edge2].next_in_sel == edge1 {
            let next = edges[edge1].next_in_sel;
            if next != UNASSIGNED {
                edges[next].prev_in_sel = edge2;
            }
            let prev = edges[edge2].prev_in_sel;
            if prev != UNASSIGNED {
                edges[prev].next_in_sel = edge1;
            }
            edges[edge1].prev_in_sel = prev;
            edges[edge1].next_in_sel = edge2;
            edges[edge2].prev_in_sel = edge1;
            edges[edge2].next_in_sel = next;
        } else {
            let next = edges[edge1].next_in_sel;
            let prev = edges[edge1].prev_in_sel;
            edges[edge1].next_in_sel = edges[edge2].next_in_sel;
            if edges[edge1].next_in_sel != UNASSIGNED {
                let n = edges[edge1].next_in_sel;
                edges[n].prev_in_sel = edge1;
            }
            edges[edge1].prev_in_sel = edges[edge2].prev_in_sel;
            if edges[edge1].prev_in_sel != UNASSIGNED {
                let p = edges[edge1].prev_in_sel;
                edges[p].next_in_sel = edge1;
            }
            edges[edge2].next_in_sel = next;
            if next != UNASSIGNED {
                edges[next].prev_in_sel = edge2;
            }
            edges[edge2].prev_in_sel = prev;
            if prev != UNASSIGNED {
                edges[prev].next_in_sel = edge2;
            }
        }
        if edges[edge1].prev_in_sel == UNASSIGNED {
            self.sorted_edges = edge1;
        } else if edges[edge2].prev_in_sel == UNASSIGNED {
            self.sorted_edges = edge2;
        }
    }

    fn add_join(&mut self, e1: usize, e2: usize, e1_out_idx: usize, e2_out_idx: usize) {
        let (pt1a, pt1b, idx1) = {
            let e = &self.base.edges[e1];
            let idx = if e1_out_idx != UNASSIGNED {
                e1_out_idx
            } else {
                e.out_idx
            };
            (e.curr, e.top, idx)
        };
        let (pt2a, pt2b, idx2) = {
            let e = &self.base.edges[e2];
            let idx = if e2_out_idx != UNASSIGNED {
                e2_out_idx
            } else {
                e.out_idx
            };
            (e.curr, e.top, idx)
        };
        self.joins.push(JoinRec {
            pt1a,
            pt1b,
            poly1_idx: idx1,
            pt2a,
            pt2b,
            poly2_idx: idx2,
        });
    }

    fn add_horz_join(&mut self, edge: usize, idx: usize) {
        self.horz_joins.push(HorzJoinRec {
            edge,
            saved_idx: idx,
        });
    }

    fn set_hole_state(&mut self, e: usize, rec: usize) {
        let mut is_hole = false;
        let mut e2 = self.base.edges[e].prev_in_ael;
        while e2 != UNASSIGNED {
            if self.base.edges[e2].is_assigned() {
                is_hole = !is_hole;
                if self.arena.recs[rec].first_left == UNASSIGNED {
                    self.arena.recs[rec].first_left = self.base.edges[e2].out_idx;
                }
            }
            e2 = self.base.edges[e2].prev_in_ael;
        }
        if is_hole {
            self.arena.recs[rec].is_hole = true;
        }
    }

    fn add_out_pt(&mut self, e: usize, pt: &IntPoint) {
        let to_front = self.base.edges[e].side == EdgeSide::Left;
        if !self.base.edges[e].is_assigned() {
            let rec = self.arena.create_rec();
            self.base.edges[e].out_idx = rec;
            let op = self.arena.create_pt(*pt, rec);
            self.arena.recs[rec].pts = op;
            self.arena.recs[rec].bottom_pt = op;
            self.arena.pts[op].next = op;
            self.arena.pts[op].prev = op;
            self.set_hole_state(e, rec);
            return;
        }

        let rec = self.base.edges[e].out_idx;
        let op = self.arena.recs[rec].pts;
        let op_prev = self.arena.pts[op].prev;
        if (to_front && *pt == self.arena.pts[op].pt)
            || (!to_front && *pt == self.arena.pts[op_prev].pt)
        {
            return;
        }

        let side = self.base.edges[e].side;
        if !self.arena.recs[rec].sides.contains(side) {
            // a vertex landing one unit on the wrong side of the bottom
            // point is a rounding artifact and is dropped outright
            if self.arena.recs[rec].sides == EdgeSide::Neither && pt.y == self.arena.pts[op].pt.y {
                if to_front {
                    if pt.x == self.arena.pts[op].pt.x + 1 {
                        return;
                    }
                } else if pt.x == self.arena.pts[op].pt.x - 1 {
                    return;
                }
            }
            self.arena.recs[rec].sides = self.arena.recs[rec].sides.or(side);
            if self.arena.recs[rec].sides == EdgeSide::Both {
                // Both sides now hold vertices. Rounding can push a vertex of
                // one side fractionally across an edge of the other near the
                // bottom point; flag the candidate so the tiny
                // self-intersection can be removed before orientation is
                // assigned.
                if to_front {
                    let op_bot = self.arena.recs[rec].pts;
                    let op2 = self.arena.pts[op_bot].next;
                    let bpt = self.arena.pts[op_bot].pt;
                    let p2 = self.arena.pts[op2].pt;
                    if bpt.y != p2.y
                        && bpt.y != pt.y
                        && (bpt.x - pt.x) / (bpt.y - pt.y) < (bpt.x - p2.x) / (bpt.y - p2.y)
                    {
                        self.arena.recs[rec].bottom_flag = op_bot;
                    }
                } else {
                    let op_bot = self.arena.pts[self.arena.recs[rec].pts].prev;
                    let op2 = self.arena.pts[op_bot].next;
                    let bpt = self.arena.pts[op_bot].pt;
                    let p2 = self.arena.pts[op2].pt;
                    if bpt.y != p2.y
                        && bpt.y != pt.y
                        && (bpt.x - pt.x) / (bpt.y - pt.y) > (bpt.x - p2.x) / (bpt.y - p2.y)
                    {
                        self.arena.recs[rec].bottom_flag = op_bot;
                    }
                }
            }
        }

        let op2 = self.arena.create_pt(*pt, rec);
        let bottom = self.arena.recs[rec].bottom_pt;
        if pt.y == self.arena.pts[bottom].pt.y && pt.x < self.arena.pts[bottom].pt.x {
            self.arena.recs[rec].bottom_pt = op2;
        }
        let prev = self.arena.pts[op].prev;
        self.arena.pts[op2].next = op;
        self.arena.pts[op2].prev = prev;
        self.arena.pts[prev].next = op2;
        self.arena.pts[op].prev = op2;
        if to_front {
            self.arena.recs[rec].pts = op2;
        }
    }

    fn add_local_min_poly(&mut self, e1: usize, e2: usize, pt: &IntPoint) {
        let (e, prev_e) = if self.base.edges[e2].is_horizontal()
            || self.base.edges[e1].dx > self.base.edges[e2].dx
        {
            self.add_out_pt(e1, pt);
            self.base.edges[e2].out_idx = self.base.edges[e1].out_idx;
            self.base.edges[e1].side = EdgeSide::Left;
            self.base.edges[e2].side = EdgeSide::Right;
            let prev_e = if self.base.edges[e1].prev_in_ael == e2 {
                self.base.edges[e2].prev_in_ael
            } else {
                self.base.edges[e1].prev_in_ael
            };
            (e1, prev_e)
        } else {
            self.add_out_pt(e2, pt);
            self.base.edges[e1].out_idx = self.base.edges[e2].out_idx;
            self.base.edges[e1].side = EdgeSide::Right;
            self.base.edges[e2].side = EdgeSide::Left;
            let prev_e = if self.base.edges[e2].prev_in_ael == e1 {
                self.base.edges[e1].prev_in_ael
            } else {
                self.base.edges[e2].prev_in_ael
            };
            (e2, prev_e)
        };
        if prev_e != UNASSIGNED
            && self.base.edges[prev_e].is_assigned()
            && self.base.edges[prev_e].top_x(pt.y) == self.base.edges[e].top_x(pt.y)
            && slopes_equal_edges(
                &self.base.edges[e],
                &self.base.edges[prev_e],
                self.base.use_full_range,
            )
        {
            self.add_join(e, prev_e, UNASSIGNED, UNASSIGNED);
        }
    }

    fn add_local_max_poly(&mut self, e1: usize, e2: usize, pt: &IntPoint) {
        self.add_out_pt(e1, pt);
        if self.base.edges[e1].out_idx == self.base.edges[e2].out_idx {
            self.base.edges[e1].out_idx = UNASSIGNED;
            self.base.edges[e2].out_idx = UNASSIGNED;
        } else if self.base.edges[e1].out_idx < self.base.edges[e2].out_idx {
            self.append_polygon(e1, e2);
        } else {
            self.append_polygon(e2, e1);
        }
    }

    fn append_polygon(&mut self, e1: usize, e2: usize) {
        let rec1 = self.base.edges[e1].out_idx;
        let rec2 = self.base.edges[e2].out_idx;

        let hole_state_rec = if self.arena.recs[rec1].first_left == rec2 {
            rec2
        } else if self.arena.recs[rec2].first_left == rec1 {
            rec1
        } else {
            self.arena.get_lowermost_rec(rec1, rec2)
        };

        let p1_lft = self.arena.recs[rec1].pts;
        let p1_rt = self.arena.pts[p1_lft].prev;
        let p2_lft = self.arena.recs[rec2].pts;
        let p2_rt = self.arena.pts[p2_lft].prev;

        // splice rec2's ring onto rec1's, honoring which ends the edges hold
        let side = if self.base.edges[e1].side == EdgeSide::Left {
            if self.base.edges[e2].side == EdgeSide::Left {
                self.arena.reverse_links(p2_lft);
                self.arena.pts[p2_lft].next = p1_lft;
                self.arena.pts[p1_lft].prev = p2_lft;
                self.arena.pts[p1_rt].next = p2_rt;
                self.arena.pts[p2_rt].prev = p1_rt;
                self.arena.recs[rec1].pts = p2_rt;
            } else {
                self.arena.pts[p2_rt].next = p1_lft;
                self.arena.pts[p1_lft].prev = p2_rt;
                self.arena.pts[p2_lft].prev = p1_rt;
                self.arena.pts[p1_rt].next = p2_lft;
                self.arena.recs[rec1].pts = p2_lft;
            }
            EdgeSide::Left
        } else {
            if self.base.edges[e2].side == EdgeSide::Right {
                self.arena.reverse_links(p2_lft);
                self.arena.pts[p1_rt].next = p2_rt;
                self.arena.pts[p2_rt].prev = p1_rt;
                self.arena.pts[p2_lft].next = p1_lft;
                self.arena.pts[p1_lft].prev = p2_lft;
            } else {
                self.arena.pts[p1_rt].next = p2_lft;
                self.arena.pts[p2_lft].prev = p1_rt;
                self.arena.pts[p1_lft].prev = p2_rt;
                self.arena.pts[p2_rt].next = p1_lft;
            }
            EdgeSide::Right
        };

        if hole_state_rec == rec2 {
            let bottom = self.arena.recs[rec2].bottom_pt;
            self.arena.recs[rec1].bottom_pt = bottom;
            self.arena.pts[bottom].idx = rec1;
            if self.arena.recs[rec2].first_left != rec1 {
                self.arena.recs[rec1].first_left = self.arena.recs[rec2].first_left;
            }
            self.arena.recs[rec1].is_hole = self.arena.recs[rec2].is_hole;
        }
        self.arena.recs[rec2].pts = UNASSIGNED;
        self.arena.recs[rec2].bottom_pt = UNASSIGNED;
        self.arena.recs[rec2].append_link = rec1;

        let ok_idx = rec1;
        let obsolete_idx = rec2;
        // safe: this is only reached from add_local_max_poly
        self.base.edges[e1].out_idx = UNASSIGNED;
        self.base.edges[e2].out_idx = UNASSIGNED;

        let mut e = self.active_edges;
        while e != UNASSIGNED {
            if self.base.edges[e].out_idx == obsolete_idx {
                self.base.edges[e].out_idx = ok_idx;
                self.base.edges[e].side = side;
                break;
            }
            e = self.base.edges[e].next_in_ael;
        }

        for join in &mut self.joins {
            if join.poly1_idx == obsolete_idx {
                join.poly1_idx = ok_idx;
            }
            if join.poly2_idx == obsolete_idx {
                join.poly2_idx = ok_idx;
            }
        }
        for hj in &mut self.horz_joins {
            if hj.saved_idx == obsolete_idx {
                hj.saved_idx = ok_idx;
            }
        }
    }

    fn do_edge1(&mut self, e1: usize, e2: usize, pt: &IntPoint) {
        self.add_out_pt(e1, pt);
        self.swap_sides(e1, e2);
        self.swap_poly_indexes(e1, e2);
    }

    fn do_edge2(&mut self, e1: usize, e2: usize, pt: &IntPoint) {
        self.add_out_pt(e2, pt);
        self.swap_sides(e1, e2);
        self.swap_poly_indexes(e1, e2);
    }

    fn do_both_edges(&mut self, e1: usize, e2: usize, pt: &IntPoint) {
        self.add_out_pt(e1, pt);
        self.add_out_pt(e2, pt);
        self.swap_sides(e1, e2);
        self.swap_poly_indexes(e1, e2);
    }

    fn swap_sides(&mut self, e1: usize, e2: usize) {
        let side = self.base.edges[e1].side;
        self.base.edges[e1].side = self.base.edges[e2].side;
        self.base.edges[e2].side = side;
    }

    fn swap_poly_indexes(&mut self, e1: usize, e2: usize) {
        let idx = self.base.edges[e1].out_idx;
        self.base.edges[e1].out_idx = self.base.edges[e2].out_idx;
        self.base.edges[e2].out_idx = idx;
    }

    /// Resolves one edge crossing. e1 is left of e2 below the point and right
    /// of it above; winding counts transfer accordingly, then ring output is
    /// started, extended, or closed per the contribution table.
    fn intersect_edges(&mut self, e1: usize, e2: usize, pt: &IntPoint, protects: Protects) {
        let e1_poly = self.base.edges[e1].poly_type;
        let e2_poly = self.base.edges[e2].poly_type;
        let e1_even_odd = self.is_even_odd(e1_poly);
        let e2_even_odd = self.is_even_odd(e2_poly);

        let e1_stops = !protects.left()
            && self.base.edges[e1].next_in_lml == UNASSIGNED
            && self.base.edges[e1].top == *pt;
        let e2_stops = !protects.right()
            && self.base.edges[e2].next_in_lml == UNASSIGNED
            && self.base.edges[e2].top == *pt;
        let e1_contributing = self.base.edges[e1].is_assigned();
        let e2_contributing = self.base.edges[e2].is_assigned();

        {
            let edges = &mut self.base.edges;
            if e1_poly == e2_poly {
                if e1_even_odd {
                    let old = edges[e1].wind_cnt;
                    edges[e1].wind_cnt = edges[e2].wind_cnt;
                    edges[e2].wind_cnt = old;
                } else {
                    if edges[e1].wind_cnt + edges[e2].wind_delta == 0 {
                        edges[e1].wind_cnt = -edges[e1].wind_cnt;
                    } else {
                        edges[e1].wind_cnt += edges[e2].wind_delta;
                    }
                    if edges[e2].wind_cnt - edges[e1].wind_delta == 0 {
                        edges[e2].wind_cnt = -edges[e2].wind_cnt;
                    } else {
                        edges[e2].wind_cnt -= edges[e1].wind_delta;
                    }
                }
            } else {
                if !e2_even_odd {
                    edges[e1].wind_cnt2 += edges[e2].wind_delta;
                } else {
                    edges[e1].wind_cnt2 = if edges[e1].wind_cnt2 == 0 { 1 } else { 0 };
                }
                if !e1_even_odd {
                    edges[e2].wind_cnt2 -= edges[e1].wind_delta;
                } else {
                    edges[e2].wind_cnt2 = if edges[e2].wind_cnt2 == 0 { 1 } else { 0 };
                }
            }
        }

        let (e1_fill, e1_fill2) = self.fill_types_for(e1_poly);
        let (e2_fill, e2_fill2) = self.fill_types_for(e2_poly);

        let e1_wc = match e1_fill {
            PolyFillType::Positive => self.base.edges[e1].wind_cnt,
            PolyFillType::Negative => -self.base.edges[e1].wind_cnt,
            _ => self.base.edges[e1].wind_cnt.abs(),
        };
        let e2_wc = match e2_fill {
            PolyFillType::Positive => self.base.edges[e2].wind_cnt,
            PolyFillType::Negative => -self.base.edges[e2].wind_cnt,
            _ => self.base.edges[e2].wind_cnt.abs(),
        };

        if e1_contributing && e2_contributing {
            if e1_stops
                || e2_stops
                || (e1_wc != 0 && e1_wc != 1)
                || (e2_wc != 0 && e2_wc != 1)
                || (e1_poly != e2_poly && self.clip_type != ClipType::Xor)
            {
                self.add_local_max_poly(e1, e2, pt);
            } else {
                self.do_both_edges(e1, e2, pt);
            }
        } else if e1_contributing {
            if (e2_wc == 0 || e2_wc == 1)
                && (self.clip_type != ClipType::Intersection
                    || e2_poly == PolyType::Subject
                    || self.base.edges[e2].wind_cnt2 != 0)
            {
                self.do_edge1(e1, e2, pt);
            }
        } else if e2_contributing {
            if (e1_wc == 0 || e1_wc == 1)
                && (self.clip_type != ClipType::Intersection
                    || e1_poly == PolyType::Subject
                    || self.base.edges[e1].wind_cnt2 != 0)
            {
                self.do_edge2(e1, e2, pt);
            }
        } else if (e1_wc == 0 || e1_wc == 1) && (e2_wc == 0 || e2_wc == 1) && !e1_stops && !e2_stops
        {
            // neither edge is currently contributing
            let e1_wc2 = match e1_fill2 {
                PolyFillType::Positive => self.base.edges[e1].wind_cnt2,
                PolyFillType::Negative => -self.base.edges[e1].wind_cnt2,
                _ => self.base.edges[e1].wind_cnt2.abs(),
            };
            let e2_wc2 = match e2_fill2 {
                PolyFillType::Positive => self.base.edges[e2].wind_cnt2,
                PolyFillType::Negative => -self.base.edges[e2].wind_cnt2,
                _ => self.base.edges[e2].wind_cnt2.abs(),
            };

            if e1_poly != e2_poly {
                self.add_local_min_poly(e1, e2, pt);
            } else if e1_wc == 1 && e2_wc == 1 {
                match self.clip_type {
                    ClipType::Intersection => {
                        if e1_wc2 > 0 && e2_wc2 > 0 {
                            self.add_local_min_poly(e1, e2, pt);
                        }
                    }
                    ClipType::Union => {
                        if e1_wc2 <= 0 && e2_wc2 <= 0 {
                            self.add_local_min_poly(e1, e2, pt);
                        }
                    }
                    ClipType::Difference => {
                        if (e1_poly == PolyType::Clip && e1_wc2 > 0 && e2_wc2 > 0)
                            || (e1_poly == PolyType::Subject && e1_wc2 <= 0 && e2_wc2 <= 0)
                        {
                            self.add_local_min_poly(e1, e2, pt);
                        }
                    }
                    ClipType::Xor => self.add_local_min_poly(e1, e2, pt),
                }
            } else {
                self.swap_sides(e1, e2);
            }
        }

        if e1_stops != e2_stops
            && ((e1_stops && self.base.edges[e1].is_assigned())
                || (e2_stops && self.base.edges[e2].is_assigned()))
        {
            self.swap_sides(e1, e2);
            self.swap_poly_indexes(e1, e2);
        }

        // finally, delete any non-contributing maxima edges
        if e1_stops {
            self.delete_from_ael(e1);
        }
        if e2_stops {
            self.delete_from_ael(e2);
        }
    }

    /// Replaces an edge that ended mid-bound with its successor, carrying the
    /// AEL slot and winding state over. Returns the successor.
    fn update_edge_into_ael(&mut self, e: usize) -> Result<usize, ClipError> {
        let next_lml = self.base.edges[e].next_in_lml;
        if next_lml == UNASSIGNED {
            return Err(ClipError::EdgePromotion);
        }
        let edges = &mut self.base.edges;
        let ael_prev = edges[e].prev_in_ael;
        let ael_next = edges[e].next_in_ael;
        edges[next_lml].out_idx = edges[e].out_idx;
        if ael_prev != UNASSIGNED {
            edges[ael_prev].next_in_ael = next_lml;
        } else {
            self.active_edges = next_lml;
        }
        if ael_next != UNASSIGNED {
            edges[ael_next].prev_in_ael = next_lml;
        }
        edges[next_lml].side = edges[e].side;
        edges[next_lml].wind_delta = edges[e].wind_delta;
        edges[next_lml].wind_cnt = edges[e].wind_cnt;
        edges[next_lml].wind_cnt2 = edges[e].wind_cnt2;
        edges[next_lml].prev_in_ael = ael_prev;
        edges[next_lml].next_in_ael = ael_next;
        if !edges[next_lml].is_horizontal() {
            let top_y = edges[next_lml].top.y;
            self.scanbeam.insert(top_y);
        }
        Ok(next_lml)
    }

    fn is_minima(&self, e: usize) -> bool {
        e != UNASSIGNED
            && self.base.edges[self.base.edges[e].prev].next_in_lml != e
            && self.base.edges[self.base.edges[e].next].next_in_lml != e
    }

    fn is_maxima(&self, e: usize, y: i64) -> bool {
        e != UNASSIGNED
            && self.base.edges[e].top.y == y
            && self.base.edges[e].next_in_lml == UNASSIGNED
    }

    fn is_intermediate(&self, e: usize, y: i64) -> bool {
        self.base.edges[e].top.y == y && self.base.edges[e].next_in_lml != UNASSIGNED
    }

    fn get_maxima_pair(&self, e: usize) -> usize {
        let next = self.base.edges[e].next;
        if !self.is_maxima(next, self.base.edges[e].top.y)
            || self.base.edges[next].top.x != self.base.edges[e].top.x
        {
            self.base.edges[e].prev
        } else {
            next
        }
    }

    fn get_next_in_ael(&self, e: usize, direction: Direction) -> usize {
        if direction == Direction::LeftToRight {
            self.base.edges[e].next_in_ael
        } else {
            self.base.edges[e].prev_in_ael
        }
    }

    fn is_top_horz(&self, x_pos: i64) -> bool {
        let mut e = self.sorted_edges;
        while e != UNASSIGNED {
            let edge = &self.base.edges[e];
            if x_pos >= edge.curr.x.min(edge.top.x) && x_pos <= edge.curr.x.max(edge.top.x) {
                return false;
            }
            e = edge.next_in_sel;
        }
        true
    }

    fn process_horizontals(&mut self) -> Result<(), ClipError> {
        while self.sorted_edges != UNASSIGNED {
            let horz_edge = self.sorted_edges;
            self.delete_from_sel(horz_edge);
            self.process_horizontal(horz_edge)?;
        }
        Ok(())
    }

    fn process_horizontal(&mut self, horz_edge: usize) -> Result<(), ClipError> {
        let (direction, horz_left, horz_right) = {
            let e = &self.base.edges[horz_edge];
            if e.curr.x < e.top.x {
                (Direction::LeftToRight, e.curr.x, e.top.x)
            } else {
                (Direction::RightToLeft, e.top.x, e.curr.x)
            }
        };

        let e_max_pair = if self.base.edges[horz_edge].next_in_lml != UNASSIGNED {
            UNASSIGNED
        } else {
            self.get_maxima_pair(horz_edge)
        };

        let mut e = self.get_next_in_ael(horz_edge, direction);
        while e != UNASSIGNED {
            let e_next = self.get_next_in_ael(e, direction);
            let in_range = (direction == Direction::LeftToRight
                && self.base.edges[e].curr.x <= horz_right)
                || (direction == Direction::RightToLeft && self.base.edges[e].curr.x >= horz_left);
            if e_max_pair != UNASSIGNED || in_range {
                let horz_top_x = self.base.edges[horz_edge].top.x;
                if self.base.edges[e].curr.x == horz_top_x && e_max_pair == UNASSIGNED {
                    let next_lml = self.base.edges[horz_edge].next_in_lml;
                    if slopes_equal_edges(
                        &self.base.edges[e],
                        &self.base.edges[next_lml],
                        self.base.use_full_range,
                    ) {
                        // rings sharing this edge will need joining later
                        if self.base.edges[horz_edge].is_assigned()
                            && self.base.edges[e].is_assigned()
                        {
                            let saved = self.base.edges[horz_edge].out_idx;
                            self.add_join(next_lml, e, saved, UNASSIGNED);
                        }
                        break; // end of the horizontal run
                    } else if self.base.edges[e].dx < self.base.edges[next_lml].dx {
                        // more negative slopes follow more positive ones
                        // above a horizontal, so the run truly ends here
                        break;
                    }
                }

                if e == e_max_pair {
                    // a maxima horizontal, and this is its end
                    let pt =
                        IntPoint::new(self.base.edges[e].curr.x, self.base.edges[horz_edge].curr.y);
                    if direction == Direction::LeftToRight {
                        self.intersect_edges(horz_edge, e, &pt, Protects::Neither);
                    } else {
                        self.intersect_edges(e, horz_edge, &pt, Protects::Neither);
                    }
                    if self.base.edges[e_max_pair].is_assigned() {
                        return Err(ClipError::MaximaPair);
                    }
                    return Ok(());
                } else if self.base.edges[e].is_horizontal()
                    && !self.is_minima(e)
                    && self.base.edges[e].curr.x <= self.base.edges[e].top.x
                {
                    let pt =
                        IntPoint::new(self.base.edges[e].curr.x, self.base.edges[horz_edge].curr.y);
                    let top_horz = self.is_top_horz(pt.x);
                    if direction == Direction::LeftToRight {
                        let protects = if top_horz {
                            Protects::Left
                        } else {
                            Protects::Both
                        };
                        self.intersect_edges(horz_edge, e, &pt, protects);
                    } else {
                        let protects = if top_horz {
                            Protects::Right
                        } else {
                            Protects::Both
                        };
                        self.intersect_edges(e, horz_edge, &pt, protects);
                    }
                } else if direction == Direction::LeftToRight {
                    let pt =
                        IntPoint::new(self.base.edges[e].curr.x, self.base.edges[horz_edge].curr.y);
                    let protects = if self.is_top_horz(pt.x) {
                        Protects::Left
                    } else {
                        Protects::Both
                    };
                    self.intersect_edges(horz_edge, e, &pt, protects);
                } else {
                    let pt =
                        IntPoint::new(self.base.edges[e].curr.x, self.base.edges[horz_edge].curr.y);
                    let protects = if self.is_top_horz(pt.x) {
                        Protects::Right
                    } else {
                        Protects::Both
                    };
                    self.intersect_edges(e, horz_edge, &pt, protects);
                }
                self.swap_positions_in_ael(horz_edge, e);
            } else if ((direction == Direction::LeftToRight
                && self.base.edges[e].curr.x > horz_right)
                || (direction == Direction::RightToLeft && self.base.edges[e].curr.x < horz_left))
                && self.base.edges[horz_edge].next_in_sel == UNASSIGNED
            {
                break;
            }
            e = e_next;
        }

        if self.base.edges[horz_edge].next_in_lml != UNASSIGNED {
            if self.base.edges[horz_edge].is_assigned() {
                let top = self.base.edges[horz_edge].top;
                self.add_out_pt(horz_edge, &top);
            }
            self.update_edge_into_ael(horz_edge)?;
        } else {
            if self.base.edges[horz_edge].is_assigned() {
                let pt = IntPoint::new(
                    self.base.edges[horz_edge].top.x,
                    self.base.edges[horz_edge].curr.y,
                );
                self.intersect_edges(horz_edge, e_max_pair, &pt, Protects::Both);
            }
            self.delete_from_ael(e_max_pair);
            self.delete_from_ael(horz_edge);
        }
        Ok(())
    }

    fn process_intersections(&mut self, bot_y: i64, top_y: i64) -> Result<(), ClipError> {
        self.build_intersect_list(bot_y, top_y);
        if self.intersections.is_empty() {
            return Ok(());
        }
        if !self.fixup_intersections() {
            self.sorted_edges = UNASSIGNED;
            self.intersections.clear();
            return Err(ClipError::IntersectionOrder);
        }
        self.process_intersect_list();
        Ok(())
    }

    pub(crate) fn build_intersect_list(&mut self, bot_y: i64, top_y: i64) {
        if self.active_edges == UNASSIGNED {
            return;
        }

        // prepare for sorting
        {
            let edges = &mut self.base.edges;
            let mut e = self.active_edges;
            self.sorted_edges = e;
            while e != UNASSIGNED {
                edges[e].prev_in_sel = edges[e].prev_in_ael;
                edges[e].next_in_sel = edges[e].next_in_ael;
                edges[e].tmp_x = edges[e].top_x(top_y);
                e = edges[e].next_in_ael;
            }
        }

        // bubble sort, collecting a crossing for every swap
        let mut is_modified = true;
        while is_modified && self.sorted_edges != UNASSIGNED {
            is_modified = false;
            let mut e = self.sorted_edges;
            while self.base.edges[e].next_in_sel != UNASSIGNED {
                let e_next = self.base.edges[e].next_in_sel;
                // parallel pairs and rounding drift near the top yield no
                // genuine crossing; those advance without recording an event
                let (mut pt, crossed) = if self.base.edges[e].tmp_x
                    > self.base.edges[e_next].tmp_x
                {
                    intersect_point(
                        &self.base.edges[e],
                        &self.base.edges[e_next],
                        self.base.use_full_range,
                    )
                } else {
                    (IntPoint::new(0, 0), false)
                };
                if crossed {
                    if pt.y > bot_y {
                        pt.y = bot_y;
                        pt.x = self.base.edges[e].top_x(pt.y);
                    }
                    self.intersections.insert(e, e_next, pt, &self.base.edges);
                    self.swap_positions_in_sel(e, e_next);
                    is_modified = true;
                } else {
                    e = e_next;
                }
            }
            let prev = self.base.edges[e].prev_in_sel;
            if prev != UNASSIGNED {
                self.base.edges[prev].next_in_sel = UNASSIGNED;
            } else {
                break;
            }
        }
        self.sorted_edges = UNASSIGNED;
    }

    /// The bubble sort can emit crossings out of order when several occur at
    /// the same point; reorder them so each one swaps adjacent SEL edges.
    fn fixup_intersections(&mut self) -> bool {
        let n = self.intersections.len();
        if n == 1 {
            return true;
        }
        self.copy_ael_to_sel();
        let mut i = 0;
        while i + 1 < n {
            let node = self.intersections.get(i);
            if self.base.edges[node.edge1].prev_in_sel != node.edge2
                && self.base.edges[node.edge1].next_in_sel != node.edge2
            {
                let mut j = i + 1;
                loop {
                    if j >= n {
                        return false;
                    }
                    let cand = self.intersections.get(j);
                    if self.base.edges[cand.edge1].next_in_sel == cand.edge2
                        || self.base.edges[cand.edge1].prev_in_sel == cand.edge2
                    {
                        break;
                    }
                    j += 1;
                }
                self.intersections.swap(i, j);
            }
            let node = self.intersections.get(i);
            self.swap_positions_in_sel(node.edge1, node.edge2);
            i += 1;
        }
        self.sorted_edges = UNASSIGNED;
        let last = self.intersections.get(n - 1);
        self.base.edges[last.edge1].prev_in_sel == last.edge2
            || self.base.edges[last.edge1].next_in_sel == last.edge2
    }

    fn process_intersect_list(&mut self) {
        for i in 0..self.intersections.len() {
            let node = self.intersections.get(i);
            self.intersect_edges(node.edge1, node.edge2, &node.pt, Protects::Both);
            self.swap_positions_in_ael(node.edge1, node.edge2);
        }
        self.intersections.clear();
    }

    fn process_edges_at_top_of_scanbeam(&mut self, top_y: i64) -> Result<(), ClipError> {
        let mut e = self.active_edges;
        while e != UNASSIGNED {
            // maxima are handled as 'bent' horizontals, except those ending
            // in a true horizontal which defer to horizontal processing
            if self.is_maxima(e, top_y)
                && !self.base.edges[self.get_maxima_pair(e)].is_horizontal()
            {
                let e_prior = self.base.edges[e].prev_in_ael;
                self.do_maxima(e, top_y)?;
                e = if e_prior == UNASSIGNED {
                    self.active_edges
                } else {
                    self.base.edges[e_prior].next_in_ael
                };
            } else {
                if self.is_intermediate(e, top_y)
                    && self.base.edges[self.base.edges[e].next_in_lml].is_horizontal()
                {
                    if self.base.edges[e].is_assigned() {
                        let top = self.base.edges[e].top;
                        self.add_out_pt(e, &top);

                        let next_lml = self.base.edges[e].next_in_lml;
                        for i in 0..self.horz_joins.len() {
                            let hj = self.horz_joins[i];
                            let hj_bot = self.base.edges[hj.edge].bot;
                            let hj_top = self.base.edges[hj.edge].top;
                            let nl_bot = self.base.edges[next_lml].bot;
                            let nl_top = self.base.edges[next_lml].top;
                            if get_overlap_segment(hj_bot, hj_top, nl_bot, nl_top).is_some() {
                                let out_idx = self.base.edges[e].out_idx;
                                self.add_join(hj.edge, next_lml, hj.saved_idx, out_idx);
                            }
                        }
                        let out_idx = self.base.edges[e].out_idx;
                        self.add_horz_join(next_lml, out_idx);
                    }
                    let promoted = self.update_edge_into_ael(e)?;
                    self.add_edge_to_sel(promoted);
                    e = promoted;
                } else {
                    // this just simplifies horizontal processing
                    let new_x = self.base.edges[e].top_x(top_y);
                    self.base.edges[e].curr = IntPoint::new(new_x, top_y);
                }
                e = self.base.edges[e].next_in_ael;
            }
        }

        self.process_horizontals()?;

        // promote intermediate vertices
        let mut e = self.active_edges;
        while e != UNASSIGNED {
            if self.is_intermediate(e, top_y) {
                if self.base.edges[e].is_assigned() {
                    let top = self.base.edges[e].top;
                    self.add_out_pt(e, &top);
                }
                e = self.update_edge_into_ael(e)?;

                // rings sharing the promoted edge will need joining later;
                // collinearity is tested through the shared bottom vertex
                let bot = self.base.edges[e].bot;
                let top = self.base.edges[e].top;
                let prev = self.base.edges[e].prev_in_ael;
                let next = self.base.edges[e].next_in_ael;
                if self.base.edges[e].is_assigned()
                    && prev != UNASSIGNED
                    && self.base.edges[prev].is_assigned()
                    && self.base.edges[prev].curr == bot
                    && slopes_equal_lines(
                        &bot,
                        &top,
                        &bot,
                        &self.base.edges[prev].top,
                        self.base.use_full_range,
                    )
                {
                    self.add_out_pt(prev, &bot);
                    self.add_join(e, prev, UNASSIGNED, UNASSIGNED);
                } else if self.base.edges[e].is_assigned()
                    && next != UNASSIGNED
                    && self.base.edges[next].is_assigned()
                    && self.base.edges[next].curr.y > self.base.edges[next].top.y
                    && self.base.edges[next].curr.y <= self.base.edges[next].bot.y
                    && self.base.edges[next].curr == bot
                    && slopes_equal_lines(
                        &bot,
                        &top,
                        &bot,
                        &self.base.edges[next].top,
                        self.base.use_full_range,
                    )
                {
                    self.add_out_pt(next, &bot);
                    self.add_join(e, next, UNASSIGNED, UNASSIGNED);
                }
            }
            e = self.base.edges[e].next_in_ael;
        }
        Ok(())
    }

    fn do_maxima(&mut self, e: usize, top_y: i64) -> Result<(), ClipError> {
        let e_max_pair = self.get_maxima_pair(e);
        let x = self.base.edges[e].top.x;
        let mut e_next = self.base.edges[e].next_in_ael;
        while e_next != e_max_pair {
            if e_next == UNASSIGNED {
                return Err(ClipError::MaximaPair);
            }
            let pt = IntPoint::new(x, top_y);
            self.intersect_edges(e, e_next, &pt, Protects::Both);
            e_next = self.base.edges[e_next].next_in_ael;
        }
        if !self.base.edges[e].is_assigned() && !self.base.edges[e_max_pair].is_assigned() {
            self.delete_from_ael(e);
            self.delete_from_ael(e_max_pair);
        } else if self.base.edges[e].is_assigned() && self.base.edges[e_max_pair].is_assigned() {
            let pt = IntPoint::new(x, top_y);
            self.intersect_edges(e, e_max_pair, &pt, Protects::Neither);
        } else {
            return Err(ClipError::MaximaPair);
        }
        Ok(())
    }

    fn fix_hole_linkage(&mut self, rec: usize) -> Result<(), ClipError> {
        let mut tmp = if self.arena.recs[rec].bottom_pt != UNASSIGNED {
            let owner = self.arena.pts[self.arena.recs[rec].bottom_pt].idx;
            self.arena.recs[owner].first_left
        } else {
            self.arena.recs[rec].first_left
        };
        if tmp == rec {
            return Err(ClipError::HoleLinkage);
        }

        if tmp != UNASSIGNED {
            if self.arena.recs[tmp].append_link != UNASSIGNED {
                tmp = self.arena.find_append_link_end(tmp);
            }
            if tmp == rec {
                tmp = UNASSIGNED;
            } else if self.arena.recs[tmp].is_hole {
                self.fix_hole_linkage(tmp)?;
                tmp = self.arena.recs[tmp].first_left;
            }
        }
        self.arena.recs[rec].first_left = tmp;
        if tmp == UNASSIGNED {
            self.arena.recs[rec].is_hole = false;
        }
        self.arena.recs[rec].append_link = UNASSIGNED;
        Ok(())
    }

    fn check_hole_linkages1(&mut self, rec1: usize, rec2: usize) -> Result<(), ClipError> {
        // a split ring's holes must link to whichever half now contains them
        for i in 0..self.arena.recs.len() {
            if self.arena.recs[i].is_hole
                && self.arena.recs[i].bottom_pt != UNASSIGNED
                && self.arena.recs[i].first_left == rec1
            {
                let pt = self.arena.pts[self.arena.recs[i].bottom_pt].pt;
                if !self.arena.point_in_ring(
                    &pt,
                    self.arena.recs[rec1].pts,
                    self.base.use_full_range,
                )? {
                    self.arena.recs[i].first_left = rec2;
                }
            }
        }
        Ok(())
    }

    fn check_hole_linkages2(&mut self, rec1: usize, rec2: usize) {
        // holes owned by the absorbed ring move to the surviving one
        for i in 0..self.arena.recs.len() {
            if self.arena.recs[i].is_hole
                && self.arena.recs[i].bottom_pt != UNASSIGNED
                && self.arena.recs[i].first_left == rec2
            {
                self.arena.recs[i].first_left = rec1;
            }
        }
    }

    /// Resolves the joins noted during the sweep: a collinear overlap between
    /// two rings merges them; within one ring it splits the ring in two.
    pub(crate) fn join_common_edges(&mut self, fix_hole_linkages: bool) -> Result<(), ClipError> {
        let full = self.base.use_full_range;
        for i in 0..self.joins.len() {
            let j = self.joins[i];
            let rec1 = j.poly1_idx;
            let mut rec2 = j.poly2_idx;

            let mut pt1 = j.pt2a;
            let mut pt2 = j.pt2b;
            let mut pt3 = j.pt1a;
            let mut pt4 = j.pt1b;

            let pp1a = match self
                .arena
                .find_segment(self.arena.recs[rec1].pts, &mut pt1, &mut pt2)
            {
                Some(p) => p,
                None => continue,
            };
            let pp2a = if rec1 == rec2 {
                // searching the same ring, so segment 2 must differ from 1
                let start = self.arena.pts[pp1a].next;
                match self.arena.find_segment(start, &mut pt3, &mut pt4) {
                    Some(p) if p != pp1a => p,
                    _ => continue,
                }
            } else {
                match self
                    .arena
                    .find_segment(self.arena.recs[rec2].pts, &mut pt3, &mut pt4)
                {
                    Some(p) => p,
                    None => continue,
                }
            };

            let (a, b) = match get_overlap_segment(pt1, pt2, pt3, pt4) {
                Some(v) => v,
                None => continue,
            };
            pt1 = a;
            pt2 = b;

            // locate or insert the overlap endpoints on ring 1
            let prev = self.arena.pts[pp1a].prev;
            let p1 = if self.arena.pts[pp1a].pt == pt1 {
                pp1a
            } else if self.arena.pts[prev].pt == pt1 {
                prev
            } else {
                self.arena.insert_between(pp1a, prev, pt1)
            };
            let p2 = if self.arena.pts[pp1a].pt == pt2 {
                pp1a
            } else if self.arena.pts[prev].pt == pt2 {
                prev
            } else if p1 == pp1a || p1 == prev {
                self.arena.insert_between(pp1a, prev, pt2)
            } else if pt3_is_between_pt1_and_pt2(
                &self.arena.pts[pp1a].pt,
                &self.arena.pts[p1].pt,
                &pt2,
            ) {
                self.arena.insert_between(pp1a, p1, pt2)
            } else {
                self.arena.insert_between(p1, prev, pt2)
            };

            // and on ring 2
            let prev = self.arena.pts[pp2a].prev;
            let p3 = if self.arena.pts[pp2a].pt == pt1 {
                pp2a
            } else if self.arena.pts[prev].pt == pt1 {
                prev
            } else {
                self.arena.insert_between(pp2a, prev, pt1)
            };
            let p4 = if self.arena.pts[pp2a].pt == pt2 {
                pp2a
            } else if self.arena.pts[prev].pt == pt2 {
                prev
            } else if p3 == pp2a || p3 == prev {
                self.arena.insert_between(pp2a, prev, pt2)
            } else if pt3_is_between_pt1_and_pt2(
                &self.arena.pts[pp2a].pt,
                &self.arena.pts[p3].pt,
                &pt2,
            ) {
                self.arena.insert_between(pp2a, p3, pt2)
            } else {
                self.arena.insert_between(p3, prev, pt2)
            };

            // p1.pt == p3.pt and p2.pt == p4.pt, so join p1-p3 and p2-p4
            if self.arena.pts[p1].next == p2 && self.arena.pts[p3].prev == p4 {
                self.arena.pts[p1].next = p3;
                self.arena.pts[p3].prev = p1;
                self.arena.pts[p2].prev = p4;
                self.arena.pts[p4].next = p2;
            } else if self.arena.pts[p1].prev == p2 && self.arena.pts[p3].next == p4 {
                self.arena.pts[p1].prev = p3;
                self.arena.pts[p3].next = p1;
                self.arena.pts[p2].next = p4;
                self.arena.pts[p4].prev = p2;
            } else {
                // an orientation is probably wrong
                continue;
            }

            if rec1 == rec2 {
                // the ring was split in two rather than joined
                let bottom1 = self.arena.get_bottom_pt(p1);
                self.arena.recs[rec1].pts = bottom1;
                self.arena.recs[rec1].bottom_pt = bottom1;
                self.arena.pts[bottom1].idx = rec1;

                rec2 = self.arena.create_rec();
                self.joins[i].poly2_idx = rec2;
                let bottom2 = self.arena.get_bottom_pt(p2);
                self.arena.recs[rec2].pts = bottom2;
                self.arena.recs[rec2].bottom_pt = bottom2;
                self.arena.pts[bottom2].idx = rec2;

                let pt_of2 = self.arena.pts[self.arena.recs[rec2].pts].pt;
                let pt_of1 = self.arena.pts[self.arena.recs[rec1].pts].pt;
                if self
                    .arena
                    .point_in_ring(&pt_of2, self.arena.recs[rec1].pts, full)?
                {
                    // rec2 is contained by rec1
                    self.arena.recs[rec2].is_hole = !self.arena.recs[rec1].is_hole;
                    self.arena.recs[rec2].first_left = rec1;
                    if self.arena.recs[rec2].is_hole == self.arena.orientation_rec(rec2, full) {
                        let pts = self.arena.recs[rec2].pts;
                        self.arena.reverse_links(pts);
                    }
                } else if self
                    .arena
                    .point_in_ring(&pt_of1, self.arena.recs[rec2].pts, full)?
                {
                    // rec1 is contained by rec2
                    self.arena.recs[rec2].is_hole = self.arena.recs[rec1].is_hole;
                    self.arena.recs[rec1].is_hole = !self.arena.recs[rec2].is_hole;
                    self.arena.recs[rec2].first_left = self.arena.recs[rec1].first_left;
                    self.arena.recs[rec1].first_left = rec2;
                    if self.arena.recs[rec1].is_hole == self.arena.orientation_rec(rec1, full) {
                        let pts = self.arena.recs[rec1].pts;
                        self.arena.reverse_links(pts);
                    }
                    if fix_hole_linkages {
                        self.check_hole_linkages1(rec1, rec2)?;
                    }
                } else {
                    self.arena.recs[rec2].is_hole = self.arena.recs[rec1].is_hole;
                    self.arena.recs[rec2].first_left = self.arena.recs[rec1].first_left;
                    if fix_hole_linkages {
                        self.check_hole_linkages1(rec1, rec2)?;
                    }
                }

                // re-point any later joins that reference the split-off half
                for k in (i + 1)..self.joins.len() {
                    let j2 = self.joins[k];
                    if j2.poly1_idx == j.poly1_idx && self.arena.point_is_vertex(&j2.pt1a, p2) {
                        self.joins[k].poly1_idx = rec2;
                    }
                    if j2.poly2_idx == j.poly1_idx && self.arena.point_is_vertex(&j2.pt2a, p2) {
                        self.joins[k].poly2_idx = rec2;
                    }
                }

                self.arena.fixup_out_polygon(rec1, full);
                self.arena.fixup_out_polygon(rec2, full);
            } else {
                // two rings were joined together
                if fix_hole_linkages {
                    self.check_hole_linkages2(rec1, rec2);
                }

                self.arena.fixup_out_polygon(rec1, full);

                if self.arena.recs[rec1].pts != UNASSIGNED {
                    let is_hole = !self.arena.orientation_rec(rec1, full);
                    self.arena.recs[rec1].is_hole = is_hole;
                    if is_hole && self.arena.recs[rec1].first_left == UNASSIGNED {
                        self.arena.recs[rec1].first_left = self.arena.recs[rec2].first_left;
                    }
                }

                self.arena.recs[rec2].pts = UNASSIGNED;
                self.arena.recs[rec2].bottom_pt = UNASSIGNED;
                self.arena.recs[rec2].append_link = rec1;

                for k in (i + 1)..self.joins.len() {
                    if self.joins[k].poly1_idx == rec2 {
                        self.joins[k].poly1_idx = rec1;
                    }
                    if self.joins[k].poly2_idx == rec2 {
                        self.joins[k].poly2_idx = rec1;
                    }
                }
            }
        }
        Ok(())
    }

    fn build_result(&self, solution: &mut Polygons) {
        solution.clear();
        for rec in &self.arena.recs {
            if rec.pts == UNASSIGNED || self.arena.point_count(rec.pts) < 3 {
                continue;
            }
            solution.push(self.arena.ring_points(rec.pts));
        }
    }

    /// Outer rings sort first in the order they were opened, each followed by
    /// the holes linked to it; empty records sink to the end.
    fn sorted_rec_order(&self) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self.arena.recs.len()).collect();
        order.sort_by(|&a, &b| {
            let ra = &self.arena.recs[a];
            let rb = &self.arena.recs[b];
            let a_empty = ra.pts == UNASSIGNED;
            let b_empty = rb.pts == UNASSIGNED;
            if a_empty || b_empty {
                return a_empty.cmp(&b_empty);
            }
            let i1 = if ra.is_hole { ra.first_left } else { ra.idx };
            let i2 = if rb.is_hole { rb.first_left } else { rb.idx };
            i1.cmp(&i2).then_with(|| ra.is_hole.cmp(&rb.is_hole))
        });
        order
    }

    fn build_result_ex(&self, solution: &mut ExPolygons) {
        solution.clear();
        let order = self.sorted_rec_order();
        let mut i = 0;
        while i < order.len() && self.arena.recs[order[i]].pts != UNASSIGNED {
            let outer = self.arena.ring_points(self.arena.recs[order[i]].pts);
            i += 1;
            let mut holes = Vec::new();
            while i < order.len()
                && self.arena.recs[order[i]].pts != UNASSIGNED
                && self.arena.recs[order[i]].is_hole
            {
                holes.push(self.arena.ring_points(self.arena.recs[order[i]].pts));
                i += 1;
            }
            if outer.len() >= 3 {
                solution.push(ExPolygon { outer, holes });
            }
        }
    }
}

fn e2_inserts_before_e1(edges: &[Edge], e1: usize, e2: usize) -> bool {
    if edges[e2].curr.x == edges[e1].curr.x {
        edges[e2].dx > edges[e1].dx
    } else {
        edges[e2].curr.x < edges[e1].curr.x
    }
}
