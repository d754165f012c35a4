use crate::clipper::constants::{HI_RANGE, LO_RANGE, UNASSIGNED};
use crate::clipper::edge::Edge;
use crate::clipper::enums::{EdgeSide, PolyType};
use crate::clipper::errors::ClipError;
use crate::clipper::local_minima::LocalMinimaList;
use crate::clipper::math::slopes_equal_points;
use crate::geometry::{IntPoint, IntRect};

/// Polygon ingestor: owns the edge arena and the local-minima list, and
/// tracks the precision capability for the whole invocation. The flag is
/// sticky: once any coordinate crosses `LO_RANGE` every later arithmetic call
/// takes the extended i128 path.
#[derive(Debug, Default)]
pub struct ClipperBase {
    pub edges: Vec<Edge>,
    pub minima: LocalMinimaList,
    pub use_full_range: bool,
}

impl ClipperBase {
    pub fn new() -> Self {
        Self {
            edges: Vec::new(),
            minima: LocalMinimaList::new(),
            use_full_range: false,
        }
    }

    fn range_test(&mut self, pt: &IntPoint) -> Result<(), ClipError> {
        let max_val = if self.use_full_range { HI_RANGE } else { LO_RANGE };
        if pt.x.abs() > max_val || pt.y.abs() > max_val {
            if pt.x.abs() > HI_RANGE || pt.y.abs() > HI_RANGE {
                return Err(ClipError::CoordinateOutOfRange);
            }
            self.use_full_range = true;
        }
        Ok(())
    }

    /// Ingests one ring. Rings that collapse below 3 points after removing
    /// duplicate and collinear vertices are rejected with `Ok(false)`; only a
    /// coordinate past the absolute range bound is an error.
    pub fn add_polygon(&mut self, pg: &[IntPoint], poly_type: PolyType) -> Result<bool, ClipError> {
        if pg.len() < 3 {
            return Ok(false);
        }

        let mut p: Vec<IntPoint> = Vec::with_capacity(pg.len());
        p.push(pg[0]);
        self.range_test(&pg[0])?;
        let mut j = 0usize;
        for pt in &pg[1..] {
            self.range_test(pt)?;
            if p[j] == *pt {
                continue;
            } else if j > 0 && slopes_equal_points(&p[j - 1], &p[j], pt, self.use_full_range) {
                if p[j - 1] == *pt {
                    j -= 1;
                }
            } else {
                j += 1;
            }
            if j < p.len() {
                p[j] = *pt;
            } else {
                p.push(*pt);
            }
        }
        if j < 2 {
            return Ok(false);
        }

        // The closure vertex may be duplicate or collinear with both ends;
        // re-check until stable.
        let mut len = j + 1;
        while len > 2 {
            if p[j] == p[0] {
                j -= 1;
            } else if p[0] == p[1] || slopes_equal_points(&p[j], &p[0], &p[1], self.use_full_range)
            {
                p[0] = p[j];
                j -= 1;
            } else if slopes_equal_points(&p[j - 1], &p[j], &p[0], self.use_full_range) {
                j -= 1;
            } else if slopes_equal_points(&p[0], &p[1], &p[2], self.use_full_range) {
                for i in 2..=j {
                    p[i - 1] = p[i];
                }
                j -= 1;
            } else {
                break;
            }
            len -= 1;
        }
        if len < 3 {
            return Ok(false);
        }

        // Build the circular edge ring. The last edge is initialized first so
        // every init can read its successor's vertex.
        let base = self.edges.len();
        for _ in 0..len {
            self.edges.push(Edge::new(poly_type));
        }
        self.edges[base].curr = p[0];
        self.init_edge(base + len - 1, base, base + len - 2, p[len - 1]);
        let mut i = len - 2;
        while i > 0 {
            self.init_edge(base + i, base + i + 1, base + i - 1, p[i]);
            i -= 1;
        }
        self.init_edge(base, base + 1, base + len - 1, p[0]);

        // The highest edge has the smallest top.y (Y increases downward).
        let mut e = base;
        let mut e_highest = base;
        loop {
            self.edges[e].curr = self.edges[e].bot;
            if self.edges[e].top.y < self.edges[e_highest].top.y {
                e_highest = e;
            }
            e = self.edges[e].next;
            if e == base {
                break;
            }
        }

        // Position e_highest so the bound walk below starts on a descending,
        // non-horizontal edge.
        if self.edges[e_highest].wind_delta > 0 {
            e_highest = self.edges[e_highest].next;
        }
        if self.edges[e_highest].is_horizontal() {
            e_highest = self.edges[e_highest].next;
        }

        let mut e = e_highest;
        loop {
            e = self.add_bounds_to_lml(e);
            if e == e_highest {
                break;
            }
        }
        Ok(true)
    }

    pub fn add_polygons(
        &mut self,
        polygons: &[Vec<IntPoint>],
        poly_type: PolyType,
    ) -> Result<bool, ClipError> {
        let mut result = false;
        for pg in polygons {
            if self.add_polygon(pg, poly_type)? {
                result = true;
            }
        }
        Ok(result)
    }

    fn init_edge(&mut self, e: usize, next: usize, prev: usize, pt: IntPoint) {
        let next_curr = self.edges[next].curr;
        let edge = &mut self.edges[e];
        edge.next = next;
        edge.prev = prev;
        edge.curr = pt;
        if edge.curr.y >= next_curr.y {
            edge.bot = edge.curr;
            edge.top = next_curr;
            edge.wind_delta = 1;
        } else {
            edge.top = edge.curr;
            edge.bot = next_curr;
            edge.wind_delta = -1;
        }
        edge.set_dx();
        edge.out_idx = UNASSIGNED;
    }

    /// Walks from the top of one bound down to a local minimum, registers the
    /// minimum's left/right bound pair, then climbs the following bound.
    /// Returns the edge starting the next bound.
    fn add_bounds_to_lml(&mut self, start: usize) -> usize {
        self.edges[start].next_in_lml = UNASSIGNED;
        let mut e = self.edges[start].next;
        loop {
            let prev = self.edges[e].prev;
            if self.edges[e].is_horizontal() {
                // Proceed through horizontals approached from their right but
                // break on horizontal minima approached from their left, so
                // local minima always sit left of horizontals.
                let next = self.edges[e].next;
                if self.edges[next].top.y < self.edges[e].top.y
                    && self.edges[next].bot.x > self.edges[prev].bot.x
                {
                    break;
                }
                if self.edges[e].top.x != self.edges[prev].bot.x {
                    self.edges[e].swap_x();
                }
                self.edges[e].next_in_lml = prev;
            } else if self.edges[e].curr.y == self.edges[prev].curr.y {
                break;
            } else {
                self.edges[e].next_in_lml = prev;
            }
            e = self.edges[e].next;
        }

        // e and e.prev now meet at a local minimum.
        let prev = self.edges[e].prev;
        let y = self.edges[prev].bot.y;
        let (left, right) = if self.edges[e].is_horizontal() {
            // Horizontal edges never start a left bound.
            if self.edges[e].bot.x != self.edges[prev].bot.x {
                self.edges[e].swap_x();
            }
            (prev, e)
        } else if self.edges[e].dx < self.edges[prev].dx {
            (prev, e)
        } else {
            (e, prev)
        };
        self.edges[left].side = EdgeSide::Left;
        self.edges[right].side = EdgeSide::Right;
        self.minima.insert(y, left, right);

        loop {
            let next = self.edges[e].next;
            if self.edges[next].top.y == self.edges[e].top.y && !self.edges[next].is_horizontal() {
                break;
            }
            self.edges[e].next_in_lml = next;
            e = next;
            let prev = self.edges[e].prev;
            if self.edges[e].is_horizontal() && self.edges[e].bot.x != self.edges[prev].top.x {
                self.edges[e].swap_x();
            }
        }
        self.edges[e].next
    }

    /// Rewinds the minima cursor and restores every bound edge to its
    /// pre-sweep state, making the ingested geometry reusable.
    pub fn reset(&mut self) {
        self.minima.rewind();
        let bounds: Vec<(usize, usize)> = self
            .minima
            .iter()
            .map(|lm| (lm.left_bound, lm.right_bound))
            .collect();
        for (left, right) in bounds {
            self.reset_bound(left, EdgeSide::Left);
            self.reset_bound(right, EdgeSide::Right);
        }
    }

    fn reset_bound(&mut self, bound: usize, side: EdgeSide) {
        let mut e = bound;
        while e != UNASSIGNED {
            let edge = &mut self.edges[e];
            edge.curr = edge.bot;
            edge.side = side;
            edge.out_idx = UNASSIGNED;
            e = edge.next_in_lml;
        }
    }

    pub fn clear(&mut self) {
        self.edges.clear();
        self.minima.clear();
        self.use_full_range = false;
    }

    /// Bounding rectangle of all ingested geometry.
    pub fn get_bounds(&self) -> IntRect {
        let mut result = IntRect::default();
        let mut lm_iter = self.minima.iter();
        let first = match lm_iter.next() {
            Some(lm) => lm,
            None => return result,
        };
        result.left = self.edges[first.left_bound].bot.x;
        result.top = self.edges[first.left_bound].bot.y;
        result.right = result.left;
        result.bottom = result.top;

        for lm in self.minima.iter() {
            let lb = &self.edges[lm.left_bound];
            if lb.bot.y > result.bottom {
                result.bottom = lb.bot.y;
            }
            for bound in [lm.left_bound, lm.right_bound] {
                let mut e = bound;
                loop {
                    let edge = &self.edges[e];
                    result.left = result.left.min(edge.bot.x);
                    result.right = result.right.max(edge.bot.x);
                    if edge.next_in_lml == UNASSIGNED {
                        result.left = result.left.min(edge.top.x);
                        result.right = result.right.max(edge.top.x);
                        result.top = result.top.min(edge.top.y);
                        break;
                    }
                    e = edge.next_in_lml;
                }
            }
        }
        result
    }
}
