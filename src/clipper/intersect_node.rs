use crate::clipper::edge::Edge;
use crate::geometry::IntPoint;

/// One crossing found while bubble-sorting the SEL for a scanbeam.
#[derive(Debug, Clone, Copy)]
pub struct IntersectNode {
    pub edge1: usize,
    pub edge2: usize,
    pub pt: IntPoint,
}

/// Intersection events for the current scanbeam, kept in bottom-up
/// application order as they are inserted.
#[derive(Debug, Default)]
pub struct IntersectList {
    nodes: Vec<IntersectNode>,
}

impl IntersectList {
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    pub fn insert(&mut self, edge1: usize, edge2: usize, pt: IntPoint, edges: &[Edge]) {
        let node = IntersectNode { edge1, edge2, pt };
        if self.nodes.is_empty() || process_1_before_2(&node, &self.nodes[0], edges) {
            self.nodes.insert(0, node);
            return;
        }
        let mut pos = 1;
        while pos < self.nodes.len() && process_1_before_2(&self.nodes[pos], &node, edges) {
            pos += 1;
        }
        self.nodes.insert(pos, node);
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn get(&self, index: usize) -> IntersectNode {
        self.nodes[index]
    }

    pub fn swap(&mut self, i: usize, j: usize) {
        self.nodes.swap(i, j);
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
    }
}

/// Ordering predicate for intersection events: lower (greater Y) first, with
/// a slope-aware tie-break when the events share an edge.
fn process_1_before_2(node1: &IntersectNode, node2: &IntersectNode, edges: &[Edge]) -> bool {
    if node1.pt.y == node2.pt.y {
        if node1.edge1 == node2.edge1 || node1.edge2 == node2.edge1 {
            let result = node2.pt.x > node1.pt.x;
            if edges[node2.edge1].dx > 0.0 {
                !result
            } else {
                result
            }
        } else if node1.edge1 == node2.edge2 || node1.edge2 == node2.edge2 {
            let result = node2.pt.x > node1.pt.x;
            if edges[node2.edge2].dx > 0.0 {
                !result
            } else {
                result
            }
        } else {
            node2.pt.x > node1.pt.x
        }
    } else {
        node1.pt.y > node2.pt.y
    }
}
