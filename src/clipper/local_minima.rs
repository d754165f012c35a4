use crate::clipper::constants::UNASSIGNED;

/// A Y level where a left/right bound pair starts.
#[derive(Debug, Clone, Copy)]
pub struct LocalMinimum {
    pub y: i64,
    pub left_bound: usize,
    pub right_bound: usize,
}

/// Local minima kept in descending Y order and consumed by cursor, one
/// scanbeam level at a time.
#[derive(Debug, Default)]
pub struct LocalMinimaList {
    items: Vec<LocalMinimum>,
    current: usize,
}

impl LocalMinimaList {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            current: 0,
        }
    }

    pub fn insert(&mut self, y: i64, left_bound: usize, right_bound: usize) {
        let lm = LocalMinimum {
            y,
            left_bound,
            right_bound,
        };
        let pos = self
            .items
            .iter()
            .position(|item| y >= item.y)
            .unwrap_or(self.items.len());
        self.items.insert(pos, lm);
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The minimum the cursor currently points at, if any remain.
    pub fn current(&self) -> Option<LocalMinimum> {
        self.items.get(self.current).copied()
    }

    pub fn exhausted(&self) -> bool {
        self.current >= self.items.len()
    }

    pub fn pop(&mut self) -> LocalMinimum {
        let lm = self.items[self.current];
        self.current += 1;
        lm
    }

    pub fn rewind(&mut self) {
        self.current = 0;
    }

    pub fn iter(&self) -> impl Iterator<Item = &LocalMinimum> {
        self.items.iter()
    }

    pub fn first(&self) -> LocalMinimum {
        self.items.first().copied().unwrap_or(LocalMinimum {
            y: 0,
            left_bound: UNASSIGNED,
            right_bound: UNASSIGNED,
        })
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.current = 0;
    }
}
