/// Pending sweep Y levels: sorted ascending, duplicate-free, popped largest
/// first (the sweep runs bottom-up in a Y-down coordinate system).
#[derive(Debug, Default)]
pub struct Scanbeam {
    ys: Vec<i64>,
}

impl Scanbeam {
    pub fn new() -> Self {
        Self { ys: Vec::new() }
    }

    pub fn insert(&mut self, y: i64) {
        match self.ys.binary_search(&y) {
            Ok(_) => {} // ignore duplicates
            Err(pos) => self.ys.insert(pos, y),
        }
    }

    pub fn pop(&mut self) -> Option<i64> {
        self.ys.pop()
    }

    pub fn is_empty(&self) -> bool {
        self.ys.is_empty()
    }

    pub fn clear(&mut self) {
        self.ys.clear();
    }
}
