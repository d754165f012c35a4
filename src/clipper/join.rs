use crate::geometry::IntPoint;

/// Two collinear segment references noted during the sweep; resolved into a
/// ring merge or split once the sweep completes.
#[derive(Debug, Clone, Copy)]
pub struct JoinRec {
    pub pt1a: IntPoint,
    pub pt1b: IntPoint,
    pub poly1_idx: usize,
    pub pt2a: IntPoint,
    pub pt2b: IntPoint,
    pub poly2_idx: usize,
}

/// A horizontal edge remembered while crossing the top of a scanbeam, so a
/// later overlapping horizontal can be stitched to the same ring.
#[derive(Debug, Clone, Copy)]
pub struct HorzJoinRec {
    pub edge: usize,
    pub saved_idx: usize,
}
