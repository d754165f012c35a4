/// Null handle for every index-linked arena in the engine.
pub const UNASSIGNED: usize = usize::MAX;

/// Slope sentinel for horizontal edges.
pub const HORIZONTAL: f64 = -3.4e38;

/// sqrt(2^63 - 1) / 2: largest magnitude safe for i64 cross products.
pub const LO_RANGE: i64 = 1_518_500_249;

/// sqrt(2^127 - 1) / 2: largest magnitude safe for i128 cross products.
pub const HI_RANGE: i64 = 6_521_908_912_666_391_106;

pub const DEFAULT_MITER_LIMIT: f64 = 2.0;
