#[derive(Debug, PartialEq, Copy, Clone)]
#[repr(u8)]
pub enum PolyFillType {
    EvenOdd = 0,
    NonZero = 1,
    Positive = 2,
    Negative = 3,
}

#[derive(Debug, PartialEq, Copy, Clone)]
#[repr(u8)]
pub enum PolyType {
    Subject = 0,
    Clip = 1,
}

#[derive(Debug, PartialEq, Copy, Clone)]
#[repr(u8)]
pub enum ClipType {
    Intersection = 0,
    Union = 1,
    Difference = 2,
    Xor = 3,
}

#[derive(Debug, PartialEq, Copy, Clone)]
#[repr(u8)]
pub enum JoinType {
    Square = 0,
    Round = 1,
    Miter = 2,
}

#[derive(Debug, PartialEq, Copy, Clone)]
#[repr(u8)]
pub enum Direction {
    RightToLeft = 0,
    LeftToRight = 1,
}

/// Which bound of its local minimum an edge currently represents. Also used
/// as a bit set on output rings to track which sides have touched them.
#[derive(Debug, PartialEq, Copy, Clone)]
#[repr(u8)]
pub enum EdgeSide {
    Neither = 0,
    Left = 1,
    Right = 2,
    Both = 3,
}

impl EdgeSide {
    #[inline(always)]
    pub fn or(self, other: EdgeSide) -> EdgeSide {
        match (self as u8) | (other as u8) {
            0 => EdgeSide::Neither,
            1 => EdgeSide::Left,
            2 => EdgeSide::Right,
            _ => EdgeSide::Both,
        }
    }

    #[inline(always)]
    pub fn contains(self, other: EdgeSide) -> bool {
        (self as u8) & (other as u8) == other as u8
    }
}

/// Keeps an edge in the AEL through an intersection it does not terminate at.
/// Horizontal processing relies on this to finish walking a horizontal before
/// either endpoint edge is removed.
#[derive(Debug, PartialEq, Copy, Clone)]
#[repr(u8)]
pub enum Protects {
    Neither = 0,
    Left = 1,
    Right = 2,
    Both = 3,
}

impl Protects {
    #[inline(always)]
    pub fn left(self) -> bool {
        matches!(self, Protects::Left | Protects::Both)
    }

    #[inline(always)]
    pub fn right(self) -> bool {
        matches!(self, Protects::Right | Protects::Both)
    }
}
