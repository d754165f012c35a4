use num_traits::{Num, NumCast};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Point<T> {
    pub x: T,
    pub y: T,
}

pub type IntPoint = Point<i64>;

impl<T: Num + Copy + PartialOrd + NumCast> Point<T> {
    #[inline(always)]
    pub fn new(x: T, y: T) -> Self {
        Self { x, y }
    }

    #[inline(always)]
    pub fn cross(&self, other: &Self) -> T {
        self.x * other.y - self.y * other.x
    }

    #[inline(always)]
    pub fn dot(&self, other: &Self) -> T {
        self.x * other.x + self.y * other.y
    }
}

impl Point<f64> {
    #[inline(always)]
    pub fn normal(&self) -> Self {
        Self::new(self.y, -self.x)
    }

    pub fn normalized(&self) -> Self {
        let len = (self.x * self.x + self.y * self.y).sqrt();
        if len == 0.0 {
            Self::new(0.0, 0.0)
        } else {
            Self::new(self.x / len, self.y / len)
        }
    }

    /// Rounds both components half away from zero.
    #[inline(always)]
    pub fn round(&self) -> IntPoint {
        IntPoint::new(self.x.round() as i64, self.y.round() as i64)
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct IntRect {
    pub left: i64,
    pub top: i64,
    pub right: i64,
    pub bottom: i64,
}
