pub mod point;

pub use point::{IntPoint, IntRect, Point};
