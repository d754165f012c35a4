//! Boolean operations (intersection, union, difference, xor) and offsetting
//! on polygons with 64-bit integer coordinates, via a bottom-up Vatti-style
//! scanline sweep. Winding is interpreted per ring under the even-odd,
//! non-zero, positive, or negative fill rule.

pub mod clipper;
pub mod geometry;

pub use clipper::{
    area, offset_polygons, orientation, reverse_polygons, simplify_polygons, ClipError, ClipType,
    Clipper, ExPolygon, ExPolygons, JoinType, PolyFillType, PolyType, Polygon, Polygons,
    DEFAULT_MITER_LIMIT,
};
pub use geometry::{IntPoint, IntRect, Point};
