pub mod clipper;
pub mod clipper_base;
pub mod constants;
pub mod edge;
pub mod enums;
pub mod errors;
pub mod intersect_node;
pub mod join;
pub mod local_minima;
pub mod math;
pub mod offset;
pub mod out_poly;
pub mod scanbeam;

#[cfg(test)]
mod tests;

pub use clipper::{Clipper, ExPolygon, ExPolygons, Polygon, Polygons};
pub use constants::DEFAULT_MITER_LIMIT;
pub use enums::{ClipType, JoinType, PolyFillType, PolyType};
pub use errors::ClipError;
pub use math::{area, orientation};
pub use offset::{offset_polygons, reverse_polygons, simplify_polygons};
