//! Planar and spherical geometry primitives

mod bounds;
mod distance;
mod polygon;

pub use bounds::BoundingBox;
pub use distance::{distance, EARTH_RADIUS_KM};
pub use polygon::{ring_area, ring_contains, signed_ring_area, Polygon};
