//! Areal estimators
//!
//! Methods that weight stations by the area they represent:
//! - Thiessen: Voronoi cells clipped to a padded bounding box
//! - Isohyetal: contour bands of an IDW-sampled field
//!
//! Both work in the lat/lng plane (x = lng, y = lat) without projection.
//! Areas are in square degrees and only their ratios matter.

mod contour;
mod field;
mod isohyetal;
mod thiessen;
mod voronoi;

pub use contour::{extract_contours, thresholds, ContourParams};
pub use field::{sample_field, FieldParams};
pub use isohyetal::{band_average, isohyetal, IsohyetalParams, IsohyetalResult};
pub use thiessen::{thiessen, ThiessenCell, ThiessenParams, ThiessenResult};
pub use voronoi::voronoi_cells;
