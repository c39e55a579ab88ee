//! # PrecipTech Algorithms
//!
//! Precipitation estimators for an unobserved target location.
//!
//! ## Available Methods
//!
//! - **interpolation**: arithmetic mean, normal ratio, IDW
//! - **areal**: Thiessen polygons, isohyetal contours
//!
//! [`estimate`] dispatches over all five with a single call.

pub mod areal;
pub mod interpolation;
mod estimate;
mod maybe_rayon;

pub use estimate::estimate;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::areal::{
        extract_contours, isohyetal, sample_field, thiessen, voronoi_cells,
        ContourParams, FieldParams, IsohyetalParams, IsohyetalResult, ThiessenParams,
        ThiessenResult,
    };
    pub use crate::estimate;
    pub use crate::interpolation::{arithmetic_mean, idw, normal_ratio, IdwParams};
    pub use preciptech_core::prelude::*;
}
