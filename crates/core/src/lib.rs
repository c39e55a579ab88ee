//! # PrecipTech Core
//!
//! Core types, geometry and I/O for the PrecipTech precipitation
//! estimation engine.
//!
//! This crate provides:
//! - `Station` / `GeoPoint`: validated gauge observations and target points
//! - `BoundingBox`, `Polygon`: planar geometry over lat/lng (x = lng, y = lat)
//! - `distance`: great-circle (haversine) distance in kilometres
//! - `ScalarField`, `Contour`: gridded fields and their isohyets
//! - `Method`, `EstimationOptions`, `EstimationResult`: the estimation contract
//! - Station CSV ingestion

pub mod error;
pub mod estimate;
pub mod field;
pub mod geometry;
pub mod io;
pub mod station;

pub use error::{Error, Result};
pub use estimate::{Auxiliary, EstimationOptions, EstimationResult, Method};
pub use field::{Contour, ScalarField};
pub use geometry::{distance, ring_area, BoundingBox, Polygon};
pub use station::{GeoPoint, Station, StationSummary};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::estimate::{Auxiliary, EstimationOptions, EstimationResult, Method};
    pub use crate::field::{Contour, ScalarField};
    pub use crate::geometry::{distance, ring_area, BoundingBox, Polygon};
    pub use crate::station::{GeoPoint, Station, StationSummary};
}
