//! Point estimators
//!
//! Estimate precipitation from gauge observations without building any
//! geometry:
//! - Arithmetic mean: unweighted average of all stations
//! - Normal ratio: average scaled by a normal annual precipitation
//! - IDW: Inverse Distance Weighting on great-circle distances

mod arithmetic;
mod idw;
mod normal_ratio;

pub use arithmetic::arithmetic_mean;
pub use idw::{idw, IdwParams};
pub use normal_ratio::normal_ratio;

pub(crate) use idw::idw_unchecked;
