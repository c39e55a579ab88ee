//! Single entry point over all estimation methods

use preciptech_core::{
    Auxiliary, Error, EstimationOptions, EstimationResult, GeoPoint, Method, Result, Station,
};
use tracing::debug;

use crate::areal::{isohyetal, thiessen, IsohyetalParams, ThiessenParams};
use crate::interpolation::{arithmetic_mean, idw, normal_ratio, IdwParams};

/// Estimate precipitation at `target` with the selected method.
///
/// Every call is independent: nothing is cached or retained between calls.
///
/// # Errors
/// - [`Error::InvalidParameter`] for options that fail validation or a
///   non-finite or out-of-range target
/// - [`Error::EmptyInput`] when `stations` is empty
/// - [`Error::InsufficientInput`] when Thiessen/isohyetal get fewer than 3 stations
/// - [`Error::MissingParameter`] for normal-ratio without a normal precipitation
/// - [`Error::DegenerateGeometry`] when an area method ends with zero total area
pub fn estimate(
    method: Method,
    stations: &[Station],
    target: GeoPoint,
    options: &EstimationOptions,
) -> Result<EstimationResult> {
    options.validate()?;
    target.validate_as("target")?;

    if stations.is_empty() {
        return Err(Error::EmptyInput);
    }
    if stations.len() < method.min_stations() {
        return Err(Error::InsufficientInput {
            method: method.as_str(),
            required: method.min_stations(),
            found: stations.len(),
        });
    }

    debug!(
        "Estimating with {} over {} stations at ({}, {})",
        method,
        stations.len(),
        target.lat,
        target.lng
    );

    let (value, auxiliary) = match method {
        Method::Arithmetic => (arithmetic_mean(stations).ok_or(Error::EmptyInput)?, None),
        Method::NormalRatio => {
            let normal = options
                .normal_precipitation
                .ok_or(Error::MissingParameter("normal_precipitation"))?;
            (normal_ratio(stations, normal).ok_or(Error::EmptyInput)?, None)
        }
        Method::Idw => {
            let value = idw(stations, target, IdwParams { power: options.power })?;
            (value, None)
        }
        Method::Thiessen => {
            let result = thiessen(
                stations,
                target,
                ThiessenParams {
                    padding: options.padding,
                },
            )?;
            (result.value, Some(Auxiliary::Polygons(result.polygons())))
        }
        Method::Isohyetal => {
            let result = isohyetal(
                stations,
                target,
                IsohyetalParams {
                    grid_size: options.grid_size,
                    contour_count: options.contour_count,
                    power: options.power,
                },
            )?;
            (result.value, Some(Auxiliary::Contours(result.contours)))
        }
    };

    Ok(EstimationResult {
        method,
        value,
        auxiliary,
    })
}
