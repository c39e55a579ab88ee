//! Isohyetal method
//!
//! Samples an IDW field over the stations' bounding box, contours it, and
//! averages the band values weighted by contour area.

use preciptech_core::{BoundingBox, Contour, Error, GeoPoint, Result, ScalarField, Station};
use tracing::debug;

use super::contour::{extract_contours, ContourParams};
use super::field::{sample_field, FieldParams};

/// Minimum number of stations for the isohyetal method
pub const MIN_STATIONS: usize = 3;

/// Parameters for the isohyetal method
#[derive(Debug, Clone, Copy)]
pub struct IsohyetalParams {
    /// Samples per axis (default: 50)
    pub grid_size: usize,
    /// Number of isohyets (default: 8)
    pub contour_count: usize,
    /// IDW power used to sample the field (default: 2.0)
    pub power: f64,
}

impl Default for IsohyetalParams {
    fn default() -> Self {
        Self {
            grid_size: 50,
            contour_count: 8,
            power: 2.0,
        }
    }
}

/// Output of [`isohyetal`]
#[derive(Debug, Clone, PartialEq)]
pub struct IsohyetalResult {
    /// Area-weighted precipitation
    pub value: f64,
    /// Sampled IDW field
    pub field: ScalarField,
    /// Isohyets in ascending threshold order
    pub contours: Vec<Contour>,
}

/// Isohyetal estimate.
///
/// The bounding box covers the stations and the target (no padding).
///
/// # Errors
/// - [`Error::InsufficientInput`] with fewer than 3 stations
/// - [`Error::InvalidParameter`] for a non-finite or out-of-range target
/// - [`Error::DegenerateGeometry`] when the station extent or the contours
///   enclose no area
pub fn isohyetal(stations: &[Station], target: GeoPoint, params: IsohyetalParams) -> Result<IsohyetalResult> {
    if stations.len() < MIN_STATIONS {
        return Err(Error::InsufficientInput {
            method: "isohyetal",
            required: MIN_STATIONS,
            found: stations.len(),
        });
    }
    target.validate_as("target")?;

    let bounds = BoundingBox::enclosing(stations, target);
    if bounds.width() == 0.0 || bounds.height() == 0.0 {
        return Err(Error::DegenerateGeometry(format!(
            "station extent has zero area ({} x {} degrees)",
            bounds.width(),
            bounds.height()
        )));
    }
    let field = sample_field(
        stations,
        bounds,
        FieldParams {
            grid_size: params.grid_size,
            power: params.power,
        },
    )?;
    let contours = extract_contours(
        &field,
        ContourParams {
            count: params.contour_count,
        },
    )?;
    let value = band_average(&contours)?;

    Ok(IsohyetalResult {
        value,
        field,
        contours,
    })
}

/// Area-weighted mean over adjacent contour pairs.
///
/// ```text
/// band value_i = (c_i.value + c_{i+1}.value) / 2
/// band area_i  = Σ exterior-ring areas of c_i   (holes not subtracted)
/// value        = Σ(area_i · value_i) / Σ(area_i)
/// ```
///
/// Counting holes as area biases multiply-connected bands slightly high.
pub fn band_average(contours: &[Contour]) -> Result<f64> {
    let mut total_area = 0.0;
    let mut weighted_sum = 0.0;

    for pair in contours.windows(2) {
        let area = pair[0].exterior_area();
        let band_value = (pair[0].value + pair[1].value) / 2.0;
        total_area += area;
        weighted_sum += area * band_value;
    }

    if total_area <= 0.0 {
        return Err(Error::DegenerateGeometry(
            "isohyets enclose zero total area".into(),
        ));
    }

    let value = weighted_sum / total_area;
    if !value.is_finite() {
        return Err(Error::DegenerateGeometry(format!(
            "isohyetal estimate is not finite ({})",
            value
        )));
    }

    debug!("Isohyetal: {} bands, total area {:.6}", contours.len().saturating_sub(1), total_area);
    Ok(value)
}
