//! Gauge stations and target points

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::geometry::BoundingBox;

/// A geographic location in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    /// Create a validated point.
    ///
    /// Latitude must lie in [-90, 90] and longitude in [-180, 180].
    pub fn new(lat: f64, lng: f64) -> Result<Self> {
        validate_coordinates(lat, lng).map_err(Error::InvalidStation)?;
        Ok(Self { lat, lng })
    }

    /// Create a point without range checks.
    ///
    /// Used for derived geometry (padded boxes, cell vertices) which may
    /// legitimately fall outside the geographic range.
    #[inline]
    pub const fn new_unchecked(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Check the point against the rules of [`new`](Self::new), reporting a
    /// failure as an invalid parameter called `name`.
    pub fn validate_as(&self, name: &'static str) -> Result<()> {
        validate_coordinates(self.lat, self.lng).map_err(|reason| Error::InvalidParameter {
            name,
            value: format!("({}, {})", self.lat, self.lng),
            reason,
        })
    }
}

/// A precipitation gauge with a known location and observed value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Station {
    pub name: String,
    pub lat: f64,
    pub lng: f64,
    /// Observed precipitation (mm), never negative
    pub precipitation: f64,
}

impl Station {
    /// Create a validated station.
    ///
    /// Rejects non-finite values, out-of-range coordinates and negative
    /// precipitation so that nothing invalid reaches the estimators.
    pub fn new(name: impl Into<String>, lat: f64, lng: f64, precipitation: f64) -> Result<Self> {
        let name = name.into();
        validate_coordinates(lat, lng)
            .map_err(|reason| Error::InvalidStation(format!("{}: {}", name, reason)))?;
        if !precipitation.is_finite() || precipitation < 0.0 {
            return Err(Error::InvalidStation(format!(
                "{}: precipitation must be a finite value >= 0, got {}",
                name, precipitation
            )));
        }
        Ok(Self {
            name,
            lat,
            lng,
            precipitation,
        })
    }

    /// Station location
    #[inline]
    pub fn location(&self) -> GeoPoint {
        GeoPoint::new_unchecked(self.lat, self.lng)
    }
}

fn validate_coordinates(lat: f64, lng: f64) -> std::result::Result<(), String> {
    if !lat.is_finite() || !(-90.0..=90.0).contains(&lat) {
        return Err(format!("latitude must be within [-90, 90], got {}", lat));
    }
    if !lng.is_finite() || !(-180.0..=180.0).contains(&lng) {
        return Err(format!("longitude must be within [-180, 180], got {}", lng));
    }
    Ok(())
}

/// Descriptive statistics of a station set
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StationSummary {
    pub count: usize,
    pub min_precipitation: f64,
    pub max_precipitation: f64,
    pub mean_precipitation: f64,
    pub bounds: BoundingBox,
}

impl StationSummary {
    /// Summarize a station set. Returns `None` for an empty set.
    pub fn of(stations: &[Station]) -> Option<Self> {
        let bounds = BoundingBox::from_points(stations.iter().map(Station::location))?;

        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        let mut sum = 0.0;
        for s in stations {
            min = min.min(s.precipitation);
            max = max.max(s.precipitation);
            sum += s.precipitation;
        }

        Some(Self {
            count: stations.len(),
            min_precipitation: min,
            max_precipitation: max,
            mean_precipitation: sum / stations.len() as f64,
            bounds,
        })
    }
}
