//! Estimation contract: method selection, options and results

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::field::Contour;
use crate::geometry::Polygon;

/// The five supported estimation methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Method {
    Arithmetic,
    NormalRatio,
    Idw,
    Thiessen,
    Isohyetal,
}

impl Method {
    pub const ALL: [Method; 5] = [
        Method::Arithmetic,
        Method::NormalRatio,
        Method::Idw,
        Method::Thiessen,
        Method::Isohyetal,
    ];

    /// Identifier used on the command line and in serialized results
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Arithmetic => "arithmetic",
            Method::NormalRatio => "normal-ratio",
            Method::Idw => "idw",
            Method::Thiessen => "thiessen",
            Method::Isohyetal => "isohyetal",
        }
    }

    /// Human-readable name
    pub fn label(&self) -> &'static str {
        match self {
            Method::Arithmetic => "Arithmetic Mean",
            Method::NormalRatio => "Normal Ratio",
            Method::Idw => "Inverse Distance Weighting",
            Method::Thiessen => "Thiessen Polygon",
            Method::Isohyetal => "Isohyetal",
        }
    }

    /// Minimum number of stations the method accepts
    pub fn min_stations(&self) -> usize {
        match self {
            Method::Arithmetic | Method::NormalRatio | Method::Idw => 1,
            Method::Thiessen | Method::Isohyetal => 3,
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Method {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "arithmetic" | "mean" => Ok(Method::Arithmetic),
            "normal-ratio" | "normal_ratio" | "normal" => Ok(Method::NormalRatio),
            "idw" => Ok(Method::Idw),
            "thiessen" | "voronoi" => Ok(Method::Thiessen),
            "isohyetal" => Ok(Method::Isohyetal),
            _ => Err(Error::InvalidParameter {
                name: "method",
                value: s.to_string(),
                reason: "use arithmetic, normal-ratio, idw, thiessen or isohyetal".into(),
            }),
        }
    }
}

/// Options shared by all methods; each method reads only what it needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EstimationOptions {
    /// Normal annual precipitation; required by the normal-ratio method.
    pub normal_precipitation: Option<f64>,
    /// IDW power parameter (default: 2.0)
    pub power: f64,
    /// Samples per axis for the isohyetal field (default: 50)
    pub grid_size: usize,
    /// Number of isohyets (default: 8)
    pub contour_count: usize,
    /// Margin added around the Thiessen bounding box, in degrees (default: 50.0)
    pub padding: f64,
}

impl Default for EstimationOptions {
    fn default() -> Self {
        Self {
            normal_precipitation: None,
            power: 2.0,
            grid_size: 50,
            contour_count: 8,
            padding: 50.0,
        }
    }
}

impl EstimationOptions {
    /// Reject values no method can work with.
    pub fn validate(&self) -> Result<()> {
        if let Some(normal) = self.normal_precipitation {
            if !normal.is_finite() || normal <= 0.0 {
                return Err(invalid("normal_precipitation", normal, "must be a finite value > 0"));
            }
        }
        if !self.power.is_finite() || self.power <= 0.0 {
            return Err(invalid("power", self.power, "must be a finite value > 0"));
        }
        if self.grid_size < 2 {
            return Err(invalid("grid_size", self.grid_size, "must be at least 2"));
        }
        if self.contour_count < 2 {
            return Err(invalid("contour_count", self.contour_count, "must be at least 2"));
        }
        if !self.padding.is_finite() || self.padding < 0.0 {
            return Err(invalid("padding", self.padding, "must be a finite value >= 0"));
        }
        Ok(())
    }
}

fn invalid(name: &'static str, value: impl fmt::Display, reason: &str) -> Error {
    Error::InvalidParameter {
        name,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Geometry produced by the area-based methods, in geographic coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "items", rename_all = "snake_case")]
pub enum Auxiliary {
    /// Thiessen cells of the contributing stations, in station order
    Polygons(Vec<Polygon>),
    /// Isohyets in ascending threshold order
    Contours(Vec<Contour>),
}

/// Outcome of a single estimation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstimationResult {
    pub method: Method,
    pub value: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auxiliary: Option<Auxiliary>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_roundtrip_names() {
        for m in Method::ALL {
            assert_eq!(m.as_str().parse::<Method>().unwrap(), m);
        }
        assert_eq!("IDW".parse::<Method>().unwrap(), Method::Idw);
        assert!("kriging".parse::<Method>().is_err());
    }

    #[test]
    fn test_min_stations() {
        assert_eq!(Method::Idw.min_stations(), 1);
        assert_eq!(Method::Thiessen.min_stations(), 3);
        assert_eq!(Method::Isohyetal.min_stations(), 3);
    }

    #[test]
    fn test_default_options_valid() {
        let opts = EstimationOptions::default();
        assert!(opts.validate().is_ok());
        assert_eq!(opts.grid_size, 50);
        assert_eq!(opts.contour_count, 8);
        assert_eq!(opts.power, 2.0);
    }

    #[test]
    fn test_invalid_options() {
        let bad = [
            EstimationOptions { power: 0.0, ..Default::default() },
            EstimationOptions { power: f64::NAN, ..Default::default() },
            EstimationOptions { grid_size: 1, ..Default::default() },
            EstimationOptions { contour_count: 1, ..Default::default() },
            EstimationOptions { padding: -1.0, ..Default::default() },
            EstimationOptions { normal_precipitation: Some(0.0), ..Default::default() },
        ];
        for opts in bad {
            assert!(
                matches!(opts.validate(), Err(Error::InvalidParameter { .. })),
                "expected rejection: {:?}",
                opts
            );
        }
    }

    #[test]
    fn test_options_from_partial_json() {
        let opts: EstimationOptions =
            serde_json::from_str(r#"{ "normal_precipitation": 1200.0, "grid_size": 80 }"#).unwrap();
        assert_eq!(opts.normal_precipitation, Some(1200.0));
        assert_eq!(opts.grid_size, 80);
        assert_eq!(opts.contour_count, 8);
    }

    #[test]
    fn test_result_serializes_method_name() {
        let result = EstimationResult {
            method: Method::NormalRatio,
            value: 1.5,
            auxiliary: None,
        };
        let json = serde_json::to_string(&result).unwrap();
        assert_eq!(json, r#"{"method":"normal-ratio","value":1.5}"#);
    }
}
