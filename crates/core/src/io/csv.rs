//! Station CSV reader
//!
//! One station per line: `latitude,longitude,precipitation[,name]`.
//! Rows that are incomplete, non-numeric or out of range are skipped so
//! that only valid stations reach the estimators. A header line is simply
//! a non-numeric row and is skipped the same way.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::station::Station;

/// Parse stations from any buffered reader.
///
/// Unnamed stations are called `Station N`, N being their 1-based position
/// among the accepted rows. Fails if no row is valid.
pub fn parse_stations<R: BufRead>(reader: R) -> Result<Vec<Station>> {
    let mut stations = Vec::new();
    let mut skipped = 0usize;

    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match parse_row(line, stations.len() + 1) {
            Ok(station) => stations.push(station),
            Err(reason) => {
                skipped += 1;
                warn!("Skipping line {}: {}", idx + 1, reason);
            }
        }
    }

    if stations.is_empty() {
        return Err(Error::Parse("no valid station rows".into()));
    }

    debug!("Parsed {} stations ({} rows skipped)", stations.len(), skipped);
    Ok(stations)
}

/// Read stations from a CSV file.
pub fn read_stations_csv<P: AsRef<Path>>(path: P) -> Result<Vec<Station>> {
    let file = File::open(path.as_ref())?;
    parse_stations(BufReader::new(file))
}

fn parse_row(line: &str, position: usize) -> std::result::Result<Station, String> {
    let fields: Vec<&str> = line.split(',').map(str::trim).collect();
    if fields.len() < 3 {
        return Err(format!("expected at least 3 fields, got {}", fields.len()));
    }

    let lat = parse_number(fields[0], "latitude")?;
    let lng = parse_number(fields[1], "longitude")?;
    let precipitation = parse_number(fields[2], "precipitation")?;

    let name = match fields.get(3) {
        Some(n) if !n.is_empty() => n.to_string(),
        _ => format!("Station {}", position),
    };

    Station::new(name, lat, lng, precipitation).map_err(|e| e.to_string())
}

fn parse_number(field: &str, what: &str) -> std::result::Result<f64, String> {
    let value: f64 = field
        .parse()
        .map_err(|_| format!("invalid {}: {:?}", what, field))?;
    if !value.is_finite() {
        return Err(format!("non-finite {}: {}", what, field));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};

    #[test]
    fn test_parse_basic() {
        let input = "0,0,10\n0,1,20\n1,0,30\n";
        let stations = parse_stations(Cursor::new(input)).unwrap();
        assert_eq!(stations.len(), 3);
        assert_eq!(stations[0].name, "Station 1");
        assert_eq!(stations[2].lat, 1.0);
        assert_eq!(stations[1].precipitation, 20.0);
    }

    #[test]
    fn test_parse_skips_invalid_rows() {
        let input = "latitude,longitude,precipitation\n\
                     \n\
                     -33.4, -70.6, 12.5\n\
                     abc,1,2\n\
                     95,0,1\n\
                     1,2\n\
                     1,2,-5\n\
                     1,2,NaN\n\
                     -33.5,-70.7,8.0,Pudahuel\r\n";
        let stations = parse_stations(Cursor::new(input)).unwrap();
        assert_eq!(stations.len(), 2);
        assert_eq!(stations[0].name, "Station 1");
        assert_eq!(stations[0].lng, -70.6);
        assert_eq!(stations[1].name, "Pudahuel");
        assert_eq!(stations[1].precipitation, 8.0);
    }

    #[test]
    fn test_parse_no_valid_rows() {
        let result = parse_stations(Cursor::new("lat,lng,precip\nfoo,bar,baz\n"));
        assert!(matches!(result, Err(Error::Parse(_))));
    }

    #[test]
    fn test_read_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "10.5,20.25,3").unwrap();
        writeln!(file, "11,21,4,Upper").unwrap();

        let stations = read_stations_csv(file.path()).unwrap();
        assert_eq!(stations.len(), 2);
        assert_eq!(stations[1].name, "Upper");
    }

    #[test]
    fn test_read_missing_file() {
        let result = read_stations_csv("/nonexistent/stations.csv");
        assert!(matches!(result, Err(Error::Io(_))));
    }
}
