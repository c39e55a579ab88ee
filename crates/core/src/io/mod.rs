//! Station ingestion

mod csv;

pub use self::csv::{parse_stations, read_stations_csv};
