//! Error types for PrecipTech

use thiserror::Error;

/// Main error type for PrecipTech operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("No stations provided")]
    EmptyInput,

    #[error("{method} requires at least {required} stations, got {found}")]
    InsufficientInput {
        method: &'static str,
        required: usize,
        found: usize,
    },

    #[error("Degenerate geometry: {0}")]
    DegenerateGeometry(String),

    #[error("Missing parameter: {0}")]
    MissingParameter(&'static str),

    #[error("Invalid parameter: {name} = {value} ({reason})")]
    InvalidParameter {
        name: &'static str,
        value: String,
        reason: String,
    },

    #[error("Invalid station: {0}")]
    InvalidStation(String),

    #[error("Parse error: {0}")]
    Parse(String),
}

/// Result type alias for PrecipTech operations
pub type Result<T> = std::result::Result<T, Error>;
