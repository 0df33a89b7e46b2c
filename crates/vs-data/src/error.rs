//! Reference-data loading errors. All of these are fatal at startup.

use std::path::PathBuf;
use thiserror::Error;
use vs_core::CoreError;

pub type DataResult<T> = Result<T, DataError>;

#[derive(Error, Debug)]
pub enum DataError {
    #[error("Failed to read {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {path}")]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Invalid curve for {what}: {source}")]
    Curve {
        what: String,
        #[source]
        source: CoreError,
    },

    #[error("Invalid value: {what} ({reason})")]
    InvalidValue { what: String, reason: String },

    #[error(
        "Cv table for valve '{valve}' is not rectangular: \
         row for diameter {diameter} has {found} values, expected {expected}"
    )]
    NonRectangular {
        valve: String,
        diameter: f64,
        found: usize,
        expected: usize,
    },

    #[error("Cv values for valve '{valve}' at diameter {diameter} are not strictly increasing")]
    NonIncreasingCv { valve: String, diameter: f64 },

    #[error("FL curve for valve '{valve}' disagrees with the Cv opening breakpoints")]
    BreakpointMismatch { valve: String },
}
