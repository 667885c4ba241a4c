//! Station directory error types.

use std::path::PathBuf;

/// Errors that can occur when loading the station directory.
#[derive(Debug, thiserror::Error)]
pub enum StationError {
    /// Station file could not be read
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Station file is not a list of stations
    #[error("JSON parse error: {message}")]
    Json { message: String },

    /// An entry's value is not a usable coordinate
    #[error("station {label:?} has invalid coordinate {value:?}")]
    InvalidCoordinate { label: String, value: String },
}
