//! Station directory.
//!
//! Maps station labels to coordinates, loaded once at startup from a
//! static JSON list, and resolves user-supplied endpoints.

mod directory;
mod error;

pub use directory::{Station, StationDirectory, StationDto};
pub use error::StationError;
