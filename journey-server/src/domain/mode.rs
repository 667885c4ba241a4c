//! Travel mode types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Error returned when a backend leg mode has no counterpart in [`TransitMode`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown travel mode: {0}")]
pub struct UnknownMode(pub String);

/// The mode of one leg.
///
/// `Auto` and `Cab` never come from the trip planner directly; they appear
/// when the last leg is rewritten for a motorised last mile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransitMode {
    Rail,
    Bus,
    Walk,
    Auto,
    Cab,
}

impl TransitMode {
    /// Returns the mode as it is written in trip-planner requests.
    pub fn as_str(&self) -> &'static str {
        match self {
            TransitMode::Rail => "RAIL",
            TransitMode::Bus => "BUS",
            TransitMode::Walk => "WALK",
            TransitMode::Auto => "AUTO",
            TransitMode::Cab => "CAB",
        }
    }

    /// Scheduled transit the rider can choose to search over.
    pub fn is_transit(&self) -> bool {
        matches!(self, TransitMode::Rail | TransitMode::Bus)
    }

    /// Modes that only exist as a last-mile rewrite and are never
    /// sent to the trip planner.
    pub fn is_last_mile(&self) -> bool {
        matches!(self, TransitMode::Auto | TransitMode::Cab)
    }

    /// Map a mode string reported by the trip planner.
    ///
    /// Metro, monorail and tram are folded into `Rail`; a private car leg
    /// is treated as a cab.
    ///
    /// # Examples
    ///
    /// ```
    /// use journey_server::domain::TransitMode;
    ///
    /// assert_eq!(TransitMode::from_backend("SUBWAY").unwrap(), TransitMode::Rail);
    /// assert_eq!(TransitMode::from_backend("bus").unwrap(), TransitMode::Bus);
    /// assert!(TransitMode::from_backend("GONDOLA").is_err());
    /// ```
    pub fn from_backend(s: &str) -> Result<Self, UnknownMode> {
        match s.to_ascii_uppercase().as_str() {
            "RAIL" | "SUBWAY" | "TRAM" | "MONORAIL" => Ok(TransitMode::Rail),
            "BUS" | "COACH" => Ok(TransitMode::Bus),
            "WALK" => Ok(TransitMode::Walk),
            "AUTO" => Ok(TransitMode::Auto),
            "CAB" | "CAR" => Ok(TransitMode::Cab),
            _ => Err(UnknownMode(s.to_string())),
        }
    }
}

impl fmt::Display for TransitMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the rider covers the final segment of a trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LastMile {
    #[default]
    Walk,
    Auto,
    Cab,
}

impl LastMile {
    /// The leg mode the final leg takes under this preference.
    pub fn mode(&self) -> TransitMode {
        match self {
            LastMile::Walk => TransitMode::Walk,
            LastMile::Auto => TransitMode::Auto,
            LastMile::Cab => TransitMode::Cab,
        }
    }
}
