//! Geographic coordinate and stop types.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::DomainError;

/// A WGS84 latitude/longitude pair in decimal degrees.
///
/// Construction does not range-check: decoded geometry is taken as-is.
/// Use [`Coordinate::validate`] where user input must be a real place.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Check that both components are finite and within range.
    pub fn validate(&self) -> Result<(), DomainError> {
        if !self.lat.is_finite() || !(-90.0..=90.0).contains(&self.lat) {
            return Err(DomainError::InvalidCoordinate(format!(
                "latitude {} out of range",
                self.lat
            )));
        }
        if !self.lon.is_finite() || !(-180.0..=180.0).contains(&self.lon) {
            return Err(DomainError::InvalidCoordinate(format!(
                "longitude {} out of range",
                self.lon
            )));
        }
        Ok(())
    }
}

/// Formats as `lat,lon`, the form the trip planner accepts for places.
impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.lat, self.lon)
    }
}

/// Parses `"lat,lon"`, tolerating whitespace around either number.
///
/// # Examples
///
/// ```
/// use journey_server::domain::Coordinate;
///
/// let cst: Coordinate = "18.9398, 72.8355".parse().unwrap();
/// assert_eq!(cst.lat, 18.9398);
/// assert_eq!(cst.lon, 72.8355);
///
/// assert!("18.9398".parse::<Coordinate>().is_err());
/// assert!("north,east".parse::<Coordinate>().is_err());
/// ```
impl FromStr for Coordinate {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (lat, lon) = s
            .split_once(',')
            .ok_or_else(|| DomainError::InvalidCoordinate(format!("expected \"lat,lon\": {s}")))?;

        let lat: f64 = lat
            .trim()
            .parse()
            .map_err(|_| DomainError::InvalidCoordinate(format!("bad latitude in {s}")))?;
        let lon: f64 = lon
            .trim()
            .parse()
            .map_err(|_| DomainError::InvalidCoordinate(format!("bad longitude in {s}")))?;

        let coordinate = Coordinate::new(lat, lon);
        coordinate.validate()?;
        Ok(coordinate)
    }
}

/// A named place at either end of a leg.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stop {
    pub name: String,
    pub lat: f64,
    pub lon: f64,
}

impl Stop {
    pub fn new(name: impl Into<String>, lat: f64, lon: f64) -> Self {
        Self {
            name: name.into(),
            lat,
            lon,
        }
    }

    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.lat, self.lon)
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Display then parse returns the same coordinate
        #[test]
        fn display_parse_roundtrip(lat in -90.0f64..=90.0, lon in -180.0f64..=180.0) {
            let c = Coordinate::new(lat, lon);
            let parsed: Coordinate = c.to_string().parse().unwrap();
            prop_assert_eq!(parsed, c);
        }
    }
}
