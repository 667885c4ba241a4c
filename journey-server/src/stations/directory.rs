//! Station list loading and endpoint resolution.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::domain::Coordinate;

use super::error::StationError;

/// One station as stored in the station file.
///
/// `value` is a `"lat,lon"` string; the same shape the station picker in
/// the browser consumes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationDto {
    pub value: String,
    pub label: String,
}

/// A station with its parsed coordinate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Station {
    pub label: String,
    pub coordinate: Coordinate,
}

/// Read-only station lookup.
///
/// Labels match case-insensitively. When two entries share a label the
/// first one wins.
#[derive(Debug, Clone, Default)]
pub struct StationDirectory {
    stations: Vec<Station>,
    by_label: HashMap<String, usize>,
}

impl StationDirectory {
    /// Load the directory from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, StationError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| StationError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Build the directory from a JSON array of `{value, label}` entries.
    pub fn from_json(json: &str) -> Result<Self, StationError> {
        let dtos: Vec<StationDto> = serde_json::from_str(json).map_err(|e| StationError::Json {
            message: e.to_string(),
        })?;
        Self::from_dtos(dtos)
    }

    /// Build the directory from parsed entries.
    ///
    /// Every entry must carry a valid coordinate; one bad entry fails the
    /// whole load.
    pub fn from_dtos(dtos: Vec<StationDto>) -> Result<Self, StationError> {
        let mut stations = Vec::with_capacity(dtos.len());
        let mut by_label = HashMap::with_capacity(dtos.len());

        for dto in dtos {
            let coordinate = dto
                .value
                .parse::<Coordinate>()
                .ok()
                .filter(|c| c.validate().is_ok())
                .ok_or_else(|| StationError::InvalidCoordinate {
                    label: dto.label.clone(),
                    value: dto.value.clone(),
                })?;

            by_label
                .entry(normalize_label(&dto.label))
                .or_insert(stations.len());
            stations.push(Station {
                label: dto.label,
                coordinate,
            });
        }

        Ok(Self { stations, by_label })
    }

    /// All stations in file order.
    pub fn entries(&self) -> &[Station] {
        &self.stations
    }

    /// Look up a station by label.
    pub fn get(&self, label: &str) -> Option<&Station> {
        self.by_label
            .get(&normalize_label(label))
            .map(|&idx| &self.stations[idx])
    }

    /// Resolve an endpoint typed or picked by the rider.
    ///
    /// Accepts either a literal `"lat,lon"` in range or an exact station
    /// label. Anything else is unresolved.
    ///
    /// # Examples
    ///
    /// ```
    /// use journey_server::stations::StationDirectory;
    ///
    /// let dir = StationDirectory::from_json(
    ///     r#"[{ "value": "19.0178,72.8478", "label": "Dadar" }]"#,
    /// )
    /// .unwrap();
    ///
    /// assert_eq!(dir.resolve("dadar").unwrap().lat, 19.0178);
    /// assert_eq!(dir.resolve("19.1,72.9").unwrap().lon, 72.9);
    /// assert!(dir.resolve("Dad").is_none());
    /// ```
    pub fn resolve(&self, input: &str) -> Option<Coordinate> {
        let input = input.trim();
        if input.is_empty() {
            return None;
        }

        if let Ok(coordinate) = input.parse::<Coordinate>() {
            return coordinate.validate().ok().map(|()| coordinate);
        }

        self.get(input).map(|s| s.coordinate)
    }

    pub fn len(&self) -> usize {
        self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }
}

fn normalize_label(label: &str) -> String {
    label.trim().to_lowercase()
}
