//! Leg type.
//!
//! A `Leg` is one mode-homogeneous segment of a route: a train ride,
//! a bus ride, a walk, or a motorised last mile.

use serde::Serialize;

use super::{Coordinate, Stop, TransitMode};
use crate::polyline::{self, MalformedPolyline};

/// A leg of a route.
///
/// # Invariants
///
/// - `duration_seconds` and `distance_meters` are finite and non-negative
/// - mode and duration only change through the last-mile rewrite, which
///   applies to the final leg of a route
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Leg {
    mode: TransitMode,
    from: Stop,
    to: Stop,
    duration_seconds: f64,
    distance_meters: Option<f64>,
    geometry: Option<String>,
    route_label: Option<String>,
}

impl Leg {
    /// Construct a leg. Negative or non-finite durations are stored as zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use journey_server::domain::{Leg, Stop, TransitMode};
    ///
    /// let leg = Leg::new(
    ///     TransitMode::Rail,
    ///     Stop::new("Dadar", 19.0178, 72.8478),
    ///     Stop::new("Thane", 19.1860, 72.9756),
    ///     1500.0,
    /// )
    /// .with_distance(24_500.0)
    /// .with_route_label("Central Line");
    ///
    /// assert_eq!(leg.display_minutes(), 25);
    /// assert_eq!(leg.route_label(), Some("Central Line"));
    /// ```
    pub fn new(mode: TransitMode, from: Stop, to: Stop, duration_seconds: f64) -> Self {
        Self {
            mode,
            from,
            to,
            duration_seconds: non_negative(duration_seconds),
            distance_meters: None,
            geometry: None,
            route_label: None,
        }
    }

    /// Set the distance travelled on this leg.
    pub fn with_distance(mut self, meters: f64) -> Self {
        self.distance_meters = Some(non_negative(meters));
        self
    }

    /// Set the encoded polyline for this leg.
    pub fn with_geometry(mut self, encoded: impl Into<String>) -> Self {
        self.geometry = Some(encoded.into());
        self
    }

    /// Set the line or service name.
    pub fn with_route_label(mut self, label: impl Into<String>) -> Self {
        self.route_label = Some(label.into());
        self
    }

    pub fn mode(&self) -> TransitMode {
        self.mode
    }

    pub fn from(&self) -> &Stop {
        &self.from
    }

    pub fn to(&self) -> &Stop {
        &self.to
    }

    pub fn duration_seconds(&self) -> f64 {
        self.duration_seconds
    }

    pub fn distance_meters(&self) -> Option<f64> {
        self.distance_meters
    }

    /// Returns the encoded polyline, if the planner supplied one.
    pub fn geometry(&self) -> Option<&str> {
        self.geometry.as_deref()
    }

    pub fn route_label(&self) -> Option<&str> {
        self.route_label.as_deref()
    }

    /// Leg duration rounded to whole minutes, as shown to riders.
    pub fn display_minutes(&self) -> u32 {
        (self.duration_seconds / 60.0).round() as u32
    }

    /// Decode this leg's geometry.
    ///
    /// Geometry is only decoded when something needs to draw it, so a bad
    /// polyline never affects normalization. A leg without geometry
    /// decodes to an empty path.
    pub fn decode_geometry(&self) -> Result<Vec<Coordinate>, MalformedPolyline> {
        match &self.geometry {
            Some(encoded) => polyline::decode(encoded),
            None => Ok(Vec::new()),
        }
    }

    /// Rewrite this leg for a motorised last mile.
    pub(crate) fn substitute_mode(&mut self, mode: TransitMode, duration_factor: f64) {
        self.mode = mode;
        self.duration_seconds *= duration_factor;
    }
}

fn non_negative(value: f64) -> f64 {
    if value.is_finite() { value.max(0.0) } else { 0.0 }
}
