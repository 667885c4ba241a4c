//! Trip-planner response DTOs.
//!
//! These types map directly to the planner's JSON `plan` response.
//! They use `Option` liberally because the planner omits fields rather
//! than sending null values in many cases.

use std::collections::HashMap;

use serde::Deserialize;

/// Top-level response from `GET /routers/{id}/plan`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlanResponse {
    /// The plan, absent when no path was found.
    pub plan: Option<Plan>,

    /// Planner-reported problem (e.g. no path, outside bounds).
    pub error: Option<PlannerMessage>,
}

impl PlanResponse {
    /// Raw itineraries in planner order; empty when there is no plan.
    pub fn raw_itineraries(&self) -> &[serde_json::Value] {
        self.plan
            .as_ref()
            .and_then(|p| p.itineraries.as_deref())
            .unwrap_or(&[])
    }
}

/// The plan body.
///
/// Itineraries are kept as raw JSON so each one is decoded on its own.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Plan {
    pub itineraries: Option<Vec<serde_json::Value>>,
}

/// Error object the planner sends alongside (or instead of) a plan.
#[derive(Debug, Clone, Deserialize)]
pub struct PlannerMessage {
    /// Numeric error id.
    pub id: Option<i64>,

    /// Machine-readable code, e.g. `PATH_NOT_FOUND`.
    pub message: Option<String>,

    /// Human-readable explanation.
    pub msg: Option<String>,
}

impl PlannerMessage {
    /// Best available description for logs.
    pub fn describe(&self) -> &str {
        self.msg
            .as_deref()
            .or(self.message.as_deref())
            .unwrap_or("unspecified planner error")
    }
}

/// One candidate itinerary.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OtpItinerary {
    /// Total duration in seconds.
    pub duration: f64,

    /// Number of vehicle changes.
    #[serde(default)]
    pub transfers: u32,

    /// Ordered legs. Absent legs make the itinerary unusable.
    pub legs: Option<Vec<OtpLeg>>,

    /// Fare breakdown, when the planner has fare data.
    pub fare: Option<ItineraryFare>,

    /// Departure, epoch milliseconds.
    pub start_time: Option<i64>,

    /// Arrival, epoch milliseconds.
    pub end_time: Option<i64>,
}

impl OtpItinerary {
    /// Fare in whole currency units for `currency`, if the planner sent a
    /// usable one.
    ///
    /// Missing, non-numeric, zero, negative and non-finite amounts all
    /// count as "no fare supplied".
    pub fn fare_in(&self, currency: &str) -> Option<f64> {
        self.fare
            .as_ref()?
            .fare
            .get(currency)?
            .amount()
            .filter(|amount| amount.is_finite() && *amount > 0.0)
    }
}

/// One leg of an itinerary.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OtpLeg {
    /// Planner mode name, e.g. `WALK`, `RAIL`, `SUBWAY`, `BUS`.
    pub mode: String,

    pub from: Place,

    pub to: Place,

    /// Duration in seconds; null or absent counts as zero.
    pub duration: Option<f64>,

    /// Distance in meters.
    pub distance: Option<f64>,

    /// Encoded path of the leg.
    pub leg_geometry: Option<EncodedPolyline>,

    /// Route name (empty for walking legs).
    pub route: Option<String>,

    pub route_short_name: Option<String>,
}

impl OtpLeg {
    /// Display label for the line or service, if there is one.
    pub fn route_label(&self) -> Option<&str> {
        self.route
            .as_deref()
            .filter(|r| !r.is_empty())
            .or(self.route_short_name.as_deref().filter(|r| !r.is_empty()))
    }

    pub fn duration_seconds(&self) -> f64 {
        self.duration.filter(|d| d.is_finite()).unwrap_or(0.0)
    }

    /// Encoded geometry, if the planner sent a usable one.
    pub fn geometry(&self) -> Option<&str> {
        self.leg_geometry.as_ref()?.points.as_deref()
    }
}

/// A leg endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct Place {
    pub name: Option<String>,
    pub lat: f64,
    pub lon: f64,
}

/// An encoded polyline with its point count.
#[derive(Debug, Clone, Deserialize)]
pub struct EncodedPolyline {
    pub points: Option<String>,
    pub length: Option<u32>,
}

/// Fare breakdown keyed by currency code (e.g. `INR`).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ItineraryFare {
    #[serde(default)]
    pub fare: HashMap<String, FareAmount>,
}

/// A fare amount in minor units.
///
/// `cents` is kept as raw JSON because planners have been seen to send it
/// as a string or null.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FareAmount {
    pub cents: Option<serde_json::Value>,
}

impl FareAmount {
    /// Amount in whole currency units, if `cents` is a JSON number.
    pub fn amount(&self) -> Option<f64> {
        self.cents.as_ref()?.as_f64().map(|cents| cents / 100.0)
    }
}
