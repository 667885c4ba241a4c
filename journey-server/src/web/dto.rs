//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::domain::{Coordinate, LastMile, Leg, Route, Stop, TransitMode};
use crate::stations::Station;

/// Shown to the rider when a query succeeds with nothing to offer.
pub const NO_ROUTES_MESSAGE: &str = "No routes found";

/// Request to plan routes between two endpoints.
///
/// `from` and `to` are station labels or literal `"lat,lon"` strings.
#[derive(Debug, Deserialize)]
pub struct PlanRouteRequest {
    pub from: String,

    pub to: String,

    /// Enabled transit modes (defaults to rail and bus)
    #[serde(default = "default_modes")]
    pub modes: Vec<TransitMode>,

    #[serde(default)]
    pub max_transfers: u32,

    #[serde(default)]
    pub last_mile: LastMile,
}

fn default_modes() -> Vec<TransitMode> {
    vec![TransitMode::Rail, TransitMode::Bus]
}

/// Planned routes for one query.
#[derive(Debug, Serialize)]
pub struct PlanRouteResponse {
    pub routes: Vec<RouteResult>,

    /// Set when there are no routes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl PlanRouteResponse {
    pub fn from_routes(routes: &[Route]) -> Self {
        Self {
            routes: routes.iter().map(RouteResult::from_route).collect(),
            message: routes.is_empty().then(|| NO_ROUTES_MESSAGE.to_string()),
        }
    }
}

/// A route in plan results.
#[derive(Debug, Serialize)]
pub struct RouteResult {
    pub id: usize,
    pub duration_minutes: u32,
    pub transfers: u32,
    pub cost_rupees: u32,

    /// Superlative tags, e.g. `["fastest", "cheapest"]`
    pub tags: Vec<&'static str>,

    /// Origin name
    pub origin: String,

    /// Destination name
    pub destination: String,

    /// Mode sequence, e.g. `"WALK → RAIL → AUTO"`
    pub summary: String,

    /// RFC 3339 departure, when the planner gave one
    pub departure: Option<String>,

    pub arrival: Option<String>,

    pub legs: Vec<LegResult>,
}

impl RouteResult {
    pub fn from_route(route: &Route) -> Self {
        Self {
            id: route.id().0,
            duration_minutes: route.duration_minutes(),
            transfers: route.transfers(),
            cost_rupees: route.cost_rupees(),
            tags: route.tags().iter().map(|t| t.as_str()).collect(),
            origin: route.origin().name.clone(),
            destination: route.destination().name.clone(),
            summary: route.mode_summary(),
            departure: route.departure().map(|t| t.to_rfc3339()),
            arrival: route.arrival().map(|t| t.to_rfc3339()),
            legs: route.legs().iter().map(LegResult::from_leg).collect(),
        }
    }
}

/// A leg in plan results.
#[derive(Debug, Serialize)]
pub struct LegResult {
    pub mode: TransitMode,
    pub from: StopResult,
    pub to: StopResult,

    /// Rounded to whole minutes for display
    pub duration_minutes: u32,

    pub distance_meters: Option<f64>,
    pub route_label: Option<String>,

    /// Encoded polyline; decode via `/api/polyline`
    pub geometry: Option<String>,
}

impl LegResult {
    pub fn from_leg(leg: &Leg) -> Self {
        Self {
            mode: leg.mode(),
            from: StopResult::from_stop(leg.from()),
            to: StopResult::from_stop(leg.to()),
            duration_minutes: leg.display_minutes(),
            distance_meters: leg.distance_meters(),
            route_label: leg.route_label().map(str::to_string),
            geometry: leg.geometry().map(str::to_string),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct StopResult {
    pub name: String,
    pub lat: f64,
    pub lon: f64,
}

impl StopResult {
    fn from_stop(stop: &Stop) -> Self {
        Self {
            name: stop.name.clone(),
            lat: stop.lat,
            lon: stop.lon,
        }
    }
}

/// Station list for the endpoint picker.
#[derive(Debug, Serialize)]
pub struct StationsResponse {
    pub stations: Vec<StationResult>,
}

/// A station entry, with `value` in the `"lat,lon"` form the planner takes.
#[derive(Debug, Serialize)]
pub struct StationResult {
    pub label: String,
    pub value: String,
}

impl StationResult {
    pub fn from_station(station: &Station) -> Self {
        Self {
            label: station.label.clone(),
            value: station.coordinate.to_string(),
        }
    }
}

/// Request to decode a leg's geometry.
#[derive(Debug, Deserialize)]
pub struct PolylineRequest {
    pub points: String,
}

/// Decoded geometry as `[lat, lon]` pairs.
#[derive(Debug, Serialize)]
pub struct PolylineResponse {
    pub points: Vec<[f64; 2]>,
}

impl PolylineResponse {
    pub fn from_coordinates(points: &[Coordinate]) -> Self {
        Self {
            points: points.iter().map(|c| [c.lat, c.lon]).collect(),
        }
    }
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}
