//! OpenTripPlanner client.
//!
//! This module provides an HTTP client for an OpenTripPlanner-compatible
//! `plan` endpoint, which returns candidate itineraries between two places.
//!
//! Key characteristics of the planner:
//! - Places are sent as `lat,lon` strings
//! - A success status does not guarantee a plan: "no path found" arrives
//!   as a 200 with an `error` object and no `plan`
//! - Itineraries are decoded one at a time, so a single malformed entry
//!   can be dropped without losing the rest of the response

mod client;
mod error;
mod mock;
mod types;

pub use client::{OtpClient, OtpConfig, PlanRequest};
pub use error::OtpError;
pub use mock::MockOtpClient;
pub use types::{
    EncodedPolyline, FareAmount, ItineraryFare, OtpItinerary, OtpLeg, Place, Plan, PlanResponse,
    PlannerMessage,
};
