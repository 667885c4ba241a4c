//! Itinerary normalization.
//!
//! Converts one raw trip-planner itinerary into a priced, untagged
//! [`Route`]. Each itinerary is handled on its own so one bad record never
//! spoils the rest of a plan.

use chrono::DateTime;
use serde::Deserialize;

use crate::domain::{LastMile, Leg, Route, RouteId, Stop, TransitMode, UnknownMode};
use crate::fare::{adjust_last_mile, estimate_fare};
use crate::otp::{OtpItinerary, OtpLeg, Place};

use super::config::PlannerConfig;

/// Error for an itinerary that cannot become a route.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InvalidItinerary {
    /// Legs absent or empty
    #[error("itinerary has no legs")]
    MissingLegs,

    /// A leg uses a mode the journey model cannot represent
    #[error(transparent)]
    UnknownMode(#[from] UnknownMode),

    /// The record does not have the itinerary shape at all
    #[error("malformed itinerary: {0}")]
    Malformed(String),
}

/// Decode one raw itinerary from the planner's JSON.
pub fn decode_itinerary(raw: &serde_json::Value) -> Result<OtpItinerary, InvalidItinerary> {
    OtpItinerary::deserialize(raw).map_err(|e| InvalidItinerary::Malformed(e.to_string()))
}

/// Normalize one itinerary into a route with the given batch-scoped id.
///
/// The base fare is the planner's fare in `config.currency` when one is
/// usable, otherwise the distance estimate over all legs. The last-mile
/// preference is then applied once. `duration_minutes` comes from the
/// planner's total and is not recomputed after the last-mile rewrite.
///
/// # Errors
///
/// Returns `Err` if the itinerary has no legs or a leg mode is unknown.
pub fn normalize_itinerary(
    itinerary: &OtpItinerary,
    id: RouteId,
    last_mile: LastMile,
    config: &PlannerConfig,
) -> Result<Route, InvalidItinerary> {
    let raw_legs = itinerary
        .legs
        .as_deref()
        .filter(|legs| !legs.is_empty())
        .ok_or(InvalidItinerary::MissingLegs)?;

    let legs = raw_legs
        .iter()
        .map(convert_leg)
        .collect::<Result<Vec<_>, _>>()?;

    let base_fare = itinerary
        .fare_in(&config.currency)
        .unwrap_or_else(|| f64::from(estimate_fare(total_distance(raw_legs))));

    let outcome = adjust_last_mile(legs, last_mile, base_fare);

    let route = Route::new(
        id,
        outcome.legs,
        whole_minutes(itinerary.duration),
        itinerary.transfers,
        outcome.cost_rupees,
    )
    .map_err(|_| InvalidItinerary::MissingLegs)?;

    Ok(route.with_times(
        itinerary.start_time.and_then(DateTime::from_timestamp_millis),
        itinerary.end_time.and_then(DateTime::from_timestamp_millis),
    ))
}

fn convert_leg(raw: &OtpLeg) -> Result<Leg, UnknownMode> {
    let mode = TransitMode::from_backend(&raw.mode)?;
    let mut leg = Leg::new(mode, stop(&raw.from), stop(&raw.to), raw.duration_seconds());

    if let Some(distance) = raw.distance {
        leg = leg.with_distance(distance);
    }
    if let Some(geometry) = raw.geometry() {
        leg = leg.with_geometry(geometry);
    }
    if let Some(label) = raw.route_label() {
        leg = leg.with_route_label(label);
    }

    Ok(leg)
}

fn stop(place: &Place) -> Stop {
    Stop::new(place.name.clone().unwrap_or_default(), place.lat, place.lon)
}

/// Sum of leg distances; legs without a distance count as zero.
fn total_distance(legs: &[OtpLeg]) -> f64 {
    legs.iter()
        .filter_map(|leg| leg.distance)
        .filter(|d| d.is_finite())
        .sum()
}

fn whole_minutes(seconds: f64) -> u32 {
    if seconds.is_finite() {
        (seconds / 60.0).round().max(0.0) as u32
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw_leg(mode: &str, from: &str, to: &str, secs: f64, meters: f64) -> serde_json::Value {
        json!({
            "mode": mode,
            "from": { "name": from, "lat": 19.0, "lon": 72.8 },
            "to": { "name": to, "lat": 19.1, "lon": 72.9 },
            "duration": secs,
            "distance": meters,
            "legGeometry": { "points": "_p~iF~ps|U", "length": 1 }
        })
    }

    fn itinerary(value: serde_json::Value) -> OtpItinerary {
        decode_itinerary(&value).unwrap()
    }

    fn three_legs() -> serde_json::Value {
        json!([
            raw_leg("WALK", "Home", "Dadar", 300.0, 400.0),
            raw_leg("RAIL", "Dadar", "Thane", 1800.0, 24_000.0),
            raw_leg("WALK", "Thane", "Office", 900.0, 1_000.0),
        ])
    }

    #[test]
    fn backend_fare_preferred() {
        let it = itinerary(json!({
            "duration": 3000,
            "transfers": 0,
            "legs": three_legs(),
            "fare": { "fare": { "INR": { "cents": 1500 } } }
        }));

        let route = normalize_itinerary(&it, RouteId(0), LastMile::Walk, &PlannerConfig::default())
            .unwrap();
        assert_eq!(route.cost_rupees(), 15);
        assert_eq!(route.duration_minutes(), 50);
        assert_eq!(route.legs().len(), 3);
        assert!(route.tags().is_empty());
    }

    #[test]
    fn missing_fare_uses_distance_estimate() {
        // 25.4 km falls in the 35 km band
        let it = itinerary(json!({ "duration": 3000, "legs": three_legs() }));
        let route = normalize_itinerary(&it, RouteId(0), LastMile::Walk, &PlannerConfig::default())
            .unwrap();
        assert_eq!(route.cost_rupees(), 20);
    }

    #[test]
    fn zero_fare_uses_distance_estimate() {
        let it = itinerary(json!({
            "duration": 3000,
            "legs": three_legs(),
            "fare": { "fare": { "INR": { "cents": 0 } } }
        }));
        let route = normalize_itinerary(&it, RouteId(0), LastMile::Walk, &PlannerConfig::default())
            .unwrap();
        assert_eq!(route.cost_rupees(), 20);
    }

    #[test]
    fn other_currency_ignored() {
        let it = itinerary(json!({
            "duration": 3000,
            "legs": three_legs(),
            "fare": { "fare": { "USD": { "cents": 500 } } }
        }));
        let route = normalize_itinerary(&it, RouteId(0), LastMile::Walk, &PlannerConfig::default())
            .unwrap();
        assert_eq!(route.cost_rupees(), 20);

        let usd = PlannerConfig::new("USD");
        let route = normalize_itinerary(&it, RouteId(0), LastMile::Walk, &usd).unwrap();
        assert_eq!(route.cost_rupees(), 5);
    }

    #[test]
    fn cab_last_mile_applied_once() {
        let it = itinerary(json!({
            "duration": 3000,
            "transfers": 1,
            "legs": three_legs(),
            "fare": { "fare": { "INR": { "cents": 3000 } } }
        }));

        let route =
            normalize_itinerary(&it, RouteId(4), LastMile::Cab, &PlannerConfig::default()).unwrap();

        assert_eq!(route.id(), RouteId(4));
        assert_eq!(route.cost_rupees(), 145);
        assert_eq!(route.transfers(), 1);

        let last = route.legs().last().unwrap();
        assert_eq!(last.mode(), TransitMode::Cab);
        assert_eq!(last.duration_seconds(), 450.0);

        // Total is the planner's, not re-derived from the shortened leg
        assert_eq!(route.duration_minutes(), 50);
    }

    #[test]
    fn duration_rounds_to_nearest_minute() {
        let it = itinerary(json!({ "duration": 89, "legs": three_legs() }));
        let route = normalize_itinerary(&it, RouteId(0), LastMile::Walk, &PlannerConfig::default())
            .unwrap();
        assert_eq!(route.duration_minutes(), 1);

        let it = itinerary(json!({ "duration": 90, "legs": three_legs() }));
        let route = normalize_itinerary(&it, RouteId(0), LastMile::Walk, &PlannerConfig::default())
            .unwrap();
        assert_eq!(route.duration_minutes(), 2);
    }

    #[test]
    fn leg_details_carried_over() {
        let mut legs = three_legs();
        legs[1]["routeShortName"] = json!("Central");
        let it = itinerary(json!({
            "duration": 3000,
            "startTime": 1_760_331_600_000i64,
            "endTime": 1_760_334_600_000i64,
            "legs": legs
        }));

        let route = normalize_itinerary(&it, RouteId(0), LastMile::Walk, &PlannerConfig::default())
            .unwrap();
        let rail = &route.legs()[1];

        assert_eq!(rail.mode(), TransitMode::Rail);
        assert_eq!(rail.from().name, "Dadar");
        assert_eq!(rail.to().name, "Thane");
        assert_eq!(rail.distance_meters(), Some(24_000.0));
        assert_eq!(rail.geometry(), Some("_p~iF~ps|U"));
        assert_eq!(rail.route_label(), Some("Central"));

        assert_eq!(route.departure().unwrap().timestamp(), 1_760_331_600);
        assert_eq!(route.arrival().unwrap().timestamp(), 1_760_334_600);
    }

    #[test]
    fn geometry_without_points_keeps_itinerary() {
        let mut legs = three_legs();
        legs[1]["legGeometry"] = json!({ "length": 0 });
        let it = itinerary(json!({ "duration": 3000, "legs": legs }));

        let route = normalize_itinerary(&it, RouteId(2), LastMile::Walk, &PlannerConfig::default())
            .unwrap();
        assert_eq!(route.legs().len(), 3);
        assert_eq!(route.legs()[1].geometry(), None);
        assert_eq!(route.legs()[0].geometry(), Some("_p~iF~ps|U"));
    }

    #[test]
    fn null_leg_duration_counts_as_zero() {
        let mut legs = three_legs();
        legs[0]["duration"] = json!(null);
        let it = itinerary(json!({ "duration": 3000, "legs": legs }));

        let route = normalize_itinerary(&it, RouteId(0), LastMile::Walk, &PlannerConfig::default())
            .unwrap();
        assert_eq!(route.legs()[0].duration_seconds(), 0.0);
        assert_eq!(route.legs()[1].duration_seconds(), 1800.0);
        assert_eq!(route.duration_minutes(), 50);
    }

    #[test]
    fn unnamed_place_gets_empty_name() {
        let it = itinerary(json!({
            "duration": 60,
            "legs": [{
                "mode": "WALK",
                "from": { "lat": 19.0, "lon": 72.8 },
                "to": { "lat": 19.1, "lon": 72.9 }
            }]
        }));
        let route = normalize_itinerary(&it, RouteId(0), LastMile::Walk, &PlannerConfig::default())
            .unwrap();
        assert_eq!(route.origin().name, "");
        // No distance at all still prices in the lowest band
        assert_eq!(route.cost_rupees(), 10);
    }

    #[test]
    fn missing_legs_rejected() {
        let config = PlannerConfig::default();

        let it = itinerary(json!({ "duration": 600 }));
        assert_eq!(
            normalize_itinerary(&it, RouteId(0), LastMile::Walk, &config).unwrap_err(),
            InvalidItinerary::MissingLegs
        );

        let it = itinerary(json!({ "duration": 600, "legs": [] }));
        assert_eq!(
            normalize_itinerary(&it, RouteId(0), LastMile::Cab, &config).unwrap_err(),
            InvalidItinerary::MissingLegs
        );
    }

    #[test]
    fn unknown_mode_rejected() {
        let it = itinerary(json!({
            "duration": 600,
            "legs": [raw_leg("GONDOLA", "A", "B", 600.0, 100.0)]
        }));
        let err = normalize_itinerary(&it, RouteId(0), LastMile::Walk, &PlannerConfig::default())
            .unwrap_err();
        assert_eq!(err, InvalidItinerary::UnknownMode(UnknownMode("GONDOLA".into())));
        assert_eq!(err.to_string(), "unknown travel mode: GONDOLA");
    }

    #[test]
    fn malformed_record_rejected() {
        assert!(matches!(
            decode_itinerary(&json!("not an itinerary")),
            Err(InvalidItinerary::Malformed(_))
        ));
        assert!(matches!(
            decode_itinerary(&json!({ "legs": [] })),
            Err(InvalidItinerary::Malformed(_))
        ));
    }
}
