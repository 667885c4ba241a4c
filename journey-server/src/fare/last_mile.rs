//! Last-mile substitution.
//!
//! A rider may take an auto-rickshaw or a cab for the final segment
//! instead of walking. The final leg's mode and duration are rewritten and
//! the route is re-priced as `base fare × multiplier + surcharge`.

use crate::domain::{LastMile, Leg};

/// Pricing and speed-up for a motorised last mile.
#[derive(Debug, Clone, Copy, PartialEq)]
struct LastMileTerms {
    /// Factor applied to the final leg's duration.
    duration_factor: f64,
    /// Factor applied to the base fare.
    fare_multiplier: f64,
    /// Flat amount added after the multiplier (rupees).
    surcharge: f64,
}

/// Terms per preference. Walking has none: the route is left as planned.
fn terms(last_mile: LastMile) -> Option<LastMileTerms> {
    match last_mile {
        LastMile::Walk => None,
        LastMile::Auto => Some(LastMileTerms {
            duration_factor: 0.7,
            fare_multiplier: 1.2,
            surcharge: 40.0,
        }),
        LastMile::Cab => Some(LastMileTerms {
            duration_factor: 0.5,
            fare_multiplier: 1.5,
            surcharge: 100.0,
        }),
    }
}

/// Legs and total cost after the last-mile rewrite.
#[derive(Debug, Clone, PartialEq)]
pub struct LastMileOutcome {
    pub legs: Vec<Leg>,
    pub cost_rupees: u32,
}

/// Apply a last-mile preference to a planned sequence of legs.
///
/// With `Walk`, or with no legs, the legs are returned untouched and the
/// cost is the rounded base fare. Otherwise only the final leg changes.
///
/// A route is adjusted exactly once, during normalization; adjusting an
/// already adjusted route would scale the final leg twice.
///
/// # Examples
///
/// ```
/// use journey_server::domain::{LastMile, Leg, Stop, TransitMode};
/// use journey_server::fare::adjust_last_mile;
///
/// let legs = vec![Leg::new(
///     TransitMode::Walk,
///     Stop::new("Thane", 19.186, 72.9756),
///     Stop::new("Office", 19.2, 72.98),
///     600.0,
/// )];
///
/// let outcome = adjust_last_mile(legs, LastMile::Cab, 30.0);
/// assert_eq!(outcome.cost_rupees, 145);
/// assert_eq!(outcome.legs[0].mode(), TransitMode::Cab);
/// assert_eq!(outcome.legs[0].duration_seconds(), 300.0);
/// ```
pub fn adjust_last_mile(mut legs: Vec<Leg>, last_mile: LastMile, base_fare: f64) -> LastMileOutcome {
    let terms = match terms(last_mile) {
        Some(terms) if !legs.is_empty() => terms,
        _ => {
            return LastMileOutcome {
                legs,
                cost_rupees: round_rupees(base_fare),
            };
        }
    };

    if let Some(last) = legs.last_mut() {
        last.substitute_mode(last_mile.mode(), terms.duration_factor);
    }

    LastMileOutcome {
        legs,
        cost_rupees: round_rupees(base_fare * terms.fare_multiplier + terms.surcharge),
    }
}

/// Round a rupee amount to a whole, non-negative number of rupees.
///
/// Halves round up, matching how fares are quoted to riders.
pub fn round_rupees(amount: f64) -> u32 {
    if amount.is_finite() {
        amount.round().max(0.0) as u32
    } else {
        0
    }
}
