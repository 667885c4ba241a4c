//! Distance-banded fare estimate.

/// Upper bound (km, inclusive) and fare (rupees) of each band, ascending.
const FARE_BANDS: [(f64, u32); 4] = [(10.0, 10), (35.0, 20), (50.0, 30), (70.0, 40)];

/// Fare beyond the last band.
const MAX_FARE: u32 = 60;

/// Estimate a base fare from total travelled distance.
///
/// The first band whose upper bound is at least the distance wins.
/// Zero and negative distances fall in the cheapest band.
///
/// # Examples
///
/// ```
/// use journey_server::fare::estimate_fare;
///
/// assert_eq!(estimate_fare(8_000.0), 10);
/// assert_eq!(estimate_fare(35_000.0), 20);
/// assert_eq!(estimate_fare(120_000.0), 60);
/// ```
pub fn estimate_fare(distance_meters: f64) -> u32 {
    let km = distance_meters / 1000.0;

    FARE_BANDS
        .iter()
        .find(|(max_km, _)| km <= *max_km)
        .map(|&(_, fare)| fare)
        .unwrap_or(MAX_FARE)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// A longer trip never costs less
        #[test]
        fn monotonic(a in -10_000.0f64..200_000.0, b in -10_000.0f64..200_000.0) {
            let (short, long) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(estimate_fare(short) <= estimate_fare(long));
        }

        /// Output is always one of the tariff values
        #[test]
        fn fare_is_a_tariff_value(d in any::<f64>()) {
            let fare = estimate_fare(d);
            prop_assert!([10, 20, 30, 40, 60].contains(&fare));
        }
    }
}
