//! Compact polyline decoding.
//!
//! Leg geometry arrives from the trip planner in the compact encoded
//! polyline format: each point is a latitude delta followed by a longitude
//! delta, each delta zig-zag signed and written as 5-bit chunks offset
//! into printable ASCII (`?` to `~`), with `0x20` marking "more chunks
//! follow". Values are degrees scaled by 1e5, accumulated from (0, 0).

use crate::domain::Coordinate;

/// Fixed-point scale for 5-decimal precision.
const PRECISION: f64 = 1e5;

/// Lowest byte that can appear in an encoded polyline.
const CHUNK_OFFSET: u8 = 63;

/// Set on every chunk except the last of a value.
const CONTINUATION_BIT: u64 = 0x20;

/// A 32-bit value never needs more than 7 chunks (35 bits).
const MAX_SHIFT: u32 = 30;

/// Error returned when an encoded polyline cannot be decoded.
///
/// Positions are byte offsets into the encoded string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MalformedPolyline {
    /// Byte outside the `?`..=`~` range
    #[error("invalid byte {byte:#04x} at position {position}")]
    InvalidByte { position: usize, byte: u8 },

    /// Input ended while the continuation bit was set
    #[error("truncated value at position {position}")]
    Truncated { position: usize },

    /// Input ended after a latitude with no longitude
    #[error("latitude at position {position} has no matching longitude")]
    MissingLongitude { position: usize },

    /// Value or running total does not fit in 32 bits
    #[error("value at position {position} exceeds 32-bit range")]
    Overflow { position: usize },
}

/// Decode an encoded polyline into (lat, lon) points.
///
/// The whole input is consumed; an empty string decodes to no points.
///
/// # Errors
///
/// Returns `Err` if any byte is outside the encoding alphabet, the input
/// stops mid-value or mid-pair, or a value overflows 32 bits.
///
/// # Examples
///
/// ```
/// use journey_server::polyline::decode;
///
/// let points = decode("_p~iF~ps|U_ulLnnqC_mqNvxq`@").unwrap();
/// assert_eq!(points.len(), 3);
/// assert!((points[0].lat - 38.5).abs() < 1e-9);
/// assert!((points[0].lon - -120.2).abs() < 1e-9);
/// assert!((points[2].lat - 43.252).abs() < 1e-9);
///
/// assert!(decode("").unwrap().is_empty());
/// assert!(decode("_p~iF").is_err());
/// ```
pub fn decode(encoded: &str) -> Result<Vec<Coordinate>, MalformedPolyline> {
    let bytes = encoded.as_bytes();
    let mut points = Vec::new();
    let mut position = 0;
    let mut lat: i32 = 0;
    let mut lon: i32 = 0;

    while position < bytes.len() {
        let lat_start = position;
        let d_lat = next_value(bytes, &mut position)?;

        if position >= bytes.len() {
            return Err(MalformedPolyline::MissingLongitude {
                position: lat_start,
            });
        }

        let lon_start = position;
        let d_lon = next_value(bytes, &mut position)?;

        lat = lat.checked_add(d_lat).ok_or(MalformedPolyline::Overflow {
            position: lat_start,
        })?;
        lon = lon.checked_add(d_lon).ok_or(MalformedPolyline::Overflow {
            position: lon_start,
        })?;

        points.push(Coordinate::new(
            f64::from(lat) / PRECISION,
            f64::from(lon) / PRECISION,
        ));
    }

    Ok(points)
}

/// Read one zig-zag encoded value starting at `*position`, advancing past it.
fn next_value(bytes: &[u8], position: &mut usize) -> Result<i32, MalformedPolyline> {
    let start = *position;
    let mut accumulated: u64 = 0;
    let mut shift: u32 = 0;

    loop {
        let Some(&byte) = bytes.get(*position) else {
            return Err(MalformedPolyline::Truncated { position: start });
        };

        if !(CHUNK_OFFSET..=CHUNK_OFFSET + 63).contains(&byte) {
            return Err(MalformedPolyline::InvalidByte {
                position: *position,
                byte,
            });
        }

        if shift > MAX_SHIFT {
            return Err(MalformedPolyline::Overflow { position: start });
        }

        let chunk = u64::from(byte - CHUNK_OFFSET);
        *position += 1;

        accumulated |= (chunk & 0x1f) << shift;
        shift += 5;

        if chunk & CONTINUATION_BIT == 0 {
            break;
        }
    }

    let magnitude = (accumulated >> 1) as i64;
    let value = if accumulated & 1 == 1 {
        !magnitude
    } else {
        magnitude
    };

    i32::try_from(value).map_err(|_| MalformedPolyline::Overflow { position: start })
}
