//! Encoded polyline decoder.
//!
//! Decodes the standard signed-varint delta format used by the Routes API
//! (5-bit groups offset by 63, zig-zag sign, 1e5 coordinate scale). Malformed
//! input is a hard error: a route whose geometry cannot be decoded is a
//! provider failure, never an empty route.

use crate::domain::Point;

/// Error decoding an encoded polyline.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PolylineError {
    /// The input ended in the middle of a varint group.
    #[error("truncated polyline: input ended inside a coordinate at byte {at}")]
    Truncated { at: usize },

    /// A byte below the encoding offset appeared in the stream.
    #[error("invalid polyline byte {byte:#x} at {at}")]
    InvalidByte { byte: u8, at: usize },

    /// A coordinate delta did not terminate within 32 bits.
    #[error("coordinate overflow at byte {at}")]
    Overflow { at: usize },
}

/// Decode an encoded polyline into points, in encoding order.
pub fn decode_polyline(encoded: &str) -> Result<Vec<Point>, PolylineError> {
    let bytes = encoded.as_bytes();
    let mut idx = 0;
    let mut lat: i64 = 0;
    let mut lng: i64 = 0;
    let mut points = Vec::new();

    while idx < bytes.len() {
        lat += decode_delta(bytes, &mut idx)?;
        lng += decode_delta(bytes, &mut idx)?;

        points.push(Point::new(lat as f64 / 1e5, lng as f64 / 1e5));
    }

    Ok(points)
}

/// Decode one zig-zag varint delta, advancing `idx`.
fn decode_delta(bytes: &[u8], idx: &mut usize) -> Result<i64, PolylineError> {
    let mut shift = 0u32;
    let mut value: i64 = 0;

    loop {
        let Some(&byte) = bytes.get(*idx) else {
            return Err(PolylineError::Truncated { at: *idx });
        };

        if byte < 63 {
            return Err(PolylineError::InvalidByte { byte, at: *idx });
        }
        if shift > 30 {
            return Err(PolylineError::Overflow { at: *idx });
        }

        *idx += 1;
        let chunk = (byte - 63) as i64;
        value |= (chunk & 0x1f) << shift;
        shift += 5;

        if chunk < 0x20 {
            break;
        }
    }

    // Zig-zag: low bit carries the sign
    Ok(if value & 1 != 0 { !(value >> 1) } else { value >> 1 })
}
