//! Geometry kernel.
//!
//! Point-to-route distances, route downsampling, along-route projection and
//! the encoded polyline decoder. Everything here is pure and synchronous;
//! the engine composes these primitives.

mod kernel;
mod polyline;

pub use kernel::{
    distance_point_to_segment_km, km_along_chord, min_distance_to_polyline_km, sample_route,
};
pub use polyline::{PolylineError, decode_polyline};
