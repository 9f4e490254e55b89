//! Pure geometry of the handle-driven transformation model.
//!
//! Angles are degrees measured clockwise from "up" in the projected pixel
//! space of the host canvas: 0° points north (toward negative y), 90°
//! points east. Angles are semantically unbounded; only `sin`/`cos`
//! consume them, so no normalization is performed anywhere.

use crate::core::geo::Point;
use serde::{Deserialize, Serialize};

/// Angle and scale recovered from a handle position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Orientation {
    /// Rotation in degrees.
    pub angle: f64,
    /// Scale as a percentage of the native icon size (100 = unscaled).
    pub percent: f64,
}

/// Offset from the marker to its handle, in projected pixels.
///
/// `height` is the vertical dimension of the effective (scaled) icon, so
/// the handle sits exactly one icon-height away from the marker along the
/// current orientation.
pub fn handle_offset(angle: f64, height: f64) -> Point {
    let rad = angle.to_radians();
    Point::new(rad.sin() * height, -rad.cos() * height)
}

/// Inverse of [`handle_offset`]: recovers angle and percent from marker
/// and handle positions in projected pixels.
///
/// `base_height` is the *unscaled* icon height; dividing the handle
/// distance by it makes the distance encode the new scale directly, which
/// keeps repeated drags from compounding. A handle coincident with the
/// marker is degenerate input: `percent` is 0 and the angle falls out of
/// `atan2(0, 0)`.
pub fn orientation_from_handle(marker: &Point, handle: &Point, base_height: f64) -> Orientation {
    let distance = marker.distance_to(handle);
    let percent = distance / base_height * 100.0;
    let angle = 180.0 - (handle.x - marker.x).atan2(handle.y - marker.y).to_degrees();
    Orientation { angle, percent }
}
