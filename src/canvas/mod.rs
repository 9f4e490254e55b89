//! Host-canvas collaborator contract.
//!
//! The control does not own a map. Whatever canvas hosts the marker is
//! reached through the [`Canvas`] trait: projecting between geographic
//! and container pixel coordinates, toggling the canvas's own pan-drag
//! behavior, and placing the handle overlays. [`headless::HeadlessCanvas`]
//! implements the contract over a plain Web Mercator viewport.

pub mod headless;

use crate::core::geo::{LatLng, Point};
use serde::{Deserialize, Serialize};

/// Stroke styling for the line and circle overlays, as CSS-compatible
/// values the host applies verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineStyle {
    pub color: String,
    pub weight: f64,
    pub opacity: f64,
}

impl Default for LineStyle {
    fn default() -> Self {
        Self {
            color: "blue".to_string(),
            weight: 2.0,
            opacity: 0.6,
        }
    }
}

/// Overlay geometry the control places on the host canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum OverlayShape {
    /// An icon overlay anchored at a geographic position.
    Marker { position: LatLng },
    /// A line between two geographic positions.
    Line {
        from: LatLng,
        to: LatLng,
        style: LineStyle,
    },
    /// A fixed-radius circle marker at a geographic position.
    Circle {
        position: LatLng,
        radius: f64,
        style: LineStyle,
    },
}

impl OverlayShape {
    /// The geographic point a user would grab: the marker or circle
    /// position, or the free end of a line.
    pub fn anchor(&self) -> LatLng {
        match self {
            OverlayShape::Marker { position } => *position,
            OverlayShape::Line { to, .. } => *to,
            OverlayShape::Circle { position, .. } => *position,
        }
    }
}

/// Contract consumed from the host canvas.
///
/// The pan-drag flag is a single value shared by every control on the
/// canvas. Overlapping drag sessions across markers on the same canvas
/// can therefore race on the snapshot/restore of that flag; one session
/// per canvas at a time is the supported mode.
pub trait Canvas {
    /// Projects a geographic coordinate to container pixel coordinates.
    fn lat_lng_to_pixel(&self, lat_lng: &LatLng) -> Point;

    /// Converts container pixel coordinates back to a geographic
    /// coordinate.
    fn pixel_to_lat_lng(&self, pixel: &Point) -> LatLng;

    /// Whether the canvas's own pan-drag behavior is currently enabled.
    fn panning_enabled(&self) -> bool;

    fn set_panning_enabled(&mut self, enabled: bool);

    /// Adds an overlay under the given id, replacing any overlay already
    /// registered under it.
    fn add_overlay(&mut self, id: &str, shape: OverlayShape);

    /// Removes an overlay. Removing an unknown id is a no-op.
    fn remove_overlay(&mut self, id: &str);
}
