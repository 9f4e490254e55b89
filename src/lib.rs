//! # Oriented Marker
//!
//! An interactive rotation-and-resize control for markers placed on a
//! pannable/zoomable map canvas.
//!
//! The user drags a secondary on-screen handle to change a marker's
//! orientation (degrees) and scale (percent of the native icon size) in
//! real time. The crate owns the geometric model, the drag state machine
//! and the style synchronization; the hosting map is reached through the
//! [`canvas::Canvas`] trait, so any canvas that can project coordinates
//! and manage overlays can host the control. A headless Web Mercator
//! canvas is included for tests and UI-less embedding.

pub mod canvas;
pub mod core;
pub mod icon;
pub mod input;
pub mod marker;
pub mod prelude;

// Re-export public API
pub use crate::core::{
    geo::{LatLng, Point},
    geometry::{handle_offset, orientation_from_handle, Orientation},
};

pub use canvas::{headless::HeadlessCanvas, Canvas, LineStyle, OverlayShape};

pub use icon::{cursor::rotation_cursor, style::IconStyle, Icon, IconOptions};

pub use input::{
    controller::{ControllerState, DragUpdate, OrientationController},
    events::{EventManager, MarkerEvent, PointerEvent, TouchPoint},
};

pub use marker::{handle::HandleOptions, OrientedMarker};

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Common error types
#[derive(Debug, thiserror::Error)]
pub enum MarkerError {
    #[error("icon metadata missing: {0}")]
    IconMetadata(String),

    #[error("marker is not attached to a canvas")]
    NotAttached,

    #[error("invalid coordinates: {0}")]
    InvalidCoordinates(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Error type alias for convenience
pub type Error = MarkerError;
