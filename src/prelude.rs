//! Prelude module for common oriented-marker types and traits
//!
//! This module re-exports the most commonly used types, traits, and
//! functions for easy importing with `use oriented_marker::prelude::*;`

pub use crate::core::{
    geo::{LatLng, Point},
    geometry::{handle_offset, orientation_from_handle, Orientation},
};

pub use crate::canvas::{headless::HeadlessCanvas, Canvas, LineStyle, OverlayShape};

pub use crate::icon::{cursor::rotation_cursor, style::IconStyle, Icon, IconOptions};

pub use crate::input::{
    controller::{ControllerState, DragUpdate, OrientationController},
    events::{EventManager, MarkerEvent, PointerEvent, TouchPoint},
};

pub use crate::marker::{
    handle::{Handle, HandleOptions},
    OrientedMarker,
};

pub use crate::{Error as MarkerError, Result};

pub use std::collections::VecDeque;

pub use fxhash::{FxHashMap as HashMap, FxHashSet as HashSet};
