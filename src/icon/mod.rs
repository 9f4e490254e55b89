//! Marker icon resource description and style assembly.

pub mod cursor;
pub mod style;

use crate::core::geo::Point;
use crate::{MarkerError, Result};
use serde::{Deserialize, Serialize};

/// Geometry of a marker icon image, as declared by the host's icon
/// resource. Both fields are in pixels of the unscaled image.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Icon {
    /// Native dimensions of the image.
    pub size: Point,
    /// Anchor point measured from the image's top-left corner; this is
    /// the pixel that sits on the marker's geographic position.
    pub anchor: Point,
}

impl Icon {
    pub fn new(size: Point, anchor: Point) -> Self {
        Self { size, anchor }
    }

    /// Builds an icon from the host's declarative options.
    ///
    /// Size and anchor may be absent in host-side option bags; there is
    /// no sensible default for either, so construction fails fast.
    pub fn from_options(options: &IconOptions) -> Result<Self> {
        let size = options
            .size
            .ok_or_else(|| MarkerError::IconMetadata("size".to_string()))?;
        let anchor = options
            .anchor
            .ok_or_else(|| MarkerError::IconMetadata("anchor".to_string()))?;
        Ok(Self { size, anchor })
    }
}

/// Declarative icon options as a host typically supplies them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IconOptions {
    pub size: Option<Point>,
    pub anchor: Option<Point>,
}
