//! Element-style assembly for the rotated, resized icon.
//!
//! The host exposes its icon element's inline style; the renderer
//! mutates these fields and the host applies them verbatim. The rotation
//! is *appended* to the positioning transform the host already set on
//! the element, so panning the canvas never fights the rotation.

use crate::core::geo::Point;
use serde::{Deserialize, Serialize};

/// Mutable style state of the host's icon element.
///
/// All values are CSS strings. `Default` is the untouched element.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IconStyle {
    pub width: String,
    pub height: String,
    pub margin_left: String,
    pub margin_top: String,
    pub transform: String,
    pub transform_origin: String,
}

fn px(value: f64) -> String {
    format!("{}px", value)
}

/// Appends a rotation to the host's positioning transform.
pub fn compose_rotation(base_transform: &str, angle: f64) -> String {
    if base_transform.is_empty() {
        format!("rotate({}deg)", angle)
    } else {
        format!("{} rotate({}deg)", base_transform, angle)
    }
}

/// Applies the full icon transform: effective size, negative anchor
/// offset, rotation appended to the host positioning transform, and the
/// rotation pivot placed on the anchor.
pub fn apply_icon_transform(
    style: &mut IconStyle,
    base_transform: &str,
    angle: f64,
    effective_size: Point,
    effective_anchor: Point,
) {
    style.width = px(effective_size.x);
    style.height = px(effective_size.y);
    style.margin_left = px(-effective_anchor.x);
    style.margin_top = px(-effective_anchor.y);
    style.transform = compose_rotation(base_transform, angle);

    // The anchor ratio is scale invariant; skip it when the icon has
    // collapsed to zero size.
    if effective_size.x != 0.0 && effective_size.y != 0.0 {
        let x_percent = (effective_anchor.x / effective_size.x * 100.0).trunc();
        let y_percent = (effective_anchor.y / effective_size.y * 100.0).trunc();
        style.transform_origin = format!("{}% {}%", x_percent, y_percent);
    }
}

/// Rotates the decorative ring icon shown at the handle position. The
/// ring art points 45° off its own axis, hence the constant offset; it
/// is purely cosmetic and feeds nothing back into the model.
pub fn apply_ring_transform(style: &mut IconStyle, angle: f64) {
    style.transform = format!("rotate({}deg)", angle - 45.0);
    style.transform_origin = "50% 50%".to_string();
}
