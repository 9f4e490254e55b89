//! Lifecycle of the draggable handle overlays.
//!
//! The handle is what the user grabs: a line from the marker to the grab
//! point, a circle marker at the grab point, and optionally a decorative
//! ring icon. All of it derives from the marker's committed state and is
//! rebuilt rather than patched, so it can never drift from the model.

use crate::{
    canvas::{Canvas, LineStyle, OverlayShape},
    core::{geo::LatLng, geometry},
    icon::style::IconStyle,
};
use serde::{Deserialize, Serialize};

/// Configuration for the handle visuals and hit testing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HandleOptions {
    /// Stroke style shared by the orientation line and the grab circle.
    pub line: LineStyle,
    /// Pixel tolerance around the grab circle accepted as a press on it.
    pub hit_radius: f64,
    /// Show the decorative ring icon at the grab point.
    pub ring: bool,
}

impl Default for HandleOptions {
    fn default() -> Self {
        Self {
            line: LineStyle::default(),
            hit_radius: 10.0,
            ring: false,
        }
    }
}

/// The live handle: its overlays on the canvas and the current grab
/// point. Exists only between `activate()` and `finish()`.
#[derive(Debug, Clone)]
pub struct Handle {
    line_id: String,
    circle_id: String,
    ring_id: Option<String>,
    options: HandleOptions,
    position: LatLng,
    /// Style of the decorative ring element, kept current by the facade's
    /// renderer; unused when the ring is disabled.
    pub ring_style: IconStyle,
}

impl Handle {
    /// Computes the grab point implied by the model and adds the overlays
    /// to the canvas.
    pub fn create(
        canvas: &mut dyn Canvas,
        owner: &str,
        options: HandleOptions,
        marker_pos: &LatLng,
        angle: f64,
        effective_height: f64,
    ) -> Self {
        let ring_id = options.ring.then(|| format!("{}/orientation-ring", owner));
        let mut handle = Self {
            line_id: format!("{}/orientation-line", owner),
            circle_id: format!("{}/orientation-circle", owner),
            ring_id,
            options,
            position: *marker_pos,
            ring_style: IconStyle::default(),
        };
        let grab = Self::grab_point(canvas, marker_pos, angle, effective_height);
        handle.place(canvas, marker_pos, grab);
        handle
    }

    /// Geographic position of the grab point.
    pub fn position(&self) -> LatLng {
        self.position
    }

    /// Removes and re-adds the overlays at the model-implied position.
    /// Used for committed state only; drag-in-progress moves go through
    /// [`Handle::track`] instead.
    pub fn reposition(
        &mut self,
        canvas: &mut dyn Canvas,
        marker_pos: &LatLng,
        angle: f64,
        effective_height: f64,
    ) {
        self.remove(canvas);
        let grab = Self::grab_point(canvas, marker_pos, angle, effective_height);
        self.place(canvas, marker_pos, grab);
    }

    /// Glues the overlays to the raw pointer during an active drag.
    pub fn track(&mut self, canvas: &mut dyn Canvas, marker_pos: &LatLng, pointer: LatLng) {
        self.place(canvas, marker_pos, pointer);
    }

    /// Removes every overlay; safe when they are already gone.
    pub fn destroy(self, canvas: &mut dyn Canvas) {
        self.remove(canvas);
    }

    fn grab_point(
        canvas: &dyn Canvas,
        marker_pos: &LatLng,
        angle: f64,
        effective_height: f64,
    ) -> LatLng {
        let marker_px = canvas.lat_lng_to_pixel(marker_pos);
        let pixel = marker_px.add(&geometry::handle_offset(angle, effective_height));
        canvas.pixel_to_lat_lng(&pixel)
    }

    fn place(&mut self, canvas: &mut dyn Canvas, marker_pos: &LatLng, grab: LatLng) {
        self.position = grab;
        canvas.add_overlay(
            &self.line_id,
            OverlayShape::Line {
                from: *marker_pos,
                to: grab,
                style: self.options.line.clone(),
            },
        );
        canvas.add_overlay(
            &self.circle_id,
            OverlayShape::Circle {
                position: grab,
                radius: self.options.line.weight * 2.0,
                style: self.options.line.clone(),
            },
        );
        if let Some(ring_id) = &self.ring_id {
            canvas.add_overlay(ring_id, OverlayShape::Marker { position: grab });
        }
    }

    fn remove(&self, canvas: &mut dyn Canvas) {
        canvas.remove_overlay(&self.line_id);
        canvas.remove_overlay(&self.circle_id);
        if let Some(ring_id) = &self.ring_id {
            canvas.remove_overlay(ring_id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::headless::HeadlessCanvas;
    use crate::core::geo::Point;

    fn setup() -> (HeadlessCanvas, LatLng) {
        let canvas = HeadlessCanvas::new(LatLng::default(), 10.0, Point::new(200.0, 200.0));
        let marker_pos = canvas.pixel_to_lat_lng(&Point::new(100.0, 100.0));
        (canvas, marker_pos)
    }

    #[test]
    fn test_create_places_grab_point_along_angle() {
        let (mut canvas, marker_pos) = setup();
        let handle = Handle::create(
            &mut canvas,
            "m",
            HandleOptions::default(),
            &marker_pos,
            90.0,
            40.0,
        );

        // 90° puts the grab point one height east of the marker.
        let grab_px = canvas.lat_lng_to_pixel(&handle.position());
        assert!((grab_px.x - 140.0).abs() < 1e-6);
        assert!((grab_px.y - 100.0).abs() < 1e-6);

        // Line and circle overlays, no ring by default.
        assert_eq!(canvas.overlay_count(), 2);
    }

    #[test]
    fn test_ring_variant_adds_third_overlay() {
        let (mut canvas, marker_pos) = setup();
        let options = HandleOptions {
            ring: true,
            ..Default::default()
        };
        let handle = Handle::create(&mut canvas, "m", options, &marker_pos, 0.0, 40.0);
        assert_eq!(canvas.overlay_count(), 3);

        handle.destroy(&mut canvas);
        assert_eq!(canvas.overlay_count(), 0);
    }

    #[test]
    fn test_reposition_follows_model() {
        let (mut canvas, marker_pos) = setup();
        let mut handle = Handle::create(
            &mut canvas,
            "m",
            HandleOptions::default(),
            &marker_pos,
            0.0,
            40.0,
        );

        handle.reposition(&mut canvas, &marker_pos, 180.0, 20.0);
        let grab_px = canvas.lat_lng_to_pixel(&handle.position());
        assert!((grab_px.x - 100.0).abs() < 1e-6);
        assert!((grab_px.y - 120.0).abs() < 1e-6);
    }

    #[test]
    fn test_destroy_twice_is_safe_on_canvas() {
        let (mut canvas, marker_pos) = setup();
        let handle = Handle::create(
            &mut canvas,
            "m",
            HandleOptions::default(),
            &marker_pos,
            0.0,
            40.0,
        );
        let twin = handle.clone();

        handle.destroy(&mut canvas);
        twin.destroy(&mut canvas);
        assert_eq!(canvas.overlay_count(), 0);
    }
}
