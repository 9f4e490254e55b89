//! A windowless canvas backed by the standard Web Mercator projection.
//!
//! Implements the [`Canvas`] contract without any UI host: coordinates
//! are projected with EPSG:3857 over 256px tiles, overlays live in a
//! plain map, and the pan-drag flag is a boolean like a real map's
//! dragging option. Used by the test suite and by embedders that drive
//! the control from their own event source.

use crate::canvas::{Canvas, OverlayShape};
use crate::core::geo::{LatLng, Point};
use crate::prelude::HashMap;
use std::f64::consts::PI;

/// Web Mercator projection constants
const EARTH_RADIUS: f64 = 6378137.0;

pub struct HeadlessCanvas {
    center: LatLng,
    zoom: f64,
    size: Point,
    dragging: bool,
    /// Pixel origin for coordinate transformations (to avoid precision
    /// issues far from the date line)
    pixel_origin: Point,
    overlays: HashMap<String, OverlayShape>,
}

impl HeadlessCanvas {
    /// Creates a canvas centered on the given coordinate.
    pub fn new(center: LatLng, zoom: f64, size: Point) -> Self {
        let mut canvas = Self {
            center,
            zoom: zoom.clamp(0.0, 18.0),
            size,
            dragging: true,
            pixel_origin: Point::default(),
            overlays: HashMap::default(),
        };
        canvas.update_pixel_origin();
        canvas
    }

    pub fn center(&self) -> LatLng {
        self.center
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    pub fn size(&self) -> Point {
        self.size
    }

    /// Recenters the canvas, e.g. after a host-driven pan.
    pub fn set_center(&mut self, center: LatLng) {
        self.center = center;
        self.update_pixel_origin();
    }

    pub fn set_zoom(&mut self, zoom: f64) {
        self.zoom = zoom.clamp(0.0, 18.0);
        self.update_pixel_origin();
    }

    /// Looks up an overlay previously added under `id`.
    pub fn overlay(&self, id: &str) -> Option<&OverlayShape> {
        self.overlays.get(id)
    }

    pub fn overlay_count(&self) -> usize {
        self.overlays.len()
    }

    fn update_pixel_origin(&mut self) {
        self.pixel_origin = self.project(&self.center).floor();
    }

    /// Projects a LatLng to world pixel coordinates at the current zoom
    /// level (EPSG:3857).
    fn project(&self, lat_lng: &LatLng) -> Point {
        let scale = 256.0 * 2_f64.powf(self.zoom);

        let x = lat_lng.lng.to_radians() * EARTH_RADIUS;
        let y = ((PI / 4.0 + lat_lng.lat.to_radians() / 2.0).tan().ln()) * EARTH_RADIUS;

        let pixel_x = (x + PI * EARTH_RADIUS) / (2.0 * PI * EARTH_RADIUS) * scale;
        let pixel_y = (-y + PI * EARTH_RADIUS) / (2.0 * PI * EARTH_RADIUS) * scale;

        Point::new(pixel_x, pixel_y)
    }

    /// Unprojects world pixel coordinates back to a LatLng at the current
    /// zoom level.
    fn unproject(&self, pixel: &Point) -> LatLng {
        let scale = 256.0 * 2_f64.powf(self.zoom);

        let x = (pixel.x / scale) * (2.0 * PI * EARTH_RADIUS) - PI * EARTH_RADIUS;
        let y = PI * EARTH_RADIUS - (pixel.y / scale) * (2.0 * PI * EARTH_RADIUS);

        let lng = (x / EARTH_RADIUS).to_degrees();
        let lat = (2.0 * (y / EARTH_RADIUS).exp().atan() - PI / 2.0).to_degrees();

        LatLng::new(lat, lng)
    }
}

impl Default for HeadlessCanvas {
    fn default() -> Self {
        Self::new(LatLng::default(), 10.0, Point::new(800.0, 600.0))
    }
}

impl Canvas for HeadlessCanvas {
    fn lat_lng_to_pixel(&self, lat_lng: &LatLng) -> Point {
        let layer_point = self.project(lat_lng).subtract(&self.pixel_origin);
        Point::new(
            layer_point.x + self.size.x / 2.0,
            layer_point.y + self.size.y / 2.0,
        )
    }

    fn pixel_to_lat_lng(&self, pixel: &Point) -> LatLng {
        let layer_point = Point::new(pixel.x - self.size.x / 2.0, pixel.y - self.size.y / 2.0);
        self.unproject(&layer_point.add(&self.pixel_origin))
    }

    fn panning_enabled(&self) -> bool {
        self.dragging
    }

    fn set_panning_enabled(&mut self, enabled: bool) {
        self.dragging = enabled;
    }

    fn add_overlay(&mut self, id: &str, shape: OverlayShape) {
        self.overlays.insert(id.to_string(), shape);
    }

    fn remove_overlay(&mut self, id: &str) {
        self.overlays.remove(id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_center_maps_to_viewport_middle() {
        let canvas = HeadlessCanvas::new(LatLng::new(40.7128, -74.0060), 12.0, Point::new(800.0, 600.0));
        let pixel = canvas.lat_lng_to_pixel(&canvas.center());

        // Within a pixel of the middle (the origin is floored).
        assert!((pixel.x - 400.0).abs() < 1.0);
        assert!((pixel.y - 300.0).abs() < 1.0);
    }

    #[test]
    fn test_projection_round_trip() {
        let canvas = HeadlessCanvas::new(LatLng::new(48.8566, 2.3522), 14.0, Point::new(512.0, 512.0));
        let pixel = Point::new(137.0, 301.5);
        let geo = canvas.pixel_to_lat_lng(&pixel);
        let back = canvas.lat_lng_to_pixel(&geo);

        assert!((back.x - pixel.x).abs() < 1e-6);
        assert!((back.y - pixel.y).abs() < 1e-6);
    }

    #[test]
    fn test_overlay_management() {
        let mut canvas = HeadlessCanvas::default();
        let position = LatLng::new(10.0, 10.0);

        canvas.add_overlay("m", OverlayShape::Marker { position });
        assert_eq!(canvas.overlay_count(), 1);
        assert_eq!(canvas.overlay("m").unwrap().anchor(), position);

        canvas.remove_overlay("m");
        assert_eq!(canvas.overlay_count(), 0);

        // Removing an unknown id is a no-op.
        canvas.remove_overlay("m");
        assert_eq!(canvas.overlay_count(), 0);
    }

    #[test]
    fn test_panning_flag() {
        let mut canvas = HeadlessCanvas::default();
        assert!(canvas.panning_enabled());
        canvas.set_panning_enabled(false);
        assert!(!canvas.panning_enabled());
    }
}
