//! The public marker facade.
//!
//! [`OrientedMarker`] composes the geometry model, the style renderer,
//! the handle lifecycle and the interaction controller behind the small
//! operation set a caller manipulates. It deliberately does not inherit
//! from any host marker type; the host keeps ownership of the real
//! marker element and this facade mirrors its add/remove/update hooks.

pub mod handle;

use crate::{
    canvas::{Canvas, OverlayShape},
    core::geo::{LatLng, Point},
    icon::{
        style::{self, IconStyle},
        Icon,
    },
    input::{
        controller::{ControllerState, DragUpdate, OrientationController},
        events::{EventManager, MarkerEvent, PointerEvent},
    },
    marker::handle::HandleOptions,
    MarkerError, Result,
};

/// Default scale: the icon at its native size.
const DEFAULT_PERCENT: f64 = 100.0;

/// Partial options patch accepted by [`OrientedMarker::set_options`].
#[derive(Debug, Clone, Default, serde::Deserialize)]
struct OptionsPatch {
    position: Option<LatLng>,
    angle: Option<f64>,
    percent: Option<f64>,
}

pub struct OrientedMarker {
    id: String,
    position: LatLng,
    icon: Icon,
    angle: f64,
    percent: f64,
    /// Host positioning transform captured when the icon is attached;
    /// the rotation is appended to it, never merged into it.
    base_transform: String,
    style: IconStyle,
    controller: OrientationController,
    events: EventManager,
    attached: bool,
}

impl OrientedMarker {
    pub fn new(id: impl Into<String>, position: LatLng, icon: Icon) -> Self {
        Self::with_handle_options(id, position, icon, HandleOptions::default())
    }

    pub fn with_handle_options(
        id: impl Into<String>,
        position: LatLng,
        icon: Icon,
        options: HandleOptions,
    ) -> Self {
        Self {
            id: id.into(),
            position,
            icon,
            angle: 0.0,
            percent: DEFAULT_PERCENT,
            base_transform: String::new(),
            style: IconStyle::default(),
            controller: OrientationController::new(options),
            events: EventManager::new(),
            attached: false,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn position(&self) -> LatLng {
        self.position
    }

    pub fn angle(&self) -> f64 {
        self.angle
    }

    pub fn percent(&self) -> f64 {
        self.percent
    }

    pub fn icon(&self) -> &Icon {
        &self.icon
    }

    /// Current style of the host's icon element, reflecting the latest
    /// angle and percent.
    pub fn icon_style(&self) -> &IconStyle {
        &self.style
    }

    /// Where the interaction controller is in the drag lifecycle.
    pub fn interaction_state(&self) -> ControllerState {
        self.controller.state()
    }

    pub fn effective_size(&self) -> Point {
        self.icon.size.multiply(self.percent / 100.0)
    }

    pub fn effective_anchor(&self) -> Point {
        self.icon.anchor.multiply(self.percent / 100.0)
    }

    /// Sets the rotation in degrees and re-renders the icon. Call
    /// [`OrientedMarker::update`] afterwards if a handle is visible.
    pub fn set_angle(&mut self, angle: f64) {
        self.angle = angle;
        self.render_icon();
    }

    /// Sets the scale percentage and re-renders the icon. Values are not
    /// clamped; zero or negative percentages collapse or mirror the icon.
    pub fn set_percent(&mut self, percent: f64) {
        self.percent = percent;
        self.render_icon();
    }

    /// Adds to the current rotation and returns the new angle.
    pub fn rotate(&mut self, delta: f64) -> f64 {
        self.angle += delta;
        self.render_icon();
        self.angle
    }

    /// Moves the marker. The host owns the actual element position, so
    /// the handle follows on the next [`OrientedMarker::update`].
    pub fn set_position(&mut self, position: LatLng) {
        if !position.is_valid() {
            log::warn!("marker {} moved to out-of-range coordinate", self.id);
        }
        self.position = position;
    }

    /// Reflects a host repositioning of the icon element. The positioning
    /// transform is snapshotted before any rotation is appended to it.
    pub fn set_base_transform(&mut self, transform: impl Into<String>) {
        self.base_transform = transform.into();
        self.render_icon();
    }

    /// Host add hook: registers the marker overlay and renders the icon.
    pub fn on_add(&mut self, canvas: &mut dyn Canvas) {
        canvas.add_overlay(
            &self.id,
            OverlayShape::Marker {
                position: self.position,
            },
        );
        self.attached = true;
        self.render_icon();
    }

    /// Host remove hook: ends any session, removes the handle and the
    /// marker overlay.
    pub fn on_remove(&mut self, canvas: &mut dyn Canvas) {
        self.controller.finish(canvas);
        canvas.remove_overlay(&self.id);
        self.attached = false;
    }

    /// Host update hook: keeps the marker overlay and the handle glued to
    /// the current position after pans or programmatic moves. Angle and
    /// percent are untouched.
    pub fn update(&mut self, canvas: &mut dyn Canvas) {
        if self.attached {
            canvas.add_overlay(
                &self.id,
                OverlayShape::Marker {
                    position: self.position,
                },
            );
        }
        let height = self.effective_size().y;
        self.controller
            .reposition(canvas, &self.position, self.angle, height);
    }

    /// Shows the orientation handle at the position implied by the
    /// current angle and percent.
    ///
    /// Fails when the marker has not been added to a canvas yet.
    pub fn activate(&mut self, canvas: &mut dyn Canvas) -> Result<()> {
        if !self.attached {
            return Err(MarkerError::NotAttached.into());
        }
        let height = self.effective_size().y;
        self.controller
            .activate(canvas, &self.id, &self.position, self.angle, height);
        self.render_icon();
        self.render_ring();
        Ok(())
    }

    /// Ends any session and removes the handle. Idempotent.
    pub fn finish(&mut self, canvas: &mut dyn Canvas) {
        self.controller.finish(canvas);
    }

    /// Feeds a pointer or touch event from the host into the control.
    ///
    /// Emits a `rotate` notification for every mid-drag change and a
    /// `rotateend` notification when the session completes; both are
    /// drained through [`OrientedMarker::process_events`].
    pub fn handle_event(&mut self, event: &PointerEvent, canvas: &mut dyn Canvas) {
        let base_height = self.icon.size.y;
        match self
            .controller
            .handle_event(event, canvas, &self.position, base_height)
        {
            Some(DragUpdate::Moved(orientation)) => {
                self.angle = orientation.angle;
                self.percent = orientation.percent;
                self.render_icon();
                self.render_ring();
                self.events.emit(MarkerEvent::Rotate {
                    angle: self.angle,
                    percent: self.percent,
                });
            }
            Some(DragUpdate::Finished(orientation)) => {
                self.angle = orientation.angle;
                self.percent = orientation.percent;
                self.render_icon();
                self.render_ring();
                self.events.emit(MarkerEvent::RotateEnd {
                    angle: self.angle,
                    percent: self.percent,
                });
            }
            None => {}
        }
    }

    /// Registers a listener for `"rotate"` or `"rotateend"`.
    pub fn on<F>(&mut self, event_type: &str, callback: F)
    where
        F: Fn(&MarkerEvent) + Send + Sync + 'static,
    {
        self.events.on(event_type, callback);
    }

    /// Drains queued notifications, invoking registered listeners.
    pub fn process_events(&mut self) -> Vec<MarkerEvent> {
        self.events.process_events()
    }

    pub fn options(&self) -> serde_json::Value {
        serde_json::json!({
            "position": {
                "lat": self.position.lat,
                "lng": self.position.lng
            },
            "angle": self.angle,
            "percent": self.percent
        })
    }

    pub fn set_options(&mut self, options: serde_json::Value) -> Result<()> {
        let patch: OptionsPatch =
            serde_json::from_value(options).map_err(MarkerError::Serialization)?;
        if let Some(position) = patch.position {
            if !position.is_valid() {
                return Err(MarkerError::InvalidCoordinates(format!(
                    "{}, {}",
                    position.lat, position.lng
                ))
                .into());
            }
            self.position = position;
        }
        if let Some(angle) = patch.angle {
            self.angle = angle;
        }
        if let Some(percent) = patch.percent {
            self.percent = percent;
        }
        self.render_icon();
        Ok(())
    }

    fn render_icon(&mut self) {
        let effective_size = self.effective_size();
        let effective_anchor = self.effective_anchor();
        style::apply_icon_transform(
            &mut self.style,
            &self.base_transform,
            self.angle,
            effective_size,
            effective_anchor,
        );
    }

    fn render_ring(&mut self) {
        let angle = self.angle;
        if let Some(handle) = self.controller.handle_mut() {
            style::apply_ring_transform(&mut handle.ring_style, angle);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_icon() -> Icon {
        Icon::new(Point::new(30.0, 40.0), Point::new(15.0, 20.0))
    }

    #[test]
    fn test_defaults() {
        let marker = OrientedMarker::new("m", LatLng::default(), test_icon());
        assert_eq!(marker.angle(), 0.0);
        assert_eq!(marker.percent(), 100.0);
        assert_eq!(marker.interaction_state(), ControllerState::Inactive);
    }

    #[test]
    fn test_effective_size_scales_linearly() {
        let mut marker = OrientedMarker::new("m", LatLng::default(), test_icon());

        assert_eq!(marker.effective_size(), Point::new(30.0, 40.0));
        assert_eq!(marker.effective_anchor(), Point::new(15.0, 20.0));

        marker.set_percent(50.0);
        assert_eq!(marker.effective_size(), Point::new(15.0, 20.0));
        assert_eq!(marker.effective_anchor(), Point::new(7.5, 10.0));

        marker.set_percent(250.0);
        assert_eq!(marker.effective_size(), Point::new(75.0, 100.0));
    }

    #[test]
    fn test_rotate_accumulates_and_returns() {
        let mut marker = OrientedMarker::new("m", LatLng::default(), test_icon());
        assert_eq!(marker.rotate(30.0), 30.0);
        assert_eq!(marker.rotate(45.0), 75.0);
        // Angles are unbounded; no wrapping at 360.
        assert_eq!(marker.rotate(300.0), 375.0);
        assert!(marker.icon_style().transform.contains("rotate(375deg)"));
    }

    #[test]
    fn test_set_angle_renders_style() {
        let mut marker = OrientedMarker::new("m", LatLng::default(), test_icon());
        marker.set_base_transform("translate3d(100px, 100px, 0px)");
        marker.set_angle(90.0);

        let style = marker.icon_style();
        assert_eq!(
            style.transform,
            "translate3d(100px, 100px, 0px) rotate(90deg)"
        );
        assert_eq!(style.width, "30px");
        assert_eq!(style.transform_origin, "50% 50%");
    }

    #[test]
    fn test_activate_requires_attachment() {
        let mut canvas = crate::canvas::headless::HeadlessCanvas::default();
        let mut marker = OrientedMarker::new("m", LatLng::default(), test_icon());

        let err = marker.activate(&mut canvas).unwrap_err();
        assert!(err.to_string().contains("not attached"));

        marker.on_add(&mut canvas);
        assert!(marker.activate(&mut canvas).is_ok());
        assert_eq!(marker.interaction_state(), ControllerState::Ready);
    }

    #[test]
    fn test_options_round_trip() {
        let mut marker = OrientedMarker::new("m", LatLng::new(10.0, 20.0), test_icon());
        marker.set_angle(45.0);
        marker.set_percent(150.0);

        let options = marker.options();
        let mut other = OrientedMarker::new("other", LatLng::default(), test_icon());
        other.set_options(options).unwrap();

        assert_eq!(other.angle(), 45.0);
        assert_eq!(other.percent(), 150.0);
        assert_eq!(other.position(), LatLng::new(10.0, 20.0));
    }

    #[test]
    fn test_set_options_rejects_bad_input() {
        let mut marker = OrientedMarker::new("m", LatLng::default(), test_icon());

        let err = marker
            .set_options(serde_json::json!({ "angle": "north" }))
            .unwrap_err();
        assert!(err.to_string().contains("serialization"));

        let err = marker
            .set_options(serde_json::json!({ "position": { "lat": 95.0, "lng": 0.0 } }))
            .unwrap_err();
        assert!(err.to_string().contains("invalid coordinates"));
        // The rejected patch must not have moved the marker.
        assert_eq!(marker.position(), LatLng::default());
    }
}
