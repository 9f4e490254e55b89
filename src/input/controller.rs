//! Interaction state machine for the orientation handle.
//!
//! The controller owns the drag session: it arbitrates pointer input
//! against the host's own pan behavior, keeps the handle glued to the
//! pointer while a drag runs, and reports committed model changes back
//! to the facade. All transitions happen synchronously inside the host's
//! event dispatch; there is no timer and no background work.

use crate::{
    canvas::Canvas,
    core::{
        geo::{LatLng, Point},
        geometry::{self, Orientation},
    },
    input::events::PointerEvent,
    marker::handle::{Handle, HandleOptions},
};

/// Where the controller is in the drag lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerState {
    /// No handle on the canvas; pointer input is ignored entirely.
    Inactive,
    /// Handle visible, waiting for a press on it.
    Ready,
    /// A drag session is running.
    Dragging,
}

/// Ephemeral state of one drag, created on press and consumed exactly
/// once on release.
#[derive(Debug, Clone, Copy)]
struct InteractionSession {
    /// The canvas pan-drag flag before this session disabled it.
    saved_panning: bool,
}

/// Outcome of feeding an input event through the controller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragUpdate {
    /// The model changed mid-drag.
    Moved(Orientation),
    /// The drag finished; carries the final recompute.
    Finished(Orientation),
}

pub struct OrientationController {
    state: ControllerState,
    session: Option<InteractionSession>,
    handle: Option<Handle>,
    options: HandleOptions,
}

impl OrientationController {
    pub fn new(options: HandleOptions) -> Self {
        Self {
            state: ControllerState::Inactive,
            session: None,
            handle: None,
            options,
        }
    }

    pub fn state(&self) -> ControllerState {
        self.state
    }

    pub fn handle(&self) -> Option<&Handle> {
        self.handle.as_ref()
    }

    pub fn handle_mut(&mut self) -> Option<&mut Handle> {
        self.handle.as_mut()
    }

    /// `Inactive -> Ready`: creates the handle at the position implied by
    /// the committed model state. When already active, the handle is
    /// repositioned instead of stacking a second set of overlays.
    pub fn activate(
        &mut self,
        canvas: &mut dyn Canvas,
        owner: &str,
        marker_pos: &LatLng,
        angle: f64,
        effective_height: f64,
    ) {
        if self.state != ControllerState::Inactive {
            self.reposition(canvas, marker_pos, angle, effective_height);
            return;
        }

        let handle = Handle::create(
            canvas,
            owner,
            self.options.clone(),
            marker_pos,
            angle,
            effective_height,
        );
        self.handle = Some(handle);
        self.state = ControllerState::Ready;
        log::debug!("orientation control ready for {}", owner);
    }

    /// Feeds one pointer or touch event through the state machine.
    ///
    /// Returns a model update when the event changed angle/percent.
    /// Events outside a session, presses that miss the handle, and events
    /// without usable coordinates all fall through as no-ops.
    pub fn handle_event(
        &mut self,
        event: &PointerEvent,
        canvas: &mut dyn Canvas,
        marker_pos: &LatLng,
        base_height: f64,
    ) -> Option<DragUpdate> {
        match self.state {
            ControllerState::Inactive => None,
            ControllerState::Ready => {
                if event.is_press() {
                    if let Some(position) = event.position() {
                        if self.hits_handle(canvas, &position) {
                            self.begin_drag(canvas);
                        }
                    }
                }
                None
            }
            ControllerState::Dragging => {
                if event.is_release() {
                    return self
                        .end_drag(canvas, marker_pos, base_height)
                        .map(DragUpdate::Finished);
                }
                if !event.is_motion() {
                    return None;
                }
                let position = event.position()?;
                Some(DragUpdate::Moved(self.drag_to(
                    canvas, marker_pos, base_height, position,
                )))
            }
        }
    }

    /// Moves the handle back to the position implied by the committed
    /// model, e.g. after the host panned or the marker moved. A drag in
    /// flight is implicitly ended first so the handle snaps to the model
    /// rather than a stale pointer.
    pub fn reposition(
        &mut self,
        canvas: &mut dyn Canvas,
        marker_pos: &LatLng,
        angle: f64,
        effective_height: f64,
    ) {
        if self.state == ControllerState::Dragging {
            self.restore_panning(canvas);
            self.state = ControllerState::Ready;
        }
        if let Some(handle) = self.handle.as_mut() {
            handle.reposition(canvas, marker_pos, angle, effective_height);
        }
    }

    /// Any state -> `Inactive`: restores panning, destroys the handle and
    /// clears session flags. Calling it again is a no-op.
    pub fn finish(&mut self, canvas: &mut dyn Canvas) {
        self.restore_panning(canvas);
        if let Some(handle) = self.handle.take() {
            handle.destroy(canvas);
            log::debug!("orientation control dismissed");
        }
        self.state = ControllerState::Inactive;
    }

    fn hits_handle(&self, canvas: &dyn Canvas, position: &Point) -> bool {
        match &self.handle {
            Some(handle) => {
                let handle_px = canvas.lat_lng_to_pixel(&handle.position());
                handle_px.distance_to(position) <= self.options.hit_radius
            }
            None => false,
        }
    }

    fn begin_drag(&mut self, canvas: &mut dyn Canvas) {
        let saved_panning = canvas.panning_enabled();
        canvas.set_panning_enabled(false);
        self.session = Some(InteractionSession { saved_panning });
        self.state = ControllerState::Dragging;
        log::debug!("drag session started (panning snapshot: {})", saved_panning);
    }

    fn drag_to(
        &mut self,
        canvas: &mut dyn Canvas,
        marker_pos: &LatLng,
        base_height: f64,
        pointer: Point,
    ) -> Orientation {
        // During a drag the handle tracks the raw pointer; the model is
        // recomputed from it, never the other way around.
        let pointer_geo = canvas.pixel_to_lat_lng(&pointer);
        if let Some(handle) = self.handle.as_mut() {
            handle.track(canvas, marker_pos, pointer_geo);
        }
        let marker_px = canvas.lat_lng_to_pixel(marker_pos);
        geometry::orientation_from_handle(&marker_px, &pointer, base_height)
    }

    fn end_drag(
        &mut self,
        canvas: &mut dyn Canvas,
        marker_pos: &LatLng,
        base_height: f64,
    ) -> Option<Orientation> {
        self.restore_panning(canvas);
        self.state = ControllerState::Ready;

        let handle = self.handle.as_ref()?;
        let marker_px = canvas.lat_lng_to_pixel(marker_pos);
        let handle_px = canvas.lat_lng_to_pixel(&handle.position());
        Some(geometry::orientation_from_handle(
            &marker_px, &handle_px, base_height,
        ))
    }

    /// Restores the pan-drag flag from the session snapshot, exactly
    /// once; the session is consumed in the process.
    fn restore_panning(&mut self, canvas: &mut dyn Canvas) {
        if let Some(session) = self.session.take() {
            canvas.set_panning_enabled(session.saved_panning);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::headless::HeadlessCanvas;
    use crate::core::geo::{LatLng, Point};

    fn setup() -> (HeadlessCanvas, OrientationController, LatLng) {
        let canvas = HeadlessCanvas::new(LatLng::default(), 10.0, Point::new(200.0, 200.0));
        let controller = OrientationController::new(HandleOptions::default());
        let marker_pos = canvas.pixel_to_lat_lng(&Point::new(100.0, 100.0));
        (canvas, controller, marker_pos)
    }

    #[test]
    fn test_events_ignored_while_inactive() {
        let (mut canvas, mut controller, marker_pos) = setup();

        let update = controller.handle_event(
            &PointerEvent::Move {
                position: Point::new(140.0, 100.0),
            },
            &mut canvas,
            &marker_pos,
            40.0,
        );
        assert_eq!(update, None);
        assert_eq!(controller.state(), ControllerState::Inactive);
    }

    #[test]
    fn test_press_on_handle_starts_session() {
        let (mut canvas, mut controller, marker_pos) = setup();
        controller.activate(&mut canvas, "m", &marker_pos, 0.0, 40.0);
        assert_eq!(controller.state(), ControllerState::Ready);

        // The handle sits one icon-height north of the marker.
        controller.handle_event(
            &PointerEvent::Down {
                position: Point::new(100.0, 60.0),
            },
            &mut canvas,
            &marker_pos,
            40.0,
        );
        assert_eq!(controller.state(), ControllerState::Dragging);
        assert!(!canvas.panning_enabled());
    }

    #[test]
    fn test_press_away_from_handle_is_ignored() {
        let (mut canvas, mut controller, marker_pos) = setup();
        controller.activate(&mut canvas, "m", &marker_pos, 0.0, 40.0);

        controller.handle_event(
            &PointerEvent::Down {
                position: Point::new(20.0, 180.0),
            },
            &mut canvas,
            &marker_pos,
            40.0,
        );
        assert_eq!(controller.state(), ControllerState::Ready);
        assert!(canvas.panning_enabled());
    }

    #[test]
    fn test_finish_is_idempotent() {
        let (mut canvas, mut controller, marker_pos) = setup();
        controller.activate(&mut canvas, "m", &marker_pos, 0.0, 40.0);
        controller.handle_event(
            &PointerEvent::Down {
                position: Point::new(100.0, 60.0),
            },
            &mut canvas,
            &marker_pos,
            40.0,
        );
        assert!(!canvas.panning_enabled());

        controller.finish(&mut canvas);
        assert_eq!(controller.state(), ControllerState::Inactive);
        assert!(canvas.panning_enabled());
        assert_eq!(canvas.overlay_count(), 0);

        controller.finish(&mut canvas);
        assert_eq!(controller.state(), ControllerState::Inactive);
        assert!(canvas.panning_enabled());
    }

    #[test]
    fn test_malformed_motion_does_not_update_model() {
        let (mut canvas, mut controller, marker_pos) = setup();
        controller.activate(&mut canvas, "m", &marker_pos, 0.0, 40.0);
        controller.handle_event(
            &PointerEvent::Down {
                position: Point::new(100.0, 60.0),
            },
            &mut canvas,
            &marker_pos,
            40.0,
        );

        let update = controller.handle_event(
            &PointerEvent::TouchMove { touches: vec![] },
            &mut canvas,
            &marker_pos,
            40.0,
        );
        assert_eq!(update, None);
        assert_eq!(controller.state(), ControllerState::Dragging);
    }
}
