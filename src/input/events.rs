//! Input events consumed by the control and notifications it emits.

use crate::core::geo::Point;
use crate::prelude::{HashMap, VecDeque};
use serde::{Deserialize, Serialize};

/// Pointer and touch input delivered by the host to the control.
///
/// The host forwards the events it receives on the handle and on the
/// canvas; the controller decides which of them matter in its current
/// state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PointerEvent {
    Down { position: Point },
    Move { position: Point },
    Up,
    TouchStart { touches: Vec<TouchPoint> },
    TouchMove { touches: Vec<TouchPoint> },
    TouchEnd,
}

/// Individual touch point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TouchPoint {
    pub id: u64,
    pub position: Point,
}

impl PointerEvent {
    /// Gets the coordinate associated with this event, if any.
    ///
    /// Touch events report the last changed touch, which is how mobile
    /// hosts describe a moving finger. An event with no usable coordinate
    /// returns `None` and must be treated as a no-op by the controller.
    pub fn position(&self) -> Option<Point> {
        match self {
            PointerEvent::Down { position } | PointerEvent::Move { position } => Some(*position),
            PointerEvent::TouchStart { touches } | PointerEvent::TouchMove { touches } => {
                touches.last().map(|t| t.position)
            }
            PointerEvent::Up | PointerEvent::TouchEnd => None,
        }
    }

    /// Whether this event begins a drag.
    pub fn is_press(&self) -> bool {
        matches!(
            self,
            PointerEvent::Down { .. } | PointerEvent::TouchStart { .. }
        )
    }

    /// Whether this event moves an ongoing drag.
    pub fn is_motion(&self) -> bool {
        matches!(
            self,
            PointerEvent::Move { .. } | PointerEvent::TouchMove { .. }
        )
    }

    /// Whether this event ends a drag.
    pub fn is_release(&self) -> bool {
        matches!(self, PointerEvent::Up | PointerEvent::TouchEnd)
    }
}

/// Notifications emitted by the marker facade during a drag session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MarkerEvent {
    /// Angle or percent changed during an active drag.
    Rotate { angle: f64, percent: f64 },
    /// A drag session completed. Subscribers must not assume exactly-once
    /// delivery per drag; some hosts replay the final state.
    RotateEnd { angle: f64, percent: f64 },
}

impl MarkerEvent {
    /// The listener key this event is dispatched under.
    pub fn kind(&self) -> &'static str {
        match self {
            MarkerEvent::Rotate { .. } => "rotate",
            MarkerEvent::RotateEnd { .. } => "rotateend",
        }
    }
}

/// Event listener callback type
pub type EventCallback = Box<dyn Fn(&MarkerEvent) + Send + Sync>;

/// Listener registry and queue for marker events.
#[derive(Default)]
pub struct EventManager {
    /// Event listeners by event type
    listeners: HashMap<String, Vec<EventCallback>>,
    /// Event queue for processing
    event_queue: VecDeque<MarkerEvent>,
}

impl EventManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an event listener for `"rotate"` or `"rotateend"`.
    pub fn on<F>(&mut self, event_type: &str, callback: F)
    where
        F: Fn(&MarkerEvent) + Send + Sync + 'static,
    {
        self.listeners
            .entry(event_type.to_string())
            .or_default()
            .push(Box::new(callback));
    }

    /// Emit an event to the queue
    pub fn emit(&mut self, event: MarkerEvent) {
        self.event_queue.push_back(event);
    }

    /// Process all queued events, invoking listeners, and return them
    pub fn process_events(&mut self) -> Vec<MarkerEvent> {
        let events: Vec<_> = self.event_queue.drain(..).collect();

        for event in &events {
            if let Some(callbacks) = self.listeners.get(event.kind()) {
                for callback in callbacks {
                    callback(event);
                }
            }
        }

        events
    }

    /// Get number of pending events
    pub fn pending_events(&self) -> usize {
        self.event_queue.len()
    }
}
