pub mod controller;
pub mod events;

pub use controller::{ControllerState, DragUpdate, OrientationController};
pub use events::{EventManager, MarkerEvent, PointerEvent, TouchPoint};
