//! AR Placement Gestures
//!
//! Multi-touch gesture recognition for manipulating a placed object:
//! - [`GestureRecognizer`]: classifies touch contacts into tap, double-tap,
//!   press, pan, swipe, pinch and rotate
//! - [`GestureEvent`]: the recognised gesture and its payload
//! - [`GestureBus`]: per-kind listener fan-out in subscription order
//! - [`GestureConfig`]: classification thresholds

pub mod bus;
pub mod config;
pub mod event;
pub mod recognizer;

pub use bus::{GestureBus, GestureHandler, ListenerId};
pub use config::GestureConfig;
pub use event::{GestureEvent, GestureKind, GesturePhase, SwipeDirection};
pub use recognizer::{GestureRecognizer, TouchSlot};
