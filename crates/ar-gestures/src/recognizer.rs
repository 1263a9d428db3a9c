//! Touch stream classification
//!
//! ## Usage
//!
//! 1) Forward touch contacts with [`GestureRecognizer::pointer_down`],
//!    [`GestureRecognizer::pointer_move`] and [`GestureRecognizer::pointer_up`].
//! 2) Call [`GestureRecognizer::update`] once per frame so time-based decisions
//!    (press, tap dispatch after the double-tap window) can fire.
//! 3) Every call returns the gestures it recognised, in order.
//!
//! Only one classification is made per touch sequence, which lasts until
//! every finger has lifted. Single-touch gestures are driven by the
//! [`TouchSlot::Primary`] contact; two-touch gestures need both slots. Movement is tested before hold time, so a touch that starts to pan
//! never becomes a press.
//!
//! ## Minimal example
//!
//! ```
//! use ar_gestures::{GestureEvent, GestureRecognizer, TouchSlot};
//! use glam::Vec3;
//!
//! let mut gestures = GestureRecognizer::default();
//! gestures.pointer_down(TouchSlot::Primary, Vec3::ZERO, 0.0);
//! gestures.update(0.06);
//! gestures.pointer_up(TouchSlot::Primary, 0.1);
//!
//! // A single tap is held back until the double-tap window has passed
//! assert!(gestures.update(0.2).is_empty());
//! let events = gestures.update(0.35);
//! assert!(matches!(events[..], [GestureEvent::Tap { .. }]));
//! ```

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::config::GestureConfig;
use crate::event::{GestureEvent, GestureKind, GesturePhase, SwipeDirection};

const EPSILON: f32 = 1e-6;

/// Unsigned angle between two directions, stable near zero
fn angle_between(a: Vec3, b: Vec3) -> f32 {
    a.cross(b).length().atan2(a.dot(b))
}

/// Touch contact slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TouchSlot {
    /// First finger down
    Primary,
    /// Second finger down
    Secondary,
}

impl TouchSlot {
    fn index(self) -> usize {
        match self {
            TouchSlot::Primary => 0,
            TouchSlot::Secondary => 1,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct Touch {
    pressed: bool,
    position: Vec3,
    start_time: f64,
    end_time: f64,
    /// Captured once the touch has settled
    start_position: Option<Vec3>,
}

/// Current classification of the touch sequence
#[derive(Debug, Clone, Copy, PartialEq)]
enum Classification {
    Unknown,
    /// One or more taps waiting for the double-tap window
    Tap,
    Press,
    Swipe,
    Pan { origin: Vec3 },
    Pinch { baseline: f32 },
    Rotate { baseline: Vec3 },
}

impl Classification {
    fn continuous_kind(&self) -> Option<GestureKind> {
        match self {
            Classification::Pan { .. } => Some(GestureKind::Pan),
            Classification::Pinch { .. } => Some(GestureKind::Pinch),
            Classification::Rotate { .. } => Some(GestureKind::Rotate),
            _ => None,
        }
    }
}

/// Classifies a two-slot touch stream into [`GestureEvent`]s
#[derive(Debug, Clone)]
pub struct GestureRecognizer {
    config: GestureConfig,
    touches: [Touch; 2],
    state: Classification,
    /// Set once the current touch sequence has been classified
    classified: bool,
    taps: u32,
    up: Vec3,
}

impl Default for GestureRecognizer {
    fn default() -> Self {
        Self::new(GestureConfig::default())
    }
}

impl GestureRecognizer {
    pub fn new(config: GestureConfig) -> Self {
        Self {
            config,
            touches: [Touch::default(); 2],
            state: Classification::Unknown,
            classified: false,
            taps: 0,
            up: Vec3::Y,
        }
    }

    pub fn config(&self) -> &GestureConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: GestureConfig) {
        self.config = config;
    }

    /// Whether any slot is in contact
    pub fn is_touching(&self) -> bool {
        self.touches.iter().any(|t| t.pressed)
    }

    /// Whether both slots are in contact
    pub fn is_multi_touch(&self) -> bool {
        self.touches.iter().all(|t| t.pressed)
    }

    /// Name of the current classification, for debug overlays
    pub fn debug_state(&self) -> &'static str {
        match self.state {
            Classification::Unknown => "unknown",
            Classification::Tap => "tap",
            Classification::Press => "press",
            Classification::Swipe => "swipe",
            Classification::Pan { .. } => "pan",
            Classification::Pinch { .. } => "pinch",
            Classification::Rotate { .. } => "rotate",
        }
    }

    /// A finger touched down
    ///
    /// A new contact interrupts whatever continuous gesture was running, which
    /// is ended first. Pending taps survive so a second tap can follow.
    pub fn pointer_down(&mut self, slot: TouchSlot, position: Vec3, now: f64) -> Vec<GestureEvent> {
        let mut events = Vec::new();
        if let Some(end) = self.state.continuous_kind().and_then(GestureEvent::end_of) {
            events.push(end);
        }
        if self.state != Classification::Tap {
            self.taps = 0;
        }
        self.state = Classification::Unknown;

        self.touches[slot.index()] = Touch {
            pressed: true,
            position,
            start_time: now,
            end_time: 0.0,
            start_position: None,
        };
        events
    }

    /// A finger moved
    pub fn pointer_move(&mut self, slot: TouchSlot, position: Vec3, now: f64) -> Vec<GestureEvent> {
        let touch = &mut self.touches[slot.index()];
        if !touch.pressed {
            return Vec::new();
        }
        touch.position = position;

        self.settle(now);
        let mut events = Vec::new();
        match self.continue_gesture() {
            Some(event) => events.push(event),
            None => self.classify(now, &mut events),
        }
        events
    }

    /// A finger lifted
    pub fn pointer_up(&mut self, slot: TouchSlot, now: f64) -> Vec<GestureEvent> {
        let index = slot.index();
        if !self.touches[index].pressed {
            return Vec::new();
        }
        self.touches[index].end_time = now;

        let mut events = Vec::new();
        match self.state {
            Classification::Swipe => {
                if let Some(event) = self.swipe_event(now) {
                    events.push(event);
                }
                self.state = Classification::Unknown;
            }
            Classification::Pan { .. } | Classification::Pinch { .. } | Classification::Rotate { .. } => {
                if let Some(end) = self.state.continuous_kind().and_then(GestureEvent::end_of) {
                    events.push(end);
                }
                self.state = Classification::Unknown;
            }
            Classification::Press => self.state = Classification::Unknown,
            Classification::Unknown | Classification::Tap => {
                let held = now - self.touches[index].start_time;
                let counts_as_tap = !self.classified
                    && slot == TouchSlot::Primary
                    && held < self.config.tap_max_duration;
                if counts_as_tap {
                    self.state = Classification::Tap;
                    self.taps += 1;
                }
            }
        }

        let touch = &mut self.touches[index];
        touch.pressed = false;
        touch.start_position = None;
        if !self.is_touching() {
            self.classified = false;
        }
        events
    }

    /// Advance timers without new input
    pub fn update(&mut self, now: f64) -> Vec<GestureEvent> {
        self.settle(now);

        let mut events = Vec::new();
        let primary = self.touches[0];
        if !primary.pressed
            && self.state == Classification::Tap
            && now - primary.end_time > self.config.double_tap_window
        {
            let position = primary.position;
            events.push(if self.taps >= 2 {
                GestureEvent::DoubleTap { position }
            } else {
                GestureEvent::Tap { position }
            });
            self.state = Classification::Unknown;
            self.taps = 0;
        }

        self.classify(now, &mut events);
        events
    }

    /// Capture start positions of touches that have been down long enough
    fn settle(&mut self, now: f64) {
        let settle_time = self.config.settle_time;
        for touch in &mut self.touches {
            if touch.pressed
                && touch.start_position.is_none()
                && now - touch.start_time > settle_time
            {
                touch.start_position = Some(touch.position);
            }
        }
    }

    fn classify(&mut self, now: f64, events: &mut Vec<GestureEvent>) {
        if self.state != Classification::Unknown || self.classified || !self.is_touching() {
            return;
        }
        let [primary, secondary] = self.touches;
        let Some(primary_start) = primary.start_position else {
            return;
        };

        if self.is_multi_touch() {
            if let Some(secondary_start) = secondary.start_position {
                self.classify_two_touch(primary_start, secondary_start, events);
            }
            return;
        }

        if !primary.pressed {
            return;
        }
        let offset = primary.position - primary_start;
        let dist = offset.length();
        let elapsed = (now - primary.start_time).max(f64::EPSILON) as f32;
        let velocity = dist / elapsed;

        if dist > self.config.swipe_min_distance && velocity > self.config.swipe_min_velocity {
            let vertical = offset.y.abs() > offset.x.abs() && offset.y.abs() > offset.z.abs();
            if vertical {
                self.enter(Classification::Swipe);
            }
        } else if dist > self.config.pan_min_distance && velocity < self.config.pan_max_velocity {
            self.enter(Classification::Pan {
                origin: primary.position,
            });
            events.push(GestureEvent::Pan {
                phase: GesturePhase::Start,
                delta: Vec3::ZERO,
            });
        } else if dist <= self.config.pan_min_distance
            && now - primary.start_time > self.config.press_min_duration
        {
            self.enter(Classification::Press);
            events.push(GestureEvent::Press {
                position: primary.position,
            });
        }
    }

    fn classify_two_touch(&mut self, primary_start: Vec3, secondary_start: Vec3, events: &mut Vec<GestureEvent>) {
        let [primary, secondary] = self.touches;
        let start_distance = primary_start.distance(secondary_start);
        let current_distance = primary.position.distance(secondary.position);

        if (current_distance - start_distance).abs() > self.config.pinch_threshold {
            self.enter(Classification::Pinch {
                baseline: current_distance,
            });
            events.push(GestureEvent::Pinch {
                phase: GesturePhase::Start,
                scale: 1.0,
                delta: 0.0,
            });
            return;
        }

        let start_dir = (secondary_start - primary_start).normalize_or_zero();
        let current_dir = (secondary.position - primary.position).normalize_or_zero();
        if start_dir == Vec3::ZERO || current_dir == Vec3::ZERO {
            return;
        }
        if angle_between(start_dir, current_dir) > self.config.rotate_threshold {
            self.enter(Classification::Rotate {
                baseline: current_dir,
            });
            events.push(GestureEvent::Rotate {
                phase: GesturePhase::Start,
                theta: 0.0,
            });
        }
    }

    fn enter(&mut self, state: Classification) {
        self.state = state;
        self.classified = true;
        tracing::debug!("Touch sequence classified as {}", self.debug_state());
    }

    /// Update sample for the running continuous gesture
    fn continue_gesture(&self) -> Option<GestureEvent> {
        let [primary, secondary] = self.touches;
        match self.state {
            Classification::Pan { origin } => Some(GestureEvent::Pan {
                phase: GesturePhase::Update,
                delta: primary.position - origin,
            }),
            Classification::Pinch { baseline } => {
                let current = primary.position.distance(secondary.position);
                let scale = if baseline > EPSILON { current / baseline } else { 1.0 };
                Some(GestureEvent::Pinch {
                    phase: GesturePhase::Update,
                    scale,
                    delta: current - baseline,
                })
            }
            Classification::Rotate { baseline } => {
                let current = (secondary.position - primary.position).normalize_or_zero();
                if current == Vec3::ZERO {
                    return None;
                }
                let mut theta = angle_between(baseline, current);
                if self.up.dot(baseline.cross(current)) > 0.0 {
                    theta = -theta;
                }
                Some(GestureEvent::Rotate {
                    phase: GesturePhase::Update,
                    theta,
                })
            }
            _ => None,
        }
    }

    fn swipe_event(&self, now: f64) -> Option<GestureEvent> {
        let primary = self.touches[0];
        let start = primary.start_position?;
        let direction = if primary.position.y < start.y {
            SwipeDirection::Down
        } else {
            SwipeDirection::Up
        };
        let elapsed = (now - primary.start_time).max(f64::EPSILON) as f32;
        Some(GestureEvent::Swipe {
            direction,
            velocity: primary.position.distance(start) / elapsed,
        })
    }
}
