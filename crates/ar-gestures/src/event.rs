//! Gesture event vocabulary

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Name under which listeners subscribe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GestureKind {
    Tap,
    DoubleTap,
    Press,
    Pan,
    Swipe,
    Pinch,
    Rotate,
}

impl GestureKind {
    pub const ALL: [GestureKind; 7] = [
        GestureKind::Tap,
        GestureKind::DoubleTap,
        GestureKind::Press,
        GestureKind::Pan,
        GestureKind::Swipe,
        GestureKind::Pinch,
        GestureKind::Rotate,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            GestureKind::Tap => "tap",
            GestureKind::DoubleTap => "doubletap",
            GestureKind::Press => "press",
            GestureKind::Pan => "pan",
            GestureKind::Swipe => "swipe",
            GestureKind::Pinch => "pinch",
            GestureKind::Rotate => "rotate",
        }
    }

    /// Whether this kind streams start/update/end samples
    pub fn is_continuous(&self) -> bool {
        matches!(self, GestureKind::Pan | GestureKind::Pinch | GestureKind::Rotate)
    }
}

/// Sample position within a continuous gesture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GesturePhase {
    /// First sample; carries the `initialise` flag
    Start,
    Update,
    /// Contact ended; baselines should be discarded
    End,
}

/// Vertical direction of a swipe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SwipeDirection {
    Up,
    Down,
}

/// A recognised gesture with its payload
///
/// Positions and deltas are world-space, as projected by the host.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureEvent {
    Tap {
        position: Vec3,
    },
    DoubleTap {
        position: Vec3,
    },
    Press {
        position: Vec3,
    },
    /// `delta` is cumulative since the gesture started
    Pan {
        phase: GesturePhase,
        delta: Vec3,
    },
    Swipe {
        direction: SwipeDirection,
        velocity: f32,
    },
    /// `scale` is the ratio of current to initial finger distance, `delta`
    /// their difference
    Pinch {
        phase: GesturePhase,
        scale: f32,
        delta: f32,
    },
    /// `theta` is the signed angle since the gesture started, in radians
    Rotate {
        phase: GesturePhase,
        theta: f32,
    },
}

impl GestureEvent {
    pub fn kind(&self) -> GestureKind {
        match self {
            GestureEvent::Tap { .. } => GestureKind::Tap,
            GestureEvent::DoubleTap { .. } => GestureKind::DoubleTap,
            GestureEvent::Press { .. } => GestureKind::Press,
            GestureEvent::Pan { .. } => GestureKind::Pan,
            GestureEvent::Swipe { .. } => GestureKind::Swipe,
            GestureEvent::Pinch { .. } => GestureKind::Pinch,
            GestureEvent::Rotate { .. } => GestureKind::Rotate,
        }
    }

    /// Phase of a continuous gesture sample, `None` for discrete gestures
    pub fn phase(&self) -> Option<GesturePhase> {
        match self {
            GestureEvent::Pan { phase, .. }
            | GestureEvent::Pinch { phase, .. }
            | GestureEvent::Rotate { phase, .. } => Some(*phase),
            _ => None,
        }
    }

    /// True for the first sample of a continuous gesture
    pub fn is_initialise(&self) -> bool {
        self.phase() == Some(GesturePhase::Start)
    }

    pub(crate) fn end_of(kind: GestureKind) -> Option<Self> {
        let phase = GesturePhase::End;
        match kind {
            GestureKind::Pan => Some(GestureEvent::Pan {
                phase,
                delta: Vec3::ZERO,
            }),
            GestureKind::Pinch => Some(GestureEvent::Pinch {
                phase,
                scale: 1.0,
                delta: 0.0,
            }),
            GestureKind::Rotate => Some(GestureEvent::Rotate { phase, theta: 0.0 }),
            _ => None,
        }
    }
}
