//! Recognition thresholds

use serde::{Deserialize, Serialize};

/// Timing and distance thresholds for gesture classification
///
/// Durations are seconds, distances world units (metres), velocities
/// world units per second, angles radians.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GestureConfig {
    /// Time a touch must be down before its start position is captured
    pub settle_time: f64,
    /// Longest contact that still counts as a tap
    pub tap_max_duration: f64,
    /// Quiet time after a tap before it is dispatched
    pub double_tap_window: f64,
    /// Hold time after which a stationary touch is a press
    pub press_min_duration: f64,
    pub swipe_min_distance: f32,
    pub swipe_min_velocity: f32,
    pub pan_min_distance: f32,
    pub pan_max_velocity: f32,
    /// Change in finger distance that starts a pinch
    pub pinch_threshold: f32,
    /// Change in finger angle that starts a rotate
    pub rotate_threshold: f32,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            settle_time: 0.05,
            tap_max_duration: 0.2,
            double_tap_window: 0.2,
            press_min_duration: 0.4,
            swipe_min_distance: 0.01,
            swipe_min_velocity: 0.1,
            pan_min_distance: 0.006,
            pan_max_velocity: 0.03,
            pinch_threshold: 0.01,
            rotate_threshold: 0.2,
        }
    }
}
