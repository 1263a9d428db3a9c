//! Application configuration module
//!
//! This module handles application-wide configuration including placement
//! behaviour, gesture thresholds and tracking settings.

mod manager;

pub use manager::{ConfigError, ConfigManager, SharedConfig, create_shared_config};

use ar_core::ReferenceSpaceKind;
use ar_gestures::GestureConfig;
use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Placement preferences
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PlacementConfig {
    /// Offset from the surface pose to the placed object's origin
    pub offset: [f32; 3],
    /// Multiplier applied to pan deltas
    pub pan_sensitivity: f32,
    /// Uniform scale applied to the object when it loads
    pub initial_scale: f32,
}

impl PlacementConfig {
    pub fn offset(&self) -> Vec3 {
        Vec3::from(self.offset)
    }
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            offset: [0.0, -0.3, -0.5],
            pan_sensitivity: 3.0,
            initial_scale: 0.003,
        }
    }
}

/// Hit-test settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct TrackingConfig {
    /// Reference space the hit-test source casts from
    pub hit_test_space: ReferenceSpaceKind,
}

/// Asset settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AssetConfig {
    /// Path of the model to place
    pub model_path: String,
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self {
            model_path: "assets/sandwich.glb".to_string(),
        }
    }
}

/// Complete application configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct AppConfig {
    /// Configuration format version
    #[serde(default)]
    pub version: u32,
    /// Placement settings
    #[serde(default)]
    pub placement: PlacementConfig,
    /// Gesture thresholds
    #[serde(default)]
    pub gestures: GestureConfig,
    /// Tracking settings
    #[serde(default)]
    pub tracking: TrackingConfig,
    /// Asset settings
    #[serde(default)]
    pub asset: AssetConfig,
}

impl AppConfig {
    /// Current configuration version
    pub const CURRENT_VERSION: u32 = 1;

    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self {
            version: Self::CURRENT_VERSION,
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_file_fills_defaults() {
        let config: AppConfig =
            ron::from_str("(version: 1, placement: (pan_sensitivity: 5.0))").unwrap();

        assert_eq!(config.placement.pan_sensitivity, 5.0);
        assert_eq!(config.placement.offset(), Vec3::new(0.0, -0.3, -0.5));
        assert_eq!(config.gestures, GestureConfig::default());
        assert_eq!(config.tracking.hit_test_space, ReferenceSpaceKind::Viewer);
    }
}
