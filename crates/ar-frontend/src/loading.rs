//! Asset loading events and the loading indicator

use ar_core::SceneEntity;
use thiserror::Error;

/// Error reported by the asset loader
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LoadError {
    #[error("Failed to fetch {path}: {reason}")]
    Fetch { path: String, reason: String },

    #[error("Failed to parse asset: {0}")]
    Parse(String),
}

/// A model delivered by the asset loader
#[derive(Debug, Clone)]
pub struct LoadedAsset {
    pub entity: SceneEntity,
    /// Animation clip names, default clip first
    pub clips: Vec<String>,
}

/// Notification from the asynchronous asset loader
#[derive(Debug, Clone)]
pub enum AssetEvent {
    Progress { loaded: u64, total: u64 },
    Loaded(LoadedAsset),
    Failed(LoadError),
}

/// Progress overlay shown until the asset arrives
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoadingIndicator {
    visible: bool,
    progress: f32,
}

impl Default for LoadingIndicator {
    fn default() -> Self {
        Self {
            visible: true,
            progress: 0.0,
        }
    }
}

impl LoadingIndicator {
    pub fn visible(&self) -> bool {
        self.visible
    }

    /// Fraction loaded in [0, 1]
    pub fn progress(&self) -> f32 {
        self.progress
    }

    /// Record loader progress; an unknown total leaves the bar unchanged
    pub fn set_progress(&mut self, loaded: u64, total: u64) {
        if total == 0 {
            return;
        }
        self.progress = (loaded as f64 / total as f64).clamp(0.0, 1.0) as f32;
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }
}
