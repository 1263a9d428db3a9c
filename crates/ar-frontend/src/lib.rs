//! AR Placement Frontend
//!
//! Places a single virtual object on a detected real-world surface and lets
//! touch gestures move, scale, rotate and remove it.

pub mod app;
pub mod config;
pub mod loading;
pub mod placement;
pub mod replay;

pub use app::{ArApp, Stage};
pub use config::{AppConfig, ConfigManager};
pub use loading::{AssetEvent, LoadError, LoadedAsset, LoadingIndicator};
pub use placement::{GestureSnapshots, PlacementController, PlacementState};
pub use replay::{ReplayError, ReplayScript, ReplayStep, replay};
