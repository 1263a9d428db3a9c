//! On-disk persistence for [`AppConfig`]

use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::RwLock;
use ron::ser::PrettyConfig;
use thiserror::Error;

use super::AppConfig;

/// [`ConfigManager`] behind a lock, for sharing with host callbacks
pub type SharedConfig = Arc<RwLock<ConfigManager>>;

#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(String),
    /// Writing RON failed
    #[error("Serialization error: {0}")]
    Serialize(String),
    /// The file exists but is not a valid config
    #[error("Deserialization error: {0}")]
    Deserialize(String),
}

/// Owns the active [`AppConfig`] and the file it persists to
///
/// Edits through [`ConfigManager::config_mut`] are only written back on
/// [`ConfigManager::save`].
pub struct ConfigManager {
    config: AppConfig,
    config_path: PathBuf,
    dirty: bool,
}

impl ConfigManager {
    /// Manager for `ar-place/config.ron` under the platform config directory
    pub fn new() -> Self {
        let dir = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        Self::with_path(dir.join("ar-place").join("config.ron"))
    }

    /// Manager for an explicit file
    ///
    /// A missing file yields defaults; an unreadable one yields defaults and
    /// a warning.
    pub fn with_path(config_path: PathBuf) -> Self {
        let config = Self::read(&config_path).unwrap_or_else(|e| {
            tracing::warn!("Ignoring config at {:?}: {}", config_path, e);
            None
        });
        let config = config.unwrap_or_else(|| {
            tracing::info!("Using default configuration");
            AppConfig::new()
        });

        Self {
            config,
            config_path,
            dirty: false,
        }
    }

    fn read(path: &Path) -> Result<Option<AppConfig>, ConfigError> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(ConfigError::Io(e.to_string())),
        };
        let config: AppConfig =
            ron::from_str(&content).map_err(|e| ConfigError::Deserialize(e.to_string()))?;
        if config.version != AppConfig::CURRENT_VERSION {
            tracing::debug!(
                "Config version {} differs from {}, missing fields use defaults",
                config.version,
                AppConfig::CURRENT_VERSION
            );
        }
        tracing::info!("Loaded config from {:?}", path);
        Ok(Some(config))
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Mutable access; the manager is marked dirty
    pub fn config_mut(&mut self) -> &mut AppConfig {
        self.dirty = true;
        &mut self.config
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Write pending edits as pretty RON, creating the directory if needed
    pub fn save(&mut self) -> Result<(), ConfigError> {
        if !self.dirty {
            return Ok(());
        }

        let text = ron::ser::to_string_pretty(&self.config, PrettyConfig::default())
            .map_err(|e| ConfigError::Serialize(e.to_string()))?;
        if let Some(dir) = self.config_path.parent() {
            std::fs::create_dir_all(dir).map_err(|e| ConfigError::Io(e.to_string()))?;
        }
        std::fs::write(&self.config_path, text).map_err(|e| ConfigError::Io(e.to_string()))?;

        self.dirty = false;
        tracing::info!("Wrote config to {:?}", self.config_path);
        Ok(())
    }

    /// Replace every setting with its default; persisted on the next save
    pub fn reset_to_defaults(&mut self) {
        self.config = AppConfig::new();
        self.dirty = true;
    }

    pub fn config_file_path(&self) -> &Path {
        &self.config_path
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

pub fn create_shared_config() -> SharedConfig {
    Arc::new(RwLock::new(ConfigManager::new()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_path() -> PathBuf {
        std::env::temp_dir()
            .join(format!("ar-place-{}", uuid::Uuid::new_v4()))
            .join("config.ron")
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let manager = ConfigManager::with_path(scratch_path());
        assert_eq!(manager.config(), &AppConfig::new());
        assert!(!manager.is_dirty());
    }

    #[test]
    fn test_save_and_reload() {
        let path = scratch_path();
        let mut manager = ConfigManager::with_path(path.clone());
        manager.config_mut().placement.pan_sensitivity = 1.5;
        manager.config_mut().gestures.press_min_duration = 0.8;
        manager.save().unwrap();
        assert!(!manager.is_dirty());

        let reloaded = ConfigManager::with_path(path.clone());
        assert_eq!(reloaded.config().placement.pan_sensitivity, 1.5);
        assert_eq!(reloaded.config().gestures.press_min_duration, 0.8);

        if let Some(dir) = path.parent() {
            let _ = std::fs::remove_dir_all(dir);
        }
    }

    #[test]
    fn test_unparsable_file_falls_back_to_defaults() {
        let path = scratch_path();
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir).unwrap();
        }
        std::fs::write(&path, "not ron at all (").unwrap();

        let manager = ConfigManager::with_path(path.clone());
        assert_eq!(manager.config(), &AppConfig::new());

        if let Some(dir) = path.parent() {
            let _ = std::fs::remove_dir_all(dir);
        }
    }

    #[test]
    fn test_reset_marks_dirty() {
        let mut manager = ConfigManager::with_path(scratch_path());
        manager.reset_to_defaults();
        assert!(manager.is_dirty());
    }

    #[test]
    fn test_shared_config_tracks_edits() {
        let shared = create_shared_config();
        shared.write().config_mut().placement.pan_sensitivity = 2.0;
        assert!(shared.read().is_dirty());
    }
}
