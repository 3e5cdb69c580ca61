//! User configuration (`config.json`). Command line flags win over file values.

use crate::core::constants::DEFAULT_MESSAGE_DELAY_MS;
use crate::utils::persistence::{config_path, load_json_or_default, save_json};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Cosmetic pause after timed messages
    pub message_delay_ms: u64,
    pub color: bool,
    /// Overrides the platform save location
    pub save_file: Option<PathBuf>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            message_delay_ms: DEFAULT_MESSAGE_DELAY_MS,
            color: true,
            save_file: None,
        }
    }
}

impl GameConfig {
    /// Reads `path`, or the platform config file when `None`. Missing or
    /// invalid files give the defaults.
    pub fn load(path: Option<&Path>) -> Self {
        if let Some(path) = path {
            return load_json_or_default(path);
        }
        match config_path() {
            Some(path) => Self::load_or_create(&path),
            None => {
                log::warn!("no config directory, using defaults");
                Self::default()
            }
        }
    }

    /// Like `load`, but a missing file is written out with the defaults so
    /// the options can be found and edited.
    pub fn load_or_create(path: &Path) -> Self {
        if path.exists() {
            return load_json_or_default(path);
        }
        let config = Self::default();
        match save_json(path, &config) {
            Ok(()) => log::info!("wrote default config to {}", path.display()),
            Err(e) => log::warn!("could not write {}: {}", path.display(), e),
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{ "color": false }"#).unwrap();

        let config = GameConfig::load(Some(&path));
        assert!(!config.color);
        assert_eq!(config.message_delay_ms, DEFAULT_MESSAGE_DELAY_MS);
        assert_eq!(config.save_file, None);
    }

    #[test]
    fn test_first_run_writes_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("delve").join("config.json");

        let config = GameConfig::load_or_create(&path);
        assert_eq!(config, GameConfig::default());
        assert!(path.exists());

        fs::write(&path, r#"{ "message_delay_ms": 0 }"#).unwrap();
        let config = GameConfig::load_or_create(&path);
        assert_eq!(config.message_delay_ms, 0);
        assert!(config.color);
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = GameConfig::load(Some(&dir.path().join("none.json")));
        assert_eq!(config, GameConfig::default());
    }
}
