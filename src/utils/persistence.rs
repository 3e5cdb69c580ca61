//! Platform paths and JSON helpers for the config file.

use directories::ProjectDirs;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", "delve")
}

/// `<config dir>/config.json`
pub fn config_path() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().join("config.json"))
}

/// `<data dir>/savegame.txt`
pub fn default_save_path() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.data_dir().join("savegame.txt"))
}

/// Load a JSON file, returning `T::default()` if it is missing or invalid.
pub fn load_json_or_default<T: Default + serde::de::DeserializeOwned>(path: &Path) -> T {
    let json = match fs::read_to_string(path) {
        Ok(json) => json,
        Err(e) => {
            if e.kind() != io::ErrorKind::NotFound {
                log::warn!("could not read {}: {}", path.display(), e);
            }
            return T::default();
        }
    };
    serde_json::from_str(&json).unwrap_or_else(|e| {
        log::warn!("ignoring invalid {}: {}", path.display(), e);
        T::default()
    })
}

/// Save a value as pretty-printed JSON, creating parent directories.
pub fn save_json<T: serde::Serialize>(path: &Path, data: &T) -> io::Result<()> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    let json = serde_json::to_string_pretty(data)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    fs::write(path, json)?;
    Ok(())
}
