//! Application settings

use std::io;
use std::path::{Path, PathBuf};

use menu_core::MenuConfig;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::ConsoleError;

/// Directory name under the user's config directory
const APP_DIR: &str = "climenu";

/// Settings file name
const SETTINGS_FILE: &str = "settings.json";

/// Application settings
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Settings {
    /// Serial port path; empty picks the first port found
    #[serde(default)]
    pub port: String,
    /// Menu timing and heartbeat
    #[serde(default)]
    pub menu: MenuConfig,
}

impl Settings {
    /// `$XDG_CONFIG_HOME/climenu`, else `~/.config/climenu`
    fn config_dir() -> Option<PathBuf> {
        std::env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .filter(|p| p.is_absolute())
            .or_else(|| dirs::home_dir().map(|h| h.join(".config")))
            .map(|base| base.join(APP_DIR))
    }

    /// Full path of the settings file
    pub fn settings_path() -> Option<PathBuf> {
        Self::config_dir().map(|p| p.join(SETTINGS_FILE))
    }

    /// Load settings from the standard location
    pub fn load() -> Self {
        Self::settings_path()
            .map(|path| Self::load_from(&path))
            .unwrap_or_default()
    }

    /// Load settings from `path`
    ///
    /// A missing file gives the defaults quietly. A file that cannot be read
    /// or parsed also gives the defaults, with a warning naming the problem.
    pub fn load_from(path: &Path) -> Self {
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("No settings at {}, using defaults", path.display());
                return Self::default();
            }
            Err(e) => {
                warn!("Cannot read {}: {}; using defaults", path.display(), e);
                return Self::default();
            }
        };

        match serde_json::from_str(&json) {
            Ok(settings) => settings,
            Err(e) => {
                warn!("Ignoring malformed {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Save settings to the standard location
    pub fn save(&self) -> Result<(), ConsoleError> {
        let path = Self::settings_path().ok_or_else(|| ConsoleError::Settings {
            path: SETTINGS_FILE.into(),
            reason: "no home or config directory".into(),
        })?;
        self.save_to(&path)
    }

    /// Write settings to `path` as pretty JSON, creating parent directories
    pub fn save_to(&self, path: &Path) -> Result<(), ConsoleError> {
        let failed = |reason: String| ConsoleError::Settings {
            path: path.display().to_string(),
            reason,
        };

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| failed(e.to_string()))?;
        }
        let json = serde_json::to_string_pretty(self).map_err(|e| failed(e.to_string()))?;
        std::fs::write(path, json).map_err(|e| failed(e.to_string()))?;

        info!("Saved settings to {}", path.display());
        Ok(())
    }
}
