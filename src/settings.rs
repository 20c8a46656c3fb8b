//! Dashboard settings persistence.
//!
//! This module handles loading and saving dashboard preferences across runs.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Dashboard settings that persist across runs
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct DashboardSettings {
    /// Settings file version for migration support
    #[serde(default = "default_version")]
    pub version: u32,
    /// Page title
    #[serde(default = "default_title")]
    pub title: String,
    /// Browser refresh interval in seconds, 0 disables refresh
    #[serde(default = "default_refresh_secs")]
    pub refresh_secs: u32,
    /// Logo shown in the page header
    #[serde(default)]
    pub logo: Option<String>,
}

fn default_version() -> u32 {
    1
}

fn default_title() -> String {
    "Data Viewing Dashboard".to_string()
}

fn default_refresh_secs() -> u32 {
    3
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            version: default_version(),
            title: default_title(),
            refresh_secs: default_refresh_secs(),
            logo: None,
        }
    }
}

impl DashboardSettings {
    /// Get the config directory path for roomwatch
    pub fn get_config_dir() -> Option<PathBuf> {
        #[cfg(target_os = "macos")]
        {
            dirs::data_dir().map(|p| p.join("roomwatch"))
        }
        #[cfg(not(target_os = "macos"))]
        {
            dirs::config_dir().map(|p| p.join("roomwatch"))
        }
    }

    /// Get the path to the settings JSON file
    pub fn get_settings_path() -> Option<PathBuf> {
        Self::get_config_dir().map(|p| p.join("settings.json"))
    }

    /// Load settings from the default location
    pub fn load() -> Self {
        match Self::get_settings_path() {
            Some(path) => Self::load_from(&path),
            None => Self::default(),
        }
    }

    /// Load settings from `path`, falling back to defaults when the file is
    /// missing or unreadable
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
                tracing::warn!("Ignoring invalid settings file {}: {}", path.display(), e);
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    /// Save settings to the default location
    pub fn save(&self) -> Result<(), String> {
        let path = Self::get_settings_path()
            .ok_or_else(|| "Could not determine config directory".to_string())?;
        self.save_to(&path)
    }

    /// Save settings to `path`
    pub fn save_to(&self, path: &Path) -> Result<(), String> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create config directory: {}", e))?;
        }

        let content = serde_json::to_string_pretty(self)
            .map_err(|e| format!("Failed to serialize settings: {}", e))?;

        std::fs::write(path, content)
            .map_err(|e| format!("Failed to write settings file: {}", e))?;

        Ok(())
    }
}
