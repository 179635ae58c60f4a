//! Persistence model and configuration IO.

use std::fs;
use std::path::PathBuf;

use anyhow::{anyhow, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

/// File name used under the per-user config directory.
const SETTINGS_FILE: &str = "settings.json";

/// Settings persisted to `settings.json`. CLI flags override these per run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    /// How many cows populate the wunderland.
    pub cow_count: u32,
    /// Directory holding backgrounds, overlays, and sprites.
    pub assets_dir: String,
    /// Location override for the weather lookup (None = current IP).
    pub location: Option<String>,
    /// Endpoint of the online sprite service, if one is configured.
    pub sprite_service_url: Option<String>,
    /// Total frame count of the animated export (rounded down to even).
    pub gif_frames: u32,
    /// Per-frame display duration of the animated export, in milliseconds.
    pub frame_delay_ms: u64,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            cow_count: 6,
            assets_dir: "img".to_string(),
            location: None,
            sprite_service_url: None,
            gif_frames: 200,
            frame_delay_ms: 40,
        }
    }
}

/// Build the settings path and ensure the directory exists.
fn settings_path() -> Result<PathBuf> {
    let proj_dirs = ProjectDirs::from("dev", "wunderland", "wunderland")
        .ok_or_else(|| anyhow!("cannot determine config directory"))?;
    let config_dir = proj_dirs.config_dir();
    fs::create_dir_all(config_dir)?;
    Ok(config_dir.join(SETTINGS_FILE))
}

/// Load settings from disk, returning defaults when missing.
pub fn load() -> AppSettings {
    let path = match settings_path() {
        Ok(path) => path,
        Err(_) => return AppSettings::default(),
    };
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(_) => return AppSettings::default(),
    };
    serde_json::from_str(&contents).unwrap_or_default()
}

/// Persist settings to disk as pretty JSON.
pub fn save(settings: &AppSettings) -> Result<()> {
    let path = settings_path()?;
    let contents = serde_json::to_string_pretty(settings)?;
    fs::write(path, contents)?;
    Ok(())
}
