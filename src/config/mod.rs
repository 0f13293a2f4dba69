// SPDX-License-Identifier: MPL-2.0
//! This module handles the application's configuration, including loading and saving
//! user preferences to a `settings.toml` file.
//!
//! # Examples
//!
//! ```no_run
//! use pinview::config::{self, Config};
//!
//! let mut config = config::load().unwrap_or_default();
//! config.topmost = Some(true);
//! config::save(&config).expect("Failed to save config");
//! ```

mod defaults;

pub use defaults::*;

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "settings.toml";
const APP_NAME: &str = "PinView";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Start with the window pinned above all others.
    #[serde(default)]
    pub topmost: Option<bool>,
    #[serde(default)]
    pub loop_video: Option<bool>,
    #[serde(default)]
    pub frame_interval_ms: Option<u32>,
    #[serde(default)]
    pub playback_speed: Option<f64>,
    #[serde(default)]
    pub chrome_hide_delay_ms: Option<u64>,
    #[serde(default)]
    pub chrome_initial_delay_ms: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            topmost: Some(DEFAULT_TOPMOST),
            loop_video: Some(DEFAULT_LOOP_VIDEO),
            frame_interval_ms: Some(DEFAULT_FRAME_INTERVAL_MS),
            playback_speed: Some(DEFAULT_PLAYBACK_SPEED),
            chrome_hide_delay_ms: Some(DEFAULT_CHROME_HIDE_DELAY_MS),
            chrome_initial_delay_ms: Some(DEFAULT_CHROME_INITIAL_DELAY_MS),
        }
    }
}

/// Returns the platform settings path (`<config dir>/PinView/settings.toml`).
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|mut path| {
        path.push(APP_NAME);
        path.push(CONFIG_FILE);
        path
    })
}

pub fn load() -> Result<Config> {
    if let Some(path) = default_config_path() {
        if path.exists() {
            return load_from_path(&path);
        }
    }
    Ok(Config::default())
}

pub fn save(config: &Config) -> Result<()> {
    if let Some(path) = default_config_path() {
        return save_to_path(config, &path);
    }
    Ok(())
}

/// Loads a configuration file. Unparseable content yields the defaults.
pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    match toml::from_str(&content) {
        Ok(config) => Ok(config),
        Err(err) => {
            tracing::warn!("Ignoring invalid settings file {:?}: {}", path, err);
            Ok(Config::default())
        }
    }
}

pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config)?;
    fs::write(path, content)?;
    Ok(())
}
