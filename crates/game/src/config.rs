//! Game configuration (window, assets, field, audio). Loaded from config.ron at startup.

use audio::CueVolumes;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Persistent game settings. Loaded from `config.ron` in the current directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Window width in logical pixels.
    #[serde(default = "default_window_width")]
    pub window_width: u32,
    /// Window height in logical pixels.
    #[serde(default = "default_window_height")]
    pub window_height: u32,
    /// Directory holding images and sounds.
    #[serde(default = "default_asset_dir")]
    pub asset_dir: PathBuf,
    /// Play the intro fade before the first descent.
    #[serde(default = "default_true")]
    pub show_intro: bool,
    /// Fixed seed for the asteroid field; random when absent.
    #[serde(default)]
    pub obstacle_seed: Option<u64>,
    #[serde(default = "default_obstacle_count")]
    pub obstacle_count: usize,
    #[serde(default)]
    pub volumes: VolumeConfig,
    #[serde(default = "default_master_volume")]
    pub master_volume: f64,
}

/// Per-cue volumes, 0.0 to 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VolumeConfig {
    pub music: f64,
    pub thrust: f64,
    pub win: f64,
    pub lose: f64,
    pub alert: f64,
}

impl Default for VolumeConfig {
    fn default() -> Self {
        let v = CueVolumes::default();
        Self { music: v.music, thrust: v.thrust, win: v.win, lose: v.lose, alert: v.alert }
    }
}

impl From<VolumeConfig> for CueVolumes {
    fn from(v: VolumeConfig) -> Self {
        Self { music: v.music, thrust: v.thrust, win: v.win, lose: v.lose, alert: v.alert }
    }
}

fn default_window_width() -> u32 {
    800
}
fn default_window_height() -> u32 {
    600
}
fn default_asset_dir() -> PathBuf {
    PathBuf::from("assets")
}
fn default_true() -> bool {
    true
}
fn default_obstacle_count() -> usize {
    2000
}
fn default_master_volume() -> f64 {
    1.0
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            window_width: default_window_width(),
            window_height: default_window_height(),
            asset_dir: default_asset_dir(),
            show_intro: default_true(),
            obstacle_seed: None,
            obstacle_count: default_obstacle_count(),
            volumes: VolumeConfig::default(),
            master_volume: default_master_volume(),
        }
    }
}

impl GameConfig {
    /// Load config from `config.ron`. If the file is missing or invalid, returns default config.
    pub fn load() -> Self {
        Self::load_from(&config_path())
    }

    pub fn load_from(path: &Path) -> Self {
        if let Ok(data) = std::fs::read_to_string(path) {
            match ron::from_str(&data) {
                Ok(c) => return c,
                Err(e) => log::warn!("Invalid config at {:?}: {}, using defaults", path, e),
            }
        }
        Self::default()
    }
}

fn config_path() -> PathBuf {
    std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")).join("config.ron")
}
