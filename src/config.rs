//! Static game configuration
//!
//! Every field has a default matching the canonical game, so a config file only
//! needs to name what it overrides.

use std::path::{Path, PathBuf};
use std::time::Duration;

use color_eyre::eyre::{Result, WrapErr, ensure};
use serde::{Deserialize, Serialize};

use crate::geometry::Size;

pub const SCREEN_WIDTH: u32 = 713;
pub const SCREEN_HEIGHT: u32 = 950;
pub const TICK_RATE: u32 = 60;
/// Ticks between two meteorite spawns
pub const SPAWN_INTERVAL: u32 = 30;
/// How long a key stays held after a press on terminals without release events
pub const KEY_HOLD_TICKS: u32 = 8;

/// Locations of the bitmaps loaded at startup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetPaths {
    pub starship: PathBuf,
    pub meteorite: PathBuf,
    pub background: PathBuf,
}

impl Default for AssetPaths {
    fn default() -> Self {
        Self {
            starship: PathBuf::from("assets/starship.png"),
            meteorite: PathBuf::from("assets/meteorite.png"),
            background: PathBuf::from("assets/background.png"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub screen_width: u32,
    pub screen_height: u32,
    /// Ticks per second the main loop is capped at
    pub tick_rate: u32,
    pub spawn_interval: u32,
    /// Fixed meteorite hitbox as `[width, height]`; the bitmap size when unset
    pub hazard_size: Option<[u32; 2]>,
    pub key_hold_ticks: u32,
    pub assets: AssetPaths,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,
            tick_rate: TICK_RATE,
            spawn_interval: SPAWN_INTERVAL,
            hazard_size: None,
            key_hold_ticks: KEY_HOLD_TICKS,
            assets: AssetPaths::default(),
        }
    }
}

impl GameConfig {
    /// Reads a JSON config file, falling back to defaults for missing fields
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .wrap_err_with(|| format!("failed to read config file {}", path.display()))?;
        let config = Self::from_json(&text)
            .wrap_err_with(|| format!("invalid config file {}", path.display()))?;
        Ok(config)
    }

    pub fn from_json(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads `path` when given, otherwise the built-in defaults
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.screen_width > 0 && self.screen_height > 0,
            "screen size must be non-zero, got {}x{}",
            self.screen_width,
            self.screen_height
        );
        ensure!(self.tick_rate > 0, "tick_rate must be non-zero");
        ensure!(self.spawn_interval > 0, "spawn_interval must be non-zero");
        ensure!(self.key_hold_ticks > 0, "key_hold_ticks must be non-zero");
        if let Some([width, height]) = self.hazard_size {
            ensure!(
                width > 0 && height > 0,
                "hazard_size must be non-zero, got {}x{}",
                width,
                height
            );
        }
        Ok(())
    }

    pub fn field(&self) -> Size {
        Size::new(self.screen_width as f32, self.screen_height as f32)
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_secs(1) / self.tick_rate
    }

    pub fn fixed_hazard_size(&self) -> Option<Size> {
        self.hazard_size
            .map(|[width, height]| Size::new(width as f32, height as f32))
    }
}
