//! Game settings and preferences
//!
//! Loaded from an optional JSON file; every field has a default so partial
//! files are accepted.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::consts::*;
use crate::error::ConfigError;

/// Session settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Arena ===
    /// Frame width in pixels
    pub width: u32,
    /// Frame height in pixels
    pub height: u32,
    /// Simulation ticks per second (frame pacing target)
    pub ticks_per_second: u32,
    /// Run seed; taken from the clock when absent
    pub seed: Option<u64>,

    // === Gameplay ===
    /// Max wall-clock gap between slices that keeps a combo alive
    pub combo_timeout_secs: f64,

    // === Visual Effects ===
    /// Slice particle bursts
    pub particles: bool,
    /// Red flash when a bomb is sliced
    pub bomb_flash: bool,
    /// Blade trail behind the pointer
    pub blade_trail: bool,
    /// Size placeholder discs by hit radius instead of the fixed radius
    pub fallback_matches_hitbox: bool,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    pub muted: bool,

    // === Accessibility ===
    /// Reduced motion (suppresses flashes)
    pub reduced_motion: bool,

    /// Optional species catalog file (defaults to the built-in catalog)
    pub catalog_path: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            width: WIDTH,
            height: HEIGHT,
            ticks_per_second: TICKS_PER_SECOND,
            seed: None,

            combo_timeout_secs: COMBO_TIMEOUT_SECS,

            // Visual effects - all on by default
            particles: true,
            bomb_flash: true,
            blade_trail: true,
            fallback_matches_hitbox: false,

            // Audio
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,

            // Accessibility
            reduced_motion: false,

            catalog_path: None,
        }
    }
}

impl Settings {
    /// Effective bomb flash (respects reduced_motion)
    pub fn effective_bomb_flash(&self) -> bool {
        self.bomb_flash && !self.reduced_motion
    }

    /// Parse settings from JSON and validate them
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Read a settings JSON file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Read a settings file, falling back to defaults on any failure
    pub fn load_or_default(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            log::info!("Using default settings");
            return Self::default();
        };
        match Self::load(path) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("{e}; using default settings");
                Self::default()
            }
        }
    }

    /// Load the configured catalog, or the built-in one
    pub fn catalog(&self) -> Result<Catalog, ConfigError> {
        match &self.catalog_path {
            Some(path) => Catalog::load(path),
            None => Ok(Catalog::default()),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::Invalid(format!(
                "arena must be non-empty, got {}x{}",
                self.width, self.height
            )));
        }
        if self.width <= 2 * SPAWN_MARGIN {
            return Err(ConfigError::Invalid(format!(
                "arena width {} leaves no room between spawn margins",
                self.width
            )));
        }
        if self.ticks_per_second == 0 {
            return Err(ConfigError::Invalid("ticks_per_second must be > 0".into()));
        }
        if !(self.combo_timeout_secs > 0.0) {
            return Err(ConfigError::Invalid(
                "combo_timeout_secs must be positive".into(),
            ));
        }
        Ok(())
    }
}
