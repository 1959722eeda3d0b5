//=========================================================================
// Game Configuration
//=========================================================================
//
// Centralized settings loaded from `spot_diff.toml`.
//
// Every section falls back to the built-in level when a key is absent,
// so an empty file (or no file) yields the stock game.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

//=== Internal Dependencies ===============================================

use crate::core::scene::Point;
use crate::error::ConfigError;

/// File name looked up in the working directory by [`GameConfig::load_or_default`].
pub const DEFAULT_CONFIG_FILE: &str = "spot_diff.toml";

//=== GameConfig ==========================================================

/// Root configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct GameConfig {
    pub window: WindowConfig,
    pub engine: EngineConfig,
    pub assets: AssetConfig,
    pub level: LevelConfig,
    pub share: ShareConfig,
}

/// Window and stage dimensions (logical pixels).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

/// Core loop pacing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Ticks per second. Also the assumed frame rate for the game timer.
    pub tps: f64,
    /// Platform → core channel capacity.
    pub channel_capacity: usize,
}

/// Asset locations, relative to `root`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetConfig {
    pub root: PathBuf,
    pub sample_image: PathBuf,
    pub puzzle_image: PathBuf,
    pub hit_sound: PathBuf,
    pub clear_sound: PathBuf,
}

/// The single level: where the differences are and how they look.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelConfig {
    /// Ordered difference centers as `[x, y]`.
    pub regions: Vec<[f32; 2]>,
    /// Side length of each square capture zone.
    pub hit_size: f32,
    /// Radius of the found marker ring.
    pub marker_radius: f32,
    pub sample_image_pos: [f32; 2],
    pub puzzle_image_pos: [f32; 2],
}

/// Share intent endpoint and the canonical game URL carried in the payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShareConfig {
    pub intent_url: String,
    pub game_url: String,
}

//--- Defaults ------------------------------------------------------------

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Spot the Difference".to_string(),
            width: 400,
            height: 600,
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            tps: 60.0,
            channel_capacity: 128,
        }
    }
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("assets"),
            sample_image: PathBuf::from("image/1.png"),
            puzzle_image: PathBuf::from("image/2.png"),
            hit_sound: PathBuf::from("sound/hit.mp3"),
            clear_sound: PathBuf::from("sound/crear.mp3"),
        }
    }
}

impl Default for LevelConfig {
    fn default() -> Self {
        Self {
            regions: vec![[104.0, 394.0], [110.0, 425.0], [270.0, 405.0]],
            hit_size: 30.0,
            marker_radius: 20.0,
            sample_image_pos: [50.0, 70.0],
            puzzle_image_pos: [50.0, 350.0],
        }
    }
}

impl Default for ShareConfig {
    fn default() -> Self {
        Self {
            intent_url: "http://twitter.com/intent/tweet".to_string(),
            game_url: "https://machigae-game.web.app/".to_string(),
        }
    }
}

//--- Loading -------------------------------------------------------------

impl GameConfig {
    /// Parses configuration from a TOML string.
    pub fn from_toml_str(content: &str, origin: &Path) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content).map_err(|source| ConfigError::Parse {
            path: origin.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Loads and validates configuration from a TOML file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_toml_str(&content, path)
    }

    /// Loads `spot_diff.toml` from the working directory, or the defaults
    /// if no such file exists. A file that exists but is broken is an error.
    pub fn load_or_default() -> Result<Self, ConfigError> {
        let path = Path::new(DEFAULT_CONFIG_FILE);
        if path.exists() {
            Self::load_from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Rejects values the game cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.engine.tps > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "engine.tps must be positive, got {}",
                self.engine.tps
            )));
        }
        if self.engine.channel_capacity == 0 {
            return Err(ConfigError::Invalid("engine.channel_capacity must be positive".into()));
        }
        if self.window.width == 0 || self.window.height == 0 {
            return Err(ConfigError::Invalid("window size must be non-zero".into()));
        }
        if self.level.regions.is_empty() {
            return Err(ConfigError::Invalid("level.regions must not be empty".into()));
        }
        if !(self.level.hit_size > 0.0) {
            return Err(ConfigError::Invalid("level.hit_size must be positive".into()));
        }
        if !(self.level.marker_radius > 0.0) {
            return Err(ConfigError::Invalid("level.marker_radius must be positive".into()));
        }
        Ok(())
    }

    /// Difference centers as stage points.
    pub fn region_centers(&self) -> Vec<Point> {
        self.level
            .regions
            .iter()
            .map(|&[x, y]| Point::new(x, y))
            .collect()
    }

    /// Seconds added to the game timer per tick.
    pub fn seconds_per_tick(&self) -> f64 {
        1.0 / self.engine.tps
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
