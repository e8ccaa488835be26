//! Game settings and launch options
//!
//! Settings are tuning values persisted as JSON; every field falls back to its
//! default when missing. Launch options come from the command line.

use std::path::{Path, PathBuf};

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::sim::StateSwitch;

/// Failure to read or write a settings file
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("settings file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("settings file {path} is not valid JSON: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Ship tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerSettings {
    pub start: Vec2,
    /// Half-extents of the hull
    pub size: Vec2,
    pub max_velocity: f32,
    pub acceleration: f32,
    /// Degrees per rotate event
    pub rotation_speed: f32,
    /// Seconds between shots
    pub shot_delay: f32,
    /// Seconds a projectile lives
    pub projectile_duration: f32,
    /// Rigid debug movement step (pixels/s)
    pub debug_jump: f32,
}

impl Default for PlayerSettings {
    fn default() -> Self {
        Self {
            start: Vec2::from(PLAYER_START),
            size: Vec2::from(PLAYER_SIZE),
            max_velocity: PLAYER_MAX_VELOCITY,
            acceleration: PLAYER_ACCELERATION,
            rotation_speed: PLAYER_ROTATION_SPEED,
            shot_delay: DEFAULT_PROJECTILE_DELAY,
            projectile_duration: DEFAULT_PROJECTILE_DURATION,
            debug_jump: PLAYER_DEBUG_JUMP,
        }
    }
}

/// Asteroid tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AsteroidSettings {
    pub start: Vec2,
    pub velocity: Vec2,
    pub size: Vec2,
    /// Drift direction in radians
    pub angle: f32,
    /// Outline file; a procedural outline is used when unset or unreadable
    pub model: Option<PathBuf>,
    /// Seed for the procedural outline
    pub seed: u64,
    /// Vertex count of the procedural outline
    pub outline_points: usize,
}

impl Default for AsteroidSettings {
    fn default() -> Self {
        Self {
            start: Vec2::from(ASTEROID_START),
            velocity: Vec2::from(ASTEROID_VELOCITY),
            size: Vec2::from(ASTEROID_SIZE),
            angle: ASTEROID_ANGLE,
            model: None,
            seed: 0x5eed,
            outline_points: 11,
        }
    }
}

/// Game settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Arena size in pixels
    pub arena: Vec2,
    pub player: PlayerSettings,
    pub asteroid: AsteroidSettings,
    /// How mode switches install player behaviors
    pub state_switch: StateSwitch,
    /// Frame cap for the terminal front end
    pub target_fps: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            arena: Vec2::new(ARENA_WIDTH, ARENA_HEIGHT),
            player: PlayerSettings::default(),
            asteroid: AsteroidSettings::default(),
            state_switch: StateSwitch::Push,
            target_fps: TARGET_FPS,
        }
    }
}

impl Settings {
    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = Self::from_json(&json).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Save settings as pretty-printed JSON
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SettingsError> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        std::fs::write(path, json).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Seconds per frame at the target rate
    pub fn frame_time(&self) -> f32 {
        1.0 / self.target_fps.max(1) as f32
    }
}

/// Command-line switches
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LaunchOptions {
    /// Start in debug mode
    pub debug: bool,
    /// Debug sub-flag: directional jump keys
    pub rigid: bool,
    /// Debug sub-flag: asteroid frozen
    pub freeze: bool,
    /// Settings file
    pub config: Option<PathBuf>,
    /// Asteroid outline file, overriding the settings
    pub model: Option<PathBuf>,
}

impl LaunchOptions {
    /// Parse arguments (program name excluded). Unknown flags are ignored.
    pub fn parse<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut options = Self::default();
        let mut args = args.into_iter().map(Into::into);

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "-debug" => options.debug = true,
                "-rigid" => options.rigid = true,
                "-freeze" => options.freeze = true,
                "-config" => options.config = args.next().map(PathBuf::from),
                "-model" => options.model = args.next().map(PathBuf::from),
                other => log::debug!("Ignoring unrecognized argument {:?}", other),
            }
        }

        options
    }
}
