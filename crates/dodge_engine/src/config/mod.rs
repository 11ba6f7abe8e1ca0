//! Game configuration
//!
//! TOML-backed settings with defaults for every field, so a missing or
//! partial file never blocks startup. Sections convert into the tuning
//! structs the subsystems consume.

use std::path::Path;

use log::{info, warn};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::physics::collision::{AsteroidPairRule, CollisionRules};
use crate::render::camera::Viewport;
use crate::scene::spawner::SpawnTuning;

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file exists but could not be read
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    /// The file is not valid TOML for [`GameConfig`]
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    /// A field combination fails validation
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Window and render target settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Render target width in pixels
    pub width: u32,
    /// Render target height in pixels
    pub height: u32,
    /// Window title
    pub title: String,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            title: "BoxDodge".to_string(),
        }
    }
}

/// Camera projection and control settings
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Vertical field of view in degrees
    pub fov_degrees: f32,
    /// Near clip distance
    pub near_z: f32,
    /// Far clip distance
    pub far_z: f32,
    /// World units moved per frame while a movement key is down
    pub move_speed: f32,
    /// Radians turned per frame while an arrow key is down
    pub turn_speed: f32,
    /// Movement multiplier while Shift is held
    pub sprint_multiplier: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_degrees: 45.0,
            near_z: 1.0,
            far_z: 1000.0,
            move_speed: 0.02,
            turn_speed: 0.04,
            sprint_multiplier: 2.0,
        }
    }
}

/// Simulation tuning
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct GameplayConfig {
    /// Asteroids spawned at session start
    pub asteroid_count: u32,
    /// Frames a projectile lives before despawning
    pub projectile_lifetime_frames: u32,
    /// Half-extent of the collision proximity test
    pub collision_extent: f32,
    /// Asteroid spawn half-extent on X and Y
    pub asteroid_spread: f32,
    /// Nearest Z an asteroid may spawn at
    pub asteroid_near: f32,
    /// Farthest Z an asteroid may spawn at
    pub asteroid_far: f32,
    /// Behavior of overlapping asteroid pairs
    pub asteroid_pair_rule: AsteroidPairRule,
    /// Stop a headless session after this many frames
    pub frame_limit: u64,
}

impl Default for GameplayConfig {
    fn default() -> Self {
        let spawn = SpawnTuning::default();
        Self {
            asteroid_count: 5,
            projectile_lifetime_frames: spawn.projectile_lifetime_frames,
            collision_extent: CollisionRules::default().extent,
            asteroid_spread: spawn.asteroid_spread,
            asteroid_near: spawn.asteroid_near,
            asteroid_far: spawn.asteroid_far,
            asteroid_pair_rule: AsteroidPairRule::default(),
            frame_limit: 10_000,
        }
    }
}

/// Top-level configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Window and render target settings
    pub window: WindowConfig,
    /// Camera settings
    pub camera: CameraConfig,
    /// Simulation settings
    pub gameplay: GameplayConfig,
}

impl GameConfig {
    /// Load configuration from `path`, falling back to defaults when the
    /// file does not exist. A present-but-broken file is an error rather
    /// than a silent fallback.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            warn!("config file {} not found, using defaults", path.display());
            return Ok(Self::default());
        }

        let text = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&text)?;
        config.validate()?;
        info!("loaded config from {}", path.display());
        Ok(config)
    }

    /// Check field combinations that cannot be expressed in types
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.window.width == 0 || self.window.height == 0 {
            return Err(ConfigError::Invalid(
                "window dimensions must be non-zero".to_string(),
            ));
        }
        if self.camera.far_z <= self.camera.near_z {
            return Err(ConfigError::Invalid(
                "far_z must be greater than near_z".to_string(),
            ));
        }
        if self.gameplay.collision_extent <= 0.0 {
            return Err(ConfigError::Invalid(
                "collision_extent must be positive".to_string(),
            ));
        }
        if self.gameplay.projectile_lifetime_frames == 0 {
            return Err(ConfigError::Invalid(
                "projectile_lifetime_frames must be at least 1".to_string(),
            ));
        }
        if self.gameplay.asteroid_far < self.gameplay.asteroid_near {
            return Err(ConfigError::Invalid(
                "asteroid_far must not be less than asteroid_near".to_string(),
            ));
        }
        Ok(())
    }

    /// Viewport derived from the window and camera sections
    pub fn viewport(&self) -> Viewport {
        Viewport {
            width: self.window.width,
            height: self.window.height,
            fov_y: crate::foundation::math::deg_to_rad(self.camera.fov_degrees),
            near_z: self.camera.near_z,
            far_z: self.camera.far_z,
        }
    }

    /// Collision rules derived from the gameplay section
    pub fn collision_rules(&self) -> CollisionRules {
        CollisionRules {
            extent: self.gameplay.collision_extent,
            asteroid_pair: self.gameplay.asteroid_pair_rule,
        }
    }

    /// Spawn tuning derived from the gameplay section
    pub fn spawn_tuning(&self) -> SpawnTuning {
        SpawnTuning {
            projectile_lifetime_frames: self.gameplay.projectile_lifetime_frames,
            asteroid_spread: self.gameplay.asteroid_spread,
            asteroid_near: self.gameplay.asteroid_near,
            asteroid_far: self.gameplay.asteroid_far,
        }
    }
}
