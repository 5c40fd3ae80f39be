use std::path::Path;
use std::time::Duration;

use physics::{PhysParams, Vec3};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::feedback::MaterialTable;

/// Configuration for the cube arena.
///
/// Every field has a default, so a config file only needs to list the values
/// it changes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ArenaConfig {
    /// Side length of the square region the target is sampled in
    pub arena_size: f32,
    /// Height of both the agent and the target
    pub spawn_height: f32,
    /// Force per unit of action
    pub move_multiplier: f32,
    /// Planar distance at or under which the target counts as reached
    pub success_distance: f32,
    pub success_reward: f32,
    pub failure_reward: f32,
    /// How long the boundary keeps the success/fail material
    pub flash_seconds: f32,
    /// Fixed physics tick in seconds
    pub dt: f32,
    /// Steps before an episode is interrupted; 0 disables the limit
    pub max_steps: u32,
    /// Distance from the origin to the inner face of each wall
    pub wall_offset: f32,
    pub wall_thickness: f32,
    pub wall_height: f32,
    pub agent_half_extent: f32,
    pub agent_mass: f32,
    /// Fraction of velocity removed per second
    pub linear_drag: f32,
    /// Boundary material names
    pub materials: MaterialTable<String>,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            arena_size: 28.0,
            spawn_height: 0.5,
            move_multiplier: 10.0,
            success_distance: 1.25,
            success_reward: 1.0,
            failure_reward: -0.5,
            flash_seconds: 0.5,
            dt: 0.02,
            max_steps: 0,
            wall_offset: 15.0,
            wall_thickness: 1.0,
            wall_height: 2.0,
            agent_half_extent: 0.5,
            agent_mass: 1.0,
            linear_drag: 0.0,
            materials: MaterialTable {
                regular: "Materials/EnvironmentMaterial".to_string(),
                success: "Materials/SuccessMaterial".to_string(),
                fail: "Materials/FailMaterial".to_string(),
            },
        }
    }
}

impl ArenaConfig {
    /// Parse a JSON config and validate it.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON and
    /// [`ConfigError::Invalid`] when validation fails.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON config file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] when the file cannot be read, otherwise as
    /// [`ArenaConfig::from_json_str`].
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Check the values describe a playable arena.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("arena_size", self.arena_size),
            ("move_multiplier", self.move_multiplier),
            ("success_distance", self.success_distance),
            ("flash_seconds", self.flash_seconds),
            ("dt", self.dt),
            ("wall_thickness", self.wall_thickness),
            ("wall_height", self.wall_height),
            ("agent_half_extent", self.agent_half_extent),
            ("agent_mass", self.agent_mass),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::Invalid(format!("{name} must be positive, got {value}")));
            }
        }
        for (name, value) in [("dt", self.dt), ("flash_seconds", self.flash_seconds)] {
            if Duration::try_from_secs_f32(value).is_err() {
                return Err(ConfigError::Invalid(format!(
                    "{name} of {value} seconds is too long to schedule"
                )));
            }
        }
        if !(self.linear_drag.is_finite() && self.linear_drag >= 0.0) {
            return Err(ConfigError::Invalid(format!(
                "linear_drag must be non-negative, got {}",
                self.linear_drag
            )));
        }
        if self.wall_offset <= self.half_size() {
            return Err(ConfigError::Invalid(format!(
                "wall_offset {} must lie outside the target region (half size {})",
                self.wall_offset,
                self.half_size()
            )));
        }
        Ok(())
    }

    #[must_use]
    pub fn half_size(&self) -> f32 {
        self.arena_size * 0.5
    }

    /// Where the agent stands at the start of every episode.
    #[must_use]
    pub fn start_position(&self) -> Vec3 {
        Vec3::new(0.0, self.spawn_height, 0.0)
    }

    /// Length of one physics tick.
    ///
    /// # Panics
    ///
    /// Panics if `dt` does not fit a [`Duration`]; [`validate`](Self::validate)
    /// rejects such configs.
    #[must_use]
    pub fn tick(&self) -> Duration {
        Duration::from_secs_f32(self.dt)
    }

    /// # Panics
    ///
    /// Panics if `flash_seconds` does not fit a [`Duration`];
    /// [`validate`](Self::validate) rejects such configs.
    #[must_use]
    pub fn flash_hold(&self) -> Duration {
        Duration::from_secs_f32(self.flash_seconds)
    }

    #[must_use]
    pub fn phys_params(&self) -> PhysParams {
        PhysParams { gravity: Vec3::ZERO, dt: self.dt, linear_drag: self.linear_drag }
    }
}
