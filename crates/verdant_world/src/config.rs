//! # World Configuration
//!
//! Geometry, limits and timings for every world a server hosts.
//!
//! Loaded once at startup from TOML. Missing keys fall back to the defaults
//! in `verdant_shared::constants`.
//!
//! ```toml
//! world_width = 5000.0
//! world_height = 5000.0
//! chunk_size = 500.0
//! view_radius = 2
//! max_players = 20
//! ```

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use verdant_shared::constants::{
    CHUNK_SIZE, EMPTY_WORLD_GRACE_SECS, MAX_MOVE_DISTANCE, MAX_PLAYERS_PER_WORLD, VIEW_RADIUS,
    WORLD_HEIGHT, WORLD_WIDTH,
};

use crate::error::ConfigError;

/// Per-world settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// World width in world units.
    pub world_width: f64,
    /// World height in world units.
    pub world_height: f64,
    /// Side length of one chunk.
    pub chunk_size: f64,
    /// Chunks streamed around a player on each axis.
    pub view_radius: i32,
    /// Maximum concurrent players per world.
    pub max_players: usize,
    /// Side length of the square around the world centre that spawns land in.
    pub spawn_jitter: f64,
    /// Seconds an empty world is kept before it is discarded.
    pub empty_grace_secs: u64,
    /// Maximum displacement per movement update.
    pub max_move_distance: f64,
    /// Fixed seed for spawn jitter. Entropy-seeded when absent.
    pub spawn_seed: Option<u64>,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            world_width: WORLD_WIDTH,
            world_height: WORLD_HEIGHT,
            chunk_size: CHUNK_SIZE,
            view_radius: VIEW_RADIUS,
            max_players: MAX_PLAYERS_PER_WORLD,
            spawn_jitter: 100.0,
            empty_grace_secs: EMPTY_WORLD_GRACE_SECS,
            max_move_distance: MAX_MOVE_DISTANCE,
            spawn_seed: None,
        }
    }
}

impl WorldConfig {
    /// Parses and validates a TOML document.
    ///
    /// # Errors
    ///
    /// Returns error if the document does not parse or fails validation.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read, does not parse, or fails
    /// validation.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&source)
    }

    /// Checks that every value is usable.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` naming the first bad field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("world_width", self.world_width),
            ("world_height", self.world_height),
            ("chunk_size", self.chunk_size),
            ("max_move_distance", self.max_move_distance),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::Invalid(format!("{name} must be positive, got {value}")));
            }
        }

        if !self.spawn_jitter.is_finite() || self.spawn_jitter < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "spawn_jitter must be non-negative, got {}",
                self.spawn_jitter
            )));
        }
        if self.view_radius < 0 {
            return Err(ConfigError::Invalid(format!(
                "view_radius must be non-negative, got {}",
                self.view_radius
            )));
        }
        if self.max_players == 0 {
            return Err(ConfigError::Invalid("max_players must be at least 1".into()));
        }

        Ok(())
    }

    /// Grace period as a `Duration`.
    #[must_use]
    pub const fn empty_grace(&self) -> Duration {
        Duration::from_secs(self.empty_grace_secs)
    }
}
