//! # World Error Types
//!
//! Rejections the transport layer has to act on.
//!
//! Duplicate joins, updates for unknown players and dropped entities are
//! policy, not errors: they are logged and the call returns normally.

use std::path::PathBuf;

use thiserror::Error;
use verdant_shared::{PlayerId, WorldId};

/// Errors surfaced by world operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum WorldError {
    /// The world already holds its maximum number of players.
    #[error("world {world_id} is full: capacity {capacity}")]
    WorldFull {
        /// The world that refused the join.
        world_id: WorldId,
        /// Configured maximum.
        capacity: usize,
    },

    /// No world exists under this identifier.
    #[error("world not found: {0}")]
    UnknownWorld(WorldId),

    /// The player is not in the given world.
    #[error("player {player_id} not found in world {world_id}")]
    UnknownPlayer {
        /// World that was searched.
        world_id: WorldId,
        /// Missing player.
        player_id: PlayerId,
    },

    /// A movement update travelled further than allowed.
    #[error("movement of {distance:.2} exceeds limit of {max:.2}")]
    MovementTooFar {
        /// Distance from the last known position.
        distance: f64,
        /// Configured limit.
        max: f64,
    },

    /// A movement update carried NaN or infinity.
    #[error("position is not finite")]
    NonFinitePosition,
}

/// Result type for world operations.
pub type WorldResult<T> = Result<T, WorldError>;

/// Errors loading a `WorldConfig`.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        /// File that was opened.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid TOML for a `WorldConfig`.
    #[error("failed to parse world config: {0}")]
    Parse(#[from] toml::de::Error),

    /// Values parsed but are unusable.
    #[error("invalid configuration: {0}")]
    Invalid(String),
}
