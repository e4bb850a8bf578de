//! # Movement Validation
//!
//! Rejects movement updates that no honest client can produce.
//!
//! A player may move at most `max_move_distance` world units per update,
//! measured as straight-line distance from the last accepted position.
//! Anything further is treated as a teleport and refused before it reaches
//! the world.

use verdant_shared::{MovementUpdate, Position};

use crate::config::WorldConfig;
use crate::error::{WorldError, WorldResult};

/// Per-update displacement check.
#[derive(Clone, Copy, Debug)]
pub struct MovementValidator {
    max_distance: f64,
}

impl MovementValidator {
    /// Creates a validator with an explicit limit.
    #[must_use]
    pub const fn new(max_distance: f64) -> Self {
        Self { max_distance }
    }

    /// Creates a validator from a world configuration.
    #[must_use]
    pub const fn from_config(config: &WorldConfig) -> Self {
        Self::new(config.max_move_distance)
    }

    /// Returns the configured limit.
    #[must_use]
    pub const fn max_distance(&self) -> f64 {
        self.max_distance
    }

    /// Checks an update against the player's last known position.
    ///
    /// # Errors
    ///
    /// `NonFinitePosition` for NaN or infinite coordinates, `MovementTooFar`
    /// when the step exceeds the limit.
    pub fn validate(&self, last: Position, update: &MovementUpdate) -> WorldResult<()> {
        if !update.position.is_finite() {
            return Err(WorldError::NonFinitePosition);
        }

        let distance = last.distance(update.position);
        if distance > self.max_distance {
            return Err(WorldError::MovementTooFar {
                distance,
                max: self.max_distance,
            });
        }

        Ok(())
    }
}
