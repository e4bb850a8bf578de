//! Records exchanged with the transport layer.
//!
//! The core only ever sees these after the transport has validated their
//! shape. Both directions are plain data so any wire format can carry them.

use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::math::Position;

/// Unique player identity, assigned at join.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(pub Uuid);

impl PlayerId {
    /// Allocates a fresh random identity.
    #[must_use]
    pub fn new_random() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Identifier of one isolated world instance.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct WorldId(pub String);

impl WorldId {
    /// Creates a world identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WorldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for WorldId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Facing direction of a player.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Facing up (negative y on screen)
    Up,
    /// Facing down
    #[default]
    Down,
    /// Facing left
    Left,
    /// Facing right
    Right,
}

/// A connected player as owned by its world.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Identity
    pub id: PlayerId,
    /// Display name chosen at join
    pub username: String,
    /// Current position
    pub position: Position,
    /// Facing direction
    pub direction: Direction,
    /// Whether the player is walking
    pub is_moving: bool,
    /// Milliseconds since the UNIX epoch of the last update
    pub last_update_ms: u64,
}

impl Player {
    /// Creates a standing player facing down at `position`.
    #[must_use]
    pub fn new(id: PlayerId, username: impl Into<String>, position: Position) -> Self {
        Self {
            id,
            username: username.into(),
            position,
            direction: Direction::default(),
            is_moving: false,
            last_update_ms: now_millis(),
        }
    }

    /// Returns a copy of this record with a movement update applied.
    #[must_use]
    pub fn moved(&self, update: &MovementUpdate) -> Self {
        Self {
            position: update.position,
            direction: update.direction,
            is_moving: update.is_moving,
            last_update_ms: now_millis(),
            ..self.clone()
        }
    }
}

/// Request to enter a world.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct JoinRequest {
    /// Display name
    pub username: String,
    /// Target world
    pub world_id: WorldId,
}

/// Movement update, already shape-checked by the transport.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct MovementUpdate {
    /// New position
    pub position: Position,
    /// New facing direction
    pub direction: Direction,
    /// Whether the player is walking
    pub is_moving: bool,
}

/// Result of a player leaving a world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveOutcome {
    /// True when the world has no players left.
    ///
    /// The world is discarded only after the grace period passes with the
    /// count still at zero.
    pub world_empty: bool,
}

/// Current wall-clock time in milliseconds since the UNIX epoch.
#[must_use]
pub fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_defaults() {
        let id = PlayerId::new_random();
        let player = Player::new(id, "ada", Position::new(10.0, 20.0));
        assert_eq!(player.direction, Direction::Down);
        assert!(!player.is_moving);
        assert!(player.last_update_ms > 0);
    }

    #[test]
    fn test_moved_keeps_identity() {
        let id = PlayerId::new_random();
        let player = Player::new(id, "ada", Position::new(10.0, 20.0));
        let update = MovementUpdate {
            position: Position::new(15.0, 20.0),
            direction: Direction::Right,
            is_moving: true,
        };

        let moved = player.moved(&update);
        assert_eq!(moved.id, id);
        assert_eq!(moved.username, "ada");
        assert_eq!(moved.position, Position::new(15.0, 20.0));
        assert_eq!(moved.direction, Direction::Right);
        assert!(moved.is_moving);
        assert!(moved.last_update_ms >= player.last_update_ms);
    }

    #[test]
    fn test_player_ids_unique() {
        assert_ne!(PlayerId::new_random(), PlayerId::new_random());
    }

    #[test]
    fn test_world_id_display() {
        let id = WorldId::from("meadow");
        assert_eq!(id.to_string(), "meadow");
        assert_eq!(id.as_str(), "meadow");
    }
}
