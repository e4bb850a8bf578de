//! # World Constants
//!
//! Default values for a freshly created world.
//!
//! **NOTE:** These are only defaults. A running server reads its values from
//! `WorldConfig` (see `verdant_world::config`), which falls back to these.

// =============================================================================
// WORLD GEOMETRY
// =============================================================================

/// World width in world units.
pub const WORLD_WIDTH: f64 = 5000.0;

/// World height in world units.
pub const WORLD_HEIGHT: f64 = 5000.0;

/// Side length of one square chunk in world units.
pub const CHUNK_SIZE: f64 = 500.0;

/// Chunks streamed around a player, in chunks, on each axis.
///
/// A radius of 2 covers a 5x5 block of chunks.
pub const VIEW_RADIUS: i32 = 2;

// =============================================================================
// SESSION LIMITS
// =============================================================================

/// Maximum concurrent players in one world.
pub const MAX_PLAYERS_PER_WORLD: usize = 20;

/// Seconds an empty world survives before it is discarded.
pub const EMPTY_WORLD_GRACE_SECS: u64 = 60;

/// Maximum displacement accepted in a single movement update.
pub const MAX_MOVE_DISTANCE: f64 = 20.0;
