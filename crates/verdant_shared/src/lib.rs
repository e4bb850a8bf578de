//! # VERDANT Shared
//!
//! Common types exchanged between the world core and the transport layer.
//!
//! ## CRITICAL RULE
//!
//! This crate must NEVER depend on:
//! - `verdant_procedural`
//! - `verdant_world`
//! - Any socket, framing or session crate
//!
//! Everything here is plain data. If it needs world state, it belongs in
//! `verdant_world`.

#![deny(missing_docs)]
#![deny(unsafe_code)]

pub mod constants;
pub mod math;
pub mod protocol;

pub use constants::{
    CHUNK_SIZE, EMPTY_WORLD_GRACE_SECS, MAX_MOVE_DISTANCE, MAX_PLAYERS_PER_WORLD, VIEW_RADIUS,
    WORLD_HEIGHT, WORLD_WIDTH,
};
pub use math::Position;
pub use protocol::{
    now_millis, Direction, JoinRequest, LeaveOutcome, MovementUpdate, Player, PlayerId, WorldId,
};
