//! # VERDANT World
//!
//! Server-side state authority for a chunk-streamed 2D world.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                        WORLD REGISTRY                        │
//! │          join / apply_move / leave / reap_expired            │
//! ├──────────────────────────────────────────────────────────────┤
//! │  ┌──────────────────┐         ┌─────────────────────┐        │
//! │  │ World            │         │ MovementValidator   │        │
//! │  │ - players        │         └─────────────────────┘        │
//! │  │ - ChunkCache ────┼───> ChunkGenerator                     │
//! │  │ - Visibility     │     (verdant_procedural)               │
//! │  └──────────────────┘                                        │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! The transport layer owns sockets, framing and sessions. It hands the
//! registry already-shaped requests and delivers the returned chunks and
//! player records.
//!
//! ## Example
//!
//! ```rust
//! use verdant_shared::{JoinRequest, WorldId};
//! use verdant_world::{WorldConfig, WorldRegistry};
//!
//! let mut registry = WorldRegistry::new(WorldConfig::default());
//! let joined = registry
//!     .join(JoinRequest { username: "ada".into(), world_id: WorldId::from("meadow") })
//!     .unwrap();
//!
//! assert_eq!(joined.initial_chunks.len(), 25);
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod cache;
pub mod config;
pub mod error;
pub mod movement;
pub mod registry;
pub mod state;
pub mod visibility;

pub use cache::ChunkCache;
pub use config::WorldConfig;
pub use error::{ConfigError, WorldError, WorldResult};
pub use movement::MovementValidator;
pub use registry::{run_reaper, JoinResponse, SharedRegistry, WorldRegistry};
pub use state::World;
pub use visibility::VisibilityTracker;
