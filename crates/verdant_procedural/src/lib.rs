//! # VERDANT Procedural Generation
//!
//! Deterministic terrain content for a chunked 2D world.
//!
//! ## Design Principles
//!
//! 1. **Deterministic**: Same chunk coordinate always produces the same content
//! 2. **Chunked**: Content is generated one square chunk at a time
//! 3. **Independent streams**: Trees, bushes and flowers never share a stream
//! 4. **Bounded**: Entity counts and placement retries have fixed ceilings
//!
//! ## Core Components
//!
//! - `SeededSequence`: Linear-congruential float stream
//! - `SpatialPlacer`: Circular-overlap placement with a retry budget
//! - `ChunkGenerator`: Produces a `WorldChunk` from a `ChunkCoord`
//! - `EntityIds`: Per-world identifier counters
//!
//! ## Example
//!
//! ```rust
//! use verdant_procedural::{ChunkCoord, ChunkGenerator, EntityIds};
//!
//! let generator = ChunkGenerator::new(500.0);
//! let mut ids = EntityIds::new();
//!
//! let chunk = generator.generate(ChunkCoord::new(5, 5), &mut ids);
//! assert!(chunk.is_loaded);
//! assert!(!chunk.trees.is_empty());
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod chunk;
pub mod entity;
pub mod placement;
pub mod sequence;

pub use chunk::{ChunkCoord, ChunkGenerator, WorldChunk};
pub use entity::{Bush, Color, EntityId, EntityIds, EntityKind, Flower, Tree, FLOWER_PALETTE};
pub use placement::{Footprint, SpatialPlacer};
pub use sequence::{ChunkSeed, SeededSequence};
