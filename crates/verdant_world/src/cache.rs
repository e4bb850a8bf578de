//! # Chunk Cache
//!
//! Lazily populated store of generated chunks for one world.
//!
//! A chunk is generated the first time any player can see it and kept until
//! the whole world is discarded. There is no eviction and no expiry; the
//! cache grows with the area players have explored.

use std::collections::HashMap;
use std::sync::Arc;

use verdant_procedural::{ChunkCoord, ChunkGenerator, EntityIds, WorldChunk};
use verdant_shared::Position;

use crate::config::WorldConfig;

/// Memoizing chunk store.
pub struct ChunkCache {
    generator: ChunkGenerator,
    ids: EntityIds,
    chunks: HashMap<ChunkCoord, Arc<WorldChunk>>,
    world_width: f64,
    world_height: f64,
}

impl ChunkCache {
    /// Creates an empty cache for a world shaped by `config`.
    #[must_use]
    pub fn new(config: &WorldConfig) -> Self {
        Self {
            generator: ChunkGenerator::new(config.chunk_size),
            ids: EntityIds::new(),
            chunks: HashMap::new(),
            world_width: config.world_width,
            world_height: config.world_height,
        }
    }

    /// Returns the cached chunk, generating and storing it on first access.
    pub fn get_or_generate(&mut self, coord: ChunkCoord) -> Arc<WorldChunk> {
        let Self {
            generator,
            ids,
            chunks,
            ..
        } = self;

        Arc::clone(
            chunks
                .entry(coord)
                .or_insert_with(|| Arc::new(generator.generate(coord, ids))),
        )
    }

    /// Returns the chunk if it has been generated.
    #[must_use]
    pub fn get(&self, coord: ChunkCoord) -> Option<Arc<WorldChunk>> {
        self.chunks.get(&coord).cloned()
    }

    /// Number of generated chunks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    /// True when nothing has been generated yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// Side length of one chunk.
    #[must_use]
    pub const fn chunk_size(&self) -> f64 {
        self.generator.chunk_size()
    }

    /// True unless the coordinate is negative or its origin lies at or past
    /// the world's width or height.
    ///
    /// A chunk that starts inside the world but whose far edge pokes past
    /// the boundary is still in bounds.
    #[must_use]
    pub fn in_bounds(&self, coord: ChunkCoord) -> bool {
        let origin = coord.origin(self.chunk_size());
        coord.cx >= 0
            && coord.cy >= 0
            && origin.x < self.world_width
            && origin.y < self.world_height
    }

    /// Coordinates of the in-bounds chunks within `radius` of the chunk
    /// containing `position`.
    #[must_use]
    pub fn chunks_near(&self, position: Position, radius: i32) -> Vec<ChunkCoord> {
        ChunkCoord::from_position(position, self.chunk_size())
            .square(radius)
            .filter(|coord| self.in_bounds(*coord))
            .collect()
    }
}
