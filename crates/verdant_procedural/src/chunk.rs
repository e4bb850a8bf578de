//! # Chunk System
//!
//! The world is cut into square chunks. A chunk is the unit of generation,
//! caching and delivery.
//!
//! ## Generation Order
//!
//! 1. Trees, from the chunk's tree stream, spaced against other trees
//! 2. Bushes, from the bush stream, spaced against trees and bushes
//! 3. Flowers, from the flower stream, kept off tree and bush centres
//!
//! Entities that cannot be placed within the retry budget are left out.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};
use verdant_shared::Position;

use crate::entity::{Bush, Color, EntityIds, EntityKind, Flower, Tree, FLOWER_PALETTE};
use crate::placement::{Footprint, SpatialPlacer};
use crate::sequence::{ChunkSeed, SeededSequence};

/// Chunk coordinate (identifies a chunk in the world grid).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ChunkCoord {
    /// X coordinate (in chunks, not world units).
    pub cx: i32,
    /// Y coordinate (in chunks, not world units).
    pub cy: i32,
}

impl ChunkCoord {
    /// Creates a new chunk coordinate.
    #[inline]
    #[must_use]
    pub const fn new(cx: i32, cy: i32) -> Self {
        Self { cx, cy }
    }

    /// Chunk containing a world position.
    #[inline]
    #[must_use]
    pub fn from_position(position: Position, chunk_size: f64) -> Self {
        Self {
            cx: (position.x / chunk_size).floor() as i32,
            cy: (position.y / chunk_size).floor() as i32,
        }
    }

    /// World position of the chunk's origin (corner).
    #[inline]
    #[must_use]
    pub fn origin(self, chunk_size: f64) -> Position {
        Position::new(f64::from(self.cx) * chunk_size, f64::from(self.cy) * chunk_size)
    }

    /// Base seed for this chunk's content.
    #[inline]
    #[must_use]
    pub const fn seed(self) -> ChunkSeed {
        ChunkSeed::from_coord(self.cx, self.cy)
    }

    /// All coordinates in the square `[cx - radius, cx + radius]` on both axes.
    ///
    /// Unclipped; callers apply world bounds. Saturates at the `i32` limits,
    /// so the square shrinks instead of wrapping.
    pub fn square(self, radius: i32) -> impl Iterator<Item = ChunkCoord> {
        let radius = radius.max(0);
        let (cy_min, cy_max) = (self.cy.saturating_sub(radius), self.cy.saturating_add(radius));
        (self.cx.saturating_sub(radius)..=self.cx.saturating_add(radius))
            .flat_map(move |cx| (cy_min..=cy_max).map(move |cy| ChunkCoord::new(cx, cy)))
    }
}

/// A generated chunk of terrain content.
///
/// Never mutated after generation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WorldChunk {
    /// Chunk position in the world.
    pub coord: ChunkCoord,
    /// Trees, in placement order.
    pub trees: Vec<Tree>,
    /// Bushes, in placement order.
    pub bushes: Vec<Bush>,
    /// Flowers, in placement order.
    pub flowers: Vec<Flower>,
    /// Always true for generated chunks.
    pub is_loaded: bool,
}

impl WorldChunk {
    /// Total number of entities in the chunk.
    #[must_use]
    pub fn entity_count(&self) -> usize {
        self.trees.len() + self.bushes.len() + self.flowers.len()
    }
}

/// Chunk generator.
///
/// Content depends only on the coordinate and the chunk size. Identifiers
/// come from the caller's counters.
#[derive(Clone, Debug)]
pub struct ChunkGenerator {
    chunk_size: f64,
    placer: SpatialPlacer,
}

impl ChunkGenerator {
    /// Tree diameter range.
    pub const TREE_SIZE: (f64, f64) = (80.0, 120.0);
    /// Bush diameter range.
    pub const BUSH_SIZE: (f64, f64) = (40.0, 60.0);
    /// Number of tree and bush sprite variants.
    pub const VARIANTS: usize = 3;

    /// Creates a generator for chunks of `chunk_size` world units.
    #[must_use]
    pub fn new(chunk_size: f64) -> Self {
        Self {
            chunk_size,
            placer: SpatialPlacer::new(),
        }
    }

    /// Returns the chunk size.
    #[inline]
    #[must_use]
    pub const fn chunk_size(&self) -> f64 {
        self.chunk_size
    }

    /// Tree count for a seed, 5 to 15.
    #[must_use]
    pub fn tree_count(seed: ChunkSeed) -> usize {
        let s = seed.value() as f64;
        5 + ((s.sin() + 1.0) * 5.0).floor() as usize
    }

    /// Bush count for a seed, 8 to 22.
    #[must_use]
    pub fn bush_count(seed: ChunkSeed) -> usize {
        let s = seed.value() as f64;
        8 + ((s.cos() + 1.0) * 7.0).floor() as usize
    }

    /// Flower count for a seed, 15 to 35.
    #[must_use]
    pub fn flower_count(seed: ChunkSeed) -> usize {
        let s = seed.value() as f64;
        15 + (((s * 0.1).sin() + 1.0) * 10.0).floor() as usize
    }

    /// Generates the chunk at `coord`, drawing identifiers from `ids`.
    #[must_use]
    pub fn generate(&self, coord: ChunkCoord, ids: &mut EntityIds) -> WorldChunk {
        let seed = coord.seed();
        let origin = coord.origin(self.chunk_size);

        let mut footprints = Vec::new();
        let trees = self.generate_trees(seed, origin, &mut footprints, ids);
        let bushes = self.generate_bushes(seed, origin, &mut footprints, ids);
        let flowers = self.generate_flowers(seed, origin, &footprints, ids);

        debug!(
            cx = coord.cx,
            cy = coord.cy,
            trees = trees.len(),
            bushes = bushes.len(),
            flowers = flowers.len(),
            "chunk generated"
        );

        WorldChunk {
            coord,
            trees,
            bushes,
            flowers,
            is_loaded: true,
        }
    }

    /// Trees are spaced against trees only; `footprints` is empty on entry.
    fn generate_trees(
        &self,
        seed: ChunkSeed,
        origin: Position,
        footprints: &mut Vec<Footprint>,
        ids: &mut EntityIds,
    ) -> Vec<Tree> {
        let mut rng = seed.stream(ChunkSeed::TREES);
        let count = Self::tree_count(seed);
        let mut trees = Vec::with_capacity(count);

        for _ in 0..count {
            let size = rng.next_range(Self::TREE_SIZE.0, Self::TREE_SIZE.1);
            let variant = rng.next_index(Self::VARIANTS) as u8;
            let color = green_hsl(&mut rng, (90.0, 150.0), (40.0, 70.0), (20.0, 40.0));

            let Some(position) = self.placer.place(size, origin, self.chunk_size, footprints, &mut rng)
            else {
                trace!(seed = seed.value(), "tree dropped after placement budget");
                continue;
            };

            footprints.push(Footprint::new(position, size));
            trees.push(Tree {
                id: ids.allocate(EntityKind::Tree),
                position,
                size,
                color,
                variant,
            });
        }

        trees
    }

    /// Bushes are spaced against trees and earlier bushes.
    fn generate_bushes(
        &self,
        seed: ChunkSeed,
        origin: Position,
        footprints: &mut Vec<Footprint>,
        ids: &mut EntityIds,
    ) -> Vec<Bush> {
        let mut rng = seed.stream(ChunkSeed::BUSHES);
        let count = Self::bush_count(seed);
        let mut bushes = Vec::with_capacity(count);

        for _ in 0..count {
            let size = rng.next_range(Self::BUSH_SIZE.0, Self::BUSH_SIZE.1);
            let variant = rng.next_index(Self::VARIANTS) as u8;
            let color = green_hsl(&mut rng, (80.0, 140.0), (35.0, 65.0), (25.0, 45.0));

            let Some(position) = self.placer.place(size, origin, self.chunk_size, footprints, &mut rng)
            else {
                trace!(seed = seed.value(), "bush dropped after placement budget");
                continue;
            };

            footprints.push(Footprint::new(position, size));
            bushes.push(Bush {
                id: ids.allocate(EntityKind::Bush),
                position,
                size,
                color,
                variant,
            });
        }

        bushes
    }

    /// Flowers only avoid tree and bush centres; they may touch each other.
    fn generate_flowers(
        &self,
        seed: ChunkSeed,
        origin: Position,
        blockers: &[Footprint],
        ids: &mut EntityIds,
    ) -> Vec<Flower> {
        let mut rng = seed.stream(ChunkSeed::FLOWERS);
        let count = Self::flower_count(seed);
        let mut flowers = Vec::with_capacity(count);

        for _ in 0..count {
            let color = FLOWER_PALETTE[rng.next_index(FLOWER_PALETTE.len())];

            let Some(position) = self.placer.place_point(origin, self.chunk_size, blockers, &mut rng)
            else {
                trace!(seed = seed.value(), "flower dropped after placement budget");
                continue;
            };

            flowers.push(Flower {
                id: ids.allocate(EntityKind::Flower),
                position,
                color,
            });
        }

        flowers
    }
}

/// Draws an HSL colour from three ranges.
fn green_hsl(
    rng: &mut SeededSequence,
    hue: (f64, f64),
    saturation: (f64, f64),
    lightness: (f64, f64),
) -> Color {
    let h = rng.next_range(hue.0, hue.1);
    let s = rng.next_range(saturation.0, saturation.1);
    let l = rng.next_range(lightness.0, lightness.1);
    Color::from_hsl(h, s, l)
}
