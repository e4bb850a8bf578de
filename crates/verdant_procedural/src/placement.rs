//! # Spatial Placement
//!
//! Finds non-overlapping spots for entities inside one chunk.
//!
//! Every entity is treated as a circle around its centre. A candidate is
//! drawn uniformly inside the chunk (shrunk by the entity's size so the
//! footprint fits), tested against everything already placed, and accepted
//! on the first miss. After `MAX_ATTEMPTS` misses the entity is dropped.
//! Dropping is normal: crowded chunks simply end up with fewer entities.

use verdant_shared::Position;

use crate::sequence::SeededSequence;

/// Circular footprint of a placed entity.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Footprint {
    /// Centre of the entity.
    pub center: Position,
    /// Diameter of the entity.
    pub size: f64,
}

impl Footprint {
    /// Creates a footprint.
    #[inline]
    #[must_use]
    pub const fn new(center: Position, size: f64) -> Self {
        Self { center, size }
    }
}

/// Retry-bounded placer.
#[derive(Clone, Copy, Debug)]
pub struct SpatialPlacer {
    max_attempts: u32,
    spacing: f64,
}

impl Default for SpatialPlacer {
    fn default() -> Self {
        Self {
            max_attempts: Self::MAX_ATTEMPTS,
            spacing: Self::SPACING_BUFFER,
        }
    }
}

impl SpatialPlacer {
    /// Candidates tried before an entity is dropped.
    pub const MAX_ATTEMPTS: u32 = 50;

    /// Extra clearance between the edges of two sized entities.
    pub const SPACING_BUFFER: f64 = 10.0;

    /// Creates a placer with the standard budget and spacing.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the retry budget.
    #[inline]
    #[must_use]
    pub const fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// True when `a` and `b` are closer than their radii plus the spacing.
    #[inline]
    #[must_use]
    pub fn overlaps(&self, a: Footprint, b: Footprint) -> bool {
        let min_distance = (a.size + b.size) / 2.0 + self.spacing;
        a.center.distance(b.center) < min_distance
    }

    /// Places a sized entity against every footprint in `existing`.
    ///
    /// Returns the accepted centre, or `None` once the budget is spent.
    pub fn place(
        &self,
        size: f64,
        origin: Position,
        chunk_size: f64,
        existing: &[Footprint],
        rng: &mut SeededSequence,
    ) -> Option<Position> {
        let room = (chunk_size - size).max(0.0);

        for _ in 0..self.max_attempts {
            let center = Position::new(
                origin.x + size / 2.0 + rng.next_f64() * room,
                origin.y + size / 2.0 + rng.next_f64() * room,
            );
            let candidate = Footprint::new(center, size);

            if !existing.iter().any(|other| self.overlaps(candidate, *other)) {
                return Some(center);
            }
        }

        None
    }

    /// Places a point entity (a flower).
    ///
    /// The rule is weaker than [`Self::place`]: the point only has to sit
    /// outside each blocker's radius, with no spacing, and points are never
    /// checked against each other.
    pub fn place_point(
        &self,
        origin: Position,
        chunk_size: f64,
        blockers: &[Footprint],
        rng: &mut SeededSequence,
    ) -> Option<Position> {
        for _ in 0..self.max_attempts {
            let point = Position::new(
                origin.x + rng.next_f64() * chunk_size,
                origin.y + rng.next_f64() * chunk_size,
            );

            let blocked = blockers
                .iter()
                .any(|blocker| point.distance(blocker.center) < blocker.size / 2.0);
            if !blocked {
                return Some(point);
            }
        }

        None
    }
}
