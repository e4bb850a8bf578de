//! # Visibility Tracking
//!
//! Remembers which chunks each player has been sent and works out what is
//! new after a move.
//!
//! Tracking is one-directional. A chunk that falls out of range is dropped
//! from the stored set but the player is never told to forget it; clients
//! keep everything they have received. If the player walks back, the chunk
//! counts as new again and is resent.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use verdant_procedural::{ChunkCoord, WorldChunk};
use verdant_shared::{Player, PlayerId};

use crate::cache::ChunkCache;

/// Per-player set of delivered chunk coordinates.
#[derive(Debug, Default)]
pub struct VisibilityTracker {
    visible: HashMap<PlayerId, HashSet<ChunkCoord>>,
}

impl VisibilityTracker {
    /// Creates an empty tracker.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts tracking a player with an initial set.
    pub(crate) fn track(&mut self, id: PlayerId, coords: impl IntoIterator<Item = ChunkCoord>) {
        self.visible.insert(id, coords.into_iter().collect());
    }

    /// Replaces the stored set with `current` and returns the coordinates
    /// that were not in the old set, in `current` order.
    ///
    /// An untracked player starts being tracked; callers check
    /// [`Self::is_tracked`] first.
    pub(crate) fn replace(&mut self, id: PlayerId, current: Vec<ChunkCoord>) -> Vec<ChunkCoord> {
        let previous = self.visible.remove(&id).unwrap_or_default();
        let delta = current
            .iter()
            .copied()
            .filter(|coord| !previous.contains(coord))
            .collect();
        self.visible.insert(id, current.into_iter().collect());
        delta
    }

    /// Recomputes visibility for `player` and returns the newly visible
    /// chunks, generating any that are missing from `cache`.
    ///
    /// Like [`Self::replace`], this starts tracking an unknown player.
    pub(crate) fn delta_for(
        &mut self,
        player: &Player,
        cache: &mut ChunkCache,
        radius: i32,
    ) -> Vec<Arc<WorldChunk>> {
        let current = cache.chunks_near(player.position, radius);
        self.replace(player.id, current)
            .into_iter()
            .map(|coord| cache.get_or_generate(coord))
            .collect()
    }

    /// Stops tracking a player. Returns whether it was tracked.
    pub fn forget(&mut self, id: PlayerId) -> bool {
        self.visible.remove(&id).is_some()
    }

    /// True when `id` has a stored set.
    #[must_use]
    pub fn is_tracked(&self, id: PlayerId) -> bool {
        self.visible.contains_key(&id)
    }

    /// Stored set for a player.
    #[must_use]
    pub fn visible(&self, id: PlayerId) -> Option<&HashSet<ChunkCoord>> {
        self.visible.get(&id)
    }

    /// Number of tracked players.
    #[must_use]
    pub fn len(&self) -> usize {
        self.visible.len()
    }

    /// True when no player is tracked.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.visible.is_empty()
    }
}
