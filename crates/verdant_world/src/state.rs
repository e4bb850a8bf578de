//! # World State
//!
//! The authoritative state of one world instance.
//!
//! ## Design
//!
//! - Player registry keyed by `PlayerId`
//! - Chunk cache shared by every player in the world
//! - Visibility sets, one per player
//!
//! ## Player Lifecycle
//!
//! ```text
//! absent --add_player--> tracked --update_player + new_chunks_for_player--> tracked
//!                          |
//!                          +--remove_player--> absent
//! ```
//!
//! `update_player` does not touch visibility. Every movement must be
//! followed by `new_chunks_for_player`, or the stored set goes stale.
//!
//! A `World` has no internal locking. Callers serialize access per world.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, warn};
use verdant_procedural::{ChunkCoord, WorldChunk};
use verdant_shared::{Player, PlayerId, Position, WorldId};

use crate::cache::ChunkCache;
use crate::config::WorldConfig;
use crate::visibility::VisibilityTracker;

/// One isolated world: players, generated chunks and visibility.
pub struct World {
    id: WorldId,
    config: Arc<WorldConfig>,
    players: HashMap<PlayerId, Player>,
    cache: ChunkCache,
    visibility: VisibilityTracker,
    spawn_rng: StdRng,
}

impl World {
    /// Creates an empty world.
    #[must_use]
    pub fn new(id: WorldId, config: Arc<WorldConfig>) -> Self {
        let spawn_rng = match config.spawn_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Self {
            id,
            cache: ChunkCache::new(&config),
            config,
            players: HashMap::new(),
            visibility: VisibilityTracker::new(),
            spawn_rng,
        }
    }

    /// Returns the world identifier.
    #[must_use]
    pub fn id(&self) -> &WorldId {
        &self.id
    }

    /// Returns the world configuration.
    #[must_use]
    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    /// True when the player count has reached the configured maximum.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.players.len() >= self.config.max_players
    }

    /// Picks a spawn point near the world centre.
    ///
    /// Spawns are not unique; two players may land on the same spot.
    pub fn spawn_position(&mut self) -> Position {
        let jitter = self.config.spawn_jitter;
        let dx = (self.spawn_rng.gen::<f64>() - 0.5) * jitter;
        let dy = (self.spawn_rng.gen::<f64>() - 0.5) * jitter;

        Position::new(
            self.config.world_width / 2.0 + dx,
            self.config.world_height / 2.0 + dy,
        )
    }

    /// Registers a player and generates the chunks around it.
    ///
    /// Returns the initial chunk set, or `None` if the id is already
    /// present (the existing record is left untouched). Capacity is not
    /// checked here; call [`Self::is_full`] first.
    pub fn add_player(&mut self, player: Player) -> Option<Vec<Arc<WorldChunk>>> {
        if self.players.contains_key(&player.id) {
            warn!(world = %self.id, player = %player.id, "player already in world, ignoring join");
            return None;
        }

        let coords = self.cache.chunks_near(player.position, self.config.view_radius);
        let chunks: Vec<Arc<WorldChunk>> = coords
            .iter()
            .map(|coord| self.cache.get_or_generate(*coord))
            .collect();
        self.visibility.track(player.id, coords);

        info!(
            world = %self.id,
            player = %player.id,
            username = %player.username,
            players = self.players.len() + 1,
            "player joined"
        );
        self.players.insert(player.id, player);

        Some(chunks)
    }

    /// Overwrites a player's record. Does not recompute visibility.
    ///
    /// Returns false, with a warning, if the player is unknown.
    pub fn update_player(&mut self, player: Player) -> bool {
        match self.players.get_mut(&player.id) {
            Some(slot) => {
                *slot = player;
                true
            }
            None => {
                warn!(world = %self.id, player = %player.id, "update for unknown player ignored");
                false
            }
        }
    }

    /// Removes a player and its visibility set. Idempotent.
    pub fn remove_player(&mut self, id: PlayerId) -> Option<Player> {
        self.visibility.forget(id);
        let removed = self.players.remove(&id);
        if removed.is_some() {
            info!(world = %self.id, player = %id, players = self.players.len(), "player left");
        }
        removed
    }

    /// Chunks that became visible since the player's last recomputation.
    ///
    /// Returns nothing, with a warning, for a player that is not tracked.
    pub fn new_chunks_for_player(&mut self, player: &Player) -> Vec<Arc<WorldChunk>> {
        if !self.visibility.is_tracked(player.id) {
            warn!(world = %self.id, player = %player.id, "chunk delta for untracked player");
            return Vec::new();
        }

        let chunks = self
            .visibility
            .delta_for(player, &mut self.cache, self.config.view_radius);
        debug!(
            world = %self.id,
            player = %player.id,
            new_chunks = chunks.len(),
            cached = self.cache.len(),
            "visibility recomputed"
        );
        chunks
    }

    /// Number of players in the world.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    /// True when no player is in the world.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Looks up a player.
    #[must_use]
    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.get(&id)
    }

    /// Iterates over all players.
    pub fn players(&self) -> impl Iterator<Item = &Player> {
        self.players.values()
    }

    /// Number of generated chunks.
    #[must_use]
    pub fn chunk_count(&self) -> usize {
        self.cache.len()
    }

    /// Chunk coordinates last delivered to a player.
    #[must_use]
    pub fn visible_chunks(&self, id: PlayerId) -> Option<&HashSet<ChunkCoord>> {
        self.visibility.visible(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use verdant_shared::{Direction, MovementUpdate};

    fn world(max_players: usize) -> World {
        let config = WorldConfig {
            max_players,
            spawn_seed: Some(42),
            ..WorldConfig::default()
        };
        World::new(WorldId::from("test"), Arc::new(config))
    }

    fn player_at(x: f64, y: f64) -> Player {
        Player::new(PlayerId::new_random(), "bot", Position::new(x, y))
    }

    #[test]
    fn test_world_creation() {
        let world = world(4);
        assert_eq!(world.player_count(), 0);
        assert_eq!(world.chunk_count(), 0);
        assert!(world.is_empty());
        assert!(!world.is_full());
    }

    #[test]
    fn test_spawn_near_center() {
        let mut world = world(4);
        for _ in 0..100 {
            let spawn = world.spawn_position();
            assert!((spawn.x - 2500.0).abs() <= 50.0);
            assert!((spawn.y - 2500.0).abs() <= 50.0);
        }
    }

    #[test]
    fn test_spawn_is_reproducible_with_seed() {
        let mut a = world(4);
        let mut b = world(4);
        assert_eq!(a.spawn_position(), b.spawn_position());
    }

    #[test]
    fn test_add_player_generates_view() {
        let mut world = world(4);
        let player = player_at(2500.0, 2500.0);
        let id = player.id;

        let chunks = world.add_player(player).unwrap();
        assert_eq!(chunks.len(), 25);
        assert_eq!(world.chunk_count(), 25);
        assert_eq!(world.visible_chunks(id).unwrap().len(), 25);
        assert_eq!(world.player_count(), 1);
    }

    #[test]
    fn test_duplicate_add_is_ignored() {
        let mut world = world(4);
        let player = player_at(2500.0, 2500.0);
        let mut again = player.clone();
        again.username = "impostor".into();

        assert!(world.add_player(player.clone()).is_some());
        assert!(world.add_player(again).is_none());
        assert_eq!(world.player_count(), 1);
        assert_eq!(world.player(player.id).unwrap().username, "bot");
    }

    #[test]
    fn test_capacity() {
        let mut world = world(2);
        world.add_player(player_at(100.0, 100.0));
        assert!(!world.is_full());
        world.add_player(player_at(200.0, 200.0));
        assert!(world.is_full());
    }

    #[test]
    fn test_update_unknown_player() {
        let mut world = world(4);
        assert!(!world.update_player(player_at(0.0, 0.0)));
        assert_eq!(world.player_count(), 0);
    }

    #[test]
    fn test_update_does_not_touch_visibility() {
        let mut world = world(4);
        let player = player_at(2500.0, 2500.0);
        let id = player.id;
        world.add_player(player.clone());
        let before = world.visible_chunks(id).unwrap().clone();

        let moved = player.moved(&MovementUpdate {
            position: Position::new(3100.0, 2500.0),
            direction: Direction::Right,
            is_moving: true,
        });
        assert!(world.update_player(moved));

        assert_eq!(world.visible_chunks(id).unwrap(), &before);
        assert_eq!(world.player(id).unwrap().position, Position::new(3100.0, 2500.0));
    }

    #[test]
    fn test_new_chunks_after_move() {
        let mut world = world(4);
        let player = player_at(2500.0, 2500.0);
        world.add_player(player.clone());

        // Same spot: nothing new
        assert!(world.new_chunks_for_player(&player).is_empty());

        // One chunk east: a new column of five
        let mut moved = player.clone();
        moved.position = Position::new(3000.0, 2500.0);
        world.update_player(moved.clone());
        let chunks = world.new_chunks_for_player(&moved);

        assert_eq!(chunks.len(), 5);
        assert!(chunks.iter().all(|c| c.coord.cx == 8));
        assert_eq!(world.chunk_count(), 30);
    }

    #[test]
    fn test_untracked_player_gets_nothing() {
        let mut world = world(4);
        let stranger = player_at(2500.0, 2500.0);
        assert!(world.new_chunks_for_player(&stranger).is_empty());
        assert!(world.visible_chunks(stranger.id).is_none());
    }

    #[test]
    fn test_remove_is_idempotent() {
        let mut world = world(4);
        let player = player_at(2500.0, 2500.0);
        let id = player.id;
        world.add_player(player);

        assert!(world.remove_player(id).is_some());
        assert!(world.remove_player(id).is_none());
        assert!(world.visible_chunks(id).is_none());
        // Chunks survive the player
        assert_eq!(world.chunk_count(), 25);
    }
}
