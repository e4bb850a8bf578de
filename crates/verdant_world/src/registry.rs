//! # World Registry
//!
//! Maps world identifiers to live `World` instances for the transport layer.
//!
//! ## Lifecycle
//!
//! - A world is created on the first join that names it
//! - When its last player leaves, the registry records the instant
//! - `reap_expired` discards worlds that stayed empty for the grace period
//!
//! The emptiness check is repeated at reap time, so a world that gained a
//! player during the wait survives.
//!
//! ## Concurrency
//!
//! Share the registry as a [`SharedRegistry`]. The single mutex serializes
//! every call, which is what each `World` requires.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use tokio::sync::watch;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};
use verdant_procedural::WorldChunk;
use verdant_shared::{
    JoinRequest, LeaveOutcome, MovementUpdate, Player, PlayerId, Position, WorldId,
};

use crate::config::WorldConfig;
use crate::error::{WorldError, WorldResult};
use crate::movement::MovementValidator;
use crate::state::World;

/// Registry shared between transport tasks and the reaper.
pub type SharedRegistry = Arc<Mutex<WorldRegistry>>;

/// Everything a joining player needs.
#[derive(Clone, Debug)]
pub struct JoinResponse {
    /// The new player record.
    pub player: Player,
    /// Where the player was placed.
    pub spawn_position: Position,
    /// Players already in the world.
    pub existing_players: Vec<Player>,
    /// Chunks around the spawn point.
    pub initial_chunks: Vec<Arc<WorldChunk>>,
}

struct WorldSlot {
    world: World,
    empty_since: Option<Instant>,
}

/// All live worlds of one process.
pub struct WorldRegistry {
    config: Arc<WorldConfig>,
    validator: MovementValidator,
    worlds: HashMap<WorldId, WorldSlot>,
}

impl WorldRegistry {
    /// Creates an empty registry. Every world uses `config`.
    #[must_use]
    pub fn new(config: WorldConfig) -> Self {
        Self {
            validator: MovementValidator::from_config(&config),
            config: Arc::new(config),
            worlds: HashMap::new(),
        }
    }

    /// Wraps the registry for sharing.
    #[must_use]
    pub fn into_shared(self) -> SharedRegistry {
        Arc::new(Mutex::new(self))
    }

    /// Returns the configuration every world runs with.
    #[must_use]
    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    /// Adds a player to the requested world, creating the world if needed.
    ///
    /// # Errors
    ///
    /// `WorldFull` when the world is at capacity.
    pub fn join(&mut self, request: JoinRequest) -> WorldResult<JoinResponse> {
        let config = &self.config;
        let slot = self
            .worlds
            .entry(request.world_id.clone())
            .or_insert_with(|| {
                info!(world = %request.world_id, "world created");
                WorldSlot {
                    world: World::new(request.world_id.clone(), Arc::clone(config)),
                    empty_since: None,
                }
            });

        if slot.world.is_full() {
            warn!(world = %request.world_id, "join refused, world full");
            return Err(WorldError::WorldFull {
                world_id: request.world_id,
                capacity: self.config.max_players,
            });
        }

        let spawn_position = slot.world.spawn_position();
        let player = Player::new(PlayerId::new_random(), request.username, spawn_position);
        let existing_players = slot.world.players().cloned().collect();
        // Fresh random ids cannot collide, so the world always accepts them
        let initial_chunks = slot.world.add_player(player.clone()).unwrap_or_default();
        slot.empty_since = None;

        Ok(JoinResponse {
            player,
            spawn_position,
            existing_players,
            initial_chunks,
        })
    }

    /// Applies a movement update and returns the chunks that came into view.
    ///
    /// # Errors
    ///
    /// `UnknownWorld` / `UnknownPlayer` if either is missing, or the
    /// validator's error when the step is refused. A refused step leaves the
    /// player where it was.
    pub fn apply_move(
        &mut self,
        world_id: &WorldId,
        player_id: PlayerId,
        update: MovementUpdate,
    ) -> WorldResult<Vec<Arc<WorldChunk>>> {
        let slot = self
            .worlds
            .get_mut(world_id)
            .ok_or_else(|| WorldError::UnknownWorld(world_id.clone()))?;

        let current = slot
            .world
            .player(player_id)
            .ok_or_else(|| WorldError::UnknownPlayer {
                world_id: world_id.clone(),
                player_id,
            })?;

        self.validator.validate(current.position, &update)?;

        let moved = current.moved(&update);
        slot.world.update_player(moved.clone());
        Ok(slot.world.new_chunks_for_player(&moved))
    }

    /// Removes a player. Unknown worlds and players are ignored.
    ///
    /// When the world becomes empty, `now` starts its grace period.
    pub fn leave(&mut self, world_id: &WorldId, player_id: PlayerId, now: Instant) -> LeaveOutcome {
        let Some(slot) = self.worlds.get_mut(world_id) else {
            warn!(world = %world_id, player = %player_id, "leave for unknown world");
            return LeaveOutcome { world_empty: false };
        };

        slot.world.remove_player(player_id);
        let world_empty = slot.world.is_empty();
        if world_empty && slot.empty_since.is_none() {
            debug!(world = %world_id, "world empty, grace period started");
            slot.empty_since = Some(now);
        }

        LeaveOutcome { world_empty }
    }

    /// Discards every world that has been empty for the full grace period.
    ///
    /// Returns the identifiers of the discarded worlds.
    pub fn reap_expired(&mut self, now: Instant) -> Vec<WorldId> {
        let grace = self.config.empty_grace();
        let expired: Vec<WorldId> = self
            .worlds
            .iter()
            .filter(|(_, slot)| {
                slot.world.is_empty()
                    && slot
                        .empty_since
                        .is_some_and(|since| now.saturating_duration_since(since) >= grace)
            })
            .map(|(id, _)| id.clone())
            .collect();

        for id in &expired {
            if let Some(slot) = self.worlds.remove(id) {
                info!(world = %id, chunks = slot.world.chunk_count(), "world discarded");
            }
        }

        expired
    }

    /// Looks up a world.
    #[must_use]
    pub fn world(&self, id: &WorldId) -> Option<&World> {
        self.worlds.get(id).map(|slot| &slot.world)
    }

    /// Number of live worlds.
    #[must_use]
    pub fn world_count(&self) -> usize {
        self.worlds.len()
    }
}

/// Periodically reaps expired worlds until `shutdown` turns true or its
/// sender is dropped.
pub async fn run_reaper(
    registry: SharedRegistry,
    period: Duration,
    mut shutdown: watch::Receiver<bool>,
) {
    let mut ticker = tokio::time::interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let reaped = registry.lock().reap_expired(Instant::now());
                if !reaped.is_empty() {
                    debug!(count = reaped.len(), "reaper discarded worlds");
                }
            }
            changed = shutdown.changed() => {
                if changed.is_err() || *shutdown.borrow() {
                    break;
                }
            }
        }
    }
}
