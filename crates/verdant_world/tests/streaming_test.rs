//! # Chunk Streaming
//!
//! End-to-end checks of what a player is sent on join and on every move:
//! view squares, world-edge clipping, deltas and shared caching.

use std::collections::HashSet;
use std::sync::Arc;

use verdant_procedural::ChunkCoord;
use verdant_shared::{Direction, JoinRequest, MovementUpdate, Player, PlayerId, Position, WorldId};
use verdant_world::{World, WorldConfig, WorldError, WorldRegistry};

fn world() -> World {
    let config = WorldConfig {
        spawn_seed: Some(1),
        ..WorldConfig::default()
    };
    World::new(WorldId::from("stream"), Arc::new(config))
}

fn player_at(x: f64, y: f64) -> Player {
    Player::new(PlayerId::new_random(), "walker", Position::new(x, y))
}

fn coords(chunks: &[Arc<verdant_procedural::WorldChunk>]) -> HashSet<ChunkCoord> {
    chunks.iter().map(|chunk| chunk.coord).collect()
}

fn block(cx: std::ops::RangeInclusive<i32>, cy: std::ops::RangeInclusive<i32>) -> HashSet<ChunkCoord> {
    cx.flat_map(|x| cy.clone().map(move |y| ChunkCoord::new(x, y))).collect()
}

/// Test: A player at the world centre sees the 5x5 block around chunk (5, 5).
#[test]
fn test_centre_view_square() {
    let mut world = world();
    let chunks = world.add_player(player_at(2500.0, 2500.0)).unwrap();

    assert_eq!(chunks.len(), 25);
    assert_eq!(coords(&chunks), block(3..=7, 3..=7));
}

/// Test: Chunks before the origin and past the far edge are never sent.
#[test]
fn test_edges_are_clipped() {
    let mut world = world();

    let near = world.add_player(player_at(100.0, 100.0)).unwrap();
    assert_eq!(coords(&near), block(0..=2, 0..=2));

    let far = world.add_player(player_at(4900.0, 4900.0)).unwrap();
    assert_eq!(coords(&far), block(7..=9, 7..=9));

    let edge = world.add_player(player_at(2500.0, 10.0)).unwrap();
    assert_eq!(coords(&edge), block(3..=7, 0..=2));
}

/// Test: A finite position far outside the chunk grid yields no chunks.
#[test]
fn test_far_position_gets_no_chunks() {
    let mut world = world();
    let chunks = world.add_player(player_at(1e13, -1e13)).unwrap();

    assert!(chunks.is_empty());
    assert_eq!(world.chunk_count(), 0);
    assert_eq!(world.player_count(), 1);
}

/// Test: Recomputing without moving delivers nothing.
#[test]
fn test_standing_still_is_empty() {
    let mut world = world();
    let player = player_at(1234.0, 3456.0);
    world.add_player(player.clone());

    for _ in 0..3 {
        assert!(world.new_chunks_for_player(&player).is_empty());
    }
}

/// Test: The delta after a diagonal move is exactly the new square minus the old.
#[test]
fn test_diagonal_delta_is_set_difference() {
    let mut world = world();
    let player = player_at(2500.0, 2500.0);
    let id = player.id;
    world.add_player(player.clone());
    let before = world.visible_chunks(id).unwrap().clone();

    let moved = player.moved(&MovementUpdate {
        position: Position::new(3000.0, 3000.0),
        direction: Direction::Down,
        is_moving: true,
    });
    world.update_player(moved.clone());
    let delta = world.new_chunks_for_player(&moved);

    let after = block(4..=8, 4..=8);
    let expected: HashSet<ChunkCoord> = after.difference(&before).copied().collect();
    assert_eq!(delta.len(), 9);
    assert_eq!(coords(&delta), expected);
    assert_eq!(world.visible_chunks(id).unwrap(), &after);
}

/// Test: Walking away and back resends the chunks that fell out of range.
#[test]
fn test_return_trip_resends() {
    let mut world = world();
    let player = player_at(2500.0, 2500.0);
    world.add_player(player.clone());

    let mut away = player.clone();
    away.position = Position::new(4500.0, 2500.0);
    world.update_player(away.clone());
    let outbound = world.new_chunks_for_player(&away);
    assert_eq!(coords(&outbound), block(8..=9, 3..=7));

    world.update_player(player.clone());
    let inbound = world.new_chunks_for_player(&player);
    assert_eq!(coords(&inbound), block(3..=6, 3..=7));
}

/// Test: Players in the same area share cached chunks instead of regenerating.
#[test]
fn test_cache_is_shared_between_players() {
    let mut world = world();
    let first = world.add_player(player_at(2500.0, 2500.0)).unwrap();
    let second = world.add_player(player_at(2600.0, 2600.0)).unwrap();

    assert_eq!(world.chunk_count(), 25);
    for chunk in &second {
        let original = first.iter().find(|c| c.coord == chunk.coord).unwrap();
        assert!(Arc::ptr_eq(original, chunk));
    }
}

/// Test: Entity ids stay unique across every chunk of one world.
#[test]
fn test_entity_ids_unique_in_world() {
    let mut world = world();
    let mut chunks = world.add_player(player_at(1000.0, 1000.0)).unwrap();
    chunks.extend(world.add_player(player_at(4000.0, 4000.0)).unwrap());

    let mut ids = HashSet::new();
    for chunk in &chunks {
        let all = chunk
            .trees
            .iter()
            .map(|t| t.id)
            .chain(chunk.bushes.iter().map(|b| b.id))
            .chain(chunk.flowers.iter().map(|f| f.id));
        for id in all {
            assert!(ids.insert(id), "duplicate entity id {id}");
        }
    }
}

/// Test: Joins stop at capacity and resume after a leave.
#[test]
fn test_capacity_through_registry() {
    let mut registry = WorldRegistry::new(WorldConfig {
        max_players: 3,
        ..WorldConfig::default()
    });
    let request = || JoinRequest {
        username: "bot".into(),
        world_id: WorldId::from("small"),
    };

    let joined: Vec<_> = (0..3).map(|_| registry.join(request()).unwrap()).collect();
    assert!(matches!(registry.join(request()), Err(WorldError::WorldFull { capacity: 3, .. })));

    registry.leave(&WorldId::from("small"), joined[0].player.id, std::time::Instant::now());
    let late = registry.join(request()).unwrap();
    assert_eq!(late.existing_players.len(), 2);
}

/// Test: The shipped sample configuration loads and matches the defaults.
#[test]
fn test_sample_config_loads() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/../../config/world.toml");
    let config = WorldConfig::from_toml_file(path).unwrap();
    let defaults = WorldConfig::default();

    assert!((config.world_width - defaults.world_width).abs() < f64::EPSILON);
    assert!((config.chunk_size - defaults.chunk_size).abs() < f64::EPSILON);
    assert_eq!(config.view_radius, defaults.view_radius);
    assert_eq!(config.max_players, defaults.max_players);
    assert_eq!(config.spawn_seed, None);
}
