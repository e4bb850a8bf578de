//! # World Walk
//!
//! Drives a handful of bots through one world and reports how much terrain
//! was generated and streamed.
//!
//! ```text
//! world_walk [config.toml]
//! ```
//!
//! Without an argument the built-in defaults are used, with a fixed spawn
//! seed so runs are comparable.

use std::error::Error;
use std::time::Instant;

use verdant_shared::{Direction, JoinRequest, MovementUpdate, PlayerId, Position, WorldId};
use verdant_world::{WorldConfig, WorldRegistry};

const BOT_COUNT: usize = 8;
const STEPS: usize = 100;

struct Bot {
    id: PlayerId,
    position: Position,
    heading: (f64, f64),
    chunks_received: usize,
}

fn direction_for(heading: (f64, f64)) -> Direction {
    if heading.0.abs() >= heading.1.abs() {
        if heading.0 >= 0.0 {
            Direction::Right
        } else {
            Direction::Left
        }
    } else if heading.1 >= 0.0 {
        Direction::Down
    } else {
        Direction::Up
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let config = match std::env::args().nth(1) {
        Some(path) => WorldConfig::from_toml_file(path)?,
        None => WorldConfig {
            spawn_seed: Some(2024),
            ..WorldConfig::default()
        },
    };

    println!("╔══════════════════════════════════════════════════════════════════╗");
    println!("║                  VERDANT - WORLD WALK                            ║");
    println!("╚══════════════════════════════════════════════════════════════════╝");
    println!();
    println!("┌─ CONFIGURATION ─────────────────────────────────────────────────┐");
    println!("│ World:              {}x{}", config.world_width, config.world_height);
    println!("│ Chunk Size:         {}", config.chunk_size);
    println!("│ View Radius:        {}", config.view_radius);
    println!("│ Max Step:           {}", config.max_move_distance);
    println!("│ Bots:               {BOT_COUNT}");
    println!("│ Steps per Bot:      {STEPS}");
    println!("└──────────────────────────────────────────────────────────────────┘");
    println!();

    // Diagonal headings round up slightly, stay under the limit
    let stride = config.max_move_distance * 0.95;
    let mut registry = WorldRegistry::new(config);
    let world_id = WorldId::from("walk");
    let start = Instant::now();

    let mut bots = Vec::with_capacity(BOT_COUNT);
    for i in 0..BOT_COUNT {
        let response = registry.join(JoinRequest {
            username: format!("bot_{i}"),
            world_id: world_id.clone(),
        })?;

        #[allow(clippy::cast_precision_loss)]
        let angle = std::f64::consts::TAU * i as f64 / BOT_COUNT as f64;
        bots.push(Bot {
            id: response.player.id,
            position: response.spawn_position,
            heading: (angle.cos(), angle.sin()),
            chunks_received: response.initial_chunks.len(),
        });
    }

    let mut rejected = 0usize;
    for _ in 0..STEPS {
        for bot in &mut bots {
            let update = MovementUpdate {
                position: Position::new(
                    bot.position.x + bot.heading.0 * stride,
                    bot.position.y + bot.heading.1 * stride,
                ),
                direction: direction_for(bot.heading),
                is_moving: true,
            };

            match registry.apply_move(&world_id, bot.id, update) {
                Ok(chunks) => {
                    bot.position = update.position;
                    bot.chunks_received += chunks.len();
                }
                Err(_) => rejected += 1,
            }
        }
    }

    let elapsed = start.elapsed();

    println!("┌─ RESULTS ───────────────────────────────────────────────────────┐");
    if let Some(world) = registry.world(&world_id) {
        println!("│ Players:            {}", world.player_count());
        println!("│ Chunks Generated:   {}", world.chunk_count());
    }
    for (i, bot) in bots.iter().enumerate() {
        println!(
            "│ bot_{i}: ({:>7.1}, {:>7.1})  chunks received: {}",
            bot.position.x, bot.position.y, bot.chunks_received
        );
    }
    println!("│ Rejected Moves:     {rejected}");
    println!("│ Elapsed:            {elapsed:?}");
    println!("└──────────────────────────────────────────────────────────────────┘");

    let now = Instant::now();
    for bot in &bots {
        registry.leave(&world_id, bot.id, now);
    }
    let grace = registry.config().empty_grace();
    let reaped = registry.reap_expired(now + grace);
    println!();
    println!("Reaped {} world(s), {} remaining", reaped.len(), registry.world_count());

    Ok(())
}
