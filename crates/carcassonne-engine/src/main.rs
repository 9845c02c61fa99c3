//! Random-play driver for the Carcassonne engine.
//!
//! Creates a batch of seeded games and plays them to the end in lock-step,
//! one legal-moves batch and one play-turn batch per round.

use anyhow::{bail, Context};
use carcassonne_core::{Bot, GameSnapshot, TileSet};
use carcassonne_engine::{
    EngineConfig, GameEngine, GameId, GetLegalMovesRequest, PlayTurnRequest,
};
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// A game in progress and the bot playing every seat of it
struct Table {
    game_id: GameId,
    seed: u64,
    state: GameSnapshot,
    bot: Bot,
}

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let games: usize = std::env::var("FUZZ_GAMES")
        .unwrap_or_else(|_| "8".into())
        .parse()
        .context("FUZZ_GAMES must be a number")?;

    let started = SystemTime::now().duration_since(UNIX_EPOCH)?.as_nanos();
    let mut config = EngineConfig::from_env()?;
    if config.log_dir.is_none() {
        config.log_dir = Some(PathBuf::from("logs").join(started.to_string()));
    }

    info!("Starting Carcassonne fuzz run with {} games...", games);

    let engine = GameEngine::with_config(config).context("failed to start game engine")?;
    let tile_set = TileSet::standard();

    let mut tables = Vec::with_capacity(games);
    for i in 0..games {
        let seed = (started as u64).wrapping_add(i as u64);
        let (game_id, state) = engine.generate_game_seeded(&tile_set, seed)?;
        info!("Game({}): created with seed {}", game_id, seed);
        tables.push(Table {
            game_id,
            seed,
            state,
            bot: Bot::with_seed(seed),
        });
    }

    let mut round = 0;
    tables.retain(|t| !t.state.is_finished());
    while !tables.is_empty() {
        round += 1;
        let mut requests = Vec::with_capacity(tables.len());
        for table in &tables {
            let Some(tile) = table.state.current_tile.clone() else {
                bail!("Game({}) is not finished but has no tile", table.game_id);
            };
            requests.push(GetLegalMovesRequest {
                game_id: table.game_id,
                tile,
            });
        }

        let mut plays = Vec::with_capacity(tables.len());
        for (table, response) in tables
            .iter_mut()
            .zip(engine.send_get_legal_moves_batch(requests))
        {
            let moves = response
                .result
                .with_context(|| format!("Game({}): round {} legal moves", table.game_id, round))?;
            let Some(mv) = table.bot.choose_move(&moves) else {
                bail!(
                    "Game({}) (seed {}) has a current tile but no legal move",
                    table.game_id,
                    table.seed
                );
            };
            debug!("Game({}): round {} playing at {}", table.game_id, round, mv.position);
            plays.push(PlayTurnRequest {
                game_id: table.game_id,
                mv,
            });
        }

        for (table, response) in tables
            .iter_mut()
            .zip(engine.send_play_turn_batch(plays))
        {
            table.state = response
                .result
                .with_context(|| format!("Game({}) (seed {}): round {} turn", table.game_id, table.seed, round))?;
        }

        for table in tables.iter().filter(|t| t.state.is_finished()) {
            let scores: Vec<u32> = table.state.players.iter().map(|p| p.score()).collect();
            info!(
                "Game({}): finished after {} turns, scores {:?}",
                table.game_id, table.state.turn, scores
            );
        }
        tables.retain(|t| !t.state.is_finished());
    }

    info!("All {} games finished in {} rounds", games, round);
    Ok(())
}
