//! The game engine: a registry of games served by a fixed worker pool.

use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::logger::GameLogger;
use crate::protocol::{
    BatchRequest, Command, GameId, GetLegalMovesRequest, GetLegalMovesResponse, PlayTurnRequest,
    PlayTurnResponse,
};
use crate::worker::Worker;
use carcassonne_core::{Deck, Game, GameSnapshot, TileSet};
use dashmap::DashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::thread::{self, JoinHandle};
use tokio::sync::mpsc;
use tracing::{error, info, warn};

struct WorkerHandle {
    intake: mpsc::UnboundedSender<Command>,
    thread: JoinHandle<()>,
}

/// Hosts many games at once and serves batched requests against them
///
/// Each game belongs to exactly one worker for its whole life, chosen from
/// its id. Batch calls block the calling thread until every request has an
/// answer, so they must not be called from inside an async runtime.
pub struct GameEngine {
    workers: Vec<WorkerHandle>,
    /// Game id to the worker that owns it
    registry: DashMap<GameId, usize>,
    next_id: AtomicU64,
    config: EngineConfig,
}

impl GameEngine {
    /// Start `worker_count` workers logging into `log_dir`
    pub fn start(worker_count: usize, log_dir: impl Into<PathBuf>) -> Result<Self, EngineError> {
        Self::with_config(EngineConfig {
            worker_count,
            log_dir: Some(log_dir.into()),
            ..EngineConfig::default()
        })
    }

    pub fn with_config(config: EngineConfig) -> Result<Self, EngineError> {
        if config.worker_count == 0 {
            return Err(EngineError::InvalidWorkerCount);
        }
        if let Some(dir) = &config.log_dir {
            fs::create_dir_all(dir).map_err(EngineError::LogDirectory)?;
        }

        let mut workers = Vec::with_capacity(config.worker_count);
        for id in 0..config.worker_count {
            let (intake, receiver) = mpsc::unbounded_channel();
            let thread = thread::Builder::new()
                .name(format!("carcassonne-worker-{id}"))
                .spawn(move || Worker::new(id).run(receiver))
                .map_err(EngineError::WorkerSpawn)?;
            workers.push(WorkerHandle { intake, thread });
        }

        info!(
            workers = config.worker_count,
            log_dir = ?config.log_dir,
            "Game engine started"
        );

        Ok(Self {
            workers,
            registry: DashMap::new(),
            next_id: AtomicU64::new(0),
            config,
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn worker_count(&self) -> usize {
        self.workers.len()
    }

    pub fn game_count(&self) -> usize {
        self.registry.len()
    }

    /// Create a game with a random seed
    pub fn generate_game(&self, tile_set: &TileSet) -> Result<(GameId, GameSnapshot), EngineError> {
        self.generate_game_seeded(tile_set, rand::random())
    }

    /// Create and register a game whose deck is shuffled with `seed`
    ///
    /// The same tile set and seed always produce the same initial state.
    pub fn generate_game_seeded(
        &self,
        tile_set: &TileSet,
        seed: u64,
    ) -> Result<(GameId, GameSnapshot), EngineError> {
        let deck = Deck::shuffled(tile_set, seed);
        let game = Game::new_from_deck(deck.clone(), &self.config.game)?;
        let snapshot = game.snapshot();

        let game_id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let logger = self.config.log_dir.as_ref().and_then(|dir| {
            match GameLogger::create(dir, game_id) {
                Ok(mut logger) => {
                    logger.start(seed, self.config.game.player_count, &deck);
                    Some(logger)
                }
                Err(e) => {
                    warn!(game_id, "Cannot open game log, continuing without: {}", e);
                    None
                }
            }
        });

        let worker = self.route(game_id);
        let command = Command::Register {
            game_id,
            game: Box::new(game),
            logger,
        };
        if self.workers[worker].intake.send(command).is_err() {
            error!(game_id, worker, "Worker gone, cannot register game");
            return Err(EngineError::WorkerUnavailable);
        }
        // the worker sees Register before any request routed after this point
        self.registry.insert(game_id, worker);

        info!(game_id, seed, worker, "Game created");
        Ok((game_id, snapshot))
    }

    /// Legal moves for each request, in request order
    pub fn send_get_legal_moves_batch(
        &self,
        requests: Vec<GetLegalMovesRequest>,
    ) -> Vec<GetLegalMovesResponse> {
        self.dispatch(requests)
    }

    /// Play each requested move, answering with the resulting state in request order
    pub fn send_play_turn_batch(&self, requests: Vec<PlayTurnRequest>) -> Vec<PlayTurnResponse> {
        self.dispatch(requests)
    }

    fn route(&self, game_id: GameId) -> usize {
        (game_id % self.workers.len() as u64) as usize
    }

    /// Fan a batch out to the owning workers and collect the answers by index
    fn dispatch<R: BatchRequest>(&self, requests: Vec<R>) -> Vec<R::Response> {
        let mut slots: Vec<Option<R::Response>> = Vec::with_capacity(requests.len());
        slots.resize_with(requests.len(), || None);
        let mut game_ids = Vec::with_capacity(requests.len());

        let (reply, mut answers) = mpsc::unbounded_channel();
        for (index, request) in requests.into_iter().enumerate() {
            let game_id = request.game_id();
            game_ids.push(game_id);

            let Some(worker) = self.registry.get(&game_id).map(|entry| *entry) else {
                slots[index] = Some(R::failed(game_id, EngineError::GameNotFound(game_id)));
                continue;
            };
            let command = request.into_command(index, reply.clone());
            if self.workers[worker].intake.send(command).is_err() {
                slots[index] = Some(R::failed(game_id, EngineError::WorkerUnavailable));
            }
        }
        drop(reply);

        // closes once every worker has answered or dropped its reply handle
        while let Some((index, response)) = answers.blocking_recv() {
            slots[index] = Some(response);
        }

        slots
            .into_iter()
            .zip(game_ids)
            .map(|(slot, game_id)| {
                slot.unwrap_or_else(|| {
                    warn!(game_id, "Request lost by its worker");
                    R::failed(game_id, EngineError::WorkerUnavailable)
                })
            })
            .collect()
    }
}

impl Drop for GameEngine {
    fn drop(&mut self) {
        for (id, worker) in self.workers.drain(..).enumerate() {
            drop(worker.intake);
            if worker.thread.join().is_err() {
                error!(worker = id, "Worker panicked");
            }
        }
        info!(games = self.registry.len(), "Game engine stopped");
    }
}
