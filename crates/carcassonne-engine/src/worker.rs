//! Worker threads owning a share of the hosted games.
//!
//! A worker is the only place its games are ever touched. Commands for one
//! game always arrive on the same worker's intake, so they run in the order
//! they were sent without any per-game locking.

use crate::error::EngineError;
use crate::logger::GameLogger;
use crate::protocol::{
    Command, GameId, GetLegalMovesRequest, GetLegalMovesResponse, PlayTurnRequest,
    PlayTurnResponse,
};
use carcassonne_core::Game;
use std::collections::HashMap;
use tokio::sync::mpsc;
use tracing::{debug, info};

/// A game together with its event log
struct HostedGame {
    game: Game,
    logger: Option<GameLogger>,
}

pub(crate) struct Worker {
    id: usize,
    games: HashMap<GameId, HostedGame>,
}

impl Worker {
    pub fn new(id: usize) -> Self {
        Self {
            id,
            games: HashMap::new(),
        }
    }

    /// Process commands until every sender is gone
    pub fn run(mut self, mut intake: mpsc::UnboundedReceiver<Command>) {
        info!(worker = self.id, "Worker started");
        while let Some(command) = intake.blocking_recv() {
            self.handle(command);
        }
        info!(worker = self.id, games = self.games.len(), "Worker stopped");
    }

    fn handle(&mut self, command: Command) {
        match command {
            Command::Register {
                game_id,
                game,
                logger,
            } => {
                debug!(worker = self.id, game_id, "Registered game");
                self.games.insert(
                    game_id,
                    HostedGame {
                        game: *game,
                        logger,
                    },
                );
            }
            Command::GetLegalMoves {
                index,
                request,
                reply,
            } => {
                let response = self.get_legal_moves(request);
                let _ = reply.send((index, response));
            }
            Command::PlayTurn {
                index,
                request,
                reply,
            } => {
                let response = self.play_turn(request);
                let _ = reply.send((index, response));
            }
        }
    }

    fn get_legal_moves(&self, request: GetLegalMovesRequest) -> GetLegalMovesResponse {
        let result = match self.games.get(&request.game_id) {
            Some(hosted) => Ok(hosted.game.legal_moves(&request.tile)),
            None => Err(EngineError::GameNotFound(request.game_id)),
        };
        GetLegalMovesResponse {
            game_id: request.game_id,
            result,
        }
    }

    fn play_turn(&mut self, request: PlayTurnRequest) -> PlayTurnResponse {
        let game_id = request.game_id;
        let Some(hosted) = self.games.get_mut(&game_id) else {
            return PlayTurnResponse {
                game_id,
                result: Err(EngineError::GameNotFound(game_id)),
            };
        };

        let result = match hosted.game.play_turn(request.mv) {
            Ok(events) => {
                if let Some(logger) = hosted.logger.as_mut() {
                    for event in &events {
                        logger.record(event);
                    }
                }
                if hosted.game.is_finished() {
                    info!(game_id, scores = ?hosted.game.scores(), "Game finished");
                }
                Ok(hosted.game.snapshot())
            }
            Err(e) => {
                debug!(game_id, "Turn rejected: {}", e);
                Err(EngineError::Game(e))
            }
        };

        PlayTurnResponse { game_id, result }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use carcassonne_core::{GameConfig, GameError, LegalMove, Position, TileSet};

    fn worker_with_game(game_id: GameId) -> Worker {
        let mut worker = Worker::new(0);
        let game = Game::new(&TileSet::standard(), 1, &GameConfig::default()).unwrap();
        worker.handle(Command::Register {
            game_id,
            game: Box::new(game),
            logger: None,
        });
        worker
    }

    #[test]
    fn test_unknown_game() {
        let mut worker = worker_with_game(1);
        let tile = carcassonne_core::tiletemplates::straight_road();
        let response = worker.get_legal_moves(GetLegalMovesRequest { game_id: 2, tile: tile.clone() });
        assert!(matches!(response.result, Err(EngineError::GameNotFound(2))));

        let response = worker.play_turn(PlayTurnRequest {
            game_id: 2,
            mv: LegalMove {
                tile,
                position: Position::new(1, 0),
                meeple: None,
            },
        });
        assert!(matches!(response.result, Err(EngineError::GameNotFound(2))));
    }

    #[test]
    fn test_rejected_turn_reports_game_error() {
        let mut worker = worker_with_game(1);
        let tile = worker.games[&1].game.current_tile().unwrap().clone();
        let response = worker.play_turn(PlayTurnRequest {
            game_id: 1,
            mv: LegalMove {
                tile,
                position: Position::new(9, 9),
                meeple: None,
            },
        });
        assert!(matches!(
            response.result,
            Err(EngineError::Game(GameError::InvalidPosition))
        ));
    }

    #[test]
    fn test_play_turn_returns_new_state() {
        let mut worker = worker_with_game(4);
        let game = &worker.games[&4].game;
        let tile = game.current_tile().unwrap().clone();
        let mv = game.legal_moves(&tile)[0].clone();

        let response = worker.play_turn(PlayTurnRequest { game_id: 4, mv });
        let snapshot = response.snapshot().unwrap();
        assert_eq!(snapshot.turn, 1);
        assert_eq!(snapshot.tiles.len(), 2);
    }
}
