//! Batch request and response types.
//!
//! Every request names the game it addresses. Responses come back one per
//! request, in request order, each carrying its own result.

use crate::error::EngineError;
use crate::logger::GameLogger;
use carcassonne_core::{Game, GameSnapshot, LegalMove, Tile};
use tokio::sync::mpsc;

/// Identifier the engine assigns to each hosted game
pub type GameId = u64;

/// Ask for every legal move of `tile` in a game
#[derive(Debug, Clone)]
pub struct GetLegalMovesRequest {
    pub game_id: GameId,
    pub tile: Tile,
}

#[derive(Debug)]
pub struct GetLegalMovesResponse {
    pub game_id: GameId,
    pub result: Result<Vec<LegalMove>, EngineError>,
}

impl GetLegalMovesResponse {
    pub fn moves(&self) -> Option<&[LegalMove]> {
        self.result.as_deref().ok()
    }
}

/// Play a move for the current player of a game
#[derive(Debug, Clone)]
pub struct PlayTurnRequest {
    pub game_id: GameId,
    pub mv: LegalMove,
}

#[derive(Debug)]
pub struct PlayTurnResponse {
    pub game_id: GameId,
    /// The game as it stands after the turn
    pub result: Result<GameSnapshot, EngineError>,
}

impl PlayTurnResponse {
    pub fn snapshot(&self) -> Option<&GameSnapshot> {
        self.result.as_ref().ok()
    }
}

/// Channel a worker answers one batch on, tagged with the request's index
pub(crate) type Reply<R> = mpsc::UnboundedSender<(usize, R)>;

/// Commands sent from the engine to a worker.
pub(crate) enum Command {
    /// Take ownership of a newly created game
    Register {
        game_id: GameId,
        game: Box<Game>,
        logger: Option<GameLogger>,
    },

    GetLegalMoves {
        index: usize,
        request: GetLegalMovesRequest,
        reply: Reply<GetLegalMovesResponse>,
    },

    PlayTurn {
        index: usize,
        request: PlayTurnRequest,
        reply: Reply<PlayTurnResponse>,
    },
}

/// A request kind the engine can batch across workers
pub(crate) trait BatchRequest: Sized {
    type Response;

    fn game_id(&self) -> GameId;

    fn into_command(self, index: usize, reply: Reply<Self::Response>) -> Command;

    /// Response for a request that never reached a game
    fn failed(game_id: GameId, error: EngineError) -> Self::Response;
}

impl BatchRequest for GetLegalMovesRequest {
    type Response = GetLegalMovesResponse;

    fn game_id(&self) -> GameId {
        self.game_id
    }

    fn into_command(self, index: usize, reply: Reply<Self::Response>) -> Command {
        Command::GetLegalMoves {
            index,
            request: self,
            reply,
        }
    }

    fn failed(game_id: GameId, error: EngineError) -> Self::Response {
        GetLegalMovesResponse {
            game_id,
            result: Err(error),
        }
    }
}

impl BatchRequest for PlayTurnRequest {
    type Response = PlayTurnResponse;

    fn game_id(&self) -> GameId {
        self.game_id
    }

    fn into_command(self, index: usize, reply: Reply<Self::Response>) -> Command {
        Command::PlayTurn {
            index,
            request: self,
            reply,
        }
    }

    fn failed(game_id: GameId, error: EngineError) -> Self::Response {
        PlayTurnResponse {
            game_id,
            result: Err(error),
        }
    }
}
