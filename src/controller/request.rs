//! Outstanding remote work, tagged with the game it belongs to.

use crate::api::{ApiClient, ApiError, RemoteMove, Transport};
use squares_board::{BoardState, GameStatus};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, instrument};

/// Identity of one game, from `start` until the next `start` or `reset`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
#[display("game#{_0}")]
pub struct GameId(pub(super) u64);

/// Which remote call a request makes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    /// Ask for the computer's move.
    NextMove,
    /// Ask whether the game is over.
    Status,
}

/// A remote call the controller wants made.
///
/// Owns a snapshot of the board, so it can run while the controller keeps
/// handling input. Feed the [`Completion`] back to
/// [`TurnController::handle`](super::TurnController::handle).
#[derive(Debug)]
pub struct PendingRequest<T> {
    game: GameId,
    kind: RequestKind,
    delay: Duration,
    board: BoardState,
    api: Arc<ApiClient<T>>,
}

impl<T: Transport> PendingRequest<T> {
    pub(super) fn new(
        game: GameId,
        kind: RequestKind,
        delay: Duration,
        board: BoardState,
        api: Arc<ApiClient<T>>,
    ) -> Self {
        Self {
            game,
            kind,
            delay,
            board,
            api,
        }
    }

    /// Game the request belongs to.
    pub fn game(&self) -> GameId {
        self.game
    }

    /// Remote call this request makes.
    pub fn kind(&self) -> RequestKind {
        self.kind
    }

    /// Waits out the presentation delay, then performs the call.
    #[instrument(skip(self), fields(game = %self.game, kind = ?self.kind))]
    pub async fn run(self) -> Completion {
        if !self.delay.is_zero() {
            debug!(delay_ms = self.delay.as_millis() as u64, "Presentation delay");
            tokio::time::sleep(self.delay).await;
        }

        let response = match self.kind {
            RequestKind::NextMove => Response::NextMove(self.api.next_move(&self.board).await),
            RequestKind::Status => Response::Status(self.api.request_status(&self.board).await),
        };
        Completion {
            game: self.game,
            response,
        }
    }
}

/// Result of a remote call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    /// Answer to [`RequestKind::NextMove`].
    NextMove(Result<Option<RemoteMove>, ApiError>),
    /// Answer to [`RequestKind::Status`].
    Status(Result<GameStatus, ApiError>),
}

/// A finished [`PendingRequest`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    game: GameId,
    response: Response,
}

impl Completion {
    /// Game the originating request belonged to.
    pub fn game(&self) -> GameId {
        self.game
    }

    pub(super) fn into_response(self) -> Response {
        self.response
    }
}
