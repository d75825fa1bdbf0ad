//! Turn sequencing between the human and the remote computer.
//!
//! The controller is a state machine driven by two kinds of input: user
//! actions (`start`, `select_cell`, `retry`, `reset`) and [`Completion`]s of
//! the remote calls it asked for. It never awaits anything itself. Each
//! transition that needs the server returns a [`PendingRequest`]; the caller
//! runs it wherever it likes and hands the completion back to
//! [`TurnController::handle`].
//!
//! At most one request is outstanding per game. Completions that belong to a
//! game which has since been reset or replaced are discarded.

mod notice;
mod phase;
mod request;

pub use notice::{ApiAvailability, Notice, Severity, View};
pub use phase::{ComputerOutcome, ComputerStep, Phase, PlayerStep};
pub use request::{Completion, GameId, PendingRequest, RequestKind, Response};

use crate::api::{ApiClient, ApiError, Availability, RemoteMove, Transport};
use squares_board::{BoardError, BoardInvariants, BoardState, Color, GameResult, GameStatus, InvariantSet};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info, instrument, warn};

/// Owns the board of the current game and sequences turns.
#[derive(Debug)]
pub struct TurnController<T> {
    api: Arc<ApiClient<T>>,
    move_delay: Duration,
    board: Option<BoardState>,
    game: GameId,
    phase: Phase,
    notice: Notice,
    availability: ApiAvailability,
}

impl<T: Transport> TurnController<T> {
    /// Creates an idle controller.
    ///
    /// `move_delay` is waited before each computer move request so the human
    /// can follow the game. It has no effect on correctness.
    pub fn new(api: ApiClient<T>, move_delay: Duration) -> Self {
        Self {
            api: Arc::new(api),
            move_delay,
            board: None,
            game: GameId(0),
            phase: Phase::Idle,
            notice: Notice::new("Start a game to play", Severity::Info),
            availability: ApiAvailability::default(),
        }
    }

    /// Shared handle to the API client, for work outside a game (health probes).
    pub fn api(&self) -> Arc<ApiClient<T>> {
        Arc::clone(&self.api)
    }

    /// Current phase.
    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    /// Board of the current game.
    pub fn board(&self) -> Option<&BoardState> {
        self.board.as_ref()
    }

    /// Latest status line.
    pub fn notice(&self) -> &Notice {
        &self.notice
    }

    /// Identity of the current (or last) game.
    pub fn game_id(&self) -> GameId {
        self.game
    }

    /// Last known API reachability.
    pub fn availability(&self) -> &ApiAvailability {
        &self.availability
    }

    /// Whether a cell selection would be acted on right now.
    pub fn accepts_input(&self) -> bool {
        self.phase == Phase::PlayerTurn(PlayerStep::AwaitingInput)
            && self
                .board
                .as_ref()
                .is_some_and(|b| b.is_active() && b.is_player_turn())
    }

    /// Snapshot for the presentation layer.
    pub fn view(&self) -> View<'_> {
        View {
            board: self.board.as_ref(),
            phase: &self.phase,
            notice: &self.notice,
            accepts_input: self.accepts_input(),
            can_retry: self.phase.can_retry(),
            availability: &self.availability,
        }
    }

    /// Starts a new game, discarding any current one.
    ///
    /// White always moves first, so a human playing Black gets back the
    /// request for the computer's opening move.
    #[instrument(skip(self))]
    pub fn start(
        &mut self,
        size: usize,
        player_color: Color,
    ) -> Result<Option<PendingRequest<T>>, BoardError> {
        let board = BoardState::create(size, player_color)?;
        let player_first = board.is_player_turn();

        self.game = GameId(self.game.0 + 1);
        self.board = Some(board);
        info!(game = %self.game, "Game started");
        self.notify("Game started!", Severity::Info);

        if player_first {
            self.phase = Phase::PlayerTurn(PlayerStep::AwaitingInput);
            Ok(None)
        } else {
            Ok(self.begin_computer_turn())
        }
    }

    /// Discards the current game. Outstanding requests become stale.
    #[instrument(skip(self), fields(game = %self.game))]
    pub fn reset(&mut self) {
        info!(phase = %self.phase, "Game reset");
        self.board = None;
        self.game = GameId(self.game.0 + 1);
        self.phase = Phase::Idle;
        self.notify("Game reset. Start a new game to play.", Severity::Info);
    }

    /// Handles the human selecting a cell.
    ///
    /// Selections made out of turn, on an occupied cell, off the board, or
    /// with no active game are ignored.
    #[instrument(skip(self), fields(game = %self.game))]
    pub fn select_cell(&mut self, row: usize, col: usize) -> Option<PendingRequest<T>> {
        if !self.accepts_input() {
            debug!(phase = %self.phase, "Ignoring selection outside the player's turn");
            return None;
        }

        let board = self.board.as_mut()?;
        let color = board.player_color();
        if let Err(e) = board.place(row, col, color) {
            debug!(error = %e, "Ignoring invalid selection");
            return None;
        }

        info!(row, col, %color, "Player moved");
        self.check_invariants();
        self.phase = Phase::PlayerTurn(PlayerStep::CheckingStatus);
        self.request(RequestKind::Status, Duration::ZERO)
    }

    /// Re-issues the request that last failed. Never called automatically.
    #[instrument(skip(self), fields(game = %self.game))]
    pub fn retry(&mut self) -> Option<PendingRequest<T>> {
        match self.phase {
            Phase::PlayerTurn(PlayerStep::StatusFailed) => {
                info!("Retrying status check");
                self.phase = Phase::PlayerTurn(PlayerStep::CheckingStatus);
                self.notify("Checking game status...", Severity::Info);
                self.request(RequestKind::Status, Duration::ZERO)
            }
            Phase::ComputerTurn(ComputerStep::MoveFailed) => {
                info!("Retrying computer move");
                self.begin_computer_turn()
            }
            Phase::ComputerTurn(ComputerStep::StatusFailed(outcome)) => {
                info!("Retrying status check");
                self.phase = Phase::ComputerTurn(ComputerStep::CheckingStatus(outcome));
                self.notify("Checking game status...", Severity::Info);
                self.request(RequestKind::Status, Duration::ZERO)
            }
            _ => {
                debug!(phase = %self.phase, "Nothing to retry");
                None
            }
        }
    }

    /// Applies the result of a remote call and returns the follow-up request, if any.
    #[instrument(skip(self, completion), fields(game = %self.game, from = %completion.game()))]
    pub fn handle(&mut self, completion: Completion) -> Option<PendingRequest<T>> {
        if completion.game() != self.game || self.board.is_none() {
            debug!("Discarding completion for a stale game");
            return None;
        }

        match (self.phase.clone(), completion.into_response()) {
            (Phase::PlayerTurn(PlayerStep::CheckingStatus), Response::Status(result)) => {
                match result {
                    Ok(GameStatus::Finished(outcome)) => {
                        self.finish(outcome);
                        None
                    }
                    Ok(GameStatus::InProgress) => {
                        self.switch_turn();
                        self.begin_computer_turn()
                    }
                    Err(e) => {
                        self.phase = Phase::PlayerTurn(PlayerStep::StatusFailed);
                        self.report(format!("Status check failed: {}", e), &e);
                        None
                    }
                }
            }
            (Phase::ComputerTurn(ComputerStep::Thinking), Response::NextMove(result)) => {
                match result {
                    Ok(Some(mv)) => self.apply_computer_move(mv),
                    Ok(None) => {
                        info!("Computer has no move, checking status");
                        self.phase =
                            Phase::ComputerTurn(ComputerStep::CheckingStatus(ComputerOutcome::NoMove));
                        self.request(RequestKind::Status, Duration::ZERO)
                    }
                    Err(e) => {
                        self.phase = Phase::ComputerTurn(ComputerStep::MoveFailed);
                        self.report(
                            format!("Computer move failed: {}. Check the API connection.", e),
                            &e,
                        );
                        None
                    }
                }
            }
            (
                Phase::ComputerTurn(ComputerStep::CheckingStatus(outcome)),
                Response::Status(result),
            ) => match (result, outcome) {
                (Ok(GameStatus::Finished(result)), _) => {
                    self.finish(result);
                    None
                }
                (Ok(GameStatus::InProgress), ComputerOutcome::Moved) => {
                    self.switch_turn();
                    self.phase = Phase::PlayerTurn(PlayerStep::AwaitingInput);
                    self.notify("Your turn", Severity::Info);
                    None
                }
                (Ok(GameStatus::InProgress), ComputerOutcome::NoMove) => {
                    warn!("Server has no move but reports the game in progress");
                    self.phase = Phase::ComputerTurn(ComputerStep::Stalled);
                    self.notify(
                        "The computer has no move but the game is not finished. Reset to start over.",
                        Severity::Error,
                    );
                    None
                }
                (Err(e), outcome) => {
                    self.phase = Phase::ComputerTurn(ComputerStep::StatusFailed(outcome));
                    self.report(format!("Status check failed: {}", e), &e);
                    None
                }
            },
            (phase, response) => {
                debug!(%phase, ?response, "Discarding completion the current phase does not expect");
                None
            }
        }
    }

    /// Runs `pending` and every follow-up request to completion.
    ///
    /// Convenient for headless play; interactive front ends run requests
    /// themselves so input stays responsive.
    pub async fn drive(&mut self, mut pending: Option<PendingRequest<T>>) {
        while let Some(request) = pending.take() {
            let completion = request.run().await;
            pending = self.handle(completion);
        }
    }

    /// Marks an availability probe as running.
    pub fn begin_availability_check(&mut self) {
        self.availability = ApiAvailability::Checking;
        if !self.phase.has_game() {
            self.notify("Checking API connection...", Severity::Info);
        }
    }

    /// Records the outcome of an availability probe.
    ///
    /// An unreachable API is remembered as a persistent warning; it does not
    /// block starting a game.
    #[instrument(skip(self))]
    pub fn record_availability(&mut self, availability: Availability) {
        match availability {
            Availability::Available { .. } => {
                self.availability = ApiAvailability::Available;
                if !self.phase.has_game() {
                    self.notify("API connected. Ready to play!", Severity::Success);
                }
            }
            Availability::Unavailable { message, .. } => {
                warn!(message = %message, "API unavailable");
                self.availability = ApiAvailability::Unavailable(message);
                if !self.phase.has_game() {
                    self.notify(
                        "Warning: cannot reach the API. The computer will not be able to move.",
                        Severity::Error,
                    );
                }
            }
        }
    }

    fn begin_computer_turn(&mut self) -> Option<PendingRequest<T>> {
        self.phase = Phase::ComputerTurn(ComputerStep::Thinking);
        self.notify("The computer is thinking...", Severity::Info);
        self.request(RequestKind::NextMove, self.move_delay)
    }

    fn apply_computer_move(&mut self, mv: RemoteMove) -> Option<PendingRequest<T>> {
        let Some((row, col)) = mv.cell() else {
            return self.reject_computer_move(mv, "negative coordinates".to_string());
        };

        let board = self.board.as_mut()?;
        let color = board.computer_color();
        if mv.color.is_some_and(|c| c != color) {
            warn!(%mv, expected = %color, "Server move color disagrees with the computer's color");
        }

        if let Err(e) = board.place(row, col, color) {
            return self.reject_computer_move(mv, e.to_string());
        }

        info!(row, col, %color, "Computer moved");
        self.check_invariants();
        self.phase = Phase::ComputerTurn(ComputerStep::CheckingStatus(ComputerOutcome::Moved));
        self.request(RequestKind::Status, Duration::ZERO)
    }

    fn reject_computer_move(&mut self, mv: RemoteMove, reason: String) -> Option<PendingRequest<T>> {
        warn!(%mv, reason = %reason, "Server proposed an unplayable move");
        self.phase = Phase::ComputerTurn(ComputerStep::MoveFailed);
        self.notify(
            format!("Computer move failed: unplayable move ({}): {}", mv, reason),
            Severity::Error,
        );
        None
    }

    fn finish(&mut self, result: GameResult) {
        let Some(board) = self.board.as_mut() else {
            return;
        };
        board.deactivate();
        let message = match &result {
            GameResult::Draw => "The game ended in a draw!".to_string(),
            GameResult::Winner(color) if *color == board.player_color() => "You won!".to_string(),
            GameResult::Winner(_) => "The computer won!".to_string(),
            GameResult::Unspecified => "Game over!".to_string(),
            GameResult::Unrecognized(raw) => format!("Game over: {}", raw),
        };
        info!(%result, "Game finished");
        self.phase = Phase::Finished(result);
        self.notify(message, Severity::Success);
    }

    fn switch_turn(&mut self) {
        if let Some(board) = self.board.as_mut() {
            board.switch_turn();
            debug!(turn = %board.current_turn(), "Turn switched");
        }
    }

    fn request(&self, kind: RequestKind, delay: Duration) -> Option<PendingRequest<T>> {
        let board = self.board.clone()?;
        Some(PendingRequest::new(
            self.game,
            kind,
            delay,
            board,
            Arc::clone(&self.api),
        ))
    }

    fn check_invariants(&self) {
        if let Some(board) = &self.board
            && let Err(violations) = BoardInvariants::check_all(board)
        {
            for violation in violations {
                error!(%violation, "Board invariant violated");
            }
        }
    }

    fn notify(&mut self, message: impl Into<String>, severity: Severity) {
        self.notice = Notice::new(message, severity);
        debug!(message = %self.notice.message, %severity, "Notice");
    }

    fn report(&mut self, message: String, error: &ApiError) {
        warn!(error = %error, "Remote call failed");
        self.notify(message, Severity::Error);
    }
}
