//! Controller phases.

use squares_board::GameResult;

/// Top-level controller state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    /// No game.
    Idle,
    /// The human is to move.
    PlayerTurn(PlayerStep),
    /// The remote computer is to move.
    ComputerTurn(ComputerStep),
    /// The game is over; only start or reset are accepted.
    Finished(GameResult),
}

/// Progress within the human's turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerStep {
    /// Waiting for a cell selection.
    AwaitingInput,
    /// Move applied; status request outstanding.
    CheckingStatus,
    /// Move applied but the status request failed. Retry re-queries status.
    StatusFailed,
}

/// What the computer's move request produced, for the status check that follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComputerOutcome {
    /// The computer placed a stone.
    Moved,
    /// The server said no move is possible.
    NoMove,
}

/// Progress within the computer's turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComputerStep {
    /// Presentation delay and move request outstanding.
    Thinking,
    /// The move request failed; the turn has not advanced.
    MoveFailed,
    /// Status request outstanding.
    CheckingStatus(ComputerOutcome),
    /// Status request failed. Retry re-queries status.
    StatusFailed(ComputerOutcome),
    /// The server had no move yet says the game is not finished.
    ///
    /// There is no recovery from here other than reset or a new game.
    Stalled,
}

impl Phase {
    /// Checks whether a game has been started and not reset.
    pub fn has_game(&self) -> bool {
        !matches!(self, Phase::Idle)
    }

    /// Checks whether a remote request is outstanding.
    pub fn is_waiting(&self) -> bool {
        matches!(
            self,
            Phase::PlayerTurn(PlayerStep::CheckingStatus)
                | Phase::ComputerTurn(ComputerStep::Thinking)
                | Phase::ComputerTurn(ComputerStep::CheckingStatus(_))
        )
    }

    /// Checks whether [`TurnController::retry`](super::TurnController::retry) has anything to do.
    pub fn can_retry(&self) -> bool {
        matches!(
            self,
            Phase::PlayerTurn(PlayerStep::StatusFailed)
                | Phase::ComputerTurn(ComputerStep::MoveFailed)
                | Phase::ComputerTurn(ComputerStep::StatusFailed(_))
        )
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Phase::Idle => write!(f, "Idle"),
            Phase::PlayerTurn(step) => write!(f, "PlayerTurn({:?})", step),
            Phase::ComputerTurn(step) => write!(f, "ComputerTurn({:?})", step),
            Phase::Finished(result) => write!(f, "Finished({})", result),
        }
    }
}
