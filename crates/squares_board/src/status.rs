//! Game status as reported by the remote server.

use crate::Color;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Status string the server uses for a completed game.
pub const FINISHED: &str = "finished";

/// How a finished game ended.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameResult {
    /// Nobody won.
    Draw,
    /// The given color won.
    Winner(Color),
    /// The server gave no result text.
    Unspecified,
    /// The server gave a result the client does not recognize.
    Unrecognized(String),
}

impl GameResult {
    /// Parses the server's `result` field (`"Draw"`, `"W wins"`, `"Black wins"`).
    #[instrument]
    pub fn parse(raw: Option<&str>) -> Self {
        let Some(raw) = raw.map(str::trim) else {
            return GameResult::Unspecified;
        };

        if raw.eq_ignore_ascii_case("draw") {
            return GameResult::Draw;
        }

        let winner = raw
            .strip_suffix(" wins")
            .or_else(|| raw.strip_suffix(" WINS"))
            .and_then(|name| name.trim().parse::<Color>().ok());

        match winner {
            Some(color) => GameResult::Winner(color),
            None if raw.is_empty() => GameResult::Unspecified,
            None => GameResult::Unrecognized(raw.to_string()),
        }
    }
}

impl std::fmt::Display for GameResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameResult::Draw => write!(f, "Draw"),
            GameResult::Winner(color) => write!(f, "{} wins", color.letter()),
            GameResult::Unspecified => write!(f, "Game over"),
            GameResult::Unrecognized(raw) => write!(f, "{raw}"),
        }
    }
}

/// Remote view of whether the game is over.
///
/// Transient: consumed immediately to drive the turn controller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    /// The game continues.
    InProgress,
    /// The game is over.
    Finished(GameResult),
}

impl GameStatus {
    /// Builds a status from the raw `status`/`result` fields.
    ///
    /// Anything other than `finished` counts as in progress; the server has
    /// been seen to send both `inProgress` and `ongoing`.
    pub fn from_remote(status: &str, result: Option<&str>) -> Self {
        if status.eq_ignore_ascii_case(FINISHED) {
            GameStatus::Finished(GameResult::parse(result))
        } else {
            GameStatus::InProgress
        }
    }
}
