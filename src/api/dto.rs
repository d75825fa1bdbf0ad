//! Wire types exchanged with the server.

use derive_new::new;
use serde::{Deserialize, Serialize};
use squares_board::{BoardState, Color};

/// Request body for the `nextMove` and `status` endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardDto {
    /// Board edge length.
    pub size: usize,
    /// Row-major serialized grid, `size²` characters.
    pub data: String,
    /// `"w"` or `"b"`.
    pub next_player_color: String,
}

impl From<&BoardState> for BoardDto {
    fn from(board: &BoardState) -> Self {
        Self {
            size: board.size(),
            data: board.serialize(),
            next_player_color: board.current_turn().wire_code().to_string(),
        }
    }
}

/// Move proposed by the server.
///
/// The server speaks `x`/`y`: `x` is the column and `y` is the row. This is
/// the reverse of the row-first order used by [`BoardState::place`] and is
/// part of the wire contract, so the mapping happens only in [`Self::cell`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, new)]
pub struct RemoteMove {
    /// Column.
    pub x: i64,
    /// Row.
    pub y: i64,
    /// Color the server says it played, when it sent a recognizable one.
    pub color: Option<Color>,
}

impl RemoteMove {
    /// Returns `(row, col)`, or `None` if either coordinate is negative.
    pub fn cell(&self) -> Option<(usize, usize)> {
        let row = usize::try_from(self.y).ok()?;
        let col = usize::try_from(self.x).ok()?;
        Some((row, col))
    }
}

impl std::fmt::Display for RemoteMove {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "x={}, y={}", self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_board_dto_serializes_camel_case() {
        let mut board = BoardState::create(2, Color::White).unwrap();
        board.place(0, 0, Color::White).unwrap();
        board.switch_turn();

        let json = serde_json::to_value(BoardDto::from(&board)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"size": 2, "data": "w   ", "nextPlayerColor": "b"})
        );
    }

    #[test]
    fn test_remote_move_transposes_axes() {
        let mv = RemoteMove::new(2, 0, Some(Color::Black));
        assert_eq!(mv.cell(), Some((0, 2)));
    }

    #[test]
    fn test_remote_move_rejects_negative() {
        assert_eq!(RemoteMove::new(-1, 0, None).cell(), None);
    }
}
