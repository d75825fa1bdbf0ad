//! History consistency: every recorded move is still on the board.

use super::Invariant;
use crate::{BoardState, Cell};

/// Invariant: each move in the history matches the stone in its cell.
///
/// Together with the move count invariant this means cells never change
/// once occupied.
pub struct HistoryConsistentInvariant;

impl Invariant<BoardState> for HistoryConsistentInvariant {
    fn holds(board: &BoardState) -> bool {
        board
            .history()
            .iter()
            .all(|mv| board.cell(mv.row, mv.col) == Some(Cell::from(mv.color)))
    }

    fn description() -> &'static str {
        "Every recorded move must match the stone on its cell"
    }
}
