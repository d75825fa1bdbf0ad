//! Counting invariants.

use super::Invariant;
use crate::BoardState;

/// Invariant: move count equals the occupied cells and the history length.
pub struct MoveCountInvariant;

impl Invariant<BoardState> for MoveCountInvariant {
    fn holds(board: &BoardState) -> bool {
        let occupied = board.cells().iter().filter(|c| !c.is_empty()).count();
        occupied == board.move_count() && board.history().len() == board.move_count()
    }

    fn description() -> &'static str {
        "Move count must equal the number of occupied cells"
    }
}

/// Invariant: the human and the computer play different colors.
pub struct ComplementaryColorsInvariant;

impl Invariant<BoardState> for ComplementaryColorsInvariant {
    fn holds(board: &BoardState) -> bool {
        board.player_color() != board.computer_color()
    }

    fn description() -> &'static str {
        "Player and computer colors must be complementary"
    }
}
