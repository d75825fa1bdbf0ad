//! Alternating turn invariant: White, Black, White, ...

use super::Invariant;
use crate::{BoardState, Color};

/// Invariant: colors alternate in the move history, starting with White.
pub struct AlternatingTurnInvariant;

impl Invariant<BoardState> for AlternatingTurnInvariant {
    fn holds(board: &BoardState) -> bool {
        board.history().iter().enumerate().all(|(i, mv)| {
            let expected = if i % 2 == 0 { Color::White } else { Color::Black };
            mv.color == expected
        })
    }

    fn description() -> &'static str {
        "Colors must alternate starting with White"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detects_repeated_color() {
        let mut board = BoardState::create(3, Color::White).unwrap();
        board.place(0, 0, Color::White).unwrap();
        board.place(0, 1, Color::White).unwrap();
        assert!(!AlternatingTurnInvariant::holds(&board));
    }

    #[test]
    fn test_detects_black_first() {
        let mut board = BoardState::create(3, Color::White).unwrap();
        board.place(0, 0, Color::Black).unwrap();
        assert!(!AlternatingTurnInvariant::holds(&board));
    }
}
