//! Board errors.

use derive_more::{Display, Error};

/// Error raised when creating a board or placing a stone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum BoardError {
    /// Requested board size is zero or its cell count overflows.
    #[display("Unsupported board size {size}")]
    InvalidConfig {
        /// Requested size.
        size: usize,
    },

    /// Coordinates fall outside the board.
    #[display("Cell ({row}, {col}) is outside the {size}x{size} board")]
    OutOfBounds {
        /// Requested row.
        row: usize,
        /// Requested column.
        col: usize,
        /// Board size.
        size: usize,
    },

    /// Target cell already holds a stone.
    #[display("Cell ({row}, {col}) is already occupied")]
    CellOccupied {
        /// Requested row.
        row: usize,
        /// Requested column.
        col: usize,
    },

    /// The game is over or was never started.
    #[display("Game is not active")]
    GameNotActive,
}
