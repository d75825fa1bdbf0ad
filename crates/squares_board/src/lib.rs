//! Board state for the Squares client.
//!
//! The rules of Squares and the computer's move selection live on a remote
//! server. This crate only models what the client owns: the grid, whose turn
//! it is, the moves applied so far, and the status reported back by the server.
//!
//! # Example
//!
//! ```
//! use squares_board::{BoardState, Color};
//!
//! let mut board = BoardState::create(2, Color::White)?;
//! board.place(0, 0, Color::White)?;
//! board.switch_turn();
//! board.place(1, 1, Color::Black)?;
//! assert_eq!(board.serialize(), "w  b");
//! # Ok::<(), squares_board::BoardError>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod action;
mod board;
mod error;
pub mod invariants;
mod status;
mod types;

pub use action::Move;
pub use board::BoardState;
pub use error::BoardError;
pub use invariants::{BoardInvariants, Invariant, InvariantSet, InvariantViolation};
pub use status::{GameResult, GameStatus};
pub use types::{Cell, Color};
