//! Board state owned by the client for the length of one game.

use crate::{BoardError, Cell, Color, Move};
use tracing::{debug, instrument};

/// `size × size` grid plus the metadata of the game being played on it.
///
/// Invariants:
/// - `player_color` and `computer_color` are complementary.
/// - A cell, once occupied, never changes.
/// - `move_count` equals the number of occupied cells.
/// - When inactive, no moves can be applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardState {
    size: usize,
    /// Cells in row-major order.
    grid: Vec<Cell>,
    player_color: Color,
    computer_color: Color,
    current_turn: Color,
    is_active: bool,
    move_count: usize,
    history: Vec<Move>,
}

impl BoardState {
    /// Creates an empty, active board. White moves first.
    #[instrument]
    pub fn create(size: usize, player_color: Color) -> Result<Self, BoardError> {
        let cells = size
            .checked_mul(size)
            .filter(|_| size >= 1)
            .ok_or(BoardError::InvalidConfig { size })?;

        debug!(cells, "Allocating empty board");
        Ok(Self {
            size,
            grid: vec![Cell::Empty; cells],
            player_color,
            computer_color: player_color.opponent(),
            current_turn: Color::White,
            is_active: true,
            move_count: 0,
            history: Vec::new(),
        })
    }

    /// Places a stone. On error the board is left untouched.
    #[instrument(skip(self), fields(size = self.size, move_count = self.move_count))]
    pub fn place(&mut self, row: usize, col: usize, color: Color) -> Result<(), BoardError> {
        let index = self.index(row, col).ok_or(BoardError::OutOfBounds {
            row,
            col,
            size: self.size,
        })?;

        if !self.grid[index].is_empty() {
            return Err(BoardError::CellOccupied { row, col });
        }

        if !self.is_active {
            return Err(BoardError::GameNotActive);
        }

        self.grid[index] = Cell::from(color);
        self.move_count += 1;
        self.history.push(Move::new(row, col, color));
        debug!(move_count = self.move_count, "Stone placed");
        Ok(())
    }

    /// Row-major wire encoding: `w` for White, `b` for Black, space for empty.
    pub fn serialize(&self) -> String {
        self.grid.iter().map(|cell| cell.wire_char()).collect()
    }

    /// Hands the move to the other color.
    pub fn switch_turn(&mut self) {
        self.current_turn = self.current_turn.opponent();
    }

    /// Marks the game as over. No further moves are accepted.
    pub fn deactivate(&mut self) {
        self.is_active = false;
    }

    /// Returns the cell at (`row`, `col`), or `None` when out of bounds.
    pub fn cell(&self, row: usize, col: usize) -> Option<Cell> {
        self.index(row, col).map(|i| self.grid[i])
    }

    /// Iterates over the rows, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.grid.chunks(self.size)
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> &[Cell] {
        &self.grid
    }

    /// Board edge length.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Color played by the human.
    pub fn player_color(&self) -> Color {
        self.player_color
    }

    /// Color played by the remote computer.
    pub fn computer_color(&self) -> Color {
        self.computer_color
    }

    /// Color whose move is next.
    pub fn current_turn(&self) -> Color {
        self.current_turn
    }

    /// Whether the game is still accepting moves.
    pub fn is_active(&self) -> bool {
        self.is_active
    }

    /// Number of moves applied since the game started.
    pub fn move_count(&self) -> usize {
        self.move_count
    }

    /// Moves in the order they were applied.
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    /// Checks whether it is the human's move.
    pub fn is_player_turn(&self) -> bool {
        self.current_turn == self.player_color
    }

    fn index(&self, row: usize, col: usize) -> Option<usize> {
        (row < self.size && col < self.size).then(|| row * self.size + col)
    }

    #[cfg(test)]
    pub(crate) fn grid_mut(&mut self) -> &mut Vec<Cell> {
        &mut self.grid
    }
}

impl std::fmt::Display for BoardState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, row) in self.rows().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            for cell in row {
                let symbol = match cell {
                    Cell::Empty => '.',
                    Cell::White => 'W',
                    Cell::Black => 'B',
                };
                write!(f, "{symbol}")?;
            }
        }
        Ok(())
    }
}
