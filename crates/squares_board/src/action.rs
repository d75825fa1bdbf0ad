//! Moves as first-class values.

use crate::Color;
use serde::{Deserialize, Serialize};

/// A cell assignment: `color` placed at (`row`, `col`).
///
/// Coordinates are row-first. Remote moves arrive as `x`/`y` and are mapped
/// with `x` as the column and `y` as the row before becoming a `Move`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    /// Zero-based row.
    pub row: usize,
    /// Zero-based column.
    pub col: usize,
    /// Color of the placed stone.
    pub color: Color,
}

impl Move {
    /// Creates a new move.
    pub fn new(row: usize, col: usize, color: Color) -> Self {
        Self { row, col, color }
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} at ({}, {})", self.color, self.row, self.col)
    }
}
