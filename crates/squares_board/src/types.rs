//! Core domain types for Squares.

use serde::{Deserialize, Serialize};

/// Stone color. White always moves first.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(ascii_case_insensitive)]
pub enum Color {
    /// White stones (moves first).
    #[strum(serialize = "white", serialize = "w", to_string = "White")]
    White,
    /// Black stones.
    #[strum(serialize = "black", serialize = "b", to_string = "Black")]
    Black,
}

impl Color {
    /// Returns the complementary color.
    pub fn opponent(self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Single-letter wire code (`w` or `b`).
    pub fn wire_code(self) -> &'static str {
        match self {
            Color::White => "w",
            Color::Black => "b",
        }
    }

    /// Parses a wire code, accepting either case.
    pub fn from_wire_code(code: &str) -> Option<Self> {
        match code {
            "w" | "W" => Some(Color::White),
            "b" | "B" => Some(Color::Black),
            _ => None,
        }
    }

    /// Upper-case letter used by the server in result strings (`W wins`).
    pub fn letter(self) -> char {
        match self {
            Color::White => 'W',
            Color::Black => 'B',
        }
    }
}

/// A cell on the board. Once a stone is placed it never changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Cell {
    /// No stone.
    #[default]
    Empty,
    /// White stone.
    White,
    /// Black stone.
    Black,
}

impl Cell {
    /// Returns the stone color, if any.
    pub fn color(self) -> Option<Color> {
        match self {
            Cell::Empty => None,
            Cell::White => Some(Color::White),
            Cell::Black => Some(Color::Black),
        }
    }

    /// Checks whether the cell holds no stone.
    pub fn is_empty(self) -> bool {
        matches!(self, Cell::Empty)
    }

    /// Character used in the serialized board string.
    pub fn wire_char(self) -> char {
        match self {
            Cell::White => 'w',
            Cell::Black => 'b',
            Cell::Empty => ' ',
        }
    }
}

impl From<Color> for Cell {
    fn from(color: Color) -> Self {
        match color {
            Color::White => Cell::White,
            Color::Black => Cell::Black,
        }
    }
}
