//! Cursor movement for keyboard navigation.

use crossterm::event::KeyCode;

/// Selected cell on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cursor {
    /// Row, top to bottom.
    pub row: usize,
    /// Column, left to right.
    pub col: usize,
}

impl Cursor {
    /// Moves the cursor by arrow keys (or `hjkl`), staying on a `size × size` board.
    pub fn moved(self, key: KeyCode, size: usize) -> Self {
        let last = size.saturating_sub(1);
        let Cursor { row, col } = self.clamped(size);

        match key {
            KeyCode::Left | KeyCode::Char('h') => Cursor { row, col: col.saturating_sub(1) },
            KeyCode::Right | KeyCode::Char('l') => Cursor { row, col: (col + 1).min(last) },
            KeyCode::Up | KeyCode::Char('k') => Cursor { row: row.saturating_sub(1), col },
            KeyCode::Down | KeyCode::Char('j') => Cursor { row: (row + 1).min(last), col },
            _ => Cursor { row, col },
        }
    }

    /// Pulls the cursor back onto a board of the given size.
    pub fn clamped(self, size: usize) -> Self {
        let last = size.saturating_sub(1);
        Cursor {
            row: self.row.min(last),
            col: self.col.min(last),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_moves_within_bounds() {
        let cursor = Cursor { row: 1, col: 1 };
        assert_eq!(cursor.moved(KeyCode::Right, 3), Cursor { row: 1, col: 2 });
        assert_eq!(cursor.moved(KeyCode::Up, 3), Cursor { row: 0, col: 1 });
        assert_eq!(cursor.moved(KeyCode::Char('j'), 3), Cursor { row: 2, col: 1 });
    }

    #[test]
    fn test_stops_at_edges() {
        let corner = Cursor { row: 2, col: 2 };
        assert_eq!(corner.moved(KeyCode::Right, 3), corner);
        assert_eq!(corner.moved(KeyCode::Down, 3), corner);
        assert_eq!(Cursor::default().moved(KeyCode::Left, 3), Cursor::default());
    }

    #[test]
    fn test_clamps_after_board_shrinks() {
        let cursor = Cursor { row: 6, col: 4 };
        assert_eq!(cursor.moved(KeyCode::Enter, 3), Cursor { row: 2, col: 2 });
    }
}
