//! Front-end state that is not part of the game.

use super::input::Cursor;
use crossterm::event::KeyCode;
use squares::config::MAX_BOARD_SIZE;
use squares_board::Color;
use tracing::debug;

/// The server rejects boards smaller than this.
pub const MIN_BOARD_SIZE: usize = 3;

/// What a key press asks the controller to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Nothing for the controller.
    None,
    /// Leave the program.
    Quit,
    /// Start a game with the pending settings.
    Start {
        /// Board size.
        size: usize,
        /// Human's color.
        color: Color,
    },
    /// Select a cell.
    Select {
        /// Row.
        row: usize,
        /// Column.
        col: usize,
    },
    /// Discard the current game.
    Reset,
    /// Retry the failed request.
    Retry,
}

/// Cursor and settings for the next game.
#[derive(Debug, Clone)]
pub struct App {
    cursor: Cursor,
    next_size: usize,
    next_color: Color,
}

impl App {
    /// Creates front-end state with the configured defaults.
    ///
    /// The size is clamped to what the server accepts and the layout can draw.
    pub fn new(size: usize, color: Color) -> Self {
        Self {
            cursor: Cursor::default(),
            next_size: size.clamp(MIN_BOARD_SIZE, MAX_BOARD_SIZE),
            next_color: color,
        }
    }

    /// Current cursor.
    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// Size the next game will use.
    pub fn next_size(&self) -> usize {
        self.next_size
    }

    /// Color the human will play in the next game.
    pub fn next_color(&self) -> Color {
        self.next_color
    }

    /// Translates a key press. `board_size` is the size of the game on screen.
    pub fn on_key(&mut self, key: KeyCode, board_size: Option<usize>) -> Action {
        debug!(?key, "Key pressed");
        match key {
            KeyCode::Char('q') | KeyCode::Esc => Action::Quit,
            KeyCode::Char('s') => {
                self.cursor = Cursor::default();
                Action::Start {
                    size: self.next_size,
                    color: self.next_color,
                }
            }
            KeyCode::Char('r') => Action::Reset,
            KeyCode::Char('t') => Action::Retry,
            KeyCode::Char('c') => {
                self.next_color = self.next_color.opponent();
                Action::None
            }
            KeyCode::Char('+') | KeyCode::Char('=') => {
                self.next_size = (self.next_size + 1).clamp(MIN_BOARD_SIZE, MAX_BOARD_SIZE);
                Action::None
            }
            KeyCode::Char('-') => {
                self.next_size = self
                    .next_size
                    .saturating_sub(1)
                    .clamp(MIN_BOARD_SIZE, MAX_BOARD_SIZE);
                Action::None
            }
            KeyCode::Enter | KeyCode::Char(' ') => match board_size {
                Some(size) => {
                    let Cursor { row, col } = self.cursor.clamped(size);
                    Action::Select { row, col }
                }
                None => Action::None,
            },
            other => {
                if let Some(size) = board_size {
                    self.cursor = self.cursor.moved(other, size);
                }
                Action::None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_uses_cursor() {
        let mut app = App::new(5, Color::White);
        app.on_key(KeyCode::Down, Some(5));
        app.on_key(KeyCode::Right, Some(5));
        assert_eq!(app.on_key(KeyCode::Enter, Some(5)), Action::Select { row: 1, col: 1 });
    }

    #[test]
    fn test_select_without_board_does_nothing() {
        let mut app = App::new(5, Color::White);
        assert_eq!(app.on_key(KeyCode::Enter, None), Action::None);
    }

    #[test]
    fn test_start_uses_pending_settings() {
        let mut app = App::new(5, Color::White);
        app.on_key(KeyCode::Char('c'), None);
        app.on_key(KeyCode::Char('+'), None);
        assert_eq!(
            app.on_key(KeyCode::Char('s'), None),
            Action::Start { size: 6, color: Color::Black }
        );
    }

    #[test]
    fn test_size_is_clamped() {
        let mut app = App::new(MIN_BOARD_SIZE, Color::White);
        app.on_key(KeyCode::Char('-'), None);
        assert_eq!(app.next_size(), MIN_BOARD_SIZE);
    }

    #[test]
    fn test_starting_size_is_clamped() {
        assert_eq!(App::new(1, Color::White).next_size(), MIN_BOARD_SIZE);
        assert_eq!(App::new(1usize << 33, Color::White).next_size(), MAX_BOARD_SIZE);
        assert_eq!(
            App::new(1usize << 33, Color::White).on_key(KeyCode::Char('s'), None),
            Action::Start { size: MAX_BOARD_SIZE, color: Color::White }
        );
    }

    #[test]
    fn test_control_keys() {
        let mut app = App::new(5, Color::White);
        assert_eq!(app.on_key(KeyCode::Char('r'), None), Action::Reset);
        assert_eq!(app.on_key(KeyCode::Char('t'), None), Action::Retry);
        assert_eq!(app.on_key(KeyCode::Esc, None), Action::Quit);
    }
}
