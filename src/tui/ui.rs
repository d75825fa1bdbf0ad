//! Stateless rendering of the controller view.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{self, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use squares::{ApiAvailability, Phase, Severity, View};
use squares_board::{BoardState, Cell};

use super::app::App;
use super::input::Cursor;

/// Width of one rendered cell in columns.
const CELL_WIDTH: u16 = 3;

/// Draws the whole screen.
pub fn draw(frame: &mut Frame, view: &View<'_>, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Min(5),    // Board
            Constraint::Length(1), // Turn
            Constraint::Length(3), // Notice
            Constraint::Length(1), // Availability
            Constraint::Length(2), // Help
        ])
        .split(frame.area());

    let title = Paragraph::new("Squares")
        .style(Style::default().fg(style::Color::Cyan).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center);
    frame.render_widget(title, chunks[0]);

    match view.board {
        Some(board) => draw_board(frame, chunks[1], board, app.cursor(), view.accepts_input),
        None => {
            let idle = Paragraph::new(format!(
                "Next game: {0}×{0}, you play {1}. Press 's' to start.",
                app.next_size(),
                app.next_color()
            ))
            .style(Style::default().fg(style::Color::DarkGray))
            .alignment(Alignment::Center);
            frame.render_widget(idle, center_rect(chunks[1], chunks[1].width, 1));
        }
    }

    frame.render_widget(
        Paragraph::new(turn_line(view)).alignment(Alignment::Center),
        chunks[2],
    );

    let notice = Paragraph::new(view.notice.message.as_str())
        .style(Style::default().fg(severity_color(view.notice.severity)))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(notice, chunks[3]);

    frame.render_widget(
        Paragraph::new(availability_line(view.availability)).alignment(Alignment::Center),
        chunks[4],
    );

    let mut help = vec!["arrows move", "enter place", "s start", "c color", "+/- size", "r reset"];
    if view.can_retry {
        help.push("t retry");
    }
    help.push("q quit");
    let help = Paragraph::new(help.join(" · "))
        .style(Style::default().fg(style::Color::DarkGray))
        .alignment(Alignment::Center);
    frame.render_widget(help, chunks[5]);
}

fn draw_board(frame: &mut Frame, area: Rect, board: &BoardState, cursor: Cursor, show_cursor: bool) {
    let size = board.size();
    let width = (size as u16).saturating_mul(CELL_WIDTH).saturating_add(2);
    let height = (size as u16).saturating_add(2);
    let board_area = center_rect(area, width, height);
    let cursor = cursor.clamped(size);

    let lines: Vec<Line> = board
        .rows()
        .enumerate()
        .map(|(row, cells)| {
            let spans: Vec<Span> = cells
                .iter()
                .enumerate()
                .map(|(col, cell)| {
                    let (symbol, base) = cell_glyph(*cell);
                    let style = if show_cursor && cursor == (Cursor { row, col }) {
                        base.bg(style::Color::Yellow)
                    } else {
                        base
                    };
                    Span::styled(symbol, style)
                })
                .collect();
            Line::from(spans)
        })
        .collect();

    let paragraph = Paragraph::new(lines).block(Block::default().borders(Borders::ALL));
    frame.render_widget(paragraph, board_area);
}

fn cell_glyph(cell: Cell) -> (&'static str, Style) {
    match cell {
        Cell::Empty => (" · ", Style::default().fg(style::Color::DarkGray)),
        Cell::White => (
            " ● ",
            Style::default().fg(style::Color::White).add_modifier(Modifier::BOLD),
        ),
        Cell::Black => (
            " ● ",
            Style::default().fg(style::Color::Blue).add_modifier(Modifier::BOLD),
        ),
    }
}

fn turn_line(view: &View<'_>) -> Line<'static> {
    let Some(board) = view.board else {
        return Line::default();
    };
    if let Phase::Finished(result) = view.phase {
        return Line::from(format!("Game over ({result})"));
    }

    let turn = board.current_turn();
    let whose = if turn == board.player_color() {
        "Your move"
    } else {
        "Computer's move"
    };
    Line::from(vec![
        Span::styled(
            turn.to_string(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!(" ({whose})")),
        Span::raw(if view.phase.is_waiting() { " ..." } else { "" }),
    ])
}

fn availability_line(availability: &ApiAvailability) -> Line<'static> {
    let (text, color) = match availability {
        ApiAvailability::Unknown => ("API: not checked".to_string(), style::Color::DarkGray),
        ApiAvailability::Checking => ("API: checking...".to_string(), style::Color::Yellow),
        ApiAvailability::Available => ("API: connected".to_string(), style::Color::Green),
        ApiAvailability::Unavailable(reason) => {
            (format!("API: unavailable ({reason})"), style::Color::Red)
        }
    };
    Line::from(Span::styled(text, Style::default().fg(color)))
}

fn severity_color(severity: Severity) -> style::Color {
    match severity {
        Severity::Info => style::Color::Yellow,
        Severity::Success => style::Color::Green,
        Severity::Error => style::Color::Red,
    }
}

fn center_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
