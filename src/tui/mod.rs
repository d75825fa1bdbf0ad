//! Terminal front end for squares.

mod app;
mod input;
mod ui;

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use squares::{Availability, ClientConfig, Completion, PendingRequest, ReqwestTransport, TurnController};
use std::io::{self, Stdout};
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, error, info, instrument, warn};

use app::{Action, App};

/// Log file written while the terminal is in raw mode.
const LOG_FILE: &str = "squares.log";

/// How long to wait for a key before redrawing.
const POLL_INTERVAL: Duration = Duration::from_millis(50);

type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Results coming back from background tasks.
#[derive(Debug)]
enum Message {
    Completion(Completion),
    Availability(Availability),
}

/// Runs the terminal UI until the user quits.
pub async fn run(config: ClientConfig) -> Result<()> {
    // Log to a file so output does not corrupt the screen
    let log_file = std::fs::File::create(LOG_FILE)?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::sync::Arc::new(log_file))
        .with_ansi(false)
        .try_init();

    info!(base_url = %config.base_url(), ruleset = %config.ruleset(), "Starting squares TUI");

    let mut controller = TurnController::new(config.api_client()?, config.computer_move_delay());
    let mut app = App::new(*config.board_size(), *config.player_color());
    let (tx, mut rx) = mpsc::unbounded_channel();

    controller.begin_availability_check();
    let api = controller.api();
    let retries = *config.availability_retries();
    let probe_tx = tx.clone();
    tokio::spawn(async move {
        let availability = api.check_availability(retries).await;
        let _ = probe_tx.send(Message::Availability(availability));
    });

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    let res = event_loop(&mut terminal, &mut controller, &mut app, &tx, &mut rx).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = &res {
        error!(error = ?err, "Event loop error");
    }
    info!("Squares TUI exited");
    res
}

#[instrument(skip_all)]
async fn event_loop(
    terminal: &mut Tui,
    controller: &mut TurnController<ReqwestTransport>,
    app: &mut App,
    tx: &mpsc::UnboundedSender<Message>,
    rx: &mut mpsc::UnboundedReceiver<Message>,
) -> Result<()> {
    loop {
        terminal.draw(|frame| ui::draw(frame, &controller.view(), app))?;

        while let Ok(message) = rx.try_recv() {
            match message {
                Message::Completion(completion) => dispatch(controller.handle(completion), tx),
                Message::Availability(availability) => controller.record_availability(availability),
            }
        }

        if event::poll(POLL_INTERVAL)?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            let board_size = controller.board().map(|board| board.size());
            match app.on_key(key.code, board_size) {
                Action::Quit => {
                    info!("User quit");
                    return Ok(());
                }
                Action::Start { size, color } => match controller.start(size, color) {
                    Ok(pending) => dispatch(pending, tx),
                    Err(e) => warn!(error = %e, size, "Could not start game"),
                },
                Action::Select { row, col } => dispatch(controller.select_cell(row, col), tx),
                Action::Reset => controller.reset(),
                Action::Retry => dispatch(controller.retry(), tx),
                Action::None => {}
            }
        }

        tokio::task::yield_now().await;
    }
}

/// Runs a request in the background and posts its completion back to the loop.
fn dispatch(pending: Option<PendingRequest<ReqwestTransport>>, tx: &mpsc::UnboundedSender<Message>) {
    let Some(pending) = pending else {
        return;
    };
    debug!(game = %pending.game(), kind = ?pending.kind(), "Dispatching request");
    let tx = tx.clone();
    tokio::spawn(async move {
        let completion = pending.run().await;
        let _ = tx.send(Message::Completion(completion));
    });
}
