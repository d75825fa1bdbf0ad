//! Squares client library.
//!
//! A human plays Squares against a computer opponent that lives on a remote
//! HTTP server. The server owns the rules and the AI; this crate owns the
//! board, the turn order, and the conversation with the server.
//!
//! # Architecture
//!
//! - **Board**: grid, colors and move history (`squares_board`)
//! - **API**: request dispatch, response classification, availability probing
//! - **Controller**: turn sequencing state machine over board and API
//! - **Config**: defaults, TOML file, environment overrides
//!
//! # Example
//!
//! ```no_run
//! use squares::{ClientConfig, TurnController};
//! use squares_board::Color;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = ClientConfig::default();
//! let mut controller = TurnController::new(config.api_client()?, config.computer_move_delay());
//!
//! let pending = controller.start(5, Color::White)?;
//! controller.drive(pending).await;
//! let pending = controller.select_cell(2, 2);
//! controller.drive(pending).await;
//! println!("{}", controller.notice().message);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod api;
pub mod config;
pub mod controller;

pub use api::{ApiClient, ApiError, Availability, Backoff, ReqwestTransport, Transport};
pub use config::{ClientConfig, ConfigError};
pub use controller::{
    ApiAvailability, Completion, ComputerOutcome, ComputerStep, GameId, Notice, PendingRequest,
    Phase, PlayerStep, Severity, TurnController, View,
};
