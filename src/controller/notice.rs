//! Messages for the presentation layer.

use derive_new::new;
use squares_board::BoardState;

use super::Phase;

/// How a notice should be presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum Severity {
    /// Neutral progress information.
    Info,
    /// Something went well (connection up, game won).
    Success,
    /// A failure the user should know about.
    Error,
}

/// Human-readable status line.
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct Notice {
    /// Message text.
    #[new(into)]
    pub message: String,
    /// Presentation hint.
    pub severity: Severity,
}

/// Last known reachability of the remote API.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ApiAvailability {
    /// Not probed yet.
    #[default]
    Unknown,
    /// Probe in progress.
    Checking,
    /// Health probe succeeded.
    Available,
    /// Every probe failed. Games can still start; computer moves will fail.
    Unavailable(String),
}

/// Everything the presentation layer needs after a state change.
#[derive(Debug, Clone, Copy)]
pub struct View<'a> {
    /// Current board, absent when idle.
    pub board: Option<&'a BoardState>,
    /// Controller phase.
    pub phase: &'a Phase,
    /// Latest status line.
    pub notice: &'a Notice,
    /// Whether cell selections are currently acted on.
    pub accepts_input: bool,
    /// Whether [`retry`](super::TurnController::retry) would do anything.
    pub can_retry: bool,
    /// Persistent API reachability.
    pub availability: &'a ApiAvailability,
}
