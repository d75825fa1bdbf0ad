//! Availability probing with linear backoff.

use std::time::Duration;

/// Outcome of [`ApiClient::check_availability`](super::ApiClient::check_availability).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Availability {
    /// A health probe succeeded after `retries` retries.
    Available {
        /// Retries used before the successful probe.
        retries: u32,
    },
    /// Every probe failed.
    Unavailable {
        /// Total probes issued.
        attempts: u32,
        /// Last observed error, or a synthesized summary.
        message: String,
    },
}

impl Availability {
    /// Checks whether the API answered healthy.
    pub fn is_available(&self) -> bool {
        matches!(self, Availability::Available { .. })
    }
}

/// Delay schedule between health probes: `base × attempt`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Backoff {
    base: Duration,
}

impl Backoff {
    /// Linear schedule with the given step.
    pub fn linear(base: Duration) -> Self {
        Self { base }
    }

    /// Delay before retry number `attempt` (1-based).
    pub fn delay(&self, attempt: u32) -> Duration {
        self.base * attempt
    }
}

impl Default for Backoff {
    fn default() -> Self {
        Self::linear(Duration::from_millis(1000))
    }
}
