//! Client configuration.
//!
//! Values come from built-in defaults, then an optional TOML file, then the
//! environment (`SQUARES_API_URL`, `SQUARES_RULESET`), then command-line flags.

use crate::api::{ApiClient, ApiError, Backoff, DEFAULT_BASE_URL, DEFAULT_RULESET, ReqwestTransport};
use derive_getters::Getters;
use derive_more::{Display, Error};
use derive_setters::Setters;
use serde::{Deserialize, Serialize};
use squares_board::Color;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Environment variable overriding [`ClientConfig::base_url`].
pub const ENV_BASE_URL: &str = "SQUARES_API_URL";

/// Environment variable overriding [`ClientConfig::ruleset`].
pub const ENV_RULESET: &str = "SQUARES_RULESET";

/// Largest board the terminal front end can draw.
pub const MAX_BOARD_SIZE: usize = 15;

/// Settings for the API client and the game front end.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Setters, Serialize, Deserialize)]
#[serde(default)]
#[setters(prefix = "with_")]
pub struct ClientConfig {
    /// Base URL of the API, e.g. `http://localhost:8080/api`.
    #[setters(into)]
    base_url: String,

    /// Ruleset segment of the next-move endpoint.
    #[setters(into)]
    ruleset: String,

    /// Pause before each computer move request, in milliseconds.
    #[getter(skip)]
    computer_move_delay_ms: u64,

    /// Retries after the first failed health probe.
    availability_retries: u32,

    /// Backoff step between health probes, in milliseconds.
    #[getter(skip)]
    backoff_base_ms: u64,

    /// Per-request timeout, in seconds.
    #[getter(skip)]
    request_timeout_secs: u64,

    /// Board size for new games.
    board_size: usize,

    /// Color the human plays in new games.
    player_color: Color,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            ruleset: DEFAULT_RULESET.to_string(),
            computer_move_delay_ms: 500,
            availability_retries: 3,
            backoff_base_ms: 1000,
            request_timeout_secs: 10,
            board_size: 5,
            player_color: Color::White,
        }
    }
}

impl ClientConfig {
    /// Loads configuration from a TOML file. Missing keys take defaults.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        config.validate()?;
        info!(base_url = %config.base_url, "Config loaded successfully");
        Ok(config)
    }

    /// Defaults, or the given file when present, with environment overrides applied.
    #[instrument]
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        let config = config.with_env_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// Applies `SQUARES_API_URL` / `SQUARES_RULESET` as looked up by `lookup`.
    pub fn with_env_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(url) = lookup(ENV_BASE_URL).filter(|v| !v.is_empty()) {
            debug!(url = %url, "Base URL overridden by environment");
            self.base_url = url;
        }
        if let Some(ruleset) = lookup(ENV_RULESET).filter(|v| !v.is_empty()) {
            debug!(ruleset = %ruleset, "Ruleset overridden by environment");
            self.ruleset = ruleset;
        }
        self
    }

    /// Rejects settings the client cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(ConfigError::new(format!(
                "base_url must be an http(s) URL, got {:?}",
                self.base_url
            )));
        }
        if self.ruleset.trim().is_empty() {
            return Err(ConfigError::new("ruleset must not be empty".to_string()));
        }
        if !(1..=MAX_BOARD_SIZE).contains(&self.board_size) {
            return Err(ConfigError::new(format!(
                "board_size must be between 1 and {}, got {}",
                MAX_BOARD_SIZE, self.board_size
            )));
        }
        Ok(())
    }

    /// Pause before each computer move request.
    pub fn computer_move_delay(&self) -> Duration {
        Duration::from_millis(self.computer_move_delay_ms)
    }

    /// Health probe backoff schedule.
    pub fn backoff(&self) -> Backoff {
        Backoff::linear(Duration::from_millis(self.backoff_base_ms))
    }

    /// Per-request timeout.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Builds an HTTP-backed API client from these settings.
    pub fn api_client(&self) -> Result<ApiClient<ReqwestTransport>, ApiError> {
        let transport = ReqwestTransport::with_timeout(self.request_timeout())?;
        Ok(ApiClient::new(&self.base_url, transport)
            .with_ruleset(self.ruleset.clone())
            .with_backoff(self.backoff()))
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url(), "http://localhost:8080/api");
        assert_eq!(config.ruleset(), "standard");
        assert_eq!(config.computer_move_delay(), Duration::from_millis(500));
        assert_eq!(*config.availability_retries(), 3);
        assert_eq!(config.backoff().delay(2), Duration::from_secs(2));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_file_fills_missing_keys() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "base_url = \"http://example.test:9000/api\"\nboard_size = 7\nplayer_color = \"black\""
        )
        .unwrap();

        let config = ClientConfig::from_file(file.path()).unwrap();
        assert_eq!(config.base_url(), "http://example.test:9000/api");
        assert_eq!(*config.board_size(), 7);
        assert_eq!(*config.player_color(), Color::Black);
        assert_eq!(config.ruleset(), "standard");
    }

    #[test]
    fn test_from_file_rejects_bad_url() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "base_url = \"localhost\"").unwrap();

        let err = ClientConfig::from_file(file.path()).unwrap_err();
        assert!(err.message.contains("base_url"));
    }

    #[test]
    fn test_missing_file_is_error() {
        let err = ClientConfig::from_file("/definitely/not/here.toml").unwrap_err();
        assert!(err.message.contains("Failed to read config file"));
    }

    #[test]
    fn test_env_overrides() {
        let config = ClientConfig::default().with_env_overrides(|key| match key {
            ENV_BASE_URL => Some("https://squares.example/api".to_string()),
            ENV_RULESET => Some(String::new()),
            _ => None,
        });
        assert_eq!(config.base_url(), "https://squares.example/api");
        assert_eq!(config.ruleset(), "standard");
    }

    #[test]
    fn test_validate_rejects_undrawable_board_sizes() {
        for size in [0, MAX_BOARD_SIZE + 1, 1usize << 33] {
            let err = ClientConfig::default()
                .with_board_size(size)
                .validate()
                .unwrap_err();
            assert!(err.message.contains("board_size"), "size {size}: {err}");
        }
        assert!(
            ClientConfig::default()
                .with_board_size(MAX_BOARD_SIZE)
                .validate()
                .is_ok()
        );
    }

    #[test]
    fn test_setters_chain() {
        let config = ClientConfig::default()
            .with_base_url("http://10.0.0.2:8080/api")
            .with_board_size(3usize);
        assert_eq!(config.base_url(), "http://10.0.0.2:8080/api");
        assert_eq!(*config.board_size(), 3);
    }
}
