//! Request dispatch and response classification.

use super::{ApiError, Availability, Backoff, BoardDto, HttpResponse, RemoteMove, Transport};
use serde_json::Value;
use squares_board::{BoardState, Color, GameStatus};
use tracing::{debug, info, instrument, warn};

/// Base URL used when none is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/api";

/// Ruleset used when none is configured.
pub const DEFAULT_RULESET: &str = "standard";

const HEALTH: &str = "health";
const NEXT_MOVE: &str = "nextMove";
const STATUS: &str = "status";

/// Client for the Squares HTTP API.
#[derive(Debug, Clone)]
pub struct ApiClient<T> {
    base_url: String,
    ruleset: String,
    backoff: Backoff,
    transport: T,
}

impl<T: Transport> ApiClient<T> {
    /// Creates a client over the given transport with the default ruleset.
    #[instrument(skip(base_url, transport), fields(base_url = %base_url.as_ref()))]
    pub fn new(base_url: impl AsRef<str>, transport: T) -> Self {
        Self {
            base_url: base_url.as_ref().trim_end_matches('/').to_string(),
            ruleset: DEFAULT_RULESET.to_string(),
            backoff: Backoff::default(),
            transport,
        }
    }

    /// Sets the ruleset used by [`Self::next_move`].
    pub fn with_ruleset(mut self, ruleset: impl Into<String>) -> Self {
        self.ruleset = ruleset.into();
        self
    }

    /// Sets the delay schedule used by [`Self::check_availability`].
    pub fn with_backoff(mut self, backoff: Backoff) -> Self {
        self.backoff = backoff;
        self
    }

    /// Base URL without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Configured ruleset.
    pub fn ruleset(&self) -> &str {
        &self.ruleset
    }

    /// Asks the server for its move under the configured ruleset.
    pub async fn next_move(&self, board: &BoardState) -> Result<Option<RemoteMove>, ApiError> {
        self.request_next_move(board, &self.ruleset).await
    }

    /// Asks the server for its move under `ruleset`.
    ///
    /// `Ok(None)` means the server answered with a message instead of
    /// coordinates: no move is possible. That is not an error.
    #[instrument(skip(self, board), fields(size = board.size(), moves = board.move_count()))]
    pub async fn request_next_move(
        &self,
        board: &BoardState,
        ruleset: &str,
    ) -> Result<Option<RemoteMove>, ApiError> {
        let url = format!("{}/{}/{}", self.base_url, ruleset, NEXT_MOVE);
        let body = board_body(board)?;
        let response = self.transport.post_json(&url, &body).await?;
        let value = classify(response)?;
        let mv = parse_next_move(&value)?;
        match &mv {
            Some(mv) => info!(%mv, "Server proposed a move"),
            None => info!("Server reports no move available"),
        }
        Ok(mv)
    }

    /// Asks the server whether the game is over.
    #[instrument(skip(self, board), fields(size = board.size(), moves = board.move_count()))]
    pub async fn request_status(&self, board: &BoardState) -> Result<GameStatus, ApiError> {
        let url = format!("{}/{}", self.base_url, STATUS);
        let body = board_body(board)?;
        let response = self.transport.post_json(&url, &body).await?;
        let value = classify(response)?;

        let status = value
            .get("status")
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| ApiError::malformed(STATUS, "missing `status` field"))?;
        let result = value.get("result").and_then(Value::as_str);

        let status = GameStatus::from_remote(status, result);
        debug!(?status, "Parsed game status");
        Ok(status)
    }

    /// Probes the health endpoint once.
    ///
    /// Healthy iff the response's `message` or `status` field is `"OK"`.
    #[instrument(skip(self))]
    pub async fn check_health(&self) -> Result<bool, ApiError> {
        let url = format!("{}/{}", self.base_url, HEALTH);
        let response = self.transport.get(&url).await?;
        let value = classify(response)?;

        let ok = |field: &str| value.get(field).and_then(Value::as_str) == Some("OK");
        let healthy = ok("message") || ok("status");
        debug!(healthy, "Health probe finished");
        Ok(healthy)
    }

    /// Probes health until it succeeds or `max_retries` retries are used up.
    ///
    /// The n-th retry waits `backoff.delay(n)` first, so with the default
    /// schedule the waits are 1s, 2s, 3s, ...
    #[instrument(skip(self))]
    pub async fn check_availability(&self, max_retries: u32) -> Availability {
        let mut retries = 0;
        loop {
            let error = match self.check_health().await {
                Ok(true) => {
                    info!(retries, "API available");
                    return Availability::Available { retries };
                }
                Ok(false) => None,
                Err(e) => Some(e),
            };

            if retries >= max_retries {
                let message = error.map(|e| e.to_string()).unwrap_or_else(|| {
                    format!("API is not available after {} attempts", retries + 1)
                });
                warn!(attempts = retries + 1, message = %message, "API unavailable");
                return Availability::Unavailable {
                    attempts: retries + 1,
                    message,
                };
            }

            retries += 1;
            let delay = self.backoff.delay(retries);
            debug!(retries, delay_ms = delay.as_millis() as u64, error = ?error, "Health probe failed, backing off");
            tokio::time::sleep(delay).await;
        }
    }
}

fn board_body(board: &BoardState) -> Result<Value, ApiError> {
    serde_json::to_value(BoardDto::from(board))
        .map_err(|e| ApiError::network(format!("Failed to encode board: {}", e)))
}

/// Splits a raw response into parsed JSON or a classified error.
fn classify(response: HttpResponse) -> Result<Value, ApiError> {
    let parsed = if response.body.trim().is_empty() {
        Ok(Value::Null)
    } else {
        serde_json::from_str::<Value>(&response.body)
    };

    if response.is_success() {
        return parsed.map_err(|e| ApiError::Parse {
            message: e.to_string(),
        });
    }

    let server_message = parsed.ok().and_then(|value| {
        ["error", "message"]
            .iter()
            .find_map(|field| value.get(*field).and_then(Value::as_str).map(str::to_string))
    });
    let message = server_message
        .unwrap_or_else(|| format!("Request failed with status: {}", response.status));
    warn!(status = response.status, message = %message, "Request failed");
    Err(ApiError::Transport {
        status: Some(response.status),
        message,
    })
}

fn parse_next_move(value: &Value) -> Result<Option<RemoteMove>, ApiError> {
    let x = value.get("x").filter(|v| v.is_number());
    let y = value.get("y").filter(|v| v.is_number());

    if let (Some(x), Some(y)) = (x, y) {
        let (Some(x), Some(y)) = (x.as_i64(), y.as_i64()) else {
            return Err(ApiError::malformed(NEXT_MOVE, "coordinates are not integers"));
        };
        let color = value
            .get("color")
            .and_then(Value::as_str)
            .and_then(Color::from_wire_code);
        return Ok(Some(RemoteMove::new(x, y, color)));
    }

    let has_message = match value.get("message") {
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Null) | Some(Value::Bool(false)) | None => false,
        Some(_) => true,
    };
    if has_message {
        return Ok(None);
    }

    Err(ApiError::malformed(
        NEXT_MOVE,
        "expected coordinates or a message",
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_empty_success_is_null() {
        assert_eq!(classify(HttpResponse::new(200, "")).unwrap(), Value::Null);
    }

    #[test]
    fn test_classify_invalid_json_success_is_parse_error() {
        let err = classify(HttpResponse::new(200, "<html>")).unwrap_err();
        assert!(matches!(err, ApiError::Parse { .. }));
    }

    #[test]
    fn test_classify_uses_server_error_text() {
        let err = classify(HttpResponse::new(
            400,
            r#"{"error":"Board size must be greater than 2"}"#,
        ))
        .unwrap_err();
        assert_eq!(err.to_string(), "Board size must be greater than 2");
        assert_eq!(err.status(), Some(400));
    }

    #[test]
    fn test_classify_falls_back_to_status_message() {
        let err = classify(HttpResponse::new(503, "unavailable")).unwrap_err();
        assert_eq!(err.to_string(), "Request failed with status: 503");
    }

    #[test]
    fn test_parse_next_move_shapes() {
        let mv = parse_next_move(&serde_json::json!({"x": 1, "y": 2, "color": "b"})).unwrap();
        assert_eq!(mv, Some(RemoteMove::new(1, 2, Some(Color::Black))));

        let none = parse_next_move(&serde_json::json!({"message": "Game finished"})).unwrap();
        assert_eq!(none, None);

        let err = parse_next_move(&serde_json::json!({"x": 1})).unwrap_err();
        assert!(matches!(err, ApiError::MalformedResponse { .. }));

        let err = parse_next_move(&serde_json::json!({"x": 1.5, "y": 0})).unwrap_err();
        assert!(matches!(err, ApiError::MalformedResponse { .. }));

        let err = parse_next_move(&Value::Null).unwrap_err();
        assert!(matches!(err, ApiError::MalformedResponse { .. }));
    }
}
