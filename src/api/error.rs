//! Error taxonomy for remote calls.

use derive_more::{Display, Error};

/// Failure of a remote call, classified by where it went wrong.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum ApiError {
    /// Network failure, or a non-2xx response.
    ///
    /// `message` is the server-supplied error text when there was one.
    #[display("{message}")]
    Transport {
        /// HTTP status, absent when the request never got a response.
        status: Option<u16>,
        /// Human-readable description.
        message: String,
    },

    /// 2xx response whose JSON does not have the expected shape.
    #[display("Invalid response format from {endpoint}: {detail}")]
    MalformedResponse {
        /// Endpoint that produced the response.
        endpoint: &'static str,
        /// What was wrong with it.
        detail: String,
    },

    /// 2xx response whose body is not valid JSON.
    #[display("Failed to parse response: {message}")]
    Parse {
        /// Parser error text.
        message: String,
    },
}

impl ApiError {
    /// Network-level failure with no HTTP status.
    pub fn network(message: impl Into<String>) -> Self {
        ApiError::Transport {
            status: None,
            message: message.into(),
        }
    }

    /// Shape error for the given endpoint.
    pub fn malformed(endpoint: &'static str, detail: impl Into<String>) -> Self {
        ApiError::MalformedResponse {
            endpoint,
            detail: detail.into(),
        }
    }

    /// HTTP status of the failed response, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Transport { status, .. } => *status,
            _ => None,
        }
    }
}
