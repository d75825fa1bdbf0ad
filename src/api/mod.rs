//! Client for the remote Squares server.
//!
//! All network interaction lives here. Every request resolves to exactly one
//! of a success value or a classified [`ApiError`]; nothing escapes the
//! client boundary as a panic.

mod availability;
mod client;
mod dto;
mod error;
mod transport;

pub use availability::{Availability, Backoff};
pub use client::{ApiClient, DEFAULT_BASE_URL, DEFAULT_RULESET};
pub use dto::{BoardDto, RemoteMove};
pub use error::ApiError;
pub use transport::{HttpResponse, ReqwestTransport, Transport};
