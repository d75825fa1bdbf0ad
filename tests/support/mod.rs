//! Scripted transport for driving the client without a server.

#![allow(dead_code)]

use async_trait::async_trait;
use serde_json::Value;
use squares::api::{ApiClient, ApiError, HttpResponse, Transport};
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use tokio::time::Instant;

pub const BASE_URL: &str = "http://squares.test/api";

/// Endpoint a scripted response is queued for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Health,
    NextMove,
    Status,
}

impl Route {
    fn of(url: &str) -> Option<Self> {
        if url.ends_with("/health") {
            Some(Route::Health)
        } else if url.ends_with("/nextMove") {
            Some(Route::NextMove)
        } else if url.ends_with("/status") {
            Some(Route::Status)
        } else {
            None
        }
    }
}

/// One request the transport saw.
#[derive(Debug, Clone)]
pub struct Call {
    pub method: &'static str,
    pub url: String,
    pub body: Option<Value>,
    pub at: Instant,
}

#[derive(Debug, Default)]
struct Script {
    queues: HashMap<Route, VecDeque<Result<HttpResponse, ApiError>>>,
    calls: Vec<Call>,
}

/// Transport answering from per-endpoint queues. Clones share the script.
#[derive(Debug, Clone, Default)]
pub struct ScriptedTransport {
    script: Arc<Mutex<Script>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a raw response.
    pub fn push(&self, route: Route, response: Result<HttpResponse, ApiError>) -> &Self {
        self.script
            .lock()
            .unwrap()
            .queues
            .entry(route)
            .or_default()
            .push_back(response);
        self
    }

    /// Queues a JSON body with the given status.
    pub fn reply(&self, route: Route, status: u16, body: Value) -> &Self {
        self.push(route, Ok(HttpResponse::new(status, body.to_string())))
    }

    /// Queues a network failure.
    pub fn fail(&self, route: Route, message: &str) -> &Self {
        self.push(route, Err(ApiError::network(message)))
    }

    pub fn calls(&self) -> Vec<Call> {
        self.script.lock().unwrap().calls.clone()
    }

    pub fn calls_to(&self, route: Route) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|call| Route::of(&call.url) == Some(route))
            .collect()
    }

    fn answer(&self, method: &'static str, url: &str, body: Option<Value>) -> Result<HttpResponse, ApiError> {
        let mut script = self.script.lock().unwrap();
        script.calls.push(Call {
            method,
            url: url.to_string(),
            body,
            at: Instant::now(),
        });
        Route::of(url)
            .and_then(|route| script.queues.get_mut(&route))
            .and_then(VecDeque::pop_front)
            .unwrap_or_else(|| Err(ApiError::network(format!("no scripted response for {url}"))))
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn get(&self, url: &str) -> Result<HttpResponse, ApiError> {
        self.answer("GET", url, None)
    }

    async fn post_json(&self, url: &str, body: &Value) -> Result<HttpResponse, ApiError> {
        self.answer("POST", url, Some(body.clone()))
    }
}

/// Client over a fresh scripted transport, plus a handle to the script.
pub fn scripted_client() -> (ApiClient<ScriptedTransport>, ScriptedTransport) {
    let transport = ScriptedTransport::new();
    (ApiClient::new(BASE_URL, transport.clone()), transport)
}
