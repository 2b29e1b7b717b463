//! Integration tests for the architect console.
//!
//! Each test starts its own server on an ephemeral port and drives it over
//! HTTP with `reqwest`, the same way a browser client would.
//!
//! ```bash
//! cargo test -p architect-integration-tests
//! ```

#![allow(clippy::missing_panics_doc)]

use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use reqwest::{Client, Method, StatusCode};
use serde_json::{Value, json};

use architect_console::auditor::{Auditor, GenerateError, GenerationRequest, TextGenerator};
use architect_console::config::ConsoleConfig;
use architect_console::console::{Console, ConsoleSettings, LatencyProfile};
use architect_console::routes;
use architect_console::state::AppState;

/// Password accepted for the seeded accounts.
pub const PASSWORD: &str = "password123";

/// A generator that replays canned replies and records every request.
#[derive(Default)]
pub struct ScriptedGenerator {
    replies: Mutex<Vec<Result<String, GenerateError>>>,
    seen: Mutex<Vec<GenerationRequest>>,
}

impl ScriptedGenerator {
    /// Replies are handed out in order; once exhausted every call fails.
    #[must_use]
    pub fn new(replies: Vec<Result<String, GenerateError>>) -> Arc<Self> {
        let mut replies = replies;
        replies.reverse();
        Arc::new(Self {
            replies: Mutex::new(replies),
            seen: Mutex::default(),
        })
    }

    /// Requests received so far.
    #[must_use]
    pub fn seen(&self) -> Vec<GenerationRequest> {
        self.seen
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl TextGenerator for ScriptedGenerator {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, GenerateError> {
        self.seen
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(request.clone());
        self.replies
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop()
            .unwrap_or_else(|| Err(GenerateError::Parse("script exhausted".to_string())))
    }
}

/// A running console server.
pub struct TestServer {
    pub base_url: String,
    pub console: Console,
    client: Client,
}

impl TestServer {
    /// Start a server with no simulated latency and no auditor backend.
    pub async fn spawn() -> Self {
        Self::spawn_with(Auditor::disabled()).await
    }

    pub async fn spawn_with(auditor: Auditor) -> Self {
        let settings = ConsoleSettings {
            latency: LatencyProfile::none(),
            ..ConsoleSettings::default()
        };
        let console = Console::new(auditor, settings);
        let state = AppState::new(ConsoleConfig::default(), console.clone());
        let app = routes::routes().with_state(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("No local address");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Test server error");
        });

        Self {
            base_url: format!("http://{addr}"),
            console,
            client: Client::new(),
        }
    }

    /// Send a request and decode the JSON body. Empty bodies become `null`.
    pub async fn send(&self, method: Method, path: &str, body: Option<Value>) -> (StatusCode, Value) {
        let mut request = self
            .client
            .request(method, format!("{}{path}", self.base_url));
        if let Some(body) = body {
            request = request.json(&body);
        }
        let response = request.send().await.expect("Request failed");
        let status = response.status();
        let bytes = response.bytes().await.expect("Failed to read body");
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes)
                .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
        };
        (status, value)
    }

    pub async fn get(&self, path: &str) -> (StatusCode, Value) {
        self.send(Method::GET, path, None).await
    }

    pub async fn post(&self, path: &str, body: Value) -> (StatusCode, Value) {
        self.send(Method::POST, path, Some(body)).await
    }

    /// Sign in and assert success.
    pub async fn sign_in(&self, email: &str) -> Value {
        let (status, body) = self
            .post(
                "/api/auth/login",
                json!({ "email": email, "password": PASSWORD }),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "sign in failed: {body}");
        body
    }

    /// Messages of the live notifications, oldest first.
    pub async fn notification_messages(&self) -> Vec<String> {
        let (_, body) = self.get("/api/notifications").await;
        body.as_array()
            .map(|items| {
                items
                    .iter()
                    .filter_map(|n| n["message"].as_str().map(str::to_string))
                    .collect()
            })
            .unwrap_or_default()
    }
}
