//! Anthropic Messages API client backing the auditor.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use secrecy::ExposeSecret;
use tracing::instrument;

use crate::config::AuditorConfig;

use super::error::{ApiErrorResponse, GenerateError};
use super::types::{Message, MessagesRequest, MessagesResponse};
use super::{GenerationRequest, TextGenerator};

const ANTHROPIC_VERSION: &str = "2023-06-01";
const DEFAULT_MAX_TOKENS: u32 = 4096;

/// Claude API client.
///
/// One non-streaming request per call, no retries.
#[derive(Clone)]
pub struct ClaudeClient {
    inner: Arc<ClaudeClientInner>,
}

struct ClaudeClientInner {
    client: reqwest::Client,
    model: String,
    api_url: String,
}

impl ClaudeClient {
    /// Create a new Claude client.
    ///
    /// # Errors
    ///
    /// Returns [`GenerateError::InvalidHeader`] if the API key contains
    /// characters that cannot appear in a header, or [`GenerateError::Http`]
    /// if the HTTP client cannot be built.
    pub fn new(config: &AuditorConfig) -> Result<Self, GenerateError> {
        let mut api_key = HeaderValue::from_str(config.api_key.expose_secret())
            .map_err(|_| GenerateError::InvalidHeader)?;
        api_key.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert("x-api-key", api_key);
        headers.insert(
            "anthropic-version",
            HeaderValue::from_static(ANTHROPIC_VERSION),
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self {
            inner: Arc::new(ClaudeClientInner {
                client,
                model: config.model.clone(),
                api_url: config.api_url.clone(),
            }),
        })
    }

    /// Model name sent with every request.
    #[must_use]
    pub fn model(&self) -> &str {
        &self.inner.model
    }

    /// Handle a successful response.
    async fn handle_response(
        &self,
        response: reqwest::Response,
    ) -> Result<MessagesResponse, GenerateError> {
        let status = response.status();

        if status.is_success() {
            let body = response.text().await?;
            serde_json::from_str(&body)
                .map_err(|e| GenerateError::Parse(format!("Failed to parse response: {e}")))
        } else {
            Err(self.handle_error_status(status, response).await)
        }
    }

    /// Handle an error status code.
    async fn handle_error_status(
        &self,
        status: reqwest::StatusCode,
        response: reqwest::Response,
    ) -> GenerateError {
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse().ok())
                .unwrap_or(60);
            return GenerateError::RateLimited(retry_after);
        }

        if status == reqwest::StatusCode::UNAUTHORIZED {
            return GenerateError::Unauthorized("Invalid API key".to_string());
        }

        match response.text().await {
            Ok(body) => match serde_json::from_str::<ApiErrorResponse>(&body) {
                Ok(api_error) => GenerateError::Api {
                    error_type: api_error.error.error_type,
                    message: api_error.error.message,
                },
                Err(_) => GenerateError::Api {
                    error_type: format!("http_{}", status.as_u16()),
                    message: body,
                },
            },
            Err(e) => GenerateError::Http(e),
        }
    }
}

#[async_trait]
impl TextGenerator for ClaudeClient {
    #[instrument(skip(self, request), fields(model = %self.inner.model, prompt_len = request.prompt.len()))]
    async fn generate(&self, request: &GenerationRequest) -> Result<String, GenerateError> {
        let body = MessagesRequest {
            model: &self.inner.model,
            max_tokens: DEFAULT_MAX_TOKENS,
            system: &request.system,
            messages: vec![Message {
                role: "user",
                content: &request.prompt,
            }],
            temperature: request.temperature,
        };

        let response = self
            .inner
            .client
            .post(&self.inner.api_url)
            .json(&body)
            .send()
            .await?;

        let response = self.handle_response(response).await?;
        tracing::debug!(
            id = %response.id,
            stop_reason = ?response.stop_reason,
            input_tokens = response.usage.input_tokens,
            output_tokens = response.usage.output_tokens,
            "Generation complete"
        );
        Ok(response.text())
    }
}
