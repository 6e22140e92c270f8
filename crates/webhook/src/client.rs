use std::time::Duration;

use hookchat_core::{ChatRequest, HistoryEntry, NormalizedReply};
use reqwest::Client;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use serde_json::Value;
use tracing::{debug, instrument, warn};

use crate::auth::{self, AuthHeaderResolver};
use crate::config::WebhookConfig;
use crate::error::ChatError;
use crate::normalize::{clarify_error_detail, extract_error_detail, normalize_reply};

/// A fully assembled webhook call, ready to be sent with `POST`.
#[derive(Debug, Clone)]
pub struct OutboundRequest {
    pub url: String,
    pub headers: HeaderMap,
    pub body: ChatRequest,
    pub timeout: Duration,
}

/// Client that forwards chat messages to the configured webhook.
///
/// Each [`send`](Self::send) is a single request/response cycle: no retries,
/// no state carried between calls. The configuration is fixed at
/// construction.
#[derive(Debug)]
pub struct WebhookClient {
    config: WebhookConfig,
    resolver: AuthHeaderResolver,
    client: Client,
}

impl WebhookClient {
    /// Create a client with its own `reqwest::Client` using the configured
    /// timeout.
    pub fn new(config: WebhookConfig) -> Result<Self, ChatError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ChatError::Configuration(format!("failed to build HTTP client: {e}")))?;
        Ok(Self::with_client(config, client))
    }

    /// Create a client around an existing `reqwest::Client`.
    ///
    /// Useful for testing or for sharing a connection pool.
    pub fn with_client(config: WebhookConfig, client: Client) -> Self {
        let resolver = AuthHeaderResolver::from_config(&config);
        Self {
            config,
            resolver,
            client,
        }
    }

    pub fn config(&self) -> &WebhookConfig {
        &self.config
    }

    pub fn resolver(&self) -> &AuthHeaderResolver {
        &self.resolver
    }

    /// Send a message with the prior conversation and normalize the reply.
    #[instrument(skip_all, fields(history_len = history.len()))]
    pub async fn send(
        &self,
        message: &str,
        history: &[HistoryEntry],
    ) -> Result<NormalizedReply, ChatError> {
        let request = self.prepare(message, history)?;
        self.dispatch(request).await
    }

    /// Validate the configuration and assemble the request without touching
    /// the network.
    pub fn prepare(
        &self,
        message: &str,
        history: &[HistoryEntry],
    ) -> Result<OutboundRequest, ChatError> {
        self.config.validate()?;

        Ok(OutboundRequest {
            url: self.config.url.trim().to_owned(),
            headers: self.build_headers()?,
            body: ChatRequest::new(message, history.to_vec()),
            timeout: self.config.timeout,
        })
    }

    /// Perform the HTTP call and classify the response.
    #[instrument(skip_all, fields(url = %request.url))]
    pub async fn dispatch(&self, request: OutboundRequest) -> Result<NormalizedReply, ChatError> {
        debug!(
            history_len = request.body.history.len(),
            "dispatching webhook request"
        );

        let response = self
            .client
            .post(&request.url)
            .headers(request.headers)
            .timeout(request.timeout)
            .json(&request.body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    warn!(timeout = ?request.timeout, "webhook request timed out");
                } else {
                    warn!(error = %e, "webhook request failed");
                }
                ChatError::from(e)
            })?;

        let status = response.status();
        let text = match response.text().await {
            Ok(text) => text,
            Err(e) if status.is_success() => return Err(e.into()),
            Err(e) => {
                debug!(error = %e, "failed to read error response body");
                String::new()
            }
        };
        let body = parse_body(text);

        if status.is_success() {
            debug!(status = status.as_u16(), "webhook replied");
            Ok(normalize_reply(&body))
        } else {
            warn!(status = status.as_u16(), "webhook returned non-success status");
            Err(self.server_error(status.as_u16(), &body))
        }
    }

    /// Content type first, then resolved auth headers, which win on
    /// collision.
    fn build_headers(&self) -> Result<HeaderMap, ChatError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        for (key, value) in self.resolver.resolve() {
            let name = HeaderName::from_bytes(key.as_bytes()).map_err(|e| {
                ChatError::Configuration(format!("invalid auth header name `{key}`: {e}"))
            })?;
            let mut value = HeaderValue::from_str(&value).map_err(|e| {
                ChatError::Configuration(format!("invalid value for auth header `{key}`: {e}"))
            })?;
            value.set_sensitive(true);
            headers.insert(name, value);
        }

        Ok(headers)
    }

    fn server_error(&self, status: u16, body: &Value) -> ChatError {
        let detail = clarify_error_detail(extract_error_detail(body));
        let auth_debug = self
            .config
            .debug_auth_errors
            .then(|| auth::describe(&self.resolver.resolve()));
        ChatError::server(status, &detail, auth_debug.as_deref())
    }
}

/// Parse a response body as JSON, keeping non-JSON text as a string value.
fn parse_body(text: String) -> Value {
    serde_json::from_str(&text).unwrap_or(Value::String(text))
}
