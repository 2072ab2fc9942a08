//! Transport layer for the chat completions endpoint
//!
//! [`ChatTransport`] is the seam between the client and the network: the
//! client builds a [`ChatCompletionRequest`], the transport returns the decoded
//! [`ChatCompletionResponse`] or a classified [`ChatError`].
//!
//! [`HttpTransport`] is the production implementation on top of reqwest.
//! Status mapping:
//!
//! ```text
//! 401, 403        -> AuthenticationFailed
//! 402, 429        -> QuotaExceeded (Retry-After captured when numeric)
//! other non-2xx   -> ServiceError
//! connect / DNS   -> TransportError
//! elapsed         -> Timeout
//! bad JSON body   -> ProtocolError
//! ```

use crate::config::GatewayConfig;
use crate::error::{ChatError, ChatResult};
use crate::logging::{log_debug, log_error};
use crate::types::{ChatCompletionRequest, ChatCompletionResponse, ErrorEnvelope};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::StatusCode;
use std::time::{Duration, Instant};

pub const HTTP_REFERER: &str = "http-referer";
pub const X_TITLE: &str = "x-title";

/// Sends one chat completion request and returns the decoded response
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ChatTransport: Send + Sync {
    async fn send(&self, request: &ChatCompletionRequest) -> ChatResult<ChatCompletionResponse>;
}

/// reqwest-backed transport bound to one gateway endpoint
#[derive(Debug)]
pub struct HttpTransport {
    client: reqwest::Client,
    url: String,
    headers: HeaderMap,
    timeout: Duration,
}

impl HttpTransport {
    /// Build a transport from a validated configuration
    ///
    /// # Errors
    ///
    /// Returns [`ChatError::ConfigurationError`] if the API key or an
    /// attribution value is not a valid header value, or if the underlying
    /// HTTP client cannot be initialized.
    pub fn new(config: &GatewayConfig) -> ChatResult<Self> {
        let headers = build_headers(config)?;
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| {
                ChatError::configuration_error(format!("Failed to build HTTP client: {e}"))
            })?;

        Ok(Self {
            client,
            url: config.chat_completions_url(),
            headers,
            timeout: config.request_timeout,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    fn classify_send_error(&self, error: reqwest::Error) -> ChatError {
        if error.is_timeout() {
            return ChatError::timeout(self.timeout);
        }
        log_error!(
            url = %self.url,
            error = %error,
            is_connect = error.is_connect(),
            "HTTP request failed"
        );
        ChatError::transport_error(format!("Request failed: {error}"), Some(Box::new(error)))
    }
}

#[async_trait]
impl ChatTransport for HttpTransport {
    async fn send(&self, request: &ChatCompletionRequest) -> ChatResult<ChatCompletionResponse> {
        log_debug!(
            url = %self.url,
            model = %request.model,
            message_count = request.messages.len(),
            "Sending chat completion request"
        );

        let start_time = Instant::now();
        let response = self
            .client
            .post(&self.url)
            .headers(self.headers.clone())
            .json(request)
            .send()
            .await
            .map_err(|e| self.classify_send_error(e))?;

        let status = response.status();
        let retry_after = retry_after_seconds(response.headers());
        let body = response
            .text()
            .await
            .map_err(|e| self.classify_send_error(e))?;

        log_debug!(
            status = %status,
            duration_ms = start_time.elapsed().as_millis() as u64,
            body_bytes = body.len(),
            "Received gateway response"
        );

        if !status.is_success() {
            return Err(classify_error_response(status, retry_after, &body));
        }

        parse_success_body(&body, retry_after)
    }
}

/// Bearer credential, JSON content type and the optional attribution headers
pub fn build_headers(config: &GatewayConfig) -> ChatResult<HeaderMap> {
    let api_key = config
        .api_key
        .as_deref()
        .ok_or_else(|| ChatError::configuration_error("API key is required"))?;

    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

    let mut auth = HeaderValue::from_str(&format!("Bearer {api_key}"))
        .map_err(|e| ChatError::configuration_error(format!("Invalid API key format: {e}")))?;
    auth.set_sensitive(true);
    headers.insert(AUTHORIZATION, auth);

    if let Some(site_url) = config.site_url.as_deref() {
        headers.insert(
            HeaderName::from_static(HTTP_REFERER),
            header_value("site URL", site_url)?,
        );
    }
    if let Some(site_name) = config.site_name.as_deref() {
        headers.insert(
            HeaderName::from_static(X_TITLE),
            header_value("site name", site_name)?,
        );
    }

    Ok(headers)
}

fn header_value(what: &str, value: &str) -> ChatResult<HeaderValue> {
    HeaderValue::from_str(value)
        .map_err(|e| ChatError::configuration_error(format!("Invalid {what} header value: {e}")))
}

fn retry_after_seconds(headers: &HeaderMap) -> Option<u64> {
    headers
        .get(reqwest::header::RETRY_AFTER)
        .and_then(|h| h.to_str().ok())
        .and_then(|s| s.trim().parse::<u64>().ok())
}

/// Map a non-success status (or an error code inside a 200 body) to a [`ChatError`]
pub(crate) fn classify_status(
    status: u16,
    retry_after: Option<u64>,
    message: String,
) -> ChatError {
    match status {
        401 | 403 => ChatError::authentication_failed(message),
        402 | 429 => ChatError::quota_exceeded(message, retry_after),
        _ => ChatError::service_error(status, message),
    }
}

fn classify_error_response(status: StatusCode, retry_after: Option<u64>, body: &str) -> ChatError {
    log_error!(
        status = %status,
        error_text = %body,
        "Gateway error response"
    );

    let message = serde_json::from_str::<ErrorEnvelope>(body)
        .map(|envelope| envelope.error.describe())
        .unwrap_or_else(|_| {
            if body.trim().is_empty() {
                status
                    .canonical_reason()
                    .unwrap_or("Unknown error")
                    .to_string()
            } else {
                body.to_string()
            }
        });

    classify_status(status.as_u16(), retry_after, message)
}

pub(crate) fn parse_success_body(
    body: &str,
    retry_after: Option<u64>,
) -> ChatResult<ChatCompletionResponse> {
    let response: ChatCompletionResponse = serde_json::from_str(body).map_err(|e| {
        log_error!(
            error = %e,
            raw_body = %body,
            "Failed to parse gateway response"
        );
        ChatError::protocol_error(format!("Invalid response body: {e}"))
    })?;

    // Upstream failures can arrive as HTTP 200 with an error object and no choices.
    // A missing or non-error code is reported as a bad gateway.
    if response.choices.is_empty() {
        if let Some(error) = response.error.as_ref() {
            let status = error
                .status_code()
                .filter(|code| *code >= 400)
                .unwrap_or(502);
            return Err(classify_status(status, retry_after, error.describe()));
        }
    }

    Ok(response)
}
