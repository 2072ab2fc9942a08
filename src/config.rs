//! Gateway connection configuration
//!
//! The credential is never compiled in: it comes from the environment (or a
//! `.env` file loaded by the binary) or from an explicit override.

use crate::error::{ChatError, ChatResult};
use crate::logging::log_debug;
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://openrouter.ai/api/v1";
pub const DEFAULT_MODEL: &str = "deepseek/deepseek-r1-0528-qwen3-8b:free";
pub const DEFAULT_PROMPT: &str = "What is the meaning of life?";
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

pub const ENV_API_KEY: &str = "OPENROUTER_API_KEY";
pub const ENV_BASE_URL: &str = "OPENROUTER_BASE_URL";
pub const ENV_MODEL: &str = "OPENROUTER_MODEL";
pub const ENV_SITE_URL: &str = "OPENROUTER_SITE_URL";
pub const ENV_SITE_NAME: &str = "OPENROUTER_SITE_NAME";
pub const ENV_TIMEOUT_SECS: &str = "OPENROUTER_TIMEOUT_SECS";

/// Optional sampling parameters; unset fields are left out of the request body
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DefaultChatParams {
    pub temperature: Option<f64>,
    pub max_tokens: Option<u32>,
    pub top_p: Option<f64>,
    pub frequency_penalty: Option<f64>,
    pub presence_penalty: Option<f64>,
}

/// Everything needed to reach the gateway and attribute requests to an app
#[derive(Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    #[serde(default, skip_serializing)]
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    /// Sent as `HTTP-Referer`, used by OpenRouter for app rankings
    pub site_url: Option<String>,
    /// Sent as `X-Title`, used by OpenRouter for app rankings
    pub site_name: Option<String>,
    pub request_timeout: Duration,
    pub params: DefaultChatParams,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            site_url: None,
            site_name: None,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            params: DefaultChatParams::default(),
        }
    }
}

// Hand-written so the credential never reaches logs or panic messages
impl std::fmt::Debug for GatewayConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GatewayConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("site_url", &self.site_url)
            .field("site_name", &self.site_name)
            .field("request_timeout", &self.request_timeout)
            .field("params", &self.params)
            .finish()
    }
}

impl GatewayConfig {
    /// Load configuration from `OPENROUTER_*` environment variables and validate it
    ///
    /// # Errors
    ///
    /// Returns [`ChatError::ConfigurationError`] if:
    /// - `OPENROUTER_API_KEY` is missing or blank
    /// - `OPENROUTER_TIMEOUT_SECS` is not a positive integer
    /// - any other value fails [`validate`](Self::validate)
    pub fn from_env() -> ChatResult<Self> {
        let config = Self::from_env_unvalidated()?;
        config.validate()?;

        log_debug!(
            base_url = %config.base_url,
            model = %config.model,
            has_api_key = config.api_key.is_some(),
            has_site_url = config.site_url.is_some(),
            has_site_name = config.site_name.is_some(),
            timeout_secs = config.request_timeout.as_secs(),
            "Gateway configuration loaded from environment"
        );

        Ok(config)
    }

    /// Read the environment without validating, so callers can still apply
    /// overrides (e.g. an `--api-key` flag) before [`validate`](Self::validate).
    pub fn from_env_unvalidated() -> ChatResult<Self> {
        let mut config = Self::default();

        if let Some(api_key) = env_value(ENV_API_KEY) {
            config.api_key = Some(api_key);
        }
        if let Some(base_url) = env_value(ENV_BASE_URL) {
            config.base_url = base_url;
        }
        if let Some(model) = env_value(ENV_MODEL) {
            config.model = model;
        }
        config.site_url = env_value(ENV_SITE_URL);
        config.site_name = env_value(ENV_SITE_NAME);
        if let Some(raw) = env_value(ENV_TIMEOUT_SECS) {
            let secs = raw.trim().parse::<u64>().map_err(|e| {
                ChatError::configuration_error(format!(
                    "{ENV_TIMEOUT_SECS} must be a whole number of seconds, got '{raw}': {e}"
                ))
            })?;
            config.request_timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }

    /// Check the configuration is complete before any request is built
    pub fn validate(&self) -> ChatResult<()> {
        match self.api_key.as_deref() {
            Some(key) if !key.trim().is_empty() => {}
            _ => {
                return Err(ChatError::configuration_error(format!(
                    "API key is required (set {ENV_API_KEY})"
                )))
            }
        }
        if self.model.trim().is_empty() {
            return Err(ChatError::configuration_error("Model identifier is empty"));
        }
        if !(self.base_url.starts_with("https://") || self.base_url.starts_with("http://")) {
            return Err(ChatError::configuration_error(format!(
                "Base URL must start with http:// or https://, got '{}'",
                self.base_url
            )));
        }
        if self.request_timeout.is_zero() {
            return Err(ChatError::configuration_error(
                "Request timeout must be greater than zero",
            ));
        }
        Ok(())
    }

    /// Full URL of the chat completions endpoint
    pub fn chat_completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_site_url(mut self, site_url: impl Into<String>) -> Self {
        self.site_url = Some(site_url.into());
        self
    }

    pub fn with_site_name(mut self, site_name: impl Into<String>) -> Self {
        self.site_name = Some(site_name.into());
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }
}

/// Environment lookup where an empty value counts as unset
fn env_value(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}
