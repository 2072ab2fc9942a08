//! Error types for gateway chat operations.
//!
//! Every failure of a completion call is classified into one [`ChatError`]
//! variant so callers can tell a dead network from a rejected key or a
//! malformed reply:
//!
//! - Transport failures (DNS, TLS, connection refused) and timeouts
//! - Authentication rejections (invalid or revoked credential)
//! - Quota and rate-limit rejections
//! - Protocol failures (unparseable body, empty choice list, missing content)
//!
//! Nothing in this crate retries. [`ChatError::is_transient`] is advisory for
//! callers that want to decide for themselves.
//!
//! # Example
//!
//! ```rust
//! use gateway_chat::{ChatError, error::ErrorCategory};
//!
//! fn report(err: &ChatError) {
//!     match err.category() {
//!         ErrorCategory::Client => eprintln!("fix your setup: {}", err.user_message()),
//!         _ => eprintln!("{}", err.user_message()),
//!     }
//! }
//! ```

use crate::logging::{log_error, log_warn};
use std::time::Duration;
use thiserror::Error;

/// High-level categorization of errors for routing and handling decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// The caller can fix it (bad key, bad config, empty conversation).
    Client,

    /// The gateway or the network failed.
    External,

    /// Temporary condition; the same request may succeed later.
    Transient,

    /// Local failure unrelated to the remote service.
    Internal,
}

/// Severity level for logging decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    /// Operation failed.
    Error,

    /// Unexpected but explainable, typically remote-side.
    Warning,
}

/// Convenient result type for chat operations.
pub type ChatResult<T> = std::result::Result<T, ChatError>;

/// Errors that can occur while configuring or performing a completion call.
///
/// | Variant | Category | Transient |
/// |---------|----------|-----------|
/// | `ConfigurationError` | Client | No |
/// | `InvalidRequest` | Client | No |
/// | `TransportError` | External | Yes |
/// | `Timeout` | Transient | Yes |
/// | `AuthenticationFailed` | Client | No |
/// | `QuotaExceeded` | Transient | Yes |
/// | `ServiceError` | External | 5xx only |
/// | `ProtocolError` | External | No |
/// | `OutputFailed` | Internal | No |
#[derive(Error, Debug)]
pub enum ChatError {
    /// Configuration is missing or invalid (no API key, bad URL, bad header value).
    #[error("Configuration error: {message}")]
    ConfigurationError {
        /// Description of the configuration problem.
        message: String,
    },

    /// The request descriptor is invalid, e.g. the conversation is empty.
    #[error("Invalid request: {message}")]
    InvalidRequest {
        /// Description of what is wrong with the request.
        message: String,
    },

    /// The gateway could not be reached (DNS, TLS, connection refused or reset).
    #[error("Transport error: {message}")]
    TransportError {
        /// Description of the failure.
        message: String,
        /// The underlying error, if available.
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// No response within the configured request timeout.
    #[error("Request timed out after {timeout:?}")]
    Timeout {
        /// The timeout that was exceeded.
        timeout: Duration,
    },

    /// The gateway rejected the credential.
    #[error("Authentication failed: {message}")]
    AuthenticationFailed {
        /// Details reported by the gateway.
        message: String,
    },

    /// Rate limit hit or account out of credits.
    #[error("Quota exceeded: {message}")]
    QuotaExceeded {
        /// Details reported by the gateway.
        message: String,
        /// Value of the `Retry-After` header, when the gateway sent one.
        retry_after_seconds: Option<u64>,
    },

    /// The gateway answered with a non-success status not covered above.
    #[error("Gateway returned {status}: {message}")]
    ServiceError {
        /// HTTP status code.
        status: u16,
        /// Body or error message returned by the gateway.
        message: String,
    },

    /// The response could not be interpreted: bad JSON, no choices, no content.
    #[error("Protocol error: {message}")]
    ProtocolError {
        /// Details about what was missing or malformed.
        message: String,
    },

    /// Writing the reply to the output stream failed.
    #[error("Failed to write output: {source}")]
    OutputFailed {
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

impl ChatError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ConfigurationError { .. } => ErrorCategory::Client,
            Self::InvalidRequest { .. } => ErrorCategory::Client,
            Self::TransportError { .. } => ErrorCategory::External,
            Self::Timeout { .. } => ErrorCategory::Transient,
            Self::AuthenticationFailed { .. } => ErrorCategory::Client,
            Self::QuotaExceeded { .. } => ErrorCategory::Transient,
            Self::ServiceError { .. } => ErrorCategory::External,
            Self::ProtocolError { .. } => ErrorCategory::External,
            Self::OutputFailed { .. } => ErrorCategory::Internal,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::ConfigurationError { .. } => ErrorSeverity::Error,
            Self::InvalidRequest { .. } => ErrorSeverity::Error,
            Self::TransportError { .. } => ErrorSeverity::Error,
            Self::Timeout { .. } => ErrorSeverity::Warning,
            Self::AuthenticationFailed { .. } => ErrorSeverity::Error,
            Self::QuotaExceeded { .. } => ErrorSeverity::Warning,
            Self::ServiceError { .. } => ErrorSeverity::Error,
            Self::ProtocolError { .. } => ErrorSeverity::Warning,
            Self::OutputFailed { .. } => ErrorSeverity::Error,
        }
    }

    /// Whether the same request could succeed if issued again later.
    ///
    /// Purely informational; the client never retries on its own.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::TransportError { .. } | Self::Timeout { .. } | Self::QuotaExceeded { .. } => {
                true
            }
            Self::ServiceError { status, .. } => *status >= 500,
            _ => false,
        }
    }

    /// Whether this failure belongs to the transport class (connectivity or timeout).
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::TransportError { .. } | Self::Timeout { .. })
    }

    /// Message suitable for showing to an end user; no internals.
    pub fn user_message(&self) -> String {
        match self {
            Self::ConfigurationError { message } => {
                format!("Configuration problem: {message}")
            }
            Self::InvalidRequest { message } => format!("Invalid request: {message}"),
            Self::TransportError { .. } => {
                "Unable to reach the chat gateway. Check your network connection".to_string()
            }
            Self::Timeout { timeout } => {
                format!("The chat gateway did not answer within {timeout:?}")
            }
            Self::AuthenticationFailed { .. } => {
                "Authentication failed. Please check your API key".to_string()
            }
            Self::QuotaExceeded {
                retry_after_seconds: Some(seconds),
                ..
            } => format!("Quota or rate limit exceeded. Try again in {seconds} seconds"),
            Self::QuotaExceeded { .. } => {
                "Quota or rate limit exceeded. Try again later".to_string()
            }
            Self::ServiceError { status, .. } => {
                format!("The chat gateway failed to answer (HTTP {status})")
            }
            Self::ProtocolError { .. } => {
                "Received an invalid response from the chat gateway".to_string()
            }
            Self::OutputFailed { .. } => "Could not write the reply".to_string(),
        }
    }

    // =========================================================================
    // Constructors with automatic logging
    // =========================================================================

    pub fn configuration_error(message: impl Into<String>) -> Self {
        let message = message.into();
        log_error!(
            error_type = "configuration_error",
            message = %message,
            "Gateway configuration invalid"
        );
        Self::ConfigurationError { message }
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        let message = message.into();
        log_error!(
            error_type = "invalid_request",
            message = %message,
            "Chat request rejected before sending"
        );
        Self::InvalidRequest { message }
    }

    pub fn transport_error(
        message: impl Into<String>,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        let message = message.into();
        log_error!(
            error_type = "transport_error",
            message = %message,
            has_source = source.is_some(),
            "Gateway unreachable"
        );
        Self::TransportError { message, source }
    }

    pub fn timeout(timeout: Duration) -> Self {
        log_warn!(
            error_type = "timeout",
            timeout_ms = timeout.as_millis() as u64,
            "Gateway request timed out"
        );
        Self::Timeout { timeout }
    }

    pub fn authentication_failed(message: impl Into<String>) -> Self {
        let message = message.into();
        log_error!(
            error_type = "authentication_failed",
            message = %message,
            "Gateway rejected credential"
        );
        Self::AuthenticationFailed { message }
    }

    pub fn quota_exceeded(message: impl Into<String>, retry_after_seconds: Option<u64>) -> Self {
        let message = message.into();
        log_warn!(
            error_type = "quota_exceeded",
            message = %message,
            retry_after_seconds = ?retry_after_seconds,
            "Gateway quota or rate limit exceeded"
        );
        Self::QuotaExceeded {
            message,
            retry_after_seconds,
        }
    }

    pub fn service_error(status: u16, message: impl Into<String>) -> Self {
        let message = message.into();
        log_error!(
            error_type = "service_error",
            status = status,
            message = %message,
            "Gateway returned an error status"
        );
        Self::ServiceError { status, message }
    }

    pub fn protocol_error(message: impl Into<String>) -> Self {
        let message = message.into();
        log_warn!(
            error_type = "protocol_error",
            message = %message,
            "Gateway response format invalid"
        );
        Self::ProtocolError { message }
    }

    pub fn output_failed(source: std::io::Error) -> Self {
        log_error!(
            error_type = "output_failed",
            error = %source,
            "Failed to write completion to output"
        );
        Self::OutputFailed { source }
    }
}
