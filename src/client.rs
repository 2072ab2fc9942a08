//! Chat client bound to one gateway endpoint and model
//!
//! [`ChatClient`] turns a conversation into a [`ChatCompletionRequest`], sends
//! it through a [`ChatTransport`] and keeps only the first choice.

use crate::config::{DefaultChatParams, GatewayConfig};
use crate::error::{ChatError, ChatResult};
use crate::logging::{log_debug, log_info};
use crate::messages::ChatMessage;
use crate::transport::{ChatTransport, HttpTransport};
use crate::types::{ChatCompletionRequest, ChatCompletionResponse, Completion};

/// Reusable handle for one gateway endpoint and model.
///
/// Holds no per-call state: every [`complete`](Self::complete) builds a fresh
/// request and consumes only the first choice of the response.
pub struct ChatClient {
    model: String,
    params: DefaultChatParams,
    transport: Box<dyn ChatTransport>,
}

impl std::fmt::Debug for ChatClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatClient")
            .field("model", &self.model)
            .field("params", &self.params)
            .finish_non_exhaustive()
    }
}

impl ChatClient {
    /// Create a client talking HTTP to the configured gateway
    ///
    /// # Errors
    ///
    /// Returns [`ChatError::ConfigurationError`] if the configuration fails
    /// validation or the HTTP transport cannot be built from it.
    pub fn from_config(config: &GatewayConfig) -> ChatResult<Self> {
        config.validate()?;
        let transport = HttpTransport::new(config)?;

        log_debug!(
            url = %transport.url(),
            model = %config.model,
            "Chat client initialized"
        );

        Ok(Self::with_transport(config, Box::new(transport)))
    }

    /// Create a client over any transport, e.g. a mock in tests
    pub fn with_transport(config: &GatewayConfig, transport: Box<dyn ChatTransport>) -> Self {
        Self {
            model: config.model.clone(),
            params: config.params.clone(),
            transport,
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Build the request body for a conversation
    ///
    /// # Errors
    ///
    /// Returns [`ChatError::InvalidRequest`] if `messages` is empty.
    pub fn build_request(&self, messages: Vec<ChatMessage>) -> ChatResult<ChatCompletionRequest> {
        if messages.is_empty() {
            return Err(ChatError::invalid_request(
                "Conversation must contain at least one message",
            ));
        }

        Ok(ChatCompletionRequest {
            model: self.model.clone(),
            messages,
            temperature: self.params.temperature,
            max_tokens: self.params.max_tokens,
            top_p: self.params.top_p,
            frequency_penalty: self.params.frequency_penalty,
            presence_penalty: self.params.presence_penalty,
        })
    }

    /// Send a conversation and return the first choice
    pub async fn complete(&self, messages: Vec<ChatMessage>) -> ChatResult<Completion> {
        let request = self.build_request(messages)?;
        let response = self.transport.send(&request).await?;
        let completion = first_completion(response)?;

        log_info!(
            model = %completion.model.as_deref().unwrap_or(&self.model),
            finish_reason = ?completion.finish_reason,
            completion_tokens = completion.usage.map(|u| u.completion_tokens),
            content_chars = completion.content.chars().count(),
            "Chat completion received"
        );

        Ok(completion)
    }

    /// Send a single user prompt and return the reply text
    pub async fn ask(&self, prompt: impl Into<String>) -> ChatResult<String> {
        let completion = self.complete(vec![ChatMessage::user(prompt)]).await?;
        Ok(completion.content)
    }
}

/// Build the conversation for a prompt: optional system turn, then the user turn.
pub fn conversation(system: Option<&str>, prompt: impl Into<String>) -> Vec<ChatMessage> {
    let mut messages = Vec::with_capacity(2);
    if let Some(system) = system {
        messages.push(ChatMessage::system(system));
    }
    messages.push(ChatMessage::user(prompt));
    messages
}

/// Take the first choice out of a response
///
/// # Errors
///
/// Returns [`ChatError::ProtocolError`] when the response has no choices or
/// the first choice carries no content.
pub fn first_completion(response: ChatCompletionResponse) -> ChatResult<Completion> {
    let ChatCompletionResponse {
        model,
        choices,
        usage,
        ..
    } = response;

    let choice = choices
        .into_iter()
        .next()
        .ok_or_else(|| ChatError::protocol_error("No choices in completion response"))?;

    let content = choice
        .message
        .content
        .ok_or_else(|| ChatError::protocol_error("First choice has no message content"))?;

    Ok(Completion {
        content,
        model,
        finish_reason: choice.finish_reason,
        usage,
    })
}
