//! One-shot invocation: configure, call, extract, print.

use crate::client::{conversation, ChatClient};
use crate::error::{ChatError, ChatResult};
use crate::logging::log_debug;
use std::io::Write;

/// What to send in a single invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub prompt: String,
    pub system: Option<String>,
}

impl Invocation {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            system: None,
        }
    }

    pub fn with_system(mut self, system: impl Into<String>) -> Self {
        self.system = Some(system.into());
        self
    }
}

/// Run one completion and write the first choice's content plus a newline to `out`.
///
/// Nothing is written unless the call succeeds.
pub async fn invoke<W: Write>(
    client: &ChatClient,
    invocation: &Invocation,
    out: &mut W,
) -> ChatResult<()> {
    let messages = conversation(invocation.system.as_deref(), invocation.prompt.as_str());
    log_debug!(
        model = %client.model(),
        message_count = messages.len(),
        has_system = invocation.system.is_some(),
        "Invoking chat completion"
    );

    let completion = client.complete(messages).await?;

    writeln!(out, "{}", completion.content).map_err(ChatError::output_failed)?;
    out.flush().map_err(ChatError::output_failed)?;
    Ok(())
}
