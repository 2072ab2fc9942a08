//! # gateway-chat
//!
//! Single-shot chat completion client for OpenAI-compatible gateways such as
//! OpenRouter: configure an endpoint and credential, send one conversation,
//! print the first choice.
//!
//! ## Example
//!
//! ```rust,no_run
//! use gateway_chat::{ChatClient, GatewayConfig};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = GatewayConfig::from_env()?
//!     .with_site_name("My App");
//! let client = ChatClient::from_config(&config)?;
//! let reply = client.ask("What is the meaning of life?").await?;
//! println!("{reply}");
//! # Ok(())
//! # }
//! ```

#![allow(clippy::missing_errors_doc)]

pub(crate) mod logging;

pub mod client;
pub mod config;
pub mod error;
pub mod invoker;
pub mod messages;
pub mod transport;
pub mod types;

#[cfg(test)]
mod tests;

pub use client::ChatClient;
pub use config::{DefaultChatParams, GatewayConfig};
pub use error::{ChatError, ChatResult};
pub use invoker::{invoke, Invocation};
pub use messages::{ChatMessage, MessageRole};
pub use transport::{ChatTransport, HttpTransport};
pub use types::{ChatCompletionRequest, ChatCompletionResponse, Completion};
