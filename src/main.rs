//! gateway-chat CLI - send one prompt to an OpenAI-compatible gateway and print the reply
//!
//! Usage:
//!     gateway-chat [OPTIONS] [PROMPT]
//!
//! Environment Variables (also read from a `.env` file):
//!     OPENROUTER_API_KEY: API key (required)
//!     OPENROUTER_BASE_URL: Gateway base URL (default: https://openrouter.ai/api/v1)
//!     OPENROUTER_MODEL: Model identifier
//!     OPENROUTER_SITE_URL: Value for the HTTP-Referer attribution header
//!     OPENROUTER_SITE_NAME: Value for the X-Title attribution header
//!     OPENROUTER_TIMEOUT_SECS: Request timeout in seconds (default: 120)
//!     RUST_LOG: Log filter for stderr output (default: warn)

use clap::Parser;
use gateway_chat::config::DEFAULT_PROMPT;
use gateway_chat::{invoke, ChatClient, ChatError, GatewayConfig, Invocation};
use std::process::ExitCode;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// Send one prompt to a chat completion gateway and print the first reply
#[derive(Parser, Debug)]
#[command(name = "gateway-chat", version)]
struct Cli {
    /// Prompt sent as the single user message
    #[arg(default_value = DEFAULT_PROMPT)]
    prompt: String,

    /// Model identifier (overrides OPENROUTER_MODEL)
    #[arg(short, long)]
    model: Option<String>,

    /// Gateway base URL (overrides OPENROUTER_BASE_URL)
    #[arg(long)]
    base_url: Option<String>,

    /// API key (overrides OPENROUTER_API_KEY; prefer the environment)
    #[arg(long)]
    api_key: Option<String>,

    /// Site URL sent as HTTP-Referer for gateway rankings
    #[arg(long)]
    site_url: Option<String>,

    /// Site name sent as X-Title for gateway rankings
    #[arg(long)]
    site_name: Option<String>,

    /// Request timeout in seconds
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Optional system message placed before the prompt
    #[arg(long)]
    system: Option<String>,

    /// Sampling temperature
    #[arg(long)]
    temperature: Option<f64>,

    /// Maximum tokens to generate
    #[arg(long)]
    max_tokens: Option<u32>,

    /// Nucleus sampling probability mass
    #[arg(long)]
    top_p: Option<f64>,

    /// Penalty for tokens by how often they already appeared
    #[arg(long)]
    frequency_penalty: Option<f64>,

    /// Penalty for tokens that already appeared at all
    #[arg(long)]
    presence_penalty: Option<f64>,

    /// Log debug details to stderr
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn apply_overrides(&self, mut config: GatewayConfig) -> GatewayConfig {
        if let Some(api_key) = &self.api_key {
            config.api_key = Some(api_key.clone());
        }
        if let Some(base_url) = &self.base_url {
            config.base_url = base_url.clone();
        }
        if let Some(model) = &self.model {
            config.model = model.clone();
        }
        if let Some(site_url) = &self.site_url {
            config.site_url = Some(site_url.clone());
        }
        if let Some(site_name) = &self.site_name {
            config.site_name = Some(site_name.clone());
        }
        if let Some(secs) = self.timeout_secs {
            config.request_timeout = Duration::from_secs(secs);
        }
        if self.temperature.is_some() {
            config.params.temperature = self.temperature;
        }
        if self.max_tokens.is_some() {
            config.params.max_tokens = self.max_tokens;
        }
        if self.top_p.is_some() {
            config.params.top_p = self.top_p;
        }
        if self.frequency_penalty.is_some() {
            config.params.frequency_penalty = self.frequency_penalty;
        }
        if self.presence_penalty.is_some() {
            config.params.presence_penalty = self.presence_penalty;
        }
        config
    }
}

/// Process exit status for a failed run: 2 for configuration problems, 1 otherwise
fn exit_status(err: &anyhow::Error) -> u8 {
    match err.downcast_ref::<ChatError>() {
        Some(ChatError::ConfigurationError { .. }) => 2,
        _ => 1,
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: &Cli) -> anyhow::Result<()> {
    let config = cli.apply_overrides(GatewayConfig::from_env_unvalidated()?);
    let client = ChatClient::from_config(&config)?;

    let mut invocation = Invocation::new(cli.prompt.clone());
    if let Some(system) = &cli.system {
        invocation = invocation.with_system(system.clone());
    }

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    invoke(&client, &invocation, &mut out).await?;
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    // Loaded before logging so RUST_LOG may live in .env too
    let dotenv = dotenvy::dotenv();
    let cli = Cli::parse();
    init_logging(cli.verbose);

    // A missing .env is normal; a malformed one is worth reporting
    if let Err(e) = dotenv {
        if !e.not_found() {
            tracing::warn!(error = %e, "Ignoring unreadable .env file");
        }
    }

    match run(&cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            match err.downcast_ref::<ChatError>() {
                Some(chat_err) => {
                    tracing::error!(error = %chat_err, "Chat completion failed");
                    eprintln!("error: {}", chat_err.user_message());
                }
                None => eprintln!("error: {err:#}"),
            }
            ExitCode::from(exit_status(&err))
        }
    }
}
