//! Command-line entry: flags, logging setup and the serve loop.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use pprovider::ProviderError;
use tracing_subscriber::EnvFilter;

use crate::config::{ConfigError, PromptTesterConfig, load_env_files, parse_timeout};
use crate::runtime::build_runtime;
use crate::server::{McpServer, serve_stdio};

/// MCP server for testing prompts across LLM providers over stdio.
#[derive(Parser, Debug)]
#[command(name = "prompt-tester", version, about)]
pub struct Cli {
    /// Load this .env file instead of searching the working and home directories.
    #[arg(long)]
    pub env_file: Option<PathBuf>,

    /// Per-call provider timeout in seconds; overrides PROMPT_TESTER_TIMEOUT_SECS.
    #[arg(long = "timeout-secs", value_parser = parse_timeout)]
    pub timeout: Option<Duration>,

    /// Log filter used when RUST_LOG is unset. Logs always go to stderr.
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

#[derive(Debug)]
pub enum CliError {
    Config(ConfigError),
    Provider(ProviderError),
    Io(io::Error),
}

impl Display for CliError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Config(err) => write!(f, "configuration error: {err}"),
            Self::Provider(err) => write!(f, "provider setup failed: {err}"),
            Self::Io(err) => write!(f, "stdio transport failed: {err}"),
        }
    }
}

impl Error for CliError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Config(err) => Some(err),
            Self::Provider(err) => Some(err),
            Self::Io(err) => Some(err),
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<ProviderError> for CliError {
    fn from(value: ProviderError) -> Self {
        Self::Provider(value)
    }
}

impl From<io::Error> for CliError {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

impl Cli {
    /// Env files load before the subscriber so a RUST_LOG in `.env` takes effect.
    pub async fn run(self) -> Result<(), CliError> {
        let loaded = load_env_files(self.env_file.as_deref());
        init_logging(&self.log_level);
        for path in loaded? {
            tracing::debug!(path = %path.display(), "loaded environment file");
        }

        let mut config = PromptTesterConfig::from_env()?;
        if let Some(timeout) = self.timeout {
            config = config.with_request_timeout(timeout);
        }

        let providers = config
            .configured_providers()
            .iter()
            .map(|provider| provider.to_string())
            .collect::<Vec<_>>();
        tracing::info!(
            providers = ?providers,
            timeout_secs = config.request_timeout.as_secs(),
            "starting prompt-tester"
        );

        let runtime = build_runtime(&config)?;
        let server = McpServer::new(runtime.dispatcher);
        serve_stdio(&server).await?;

        tracing::info!("stdin closed; shutting down");
        Ok(())
    }
}

/// Stdout carries protocol frames only, so the subscriber writes to stderr.
pub fn init_logging(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(false)
        .try_init();
}
