//! Environment-driven server configuration.
//!
//! ```rust
//! use std::collections::HashMap;
//! use std::time::Duration;
//!
//! use prompt_tester::config::PromptTesterConfig;
//!
//! let env = HashMap::from([("ANTHROPIC_API_KEY", "sk-ant-test")]);
//! let config = PromptTesterConfig::from_lookup(|name| env.get(name).map(|v| v.to_string()))
//!     .expect("one key is enough");
//!
//! assert!(config.openai_api_key.is_none());
//! assert_eq!(config.request_timeout, Duration::from_secs(90));
//! ```

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};
use std::time::Duration;

use pprovider::{DEFAULT_REQUEST_TIMEOUT, ProviderId, SecretString};

pub const OPENAI_API_KEY_VAR: &str = "OPENAI_API_KEY";
pub const ANTHROPIC_API_KEY_VAR: &str = "ANTHROPIC_API_KEY";
pub const OPENAI_BASE_URL_VAR: &str = "OPENAI_BASE_URL";
pub const ANTHROPIC_BASE_URL_VAR: &str = "ANTHROPIC_BASE_URL";
pub const TIMEOUT_SECS_VAR: &str = "PROMPT_TESTER_TIMEOUT_SECS";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigErrorKind {
    MissingCredentials,
    InvalidValue,
    EnvFile,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    pub kind: ConfigErrorKind,
    pub message: String,
}

impl ConfigError {
    pub fn new(kind: ConfigErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn missing_credentials() -> Self {
        Self::new(
            ConfigErrorKind::MissingCredentials,
            format!("set {OPENAI_API_KEY_VAR} or {ANTHROPIC_API_KEY_VAR} in the environment or a .env file"),
        )
    }

    pub fn invalid_value(name: &str, message: impl Display) -> Self {
        Self::new(ConfigErrorKind::InvalidValue, format!("{name}: {message}"))
    }

    pub fn env_file(path: &Path, message: impl Display) -> Self {
        Self::new(
            ConfigErrorKind::EnvFile,
            format!("failed to load {}: {message}", path.display()),
        )
    }
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.message)
    }
}

impl Error for ConfigError {}

#[derive(Debug, Clone)]
pub struct PromptTesterConfig {
    pub openai_api_key: Option<SecretString>,
    pub anthropic_api_key: Option<SecretString>,
    pub openai_base_url: Option<String>,
    pub anthropic_base_url: Option<String>,
    pub request_timeout: Duration,
}

impl PromptTesterConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads configuration through `lookup`; blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let request_timeout = match read(TIMEOUT_SECS_VAR) {
            Some(value) => parse_timeout(&value)
                .map_err(|message| ConfigError::invalid_value(TIMEOUT_SECS_VAR, message))?,
            None => DEFAULT_REQUEST_TIMEOUT,
        };

        let config = Self {
            openai_api_key: read(OPENAI_API_KEY_VAR).map(SecretString::new),
            anthropic_api_key: read(ANTHROPIC_API_KEY_VAR).map(SecretString::new),
            openai_base_url: read(OPENAI_BASE_URL_VAR),
            anthropic_base_url: read(ANTHROPIC_BASE_URL_VAR),
            request_timeout,
        };

        if config.configured_providers().is_empty() {
            return Err(ConfigError::missing_credentials());
        }

        Ok(config)
    }

    pub fn with_request_timeout(mut self, request_timeout: Duration) -> Self {
        self.request_timeout = request_timeout;
        self
    }

    pub fn api_key(&self, provider: ProviderId) -> Option<&SecretString> {
        match provider {
            ProviderId::OpenAi => self.openai_api_key.as_ref(),
            ProviderId::Anthropic => self.anthropic_api_key.as_ref(),
        }
    }

    pub fn base_url(&self, provider: ProviderId) -> Option<&str> {
        match provider {
            ProviderId::OpenAi => self.openai_base_url.as_deref(),
            ProviderId::Anthropic => self.anthropic_base_url.as_deref(),
        }
    }

    pub fn configured_providers(&self) -> Vec<ProviderId> {
        ProviderId::ALL
            .into_iter()
            .filter(|provider| self.api_key(*provider).is_some())
            .collect()
    }
}

pub fn parse_timeout(value: &str) -> Result<Duration, String> {
    let seconds = value
        .trim()
        .parse::<u64>()
        .map_err(|err| format!("expected whole seconds, got '{value}' ({err})"))?;
    if seconds == 0 {
        return Err("timeout must be at least 1 second".to_string());
    }

    Ok(Duration::from_secs(seconds))
}

/// Loads `.env` files without overriding variables that are already set.
///
/// An explicit file must exist. Otherwise the working directory is tried
/// first and the home directory second, so the nearer file wins.
pub fn load_env_files(explicit: Option<&Path>) -> Result<Vec<PathBuf>, ConfigError> {
    if let Some(path) = explicit {
        dotenvy::from_path(path).map_err(|err| ConfigError::env_file(path, err))?;
        return Ok(vec![path.to_path_buf()]);
    }

    let mut candidates = Vec::new();
    if let Ok(cwd) = std::env::current_dir() {
        candidates.push(cwd.join(".env"));
    }
    if let Some(home) = std::env::var_os("HOME").or_else(|| std::env::var_os("USERPROFILE")) {
        candidates.push(PathBuf::from(home).join(".env"));
    }
    candidates.dedup();

    let mut loaded = Vec::new();
    for path in candidates {
        if !path.is_file() {
            continue;
        }
        match dotenvy::from_path(&path) {
            Ok(()) => loaded.push(path),
            Err(err) => tracing::warn!(path = %path.display(), error = %err, "skipping unreadable .env file"),
        }
    }

    Ok(loaded)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(pairs: &[(&str, &str)]) -> Result<PromptTesterConfig, ConfigError> {
        let env = pairs
            .iter()
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect::<HashMap<_, _>>();
        PromptTesterConfig::from_lookup(|name| env.get(name).cloned())
    }

    #[test]
    fn at_least_one_key_is_required() {
        let error = config_from(&[]).expect_err("no keys should fail");
        assert_eq!(error.kind, ConfigErrorKind::MissingCredentials);

        let error = config_from(&[(OPENAI_API_KEY_VAR, "   ")]).expect_err("blank key");
        assert_eq!(error.kind, ConfigErrorKind::MissingCredentials);
    }

    #[test]
    fn reads_keys_urls_and_timeout() {
        let config = config_from(&[
            (OPENAI_API_KEY_VAR, "sk-openai"),
            (ANTHROPIC_API_KEY_VAR, "sk-ant"),
            (OPENAI_BASE_URL_VAR, "http://localhost:8080/v1"),
            (TIMEOUT_SECS_VAR, "30"),
        ])
        .expect("config should load");

        assert_eq!(
            config.configured_providers(),
            vec![ProviderId::OpenAi, ProviderId::Anthropic]
        );
        assert_eq!(
            config.api_key(ProviderId::OpenAi).map(SecretString::expose),
            Some("sk-openai")
        );
        assert_eq!(
            config.base_url(ProviderId::OpenAi),
            Some("http://localhost:8080/v1")
        );
        assert_eq!(config.base_url(ProviderId::Anthropic), None);
        assert_eq!(config.request_timeout, Duration::from_secs(30));
    }

    #[test]
    fn invalid_timeout_is_rejected() {
        for value in ["0", "soon", "-3"] {
            let error = config_from(&[(ANTHROPIC_API_KEY_VAR, "sk-ant"), (TIMEOUT_SECS_VAR, value)])
                .expect_err("timeout should be rejected");
            assert_eq!(error.kind, ConfigErrorKind::InvalidValue);
            assert!(error.message.starts_with(TIMEOUT_SECS_VAR));
        }
    }

    #[test]
    fn debug_output_never_shows_keys() {
        let config = config_from(&[(OPENAI_API_KEY_VAR, "sk-very-secret")]).expect("config");
        assert!(!format!("{config:?}").contains("sk-very-secret"));
    }

    #[test]
    fn missing_explicit_env_file_is_an_error() {
        let error = load_env_files(Some(Path::new("/definitely/not/here/.env")))
            .expect_err("missing file should fail");
        assert_eq!(error.kind, ConfigErrorKind::EnvFile);
    }
}
