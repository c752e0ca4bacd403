// src/config.rs
use std::fmt;
use std::time::Duration;

use thiserror::Error;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 5000;
const DEFAULT_MODEL: &str = "gpt-4o-mini";
const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_TEMPERATURE: f32 = 0.7;
const DEFAULT_MAX_TOKENS: u32 = 1000;
const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_ORIGINS: &str =
    "https://autoanosis.com,https://www.autoanosis.com,http://localhost:*";

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("OPENAI_API_KEY is not set")]
    MissingApiKey,
    #[error("invalid value for {key}: {value:?}")]
    Invalid { key: &'static str, value: String },
}

/// Origins allowed to call the service from a browser.
///
/// Entries ending in `:*` accept that scheme and host on any port.
#[derive(Debug, Clone, PartialEq)]
pub struct AllowedOrigins {
    entries: Vec<String>,
}

impl AllowedOrigins {
    pub fn new<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|e| Into::<String>::into(e).trim().trim_end_matches('/').to_string())
                .filter(|e| !e.is_empty())
                .collect(),
        }
    }

    pub fn parse(list: &str) -> Self {
        Self::new(list.split(','))
    }

    pub fn is_allowed(&self, origin: &str) -> bool {
        self.entries.iter().any(|entry| match entry.strip_suffix(":*") {
            Some(prefix) => origin
                .strip_prefix(prefix)
                .and_then(|rest| rest.strip_prefix(':'))
                .is_some_and(|port| !port.is_empty() && port.bytes().all(|b| b.is_ascii_digit())),
            None => entry == origin,
        })
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }
}

impl Default for AllowedOrigins {
    fn default() -> Self {
        Self::parse(DEFAULT_ORIGINS)
    }
}

#[derive(Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub openai_api_key: String,
    pub openai_base_url: String,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub upstream_timeout: Duration,
    pub allowed_origins: AllowedOrigins,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("openai_api_key", &"<redacted>")
            .field("openai_base_url", &self.openai_base_url)
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .field("upstream_timeout", &self.upstream_timeout)
            .field("allowed_origins", &self.allowed_origins)
            .finish()
    }
}

impl Config {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let openai_api_key = get("OPENAI_API_KEY").ok_or(ConfigError::MissingApiKey)?;

        let port = parse_or(get("PORT"), "PORT", DEFAULT_PORT)?;
        let temperature = parse_or(get("OPENAI_TEMPERATURE"), "OPENAI_TEMPERATURE", DEFAULT_TEMPERATURE)?;
        let max_tokens = parse_or(get("OPENAI_MAX_TOKENS"), "OPENAI_MAX_TOKENS", DEFAULT_MAX_TOKENS)?;
        let timeout_secs = parse_or(get("UPSTREAM_TIMEOUT_SECS"), "UPSTREAM_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS)?;
        if timeout_secs == 0 {
            return Err(ConfigError::Invalid {
                key: "UPSTREAM_TIMEOUT_SECS",
                value: timeout_secs.to_string(),
            });
        }

        let openai_base_url = get("OPENAI_BASE_URL")
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        let allowed_origins = get("ALLOWED_ORIGINS")
            .map(|list| AllowedOrigins::parse(&list))
            .unwrap_or_default();

        Ok(Self {
            host: get("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port,
            openai_api_key,
            openai_base_url,
            model: get("OPENAI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            temperature,
            max_tokens,
            upstream_timeout: Duration::from_secs(timeout_secs),
            allowed_origins,
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_or<T: std::str::FromStr>(
    raw: Option<String>,
    key: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match raw {
        Some(value) => value.parse().map_err(|_| ConfigError::Invalid { key, value }),
        None => Ok(default),
    }
}
