//! Configuration loading from the process environment.
//!
//! # Responsibilities
//! - Read each environment variable and parse it into its typed field
//! - Validate the backend URL (absolute, http/https, has a host)
//! - Parse the optional minimum-account-age duration string
//!
//! # Design Decisions
//! - Required variables missing or unparseable abort startup; the proxy
//!   never runs with a partially valid configuration
//! - An empty `MIN_ACCOUNT_AGE` (or zero) disables gating entirely

use std::env;
use std::time::Duration;

use url::Url;

use crate::config::schema::{ListenerConfig, ProxyConfig, TimeoutConfig};

/// Path of the account-info endpoint eligible for rewriting.
pub const DEFAULT_TARGET_PATH: &str = "/api/v1/accounts/verify_credentials";

/// Error type for configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    /// A required environment variable is missing or empty.
    MissingVar(&'static str),
    /// The backend URL failed to parse or is not an absolute http(s) URL.
    BackendUrl(String),
    /// The minimum-account-age duration string failed to parse.
    Duration(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::MissingVar(name) => write!(f, "{} must be set", name),
            ConfigError::BackendUrl(e) => write!(f, "invalid BACKEND_URL: {}", e),
            ConfigError::Duration(e) => write!(f, "invalid MIN_ACCOUNT_AGE: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {}

impl ProxyConfig {
    /// Load and validate configuration from the process environment.
    pub fn from_env() -> Result<ProxyConfig, ConfigError> {
        let backend_url = require_var("BACKEND_URL")?;
        let backend_url = parse_backend_url(&backend_url)?;

        let domain = require_var("DOMAIN")?;

        let target_path =
            optional_var("TARGET_PATH").unwrap_or_else(|| DEFAULT_TARGET_PATH.to_string());

        let min_account_age = match optional_var("MIN_ACCOUNT_AGE") {
            Some(raw) => parse_duration(&raw).map_err(ConfigError::Duration)?,
            None => None,
        };

        let listener = match optional_var("LISTEN_ADDRESS") {
            Some(addr) => ListenerConfig { bind_address: addr },
            None => ListenerConfig::default(),
        };

        Ok(ProxyConfig {
            backend_url,
            domain,
            target_path,
            min_account_age,
            listener,
            timeouts: TimeoutConfig::default(),
        })
    }
}

fn require_var(name: &'static str) -> Result<String, ConfigError> {
    match env::var(name) {
        Ok(v) if !v.is_empty() => Ok(v),
        _ => Err(ConfigError::MissingVar(name)),
    }
}

fn optional_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.is_empty())
}

/// Parse and validate the upstream base URL.
fn parse_backend_url(raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw).map_err(|e| ConfigError::BackendUrl(e.to_string()))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::BackendUrl(format!(
            "unsupported scheme {:?}",
            url.scheme()
        )));
    }
    if url.host_str().is_none() {
        return Err(ConfigError::BackendUrl("missing host".to_string()));
    }

    Ok(url)
}

/// Parse a duration string such as `"30d"`, `"12h"` or `"3600"` (seconds).
///
/// Supported suffixes: `s`, `m`, `h`, `d`, `w`, `y` (365 days). A value of
/// zero returns `None`, disabling gating.
pub fn parse_duration(raw: &str) -> Result<Option<Duration>, String> {
    let raw = raw.trim();
    let (digits, multiplier) = match raw.chars().last() {
        Some('s') => (&raw[..raw.len() - 1], 1u64),
        Some('m') => (&raw[..raw.len() - 1], 60),
        Some('h') => (&raw[..raw.len() - 1], 3600),
        Some('d') => (&raw[..raw.len() - 1], 86_400),
        Some('w') => (&raw[..raw.len() - 1], 7 * 86_400),
        Some('y') => (&raw[..raw.len() - 1], 365 * 86_400),
        Some(c) if c.is_ascii_digit() => (raw, 1),
        _ => return Err(format!("unrecognized duration {:?}", raw)),
    };

    let value: u64 = digits
        .parse()
        .map_err(|_| format!("unrecognized duration {:?}", raw))?;

    let secs = value
        .checked_mul(multiplier)
        .ok_or_else(|| format!("duration {:?} overflows", raw))?;

    if secs == 0 {
        Ok(None)
    } else {
        Ok(Some(Duration::from_secs(secs)))
    }
}
