//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the proxy.
//! Values are read from the process environment by `loader.rs`.

use std::time::Duration;

use url::Url;

/// Root configuration for the rewrite proxy.
#[derive(Debug, Clone)]
pub struct ProxyConfig {
    /// Base URL of the upstream API server (absolute, validated at startup).
    pub backend_url: Url,

    /// Domain suffix used when synthesizing the email field.
    pub domain: String,

    /// Request path whose 200 responses are rewritten (exact match).
    pub target_path: String,

    /// Minimum account age before the target endpoint is served.
    /// `None` disables age gating.
    pub min_account_age: Option<Duration>,

    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,
}

/// Listener configuration.
#[derive(Debug, Clone)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Timeout configuration for various operations.
#[derive(Debug, Clone)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}
