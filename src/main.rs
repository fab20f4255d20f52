//! Account API Rewrite Proxy
//!
//! A transparent reverse proxy built with Tokio and Axum that forwards every
//! request to a single upstream API server and rewrites the body of 200
//! responses from one configured endpoint.
//!
//! # Architecture Overview
//!
//! ```text
//!                    ┌──────────────────────────────────────────────┐
//!                    │                ACCOUNT PROXY                  │
//!                    │                                               │
//!   Client Request   │  ┌─────────┐      ┌──────────────┐           │
//!   ─────────────────┼─▶│  http   │─────▶│ http client  │───────────┼──▶ Upstream
//!                    │  │ server  │      │ (hyper-util) │           │    API
//!                    │  └─────────┘      └──────┬───────┘           │
//!                    │                          │                    │
//!                    │                          ▼                    │
//!   Client Response  │  ┌────────────┐   ┌──────────────┐           │
//!   ◀────────────────┼──│ transformer│◀──│  dispatcher  │◀──────────┼─── Upstream
//!                    │  │ (rewrite)  │   │ (path match) │           │    Response
//!                    │  └────────────┘   └──────────────┘           │
//!                    │                                               │
//!                    │  ┌─────────────────────────────────────────┐ │
//!                    │  │      Cross-Cutting: config, tracing      │ │
//!                    │  └─────────────────────────────────────────┘ │
//!                    └──────────────────────────────────────────────┘
//! ```

use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use account_proxy::config::ProxyConfig;
use account_proxy::http::HttpServer;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "account_proxy=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("account-proxy v0.1.0 starting");

    // Load configuration from the environment; malformed values are fatal
    let config = ProxyConfig::from_env()?;

    tracing::info!(
        backend_url = %config.backend_url,
        domain = %config.domain,
        target_path = %config.target_path,
        min_account_age = ?config.min_account_age,
        bind_address = %config.listener.bind_address,
        "Configuration loaded"
    );

    // Bind TCP listener
    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    let local_addr = listener.local_addr()?;

    tracing::info!(
        address = %local_addr,
        "Listening for connections"
    );

    // Create and run HTTP server
    let server = HttpServer::new(config);
    server.run(listener).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
