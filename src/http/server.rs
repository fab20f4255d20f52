//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the catch-all proxy handler
//! - Wire up middleware (tracing, timeout, request ID)
//! - Bind server to listener
//! - Forward requests to the upstream backend
//! - Hand completed responses to the rewrite subsystem

use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode},
    response::{IntoResponse, Response},
    routing::any,
    Router,
};
use hyper_util::{
    client::legacy::{connect::HttpConnector, Client},
    rt::TokioExecutor,
};
use tokio::net::TcpListener;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::ProxyConfig;
use crate::http::request::upstream_uri;
use crate::rewrite;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ProxyConfig>,
    pub client: Client<HttpConnector, Body>,
}

/// HTTP server for the rewrite proxy.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: ProxyConfig) -> Self {
        // Initialize HTTP Client
        let client = Client::builder(TokioExecutor::new()).build(HttpConnector::new());

        let request_timeout = Duration::from_secs(config.timeouts.request_secs);
        let state = AppState {
            config: Arc::new(config),
            client,
        };

        let router = Self::build_router(request_timeout, state);
        Self { router }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(request_timeout: Duration, state: AppState) -> Router {
        Router::new()
            .route("/{*path}", any(proxy_handler))
            .route("/", any(proxy_handler))
            .with_state(state)
            .layer(TimeoutLayer::new(request_timeout))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
            .layer(TraceLayer::new_for_http())
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(self, listener: TcpListener) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            "HTTP server starting"
        );

        // Serve with graceful shutdown
        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Main proxy handler.
/// Forwards the request to the upstream backend and runs the response
/// through the rewrite dispatcher.
async fn proxy_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    let path = request.uri().path().to_string();

    tracing::info!(
        method = %request.method(),
        uri = %request.uri(),
        "Proxying request"
    );

    let (mut parts, body) = request.into_parts();
    parts.uri = match upstream_uri(&state.config.backend_url, &parts.uri) {
        Ok(uri) => uri,
        Err(e) => {
            tracing::error!(path = %path, error = %e, "Failed to build upstream URI");
            return (StatusCode::INTERNAL_SERVER_ERROR, "Failed to build upstream URI")
                .into_response();
        }
    };
    let upstream_request = Request::from_parts(parts, body);

    match state.client.request(upstream_request).await {
        Ok(response) => match rewrite::dispatch(&state.config, &path, response).await {
            Ok(response) => response.into_response(),
            Err(e) => {
                tracing::error!(path = %path, error = %e, "Rewriting upstream response failed");
                (
                    StatusCode::BAD_GATEWAY,
                    "Upstream response could not be delivered",
                )
                    .into_response()
            }
        },
        Err(e) => {
            tracing::error!(path = %path, error = %e, "Upstream error");
            (StatusCode::BAD_GATEWAY, "Upstream request failed").into_response()
        }
    }
}

/// Wait for shutdown signal (Ctrl+C).
async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
    tracing::info!("Shutdown signal received");
}
