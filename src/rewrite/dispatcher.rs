//! Per-response dispatch.
//!
//! # Responsibilities
//! - Inspect the path of the request that produced each upstream response
//! - Hand matching responses to the transformer, pass everything else through
//! - Emit one observability record per response (path, upstream status)
//!
//! # Design Decisions
//! - Exact string match only: no patterns, no query string, no method filter
//! - Transformer errors are terminal for the response cycle and propagate
//!   to the caller

use axum::body::Body;
use axum::http::Response;
use hyper::body::Incoming;

use crate::config::ProxyConfig;
use crate::rewrite::transformer::{self, RewriteError};

/// Decide, by request path, whether the upstream response gets rewritten.
pub async fn dispatch(
    config: &ProxyConfig,
    path: &str,
    response: Response<Incoming>,
) -> Result<Response<Body>, RewriteError> {
    tracing::debug!(
        path = %path,
        status = %response.status(),
        "Upstream response received"
    );

    let (parts, body) = response.into_parts();
    let response = Response::from_parts(parts, Body::new(body));

    if path != config.target_path {
        return Ok(response);
    }

    transformer::rewrite(config, response).await
}
