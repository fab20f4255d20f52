//! Response body rewriting for the account-info endpoint.
//!
//! One linear pass per response:
//!
//! ```text
//! received → status-checked → body-buffered → json-decoded
//!     → field-validated → [age-gated] → field-synthesized
//!     → re-encoded → headers-fixed → done
//! ```
//!
//! # Design Decisions
//! - Only 200 responses are rewritten; error and redirect bodies have
//!   unknown schema and are forwarded untouched
//! - Malformed JSON and a missing or empty handle are logged and forwarded
//!   unmodified rather than failing the response
//! - Whenever the body bytes are replaced, the content-length header is
//!   recomputed. The proxying layer does not do this for us, and a stale
//!   value makes clients truncate or hang.

use axum::body::{to_bytes, Body, Bytes};
use axum::http::{header, response::Parts, HeaderValue, Response, StatusCode};
use chrono::Utc;
use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::config::ProxyConfig;
use crate::rewrite::age_gate::{self, Decision, CREATED_AT_KEY};

/// Key under which the synthesized address is inserted.
pub const FAKE_EMAIL_KEY: &str = "fake_email";

/// Account handle key in the upstream payload.
/// https://docs.joinmastodon.org/entities/Account/#acct
pub const ACCT_KEY: &str = "acct";

/// Upper bound on a buffered upstream body. A target-path 200 response
/// exceeding this is a terminal read error, surfaced to the client as 502.
const MAX_BUFFERED_BODY: usize = 2 * 1024 * 1024;

/// Errors that are terminal for one response cycle.
#[derive(Debug, Error)]
pub enum RewriteError {
    /// The upstream body could not be read; there is nothing to forward.
    #[error("reading upstream body: {0}")]
    BodyRead(#[source] axum::Error),
}

/// Body returned in place of the payload when the age gate rejects.
#[derive(Serialize)]
struct GateDenial {
    error: &'static str,
}

const GATE_DENIAL_ERROR: &str = "Account has not reached the minimum required age";

/// Rewrite one upstream response from the target endpoint.
///
/// Non-200 responses are forwarded untouched, body still streaming. For 200
/// responses the body is buffered and handed to [`transform`]; the only
/// terminal error is a failed body read.
pub async fn rewrite(
    config: &ProxyConfig,
    response: Response<Body>,
) -> Result<Response<Body>, RewriteError> {
    if response.status() != StatusCode::OK {
        tracing::debug!(
            status = %response.status(),
            "Non-OK upstream status, forwarding unmodified"
        );
        return Ok(response);
    }

    let (mut parts, body) = response.into_parts();
    let body = to_bytes(body, MAX_BUFFERED_BODY)
        .await
        .map_err(RewriteError::BodyRead)?;

    let body = transform(config, &mut parts, body);
    Ok(Response::from_parts(parts, Body::from(body)))
}

/// Run the buffered body through decode → validate → gate → synthesize →
/// re-encode, mutating status and headers in `parts` as needed.
///
/// Returns the bytes to deliver: either the original body (every early
/// exit) or a fully re-encoded one with content-length already fixed up.
fn transform(config: &ProxyConfig, parts: &mut Parts, body: Bytes) -> Bytes {
    let mut payload: Map<String, Value> = match serde_json::from_slice(&body) {
        Ok(payload) => payload,
        Err(e) => {
            tracing::warn!(error = %e, "Upstream body is not a JSON object, forwarding unmodified");
            return body;
        }
    };

    let acct = match payload.get(ACCT_KEY).and_then(Value::as_str) {
        Some(acct) if !acct.is_empty() => acct.to_string(),
        _ => {
            tracing::warn!(
                key = ACCT_KEY,
                status = %parts.status,
                "Handle missing or empty in upstream payload, forwarding unmodified"
            );
            return body;
        }
    };

    if let Some(min_age) = config.min_account_age {
        let decision = age_gate::evaluate(payload.get(CREATED_AT_KEY), min_age, Utc::now());
        if decision == Decision::Block {
            tracing::info!(
                acct = %acct,
                min_account_age = ?min_age,
                "Account below minimum age, rejecting"
            );
            parts.status = StatusCode::FORBIDDEN;
            let denial = serde_json::to_vec(&GateDenial {
                error: GATE_DENIAL_ERROR,
            });
            // On the off chance the denial body cannot be serialized, the
            // original body is kept under the overridden status.
            let body = match denial {
                Ok(denial) => Bytes::from(denial),
                Err(_) => body,
            };
            set_content_length(parts, body.len());
            return body;
        }
    }

    let fake_email = synthesize_email(&acct, &config.domain);
    payload.insert(FAKE_EMAIL_KEY.to_string(), Value::String(fake_email.clone()));

    let encoded = match serde_json::to_vec(&payload) {
        Ok(encoded) => encoded,
        Err(e) => {
            tracing::error!(error = %e, "Re-encoding rewritten payload failed, forwarding original body");
            return body;
        }
    };

    tracing::info!(
        key = FAKE_EMAIL_KEY,
        value = %fake_email,
        "Added synthetic field"
    );

    set_content_length(parts, encoded.len());
    Bytes::from(encoded)
}

/// Derive the synthetic address from the account handle.
///
/// A handle that already carries an `@` encodes a foreign-domain identity
/// and is used as-is; local handles get the configured domain appended.
fn synthesize_email(acct: &str, domain: &str) -> String {
    if acct.contains('@') {
        acct.to_string()
    } else {
        format!("{}@{}", acct, domain)
    }
}

/// Recompute the framing header after a body replacement.
fn set_content_length(parts: &mut Parts, len: usize) {
    parts.headers.insert(header::CONTENT_LENGTH, HeaderValue::from(len));
}
