//! Shared utilities for integration testing.

use std::net::SocketAddr;
use std::time::Duration;

use axum::http::{HeaderMap, StatusCode};
use axum::routing::get;
use axum::Router;
use tokio::net::TcpListener;
use url::Url;

use account_proxy::config::{ListenerConfig, ProxyConfig, TimeoutConfig};
use account_proxy::HttpServer;

/// Fixed body served by the fake upstream on non-target paths.
pub const OTHER_ENDPOINT_BODY: &str = r#"{"imA":"fake json document"}"#;

/// Start a fake upstream API on an ephemeral port.
///
/// The account endpoint echoes request headers back into the response:
/// `acct` and `created-at` land in the payload, `echo-status` overrides the
/// status code, `raw-body` replaces the whole body verbatim, and
/// `pad-bytes` inflates the payload with a filler field of that many bytes.
pub async fn start_fake_upstream() -> SocketAddr {
    let app = Router::new()
        .route("/something/else", get(|| async { OTHER_ENDPOINT_BODY }))
        .route(
            "/api/v1/accounts/verify_credentials",
            get(verify_credentials),
        );

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    addr
}

async fn verify_credentials(headers: HeaderMap) -> (StatusCode, String) {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };

    let status = header("echo-status")
        .and_then(|v| v.parse().ok())
        .and_then(|code| StatusCode::from_u16(code).ok())
        .unwrap_or(StatusCode::OK);

    if let Some(raw) = header("raw-body") {
        return (status, raw);
    }

    let acct = header("acct").unwrap_or_else(|| "trwnh".to_string());
    let created_at = header("created-at").unwrap_or_else(|| "2016-11-24T10:02:12.085Z".to_string());

    if let Some(pad) = header("pad-bytes").and_then(|v| v.parse::<usize>().ok()) {
        let body = serde_json::json!({
            "acct": acct,
            "created_at": created_at,
            "note": "a".repeat(pad),
        });
        return (status, body.to_string());
    }

    // Trimmed from the verify_credentials example in the Mastodon API docs.
    let body = serde_json::json!({
        "id": "14715",
        "username": "trwnh",
        "acct": acct,
        "display_name": "infinite love",
        "locked": false,
        "bot": false,
        "created_at": created_at,
        "note": "<p>i have approximate knowledge of many things</p>",
        "url": "https://mastodon.example/@trwnh",
        "followers_count": 821,
        "following_count": 178,
        "statuses_count": 33120,
        "last_status_at": "2019-11-24T15:49:42.251Z"
    });

    (status, body.to_string())
}

/// Start the proxy on an ephemeral port, pointed at the given upstream.
pub async fn start_proxy(upstream: SocketAddr, min_account_age: Option<Duration>) -> SocketAddr {
    let config = ProxyConfig {
        backend_url: Url::parse(&format!("http://{}", upstream)).unwrap(),
        domain: "test.local".to_string(),
        target_path: "/api/v1/accounts/verify_credentials".to_string(),
        min_account_age,
        listener: ListenerConfig::default(),
        timeouts: TimeoutConfig::default(),
    };

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let server = HttpServer::new(config);

    tokio::spawn(async move {
        let _ = server.run(listener).await;
    });

    addr
}

/// A reqwest client that ignores any ambient proxy configuration.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder().no_proxy().build().unwrap()
}
