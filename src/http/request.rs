//! Request preparation for forwarding.
//!
//! # Responsibilities
//! - Rewrite the request URI so it targets the upstream authority
//! - Join the backend base path with the original request path
//! - Preserve the original query string
//!
//! # Design Decisions
//! - The original request is otherwise forwarded verbatim: headers, method
//!   and body are untouched by the proxy

use axum::http::Uri;
use url::Url;

/// Build the upstream request URI from the configured base URL and the
/// original request URI.
///
/// Scheme, host and port come from the base URL; its path (if any) is
/// prepended to the request path. The query string is preserved.
pub fn upstream_uri(base: &Url, original: &Uri) -> Result<Uri, axum::http::Error> {
    let host = base.host_str().unwrap_or_default();
    let authority = match base.port() {
        Some(port) => format!("{}:{}", host, port),
        None => host.to_string(),
    };

    let mut path_and_query = String::new();
    let base_path = base.path().trim_end_matches('/');
    if !base_path.is_empty() && base_path != "/" {
        path_and_query.push_str(base_path);
    }
    path_and_query.push_str(original.path());
    if let Some(query) = original.query() {
        path_and_query.push('?');
        path_and_query.push_str(query);
    }

    Uri::builder()
        .scheme(base.scheme())
        .authority(authority.as_str())
        .path_and_query(path_and_query.as_str())
        .build()
}
