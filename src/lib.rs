//! Account API Rewrite Proxy Library

pub mod config;
pub mod http;
pub mod rewrite;

pub use config::schema::ProxyConfig;
pub use http::HttpServer;
