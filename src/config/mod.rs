//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! process environment (BACKEND_URL, DOMAIN, ...)
//!     → loader.rs (read & parse each variable)
//!     → ProxyConfig (validated, immutable)
//!     → shared via Arc to the server and rewrite pipeline
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; there is no reload path
//! - Malformed values are fatal at startup, never at request time
//! - Only the backend URL and domain are required; everything else defaults

pub mod loader;
pub mod schema;

pub use schema::ProxyConfig;
pub use schema::ListenerConfig;
pub use schema::TimeoutConfig;
