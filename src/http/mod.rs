//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware, proxy handler)
//!     → request.rs (rewrite URI to the upstream authority)
//!     → hyper client forwards to the backend
//!     → rewrite subsystem decides whether to touch the response
//!     → Send to client
//! ```

pub mod request;
pub mod server;

pub use server::HttpServer;
