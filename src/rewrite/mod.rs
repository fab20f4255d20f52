//! Response rewrite subsystem.
//!
//! # Data Flow
//! ```text
//! Completed upstream response (+ original request path)
//!     → dispatcher.rs (exact path match against the target endpoint)
//!     → transformer.rs (buffer body, decode JSON, validate, synthesize)
//!     → age_gate.rs (optional minimum-account-age policy)
//!     → Response with rewritten body and recomputed content-length
//! ```
//!
//! # Design Decisions
//! - Non-matching paths stream through with zero cost beyond the comparison
//! - Only 200 responses from the target path are eligible for rewriting
//! - Every failure after buffering degrades to forwarding the original
//!   bytes; the one terminal error is an unreadable upstream body
//! - The emitted response is either byte-identical to upstream or a fully
//!   re-encoded body whose content-length header matches

pub mod age_gate;
pub mod dispatcher;
pub mod transformer;

pub use dispatcher::dispatch;
pub use transformer::RewriteError;
