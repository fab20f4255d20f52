//! Minimum-account-age gating.
//!
//! # Responsibilities
//! - Parse the account creation timestamp (RFC 3339)
//! - Compare the account's age against the configured threshold
//!
//! # Design Decisions
//! - Fails open: a missing, non-string or unparseable timestamp allows the
//!   account and only logs. Availability wins over strict enforcement when
//!   the upstream schema is unexpected.
//! - Pure function of (timestamp value, threshold, now) so decisions are
//!   testable without a clock

use std::time::Duration;

use chrono::{DateTime, Duration as ChronoDuration, Utc};
use serde_json::Value;

/// Key holding the account creation timestamp in the upstream payload.
pub const CREATED_AT_KEY: &str = "created_at";

/// Outcome of an age-gate evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Account is old enough (or the gate could not be evaluated).
    Allow,
    /// Account is younger than the configured minimum age.
    Block,
}

/// Evaluate the age gate for one account payload.
///
/// An account whose age is less than or equal to `min_age` is blocked.
pub fn evaluate(created_at: Option<&Value>, min_age: Duration, now: DateTime<Utc>) -> Decision {
    let Some(raw) = created_at.and_then(Value::as_str) else {
        tracing::warn!(
            key = CREATED_AT_KEY,
            "Creation timestamp missing or not a string, allowing account"
        );
        return Decision::Allow;
    };

    let created = match DateTime::parse_from_rfc3339(raw) {
        Ok(ts) => ts.with_timezone(&Utc),
        Err(e) => {
            tracing::warn!(
                key = CREATED_AT_KEY,
                value = %raw,
                error = %e,
                "Unparseable creation timestamp, allowing account"
            );
            return Decision::Allow;
        }
    };

    let min_age = match ChronoDuration::from_std(min_age) {
        Ok(d) => d,
        Err(e) => {
            tracing::warn!(error = %e, "Minimum account age out of range, allowing account");
            return Decision::Allow;
        }
    };

    if now.signed_duration_since(created) <= min_age {
        Decision::Block
    } else {
        Decision::Allow
    }
}
