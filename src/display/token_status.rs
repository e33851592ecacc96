//! Token status display for temporal claims.
//!
//! Renders human-readable status information for the `iat`, `nbf` and
//! `exp` claims, including whether the token is usable and for how long.

use bearer_inspect::Claims;
use bearer_inspect::core::claims::format_unix;
use chrono::{DateTime, TimeDelta, Utc};
use serde::Serialize;

/// Usability of a structured token at a given instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenStatus {
    /// Inside its validity window.
    Valid,
    /// `exp` has been reached.
    Expired,
    /// `nbf` is still in the future.
    NotYetValid,
}

impl TokenStatus {
    /// Evaluate `claims` at `now`, checking expiry first.
    pub fn of(claims: &Claims, now: DateTime<Utc>) -> Self {
        if claims.is_expired_at(now) {
            Self::Expired
        } else if claims.is_not_yet_valid_at(now) {
            Self::NotYetValid
        } else {
            Self::Valid
        }
    }
}

/// Render the temporal status block for `claims` as of `now`.
///
/// - Expired tokens: "EXPIRED (X ago)"
/// - Valid tokens: "VALID (expires in X)" or "VALID (no expiration)"
/// - Not-yet-valid tokens: "NOT YET VALID (valid in X)"
pub fn render_token_status(claims: &Claims, now: DateTime<Utc>) -> String {
    let mut lines = Vec::new();

    if claims.issued_at != 0 {
        lines.push(format!("Issued at:   {}", format_unix(claims.issued_at)));
    }
    if claims.not_before != 0 {
        lines.push(format!("Not before:  {}", format_unix(claims.not_before)));
    }
    if claims.expiration != 0 {
        lines.push(format!("Expires:     {}", format_unix(claims.expiration)));
    }

    let status = match TokenStatus::of(claims, now) {
        TokenStatus::Expired => format!(
            "EXPIRED ({} ago)",
            format_duration(-claims.expires_in_at(now))
        ),
        TokenStatus::NotYetValid => {
            let until = TimeDelta::try_seconds(claims.not_before - now.timestamp())
                .unwrap_or(TimeDelta::MAX);
            format!("NOT YET VALID (valid in {})", format_duration(until))
        }
        TokenStatus::Valid if claims.expiration == 0 => "VALID (no expiration)".to_string(),
        TokenStatus::Valid => format!(
            "VALID (expires in {})",
            format_duration(claims.expires_in_at(now))
        ),
    };
    lines.push(format!("Status:      {status}"));

    lines.join("\n")
}

/// Format a duration as its two most significant units, e.g. `2d 3h`.
pub fn format_duration(delta: TimeDelta) -> String {
    let total = delta.num_seconds().unsigned_abs();
    let units = [
        (total / 86_400, "d"),
        (total % 86_400 / 3_600, "h"),
        (total % 3_600 / 60, "m"),
        (total % 60, "s"),
    ];

    let parts: Vec<String> = units
        .iter()
        .skip_while(|(value, _)| *value == 0)
        .take(2)
        .filter(|(value, _)| *value != 0)
        .map(|(value, unit)| format!("{value}{unit}"))
        .collect();

    if parts.is_empty() {
        "0s".to_string()
    } else {
        parts.join(" ")
    }
}
