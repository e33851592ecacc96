//! Time-travel debugging for token temporal claims.
//!
//! Parses time expressions (relative like "+7d" or absolute like RFC 3339)
//! so that `exp` and `nbf` claims can be evaluated against a simulated
//! timestamp instead of the wall clock.

use chrono::{DateTime, TimeDelta, Utc};

use crate::error::TimeExpressionError;

/// A parsed time target for time-travel evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeTarget {
    /// The resolved absolute timestamp.
    pub timestamp: DateTime<Utc>,
    /// The original expression provided by the user.
    pub expression: String,
}

/// Parse a time-travel expression into an absolute timestamp.
///
/// Supports the following formats:
/// - Relative: `+7d`, `-1h`, `+30m`, `+1y`, `-5s`, `+2w`
/// - Absolute RFC 3339: `2024-01-15T14:30:00Z`
/// - Absolute Unix epoch: `1705312200`
///
/// # Errors
///
/// Returns an error if the expression doesn't match any known format.
pub fn parse_time_expression(expression: &str) -> Result<TimeTarget, TimeExpressionError> {
    parse_time_expression_from(expression, Utc::now())
}

/// Like [`parse_time_expression`], resolving relative offsets against `now`.
pub fn parse_time_expression_from(
    expression: &str,
    now: DateTime<Utc>,
) -> Result<TimeTarget, TimeExpressionError> {
    let trimmed = expression.trim();
    let fail = |reason: &str| TimeExpressionError {
        expression: expression.to_string(),
        reason: reason.to_string(),
    };

    if trimmed.is_empty() {
        return Err(fail("expression is empty"));
    }

    let timestamp = if let Some(offset) = trimmed.strip_prefix('+') {
        let delta = parse_offset(offset).map_err(|reason| fail(&reason))?;
        now.checked_add_signed(delta)
            .ok_or_else(|| fail("resulting time is out of range"))?
    } else if let Some(offset) = trimmed.strip_prefix('-') {
        let delta = parse_offset(offset).map_err(|reason| fail(&reason))?;
        now.checked_sub_signed(delta)
            .ok_or_else(|| fail("resulting time is out of range"))?
    } else if trimmed.bytes().all(|b| b.is_ascii_digit()) {
        let seconds: i64 = trimmed
            .parse()
            .map_err(|_| fail("epoch seconds out of range"))?;
        DateTime::from_timestamp(seconds, 0).ok_or_else(|| fail("epoch seconds out of range"))?
    } else {
        DateTime::parse_from_rfc3339(trimmed)
            .map_err(|_| fail("expected +/-<n><unit>, RFC 3339, or Unix seconds"))?
            .with_timezone(&Utc)
    };

    Ok(TimeTarget {
        timestamp,
        expression: expression.to_string(),
    })
}

/// Parse `<n><unit>` into a duration.
fn parse_offset(offset: &str) -> Result<TimeDelta, String> {
    let split = offset
        .find(|c: char| !c.is_ascii_digit())
        .ok_or_else(|| "missing unit (expected one of s, m, h, d, w, y)".to_string())?;
    let (digits, unit) = offset.split_at(split);

    if digits.is_empty() {
        return Err("missing amount before unit".to_string());
    }
    let amount: i64 = digits
        .parse()
        .map_err(|_| format!("amount '{digits}' is too large"))?;

    let unit_seconds: i64 = match unit {
        "s" => 1,
        "m" => 60,
        "h" => 3_600,
        "d" => 86_400,
        "w" => 604_800,
        "y" => 31_536_000,
        other => return Err(format!("unknown unit '{other}'")),
    };

    amount
        .checked_mul(unit_seconds)
        .and_then(TimeDelta::try_seconds)
        .ok_or_else(|| format!("amount '{digits}' is too large"))
}
