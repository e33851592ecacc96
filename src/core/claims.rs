//! The claims record carried by a structured token.
//!
//! Only the registered time and identity claims are modelled. Every field
//! is optional on the wire and falls back to its zero value, which for the
//! time claims means "not set".

use chrono::{DateTime, SecondsFormat, TimeDelta, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Decoded payload of a structured token.
///
/// Holds plain values only: nothing here points back at the token string
/// or at any key material.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Issuer (`iss`).
    #[serde(
        rename = "iss",
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "String::is_empty"
    )]
    pub issuer: String,
    /// Subject (`sub`).
    #[serde(
        rename = "sub",
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "String::is_empty"
    )]
    pub subject: String,
    /// Audience (`aud`).
    #[serde(
        rename = "aud",
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "String::is_empty"
    )]
    pub audience: String,
    /// Expiration (`exp`), Unix seconds. Zero means the token never expires.
    #[serde(
        rename = "exp",
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "is_zero"
    )]
    pub expiration: i64,
    /// Not before (`nbf`), Unix seconds. Zero means no lower bound.
    #[serde(
        rename = "nbf",
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "is_zero"
    )]
    pub not_before: i64,
    /// Issued at (`iat`), Unix seconds.
    #[serde(
        rename = "iat",
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "is_zero"
    )]
    pub issued_at: i64,
    /// Token identifier (`jti`).
    #[serde(
        rename = "jti",
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "String::is_empty"
    )]
    pub token_id: String,
}

impl Claims {
    /// Whether the expiration instant has been reached.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    /// Whether the expiration instant has been reached as of `now`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expiration != 0 && now.timestamp() >= self.expiration
    }

    /// Whether the not-before instant is still in the future.
    pub fn is_not_yet_valid(&self) -> bool {
        self.is_not_yet_valid_at(Utc::now())
    }

    /// Whether the not-before instant is still in the future as of `now`.
    pub fn is_not_yet_valid_at(&self, now: DateTime<Utc>) -> bool {
        self.not_before != 0 && now.timestamp() < self.not_before
    }

    /// Time remaining until expiration.
    ///
    /// Zero when the token has no expiration. Negative once it has expired;
    /// the value is never clamped.
    pub fn expires_in(&self) -> TimeDelta {
        self.expires_in_at(Utc::now())
    }

    /// Time remaining until expiration, measured from `now`.
    pub fn expires_in_at(&self, now: DateTime<Utc>) -> TimeDelta {
        if self.expiration == 0 {
            return TimeDelta::zero();
        }
        match DateTime::from_timestamp(self.expiration, 0) {
            Some(expires_at) => expires_at - now,
            None if self.expiration > 0 => TimeDelta::MAX,
            None => TimeDelta::MIN,
        }
    }

    /// Whether the token is still live but expires in less than `window`.
    pub fn expires_within(&self, window: TimeDelta) -> bool {
        self.expires_within_at(window, Utc::now())
    }

    /// Like [`Claims::expires_within`], measured from `now`.
    pub fn expires_within_at(&self, window: TimeDelta, now: DateTime<Utc>) -> bool {
        let remaining = self.expires_in_at(now);
        remaining > TimeDelta::zero() && remaining < window
    }
}

/// Render a Unix timestamp as RFC 3339 in UTC with second precision.
///
/// Values outside the representable calendar range are printed as raw
/// seconds so the message still carries the claim.
pub fn format_unix(seconds: i64) -> String {
    DateTime::from_timestamp(seconds, 0)
        .map(|instant| instant.to_rfc3339_opts(SecondsFormat::Secs, true))
        .unwrap_or_else(|| format!("{seconds} (unix seconds)"))
}

/// Treat an explicit JSON `null` the same as a missing key.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn is_zero(value: &i64) -> bool {
    *value == 0
}
