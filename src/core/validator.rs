//! Time-based validity policy for bearer credentials.
//!
//! Accepts either an opaque bearer string or a structured token. Opaque
//! tokens only get a minimum-length check; structured tokens are decoded
//! with [`decode`] and their `exp` / `nbf` claims are compared with the
//! current instant. Signatures are not verified here.

use chrono::{DateTime, TimeDelta, Utc};

use crate::core::decoder::decode;
use crate::error::ValidationError;

/// Prefix stripped from credentials before classification. Case-sensitive.
pub const BEARER_PREFIX: &str = "Bearer ";

/// Opaque tokens shorter than this many bytes are rejected.
pub const MIN_OPAQUE_LENGTH: usize = 10;

/// Window in which a still-valid token counts as close to expiry.
pub const EXPIRY_WARNING_WINDOW: TimeDelta = TimeDelta::minutes(5);

/// How a credential string was interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CredentialKind {
    /// An unparsed bearer string.
    Opaque,
    /// A three-segment token with a claims payload.
    Structured,
}

impl CredentialKind {
    /// Lowercase name used in CLI and JSON output.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Opaque => "opaque",
            Self::Structured => "structured",
        }
    }
}

/// Remove a single leading `"Bearer "` if present.
pub fn strip_bearer(token: &str) -> &str {
    token.strip_prefix(BEARER_PREFIX).unwrap_or(token)
}

/// Classify a credential after stripping the bearer prefix.
///
/// Anything containing a `.` is treated as structured, even when it will
/// later fail to decode.
pub fn classify(token: &str) -> CredentialKind {
    if strip_bearer(token).contains('.') {
        CredentialKind::Structured
    } else {
        CredentialKind::Opaque
    }
}

/// Validate a credential against the current wall-clock time.
///
/// The clock is read once per call.
///
/// # Errors
///
/// See [`validate_at`].
pub fn validate(token: &str) -> Result<CredentialKind, ValidationError> {
    validate_at(token, Utc::now())
}

/// Validate a credential as if the current instant were `now`.
///
/// # Errors
///
/// Returns [`ValidationError::Empty`] for an empty string,
/// [`ValidationError::TooShort`] for an opaque token under
/// [`MIN_OPAQUE_LENGTH`] bytes, [`ValidationError::Malformed`] when a
/// structured token can't be decoded, and [`ValidationError::Expired`] or
/// [`ValidationError::NotYetValid`] when `now` falls outside its window.
pub fn validate_at(token: &str, now: DateTime<Utc>) -> Result<CredentialKind, ValidationError> {
    if token.is_empty() {
        return Err(ValidationError::Empty);
    }

    let token = strip_bearer(token);

    if !token.contains('.') {
        let length = token.len();
        if length < MIN_OPAQUE_LENGTH {
            return Err(ValidationError::TooShort { length });
        }
        return Ok(CredentialKind::Opaque);
    }

    let claims = decode(token)?;

    if claims.is_expired_at(now) {
        return Err(ValidationError::Expired {
            expired_at: claims.expiration,
        });
    }

    if claims.is_not_yet_valid_at(now) {
        return Err(ValidationError::NotYetValid {
            not_before: claims.not_before,
        });
    }

    // Near-expiry tokens still pass. Hook for a future soft warning.
    let _expiring_soon = claims.expires_within_at(EXPIRY_WARNING_WINDOW, now);

    Ok(CredentialKind::Structured)
}

#[cfg(test)]
mod tests {
    use base64::Engine;
    use base64::engine::general_purpose::URL_SAFE_NO_PAD;

    use super::*;
    use crate::core::claims::Claims;
    use crate::error::ErrorKind;

    const NOW: i64 = 1_700_000_000;

    fn now() -> DateTime<Utc> {
        DateTime::from_timestamp(NOW, 0).unwrap()
    }

    fn token_with(claims: &Claims) -> String {
        let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
        let payload = URL_SAFE_NO_PAD.encode(serde_json::to_vec(claims).unwrap());
        format!("{header}.{payload}.fake_signature")
    }

    #[test]
    fn test_empty_token_fails() {
        assert_eq!(validate_at("", now()), Err(ValidationError::Empty));
    }

    #[test]
    fn test_short_opaque_token_fails() {
        let err = validate_at("short", now()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::OpaqueTooShort);
        assert_eq!(err, ValidationError::TooShort { length: 5 });
    }

    #[test]
    fn test_opaque_token_at_threshold_passes() {
        assert_eq!(validate_at("0123456789", now()), Ok(CredentialKind::Opaque));
        assert!(validate_at("012345678", now()).is_err());
    }

    #[test]
    fn test_opaque_length_counts_bytes() {
        // Five 2-byte characters make ten bytes.
        assert_eq!(validate_at("ééééé", now()), Ok(CredentialKind::Opaque));
        assert_eq!(
            validate_at("éééé", now()),
            Err(ValidationError::TooShort { length: 8 })
        );
    }

    #[test]
    fn test_array_claims_payload_fails() {
        // [] and ["x"]
        for token in ["h.W10.s", "h.WyJ4Il0.s"] {
            let err = validate_at(token, now()).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::ClaimsError, "{token}");
        }
    }

    #[test]
    fn test_valid_opaque_token_passes() {
        assert_eq!(
            validate_at("this-is-a-valid-opaque-token-12345", now()),
            Ok(CredentialKind::Opaque)
        );
    }

    #[test]
    fn test_bearer_prefix_is_stripped_before_length_check() {
        // "Bearer short" is 12 bytes, but only "short" is measured.
        let err = validate_at("Bearer short", now()).unwrap_err();
        assert_eq!(err, ValidationError::TooShort { length: 5 });
    }

    #[test]
    fn test_bearer_prefix_is_case_sensitive() {
        // Not stripped, so the whole string counts.
        assert_eq!(validate_at("bearer short", now()), Ok(CredentialKind::Opaque));
    }

    #[test]
    fn test_bare_bearer_prefix_counts_as_empty_remainder() {
        let err = validate_at("Bearer ", now()).unwrap_err();
        assert_eq!(err, ValidationError::TooShort { length: 0 });
    }

    #[test]
    fn test_invalid_jwt_format_fails_with_context() {
        let err = validate_at("invalid.jwt", now()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::FormatError);
        let message = err.to_string();
        assert!(message.starts_with("JWT validation failed: "));
        assert!(message.contains("invalid token format"));
        assert!(message.contains("got 2"));
    }

    #[test]
    fn test_unparseable_claims_fail_with_claims_kind() {
        let err = validate_at("h.bm90IGpzb24.s", now()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ClaimsError);
        assert!(err.to_string().contains("invalid token claims"));
    }

    #[test]
    fn test_valid_jwt_passes() {
        let token = token_with(&Claims {
            subject: "test-user".to_string(),
            expiration: NOW + 3600,
            issued_at: NOW,
            ..Claims::default()
        });
        assert_eq!(validate_at(&token, now()), Ok(CredentialKind::Structured));
    }

    #[test]
    fn test_valid_jwt_with_bearer_prefix_passes() {
        let token = token_with(&Claims {
            expiration: NOW + 3600,
            ..Claims::default()
        });
        let prefixed = format!("Bearer {token}");
        assert_eq!(validate_at(&prefixed, now()), Ok(CredentialKind::Structured));
    }

    #[test]
    fn test_jwt_without_time_claims_passes() {
        let token = token_with(&Claims::default());
        assert!(validate_at(&token, now()).is_ok());
    }

    #[test]
    fn test_expired_jwt_fails() {
        let token = token_with(&Claims {
            subject: "test-user".to_string(),
            expiration: NOW - 3600,
            issued_at: NOW - 7200,
            ..Claims::default()
        });
        let err = validate_at(&token, now()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Expired);
        assert!(err.to_string().contains("token is expired"));
        assert!(err.to_string().contains("2023-11-14T21:13:20Z"));
    }

    #[test]
    fn test_expiration_equal_to_now_fails() {
        let token = token_with(&Claims {
            expiration: NOW,
            ..Claims::default()
        });
        assert_eq!(
            validate_at(&token, now()),
            Err(ValidationError::Expired { expired_at: NOW })
        );
    }

    #[test]
    fn test_not_yet_valid_jwt_fails() {
        let token = token_with(&Claims {
            subject: "test-user".to_string(),
            expiration: NOW + 7200,
            not_before: NOW + 3600,
            issued_at: NOW,
            ..Claims::default()
        });
        let err = validate_at(&token, now()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotYetValid);
        assert!(err.to_string().contains("not yet valid until"));
    }

    #[test]
    fn test_expiry_checked_before_not_before() {
        let token = token_with(&Claims {
            expiration: NOW - 10,
            not_before: NOW + 10,
            ..Claims::default()
        });
        assert_eq!(validate_at(&token, now()).unwrap_err().kind(), ErrorKind::Expired);
    }

    #[test]
    fn test_token_expiring_soon_still_passes() {
        let token = token_with(&Claims {
            expiration: NOW + 60,
            ..Claims::default()
        });
        assert_eq!(validate_at(&token, now()), Ok(CredentialKind::Structured));
    }

    #[test]
    fn test_validate_uses_wall_clock() {
        let current = Utc::now().timestamp();
        let fresh = token_with(&Claims {
            expiration: current + 3600,
            ..Claims::default()
        });
        let stale = token_with(&Claims {
            expiration: current - 3600,
            ..Claims::default()
        });
        assert!(validate(&fresh).is_ok());
        assert_eq!(validate(&stale).unwrap_err().kind(), ErrorKind::Expired);
    }

    #[test]
    fn test_classify() {
        assert_eq!(classify("opaque-token"), CredentialKind::Opaque);
        assert_eq!(classify("a.b.c"), CredentialKind::Structured);
        assert_eq!(classify("Bearer a.b"), CredentialKind::Structured);
    }

    #[test]
    fn test_strip_bearer_only_once() {
        assert_eq!(strip_bearer("Bearer Bearer x"), "Bearer x");
        assert_eq!(strip_bearer("Bearerx"), "Bearerx");
    }
}
