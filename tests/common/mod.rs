//! Shared test fixtures and helper utilities.
//!
//! Provides pre-built tokens with known claims and helpers to mint
//! tokens relative to the current time.
#![allow(dead_code)]

use std::time::{SystemTime, UNIX_EPOCH};

/// A valid HS256-signed JWT for testing.
///
/// Header: `{"alg":"HS256","typ":"JWT"}`
/// Payload: `{"sub":"1234567890","name":"Test User","iat":1516239022}`
pub const VALID_HS256_TOKEN: &str = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9.\
     eyJzdWIiOiIxMjM0NTY3ODkwIiwibmFtZSI6IlRlc3QgVXNlciIsImlhdCI6MTUxNjIzOTAyMn0.\
     SflKxwRJSMeKKF2QT4fwpMeJf36POk6yJV_adQssw5c";

/// A malformed token with only two parts (missing signature).
pub const MALFORMED_TOKEN_TWO_PARTS: &str = "eyJhbGciOiJIUzI1NiJ9.eyJzdWIiOiIxMjM0NTY3ODkwIn0";

/// A token whose payload is base64url for `not json`.
pub const NON_JSON_PAYLOAD_TOKEN: &str = "eyJhbGciOiJIUzI1NiJ9.bm90IGpzb24.sig";

/// An opaque token that passes the length check.
pub const OPAQUE_TOKEN: &str = "this-is-a-valid-opaque-token-12345";

/// An opaque token below the minimum length.
pub const SHORT_OPAQUE_TOKEN: &str = "short";

/// HMAC secret used to sign test tokens. Never verified by the tool.
pub const HMAC_TEST_SECRET: &str = "inspect-test-secret-key";

/// Current Unix time in seconds.
pub fn now() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs() as i64
}

/// Create an HS256-signed token with the given claims.
pub fn create_hs256_token(claims: &serde_json::Value) -> String {
    use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
    let header = Header::new(Algorithm::HS256);
    let key = EncodingKey::from_secret(HMAC_TEST_SECRET.as_bytes());
    encode(&header, claims, &key).unwrap()
}

/// A token expiring `offset` seconds from now (negative for the past).
pub fn token_expiring_in(offset: i64) -> String {
    create_hs256_token(&serde_json::json!({
        "sub": "test-user",
        "iat": now(),
        "exp": now() + offset,
    }))
}

/// A token that becomes valid in one hour and expires in two.
pub fn not_yet_valid_token() -> String {
    create_hs256_token(&serde_json::json!({
        "sub": "test-user",
        "iat": now(),
        "nbf": now() + 3600,
        "exp": now() + 7200,
    }))
}
