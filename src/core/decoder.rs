//! Structured token decoding.
//!
//! Splits a raw token into its three parts (header, payload, signature),
//! base64url-decodes the payload, and parses it into [`Claims`]. The
//! header and signature are never looked at: no signature is verified.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE;
use serde_json::{Map, Value};

use crate::core::claims::Claims;
use crate::error::DecodeError;

/// Number of `.`-separated segments in a structured token.
const SEGMENT_COUNT: usize = 3;

/// Decode the claims of a structured token without verifying its signature.
///
/// The payload may be padded or unpadded; missing `=` padding is restored
/// before decoding since many producers strip it.
///
/// # Errors
///
/// Returns [`DecodeError::InvalidFormat`] if the token doesn't have exactly
/// three parts or the payload isn't base64url, and
/// [`DecodeError::InvalidClaims`] if the payload isn't a claims object.
pub fn decode(token: &str) -> Result<Claims, DecodeError> {
    let parts: Vec<&str> = token.split('.').collect();
    if parts.len() != SEGMENT_COUNT {
        return Err(DecodeError::InvalidFormat {
            reason: format!(
                "expected {SEGMENT_COUNT} parts separated by '.', got {}",
                parts.len()
            ),
        });
    }

    let bytes = URL_SAFE
        .decode(pad_segment(parts[1]))
        .map_err(|e| DecodeError::InvalidFormat {
            reason: format!("failed to decode payload: {e}"),
        })?;

    let claims_error = |reason: String| DecodeError::InvalidClaims { reason };

    // Going through a map rejects arrays and lets a repeated key's last value win.
    let object: Map<String, Value> =
        serde_json::from_slice(&bytes).map_err(|e| claims_error(e.to_string()))?;
    serde_json::from_value(Value::Object(object)).map_err(|e| claims_error(e.to_string()))
}

/// Append `=` until the segment length is a multiple of four.
fn pad_segment(segment: &str) -> String {
    let mut padded = segment.to_string();
    let remainder = padded.len() % 4;
    if remainder != 0 {
        padded.extend(std::iter::repeat_n('=', 4 - remainder));
    }
    padded
}
