//! Domain error types for bearer-inspect.
//!
//! All business-logic errors are defined here using `thiserror`.
//! These errors are converted to user-friendly messages at the CLI boundary.

use std::fmt;

use thiserror::Error;

use crate::core::claims::format_unix;

/// Errors produced while decoding a structured token into claims.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// The token does not have three segments, or its payload is not base64.
    #[error("invalid token format: {reason}")]
    InvalidFormat {
        /// Description of the structural problem.
        reason: String,
    },

    /// The payload decoded to bytes that are not a claims object.
    #[error("invalid token claims: failed to parse claims: {reason}")]
    InvalidClaims {
        /// Description of the parsing failure.
        reason: String,
    },
}

/// Errors returned by the validity policy.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The credential string has zero length.
    #[error("auth token is empty")]
    Empty,

    /// An opaque token is shorter than the minimum accepted length.
    #[error("token appears too short to be valid (length: {length})")]
    TooShort {
        /// Length of the token in bytes, after prefix stripping.
        length: usize,
    },

    /// A structured token could not be decoded.
    #[error("JWT validation failed: {0}")]
    Malformed(DecodeError),

    /// The token's expiration instant is at or before the current instant.
    #[error("token is expired: token expired at {}", format_unix(*.expired_at))]
    Expired {
        /// The `exp` claim, in Unix seconds.
        expired_at: i64,
    },

    /// The token's not-before instant is after the current instant.
    #[error("token not yet valid until {}", format_unix(*.not_before))]
    NotYetValid {
        /// The `nbf` claim, in Unix seconds.
        not_before: i64,
    },
}

/// Classification of every way a credential can be rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Input string has zero length.
    EmptyCredential,
    /// Wrong segment count or a payload that is not valid base64.
    FormatError,
    /// Payload bytes do not parse as a claims record.
    ClaimsError,
    /// Opaque token below the minimum length.
    OpaqueTooShort,
    /// Expiration instant reached.
    Expired,
    /// Not-before instant not yet reached.
    NotYetValid,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::EmptyCredential => "empty_credential",
            Self::FormatError => "format_error",
            Self::ClaimsError => "claims_error",
            Self::OpaqueTooShort => "opaque_too_short",
            Self::Expired => "expired",
            Self::NotYetValid => "not_yet_valid",
        };
        f.write_str(name)
    }
}

impl From<DecodeError> for ValidationError {
    fn from(err: DecodeError) -> Self {
        Self::Malformed(err)
    }
}

impl DecodeError {
    /// The taxonomy kind of this decode failure.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidFormat { .. } => ErrorKind::FormatError,
            Self::InvalidClaims { .. } => ErrorKind::ClaimsError,
        }
    }
}

impl ValidationError {
    /// The taxonomy kind of this validation failure.
    ///
    /// Decode failures keep their own kind through the `Malformed` wrapper.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Empty => ErrorKind::EmptyCredential,
            Self::TooShort { .. } => ErrorKind::OpaqueTooShort,
            Self::Malformed(inner) => inner.kind(),
            Self::Expired { .. } => ErrorKind::Expired,
            Self::NotYetValid { .. } => ErrorKind::NotYetValid,
        }
    }
}

/// Failure to parse a time-travel expression.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid time expression '{expression}': {reason}")]
pub struct TimeExpressionError {
    /// The time expression that failed to parse.
    pub expression: String,
    /// Description of the parsing failure.
    pub reason: String,
}

/// Errors raised while preparing a client configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The endpoint is not a `host:port` pair.
    #[error("invalid host:port format '{host_port}' (both host and port required): {reason}")]
    InvalidHostPort {
        /// The rejected endpoint.
        host_port: String,
        /// What is wrong with it.
        reason: String,
    },

    /// No auth token was configured.
    #[error("auth token is required")]
    MissingToken,

    /// The configured token failed the validity policy.
    #[error("auth token validation failed: {0}")]
    InvalidToken(ValidationError),

    /// The configured token could not be decoded for introspection.
    #[error("auth token cannot be inspected: {0}")]
    Undecodable(DecodeError),
}

/// Errors raised while resolving CLI input.
#[derive(Debug, Error)]
pub enum CliError {
    /// No token was provided via any input method.
    #[error("no token provided: pass a token as an argument, via --token-env, or through stdin")]
    NoTokenProvided,

    /// The specified environment variable is not set.
    #[error("environment variable '{name}' is not set")]
    EnvVarNotFound {
        /// Name of the missing environment variable.
        name: String,
    },

    /// The variable name cannot be looked up.
    #[error("invalid environment variable name '{name}'")]
    InvalidEnvVarName {
        /// The rejected name.
        name: String,
    },

    /// Reading the token from stdin failed.
    #[error("failed to read token from stdin: {reason}")]
    StdinRead {
        /// Description of the I/O failure.
        reason: String,
    },
}
