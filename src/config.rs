//! Client configuration and the per-call bearer credential.
//!
//! [`ClientConfig::check_and_set_defaults`] is the gate in front of the
//! connection layer: it fills in defaults, validates the endpoint, and runs
//! the token through the validity policy. Only a config that passes yields
//! a [`TokenAuth`] to attach to outgoing calls.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use zeroize::Zeroizing;

use crate::core::claims::Claims;
use crate::core::decoder::decode;
use crate::core::validator::{BEARER_PREFIX, CredentialKind, strip_bearer, validate};
use crate::error::{ConfigError, ValidationError};
use crate::logger::{Logger, NoOpLogger};
use crate::version::{Version, user_agent};

/// Default API endpoint.
pub const DEFAULT_HOST_PORT: &str = "api.admiral.io:443";

/// Default timeout for establishing a connection.
pub const DEFAULT_DIAL_TIMEOUT: Duration = Duration::from_secs(30);

/// Default interval between keepalive pings.
pub const DEFAULT_KEEP_ALIVE_TIME: Duration = Duration::from_secs(30);

/// Default timeout for keepalive ping responses.
pub const DEFAULT_KEEP_ALIVE_TIMEOUT: Duration = Duration::from_secs(90);

/// Metadata key carrying the credential on each call.
pub const AUTHORIZATION_METADATA_KEY: &str = "authorization";

/// Transport settings consumed by the connection layer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConnectionOptions {
    /// Connect without TLS.
    pub insecure: bool,
    /// Connection establishment timeout. Zero selects the default.
    pub dial_timeout: Duration,
    /// Send keepalive pings.
    pub enable_keep_alive_check: bool,
    /// Interval between keepalive pings. Zero selects the default.
    pub keep_alive_time: Duration,
    /// Keepalive response timeout. Zero selects the default.
    pub keep_alive_timeout: Duration,
    /// Ping even when no call is active.
    pub keep_alive_permit_without_stream: bool,
}

/// Configuration for an API client.
#[derive(Clone, Default)]
pub struct ClientConfig {
    /// Endpoint as `host:port`. Empty selects [`DEFAULT_HOST_PORT`].
    pub host_port: String,
    /// Bearer credential, with or without the `"Bearer "` prefix.
    pub auth_token: Zeroizing<String>,
    /// Transport settings.
    pub connection: ConnectionOptions,
    /// Log sink. `None` selects [`NoOpLogger`].
    pub logger: Option<Arc<dyn Logger>>,
    /// Build identifier reported to the server.
    pub version: Version,
}

/// Redacts the token so configs can be logged safely.
impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("host_port", &self.host_port)
            .field("auth_token", &"[REDACTED]")
            .field("connection", &self.connection)
            .field("logger", &self.logger.as_ref().map(|_| "dyn Logger"))
            .field("version", &self.version)
            .finish()
    }
}

impl ClientConfig {
    /// Create a config for `auth_token` with every other field defaulted.
    pub fn new(auth_token: impl Into<String>) -> Self {
        Self {
            auth_token: Zeroizing::new(auth_token.into()),
            ..Self::default()
        }
    }

    /// Fill in defaults, validate the endpoint and token, and build the
    /// per-call credential.
    ///
    /// The connection layer must not connect when this returns an error.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidHostPort`] for a malformed endpoint,
    /// [`ConfigError::MissingToken`] for an empty token, and
    /// [`ConfigError::InvalidToken`] when the token fails validation.
    pub fn check_and_set_defaults(&mut self) -> Result<TokenAuth, ConfigError> {
        let logger = Arc::clone(
            self.logger
                .get_or_insert_with(|| Arc::new(NoOpLogger) as Arc<dyn Logger>),
        );

        if self.host_port.is_empty() {
            self.host_port = DEFAULT_HOST_PORT.to_string();
        }
        split_host_port(&self.host_port)?;

        let connection = &mut self.connection;
        if connection.dial_timeout.is_zero() {
            connection.dial_timeout = DEFAULT_DIAL_TIMEOUT;
        }
        if connection.keep_alive_time.is_zero() {
            connection.keep_alive_time = DEFAULT_KEEP_ALIVE_TIME;
        }
        if connection.keep_alive_timeout.is_zero() {
            connection.keep_alive_timeout = DEFAULT_KEEP_ALIVE_TIMEOUT;
        }

        if self.auth_token.is_empty() {
            return Err(ConfigError::MissingToken);
        }

        let kind = self.validate_token().map_err(|e| {
            logger.error(&format!("auth token rejected: {e}"));
            ConfigError::InvalidToken(e)
        })?;
        logger.debug(&format!(
            "auth token accepted as {} credential for {}",
            kind.as_str(),
            self.host_port
        ));

        Ok(TokenAuth {
            token: Zeroizing::new(strip_bearer(&self.auth_token).to_string()),
            require_transport_security: !self.connection.insecure,
        })
    }

    /// User-agent string for the configured version.
    pub fn user_agent(&self) -> String {
        user_agent(&self.version)
    }

    /// Re-run the validity policy on the configured token.
    ///
    /// # Errors
    ///
    /// Returns the policy's [`ValidationError`].
    pub fn validate_token(&self) -> Result<CredentialKind, ValidationError> {
        validate(&self.auth_token)
    }

    /// Decode the configured token's claims for introspection.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Undecodable`] when the token is opaque or
    /// its payload can't be decoded.
    pub fn token_info(&self) -> Result<TokenInfo, ConfigError> {
        decode(strip_bearer(&self.auth_token))
            .map(|claims| TokenInfo { claims })
            .map_err(ConfigError::Undecodable)
    }
}

/// Decoded claims of the configured token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenInfo {
    /// The decoded claims.
    pub claims: Claims,
}

impl TokenInfo {
    /// Time remaining until the token expires; see [`Claims::expires_in`].
    pub fn expires_in(&self) -> chrono::TimeDelta {
        self.claims.expires_in()
    }
}

/// Per-call bearer credential attached by the connection layer.
#[derive(Clone)]
pub struct TokenAuth {
    token: Zeroizing<String>,
    require_transport_security: bool,
}

impl TokenAuth {
    /// Metadata to attach to each outgoing call.
    pub fn request_metadata(&self) -> Vec<(&'static str, String)> {
        vec![(
            AUTHORIZATION_METADATA_KEY,
            format!("{BEARER_PREFIX}{}", self.token.as_str()),
        )]
    }

    /// Whether the credential may only travel over an encrypted transport.
    pub fn require_transport_security(&self) -> bool {
        self.require_transport_security
    }
}

impl fmt::Debug for TokenAuth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenAuth")
            .field("token", &"[REDACTED]")
            .field("require_transport_security", &self.require_transport_security)
            .finish()
    }
}

/// Split `host:port`, requiring a non-empty host and a numeric port.
fn split_host_port(host_port: &str) -> Result<(&str, u16), ConfigError> {
    let fail = |reason: &str| ConfigError::InvalidHostPort {
        host_port: host_port.to_string(),
        reason: reason.to_string(),
    };

    let (host, port) = host_port
        .rsplit_once(':')
        .ok_or_else(|| fail("missing port in address"))?;
    if host.is_empty() {
        return Err(fail("missing host in address"));
    }
    let port = port.parse().map_err(|_| fail("port is not a number in 0-65535"))?;
    Ok((host, port))
}
