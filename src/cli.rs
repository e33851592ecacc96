//! CLI argument definitions for bearer-inspect.
//!
//! Uses `clap` derive macros to define the command-line interface.
//! Each subcommand has its own argument struct for type-safe parsing.
//!
//! # Security
//!
//! `DecodeArgs` and `ValidateArgs` implement custom `Debug` to redact the
//! token and prevent accidental leakage through debug formatting, error
//! chains, or logging.

use std::fmt;

use clap::{Parser, Subcommand};
use zeroize::Zeroizing;

/// Offline inspector for API bearer tokens: decode claims and check
/// expiry without verifying signatures.
#[derive(Debug, Parser)]
#[command(name = "bearer-inspect")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// The subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Decode a structured token and show its claims and time status.
    Decode(DecodeArgs),

    /// Check whether a token is usable right now (or at a given time).
    Validate(ValidateArgs),
}

/// Arguments for the `decode` subcommand.
#[derive(clap::Args)]
pub struct DecodeArgs {
    /// The token to decode. If omitted, reads from stdin.
    #[arg(value_parser = parse_zeroizing_string)]
    pub token: Option<Zeroizing<String>>,

    /// Read the token from the specified environment variable.
    #[arg(long, value_name = "VAR_NAME")]
    pub token_env: Option<String>,

    /// Output JSON (machine-readable).
    #[arg(long)]
    pub json: bool,
}

/// Custom `Debug` that redacts the token field to prevent accidental leakage.
impl fmt::Debug for DecodeArgs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DecodeArgs")
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .field("token_env", &self.token_env)
            .field("json", &self.json)
            .finish()
    }
}

/// Arguments for the `validate` subcommand.
#[derive(clap::Args)]
pub struct ValidateArgs {
    /// The token to validate, opaque or structured. If omitted, reads from stdin.
    #[arg(value_parser = parse_zeroizing_string)]
    pub token: Option<Zeroizing<String>>,

    /// Read the token from the specified environment variable.
    #[arg(long, value_name = "VAR_NAME")]
    pub token_env: Option<String>,

    /// Evaluate expiry and not-before against a different time.
    ///
    /// Accepts relative expressions like "+7d", "-1h", "+30m" or
    /// absolute timestamps in RFC 3339 or Unix epoch format.
    #[arg(long, value_name = "EXPR", allow_hyphen_values = true)]
    pub at: Option<String>,

    /// Output JSON (machine-readable).
    #[arg(long)]
    pub json: bool,
}

/// Custom `Debug` that redacts the token field to prevent accidental leakage.
impl fmt::Debug for ValidateArgs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidateArgs")
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .field("token_env", &self.token_env)
            .field("at", &self.at)
            .field("json", &self.json)
            .finish()
    }
}

/// Parse a string into a `Zeroizing<String>` for token arguments.
fn parse_zeroizing_string(s: &str) -> Result<Zeroizing<String>, std::convert::Infallible> {
    Ok(Zeroizing::new(s.to_string()))
}
