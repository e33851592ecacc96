//! Command handlers for each CLI subcommand.
//!
//! Each subcommand is implemented in its own module and exposes
//! a single `execute` function that receives the parsed arguments.

pub mod decode;
pub mod validate;

use std::io::{self, IsTerminal, Read};

use bearer_inspect::error::CliError;
use zeroize::Zeroizing;

/// Resolve the token from the argument, an environment variable, or stdin.
///
/// Sources are tried in that order. Surrounding whitespace is trimmed and
/// an empty result counts as no token.
pub fn resolve_token(
    token: Option<&Zeroizing<String>>,
    token_env: Option<&str>,
) -> Result<Zeroizing<String>, CliError> {
    let raw = match (token, token_env) {
        (Some(token), _) => Zeroizing::new(token.as_str().to_string()),
        (None, Some(name)) => read_env_token(name)?,
        (None, None) => read_stdin_token()?,
    };

    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(CliError::NoTokenProvided);
    }
    Ok(Zeroizing::new(trimmed.to_string()))
}

fn read_env_token(name: &str) -> Result<Zeroizing<String>, CliError> {
    if name.is_empty() || name.contains('=') || name.contains('\0') {
        return Err(CliError::InvalidEnvVarName {
            name: name.to_string(),
        });
    }
    std::env::var(name)
        .map(Zeroizing::new)
        .map_err(|_| CliError::EnvVarNotFound {
            name: name.to_string(),
        })
}

fn read_stdin_token() -> Result<Zeroizing<String>, CliError> {
    let mut stdin = io::stdin();
    if stdin.is_terminal() {
        return Err(CliError::NoTokenProvided);
    }
    let mut buf = Zeroizing::new(String::new());
    stdin
        .read_to_string(&mut buf)
        .map_err(|e| CliError::StdinRead {
            reason: e.to_string(),
        })?;
    Ok(buf)
}
