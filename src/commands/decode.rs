//! Handler for the `decode` subcommand.
//!
//! Decodes a structured token's claims without verifying its signature
//! and prints them together with their time status. Supports reading the
//! token from a CLI argument, environment variable, or stdin.

use anyhow::Result;
use bearer_inspect::{Claims, decode, strip_bearer};
use chrono::Utc;
use serde::Serialize;

use crate::cli::DecodeArgs;
use crate::commands::resolve_token;
use crate::display::json_printer::print_json;
use crate::display::token_status::{TokenStatus, render_token_status};

/// Machine-readable decode output.
#[derive(Debug, Serialize)]
struct DecodeReport<'a> {
    claims: &'a Claims,
    status: TokenStatus,
    expires_in_seconds: Option<i64>,
}

/// Execute the `decode` subcommand with the given arguments.
pub fn execute(args: &DecodeArgs) -> Result<()> {
    let token = resolve_token(args.token.as_ref(), args.token_env.as_deref())?;
    let claims = decode(strip_bearer(&token))?;
    let now = Utc::now();
    tracing::debug!(issuer = %claims.issuer, "decoded token claims");

    if args.json {
        let report = DecodeReport {
            claims: &claims,
            status: TokenStatus::of(&claims, now),
            expires_in_seconds: (claims.expiration != 0)
                .then(|| claims.expires_in_at(now).num_seconds()),
        };
        return print_json(&report);
    }

    println!("--- Claims ---");
    print_json(&claims)?;
    println!();
    println!("--- Token Status ---");
    println!("{}", render_token_status(&claims, now));
    Ok(())
}
