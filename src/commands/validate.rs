//! Handler for the `validate` subcommand.
//!
//! Runs the validity policy on an opaque or structured token, optionally
//! at a simulated time. Signatures are not checked.

use anyhow::Result;
use bearer_inspect::core::time_travel::parse_time_expression;
use bearer_inspect::validate_at;
use chrono::Utc;
use serde_json::json;

use crate::cli::ValidateArgs;
use crate::commands::resolve_token;
use crate::display::json_printer::print_json;

/// Execute the `validate` subcommand with the given arguments.
///
/// Returns `Ok(true)` when the token is usable and `Ok(false)` when it was
/// rejected in `--json` mode; in human mode a rejection is an error.
pub fn execute(args: &ValidateArgs) -> Result<bool> {
    let token = resolve_token(args.token.as_ref(), args.token_env.as_deref())?;
    let now = match &args.at {
        Some(expression) => {
            let target = parse_time_expression(expression)?;
            tracing::debug!(at = %target.timestamp, "evaluating at simulated time");
            target.timestamp
        }
        None => Utc::now(),
    };

    match validate_at(&token, now) {
        Ok(kind) if args.json => {
            print_json(&json!({ "valid": true, "kind": kind.as_str() }))?;
            Ok(true)
        }
        Ok(kind) => {
            println!("VALID ({} token)", kind.as_str());
            Ok(true)
        }
        Err(e) if args.json => {
            print_json(&json!({
                "valid": false,
                "error_kind": e.kind().to_string(),
                "error": e.to_string(),
            }))?;
            Ok(false)
        }
        Err(e) => Err(e.into()),
    }
}
