//! JSON output for terminal and machine consumption.

use anyhow::Result;
use serde::Serialize;

/// Print a value as pretty-printed JSON with 2-space indentation.
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
