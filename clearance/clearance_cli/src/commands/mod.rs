//! Command implementations
//!
//! Each command prints plain text by default, or pretty JSON with `--json`.

pub mod catalog;
pub mod documents;

use anyhow::Result;
use clap::Args;
use serde::Serialize;

/// Output options shared by every command
#[derive(Args, Debug, Clone, Default)]
pub struct OutputArgs {
    /// Print JSON instead of text
    #[clap(long)]
    pub json: bool,
}

/// Print `value` as pretty JSON.
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
