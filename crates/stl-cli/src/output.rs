//! JSON output helper shared by the subcommands.

use serde::Serialize;

use crate::OutputFormat;

/// Print a serializable value as pretty JSON to stdout.
///
/// Text rendering is handled per-command; this path exists for scripting.
pub fn print<T: Serialize>(value: &T, format: OutputFormat, quiet: bool) {
    if quiet {
        return;
    }
    if let OutputFormat::Json = format {
        match serde_json::to_string_pretty(value) {
            Ok(json) => println!("{}", json),
            Err(e) => eprintln!("failed to serialize output: {}", e),
        }
    }
}
