//! CLI command implementations.

pub mod appointments;
pub mod auth;
pub mod shops;

use serde_json::Value;

/// Print a payload as pretty JSON.
///
/// Stdout is the payload channel; diagnostics go through `tracing`.
#[allow(clippy::print_stdout)]
pub(crate) fn emit(payload: &Value) {
    let rendered =
        serde_json::to_string_pretty(payload).unwrap_or_else(|_| payload.to_string());
    println!("{rendered}");
}

/// Parse an inline `--data` JSON payload argument.
pub(crate) fn parse_payload(data: &str) -> Result<Value, serde_json::Error> {
    serde_json::from_str(data)
}
