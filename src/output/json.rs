//! JSON serialization for test outcomes.

use crate::result::Outcome;

/// Serialize an Outcome to a compact JSON string.
///
/// # Errors
///
/// Returns an error if serialization fails (should not happen for Outcome).
pub fn to_json(outcome: &Outcome) -> Result<String, serde_json::Error> {
    serde_json::to_string(outcome)
}

/// Serialize an Outcome to a pretty-printed JSON string.
///
/// # Errors
///
/// Returns an error if serialization fails (should not happen for Outcome).
pub fn to_json_pretty(outcome: &Outcome) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(outcome)
}
