//! Application-level status check for response envelopes.

use serde_json::Value;

use crate::types::Envelope;

/// The `status` value the server reports on success.
pub const STATUS_OK: &str = "OK";

/// Returns true if `response["status"]` is the string `"OK"`.
///
/// A missing or different status is logged and reported as `false`; deciding
/// whether that is fatal is up to the caller.
pub fn is_status_ok(response: &Envelope) -> bool {
    match response.get("status") {
        Some(Value::String(status)) if status == STATUS_OK => true,
        Some(status) => {
            tracing::warn!(%status, "request failed with status");
            false
        }
        None => {
            tracing::warn!("response has no status field");
            false
        }
    }
}
