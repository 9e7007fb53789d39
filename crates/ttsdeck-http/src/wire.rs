//! Wire formats of the speech backend.

use reqwest::StatusCode;
use serde::Deserialize;

/// Error body returned with non-success statuses.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

/// Message for a non-success response.
///
/// Uses the body's `error` field when present, otherwise the status reason
/// phrase, otherwise `HTTP <code>`.
pub(crate) fn error_message(status: StatusCode, body: &[u8]) -> String {
    serde_json::from_slice::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.error)
        .filter(|e| !e.trim().is_empty())
        .or_else(|| status.canonical_reason().map(str::to_string))
        .unwrap_or_else(|| format!("HTTP {}", status.as_u16()))
}
