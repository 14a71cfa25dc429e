//! Wire shapes for the Kiwi backend's JSON protocol.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Continuation flag for the backend's continuous-query convention.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ContYn {
    /// Fetch the next page; pass the previous response's `next_key` along.
    Y,
    /// Single-shot query. This is the default.
    #[default]
    N,
}

/// Fixed envelope POSTed to `/api/v1/kiwoom/{api_id}`.
///
/// `next_key` serializes as `null` when absent; the backend expects the
/// field to be present either way.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct KiwoomRequest {
    pub api_id: String,
    pub cont_yn: ContYn,
    pub next_key: Option<String>,
    pub payload: Value,
}

/// Error body the backend attaches to non-success JSON responses. Parsed
/// leniently: an unrecognized shape degrades to the fallback message.
#[derive(Deserialize, Default)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub error_message: Option<String>,
    #[serde(default)]
    pub detail: Option<String>,
    #[serde(default)]
    pub server_time: Option<String>,
}

impl ErrorBody {
    /// Message priority: server-reported error message, then `detail`, then
    /// a fixed fallback.
    pub fn message(&self) -> String {
        self.error_message
            .clone()
            .or_else(|| self.detail.clone())
            .unwrap_or_else(|| "Unknown error".to_string())
    }
}
