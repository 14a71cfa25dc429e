//! Error types for the API client.

/// Structured failure value produced for every caller-visible error.
///
/// `status` mirrors the HTTP status when the server answered; transport,
/// decode, and otherwise unclassified failures use the sentinel `500`.
/// `server_time` is echoed from the error body when the server included one.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("Error {status}: {message}")]
pub struct ApiError {
    pub status: u16,
    pub message: String,
    pub server_time: Option<String>,
}

impl ApiError {
    /// Wraps a failure that has no server-assigned status.
    pub(crate) fn internal(err: impl ToString) -> Self {
        Self {
            status: 500,
            message: err.to_string(),
            server_time: None,
        }
    }
}
