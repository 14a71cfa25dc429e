//! Session-expiry notification hooks.

/// Why a call concluded the session is no longer valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpiryReason {
    /// The server answered 401 Unauthorized.
    Unauthorized,
    /// A success response arrived with an empty or cut-off body, the
    /// symptom of a session dropped server-side mid-response.
    TruncatedBody,
}

/// Capability invoked when the dispatcher detects an expired session.
///
/// Injected into the client so the navigate-to-login side effect lives with
/// the caller rather than inside the dispatch logic. Fired exactly once per
/// expired call.
pub trait SessionHooks: Send + Sync {
    fn on_session_expired(&self, reason: ExpiryReason);
}

/// Default hooks that only log. Frontends replace this with a redirect to
/// their login entry point.
pub struct LogSessionHooks;

impl SessionHooks for LogSessionHooks {
    fn on_session_expired(&self, reason: ExpiryReason) {
        match reason {
            ExpiryReason::Unauthorized => {
                tracing::warn!("Session expired, log in again");
            }
            ExpiryReason::TruncatedBody => {
                tracing::warn!(
                    "Session ended: communication with the server was interrupted, log in again"
                );
            }
        }
    }
}
