//! Tagged result of a dispatched call.

/// What a call produced when no error was raised.
///
/// Session expiry is a normal outcome, not an error: callers match on it
/// instead of catching anything, so an expired session can never be
/// mistaken for a failure that needs handling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<T> {
    /// The server answered with a success status and a decodable body.
    Success(T),
    /// The session is no longer valid. The configured session hooks have
    /// already been notified; no payload is available.
    SessionExpired,
}

impl<T> Outcome<T> {
    /// Returns the payload, or `None` on session expiry.
    pub fn success(self) -> Option<T> {
        match self {
            Outcome::Success(value) => Some(value),
            Outcome::SessionExpired => None,
        }
    }

    pub fn is_session_expired(&self) -> bool {
        matches!(self, Outcome::SessionExpired)
    }
}
