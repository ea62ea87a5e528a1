use serde::Deserialize;
use thiserror::Error;

/// Structured error body the backend attaches to rejected requests.
#[derive(Debug, Deserialize)]
pub struct BackendErrorPayload {
    pub detail: String,
}

/// Unrecoverable route-acquisition failures. Partial-but-present
/// payloads never land here; those are repaired into a `Route`.
#[derive(Error, Debug)]
pub enum RouteError {
    /// The backend answered the request with no body at all.
    #[error("Empty response from server")]
    EmptyResponse,

    /// The backend answered with a non-success status. `detail` is the
    /// backend's own message when its error payload parses, otherwise
    /// the raw body.
    #[error("Backend error: {detail}")]
    BackendRejected { status: u16, detail: String },

    /// No response was obtained at all (connection refused, timeout).
    #[error("Cannot connect to backend server. Please make sure it is running at {endpoint}")]
    Unreachable { endpoint: String },
}
