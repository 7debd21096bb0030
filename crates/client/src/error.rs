//! Typed error type for the client crate.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    /// No credentials are held; the caller should send the user to login.
    #[error("not signed in")]
    NotAuthenticated,

    /// The backend rejected the credentials (HTTP 401). The session has
    /// already been torn down.
    #[error("session rejected by server; sign in again")]
    Unauthorized,

    #[error("request failed with status {status}")]
    Status { status: u16, body: serde_json::Value },

    #[error("transport error: {0}")]
    Transport(String),

    #[error("invalid response: {0}")]
    Decode(#[from] editor::DecodeError),
}

impl From<serde_json::Error> for ClientError {
    fn from(e: serde_json::Error) -> Self {
        Self::Decode(editor::DecodeError::Malformed(e))
    }
}
