//! Error types for Chronik operations.

/// Errors that can occur when talking to a Chronik indexer.
#[derive(Debug, thiserror::Error)]
pub enum ChronikError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Response body is not the expected protobuf message.
    #[error("decode error: {0}")]
    Decode(#[from] prost::DecodeError),

    /// Server returned a non-2xx response.
    #[error("server error ({status_code}): {message}")]
    Server {
        /// HTTP status code.
        status_code: u16,
        /// Error message from server.
        message: String,
    },

    /// Resource not found (404).
    #[error("not found")]
    NotFound,

    /// The response parsed but carried values outside their domain.
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}
