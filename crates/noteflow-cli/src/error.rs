//! Client-side error type.

use thiserror::Error;

/// Failure talking to the NoteFlow API.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The request never produced a response, or the body could not be read.
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with an error status.
    #[error("{message} (HTTP {status})")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Message from the error body, or the status reason.
        message: String,
    },

    /// Local file access failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A background task ended abnormally.
    #[error("Polling task failed: {0}")]
    Task(String),

    /// The command was used without the state it needs.
    #[error("{0}")]
    Usage(String),
}

impl ClientError {
    /// HTTP status of an API error.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}
