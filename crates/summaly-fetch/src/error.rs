//! Error types for summaly-fetch.

use std::fmt;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, FetchError>;

/// Which of the two retrieval deadlines fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Deadline {
    /// Waiting for response headers took too long.
    Response,
    /// The whole retrieval, body included, took too long.
    Operation,
}

impl fmt::Display for Deadline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Deadline::Response => write!(f, "response"),
            Deadline::Operation => write!(f, "operation"),
        }
    }
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    #[error("invalid request: {0}")]
    InvalidRequest(&'static str),

    #[error("HTTP status {code} {text}")]
    Status { code: u16, text: String },

    #[error("rejected content type: {}", content_type.as_deref().unwrap_or("<none>"))]
    TypeRejected { content_type: Option<String> },

    #[error("declared content length {declared} exceeds the limit of {limit} bytes")]
    DeclaredSizeExceeded { limit: u64, declared: u64 },

    #[error("transferred {transferred} bytes, exceeding the limit of {limit} bytes")]
    TransferSizeExceeded { limit: u64, transferred: u64 },

    #[error("content length is required but the server did not declare one")]
    MissingContentLength,

    #[error("{0} timeout")]
    Timeout(Deadline),

    #[error("transport error: {0}")]
    Transport(String),

    /// The rewriter worker died or the rewriter hit its memory limit.
    /// Ambiguous markup alone never produces this.
    #[error("markup rewriting failed: {0}")]
    Markup(String),
}

impl FetchError {
    /// Returns `true` if either deadline fired.
    pub fn is_timeout(&self) -> bool {
        matches!(self, FetchError::Timeout(_))
    }

    /// Returns `true` for both the declared and the observed size violation.
    pub fn is_size_exceeded(&self) -> bool {
        matches!(
            self,
            FetchError::DeclaredSizeExceeded { .. } | FetchError::TransferSizeExceeded { .. }
        )
    }

    pub(crate) fn transport(e: impl std::error::Error) -> Self {
        FetchError::Transport(e.to_string())
    }
}
