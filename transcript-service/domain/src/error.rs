use thiserror::Error;

/// Typed outcome of a failed caption lookup.
///
/// Adapters classify whatever the remote source reports into one of these
/// variants; nothing downstream inspects message text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CaptionError {
    #[error("captions not found: {0}")]
    NotFound(String),

    #[error("caption source unavailable: {0}")]
    Unavailable(String),

    #[error("invalid caption payload: {0}")]
    InvalidResponse(String),
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum DomainError {
    #[error(transparent)]
    Caption(#[from] CaptionError),

    #[error("invalid timestamp: {seconds} is not a non-negative finite number of seconds")]
    InvalidTimestamp { seconds: f64 },

    #[error("internal error: {0}")]
    Internal(String),
}

impl DomainError {
    pub fn internal_error(message: &str) -> Self {
        DomainError::Internal(message.to_string())
    }
}
