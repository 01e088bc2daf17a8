use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApplicationError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Captions not found for video {video_id}: {detail}")]
    CaptionsNotFound { video_id: String, detail: String },

    #[error("Caption retrieval failed for video {video_id}: {detail}")]
    Retrieval { video_id: String, detail: String },
}

impl ApplicationError {
    pub fn video_id(&self) -> Option<&str> {
        match self {
            ApplicationError::CaptionsNotFound { video_id, .. }
            | ApplicationError::Retrieval { video_id, .. } => Some(video_id),
            ApplicationError::Validation(_) => None,
        }
    }
}
