use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use transcript_application::{ApplicationError, EXAMPLE_TRANSCRIPT_PATH};

pub const MISSING_VIDEO_ID: &str = "Video ID is required";
pub const TRANSCRIPT_NOT_FOUND: &str = "English transcript not found for this video";
pub const TRANSCRIPT_FETCH_FAILED: &str = "Failed to fetch transcript";

#[derive(Debug)]
pub enum HttpError {
    Validation {
        message: String,
        example: Option<&'static str>,
    },
    NotFound {
        message: String,
        video_id: Option<String>,
    },
    Internal {
        message: String,
        video_id: Option<String>,
    },
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(rename = "videoId", skip_serializing_if = "Option::is_none")]
    pub video_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            video_id: None,
            example: None,
            details: None,
        }
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            HttpError::Validation { message, example } => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    example,
                    ..ErrorBody::new(message)
                },
            ),
            HttpError::NotFound { message, video_id } => (
                StatusCode::NOT_FOUND,
                ErrorBody {
                    video_id,
                    ..ErrorBody::new(message)
                },
            ),
            HttpError::Internal { message, video_id } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorBody {
                    video_id,
                    ..ErrorBody::new(message)
                },
            ),
        };

        (status, Json(body)).into_response()
    }
}

/// Client-facing messages stay generic; the raw detail is only logged.
pub fn error_mapper(error: ApplicationError) -> HttpError {
    match error {
        ApplicationError::Validation(_) => HttpError::Validation {
            message: MISSING_VIDEO_ID.to_string(),
            example: Some(EXAMPLE_TRANSCRIPT_PATH),
        },
        ApplicationError::CaptionsNotFound { video_id, .. } => HttpError::NotFound {
            message: TRANSCRIPT_NOT_FOUND.to_string(),
            video_id: Some(video_id),
        },
        ApplicationError::Retrieval { video_id, .. } => HttpError::Internal {
            message: TRANSCRIPT_FETCH_FAILED.to_string(),
            video_id: Some(video_id),
        },
    }
}
