use std::collections::HashMap;

use axum::{
    extract::{Query, State},
    response::Json,
};
use transcript_application::{ApplicationError, TranscriptRequest, TranscriptResponse};

use crate::{
    error::{error_mapper, HttpError},
    AppState,
};

const VIDEO_ID_PARAM: &str = "videoId";

pub async fn get_transcript(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<TranscriptResponse>, HttpError> {
    let video_id = params.get(VIDEO_ID_PARAM).cloned().unwrap_or_default();
    tracing::info!(video_id = %video_id, "received transcript request");

    match state
        .transcript_usecase
        .fetch_transcript(TranscriptRequest::new(video_id))
        .await
    {
        Ok(response) => {
            tracing::info!(
                video_id = %response.video_id,
                line_count = response.transcript.len(),
                "transcript request completed"
            );
            Ok(Json(response))
        }
        Err(error) => {
            match &error {
                ApplicationError::Validation(message) => {
                    tracing::warn!(error = %message, "rejected transcript request");
                }
                ApplicationError::CaptionsNotFound { .. } => {
                    tracing::warn!(error = %error, "transcript request found no captions");
                }
                _ => tracing::error!(error = %error, "transcript request failed"),
            }
            Err(error_mapper(error))
        }
    }
}

pub async fn route_not_found() -> HttpError {
    HttpError::NotFound {
        message: "Not found".to_string(),
        video_id: None,
    }
}
