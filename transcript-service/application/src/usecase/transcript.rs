use std::sync::Arc;

use async_trait::async_trait;
use chrono::{SecondsFormat, Utc};
use uuid::Uuid;
use validator::Validate;

use transcript_domain::{
    format_timestamp, CaptionError, CaptionLine, CaptionPort, CaptionRequest, DomainError,
    LanguageTag,
};

use crate::{ApplicationError, TranscriptEntry, TranscriptRequest, TranscriptResponse};

#[async_trait]
pub trait TranscriptUseCase: Send + Sync {
    async fn fetch_transcript(
        &self,
        request: TranscriptRequest,
    ) -> Result<TranscriptResponse, ApplicationError>;
}

pub struct TranscriptUseCaseImpl {
    captions: Arc<dyn CaptionPort>,
    language: LanguageTag,
}

impl TranscriptUseCaseImpl {
    /// English is the only track this service serves.
    pub fn new(captions: Arc<dyn CaptionPort>) -> Self {
        Self {
            captions,
            language: LanguageTag::En,
        }
    }
}

#[async_trait]
impl TranscriptUseCase for TranscriptUseCaseImpl {
    async fn fetch_transcript(
        &self,
        request: TranscriptRequest,
    ) -> Result<TranscriptResponse, ApplicationError> {
        request.validate().map_err(|errors| {
            let message = errors
                .field_errors()
                .values()
                .flat_map(|errors| errors.iter())
                .filter_map(|error| error.message.as_ref().map(|message| message.to_string()))
                .next()
                .unwrap_or_else(|| errors.to_string());
            ApplicationError::Validation(message)
        })?;

        let TranscriptRequest { video_id } = request;
        let request_id = Uuid::new_v4();
        tracing::debug!(
            %request_id,
            video_id = %video_id,
            language = self.language.code(),
            "fetching captions"
        );

        // Detached so a dropped client connection cannot cancel the lookup.
        let retrieval = tokio::spawn(retrieve(
            Arc::clone(&self.captions),
            CaptionRequest {
                video_id: video_id.clone(),
                language: self.language.clone(),
            },
            request_id,
        ));
        let transcript = match retrieval.await {
            Ok(outcome) => outcome?,
            Err(error) if error.is_panic() => std::panic::resume_unwind(error.into_panic()),
            Err(error) => {
                return Err(ApplicationError::Retrieval {
                    video_id,
                    detail: error.to_string(),
                })
            }
        };

        Ok(TranscriptResponse {
            video_id,
            transcript,
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        })
    }
}

async fn retrieve(
    captions: Arc<dyn CaptionPort>,
    request: CaptionRequest,
    request_id: Uuid,
) -> Result<Vec<TranscriptEntry>, ApplicationError> {
    let video_id = request.video_id.clone();
    let lines = captions.fetch_captions(request).await.map_err(|error| {
        tracing::error!(
            %request_id,
            video_id = %video_id,
            error = %error,
            "failed to fetch transcript"
        );
        classify(&video_id, error)
    })?;

    let transcript = lines
        .into_iter()
        .map(to_entry)
        .collect::<Result<Vec<_>, _>>()
        .map_err(|error| {
            tracing::error!(
                %request_id,
                video_id = %video_id,
                error = %error,
                "caption line carried an unusable start offset"
            );
            ApplicationError::Retrieval {
                video_id: video_id.clone(),
                detail: error.to_string(),
            }
        })?;

    tracing::debug!(
        %request_id,
        video_id = %video_id,
        line_count = transcript.len(),
        "transcript assembled"
    );
    Ok(transcript)
}

fn classify(video_id: &str, error: CaptionError) -> ApplicationError {
    match error {
        CaptionError::NotFound(detail) => ApplicationError::CaptionsNotFound {
            video_id: video_id.to_string(),
            detail,
        },
        other => ApplicationError::Retrieval {
            video_id: video_id.to_string(),
            detail: other.to_string(),
        },
    }
}

fn to_entry(line: CaptionLine) -> Result<TranscriptEntry, DomainError> {
    let timestamp = format_timestamp(line.start)?;
    Ok(TranscriptEntry {
        text: line.text,
        start: line.start,
        duration: line.dur,
        timestamp,
    })
}
