use std::sync::Arc;

use transcript_application::TranscriptUseCase;

#[derive(Clone)]
pub struct AppState {
    pub transcript_usecase: Arc<dyn TranscriptUseCase>,
}

impl AppState {
    pub fn new(transcript_usecase: Arc<dyn TranscriptUseCase>) -> Self {
        Self { transcript_usecase }
    }
}
