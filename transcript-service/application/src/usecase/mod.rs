mod transcript;

pub use transcript::{TranscriptUseCase, TranscriptUseCaseImpl};
