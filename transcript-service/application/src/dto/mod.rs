mod transcript;

pub use transcript::{
    TranscriptEntry, TranscriptRequest, TranscriptResponse, EXAMPLE_TRANSCRIPT_PATH,
};
