use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LanguageTag {
    En,
}

impl LanguageTag {
    pub fn code(&self) -> &str {
        match self {
            LanguageTag::En => "en",
        }
    }
}

/// One timed subtitle line as returned by the caption source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaptionLine {
    pub text: String,
    /// Offset from the start of the video, in seconds.
    pub start: f64,
    /// Display duration, in seconds.
    pub dur: f64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptionRequest {
    pub video_id: String,
    pub language: LanguageTag,
}
