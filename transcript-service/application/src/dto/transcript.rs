use serde::{Deserialize, Serialize};
use validator::Validate;

/// Usage hint returned alongside a missing `videoId`.
pub const EXAMPLE_TRANSCRIPT_PATH: &str = "/transcript?videoId=dQw4w9WgXcQ";

#[derive(Debug, Clone, Validate)]
pub struct TranscriptRequest {
    #[validate(length(min = 1, message = "Video ID is required"))]
    pub video_id: String,
}

impl TranscriptRequest {
    pub fn new(video_id: impl Into<String>) -> Self {
        Self {
            video_id: video_id.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptEntry {
    pub text: String,
    pub start: f64,
    pub duration: f64,
    pub timestamp: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptResponse {
    #[serde(rename = "videoId")]
    pub video_id: String,
    pub transcript: Vec<TranscriptEntry>,
    /// Response generation time, ISO-8601 in UTC with millisecond precision.
    pub timestamp: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_video_id_fails_validation() {
        let errors = TranscriptRequest::new("").validate().unwrap_err();
        let field = errors.field_errors();
        let video_id = field.get("video_id").expect("video_id error");
        assert_eq!(
            video_id[0].message.as_deref(),
            Some("Video ID is required")
        );
    }

    #[test]
    fn whitespace_video_id_is_passed_through() {
        assert!(TranscriptRequest::new(" ").validate().is_ok());
    }

    #[test]
    fn response_uses_camel_case_video_id() {
        let response = TranscriptResponse {
            video_id: "abc".to_string(),
            transcript: vec![TranscriptEntry {
                text: "Hello".to_string(),
                start: 0.0,
                duration: 2.0,
                timestamp: "00:00:00".to_string(),
            }],
            timestamp: "2024-01-01T00:00:00.000Z".to_string(),
        };
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["videoId"], "abc");
        assert_eq!(value["transcript"][0]["duration"].as_f64(), Some(2.0));
        assert!(value.get("video_id").is_none());
    }
}
