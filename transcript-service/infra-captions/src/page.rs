use serde::Deserialize;
use transcript_domain::{CaptionError, LanguageTag};

const CAPTION_TRACKS_KEY: &str = "\"captionTracks\":";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CaptionTrack {
    #[serde(rename = "baseUrl")]
    pub base_url: Option<String>,
    #[serde(rename = "vssId")]
    pub vss_id: Option<String>,
}

/// Pulls the `captionTracks` array out of a watch page.
///
/// A page without tracks is classified here: bot challenges and unplayable
/// ids are source failures, anything else means the video has no captions.
pub fn extract_caption_tracks(
    page: &str,
    video_id: &str,
) -> Result<Vec<CaptionTrack>, CaptionError> {
    let Some(offset) = page.find(CAPTION_TRACKS_KEY) else {
        if page.contains("class=\"g-recaptcha\"") {
            return Err(CaptionError::Unavailable(
                "caption source is rate limiting this host (captcha challenge)".to_string(),
            ));
        }
        if !page.contains("\"playabilityStatus\":") {
            return Err(CaptionError::Unavailable(format!(
                "video is unavailable or the id is invalid: {video_id}"
            )));
        }
        return Err(CaptionError::NotFound(format!(
            "Could not find captions for video: {video_id}"
        )));
    };

    let json = &page[offset + CAPTION_TRACKS_KEY.len()..];
    serde_json::Deserializer::from_str(json)
        .into_iter::<Vec<CaptionTrack>>()
        .next()
        .ok_or_else(|| CaptionError::InvalidResponse("empty captionTracks block".to_string()))?
        .map_err(|err| CaptionError::InvalidResponse(format!("captionTracks: {err}")))
}

/// Exact manual track first, then the auto-generated one, then any variant.
pub fn select_track<'a>(
    tracks: &'a [CaptionTrack],
    language: &LanguageTag,
) -> Option<&'a CaptionTrack> {
    let code = language.code();
    let manual = format!(".{code}");
    let generated = format!("a.{code}");

    tracks
        .iter()
        .find(|track| vss_id(track) == manual)
        .or_else(|| tracks.iter().find(|track| vss_id(track) == generated))
        .or_else(|| tracks.iter().find(|track| vss_id(track).contains(&manual)))
}

fn vss_id(track: &CaptionTrack) -> &str {
    track.vss_id.as_deref().unwrap_or_default()
}
