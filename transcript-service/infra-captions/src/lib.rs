mod page;
mod timedtext;

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};
use transcript_domain::{
    CaptionError, CaptionLine, CaptionPort, CaptionRequest, DomainError, LanguageTag,
};

pub use page::{extract_caption_tracks, select_track, CaptionTrack};
pub use timedtext::parse_timed_text;

#[derive(Debug, Clone)]
pub struct YoutubeCaptionConfig {
    pub base_url: String,
    pub user_agent: String,
    pub request_timeout: Option<Duration>,
}

/// Reads caption tracks from the public watch page and its timed-text feed.
pub struct YoutubeCaptionAdapter {
    client: Client,
    base_url: String,
}

impl YoutubeCaptionAdapter {
    pub fn new(config: YoutubeCaptionConfig) -> Result<Self, DomainError> {
        let mut builder = Client::builder().user_agent(config.user_agent);
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(|err| {
            DomainError::internal_error(&format!("failed to build caption http client: {err}"))
        })?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn watch_url(&self, video_id: &str) -> Result<Url, CaptionError> {
        Url::parse_with_params(&format!("{}/watch", self.base_url), &[("v", video_id)])
            .map_err(|err| CaptionError::Unavailable(format!("invalid caption source url: {err}")))
    }

    async fn get_text(&self, url: Url) -> Result<String, CaptionError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|err| CaptionError::Unavailable(err.to_string()))?
            .error_for_status()
            .map_err(|err| CaptionError::Unavailable(err.to_string()))?;
        response
            .text()
            .await
            .map_err(|err| CaptionError::Unavailable(err.to_string()))
    }
}

#[async_trait]
impl CaptionPort for YoutubeCaptionAdapter {
    async fn fetch_captions(
        &self,
        request: CaptionRequest,
    ) -> Result<Vec<CaptionLine>, CaptionError> {
        let CaptionRequest { video_id, language } = request;
        tracing::debug!(video_id = %video_id, language = language.code(), "loading watch page");

        let page = self.get_text(self.watch_url(&video_id)?).await?;
        let tracks = extract_caption_tracks(&page, &video_id)?;
        let track = select_track(&tracks, &language)
            .ok_or_else(|| missing_language(&language, &video_id))?;
        let base_url = track
            .base_url
            .as_deref()
            .ok_or_else(|| missing_language(&language, &video_id))?;
        let track_url = Url::parse(base_url)
            .map_err(|err| CaptionError::InvalidResponse(format!("caption track url: {err}")))?;

        tracing::debug!(
            video_id = %video_id,
            vss_id = track.vss_id.as_deref().unwrap_or_default(),
            "loading timed text"
        );
        let body = self.get_text(track_url).await?;
        let lines = parse_timed_text(&body)?;

        tracing::debug!(video_id = %video_id, line_count = lines.len(), "captions loaded");
        Ok(lines)
    }
}

fn missing_language(language: &LanguageTag, video_id: &str) -> CaptionError {
    CaptionError::NotFound(format!(
        "Could not find {} captions for {video_id}",
        language.code()
    ))
}
