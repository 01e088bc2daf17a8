use std::{
    sync::{
        atomic::{AtomicBool, AtomicUsize, Ordering},
        Arc,
    },
    time::Duration,
};

use async_trait::async_trait;
use transcript_application::{
    ApplicationError, TranscriptRequest, TranscriptUseCase, TranscriptUseCaseImpl,
};
use transcript_domain::{CaptionError, CaptionLine, CaptionPort, CaptionRequest, LanguageTag};

struct StubCaptionPort {
    result: Result<Vec<CaptionLine>, CaptionError>,
    calls: AtomicUsize,
}

impl StubCaptionPort {
    fn new(result: Result<Vec<CaptionLine>, CaptionError>) -> Arc<Self> {
        Arc::new(Self {
            result,
            calls: AtomicUsize::new(0),
        })
    }
}

#[async_trait]
impl CaptionPort for StubCaptionPort {
    async fn fetch_captions(
        &self,
        request: CaptionRequest,
    ) -> Result<Vec<CaptionLine>, CaptionError> {
        assert_eq!(request.language, LanguageTag::En);
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.result.clone()
    }
}

fn line(text: &str, start: f64, dur: f64) -> CaptionLine {
    CaptionLine {
        text: text.to_string(),
        start,
        dur,
    }
}

#[tokio::test]
async fn maps_caption_lines_in_source_order() {
    let port = StubCaptionPort::new(Ok(vec![
        line("Hello", 0.0, 2.0),
        line("later", 3_661.5, 1.25),
        line("earlier", 12.0, 0.5),
    ]));
    let usecase = TranscriptUseCaseImpl::new(port.clone());

    let response = usecase
        .fetch_transcript(TranscriptRequest::new("dQw4w9WgXcQ"))
        .await
        .expect("transcript succeeds");

    assert_eq!(response.video_id, "dQw4w9WgXcQ");
    assert_eq!(response.transcript.len(), 3);
    assert_eq!(response.transcript[0].text, "Hello");
    assert_eq!(response.transcript[0].duration, 2.0);
    assert_eq!(response.transcript[0].timestamp, "00:00:00");
    assert_eq!(response.transcript[1].text, "later");
    assert_eq!(response.transcript[1].start, 3_661.5);
    assert_eq!(response.transcript[1].timestamp, "01:01:01");
    assert_eq!(response.transcript[2].text, "earlier");
    assert!(chrono::DateTime::parse_from_rfc3339(&response.timestamp).is_ok());
    assert_eq!(port.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn empty_video_id_is_rejected_without_calling_the_source() {
    let port = StubCaptionPort::new(Ok(Vec::new()));
    let usecase = TranscriptUseCaseImpl::new(port.clone());

    let error = usecase
        .fetch_transcript(TranscriptRequest::new(""))
        .await
        .expect_err("validation fails");

    assert!(matches!(error, ApplicationError::Validation(ref message) if message == "Video ID is required"));
    assert_eq!(port.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn not_found_captions_are_classified() {
    let port = StubCaptionPort::new(Err(CaptionError::NotFound(
        "Could not find captions for video X".to_string(),
    )));
    let usecase = TranscriptUseCaseImpl::new(port);

    let error = usecase
        .fetch_transcript(TranscriptRequest::new("X"))
        .await
        .expect_err("lookup fails");

    assert!(matches!(error, ApplicationError::CaptionsNotFound { .. }));
    assert_eq!(error.video_id(), Some("X"));
}

#[tokio::test]
async fn other_failures_become_retrieval_errors_and_keep_detail() {
    let port = StubCaptionPort::new(Err(CaptionError::Unavailable(
        "network timeout".to_string(),
    )));
    let usecase = TranscriptUseCaseImpl::new(port.clone());

    let error = usecase
        .fetch_transcript(TranscriptRequest::new("X"))
        .await
        .expect_err("lookup fails");

    match error {
        ApplicationError::Retrieval { video_id, detail } => {
            assert_eq!(video_id, "X");
            assert!(detail.contains("network timeout"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(port.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn negative_start_offset_is_a_retrieval_error() {
    let port = StubCaptionPort::new(Ok(vec![line("broken", -1.0, 1.0)]));
    let usecase = TranscriptUseCaseImpl::new(port);

    let error = usecase
        .fetch_transcript(TranscriptRequest::new("X"))
        .await
        .expect_err("invalid offset");

    assert!(matches!(error, ApplicationError::Retrieval { .. }));
}

struct SlowCaptionPort {
    delay: Duration,
    finished: AtomicBool,
}

#[async_trait]
impl CaptionPort for SlowCaptionPort {
    async fn fetch_captions(
        &self,
        _request: CaptionRequest,
    ) -> Result<Vec<CaptionLine>, CaptionError> {
        tokio::time::sleep(self.delay).await;
        self.finished.store(true, Ordering::SeqCst);
        Ok(vec![line("late", 1.0, 1.0)])
    }
}

#[tokio::test]
async fn retrieval_outlives_an_abandoned_caller() {
    let port = Arc::new(SlowCaptionPort {
        delay: Duration::from_millis(200),
        finished: AtomicBool::new(false),
    });
    let usecase = TranscriptUseCaseImpl::new(port.clone());

    let abandoned = tokio::time::timeout(
        Duration::from_millis(50),
        usecase.fetch_transcript(TranscriptRequest::new("X")),
    )
    .await;
    assert!(abandoned.is_err());

    tokio::time::sleep(Duration::from_millis(400)).await;
    assert!(port.finished.load(Ordering::SeqCst));
}

struct PanickingCaptionPort;

#[async_trait]
impl CaptionPort for PanickingCaptionPort {
    async fn fetch_captions(
        &self,
        _request: CaptionRequest,
    ) -> Result<Vec<CaptionLine>, CaptionError> {
        panic!("caption source blew up")
    }
}

#[tokio::test]
#[should_panic(expected = "caption source blew up")]
async fn panics_in_the_caption_source_reach_the_caller() {
    let usecase = TranscriptUseCaseImpl::new(Arc::new(PanickingCaptionPort));
    let _ = usecase
        .fetch_transcript(TranscriptRequest::new("X"))
        .await;
}
