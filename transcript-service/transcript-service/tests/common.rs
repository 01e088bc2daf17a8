use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Client;
use tokio::{net::TcpListener, task::JoinHandle};
use transcript_configuration::AppConfig;
use transcript_domain::{CaptionError, CaptionLine, CaptionPort, CaptionRequest};
use transcript_setup::Application;

pub struct StubCaptionPort {
    pub result: Result<Vec<CaptionLine>, CaptionError>,
}

#[async_trait]
impl CaptionPort for StubCaptionPort {
    async fn fetch_captions(
        &self,
        _request: CaptionRequest,
    ) -> Result<Vec<CaptionLine>, CaptionError> {
        self.result.clone()
    }
}

pub struct TestServer {
    pub base_url: String,
    pub client: Client,
    handle: JoinHandle<()>,
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

pub async fn setup_test_server(
    config: AppConfig,
    result: Result<Vec<CaptionLine>, CaptionError>,
) -> Result<TestServer, Box<dyn std::error::Error>> {
    let app = Application::with_caption_port(config, Arc::new(StubCaptionPort { result }));
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let base_url = format!("http://{}", listener.local_addr()?);
    let handle = tokio::spawn(async move {
        if let Err(err) = app.serve(listener).await {
            panic!("test server failed: {err}");
        }
    });

    Ok(TestServer {
        base_url,
        client: Client::new(),
        handle,
    })
}
