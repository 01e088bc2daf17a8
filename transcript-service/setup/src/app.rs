use std::{net::SocketAddr, sync::Arc};

use anyhow::{anyhow, Error};
use axum::Router;
use tokio::{net::TcpListener, task::JoinHandle};
use transcript_application::{TranscriptUseCase, TranscriptUseCaseImpl};
use transcript_configuration::{AppConfig, RateLimitConfig};
use transcript_domain::CaptionPort;
use transcript_http_server::{
    create_app_routes, AppState, FixedWindowRateLimiter, PanicResponder, RateLimiter,
};
use transcript_infra_captions::{YoutubeCaptionAdapter, YoutubeCaptionConfig};

pub async fn build_and_run(config: AppConfig) -> Result<(), Error> {
    let app = Application::new(config)?;
    app.run().await
}

pub struct Application {
    pub config: AppConfig,
    pub router: Router,
    limiter: Arc<FixedWindowRateLimiter>,
}

impl Application {
    pub fn new(config: AppConfig) -> Result<Self, Error> {
        let captions = &config.service.captions;
        tracing::info!(
            base_url = %captions.base_url,
            request_timeout_secs = captions.request_timeout_secs,
            "initializing transcript application"
        );

        let adapter = YoutubeCaptionAdapter::new(YoutubeCaptionConfig {
            base_url: captions.base_url.clone(),
            user_agent: captions.user_agent.clone(),
            request_timeout: captions.request_timeout(),
        })
        .map_err(|err| anyhow!("caption adapter setup failed: {err}"))?;

        Ok(Self::with_caption_port(config, Arc::new(adapter)))
    }

    /// Wires the service around any caption source.
    pub fn with_caption_port(config: AppConfig, captions: Arc<dyn CaptionPort>) -> Self {
        let usecase: Arc<dyn TranscriptUseCase> = Arc::new(TranscriptUseCaseImpl::new(captions));
        let limiter = Arc::new(build_limiter(&config.service.rate_limit));
        let expose_details = config.is_development();
        if expose_details {
            tracing::info!(
                run_env = %config.run_env,
                "error details will be included in fallback responses"
            );
        }

        let router = create_app_routes(
            AppState::new(usecase),
            limiter.clone() as Arc<dyn RateLimiter>,
            PanicResponder::new(expose_details),
        );

        Self {
            config,
            router,
            limiter,
        }
    }

    pub async fn run(self) -> Result<(), Error> {
        let addr = self
            .config
            .server
            .socket_addr()
            .map_err(|err| anyhow!("invalid server address: {err}"))?;
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|err| anyhow!("failed to bind {addr}: {err}"))?;
        self.serve(listener).await
    }

    pub async fn serve(self, listener: TcpListener) -> Result<(), Error> {
        let local_addr = listener.local_addr()?;
        tracing::info!(
            address = %local_addr,
            run_env = %self.config.run_env,
            "transcript server listening"
        );

        let sweeper = spawn_sweeper(
            self.limiter.clone(),
            self.config.service.rate_limit.sweep_interval(),
        );
        let served = axum::serve(
            listener,
            self.router.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .with_graceful_shutdown(shutdown_signal())
        .await;
        sweeper.abort();

        served.map_err(|err| anyhow!("server stopped unexpectedly: {err}"))?;
        tracing::info!("transcript server stopped");
        Ok(())
    }
}

fn build_limiter(config: &RateLimitConfig) -> FixedWindowRateLimiter {
    tracing::info!(
        window_secs = config.window_secs,
        max_requests = config.max_requests,
        "configuring client rate limiter"
    );
    FixedWindowRateLimiter::new(config.window(), config.max_requests)
}

fn spawn_sweeper(
    limiter: Arc<FixedWindowRateLimiter>,
    every: std::time::Duration,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(every);
        ticker.tick().await;
        loop {
            ticker.tick().await;
            let purged = limiter.purge_expired();
            if purged > 0 {
                tracing::debug!(
                    purged,
                    remaining = limiter.tracked_keys(),
                    "expired rate limit windows dropped"
                );
            }
        }
    })
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("shutdown signal received");
}
