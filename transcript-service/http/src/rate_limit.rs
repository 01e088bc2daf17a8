use std::{
    net::SocketAddr,
    sync::Arc,
    time::{Duration, Instant},
};

use axum::{
    extract::{ConnectInfo, Request, State},
    http::{HeaderMap, HeaderValue, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use dashmap::DashMap;

pub const RATE_LIMIT_MESSAGE: &str = "Too many requests, please try again later.";
const UNKNOWN_CLIENT: &str = "unknown";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateDecision {
    pub allowed: bool,
    pub limit: u32,
    pub remaining: u32,
    pub reset_after: Duration,
}

/// Per-key admission control shared by every in-flight request.
pub trait RateLimiter: Send + Sync {
    /// Counts one request against `key` and reports whether it is admitted.
    fn check(&self, key: &str) -> RateDecision;

    fn allow(&self, key: &str) -> bool {
        self.check(key).allowed
    }
}

#[derive(Debug, Clone, Copy)]
struct Window {
    started_at: Instant,
    hits: u32,
}

/// In-memory limiter whose window is anchored at each key's first hit and
/// restarts once it has fully elapsed.
#[derive(Debug)]
pub struct FixedWindowRateLimiter {
    window: Duration,
    max_requests: u32,
    windows: DashMap<String, Window>,
}

impl FixedWindowRateLimiter {
    pub fn new(window: Duration, max_requests: u32) -> Self {
        Self {
            window,
            max_requests,
            windows: DashMap::new(),
        }
    }

    pub fn check_at(&self, key: &str, now: Instant) -> RateDecision {
        // The entry guard holds the shard lock, so reset, increment and
        // compare happen as one step.
        let mut entry = self.windows.entry(key.to_string()).or_insert(Window {
            started_at: now,
            hits: 0,
        });
        if now.saturating_duration_since(entry.started_at) >= self.window {
            entry.started_at = now;
            entry.hits = 0;
        }
        entry.hits = entry.hits.saturating_add(1);

        let elapsed = now.saturating_duration_since(entry.started_at);
        RateDecision {
            allowed: entry.hits <= self.max_requests,
            limit: self.max_requests,
            remaining: self.max_requests.saturating_sub(entry.hits),
            reset_after: self.window.saturating_sub(elapsed),
        }
    }

    /// Drops keys whose window has elapsed and returns how many were removed.
    pub fn purge_expired(&self) -> usize {
        self.purge_expired_at(Instant::now())
    }

    pub fn purge_expired_at(&self, now: Instant) -> usize {
        let before = self.windows.len();
        self.windows
            .retain(|_, window| now.saturating_duration_since(window.started_at) < self.window);
        before.saturating_sub(self.windows.len())
    }

    pub fn tracked_keys(&self) -> usize {
        self.windows.len()
    }
}

impl RateLimiter for FixedWindowRateLimiter {
    fn check(&self, key: &str) -> RateDecision {
        self.check_at(key, Instant::now())
    }
}

pub async fn enforce_rate_limit(
    State(limiter): State<Arc<dyn RateLimiter>>,
    request: Request,
    next: Next,
) -> Response {
    let client = client_key(&request);
    let decision = limiter.check(&client);

    if !decision.allowed {
        tracing::warn!(
            client = %client,
            limit = decision.limit,
            retry_after_secs = decision.reset_after.as_secs(),
            "rate limit exceeded"
        );
        let mut response = (StatusCode::TOO_MANY_REQUESTS, RATE_LIMIT_MESSAGE).into_response();
        let headers = response.headers_mut();
        apply_rate_headers(headers, &decision);
        headers.insert(
            axum::http::header::RETRY_AFTER,
            HeaderValue::from(decision.reset_after.as_secs().max(1)),
        );
        return response;
    }

    let mut response = next.run(request).await;
    apply_rate_headers(response.headers_mut(), &decision);
    response
}

fn client_key(request: &Request) -> String {
    request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip().to_string())
        .unwrap_or_else(|| UNKNOWN_CLIENT.to_string())
}

fn apply_rate_headers(headers: &mut HeaderMap, decision: &RateDecision) {
    headers.insert("x-ratelimit-limit", HeaderValue::from(decision.limit));
    headers.insert("x-ratelimit-remaining", HeaderValue::from(decision.remaining));
}
