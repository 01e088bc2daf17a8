use std::sync::Arc;

use axum::{http::HeaderValue, middleware, routing::get, Router};
use tower_http::{
    catch_panic::CatchPanicLayer, set_header::SetResponseHeaderLayer, trace::TraceLayer,
};

pub mod error;
pub mod fallback;
pub mod handlers;
pub mod rate_limit;
pub mod state;

pub use error::{error_mapper, HttpError};
pub use fallback::PanicResponder;
pub use handlers::*;
pub use rate_limit::{enforce_rate_limit, FixedWindowRateLimiter, RateDecision, RateLimiter};
pub use state::AppState;

pub const ALLOWED_HEADERS: &str = "Origin, X-Requested-With, Content-Type, Accept";

/// Builds the public router.
///
/// Layers from the outside in: CORS headers, request tracing, panic
/// fallback, rate limiting, then routing.
pub fn create_app_routes(
    state: AppState,
    limiter: Arc<dyn RateLimiter>,
    panic_responder: PanicResponder,
) -> Router {
    Router::new()
        .route("/transcript", get(get_transcript))
        .route("/health", get(health_check))
        .fallback(route_not_found)
        .with_state(state)
        .layer(middleware::from_fn_with_state(limiter, enforce_rate_limit))
        .layer(CatchPanicLayer::custom(panic_responder))
        .layer(TraceLayer::new_for_http())
        .layer(SetResponseHeaderLayer::overriding(
            axum::http::header::ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static(ALLOWED_HEADERS),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            axum::http::header::ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static("*"),
        ))
}
