use std::any::Any;

use axum::{
    body::Body,
    http::{Response, StatusCode},
    response::IntoResponse,
    Json,
};
use tower_http::catch_panic::ResponseForPanic;

use crate::error::ErrorBody;

pub const FALLBACK_MESSAGE: &str = "Something went wrong!";

/// Last-resort handler for failures that escaped the route handlers.
#[derive(Debug, Clone, Copy)]
pub struct PanicResponder {
    expose_details: bool,
}

impl PanicResponder {
    pub fn new(expose_details: bool) -> Self {
        Self { expose_details }
    }
}

impl ResponseForPanic for PanicResponder {
    type ResponseBody = Body;

    fn response_for_panic(&mut self, err: Box<dyn Any + Send + 'static>) -> Response<Body> {
        let detail = panic_message(err.as_ref());
        tracing::error!(error = %detail, "unhandled failure while serving request");

        let body = ErrorBody {
            details: self.expose_details.then_some(detail),
            ..ErrorBody::new(FALLBACK_MESSAGE)
        };
        (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
    }
}

fn panic_message(err: &(dyn Any + Send)) -> String {
    if let Some(message) = err.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = err.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}
