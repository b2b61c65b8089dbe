//! Liveness probe responder.
//!
//! Outermost stage of the chain: a `GET`/`HEAD` on the probe path gets `200 .`
//! immediately, without a request ID, span, log line or counter update.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header, Method, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};

/// Probe path shared with the middleware.
#[derive(Debug, Clone)]
pub struct LivenessProbe {
    path: Arc<str>,
}

impl LivenessProbe {
    pub fn new(path: &str) -> Self {
        Self { path: path.into() }
    }

    fn matches(&self, method: &Method, path: &str) -> bool {
        (method == Method::GET || method == Method::HEAD) && path.eq_ignore_ascii_case(&self.path)
    }
}

pub async fn liveness_probe(
    State(probe): State<LivenessProbe>,
    request: Request,
    next: Next,
) -> Response {
    if probe.matches(request.method(), request.uri().path()) {
        return (StatusCode::OK, [(header::CONTENT_TYPE, "text/plain")], ".").into_response();
    }
    next.run(request).await
}
