//! Tracing instrumentation for application requests.
//!
//! # Responsibilities
//! - Open one span per request, tagged with route, method, service name and
//!   request ID
//! - Continue a remote trace when the client sent W3C `traceparent` headers
//! - Record the response status on the span before it closes
//!
//! The span is owned by `tower_http::trace::TraceLayer`, which keeps it alive
//! until the response body is finished and drops it on every outcome.

use std::sync::Arc;
use std::time::Duration;

use axum::extract::MatchedPath;
use axum::http::{Request, Response};
use opentelemetry::global;
use opentelemetry::trace::TraceContextExt;
use opentelemetry_http::HeaderExtractor;
use tower_http::trace::{MakeSpan, OnResponse};
use tracing::Span;
use tracing_opentelemetry::OpenTelemetrySpanExt;

use crate::http::request::RequestIdExt;

/// Builds the request span.
#[derive(Debug, Clone)]
pub struct RequestSpan {
    service_name: Arc<str>,
}

impl RequestSpan {
    pub fn new(service_name: &str) -> Self {
        Self {
            service_name: service_name.into(),
        }
    }
}

impl<B> MakeSpan<B> for RequestSpan {
    fn make_span(&mut self, request: &Request<B>) -> Span {
        let method = request.method();
        let route = request
            .extensions()
            .get::<MatchedPath>()
            .map(MatchedPath::as_str);
        let name = match route {
            Some(route) => format!("{method} {route}"),
            None => method.to_string(),
        };

        let span = tracing::info_span!(
            "request",
            otel.name = %name,
            otel.kind = "server",
            http.request.method = %method,
            http.route = route.unwrap_or_default(),
            url.path = %request.uri().path(),
            service.name = %self.service_name,
            request_id = %request.request_id().unwrap_or("unknown"),
            http.response.status_code = tracing::field::Empty,
        );

        let parent = global::get_text_map_propagator(|propagator| {
            propagator.extract(&HeaderExtractor(request.headers()))
        });
        if parent.span().span_context().is_valid() {
            if let Err(e) = span.set_parent(parent) {
                tracing::debug!(error = ?e, "Dropped remote trace context");
            }
        }

        span
    }
}

/// Records the status code on the request span and logs completion.
#[derive(Debug, Clone, Copy, Default)]
pub struct RecordStatus;

impl<B> OnResponse<B> for RecordStatus {
    fn on_response(self, response: &Response<B>, latency: Duration, span: &Span) {
        let status = response.status().as_u16();
        span.record("http.response.status_code", status);
        tracing::debug!(
            status,
            latency_ms = u64::try_from(latency.as_millis()).unwrap_or(u64::MAX),
            "Finished processing request"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use tracing_subscriber::layer::SubscriberExt;

    use crate::observability::capture::CaptureLayer;

    #[test]
    fn request_without_trace_context_logs_nothing_extra() {
        let capture = CaptureLayer::new();
        let _guard =
            tracing::subscriber::set_default(tracing_subscriber::registry().with(capture.clone()));

        let request = Request::builder().uri("/foo").body(Body::empty()).unwrap();
        let _span = RequestSpan::new("svc").make_span(&request);

        let records = capture.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].field("service.name"), Some("svc"));
        assert_eq!(records[0].field("http.route"), Some(""));
        assert_eq!(records[0].field("request_id"), Some("unknown"));
    }

    #[test]
    fn oversized_latency_saturates() {
        let capture = CaptureLayer::new();
        let _guard =
            tracing::subscriber::set_default(tracing_subscriber::registry().with(capture.clone()));

        let response = Response::builder().status(204).body(()).unwrap();
        RecordStatus.on_response(&response, Duration::MAX, &Span::none());

        let logs = capture.events_at(tracing::Level::DEBUG);
        assert_eq!(logs.len(), 1);
        assert_eq!(logs[0].field("status"), Some("204"));
        assert_eq!(logs[0].field("latency_ms"), Some(u64::MAX.to_string().as_str()));
    }
}
