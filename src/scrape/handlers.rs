//! Scrape handlers.
//!
//! The registry renders on every request; nothing is cached between scrapes.

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
};
use metrics_exporter_prometheus::PrometheusHandle;

use crate::http::handlers::NOT_FOUND_BODY;
use crate::observability::metrics::PROMETHEUS_CONTENT_TYPE;

/// State shared by the scrape handlers.
#[derive(Clone)]
pub struct ScrapeState {
    pub handle: PrometheusHandle,
}

/// Render every registered metric in the Prometheus text format.
pub async fn render_metrics(State(state): State<ScrapeState>) -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, PROMETHEUS_CONTENT_TYPE)],
        state.handle.render(),
    )
}

pub async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, NOT_FOUND_BODY)
}
