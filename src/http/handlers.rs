//! Application handlers.

use axum::{
    body::Body,
    extract::State,
    http::{HeaderMap, Response as HttpResponse, StatusCode, Uri},
    response::{IntoResponse, Response},
};

use crate::http::error::AppError;
use crate::http::request::RequestIdExt;
use crate::http::server::AppState;

/// Body of the not-found response.
pub const NOT_FOUND_BODY: &str = "404 page not found";

/// Primary endpoint: count the request and answer with the fixed body.
///
/// The body is sent without a content type so the chain's default applies.
/// Only `GET` is routed here; `HEAD` is answered with 405 like any other method.
pub async fn primary(
    State(state): State<AppState>,
    headers: HeaderMap,
    uri: Uri,
) -> Result<Response, AppError> {
    state.request_counter.increment();

    tracing::info!(
        request_id = %headers.request_id().unwrap_or("unknown"),
        path = %uri.path(),
        body = %String::from_utf8_lossy(&state.primary_body),
        "get"
    );

    let response = HttpResponse::builder()
        .status(StatusCode::OK)
        .body(Body::from(state.primary_body.clone()))?;
    Ok(response)
}

pub async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, NOT_FOUND_BODY)
}
