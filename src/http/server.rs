//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum router for the primary endpoint
//! - Wire up the middleware chain (liveness, recovery, content type,
//!   request ID, tracing) in that order, outermost first
//! - Serve the router on an already-bound listener until the process exits

use axum::{
    http::{header, HeaderValue},
    middleware,
    routing::{on, MethodFilter},
    Router,
};
use bytes::Bytes;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    catch_panic::CatchPanicLayer,
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    set_header::SetResponseHeaderLayer,
    trace::TraceLayer,
};

use crate::config::ServiceConfig;
use crate::http::handlers;
use crate::http::middleware::{liveness_probe, panic_response, LivenessProbe, RecordStatus, RequestSpan};
use crate::http::request::MakeRequestUuidV4;
use crate::observability::RequestCounter;

/// Content type applied when a handler does not set one.
pub const DEFAULT_CONTENT_TYPE: &str = "application/json";

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub request_counter: RequestCounter,
    pub primary_body: Bytes,
}

/// HTTP server for the application listener.
pub struct AppServer {
    router: Router,
}

impl AppServer {
    /// Create a new server with the primary endpoint and full middleware chain.
    pub fn new(config: &ServiceConfig, request_counter: RequestCounter) -> Self {
        let state = AppState {
            request_counter,
            primary_body: Bytes::from(config.routes.primary_body.clone()),
        };
        Self::from_router(Self::instrument(Self::routes(config, state), config))
    }

    /// Wrap an already instrumented router.
    pub fn from_router(router: Router) -> Self {
        Self { router }
    }

    /// Application routes, without middleware.
    pub fn routes(config: &ServiceConfig, state: AppState) -> Router {
        Router::new()
            .route(&config.routes.primary_path, on(MethodFilter::GET, handlers::primary))
            .with_state(state)
    }

    /// Add the not-found fallback and the middleware chain to `routes`.
    ///
    /// Layers apply to everything registered before this call, the fallback
    /// included, so the liveness probe sees unmatched paths too.
    pub fn instrument(routes: Router, config: &ServiceConfig) -> Router {
        let chain = ServiceBuilder::new()
            .layer(middleware::from_fn_with_state(
                LivenessProbe::new(&config.routes.liveness_path),
                liveness_probe,
            ))
            .layer(CatchPanicLayer::custom(panic_response))
            .layer(SetResponseHeaderLayer::if_not_present(
                header::CONTENT_TYPE,
                HeaderValue::from_static(DEFAULT_CONTENT_TYPE),
            ))
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV4))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(
                TraceLayer::new_for_http()
                    .make_span_with(RequestSpan::new(&config.tracing.service_name))
                    .on_response(RecordStatus),
            );

        routes.fallback(handlers::not_found).layer(chain)
    }

    /// Instrumented router, e.g. for driving requests in-process.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Serve until the process exits.
    pub async fn run(self, listener: TcpListener) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "Application listener serving");

        axum::serve(listener, self.router).await
    }
}
