//! Metrics listener.
//!
//! A second listener, on its own port and task, that serves only the scrape
//! path. It shares nothing with the application router except the registry
//! handle, so a bind failure here leaves the application serving.

pub mod handlers;

use axum::{routing::get, Router};
use metrics_exporter_prometheus::PrometheusHandle;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use crate::config::MetricsConfig;
use crate::net;
use self::handlers::{not_found, render_metrics, ScrapeState};

pub fn setup_metrics_router(config: &MetricsConfig, handle: PrometheusHandle) -> Router {
    Router::new()
        .route(&config.path, get(render_metrics))
        .fallback(not_found)
        .with_state(ScrapeState { handle })
}

/// Scrape endpoint bound to its own address.
pub struct MetricsListener {
    router: Router,
    bind_address: String,
    path: String,
}

impl MetricsListener {
    pub fn new(config: &MetricsConfig, handle: PrometheusHandle) -> Self {
        Self {
            router: setup_metrics_router(config, handle),
            bind_address: config.bind_address.clone(),
            path: config.path.clone(),
        }
    }

    /// Bind and serve on a background task that is never joined.
    ///
    /// Bind and serve errors are logged and end the task; nothing restarts it.
    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(async move {
            let listener = match net::bind(&self.bind_address).await {
                Ok(listener) => listener,
                Err(e) => {
                    tracing::error!(error = %e, "Metrics listener failed to start");
                    return;
                }
            };
            if let Err(e) = self.serve(listener).await {
                tracing::error!(error = %e, "Metrics listener stopped");
            }
        })
    }

    /// Serve on an already-bound listener.
    pub async fn serve(self, listener: TcpListener) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(metrics = %format!("{}{}", addr, self.path), "Metrics listener serving");

        axum::serve(listener, self.router).await
    }
}
