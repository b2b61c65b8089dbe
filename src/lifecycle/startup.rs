//! Startup orchestration.
//!
//! # Responsibilities
//! - Load configuration and initialize telemetry in dependency order (tracer,
//!   metrics recorder, log subscriber)
//! - Start the metrics listener as a detached background task
//! - Bind the application listener and serve until the process exits
//!
//! # Design Decisions
//! - Fail fast: configuration, telemetry and application bind errors are fatal
//! - Every fallible step runs before the configured subscriber is installed,
//!   under a plain stdout subscriber, so fatal causes are always logged
//! - The metrics listener is best effort; its failures are only logged
//! - No graceful drain and no span flush on exit

use std::path::Path;

use metrics_exporter_prometheus::PrometheusHandle;
use opentelemetry_sdk::trace::SdkTracerProvider;
use tracing::Dispatch;

use crate::config::{load_or_default, ConfigError, ServiceConfig};
use crate::http::AppServer;
use crate::net::{self, ListenerError};
use crate::observability::{logging, tracing as otel, MetricsRegistry, RequestCounter, TelemetryError};
use crate::scrape::MetricsListener;

/// Error type for process startup.
#[derive(Debug, thiserror::Error)]
pub enum BootstrapError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Telemetry initialization failed: {0}")]
    Telemetry(#[from] TelemetryError),

    #[error("Application listener: {0}")]
    Listener(#[from] ListenerError),

    #[error("Application server failed: {0}")]
    Serve(#[from] std::io::Error),
}

/// Globally installed telemetry, kept alive for the process lifetime.
pub struct Telemetry {
    pub tracer_provider: SdkTracerProvider,
    pub metrics: PrometheusHandle,
    pub request_counter: RequestCounter,
}

/// Build and install the tracer provider, metrics recorder and log subscriber.
///
/// The subscriber goes last: it is the only step that cannot fail on bad
/// input, and everything before it is reported by the caller's subscriber.
pub fn init_telemetry(config: &ServiceConfig) -> Result<Telemetry, TelemetryError> {
    let tracer_provider = otel::init_tracer_provider(&config.tracing)?;
    otel::install_tracer_provider(&tracer_provider);

    let registry = MetricsRegistry::new();
    let request_counter = registry.register_request_counter(&config.metrics);
    let metrics = registry.install()?;

    logging::init_logging(
        &config.observability,
        otel::service_tracer(&tracer_provider, &config.tracing),
    )?;

    Ok(Telemetry {
        tracer_provider,
        metrics,
        request_counter,
    })
}

/// Load configuration and bring up telemetry.
///
/// A failure is logged through [`logging::early_subscriber`] before it is
/// returned.
pub fn bootstrap(config_path: Option<&Path>) -> Result<(ServiceConfig, Telemetry), BootstrapError> {
    bootstrap_with(&Dispatch::new(logging::early_subscriber()), config_path)
}

fn bootstrap_with(
    early: &Dispatch,
    config_path: Option<&Path>,
) -> Result<(ServiceConfig, Telemetry), BootstrapError> {
    tracing::dispatcher::with_default(early, || {
        let started = load_or_default(config_path)
            .map_err(BootstrapError::from)
            .and_then(|config| {
                let telemetry = init_telemetry(&config)?;
                Ok((config, telemetry))
            });

        if let Err(e) = &started {
            tracing::error!(error = %e, "Fatal error, exiting");
        }
        started
    })
}

/// Serve with already initialized telemetry. Only returns on a fatal error.
pub async fn run(config: ServiceConfig, telemetry: Telemetry) -> Result<(), BootstrapError> {
    tracing::info!(
        service_name = %config.tracing.service_name,
        collector = %config.tracing.collector_endpoint,
        "Telemetry initialized"
    );

    MetricsListener::new(&config.metrics, telemetry.metrics.clone()).spawn();

    let listener = net::bind(&config.listener.bind_address).await?;
    tracing::info!(
        address = %listener.local_addr()?,
        path = %config.routes.primary_path,
        "Listening for connections"
    );

    let server = AppServer::new(&config, telemetry.request_counter.clone());
    server.run(listener).await?;

    Ok(())
}
