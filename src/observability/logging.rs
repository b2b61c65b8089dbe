//! Structured logging.
//!
//! One `tracing` subscriber carries both log output and span export: the fmt
//! layer writes events (pretty or JSON), the OpenTelemetry layer turns spans
//! into OTLP spans. `RUST_LOG` overrides the configured level.
//!
//! Configuration and exporters are built before that subscriber can exist, so
//! startup runs under [`early_subscriber`], a plain stdout logger with the
//! default level.

use opentelemetry_sdk::trace::SdkTracer;
use tracing::Subscriber;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{LogFormat, ObservabilityConfig};
use crate::observability::TelemetryError;

/// Filter directives used when `RUST_LOG` is unset.
pub fn default_directives(config: &ObservabilityConfig) -> String {
    format!(
        "{}={level},tower_http={level}",
        env!("CARGO_CRATE_NAME"),
        level = config.log_level
    )
}

fn env_filter(config: &ObservabilityConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directives(config)))
}

/// Stdout subscriber for the startup phase. Meant for
/// `tracing::dispatcher::with_default`, never installed globally.
pub fn early_subscriber() -> impl Subscriber + Send + Sync + 'static {
    tracing_subscriber::registry()
        .with(env_filter(&ObservabilityConfig::default()))
        .with(tracing_subscriber::fmt::layer())
}

/// Install the global subscriber. Fails if one is already installed.
pub fn init_logging(config: &ObservabilityConfig, tracer: SdkTracer) -> Result<(), TelemetryError> {
    let filter = env_filter(config);

    let (pretty, json) = match config.log_format {
        LogFormat::Pretty => (Some(tracing_subscriber::fmt::layer()), None),
        LogFormat::Json => (None, Some(tracing_subscriber::fmt::layer().json())),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(pretty)
        .with(json)
        .with(tracing_opentelemetry::layer().with_tracer(tracer))
        .try_init()?;

    Ok(())
}
