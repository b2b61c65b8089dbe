//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Application requests produce:
//!     → logging.rs (structured log events, fmt layer)
//!     → metrics.rs (request counter in the Prometheus registry)
//!     → tracing.rs (spans bridged to OpenTelemetry, batch-exported over OTLP)
//!
//! Consumers:
//!     → stdout (pretty or JSON lines)
//!     → metrics listener (Prometheus scrape)
//!     → OTLP collector (gRPC)
//! ```
//!
//! # Design Decisions
//! - Registries and providers are built by plain constructors and injected
//! - Only bootstrap installs them globally, so tests stay isolated
//! - Span export never blocks a request; the batch processor owns the network

#[cfg(test)]
pub(crate) mod capture;
pub mod logging;
pub mod metrics;
pub mod tracing;

pub use self::metrics::{MetricsRegistry, RequestCounter};

/// Error type for telemetry initialization. Every variant is fatal at startup.
#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    #[error("Failed to build span exporter: {0}")]
    SpanExporter(#[from] opentelemetry_otlp::ExporterBuildError),

    #[error("Failed to install metrics recorder: a global recorder is already set")]
    RecorderInstall,

    #[error("Failed to install log subscriber: {0}")]
    Subscriber(#[from] tracing_subscriber::util::TryInitError),
}
