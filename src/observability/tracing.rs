//! Distributed tracing support.
//!
//! # Responsibilities
//! - Build the OTLP/gRPC span exporter and the batching tracer provider
//! - Attach the service resource (`service.name`) shared by every span
//! - Register the provider and the W3C Trace Context propagator globally
//!
//! # Design Decisions
//! - Batching, retry and drop policy belong to the SDK batch processor; spans
//!   buffered at process exit are lost
//! - A plain `http://` collector endpoint means an insecure channel

use std::time::Duration;

use opentelemetry::global;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry_otlp::{SpanExporter, WithExportConfig};
use opentelemetry_sdk::propagation::TraceContextPropagator;
use opentelemetry_sdk::trace::{SdkTracer, SdkTracerProvider};
use opentelemetry_sdk::Resource;

use crate::config::TracingConfig;
use crate::observability::TelemetryError;

/// Immutable resource attached once at startup.
pub fn service_resource(service_name: &str) -> Resource {
    Resource::builder()
        .with_service_name(service_name.to_string())
        .build()
}

/// Build a tracer provider that batch-exports spans to the collector.
///
/// Must run inside a Tokio runtime: the gRPC channel is created lazily on it.
pub fn init_tracer_provider(config: &TracingConfig) -> Result<SdkTracerProvider, TelemetryError> {
    let exporter = SpanExporter::builder()
        .with_tonic()
        .with_endpoint(config.collector_endpoint.clone())
        .with_timeout(Duration::from_secs(config.export_timeout_secs))
        .build()?;

    let provider = SdkTracerProvider::builder()
        .with_resource(service_resource(&config.service_name))
        .with_batch_exporter(exporter)
        .build();

    tracing::debug!(
        endpoint = %config.collector_endpoint,
        service_name = %config.service_name,
        "Span exporter configured"
    );

    Ok(provider)
}

/// Register `provider` as the process-wide tracer source.
pub fn install_tracer_provider(provider: &SdkTracerProvider) {
    global::set_text_map_propagator(TraceContextPropagator::new());
    global::set_tracer_provider(provider.clone());
}

/// Tracer handed to the `tracing` bridge layer.
pub fn service_tracer(provider: &SdkTracerProvider, config: &TracingConfig) -> SdkTracer {
    provider.tracer(config.service_name.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resource_carries_service_name() {
        let resource = service_resource("checkout");
        let service_name = resource
            .iter()
            .find(|(key, _)| key.as_str() == "service.name")
            .map(|(_, value)| value.to_string());
        assert_eq!(service_name.as_deref(), Some("checkout"));
    }

    #[tokio::test]
    async fn invalid_collector_endpoint_is_fatal() {
        let config = TracingConfig {
            collector_endpoint: "not a uri".to_string(),
            ..TracingConfig::default()
        };
        assert!(matches!(
            init_tracer_provider(&config),
            Err(TelemetryError::SpanExporter(_))
        ));
    }
}
