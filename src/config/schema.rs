//! Configuration schema definitions.
//!
//! Every field has a default, so an empty file (or no file at all) yields the
//! fixed deployment: application on `0.0.0.0:8080`, metrics on
//! `127.0.0.1:2222`, spans shipped to `http://localhost:4317`.

use serde::{Deserialize, Serialize};

/// Root configuration for the service.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ServiceConfig {
    /// Application listener.
    pub listener: ListenerConfig,

    /// Paths and fixed responses served by the application router.
    pub routes: RoutesConfig,

    /// Metrics listener and request counter.
    pub metrics: MetricsConfig,

    /// Trace exporter settings.
    pub tracing: TracingConfig,

    /// Logging settings.
    pub observability: ObservabilityConfig,
}

/// Application listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Route configuration for the application router.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RoutesConfig {
    /// Path of the primary endpoint.
    pub primary_path: String,

    /// Literal body returned by the primary endpoint.
    pub primary_body: String,

    /// Liveness probe path, answered before any other middleware.
    pub liveness_path: String,
}

impl Default for RoutesConfig {
    fn default() -> Self {
        Self {
            primary_path: "/foo".to_string(),
            primary_body: "bar".to_string(),
            liveness_path: "/ping".to_string(),
        }
    }
}

/// Metrics listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct MetricsConfig {
    /// Metrics listener bind address.
    pub bind_address: String,

    /// Scrape path.
    pub path: String,

    /// Name of the primary endpoint request counter.
    pub request_counter: String,

    /// Help text rendered for the request counter.
    pub request_counter_help: String,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:2222".to_string(),
            path: "/metrics".to_string(),
            request_counter: "api_foo_requests_total".to_string(),
            request_counter_help: "Total number of requests to the /foo endpoint.".to_string(),
        }
    }
}

/// Trace exporter configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TracingConfig {
    /// `service.name` attached to every span.
    pub service_name: String,

    /// OTLP/gRPC collector endpoint. A plain `http` scheme means no TLS.
    pub collector_endpoint: String,

    /// Timeout for a single batch export, in seconds.
    pub export_timeout_secs: u64,
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            service_name: "instrumented-service".to_string(),
            collector_endpoint: "http://localhost:4317".to_string(),
            export_timeout_secs: 10,
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human readable, for development.
    #[default]
    Pretty,
    /// One JSON object per line, for log aggregation.
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Log output format.
    pub log_format: LogFormat,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
        }
    }
}
