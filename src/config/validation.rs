//! Configuration validation.
//!
//! Serde handles syntax; this module checks the values make sense together.
//! All problems are collected so a bad file is reported in one pass.

use std::net::SocketAddr;

use crate::config::schema::ServiceConfig;

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{field}: `{value}` is not a socket address")]
    InvalidAddress { field: &'static str, value: String },

    #[error("{field}: `{value}` must be a literal path starting with '/'")]
    InvalidPath { field: &'static str, value: String },

    #[error("listener and metrics listener share the address {0}")]
    AddressConflict(SocketAddr),

    #[error("routes: primary and liveness paths overlap (`{0}`)")]
    PathConflict(String),

    #[error("tracing.collector_endpoint: `{value}` {reason}")]
    InvalidEndpoint { value: String, reason: String },

    #[error("{0} must not be empty")]
    Empty(&'static str),

    #[error("{0} must be greater than zero")]
    Zero(&'static str),

    #[error("metrics.request_counter: `{0}` is not a valid metric name")]
    InvalidMetricName(String),

    #[error("observability.log_level: unknown level `{0}`")]
    InvalidLogLevel(String),
}

/// Validate a parsed configuration.
pub fn validate_config(config: &ServiceConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    let app_addr = check_address(
        "listener.bind_address",
        &config.listener.bind_address,
        &mut errors,
    );
    let metrics_addr = check_address(
        "metrics.bind_address",
        &config.metrics.bind_address,
        &mut errors,
    );
    if let (Some(app), Some(metrics)) = (app_addr, metrics_addr) {
        if app == metrics && app.port() != 0 {
            errors.push(ValidationError::AddressConflict(app));
        }
    }

    check_path("routes.primary_path", &config.routes.primary_path, &mut errors);
    check_path("routes.liveness_path", &config.routes.liveness_path, &mut errors);
    check_path("metrics.path", &config.metrics.path, &mut errors);

    // The probe matches case-insensitively, so it would shadow the primary route.
    if config
        .routes
        .primary_path
        .eq_ignore_ascii_case(&config.routes.liveness_path)
    {
        errors.push(ValidationError::PathConflict(config.routes.primary_path.clone()));
    }

    if config.tracing.service_name.trim().is_empty() {
        errors.push(ValidationError::Empty("tracing.service_name"));
    }

    match url::Url::parse(&config.tracing.collector_endpoint) {
        Ok(url) if !matches!(url.scheme(), "http" | "https") => {
            errors.push(ValidationError::InvalidEndpoint {
                value: config.tracing.collector_endpoint.clone(),
                reason: format!("uses unsupported scheme `{}`", url.scheme()),
            });
        }
        Ok(_) => {}
        Err(e) => errors.push(ValidationError::InvalidEndpoint {
            value: config.tracing.collector_endpoint.clone(),
            reason: e.to_string(),
        }),
    }

    if config.tracing.export_timeout_secs == 0 {
        errors.push(ValidationError::Zero("tracing.export_timeout_secs"));
    }

    if !is_metric_name(&config.metrics.request_counter) {
        errors.push(ValidationError::InvalidMetricName(
            config.metrics.request_counter.clone(),
        ));
    }

    if config.observability.log_level.parse::<tracing::Level>().is_err() {
        errors.push(ValidationError::InvalidLogLevel(
            config.observability.log_level.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_address(
    field: &'static str,
    value: &str,
    errors: &mut Vec<ValidationError>,
) -> Option<SocketAddr> {
    match value.parse() {
        Ok(addr) => Some(addr),
        Err(_) => {
            errors.push(ValidationError::InvalidAddress {
                field,
                value: value.to_string(),
            });
            None
        }
    }
}

fn check_path(field: &'static str, value: &str, errors: &mut Vec<ValidationError>) {
    let literal = value.len() > 1
        && value.starts_with('/')
        && value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '/' | '-' | '_' | '.' | '~'));
    if !literal {
        errors.push(ValidationError::InvalidPath {
            field,
            value: value.to_string(),
        });
    }
}

/// Prometheus metric names: `[a-zA-Z_:][a-zA-Z0-9_:]*`.
fn is_metric_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == ':' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == ':')
}
