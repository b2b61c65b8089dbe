//! Instrumented HTTP service library.
//!
//! Two listeners share one process: the application router (primary endpoint
//! plus liveness probe, request IDs, panic recovery and per-request spans) and
//! a metrics listener serving the Prometheus scrape endpoint. Spans are batch
//! exported over OTLP/gRPC.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod net;
pub mod observability;
pub mod scrape;

pub use config::ServiceConfig;
pub use http::AppServer;
pub use scrape::MetricsListener;
