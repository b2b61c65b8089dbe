//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Config → Tracer provider → Metrics recorder → Log subscriber
//!         (all under an early stdout subscriber, failures logged there)
//!         → spawn metrics listener → bind + serve application listener
//!
//! Shutdown:
//!     Process termination only; in-flight requests and buffered spans are
//!     dropped
//! ```

pub mod startup;

pub use startup::{bootstrap, init_telemetry, run, BootstrapError, Telemetry};
