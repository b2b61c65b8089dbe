//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! optional config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → ServiceConfig (validated, immutable)
//!     → handed to bootstrap, which passes each section to its subsystem
//! ```
//!
//! # Design Decisions
//! - Every field defaults to the fixed deployment constants
//! - Config is read once at startup; there is no reload
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, load_or_default, ConfigError};
pub use schema::{
    ListenerConfig, LogFormat, MetricsConfig, ObservabilityConfig, RoutesConfig, ServiceConfig,
    TracingConfig,
};
