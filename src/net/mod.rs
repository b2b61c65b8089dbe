//! Network layer subsystem.
//!
//! # Data Flow
//! ```text
//! configured bind address
//!     → listener.rs (parse, bind, log resolved address)
//!     → tokio TcpListener handed to axum::serve
//!     → per-connection tasks spawned by axum/hyper
//! ```
//!
//! # Design Decisions
//! - No hand-rolled accept loop or worker pool; the runtime dispatches
//!   connections
//! - Address errors and bind errors are separate so callers can decide which
//!   ones are fatal

pub mod listener;

pub use listener::{bind, ListenerError};
