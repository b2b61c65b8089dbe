//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection (axum::serve)
//!     → server.rs (router + middleware chain)
//!     → middleware/ (liveness, recovery, content type, request ID, span)
//!     → handlers.rs (primary endpoint, not-found fallback)
//!     → error.rs (fixed server-error response)
//! ```

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod request;
pub mod server;

pub use error::AppError;
pub use request::{MakeRequestUuidV4, RequestIdExt, X_REQUEST_ID};
pub use server::{AppServer, AppState};
