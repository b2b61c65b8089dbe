//! Middleware stages of the application router.
//!
//! ```text
//! liveness.rs  → short-circuits the probe path
//! catch panic  → recovery.rs builds the fixed 500
//! content type → tower_http::set_header (default application/json)
//! request id   → request.rs generator + tower_http::request_id
//! trace.rs     → span per request
//! ```

pub mod liveness;
pub mod recovery;
pub mod trace;

pub use liveness::{liveness_probe, LivenessProbe};
pub use recovery::panic_response;
pub use trace::{RecordStatus, RequestSpan};
