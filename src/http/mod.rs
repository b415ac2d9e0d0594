//! Host application server.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (axum serve, request id, trace layer)
//!     → proxy middleware: `/api*` → upstream
//!     → everything else → static files or 404
//! ```

pub mod request;
pub mod server;

pub use request::{MakeRequestUuidV4, X_REQUEST_ID};
pub use server::HttpServer;
