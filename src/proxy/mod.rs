//! Development proxy subsystem.
//!
//! # Data Flow
//! ```text
//! Host application (axum Router)
//!     → registrar.rs: setup_proxy(app, options) layers one middleware
//!
//! Per request:
//!     path matches prefix?
//!       no  → host application, untouched
//!       yes → hooks.on_proxy_req (log line)
//!           → engine.rs (target URL, header rewrite, single relay)
//!           → upstream response streamed back
//!           → on transport failure: hooks.on_error (500 text/plain)
//! ```

pub mod engine;
pub mod error;
pub mod headers;
pub mod hooks;
pub mod options;
pub mod registrar;

pub use engine::ProxyEngine;
pub use error::ForwardError;
pub use hooks::{error_response, proxy_log_line, LoggingHooks, ProxyHooks};
pub use options::{ProxyOptions, DEFAULT_PATH_PREFIX, DEFAULT_TARGET};
pub use registrar::setup_proxy;
