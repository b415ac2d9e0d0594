//! Development proxy: forwards a path prefix of a host application to a
//! local backend.
//!
//! ```no_run
//! use axum::Router;
//! use dev_proxy::{setup_proxy, ProxyOptions};
//!
//! let app: Router = Router::new();
//! let app = setup_proxy(app, ProxyOptions::default()); // /api → http://127.0.0.1:5000
//! # let _ = app;
//! ```

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod proxy;
pub mod routing;

pub use config::ProxyConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use proxy::{setup_proxy, ForwardError, LoggingHooks, ProxyHooks, ProxyOptions};
