//! Options record handed to the forwarding engine.

use std::fmt;
use std::sync::Arc;

use axum::http::{header, HeaderMap, HeaderValue, Uri};

use crate::proxy::hooks::{LoggingHooks, ProxyHooks};

pub const DEFAULT_PATH_PREFIX: &str = "/api";
pub const DEFAULT_TARGET: &str = "http://127.0.0.1:5000";

/// Everything the forwarding engine needs. Built once at startup.
#[derive(Clone)]
pub struct ProxyOptions {
    /// Requests whose path starts with this are forwarded.
    pub path_prefix: String,

    /// Upstream origin, optionally with a base path.
    pub target: Uri,

    /// Rewrite the outbound Host header to the target's authority.
    pub change_origin: bool,

    /// Reuse pooled upstream connections. When false, every forwarded
    /// request opens its own connection.
    pub use_connection_agent: bool,

    /// Add X-Forwarded-* headers.
    pub xfwd: bool,

    /// Forced onto every forwarded request, replacing inbound values.
    pub headers: HeaderMap,

    pub hooks: Arc<dyn ProxyHooks>,
}

impl Default for ProxyOptions {
    fn default() -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(header::CONNECTION, HeaderValue::from_static("keep-alive"));

        Self {
            path_prefix: DEFAULT_PATH_PREFIX.to_string(),
            target: Uri::from_static(DEFAULT_TARGET),
            change_origin: true,
            use_connection_agent: false,
            xfwd: false,
            headers,
            hooks: Arc::new(LoggingHooks),
        }
    }
}

impl fmt::Debug for ProxyOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProxyOptions")
            .field("path_prefix", &self.path_prefix)
            .field("target", &self.target)
            .field("change_origin", &self.change_origin)
            .field("use_connection_agent", &self.use_connection_agent)
            .field("xfwd", &self.xfwd)
            .field("headers", &self.headers)
            .finish_non_exhaustive()
    }
}
