//! Forwarding failures.

use axum::http::uri::InvalidUri;
use thiserror::Error;

/// The single failure class of the proxy: a request could not be relayed.
///
/// Never propagated to the host application; hooks turn it into a response.
#[derive(Debug, Error)]
pub enum ForwardError {
    /// The outbound URI could not be built from target and request path.
    #[error("invalid upstream uri: {0}")]
    InvalidUri(#[from] InvalidUri),

    /// Transport failure talking to the upstream (refused, reset, ...).
    #[error("upstream request failed: {0}")]
    Upstream(#[from] hyper_util::client::legacy::Error),
}

impl ForwardError {
    /// Text of the innermost cause, e.g. `Connection refused (os error 111)`.
    pub fn message(&self) -> String {
        let mut cause: &dyn std::error::Error = self;
        while let Some(next) = cause.source() {
            cause = next;
        }
        cause.to_string()
    }
}
