//! Observer hooks injected into the forwarding engine.
//!
//! `on_proxy_req` runs once per matched request before it is forwarded;
//! `on_error` runs on forwarding failure and produces the client response.

use axum::http::{header, Method, StatusCode};
use axum::response::{IntoResponse, Response};

use crate::proxy::error::ForwardError;

/// Side-effecting observers around a forwarded request.
pub trait ProxyHooks: Send + Sync {
    /// Called with the inbound method, the original path (no query) and the
    /// computed target URL, just before the request is forwarded.
    fn on_proxy_req(&self, method: &Method, path: &str, target: &str);

    /// Called when forwarding failed. The returned response goes to the client.
    fn on_error(&self, error: &ForwardError, method: &Method, path: &str) -> Response;
}

/// Default hooks: one log line per forwarded request, 500 on failure.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingHooks;

impl ProxyHooks for LoggingHooks {
    fn on_proxy_req(&self, method: &Method, path: &str, target: &str) {
        tracing::info!(
            method = %method,
            path = %path,
            target = %target,
            "{}",
            proxy_log_line(method, path, target)
        );
    }

    fn on_error(&self, error: &ForwardError, method: &Method, path: &str) -> Response {
        tracing::error!(
            method = %method,
            path = %path,
            error = %error,
            "Proxy error: {}",
            error.message()
        );
        error_response(error)
    }
}

/// `[Proxy] <METHOD> <path> -> <target>`
pub fn proxy_log_line(method: &Method, path: &str, target: &str) -> String {
    format!("[Proxy] {} {} -> {}", method, path, target)
}

/// 500, `text/plain`, body `Proxy error: <message>`.
pub fn error_response(error: &ForwardError) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        [(header::CONTENT_TYPE, "text/plain")],
        format!("Proxy error: {}", error.message()),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Uri;

    fn sample_error() -> ForwardError {
        ForwardError::from("http://bad host".parse::<Uri>().unwrap_err())
    }

    #[test]
    fn log_line_format() {
        assert_eq!(
            proxy_log_line(
                &Method::GET,
                "/api/users/42",
                "http://127.0.0.1:5000/api/users/42"
            ),
            "[Proxy] GET /api/users/42 -> http://127.0.0.1:5000/api/users/42"
        );
    }

    #[tokio::test]
    async fn error_response_is_plain_text_500() {
        let error = sample_error();
        let response = LoggingHooks.on_error(&error, &Method::POST, "/api/items");

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "text/plain"
        );

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(body, format!("Proxy error: {}", error.message()).as_bytes());
    }
}
