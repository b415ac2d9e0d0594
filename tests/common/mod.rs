//! Shared utilities for integration testing.

#![allow(dead_code)]

use std::collections::BTreeMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::{
    body::Bytes,
    extract::ConnectInfo,
    http::{HeaderMap, Method, StatusCode, Uri},
    response::Response,
    routing::get,
    Json, Router,
};
use dev_proxy::proxy::{error_response, proxy_log_line, ForwardError, ProxyHooks};
use dev_proxy::{setup_proxy, ProxyOptions};
use serde_json::{json, Value};
use tokio::net::TcpListener;

/// Start an upstream that answers every request with a JSON description
/// of what it received: method, uri, headers, body, peer address.
pub async fn start_echo_upstream() -> SocketAddr {
    let app = Router::new().fallback(echo);
    serve(app).await
}

async fn echo(
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Json<Value> {
    let headers: BTreeMap<String, String> = headers
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_str().unwrap_or_default().to_string()))
        .collect();

    Json(json!({
        "method": method.as_str(),
        "uri": uri.to_string(),
        "headers": headers,
        "body": String::from_utf8_lossy(&body),
        "peer": peer.to_string(),
    }))
}

/// An address nothing listens on.
pub fn closed_addr() -> SocketAddr {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    listener.local_addr().unwrap()
}

/// Host application with one local route, proxy registered on top.
pub async fn start_proxy(options: ProxyOptions) -> SocketAddr {
    let host = Router::new()
        .route("/other/path", get(|| async { "local" }))
        .fallback(|| async { StatusCode::NOT_FOUND });
    serve(setup_proxy(host, options)).await
}

async fn serve(app: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(
            listener,
            app.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .await
        .unwrap();
    });
    addr
}

pub fn client() -> reqwest::Client {
    reqwest::Client::builder().no_proxy().build().unwrap()
}

/// Hooks that remember every log line and error message.
#[derive(Default)]
pub struct RecordingHooks {
    pub lines: Mutex<Vec<String>>,
    pub errors: Mutex<Vec<String>>,
}

impl RecordingHooks {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().unwrap().clone()
    }

    pub fn errors(&self) -> Vec<String> {
        self.errors.lock().unwrap().clone()
    }
}

impl ProxyHooks for RecordingHooks {
    fn on_proxy_req(&self, method: &Method, path: &str, target: &str) {
        self.lines
            .lock()
            .unwrap()
            .push(proxy_log_line(method, path, target));
    }

    fn on_error(&self, error: &ForwardError, _method: &Method, _path: &str) -> Response {
        self.errors.lock().unwrap().push(error.message());
        error_response(error)
    }
}
