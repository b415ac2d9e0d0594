//! Forwarding engine.
//!
//! # Responsibilities
//! - Compute the upstream URL for a matched request
//! - Rewrite headers (hop-by-hop, Host, X-Forwarded-*, forced headers)
//! - Relay the request once and stream the upstream response back
//! - Hand failures to the error hook
//!
//! # Design Decisions
//! - One attempt per request: no retries, no timeouts
//! - With `use_connection_agent` off the client keeps no idle connections,
//!   so every request dials the upstream afresh
//! - HTTP/1.1 to the upstream regardless of the inbound version

use std::net::SocketAddr;
use std::time::Instant;

use axum::body::Body;
use axum::http::{header, HeaderValue, Request, Response, Uri, Version};
use hyper::body::Incoming;
use hyper_util::{
    client::legacy::{connect::HttpConnector, Client},
    rt::TokioExecutor,
};

use crate::observability::metrics;
use crate::proxy::error::ForwardError;
use crate::proxy::headers;
use crate::proxy::options::ProxyOptions;
use crate::routing::{Matcher, PathPrefixMatcher};

/// Relays matched requests to the configured upstream.
pub struct ProxyEngine {
    matcher: PathPrefixMatcher,
    /// `scheme://authority[/base]`, no trailing slash.
    origin: String,
    host_header: Option<HeaderValue>,
    options: ProxyOptions,
    client: Client<HttpConnector, Body>,
}

impl ProxyEngine {
    /// Build the engine and its upstream client.
    pub fn new(options: ProxyOptions) -> Self {
        let scheme = options.target.scheme_str().unwrap_or("http");
        let authority = options
            .target
            .authority()
            .map(|a| a.as_str())
            .unwrap_or_default();
        let base_path = options.target.path().trim_end_matches('/');
        let origin = format!("{}://{}{}", scheme, authority, base_path);
        let host_header = HeaderValue::from_str(authority).ok();

        let mut connector = HttpConnector::new();
        connector.set_nodelay(true);

        let mut builder = Client::builder(TokioExecutor::new());
        if !options.use_connection_agent {
            builder.pool_max_idle_per_host(0);
        }
        let client = builder.build(connector);

        tracing::debug!(
            prefix = %options.path_prefix,
            origin = %origin,
            pooled = options.use_connection_agent,
            "Proxy engine ready"
        );

        Self {
            matcher: PathPrefixMatcher::new(options.path_prefix.clone()),
            origin,
            host_header,
            options,
            client,
        }
    }

    pub fn options(&self) -> &ProxyOptions {
        &self.options
    }

    /// Whether the request belongs to this proxy.
    pub fn matches(&self, request: &Request<Body>) -> bool {
        self.matcher.matches(request)
    }

    /// Upstream URL for an inbound URI: origin + path + query.
    pub fn target_url(&self, uri: &Uri) -> String {
        let path_and_query = uri.path_and_query().map(|pq| pq.as_str()).unwrap_or("/");
        format!("{}{}", self.origin, path_and_query)
    }

    /// Forward with hooks: log, relay, and turn failures into a response.
    pub async fn handle(&self, client_addr: Option<SocketAddr>, request: Request<Body>) -> Response<Body> {
        let start = Instant::now();
        let method = request.method().clone();
        let path = request.uri().path().to_string();
        let target = self.target_url(request.uri());

        self.options.hooks.on_proxy_req(&method, &path, &target);

        let response = match self.forward_to(&target, client_addr, request).await {
            Ok(response) => {
                tracing::debug!(
                    method = %method,
                    path = %path,
                    status = %response.status(),
                    "Upstream responded"
                );
                response
            }
            Err(error) => {
                metrics::record_forward_error();
                self.options.hooks.on_error(&error, &method, &path)
            }
        };

        metrics::record_request(method.as_str(), response.status().as_u16(), start);
        response
    }

    /// Forward a single request without invoking any hook.
    pub async fn forward(
        &self,
        client_addr: Option<SocketAddr>,
        request: Request<Body>,
    ) -> Result<Response<Body>, ForwardError> {
        let target = self.target_url(request.uri());
        self.forward_to(&target, client_addr, request).await
    }

    async fn forward_to(
        &self,
        target: &str,
        client_addr: Option<SocketAddr>,
        request: Request<Body>,
    ) -> Result<Response<Body>, ForwardError> {
        let uri: Uri = target.parse()?;
        let (parts, body) = request.into_parts();

        let mut outbound_headers = parts.headers;
        let inbound_host = outbound_headers.get(header::HOST).cloned();

        headers::strip_hop_by_hop(&mut outbound_headers);
        if self.options.change_origin {
            if let Some(host) = &self.host_header {
                outbound_headers.insert(header::HOST, host.clone());
            }
        }
        if self.options.xfwd {
            headers::append_forwarded(&mut outbound_headers, client_addr, inbound_host.as_ref());
        }
        headers::apply_forced(&mut outbound_headers, &self.options.headers);

        let mut outbound = Request::new(body);
        *outbound.method_mut() = parts.method;
        *outbound.uri_mut() = uri;
        *outbound.version_mut() = Version::HTTP_11;
        *outbound.headers_mut() = outbound_headers;

        let response: Response<Incoming> = self.client.request(outbound).await?;

        let (mut parts, body) = response.into_parts();
        headers::strip_hop_by_hop(&mut parts.headers);
        Ok(Response::from_parts(parts, Body::new(body)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine(target: &'static str) -> ProxyEngine {
        ProxyEngine::new(ProxyOptions {
            target: Uri::from_static(target),
            ..ProxyOptions::default()
        })
    }

    #[tokio::test]
    async fn target_url_keeps_path_and_query() {
        let engine = engine("http://127.0.0.1:5000");

        assert_eq!(
            engine.target_url(&Uri::from_static("/api/users/42")),
            "http://127.0.0.1:5000/api/users/42"
        );
        assert_eq!(
            engine.target_url(&Uri::from_static("/api/search?q=rust&page=2")),
            "http://127.0.0.1:5000/api/search?q=rust&page=2"
        );
    }

    #[tokio::test]
    async fn target_url_joins_base_path() {
        let engine = engine("http://localhost:8000/backend/");
        assert_eq!(
            engine.target_url(&Uri::from_static("/api/items")),
            "http://localhost:8000/backend/api/items"
        );
    }

    #[tokio::test]
    async fn matches_on_prefix_only() {
        let engine = engine("http://127.0.0.1:5000");
        let api = Request::builder().uri("/api/x").body(Body::empty()).unwrap();
        let other = Request::builder().uri("/other/path").body(Body::empty()).unwrap();

        assert!(engine.matches(&api));
        assert!(!engine.matches(&other));
    }

    #[tokio::test]
    async fn refused_connection_is_forward_error() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let engine = ProxyEngine::new(ProxyOptions {
            target: format!("http://{}", addr).parse().unwrap(),
            ..ProxyOptions::default()
        });
        let request = Request::builder().uri("/api/foo").body(Body::empty()).unwrap();

        let err = engine.forward(None, request).await.unwrap_err();
        assert!(matches!(err, ForwardError::Upstream(_)));
        assert!(!err.message().is_empty());
    }
}
