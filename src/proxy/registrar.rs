//! Registers the proxy onto a host application.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::{ConnectInfo, Request, State},
    middleware::{self, Next},
    response::Response,
    Router,
};

use crate::proxy::engine::ProxyEngine;
use crate::proxy::options::ProxyOptions;

/// Attach the forwarding middleware to `app`.
///
/// Matching requests are forwarded and never reach `app`; everything else
/// passes through untouched. Register the application's own routes and
/// fallback first: the middleware only wraps what already exists.
pub fn setup_proxy<S>(app: Router<S>, options: ProxyOptions) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    let engine = Arc::new(ProxyEngine::new(options));

    tracing::info!(
        prefix = %engine.options().path_prefix,
        target = %engine.options().target,
        "Proxy registered"
    );

    app.layer(middleware::from_fn_with_state(engine, proxy_middleware))
}

async fn proxy_middleware(
    State(engine): State<Arc<ProxyEngine>>,
    request: Request,
    next: Next,
) -> Response {
    if !engine.matches(&request) {
        return next.run(request).await;
    }

    let client_addr = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| *addr);

    engine.handle(client_addr, request).await
}
