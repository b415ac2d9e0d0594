//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Build the host application (static files or a 404 fallback)
//! - Register the proxy onto it
//! - Wire up middleware (request ID, tracing)
//! - Serve on a listener until shutdown

use std::net::SocketAddr;

use axum::{
    http::{StatusCode, Uri},
    response::IntoResponse,
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    services::ServeDir,
    trace::TraceLayer,
};

use crate::config::{ConfigError, ListenerConfig, ProxyConfig};
use crate::http::request::{MakeRequestUuidV4, X_REQUEST_ID};
use crate::lifecycle::Shutdown;
use crate::proxy::{setup_proxy, ProxyOptions};

/// HTTP server hosting the application and the proxy.
pub struct HttpServer {
    router: Router,
    config: ProxyConfig,
}

impl HttpServer {
    /// Create a server using the default logging hooks.
    pub fn new(config: ProxyConfig) -> Result<Self, ConfigError> {
        let options = config.proxy.to_options()?;
        Ok(Self::with_options(config, options))
    }

    /// Create a server with fully custom proxy options.
    pub fn with_options(config: ProxyConfig, options: ProxyOptions) -> Self {
        let app = host_app(&config.listener);
        let router = setup_proxy(app, options)
            .layer(PropagateRequestIdLayer::new(X_REQUEST_ID.clone()))
            .layer(TraceLayer::new_for_http())
            .layer(SetRequestIdLayer::new(X_REQUEST_ID.clone(), MakeRequestUuidV4));

        Self { router, config }
    }

    /// Run the server until `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            prefix = %self.config.proxy.path_prefix,
            target = %self.config.proxy.target,
            "HTTP server starting"
        );

        let app = self
            .router
            .into_make_service_with_connect_info::<SocketAddr>();

        axum::serve(listener, app)
            .with_graceful_shutdown(Shutdown::wait(shutdown))
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    pub fn router(&self) -> Router {
        self.router.clone()
    }

    pub fn config(&self) -> &ProxyConfig {
        &self.config
    }
}

/// The application the proxy is registered onto.
fn host_app(listener: &ListenerConfig) -> Router {
    match &listener.static_dir {
        Some(dir) => {
            tracing::info!(dir = %dir.display(), "Serving static files");
            Router::new().fallback_service(ServeDir::new(dir))
        }
        None => Router::new().fallback(not_found),
    }
}

async fn not_found(uri: Uri) -> impl IntoResponse {
    (StatusCode::NOT_FOUND, format!("No route for {}", uri.path()))
}
