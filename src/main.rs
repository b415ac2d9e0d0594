use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use dev_proxy::config::{load_config, validate_config, ConfigError, ProxyConfig};
use dev_proxy::lifecycle::{signals, Shutdown};
use dev_proxy::observability::{logging, metrics};
use dev_proxy::HttpServer;

#[derive(Parser, Debug)]
#[command(name = "dev-proxy")]
#[command(about = "Local dev server that forwards a path prefix to a backend", long_about = None)]
struct Cli {
    /// TOML config file; built-in defaults when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Address the dev server listens on
    #[arg(short, long)]
    bind: Option<String>,

    /// Upstream origin, e.g. http://127.0.0.1:5000
    #[arg(short, long)]
    target: Option<String>,

    /// Path prefix to forward
    #[arg(short, long)]
    prefix: Option<String>,

    /// Directory served for non-proxied paths
    #[arg(long)]
    static_dir: Option<PathBuf>,
}

impl Cli {
    fn apply(self, config: &mut ProxyConfig) {
        if let Some(bind) = self.bind {
            config.listener.bind_address = bind;
        }
        if let Some(target) = self.target {
            config.proxy.target = target;
        }
        if let Some(prefix) = self.prefix {
            config.proxy.path_prefix = prefix;
        }
        if let Some(dir) = self.static_dir {
            config.listener.static_dir = Some(dir);
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => ProxyConfig::default(),
    };
    cli.apply(&mut config);
    validate_config(&config).map_err(ConfigError::Validation)?;

    logging::init(&config.observability.log_level);
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "dev-proxy starting");

    if config.observability.metrics_enabled {
        if let Ok(addr) = config.observability.metrics_address.parse() {
            if let Err(e) = metrics::init_metrics(addr) {
                tracing::error!(error = %e, "Failed to start metrics endpoint");
            }
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    let server = HttpServer::new(config)?;

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        signals::wait_for_signal().await;
        shutdown.trigger();
    });

    server.run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
