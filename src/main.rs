use clap::Parser;
use std::path::PathBuf;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use exchange_proxy::config::load_config;
use exchange_proxy::http::HttpServer;

#[derive(Parser, Debug)]
#[command(name = "exchange-proxy")]
#[command(about = "Rate-limited reverse proxy for crypto exchange REST APIs")]
struct Args {
    /// Path to a TOML config file; built-in defaults apply when omitted.
    /// PORT, API_KEY, and ALLOWED_ORIGIN env vars override either way.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config = load_config(args.config.as_deref())?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new(format!(
                    "exchange_proxy={},tower_http=info",
                    config.observability.log_level
                ))
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("exchange-proxy v0.1.0 starting");
    tracing::info!(
        bind_address = %config.listener.bind_address,
        auth_enabled = config.auth.api_key.is_some(),
        rate_limit_enabled = config.rate_limit.enabled,
        allowed_origin = %config.cors.allowed_origin,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        if let Ok(addr) = config.observability.metrics_address.parse() {
            exchange_proxy::observability::metrics::init_metrics(addr);
        } else {
            tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            );
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;

    let server = HttpServer::new(config)?;
    server.run(listener).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
