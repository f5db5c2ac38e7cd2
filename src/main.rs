use anyhow::Context;
use clickdial::config::Config;
use clickdial::infrastructure::vendor::HttpVendorGateway;
use clickdial::interface::api::{build_router, init_metrics, AppState};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("Starting clickdial pass-through");

    // Load configuration
    let config = Config::load().context("Failed to load configuration")?;
    info!("Configuration loaded: {:?}", config);

    let vendor = HttpVendorGateway::new(&config.vendor.endpoint, config.vendor.timeout())
        .context("Failed to build vendor client")?;
    info!("Forwarding call requests to {}", vendor.endpoint());

    info!("Initializing Prometheus metrics exporter");
    let prometheus_handle = init_metrics().context("Failed to install metrics recorder")?;

    let app = build_router(AppState::new(Arc::new(vendor)), prometheus_handle);
    let bind_address = config.server.bind_address();
    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("Failed to bind {}", bind_address))?;

    info!("Pass-through listening on {}", bind_address);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Pass-through stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutting down...");
}
