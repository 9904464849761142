use anyhow::Context;
use axum::Router;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use registry_catalog::{api::create_router, ApplicationBuilder, Config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    info!("Starting registry catalog service");

    // Load configuration
    let config = Config::from_env();
    config.validate().map_err(anyhow::Error::msg)?;
    info!(
        delete_enabled = config.delete_enabled,
        delete_concurrency = config.delete_concurrency,
        "Configuration loaded and validated"
    );
    if config.auth.disable_auth {
        tracing::warn!("DISABLE_AUTH is set: every request runs as an administrator");
    }

    let listen_addr = config.listen_addr.clone();
    let app = build_app(config).await?;

    // Start server
    info!("Listening on {}", listen_addr);
    let listener = TcpListener::bind(&listen_addr)
        .await
        .with_context(|| format!("failed to bind {}", listen_addr))?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

/// Wire config into adapters, use cases and the router
async fn build_app(config: Config) -> anyhow::Result<Router> {
    let state = ApplicationBuilder::new(config)
        .with_database()
        .await
        .map_err(anyhow::Error::from_boxed)?
        .with_infrastructure()
        .map_err(anyhow::Error::from_boxed)?
        .build()
        .map_err(anyhow::Error::from_boxed)?;

    Ok(create_router(state))
}

/// `RUST_LOG` filter, plain text by default, JSON with `LOG_FORMAT=json`
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let json = std::env::var("LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .with_current_span(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .with_thread_ids(true)
            .init();
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
