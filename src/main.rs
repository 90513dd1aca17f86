//! storefront entry point: config, tracing, actor system, HTTP server.

use anyhow::Context;
use storefront_orders::app_system::{setup_tracing, SeedCatalog, StoreConfig, StoreSystem};
use storefront_orders::http::{build_router, AppState};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::{error, info, Level};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Silent if the file does not exist; production injects env vars directly.
    let _ = dotenvy::from_filename(".env.local");

    setup_tracing();

    let config = StoreConfig::from_env()?;
    info!(?config, "Starting storefront");

    let system = StoreSystem::new(config.channel_buffer);

    if let Some(path) = &config.seed_path {
        let catalog = SeedCatalog::load(path)?;
        system.seed(&catalog).await?;
    }

    let app = build_router(AppState::from_system(&system)).layer(
        TraceLayer::new_for_http()
            .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
            .on_response(DefaultOnResponse::new().level(Level::INFO)),
    );

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("binding {}", config.bind_addr))?;
    info!("storefront listening on http://{}", config.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server crashed")?;

    // The router and its client clones are gone; the actors can drain.
    system.shutdown().await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "Failed to listen for ctrl-c; running until killed");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
