//! Receipt station server.
//!
//! Accepts image and text uploads over HTTP, runs the adaptive raster
//! pipeline, records what was printed, and drives a networked ESC/POS
//! thermal printer.

mod api;
mod assets;
mod config;
mod records;
mod routes;
mod state;

use tracing_subscriber::EnvFilter;

use crate::config::AppConfig;
use crate::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = AppConfig::from_env();
    records::ensure_dirs(&config.records_dir)?;
    tracing::info!(
        printer = config.printer_addr(),
        dry_run = config.dry_run,
        "Configuration loaded"
    );

    let state = AppState::shared(config);
    let addr = format!("0.0.0.0:{}", state.config.server_port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Receipt station listening on http://{addr}");

    let app = routes::create_router(state);
    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("Shutting down...");
        })
        .await?;

    Ok(())
}
