//! Sky Map HTTP Server Binary
//!
//! Loads the configuration and star catalogue, sets up the HTTP router and
//! starts serving requests.
//!
//! # Usage
//!
//! ```bash
//! # Built-in defaults: data/hip_main.dat, or the bundled extract if it is missing
//! cargo run --bin skymap-server
//!
//! # Download the full Hipparcos catalogue on first start
//! cargo run --bin skymap-server --features catalog-download
//!
//! # Catalogue elsewhere, another port
//! SKYMAP_CATALOG_PATH=/data/hip_main.dat PORT=9000 cargo run --bin skymap-server
//! ```
//!
//! # Environment Variables
//!
//! - `SKYMAP_CONFIG`: Path to a TOML configuration file (default: search for `skymap.toml`)
//! - `SKYMAP_CATALOG_PATH`: Star catalogue in `hip_main.dat` layout
//! - `HOST`: Server host (default: 0.0.0.0)
//! - `PORT`: Server port (default: 8080)
//! - `RUST_LOG`: Log level (default: info)

use std::env;
use std::net::SocketAddr;
use std::sync::Arc;

#[cfg(feature = "catalog-download")]
use tracing::warn;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use skymap::config::SkyMapConfig;
use skymap::http::{create_router, AppState, PageDefaults};
use skymap::services::SkyMapService;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    FmtSubscriber::builder()
        .with_max_level(
            env::var("RUST_LOG")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(Level::INFO),
        )
        .with_target(true)
        .with_thread_ids(true)
        .init();

    info!("Starting Sky Map HTTP Server");

    let config = SkyMapConfig::load()?;
    info!(
        "Plotting {} from catalog {}",
        config.sky.bodies.join(", "),
        config.catalog_path().display()
    );

    #[cfg(feature = "catalog-download")]
    if let Some(url) = config.catalog_url() {
        if let Err(e) = skymap::catalog::download::ensure_catalog(&config.catalog_path(), url).await {
            warn!("{}", e);
        }
    }

    // Catalogue is loaded once and shared read-only by every request
    let service = SkyMapService::from_config(&config)?;
    let state = AppState::new(Arc::new(service)).with_defaults(PageDefaults {
        location: config.sky.default_location.clone(),
        hour: config.sky.default_hour,
    });

    let app = create_router(state);

    let addr: SocketAddr = config.bind_address().parse()?;

    info!("Server listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
