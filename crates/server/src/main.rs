//! SpiritHub API server.
//!
//! Reads configuration from the environment (see [`server::config::Config`]),
//! opens and migrates the SQLite content database, then serves the JSON API
//! until Ctrl-C.
//!
//! ```bash
//! SPIRITHUB_PORT=8080 DATABASE_URL=sqlite://data/spirithub.db?mode=rwc \
//!     cargo run --bin spirithub --release
//! ```

use db::DBService;
use server::{AppState, config::Config, routes};
use services::services::database_validator::DatabaseValidator;
use tracing::{info, warn};
use utils::logging::init_tracing;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = Config::from_env();
    init_tracing(&config.log_level);

    info!(
        version = env!("CARGO_PKG_VERSION"),
        addr = %config.bind_addr(),
        time_zone = %config.time_zone,
        "SpiritHub starting"
    );

    let db = DBService::connect(&config.database_url).await?;

    let validation = DatabaseValidator::new(db.pool.clone()).validate().await?;
    if !validation.is_ok() {
        warn!("Serving with incomplete content; affected endpoints will return 404");
    }

    let listener = tokio::net::TcpListener::bind(config.bind_addr()).await?;
    let app = routes::router(AppState::new(db, config));

    info!(addr = %listener.local_addr()?, "Listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("SpiritHub stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
