//! Backend entry-point: opens the store, applies migrations, and serves the
//! REST API with OpenAPI docs.

mod server;

use actix_web::web;
use color_eyre::eyre::{Context, Result};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use assim_backend::domain::store_init::{TokioRetrySleeper, open_store};
use assim_backend::inbound::http::health::HealthState;
use assim_backend::outbound::persistence::{
    DieselStoreConnector, PoolConfig, connection_string, run_pending_migrations,
};
use assim_backend::settings::{DatabaseSettings, ServerSettings};

use server::{ServerConfig, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }
    color_eyre::install()?;

    let db_settings = DatabaseSettings::load_from_env()?;
    let server_settings = ServerSettings::load_from_env()?;

    let target = db_settings.to_store_target();
    let connector = DieselStoreConnector::new(
        PoolConfig::for_target(&target).with_max_size(db_settings.pool_size()),
    );
    let pool = open_store(&connector, &TokioRetrySleeper, db_settings.retry_policy())
        .await
        .wrap_err("database unavailable at startup")?;

    let applied = run_pending_migrations(connection_string(&target))
        .await
        .wrap_err("failed to apply database migrations")?;
    info!(applied, "database migrations complete");

    let health_state = web::Data::new(HealthState::new());
    let config = ServerConfig::new(server_settings.bind_addr())
        .with_db_pool(pool)
        .with_cors_origins(server_settings.cors_origins());
    let bind_addr = config.bind_addr();
    let server = create_server(health_state, config)
        .wrap_err_with(|| format!("failed to bind {bind_addr}"))?;
    info!(%bind_addr, "listening");

    server.await.wrap_err("server terminated abnormally")
}
