//! Backend entry-point: loads settings, wires the product validator and
//! serves the REST API.

mod server;

use std::time::Duration;

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use deliverus_backend::inbound::http::health::HealthState;
use deliverus_backend::outbound::persistence::{DbPool, PoolConfig};
use deliverus_backend::settings::ServerSettings;
use server::{ServerConfig, create_server};

const DB_CONNECTION_TIMEOUT: Duration = Duration::from_secs(30);

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = ServerSettings::load_from_iter(std::env::args_os())
        .map_err(|e| std::io::Error::other(format!("failed to load settings: {e}")))?;
    let bind_addr = settings.socket_addr().map_err(std::io::Error::other)?;

    let mut config = ServerConfig::new(bind_addr);
    if let Some(url) = settings.database_url() {
        let pool_config = PoolConfig::new(url)
            .with_max_size(settings.pool_size().map_err(std::io::Error::other)?)
            .with_connection_timeout(DB_CONNECTION_TIMEOUT);
        let pool = DbPool::connect(pool_config)
            .await
            .map_err(std::io::Error::other)?;
        info!("database pool ready");
        config = config.with_db_pool(pool);
    }

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config)?;
    server.await
}
