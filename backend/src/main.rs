//! Backend entry-point: reads configuration, connects to Postgres and serves
//! the HTTP API.

use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

use actix_web::web;
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use cityinfo::domain::CredentialService;
use cityinfo::inbound::http::health::HealthState;
use cityinfo::outbound::persistence::{
    DbPool, DieselCityRepository, DieselUserRepository, PoolConfig,
};
use cityinfo::server::{ServerConfig, create_server};
use cityinfo::settings::{AppSettings, BuildMode};

/// Command-line overrides for the listener.
#[derive(Debug, Parser)]
#[command(name = "cityinfo", about = "City info HTTP API")]
struct CliArgs {
    /// Port to listen on; overrides `API_PORT`.
    #[arg(long)]
    api_port: Option<u16>,
    /// Address to bind.
    #[arg(long, default_value = "0.0.0.0")]
    bind_host: IpAddr,
}

fn startup_error(context: &str, err: impl std::fmt::Display) -> std::io::Error {
    std::io::Error::other(format!("{context}: {err}"))
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let args = CliArgs::parse();
    let settings = AppSettings::from_env(
        &mockable::DefaultEnv::new(),
        BuildMode::from_debug_assertions(),
    )
    .map_err(|err| startup_error("invalid configuration", err))?;

    let database_url = settings
        .database
        .connection_url()
        .map_err(|err| startup_error("invalid configuration", err))?;
    let pool = DbPool::new(
        PoolConfig::new(database_url.as_str()).with_max_size(settings.database.pool_max_size),
    )
    .await
    .map_err(|err| startup_error("database pool", err))?;
    pool.verify()
        .await
        .map_err(|err| startup_error("database unreachable", err))?;
    info!(
        host = %settings.database.hostname,
        database = %settings.database.database,
        "connected to database"
    );

    let credentials = CredentialService::new(settings.credentials)
        .map_err(|err| startup_error("password hashing", err))?;

    let bind_addr = SocketAddr::new(args.bind_host, args.api_port.unwrap_or(settings.api_port));
    let config = ServerConfig::new(
        settings.session,
        bind_addr,
        Arc::new(DieselUserRepository::new(pool.clone())),
        Arc::new(DieselCityRepository::new(pool)),
        credentials,
    );

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config)?;
    info!(%bind_addr, "listening");
    server.await
}
