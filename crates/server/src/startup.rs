use std::{future::Future, net::SocketAddr};

use axum::Router;
use configs::{AppConfig, ServerConfig};
use dotenvy::dotenv;
use migration::MigratorTrait;
use models::{company::StatusChoices, db::DatabaseConfig};
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::{errors::StartupError, routes, state::ServerState};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Resolve host/port after config normalisation (env already applied).
fn bind_addr(server: &ServerConfig) -> anyhow::Result<SocketAddr> {
    Ok(format!("{}:{}", server.host, server.port).parse()?)
}

/// Connect, migrate and assemble the router from a validated config.
pub async fn build_app(cfg: &AppConfig) -> Result<Router, StartupError> {
    common::env::ensure_db_dir(&cfg.database.url).await?;

    let db = models::db::connect_with_config(&DatabaseConfig::from(&cfg.database))
        .await
        .map_err(|e| StartupError::Database(e.to_string()))?;
    migration::Migrator::up(&db, None)
        .await
        .map_err(|e| StartupError::Database(format!("migrations: {e}")))?;

    let choices = StatusChoices::from_config(&cfg.companies)
        .map_err(|e| StartupError::InvalidConfig(e.to_string()))?;
    info!(statuses = ?choices.allowed(), default = choices.default_status(), "company statuses loaded");

    let state = ServerState::new(db, choices);
    Ok(routes::build_router(state, build_cors()))
}

/// Public entry: build the app and run the HTTP server until Ctrl+C.
pub async fn run() -> anyhow::Result<()> {
    run_until(async {
        let _ = tokio::signal::ctrl_c().await;
    })
    .await
}

/// Build the app and serve until `shutdown` resolves; in-flight requests are drained.
pub async fn run_until<F>(shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    dotenv().ok();
    common::utils::logging::init_logging_from_env();

    let cfg = AppConfig::load_or_default().map_err(|e| StartupError::InvalidConfig(e.to_string()))?;
    let app = build_app(&cfg).await?;

    let addr = bind_addr(&cfg.server)?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "starting company service");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;
    info!("company service stopped");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bind_addr_from_config() {
        let server = ServerConfig { host: "0.0.0.0".into(), port: 8000, worker_threads: None };
        assert_eq!(bind_addr(&server).unwrap(), "0.0.0.0:8000".parse::<SocketAddr>().unwrap());
    }

    #[test]
    fn bind_addr_rejects_hostnames() {
        let server = ServerConfig { host: "not a host".into(), port: 8000, worker_threads: None };
        assert!(bind_addr(&server).is_err());
    }

    #[tokio::test]
    async fn build_app_against_in_memory_sqlite() {
        let mut cfg = AppConfig::default();
        cfg.database.url = "sqlite::memory:".into();
        cfg.database.max_connections = 1;
        cfg.database.min_connections = 1;
        assert!(build_app(&cfg).await.is_ok());
    }
}
