use std::time::Duration;

use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection};
use tracing::info;

/// Connection pool settings resolved from `config.toml` or the environment.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub connect_timeout: Duration,
    pub idle_timeout: Option<Duration>,
    pub max_lifetime: Option<Duration>,
    pub acquire_timeout: Duration,
    pub sqlx_logging: bool,
}

/// Pool limits mirror the `[database]` section defaults; the URL is left empty.
impl Default for DatabaseConfig {
    fn default() -> Self {
        Self::from(&configs::DatabaseConfig::default())
    }
}

impl From<&configs::DatabaseConfig> for DatabaseConfig {
    fn from(c: &configs::DatabaseConfig) -> Self {
        Self {
            url: c.url.clone(),
            max_connections: c.max_connections,
            min_connections: c.min_connections,
            connect_timeout: Duration::from_secs(c.connect_timeout_secs),
            idle_timeout: Some(Duration::from_secs(c.idle_timeout_secs)),
            max_lifetime: Some(Duration::from_secs(c.max_lifetime_secs)),
            acquire_timeout: Duration::from_secs(c.acquire_timeout_secs),
            sqlx_logging: c.sqlx_logging,
        }
    }
}

impl DatabaseConfig {
    /// Private in-memory SQLite database. The pool is pinned to a single
    /// connection that never expires, since every SQLite connection to
    /// `:memory:` opens its own empty database.
    pub fn in_memory() -> Self {
        Self {
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
            min_connections: 1,
            idle_timeout: None,
            max_lifetime: None,
            ..Self::default()
        }
    }
}

pub async fn connect_with_config(cfg: &DatabaseConfig) -> anyhow::Result<DatabaseConnection> {
    let mut opt = ConnectOptions::new(cfg.url.clone());
    opt.max_connections(cfg.max_connections)
        .min_connections(cfg.min_connections)
        .connect_timeout(cfg.connect_timeout)
        .acquire_timeout(cfg.acquire_timeout)
        .sqlx_logging(cfg.sqlx_logging);
    if let Some(t) = cfg.idle_timeout {
        opt.idle_timeout(t);
    }
    if let Some(t) = cfg.max_lifetime {
        opt.max_lifetime(t);
    }

    let db = Database::connect(opt).await?;
    info!(
        backend = ?db.get_database_backend(),
        max_connections = cfg.max_connections,
        "database connected"
    );
    Ok(db)
}

/// Round-trip a trivial statement to prove the pool is usable.
pub async fn ping(db: &DatabaseConnection) -> anyhow::Result<()> {
    db.ping().await?;
    Ok(())
}
