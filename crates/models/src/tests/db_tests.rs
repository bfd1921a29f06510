use std::time::Duration;

use anyhow::Result;
use sea_orm::{ConnectionTrait, DatabaseBackend, Statement};

use crate::db::{connect_with_config, ping, DatabaseConfig};

#[tokio::test]
async fn test_in_memory_connection() -> Result<()> {
    let db = connect_with_config(&DatabaseConfig::in_memory()).await?;
    assert_eq!(db.get_database_backend(), DatabaseBackend::Sqlite);

    let stmt = Statement::from_string(DatabaseBackend::Sqlite, "SELECT 1 AS test".to_string());
    let row = db.query_one(stmt).await?.expect("one row");
    let value: i64 = row.try_get("", "test")?;
    assert_eq!(value, 1);

    ping(&db).await?;
    Ok(())
}

#[test]
fn test_in_memory_config_pins_single_connection() {
    let cfg = DatabaseConfig::in_memory();
    assert_eq!(cfg.url, "sqlite::memory:");
    assert_eq!(cfg.max_connections, 1);
    assert_eq!(cfg.min_connections, 1);
    assert!(cfg.idle_timeout.is_none());
    assert!(cfg.max_lifetime.is_none());
}

#[test]
fn test_config_conversion_from_file_section() {
    let section = configs::DatabaseConfig {
        url: "postgres://u:p@localhost/companies".into(),
        max_connections: 7,
        min_connections: 3,
        connect_timeout_secs: 5,
        idle_timeout_secs: 60,
        max_lifetime_secs: 120,
        acquire_timeout_secs: 9,
        sqlx_logging: true,
    };
    let cfg = DatabaseConfig::from(&section);
    assert_eq!(cfg.url, section.url);
    assert_eq!(cfg.max_connections, 7);
    assert_eq!(cfg.min_connections, 3);
    assert_eq!(cfg.connect_timeout, Duration::from_secs(5));
    assert_eq!(cfg.idle_timeout, Some(Duration::from_secs(60)));
    assert_eq!(cfg.max_lifetime, Some(Duration::from_secs(120)));
    assert_eq!(cfg.acquire_timeout, Duration::from_secs(9));
    assert!(cfg.sqlx_logging);
}

#[test]
fn test_default_config_mirrors_file_section_defaults() {
    let cfg = DatabaseConfig::default();
    let section = configs::DatabaseConfig::default();
    assert!(cfg.url.is_empty());
    assert_eq!(cfg.max_connections, section.max_connections);
    assert_eq!(cfg.min_connections, section.min_connections);
    assert_eq!(cfg.acquire_timeout, Duration::from_secs(section.acquire_timeout_secs));
}
