use migration::{Migrator, MigratorTrait};
use sea_orm::DatabaseConnection;

use crate::db::{connect_with_config, DatabaseConfig};

/// Database connection and configuration tests
pub mod db_tests;


/// Company persistence against a migrated schema
pub mod company_tests;

/// Fresh, migrated, private database for one test.
pub(crate) async fn memory_db() -> anyhow::Result<DatabaseConnection> {
    let db = connect_with_config(&DatabaseConfig::in_memory()).await?;
    Migrator::up(&db, None).await?;
    Ok(db)
}
