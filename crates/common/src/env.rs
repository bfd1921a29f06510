//! Environment/runtime helpers
//!
//! Sanity checks run once at startup before the database is opened.

use std::path::{Path, PathBuf};

use tracing::{info, warn};

/// For file-backed SQLite URLs (`sqlite://data/companies.db?mode=rwc`), make sure
/// the parent directory exists. Other URLs are left alone.
pub async fn ensure_db_dir(database_url: &str) -> anyhow::Result<()> {
    let Some(dir) = sqlite_parent_dir(database_url) else { return Ok(()) };
    if tokio::fs::metadata(&dir).await.is_ok() {
        return Ok(());
    }
    tokio::fs::create_dir_all(&dir)
        .await
        .map_err(|e| anyhow::anyhow!("cannot create {}: {e}", dir.display()))?;
    info!(dir = %dir.display(), "created sqlite data directory");
    Ok(())
}

fn sqlite_parent_dir(database_url: &str) -> Option<PathBuf> {
    let rest = database_url.strip_prefix("sqlite:")?;
    let rest = rest.trim_start_matches("//");
    let path = rest.split('?').next().unwrap_or_default();
    if path.is_empty() || path.contains(":memory:") {
        return None;
    }
    match Path::new(path).parent() {
        Some(p) if !p.as_os_str().is_empty() => Some(p.to_path_buf()),
        Some(_) => None,
        None => {
            warn!(%database_url, "sqlite url has no parent directory");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parent_dir_only_for_file_sqlite() {
        assert_eq!(sqlite_parent_dir("sqlite::memory:"), None);
        assert_eq!(sqlite_parent_dir("postgres://u:p@localhost/db"), None);
        assert_eq!(sqlite_parent_dir("sqlite://companies.db"), None);
        assert_eq!(
            sqlite_parent_dir("sqlite://data/companies.db?mode=rwc"),
            Some(PathBuf::from("data"))
        );
    }

    #[tokio::test]
    async fn creates_missing_directory() -> anyhow::Result<()> {
        let dir = std::env::temp_dir().join(format!("coronavstech-{}", uuid::Uuid::new_v4()));
        let url = format!("sqlite://{}/companies.db?mode=rwc", dir.join("nested").display());
        ensure_db_dir(&url).await?;
        assert!(tokio::fs::metadata(dir.join("nested")).await?.is_dir());
        tokio::fs::remove_dir_all(&dir).await?;
        Ok(())
    }
}
