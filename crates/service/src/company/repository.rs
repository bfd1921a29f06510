use async_trait::async_trait;
use models::company::{self, NewCompany};
use sea_orm::DatabaseConnection;

use crate::errors::ServiceError;

/// Persistence port for companies. `insert` must reject a duplicate `name`
/// atomically with `ServiceError::Validation` carrying the duplicate-name error.
#[async_trait]
pub trait CompanyRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<company::Model>, ServiceError>;
    async fn find_by_name(&self, name: &str) -> Result<Option<company::Model>, ServiceError>;
    async fn insert(&self, new: NewCompany) -> Result<company::Model, ServiceError>;
}

/// SeaORM-backed repository implementation.
pub struct SeaOrmCompanyRepository {
    pub db: DatabaseConnection,
}

#[async_trait]
impl CompanyRepository for SeaOrmCompanyRepository {
    async fn list(&self) -> Result<Vec<company::Model>, ServiceError> {
        Ok(company::list(&self.db).await?)
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<company::Model>, ServiceError> {
        Ok(company::find_by_name(&self.db, name).await?)
    }

    async fn insert(&self, new: NewCompany) -> Result<company::Model, ServiceError> {
        Ok(company::create(&self.db, new).await?)
    }
}

/// Simple in-memory mock repository for tests and doc examples
pub mod mock {
    use super::*;
    use chrono::Utc;
    use std::sync::Mutex;

    #[derive(Default)]
    pub struct MockCompanyRepository {
        rows: Mutex<Vec<company::Model>>,
    }

    #[async_trait]
    impl CompanyRepository for MockCompanyRepository {
        async fn list(&self) -> Result<Vec<company::Model>, ServiceError> {
            let rows = self.rows.lock().map_err(|e| ServiceError::Db(e.to_string()))?;
            Ok(rows.clone())
        }

        async fn find_by_name(&self, name: &str) -> Result<Option<company::Model>, ServiceError> {
            let rows = self.rows.lock().map_err(|e| ServiceError::Db(e.to_string()))?;
            Ok(rows.iter().find(|c| c.name == name).cloned())
        }

        async fn insert(&self, new: NewCompany) -> Result<company::Model, ServiceError> {
            let mut rows = self.rows.lock().map_err(|e| ServiceError::Db(e.to_string()))?;
            if rows.iter().any(|c| c.name == new.name) {
                return Err(ServiceError::Validation(company::duplicate_name()));
            }
            let row = company::Model {
                id: rows.len() as i32 + 1,
                name: new.name,
                status: new.status,
                notes: new.notes,
                application_link: new.application_link,
                last_update: Utc::now().into(),
            };
            rows.push(row.clone());
            Ok(row)
        }
    }
}
