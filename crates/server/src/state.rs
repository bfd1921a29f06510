use std::sync::Arc;

use models::company::StatusChoices;
use sea_orm::DatabaseConnection;
use service::company::{CompanyService, SeaOrmCompanyRepository};

/// Shared handler state. Cloned per request; the service sits behind an `Arc`.
#[derive(Clone)]
pub struct ServerState {
    pub company_svc: Arc<CompanyService<SeaOrmCompanyRepository>>,
}

impl ServerState {
    pub fn new(db: DatabaseConnection, choices: StatusChoices) -> Self {
        let repo = SeaOrmCompanyRepository { db };
        let company_svc = Arc::new(CompanyService::new(Arc::new(repo), choices));
        Self { company_svc }
    }
}
