use std::sync::Arc;

use models::company::{self, CompanyInput, StatusChoices};
use models::errors::FieldError;
use tracing::{debug, info, instrument};

use crate::company::repository::CompanyRepository;
use crate::errors::ServiceError;

/// Application service encapsulating company business rules.
/// Applies field validation and defaults, then the uniqueness policy.
pub struct CompanyService<R: CompanyRepository> {
    repo: Arc<R>,
    choices: Arc<StatusChoices>,
}

impl<R: CompanyRepository> CompanyService<R> {
    pub fn new(repo: Arc<R>, choices: StatusChoices) -> Self {
        Self { repo, choices: Arc::new(choices) }
    }

    /// All companies, in insertion order.
    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<company::Model>, ServiceError> {
        let rows = self.repo.list().await?;
        debug!(count = rows.len(), "companies listed");
        Ok(rows)
    }

    /// Create a company.
    ///
    /// Every field problem is reported at once: a duplicate `name` is added
    /// next to any `status` error instead of short-circuiting.
    ///
    /// # Examples
    /// ```
    /// use service::company::{repository::mock::MockCompanyRepository, CompanyService};
    /// use models::company::{CompanyInput, StatusChoices};
    /// use std::sync::Arc;
    /// let svc = CompanyService::new(Arc::new(MockCompanyRepository::default()), StatusChoices::default());
    /// let created = tokio_test::block_on(svc.create(CompanyInput::named("SamsungE"))).unwrap();
    /// assert_eq!(created.status, "Hiring");
    /// assert!(tokio_test::block_on(svc.create(CompanyInput::named("SamsungE"))).is_err());
    /// ```
    #[instrument(skip(self, input), fields(name = ?input.name))]
    pub async fn create(&self, input: CompanyInput) -> Result<company::Model, ServiceError> {
        let validated = input.validate(&self.choices);
        let mut errors = validated.as_ref().err().cloned().unwrap_or_default();

        if !errors.contains("name") {
            if let Some(name) = input.normalized_name() {
                if self.repo.find_by_name(name).await?.is_some() {
                    errors.push("name", FieldError::Duplicate { entity: "company", field: "name" });
                }
            }
        }
        if !errors.is_empty() {
            info!(errors = %errors, "company_create_rejected");
            return Err(ServiceError::Validation(errors));
        }

        let new = validated?;
        // 并发创建时由唯一约束兜底，repo 会返回同样的重复名称错误
        let created = self.repo.insert(new).await.inspect_err(|e| {
            if e.is_validation() {
                info!(error = %e, "company_create_rejected");
            }
        })?;
        info!(name = %created.name, status = %created.status, "company_created");
        Ok(created)
    }
}
