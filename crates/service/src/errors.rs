use models::errors::{ModelError, ValidationErrors};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("validation error: {0}")]
    Validation(ValidationErrors),
    #[error("database error: {0}")]
    Db(String),
}

impl From<ModelError> for ServiceError {
    fn from(e: ModelError) -> Self {
        match e {
            ModelError::Validation(errs) => Self::Validation(errs),
            ModelError::Db(msg) => Self::Db(msg),
        }
    }
}

impl From<ValidationErrors> for ServiceError {
    fn from(e: ValidationErrors) -> Self {
        Self::Validation(e)
    }
}

impl ServiceError {
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}
