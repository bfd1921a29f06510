use chrono::Utc;
use sea_orm::{
    entity::prelude::*, ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, Set, SqlErr,
};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use tracing::debug;

use crate::errors::{FieldError, ModelError, ValidationErrors, NON_FIELD_ERRORS};

pub const NAME_MAX_LEN: usize = 128;
pub const STATUS_MAX_LEN: usize = 32;
pub const APPLICATION_LINK_MAX_LEN: usize = 512;

/// One tracked company. Only `name`, `status`, `notes` and `application_link`
/// leave the process; the key and timestamp are storage details.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "company")]
pub struct Model {
    #[sea_orm(primary_key)]
    #[serde(skip_serializing)]
    pub id: i32,
    #[sea_orm(unique)]
    pub name: String,
    pub status: String,
    #[sea_orm(column_type = "Text")]
    pub notes: String,
    pub application_link: String,
    #[serde(skip_serializing)]
    pub last_update: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Allowed `status` values plus the one applied when a request omits it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusChoices {
    allowed: Vec<String>,
    default: String,
}

impl StatusChoices {
    /// `default` must be one of `allowed`, and every value must fit the column.
    pub fn new(allowed: Vec<String>, default: impl Into<String>) -> Result<Self, ModelError> {
        let default = default.into();
        if let Some(long) = allowed.iter().find(|s| s.chars().count() > STATUS_MAX_LEN) {
            return Err(ModelError::Validation(ValidationErrors::single(
                "status",
                FieldError::TooLong { max: STATUS_MAX_LEN },
            )));
        }
        if !allowed.contains(&default) {
            return Err(ModelError::Validation(ValidationErrors::single(
                "status",
                FieldError::InvalidChoice(default),
            )));
        }
        Ok(Self { allowed, default })
    }

    pub fn from_config(cfg: &configs::CompaniesConfig) -> Result<Self, ModelError> {
        Self::new(cfg.statuses.clone(), cfg.default_status.clone())
    }

    pub fn contains(&self, status: &str) -> bool {
        self.allowed.iter().any(|s| s == status)
    }

    pub fn default_status(&self) -> &str {
        &self.default
    }

    pub fn allowed(&self) -> &[String] {
        &self.allowed
    }
}

impl Default for StatusChoices {
    fn default() -> Self {
        let cfg = configs::CompaniesConfig::default();
        Self { allowed: cfg.statuses, default: cfg.default_status }
    }
}

/// Create request as received. Every field is optional here so that a
/// missing `name` is reported as a validation error rather than a decode error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct CompanyInput {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub application_link: Option<String>,
    /// Type errors found while decoding the raw body. They seed `validate`,
    /// so every other field is still checked.
    #[serde(skip)]
    pub decode_errors: ValidationErrors,
}

/// A create request that passed every field check. Uniqueness of `name` is
/// still enforced by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCompany {
    pub name: String,
    pub status: String,
    pub notes: String,
    pub application_link: String,
}

impl CompanyInput {
    pub fn named(name: impl Into<String>) -> Self {
        Self { name: Some(name.into()), ..Self::default() }
    }

    /// Type-check an arbitrary JSON body. Fields other than the four known
    /// ones are ignored. Only a body that is not an object fails here; `null`
    /// and non-string values are recorded per field and reported by `validate`.
    pub fn from_json(body: &JsonValue) -> Result<Self, ValidationErrors> {
        let Some(obj) = body.as_object() else {
            return Err(ValidationErrors::single(
                NON_FIELD_ERRORS,
                FieldError::NotAnObject { got: json_type_name(body) },
            ));
        };

        let mut errors = ValidationErrors::default();
        let mut take = |field: &'static str| -> Option<String> {
            match obj.get(field)? {
                JsonValue::String(s) => Some(s.clone()),
                JsonValue::Null => {
                    errors.push(field, FieldError::Null);
                    None
                }
                _ => {
                    errors.push(field, FieldError::NotAString);
                    None
                }
            }
        };
        let name = take("name");
        let status = take("status");
        let notes = take("notes");
        let application_link = take("application_link");
        Ok(Self { name, status, notes, application_link, decode_errors: errors })
    }

    /// Field-level checks and defaults. Text fields are trimmed; `status` is
    /// compared verbatim. Fields that already failed to decode are not
    /// checked again.
    pub fn validate(&self, choices: &StatusChoices) -> Result<NewCompany, ValidationErrors> {
        let mut errors = self.decode_errors.clone();

        let name = match self.name.as_deref().map(str::trim) {
            _ if errors.contains("name") => String::new(),
            None => {
                errors.push("name", FieldError::Required);
                String::new()
            }
            Some("") => {
                errors.push("name", FieldError::Blank);
                String::new()
            }
            Some(n) => {
                check_len(&mut errors, "name", n, NAME_MAX_LEN);
                n.to_string()
            }
        };

        let status = match self.status.as_deref() {
            _ if errors.contains("status") => String::new(),
            None => choices.default_status().to_string(),
            Some(s) if choices.contains(s) => s.to_string(),
            Some(s) => {
                errors.push("status", FieldError::InvalidChoice(s.to_string()));
                String::new()
            }
        };

        let notes = self.notes.as_deref().map(str::trim).unwrap_or_default().to_string();

        let application_link = self
            .application_link
            .as_deref()
            .map(str::trim)
            .unwrap_or_default()
            .to_string();
        check_len(&mut errors, "application_link", &application_link, APPLICATION_LINK_MAX_LEN);

        errors.into_result()?;
        Ok(NewCompany { name, status, notes, application_link })
    }

    /// Trimmed `name`, if one was supplied and is non-blank.
    pub fn normalized_name(&self) -> Option<&str> {
        self.name.as_deref().map(str::trim).filter(|n| !n.is_empty())
    }
}

fn check_len(errors: &mut ValidationErrors, field: &'static str, value: &str, max: usize) {
    if value.chars().count() > max {
        errors.push(field, FieldError::TooLong { max });
    }
}

fn json_type_name(v: &JsonValue) -> &'static str {
    match v {
        JsonValue::Null => "NoneType",
        JsonValue::Bool(_) => "bool",
        JsonValue::Number(n) if n.is_f64() => "float",
        JsonValue::Number(_) => "int",
        JsonValue::String(_) => "str",
        JsonValue::Array(_) => "list",
        JsonValue::Object(_) => "dict",
    }
}

pub fn duplicate_name() -> ValidationErrors {
    ValidationErrors::single("name", FieldError::Duplicate { entity: "company", field: "name" })
}

/// Insert a validated company. A UNIQUE violation on `name` (including one
/// caused by a concurrent insert) surfaces as the duplicate-name validation error.
pub async fn create(db: &DatabaseConnection, new: NewCompany) -> Result<Model, ModelError> {
    let am = ActiveModel {
        name: Set(new.name),
        status: Set(new.status),
        notes: Set(new.notes),
        application_link: Set(new.application_link),
        last_update: Set(Utc::now().into()),
        ..Default::default()
    };
    am.insert(db).await.map_err(|e| match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(detail)) => {
            debug!(%detail, "company insert hit unique constraint");
            ModelError::Validation(duplicate_name())
        }
        _ => ModelError::Db(e.to_string()),
    })
}

/// All companies in insertion order.
pub async fn list(db: &DatabaseConnection) -> Result<Vec<Model>, ModelError> {
    Entity::find()
        .order_by_asc(Column::Id)
        .all(db)
        .await
        .map_err(|e| ModelError::Db(e.to_string()))
}

pub async fn find_by_name(db: &DatabaseConnection, name: &str) -> Result<Option<Model>, ModelError> {
    Entity::find()
        .filter(Column::Name.eq(name))
        .one(db)
        .await
        .map_err(|e| ModelError::Db(e.to_string()))
}

/// Remove a company by exact name; returns true if a row was deleted.
/// Not part of the HTTP surface.
pub async fn delete_by_name(db: &DatabaseConnection, name: &str) -> Result<bool, ModelError> {
    let res = Entity::delete_many()
        .filter(Column::Name.eq(name))
        .exec(db)
        .await
        .map_err(|e| ModelError::Db(e.to_string()))?;
    Ok(res.rows_affected > 0)
}
