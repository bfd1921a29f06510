use std::fmt;

use serde::ser::{Serialize, SerializeMap, Serializer};
use thiserror::Error;

/// Key used for errors that belong to the payload as a whole.
pub const NON_FIELD_ERRORS: &str = "non_field_errors";

/// Why a single field was rejected. `Display` renders the client-facing message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    Required,
    Null,
    Blank,
    NotAString,
    TooLong { max: usize },
    Duplicate { entity: &'static str, field: &'static str },
    InvalidChoice(String),
    NotAnObject { got: &'static str },
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldError::Required => f.write_str("This field is required."),
            FieldError::Null => f.write_str("This field may not be null."),
            FieldError::Blank => f.write_str("This field may not be blank."),
            FieldError::NotAString => f.write_str("Not a valid string."),
            FieldError::TooLong { max } => {
                write!(f, "Ensure this field has no more than {max} characters.")
            }
            FieldError::Duplicate { entity, field } => {
                write!(f, "{entity} with this {field} already exists.")
            }
            FieldError::InvalidChoice(value) => write!(f, "\"{value}\" is not a valid choice."),
            FieldError::NotAnObject { got } => {
                write!(f, "Invalid data. Expected a dictionary, but got {got}.")
            }
        }
    }
}

/// Field → messages, in the order fields were checked.
///
/// Serializes as `{"name": ["This field is required."], ...}`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    fields: Vec<(&'static str, Vec<FieldError>)>,
}

impl ValidationErrors {
    pub fn single(field: &'static str, error: FieldError) -> Self {
        let mut errs = Self::default();
        errs.push(field, error);
        errs
    }

    pub fn push(&mut self, field: &'static str, error: FieldError) {
        match self.fields.iter_mut().find(|(f, _)| *f == field) {
            Some((_, list)) => list.push(error),
            None => self.fields.push((field, vec![error])),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn contains(&self, field: &str) -> bool {
        self.fields.iter().any(|(f, _)| *f == field)
    }

    pub fn get(&self, field: &str) -> Option<&[FieldError]> {
        self.fields.iter().find(|(f, _)| *f == field).map(|(_, l)| l.as_slice())
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> + '_ {
        self.fields.iter().map(|(f, _)| *f)
    }

    /// `Ok(())` when nothing was collected.
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, errors) in &self.fields {
            for e in errors {
                if !first {
                    f.write_str("; ")?;
                }
                first = false;
                write!(f, "{field}: {e}")?;
            }
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

impl Serialize for ValidationErrors {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (field, errors) in &self.fields {
            let messages: Vec<String> = errors.iter().map(ToString::to_string).collect();
            map.serialize_entry(field, &messages)?;
        }
        map.end()
    }
}

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("validation error: {0}")]
    Validation(ValidationErrors),
    #[error("database error: {0}")]
    Db(String),
}
