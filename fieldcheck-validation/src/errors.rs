// Validation and schema errors

use crate::ValueKind;
use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// A constraint violated by a field's value.
///
/// `Display` renders only [`message`](Self::message); the message text is the
/// contract callers match on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationError {
    /// Field name that failed validation
    pub field: String,

    /// Fully formatted message
    pub message: String,

    /// Rule token that failed
    pub constraint: String,

    /// Value that failed validation (optional)
    pub value: Option<String>,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            constraint: "custom".to_string(),
            value: None,
        }
    }

    /// Set the constraint name
    pub fn with_constraint(mut self, constraint: impl Into<String>) -> Self {
        self.constraint = constraint.into();
        self
    }

    /// Set the invalid value
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ValidationError {}

/// Failures gathered in collect-all mode, in field declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationErrors {
    pub errors: Vec<ValidationError>,
}

impl ValidationErrors {
    pub fn new(errors: Vec<ValidationError>) -> Self {
        Self { errors }
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn add(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    /// The failure a fail-fast pass would have reported.
    pub fn first(&self) -> Option<&ValidationError> {
        self.errors.first()
    }

    /// Get errors for a specific field
    pub fn get_field_errors(&self, field: &str) -> Vec<&ValidationError> {
        self.errors.iter().filter(|e| e.field == field).collect()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ValidationError> {
        self.errors.iter()
    }

    /// Convert to JSON representation
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "errors": self.errors.iter().map(|e| {
                serde_json::json!({
                    "field": e.field,
                    "message": e.message,
                    "constraint": e.constraint,
                    "value": e.value,
                })
            }).collect::<Vec<_>>()
        })
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, error) in self.errors.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", error)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

impl From<Vec<ValidationError>> for ValidationErrors {
    fn from(errors: Vec<ValidationError>) -> Self {
        Self::new(errors)
    }
}

impl IntoIterator for ValidationErrors {
    type Item = ValidationError;
    type IntoIter = std::vec::IntoIter<ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

/// A defect in the constraint annotations themselves, as opposed to bad data.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("unknown rule `{rule}` on field {field}")]
    UnknownRule { field: String, rule: String },

    #[error("rule `{rule}` on field {field} requires a parameter")]
    MissingParameter { field: String, rule: String },

    #[error("rule `{rule}` on field {field} expects an integer parameter, got `{value}`")]
    InvalidParameter {
        field: String,
        rule: String,
        value: String,
    },

    #[error("rule `{rule}` on field {field} takes no parameter, got `{value}`")]
    UnexpectedParameter {
        field: String,
        rule: String,
        value: String,
    },

    #[error("rule `{rule}` cannot be applied to {kind} field {field}")]
    UnsupportedKind {
        field: String,
        rule: String,
        kind: ValueKind,
    },

    #[error("field {field} holds a JSON {found}, which cannot be validated")]
    UnsupportedValue { field: String, found: &'static str },

    #[error("expected a JSON object, got {0}")]
    NotAnObject(&'static str),
}

impl ConfigError {
    /// Field the defect is attached to, when there is one.
    pub fn field(&self) -> Option<&str> {
        match self {
            ConfigError::UnknownRule { field, .. }
            | ConfigError::MissingParameter { field, .. }
            | ConfigError::InvalidParameter { field, .. }
            | ConfigError::UnexpectedParameter { field, .. }
            | ConfigError::UnsupportedKind { field, .. }
            | ConfigError::UnsupportedValue { field, .. } => Some(field),
            ConfigError::NotAnObject(_) => None,
        }
    }
}

/// Outcome of a failed validation pass.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The first violated constraint (fail-fast mode)
    #[error("{0}")]
    Invalid(ValidationError),

    /// Every failing field, one failure each (collect-all mode)
    #[error("{0}")]
    InvalidMany(ValidationErrors),

    /// The annotations are wrong; no data could satisfy them
    #[error("invalid constraint: {0}")]
    Config(#[from] ConfigError),

    /// A parallel validation task panicked or was cancelled
    #[error("validation task failed: {0}")]
    Task(String),
}

impl Error {
    /// True for data problems ("bad input").
    pub fn is_validation(&self) -> bool {
        matches!(self, Error::Invalid(_) | Error::InvalidMany(_))
    }

    /// True for annotation problems ("bad schema").
    pub fn is_config(&self) -> bool {
        matches!(self, Error::Config(_))
    }

    pub fn config_error(&self) -> Option<&ConfigError> {
        match self {
            Error::Config(e) => Some(e),
            _ => None,
        }
    }

    /// Message of the first reported violation.
    pub fn message(&self) -> Option<&str> {
        match self {
            Error::Invalid(e) => Some(&e.message),
            Error::InvalidMany(errors) => errors.first().map(|e| e.message.as_str()),
            _ => None,
        }
    }
}

impl From<ValidationError> for Error {
    fn from(error: ValidationError) -> Self {
        Error::Invalid(error)
    }
}

impl From<ValidationErrors> for Error {
    fn from(errors: ValidationErrors) -> Self {
        Error::InvalidMany(errors)
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_is_message_only() {
        let error = ValidationError::new("Username", "Username is required")
            .with_constraint("required")
            .with_value("");
        assert_eq!(error.to_string(), "Username is required");
        assert_eq!(Error::from(error).to_string(), "Username is required");
    }

    #[test]
    fn test_error_classes_are_distinguishable() {
        let invalid = Error::from(ValidationError::new("Age", "Age is required"));
        let config = Error::from(ConfigError::UnknownRule {
            field: "Age".into(),
            rule: "adult".into(),
        });

        assert!(invalid.is_validation());
        assert!(!invalid.is_config());
        assert!(config.is_config());
        assert_eq!(config.config_error().and_then(ConfigError::field), Some("Age"));
        assert_eq!(
            config.to_string(),
            "invalid constraint: unknown rule `adult` on field Age"
        );
    }

    #[test]
    fn test_validation_errors_collection() {
        let mut errors = ValidationErrors::default();
        errors.add(ValidationError::new("Username", "Username is required").with_constraint("required"));
        errors.add(ValidationError::new("Email", "e-mail is invalid").with_constraint("email"));

        assert_eq!(errors.len(), 2);
        assert_eq!(errors.get_field_errors("Email").len(), 1);
        assert_eq!(errors.to_string(), "Username is required\ne-mail is invalid");

        let error = Error::from(errors.clone());
        assert_eq!(error.message(), Some("Username is required"));

        let json = errors.to_json();
        assert_eq!(json["errors"][1]["constraint"], "email");
        assert!(json["errors"][0]["value"].is_null());
    }
}
