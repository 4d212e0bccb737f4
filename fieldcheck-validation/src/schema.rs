// Explicit schemas for JSON input

use crate::{ConfigError, FieldDescriptor, FieldValue, Result, RuleRegistry, Validator, parse_spec};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One schema entry: a field name and its constraint spec.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaField {
    pub name: String,
    #[serde(default)]
    pub rules: String,
}

/// Field constraints registered by hand rather than derived, for records
/// that only exist as JSON.
///
/// Fields are checked in the order they were added, independent of key order
/// in the document.
///
/// ```
/// use fieldcheck_validation::{Schema, Validator};
/// use serde_json::json;
///
/// let schema = Schema::new()
///     .field("Username", "required,username,min=3,max=32")
///     .field("Age", "required,min=18");
///
/// let err = schema
///     .validate_json(&json!({ "Username": "johndoe", "Age": 17 }), &Validator::new())
///     .unwrap_err();
/// assert_eq!(err.to_string(), "Age value (17) is lower than minimum value (18)");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Schema {
    fields: Vec<SchemaField>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a field.
    pub fn field(mut self, name: impl Into<String>, rules: impl Into<String>) -> Self {
        self.fields.push(SchemaField {
            name: name.into(),
            rules: rules.into(),
        });
        self
    }

    pub fn fields(&self) -> &[SchemaField] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Load from a JSON array of `{ "name": ..., "rules": ... }` objects.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Parse every spec up front, so a broken schema is caught before any
    /// data is seen.
    pub fn check_rules(&self, registry: &RuleRegistry) -> std::result::Result<(), ConfigError> {
        for field in &self.fields {
            parse_spec(&field.name, &field.rules, registry)?;
        }
        Ok(())
    }

    /// Map a JSON object onto this schema's fields.
    ///
    /// Missing keys and `null` become [`FieldValue::Null`]. Keys not in the
    /// schema are ignored.
    pub fn descriptors(&self, document: &Value) -> std::result::Result<Vec<FieldDescriptor>, ConfigError> {
        let object = document
            .as_object()
            .ok_or_else(|| ConfigError::NotAnObject(json_type(document)))?;

        self.fields
            .iter()
            .map(|field| {
                let value = match object.get(&field.name) {
                    Some(value) => to_field_value(&field.name, value)?,
                    None => FieldValue::Null,
                };
                Ok(FieldDescriptor::new(field.name.clone(), value, field.rules.clone()))
            })
            .collect()
    }

    /// Validate a JSON document with `validator`'s registry and mode.
    pub fn validate_json(&self, document: &Value, validator: &Validator) -> Result<()> {
        let fields = self.descriptors(document)?;
        validator.check(&fields)
    }
}

fn to_field_value(field: &str, value: &Value) -> std::result::Result<FieldValue, ConfigError> {
    match value {
        Value::Null => Ok(FieldValue::Null),
        Value::Bool(b) => Ok(FieldValue::Bool(*b)),
        Value::String(s) => Ok(FieldValue::String(s.clone())),
        Value::Number(n) => Ok(match (n.as_i64(), n.as_u64()) {
            (Some(i), _) => FieldValue::Int(i),
            (None, Some(_)) => FieldValue::Int(i64::MAX),
            (None, None) => FieldValue::Float(n.as_f64().unwrap_or(f64::NAN)),
        }),
        Value::Array(_) | Value::Object(_) => Err(ConfigError::UnsupportedValue {
            field: field.to_string(),
            found: json_type(value),
        }),
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
