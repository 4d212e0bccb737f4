// Field values and descriptors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Runtime value of a record field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    String(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    /// Absent value (`None`, JSON `null`, missing key)
    Null,
}

/// The kind of a [`FieldValue`], used to check rule applicability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    String,
    Int,
    Float,
    Bool,
    Null,
}

impl ValueKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValueKind::String => "string",
            ValueKind::Int => "integer",
            ValueKind::Float => "float",
            ValueKind::Bool => "boolean",
            ValueKind::Null => "null",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FieldValue {
    pub fn kind(&self) -> ValueKind {
        match self {
            FieldValue::String(_) => ValueKind::String,
            FieldValue::Int(_) => ValueKind::Int,
            FieldValue::Float(_) => ValueKind::Float,
            FieldValue::Bool(_) => ValueKind::Bool,
            FieldValue::Null => ValueKind::Null,
        }
    }

    /// Whether this is the zero value of its kind.
    ///
    /// Integer `0` counts as zero, so a field that legitimately holds zero
    /// cannot also be `required`.
    pub fn is_zero(&self) -> bool {
        match self {
            FieldValue::String(s) => s.is_empty(),
            FieldValue::Int(n) => *n == 0,
            FieldValue::Float(x) => *x == 0.0,
            FieldValue::Bool(b) => !b,
            FieldValue::Null => true,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            FieldValue::Int(n) => Some(*n),
            _ => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::String(s) => f.write_str(s),
            FieldValue::Int(n) => write!(f, "{}", n),
            FieldValue::Float(x) => write!(f, "{}", x),
            FieldValue::Bool(b) => write!(f, "{}", b),
            FieldValue::Null => f.write_str("null"),
        }
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::String(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::String(value.to_string())
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Int(value)
    }
}

impl From<i32> for FieldValue {
    fn from(value: i32) -> Self {
        FieldValue::Int(value.into())
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Float(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Bool(value)
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(FieldValue::Null, Into::into)
    }
}

/// Conversion from a borrowed struct field, used by `#[derive(Validate)]`.
pub trait IntoFieldValue {
    /// Kind of the declared field type, independent of the current value.
    /// `Option<T>` reports `T`'s kind; [`ValueKind::Null`] means "decided
    /// at runtime".
    const KIND: ValueKind;

    fn to_field_value(&self) -> FieldValue;
}

impl IntoFieldValue for FieldValue {
    const KIND: ValueKind = ValueKind::Null;

    fn to_field_value(&self) -> FieldValue {
        self.clone()
    }
}

impl IntoFieldValue for str {
    const KIND: ValueKind = ValueKind::String;

    fn to_field_value(&self) -> FieldValue {
        FieldValue::String(self.to_string())
    }
}

impl IntoFieldValue for String {
    const KIND: ValueKind = ValueKind::String;

    fn to_field_value(&self) -> FieldValue {
        FieldValue::String(self.clone())
    }
}

impl IntoFieldValue for bool {
    const KIND: ValueKind = ValueKind::Bool;

    fn to_field_value(&self) -> FieldValue {
        FieldValue::Bool(*self)
    }
}

impl<T: IntoFieldValue + ?Sized> IntoFieldValue for &T {
    const KIND: ValueKind = T::KIND;

    fn to_field_value(&self) -> FieldValue {
        (**self).to_field_value()
    }
}

impl<T: IntoFieldValue> IntoFieldValue for Option<T> {
    const KIND: ValueKind = T::KIND;

    fn to_field_value(&self) -> FieldValue {
        self.as_ref().map_or(FieldValue::Null, IntoFieldValue::to_field_value)
    }
}

impl<T: IntoFieldValue + ?Sized> IntoFieldValue for Box<T> {
    const KIND: ValueKind = T::KIND;

    fn to_field_value(&self) -> FieldValue {
        (**self).to_field_value()
    }
}

macro_rules! lossless_int {
    ($($ty:ty),*) => {
        $(
            impl IntoFieldValue for $ty {
                const KIND: ValueKind = ValueKind::Int;

                fn to_field_value(&self) -> FieldValue {
                    FieldValue::Int(i64::from(*self))
                }
            }
        )*
    };
}

// Values outside the i64 range saturate.
macro_rules! saturating_int {
    ($($ty:ty),*) => {
        $(
            impl IntoFieldValue for $ty {
                const KIND: ValueKind = ValueKind::Int;

                fn to_field_value(&self) -> FieldValue {
                    let value = i64::try_from(*self)
                        .unwrap_or(if *self > 0 as $ty { i64::MAX } else { i64::MIN });
                    FieldValue::Int(value)
                }
            }
        )*
    };
}

lossless_int!(i8, i16, i32, i64, u8, u16, u32);
saturating_int!(isize, usize, u64, i128, u128);

impl IntoFieldValue for f32 {
    const KIND: ValueKind = ValueKind::Float;

    fn to_field_value(&self) -> FieldValue {
        FieldValue::Float(f64::from(*self))
    }
}

impl IntoFieldValue for f64 {
    const KIND: ValueKind = ValueKind::Float;

    fn to_field_value(&self) -> FieldValue {
        FieldValue::Float(*self)
    }
}

/// One field of a record as seen by the engine: its declared name, its
/// current value and its raw constraint spec.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDescriptor {
    pub name: String,
    pub value: FieldValue,
    /// `None` means the field carries no constraints
    pub spec: Option<String>,
    /// Kind of the declared field type; [`ValueKind::Null`] when only the
    /// value is known
    pub declared_kind: ValueKind,
}

impl FieldDescriptor {
    /// Create a descriptor. An empty spec is stored as `None`.
    ///
    /// The declared kind is taken from the value; an absent value leaves it
    /// open. Use [`with_kind`](Self::with_kind) when the field type is known.
    pub fn new(
        name: impl Into<String>,
        value: impl Into<FieldValue>,
        spec: impl Into<String>,
    ) -> Self {
        let spec = spec.into();
        let value = value.into();
        Self {
            name: name.into(),
            declared_kind: value.kind(),
            value,
            spec: (!spec.is_empty()).then_some(spec),
        }
    }

    /// A field without constraints.
    pub fn unconstrained(name: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        let value = value.into();
        Self {
            name: name.into(),
            declared_kind: value.kind(),
            value,
            spec: None,
        }
    }

    /// Set the declared kind, so rule applicability does not depend on
    /// whether the value happens to be present.
    pub fn with_kind(mut self, kind: ValueKind) -> Self {
        self.declared_kind = kind;
        self
    }

    /// Kind used to decide which rules may be attached: the declared kind,
    /// or the value's kind when nothing was declared.
    pub fn kind(&self) -> ValueKind {
        match self.declared_kind {
            ValueKind::Null => self.value.kind(),
            declared => declared,
        }
    }

    /// The raw spec, or `""` when there is none.
    pub fn spec(&self) -> &str {
        self.spec.as_deref().unwrap_or("")
    }
}
