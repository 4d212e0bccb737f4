// Validation traits

use crate::{FieldDescriptor, FieldValue, Param, ParamKind, Result, ValueKind, Validator};
use async_trait::async_trait;

/// A registered rule: one implementation per rule token.
///
/// `check` formats its own failure message. It returns
/// [`Error::Invalid`](crate::Error::Invalid) for bad data and
/// [`Error::Config`](crate::Error::Config) when it is handed a parameter or
/// value it cannot work with.
pub trait Rule: Send + Sync {
    /// Token used in constraint specs
    fn name(&self) -> &'static str;

    /// Parameter shape expected after `=`
    fn param_kind(&self) -> ParamKind {
        ParamKind::None
    }

    /// Whether the rule can be attached to values of this kind
    fn accepts(&self, kind: ValueKind) -> bool;

    fn check(&self, field: &str, value: &FieldValue, param: Option<&Param>) -> Result<()>;
}

/// Exposes a record's fields, in declaration order, to the engine.
///
/// Usually implemented by `#[derive(Validate)]`.
pub trait Fields {
    fn fields(&self) -> Vec<FieldDescriptor>;
}

impl<T: Fields + ?Sized> Fields for &T {
    fn fields(&self) -> Vec<FieldDescriptor> {
        (**self).fields()
    }
}

impl Fields for [FieldDescriptor] {
    fn fields(&self) -> Vec<FieldDescriptor> {
        self.to_vec()
    }
}

impl Fields for Vec<FieldDescriptor> {
    fn fields(&self) -> Vec<FieldDescriptor> {
        self.clone()
    }
}

/// Fail-fast validation with the built-in rules.
pub trait Validate {
    fn validate(&self) -> Result<()>;
}

impl<T: Fields + ?Sized> Validate for T {
    fn validate(&self) -> Result<()> {
        crate::validate(self)
    }
}

/// Validation with one task per field; the reported failure is still the
/// first one in declaration order.
#[async_trait]
pub trait AsyncValidate {
    async fn validate_async(&self) -> Result<()>;
}

#[async_trait]
impl<T: Fields + Sync + ?Sized> AsyncValidate for T {
    async fn validate_async(&self) -> Result<()> {
        Validator::new().validate_parallel(self).await
    }
}
