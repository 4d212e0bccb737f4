// fieldcheck - declarative field validation
//
// Annotate record fields with compact constraint specs and get back the first
// violation as a precise, human-readable message.
//
// Structs deriving `Validate` through this crate should point the generated
// code at it:
//
//     #[derive(fieldcheck::Validate)]
//     #[validator(crate = "fieldcheck")]
//     struct Login { #[validator("required,email")] email: String }

// Re-export the engine, including #[derive(Validate)]
pub use fieldcheck_validation::*;

#[cfg(feature = "log")]
pub use fieldcheck_log;

/// Prelude module for convenient imports
pub mod prelude {
    pub use fieldcheck_validation::{
        AsyncValidate, ConfigError, Error, FieldDescriptor, FieldValue, Fields, Result, Rule,
        RuleRegistry, Schema, Validate, ValidationError, ValidationErrors, ValidationMode,
        Validator, ValidatorConfig, validate,
    };
}
