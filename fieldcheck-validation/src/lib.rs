//! Declarative field validation.
//!
//! Fields carry a compact constraint spec such as
//! `"required,username,min=3,max=32"`. The engine parses the spec into rule
//! invocations, runs them in order against the field's value, and reports the
//! first violation as a human-readable message.
//!
//! # Examples
//!
//! ## Derived Fields
//!
//! ```
//! use fieldcheck_validation::Validate;
//!
//! #[derive(Validate)]
//! #[validator(rename_all = "PascalCase")]
//! struct User {
//!     #[validator("required,username,min=3,max=32")]
//!     username: String,
//!     #[validator("required,password,min=7,max=32")]
//!     password: String,
//!     #[validator("required,email")]
//!     email: String,
//!     #[validator("required,min=18")]
//!     age: u32,
//! }
//!
//! let user = User {
//!     username: "j".to_string(),
//!     password: "Password123@".to_string(),
//!     email: "john_doe@protonmail.com".to_string(),
//!     age: 18,
//! };
//!
//! let err = user.validate().unwrap_err();
//! assert_eq!(err.to_string(), "Username length (1) is lower than minimum length (3)");
//! ```
//!
//! ## Hand-written Descriptors
//!
//! ```
//! use fieldcheck_validation::{FieldDescriptor, Validator};
//!
//! let fields = vec![
//!     FieldDescriptor::new("Age", 17i64, "required,min=18"),
//! ];
//!
//! let err = Validator::new().validate(&fields).unwrap_err();
//! assert_eq!(err.to_string(), "Age value (17) is lower than minimum value (18)");
//! ```
//!
//! ## Errors
//!
//! Bad data yields [`Error::Invalid`]; a spec that names an unknown rule or
//! carries a malformed parameter yields [`Error::Config`], so callers can tell
//! "bad input" from "bad schema".
//!
//! ```
//! use fieldcheck_validation::{FieldDescriptor, validate};
//!
//! let fields = vec![FieldDescriptor::new("Username", "johndoe", "required,slug")];
//! assert!(validate(&fields).unwrap_err().is_config());
//! ```

// Lets `#[derive(Validate)]` resolve `::fieldcheck_validation` inside this crate.
extern crate self as fieldcheck_validation;

mod config;
mod errors;
mod parser;
mod registry;
mod schema;
mod traits;
mod validator;
mod value;
pub mod validators;
pub mod walker;

pub use config::*;
pub use errors::*;
pub use parser::*;
pub use registry::*;
pub use schema::*;
pub use traits::*;
pub use validator::*;
pub use value::*;

#[cfg(feature = "derive")]
pub use fieldcheck_derive::Validate;

use once_cell::sync::Lazy;

static DEFAULT_VALIDATOR: Lazy<Validator> = Lazy::new(Validator::new);

/// Validate `record` with the built-in rules, stopping at the first failure.
pub fn validate<R: Fields + ?Sized>(record: &R) -> Result<()> {
    DEFAULT_VALIDATOR.validate(record)
}
