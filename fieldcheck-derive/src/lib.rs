// Procedural macros for the fieldcheck validation engine.
// `#[derive(Validate)]` turns `#[validator("...")]` field annotations into the
// field descriptors the engine walks.

use proc_macro::TokenStream;

mod attrs;
mod validate;

/// Implements `fieldcheck_validation::Fields` for a struct with named fields,
/// which in turn provides `Validate::validate`.
///
/// Field attribute: `#[validator("spec")]` or `#[validator("spec", name = "Reported")]`.
/// Container attribute: `#[validator(rename_all = "PascalCase", crate = "path")]`.
#[proc_macro_derive(Validate, attributes(validator))]
pub fn validate_derive(input: TokenStream) -> TokenStream {
    validate::validate_derive_impl(input)
}
