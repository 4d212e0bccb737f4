use crate::attrs::{container_args, field_args};
use proc_macro::TokenStream;
use quote::quote;
use syn::ext::IdentExt;
use syn::{Data, DataStruct, DeriveInput, Error, Fields, parse_macro_input, parse_quote};

/// Implementation of `#[derive(Validate)]`.
///
/// Generates a `Fields` impl listing every annotated field, in declaration
/// order, as a `FieldDescriptor` of (reported name, current value, spec,
/// declared kind of the field type).
/// Unannotated fields carry no constraints and are left out.
///
/// # Usage
///
/// ```ignore
/// #[derive(Validate)]
/// #[validator(rename_all = "PascalCase")]
/// struct User {
///     #[validator("required,username,min=3,max=32")]
///     username: String,
///     #[validator("required,min=18", name = "Age")]
///     years: u32,
///     nickname: Option<String>, // not validated
/// }
/// ```
pub fn validate_derive_impl(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match expand(&input) {
        Ok(expanded) => TokenStream::from(expanded),
        Err(error) => TokenStream::from(error.to_compile_error()),
    }
}

pub(crate) fn expand(input: &DeriveInput) -> syn::Result<proc_macro2::TokenStream> {
    let container = container_args(&input.attrs)?;
    let krate = container
        .krate
        .clone()
        .unwrap_or_else(|| parse_quote!(::fieldcheck_validation));

    let named = match &input.data {
        Data::Struct(DataStruct {
            fields: Fields::Named(named),
            ..
        }) => &named.named,
        Data::Struct(_) => {
            return Err(Error::new_spanned(
                &input.ident,
                "#[derive(Validate)] requires a struct with named fields\n\
                 hint: tuple and unit structs have no field names to report",
            ));
        }
        Data::Enum(_) | Data::Union(_) => {
            return Err(Error::new_spanned(
                &input.ident,
                "#[derive(Validate)] can only be used on structs",
            ));
        }
    };

    let mut descriptors = Vec::new();
    for field in named {
        let Some(args) = field_args(&field.attrs)? else {
            continue;
        };
        let Some(ident) = field.ident.as_ref() else {
            continue;
        };

        let reported = match &args.name {
            Some(name) => name.value(),
            None => container.rename_all.apply(&ident.unraw().to_string()),
        };
        let rules = &args.rules;
        let ty = &field.ty;

        descriptors.push(quote! {
            #krate::FieldDescriptor::new(
                #reported,
                #krate::IntoFieldValue::to_field_value(&self.#ident),
                #rules,
            )
            .with_kind(<#ty as #krate::IntoFieldValue>::KIND)
        });
    }

    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics #krate::Fields for #name #ty_generics #where_clause {
            fn fields(&self) -> ::std::vec::Vec<#krate::FieldDescriptor> {
                ::std::vec![#(#descriptors),*]
            }
        }
    })
}
