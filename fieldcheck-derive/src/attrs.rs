use syn::ext::IdentExt;
use syn::parse::{Parse, ParseStream};
use syn::{Attribute, Ident, LitStr, Path, Token};

/// Container arguments.
/// Parses: #[validator(rename_all = "PascalCase", crate = "::my::path")]
#[derive(Default)]
pub struct ContainerArgs {
    pub rename_all: RenameRule,
    pub krate: Option<Path>,
}

impl Parse for ContainerArgs {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let mut args = ContainerArgs::default();

        while !input.is_empty() {
            if input.peek(Token![crate]) {
                input.parse::<Token![crate]>()?;
                input.parse::<Token![=]>()?;
                let lit: LitStr = input.parse()?;
                args.krate = Some(lit.parse::<Path>()?);
            } else {
                let ident = Ident::parse_any(input)?;
                input.parse::<Token![=]>()?;
                let lit: LitStr = input.parse()?;
                match ident.to_string().as_str() {
                    "rename_all" => args.rename_all = RenameRule::from_lit(&lit)?,
                    other => {
                        return Err(syn::Error::new(
                            ident.span(),
                            format!(
                                "unknown validator container attribute `{}`\n\
                                 hint: expected `rename_all` or `crate`",
                                other
                            ),
                        ));
                    }
                }
            }

            if input.is_empty() {
                break;
            }
            input.parse::<Token![,]>()?;
        }

        Ok(args)
    }
}

/// Field arguments.
/// Parses: #[validator("required,min=3")] or #[validator("required", name = "Username")]
pub struct FieldArgs {
    pub rules: LitStr,
    pub name: Option<LitStr>,
}

impl Parse for FieldArgs {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let rules: LitStr = input.parse().map_err(|e| {
            syn::Error::new(
                e.span(),
                "expected a constraint spec string, e.g. #[validator(\"required,min=3\")]",
            )
        })?;
        let mut name = None;

        while input.peek(Token![,]) {
            input.parse::<Token![,]>()?;
            if input.is_empty() {
                break;
            }
            let ident: Ident = input.parse()?;
            input.parse::<Token![=]>()?;
            let lit: LitStr = input.parse()?;
            match ident.to_string().as_str() {
                "name" if name.is_none() => name = Some(lit),
                "name" => return Err(syn::Error::new(ident.span(), "duplicate `name`")),
                other => {
                    return Err(syn::Error::new(
                        ident.span(),
                        format!("unknown validator field attribute `{}`", other),
                    ));
                }
            }
        }

        if !input.is_empty() {
            return Err(input.error("unexpected tokens after constraint spec"));
        }

        Ok(FieldArgs { rules, name })
    }
}

fn validator_attrs(attrs: &[Attribute]) -> impl Iterator<Item = &Attribute> {
    attrs.iter().filter(|attr| attr.path().is_ident("validator"))
}

pub fn container_args(attrs: &[Attribute]) -> syn::Result<ContainerArgs> {
    let mut found = validator_attrs(attrs);
    let Some(attr) = found.next() else {
        return Ok(ContainerArgs::default());
    };
    if let Some(extra) = found.next() {
        return Err(syn::Error::new_spanned(
            extra,
            "only one #[validator(...)] attribute is allowed on a struct",
        ));
    }
    attr.parse_args::<ContainerArgs>()
}

pub fn field_args(attrs: &[Attribute]) -> syn::Result<Option<FieldArgs>> {
    let mut found = validator_attrs(attrs);
    let Some(attr) = found.next() else {
        return Ok(None);
    };
    if let Some(extra) = found.next() {
        return Err(syn::Error::new_spanned(
            extra,
            "only one #[validator(...)] attribute is allowed per field\n\
             hint: combine the rules into one comma-separated spec",
        ));
    }
    attr.parse_args::<FieldArgs>().map(Some)
}

/// How field identifiers become reported field names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenameRule {
    /// Keep the identifier
    #[default]
    None,
    PascalCase,
    CamelCase,
    SnakeCase,
    ScreamingSnakeCase,
    LowerCase,
}

impl RenameRule {
    fn from_lit(lit: &LitStr) -> syn::Result<Self> {
        match lit.value().as_str() {
            "PascalCase" => Ok(RenameRule::PascalCase),
            "camelCase" => Ok(RenameRule::CamelCase),
            "snake_case" => Ok(RenameRule::SnakeCase),
            "SCREAMING_SNAKE_CASE" => Ok(RenameRule::ScreamingSnakeCase),
            "lowercase" => Ok(RenameRule::LowerCase),
            other => Err(syn::Error::new(
                lit.span(),
                format!(
                    "unknown rename rule \"{}\"\n\
                     hint: use PascalCase, camelCase, snake_case, SCREAMING_SNAKE_CASE or lowercase",
                    other
                ),
            )),
        }
    }

    /// Apply to a snake_case field identifier.
    pub fn apply(&self, field: &str) -> String {
        match self {
            RenameRule::None | RenameRule::SnakeCase => field.to_string(),
            RenameRule::PascalCase => field.split('_').map(capitalize).collect(),
            RenameRule::CamelCase => {
                let pascal: String = field.split('_').map(capitalize).collect();
                let mut chars = pascal.chars();
                match chars.next() {
                    Some(first) => first.to_lowercase().chain(chars).collect(),
                    None => String::new(),
                }
            }
            RenameRule::ScreamingSnakeCase => field.to_uppercase(),
            RenameRule::LowerCase => field.replace('_', "").to_lowercase(),
        }
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
