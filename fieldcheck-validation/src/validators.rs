// Built-in rules

use crate::{ConfigError, Error, FieldValue, Param, ParamKind, Result, Rule, ValidationError, ValueKind};
use once_cell::sync::Lazy;
use regex::Regex;

static USERNAME_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z0-9_.\-]+$").unwrap());

// One `@`, labels separated by single dots, top-level label of 2+ chars.
static EMAIL_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@(?:[^@\s.]+\.)+[^@\s.]{2,}$").unwrap());

/// Symbols accepted by the `password` rule.
pub const PASSWORD_SYMBOLS: &[char] = &[
    '!', '@', '#', '~', '$', '%', '^', '&', '*', '(', ')', '+', '|', '_',
];

pub const PASSWORD_LOWERCASE_MESSAGE: &str = "Password must contain at least one lowercase letter";
pub const PASSWORD_UPPERCASE_MESSAGE: &str = "Password must contain at least one uppercase letter";
pub const PASSWORD_NUMBER_MESSAGE: &str = "Password must contain at least one number";
pub const PASSWORD_SYMBOL_MESSAGE: &str =
    "Password must contain at least one symbol\n(!, @, #, ~, $, %, ^, &, *, (, ), +, |, _, )";
pub const EMAIL_MESSAGE: &str = "e-mail is invalid";

/// Whether `value` has the `username` shape.
pub fn is_valid_username(value: &str) -> bool {
    USERNAME_REGEX.is_match(value)
}

/// Whether `value` has the `local@domain.tld` shape.
pub fn is_valid_email(value: &str) -> bool {
    EMAIL_REGEX.is_match(value)
}

/// The first password sub-check `value` fails, as its message.
///
/// Checked in order: lowercase, uppercase, digit, symbol. Letters are
/// Unicode-cased; digits are `0-9`.
pub fn password_violation(value: &str) -> Option<&'static str> {
    if !value.chars().any(char::is_lowercase) {
        Some(PASSWORD_LOWERCASE_MESSAGE)
    } else if !value.chars().any(char::is_uppercase) {
        Some(PASSWORD_UPPERCASE_MESSAGE)
    } else if !value.chars().any(|c| c.is_ascii_digit()) {
        Some(PASSWORD_NUMBER_MESSAGE)
    } else if !value.chars().any(|c| PASSWORD_SYMBOLS.contains(&c)) {
        Some(PASSWORD_SYMBOL_MESSAGE)
    } else {
        None
    }
}

fn unsupported(rule: &str, field: &str, value: &FieldValue) -> Error {
    ConfigError::UnsupportedKind {
        field: field.to_string(),
        rule: rule.to_string(),
        kind: value.kind(),
    }
    .into()
}

fn int_param(rule: &str, field: &str, param: Option<&Param>) -> Result<i64> {
    match param {
        Some(Param::Int(n)) => Ok(*n),
        Some(other) => Err(ConfigError::InvalidParameter {
            field: field.to_string(),
            rule: rule.to_string(),
            value: other.to_string(),
        }
        .into()),
        None => Err(ConfigError::MissingParameter {
            field: field.to_string(),
            rule: rule.to_string(),
        }
        .into()),
    }
}

fn char_len(value: &str) -> i64 {
    i64::try_from(value.chars().count()).unwrap_or(i64::MAX)
}

/// `required`: fails on the zero value of the field's kind.
pub struct Required;

impl Rule for Required {
    fn name(&self) -> &'static str {
        "required"
    }

    fn accepts(&self, _kind: ValueKind) -> bool {
        true
    }

    fn check(&self, field: &str, value: &FieldValue, _param: Option<&Param>) -> Result<()> {
        if value.is_zero() {
            Err(ValidationError::new(field, format!("{} is required", field))
                .with_constraint("required")
                .with_value(value.to_string())
                .into())
        } else {
            Ok(())
        }
    }
}

/// `min=N`: minimum character count for strings, minimum value for numbers.
pub struct Min;

impl Rule for Min {
    fn name(&self) -> &'static str {
        "min"
    }

    fn param_kind(&self) -> ParamKind {
        ParamKind::Integer
    }

    fn accepts(&self, kind: ValueKind) -> bool {
        matches!(
            kind,
            ValueKind::String | ValueKind::Int | ValueKind::Float | ValueKind::Null
        )
    }

    fn check(&self, field: &str, value: &FieldValue, param: Option<&Param>) -> Result<()> {
        let min = int_param(self.name(), field, param)?;

        let message = match value {
            FieldValue::String(s) => {
                let len = char_len(s);
                (len < min).then(|| {
                    format!(
                        "{} length ({}) is lower than minimum length ({})",
                        field, len, min
                    )
                })
            }
            FieldValue::Int(n) => (*n < min).then(|| {
                format!("{} value ({}) is lower than minimum value ({})", field, n, min)
            }),
            FieldValue::Float(x) => (*x < min as f64).then(|| {
                format!("{} value ({}) is lower than minimum value ({})", field, x, min)
            }),
            FieldValue::Null => None,
            _ => return Err(unsupported(self.name(), field, value)),
        };

        match message {
            Some(message) => Err(ValidationError::new(field, message)
                .with_constraint("min")
                .with_value(value.to_string())
                .into()),
            None => Ok(()),
        }
    }
}

/// `max=N`: maximum character count for strings.
pub struct Max;

impl Rule for Max {
    fn name(&self) -> &'static str {
        "max"
    }

    fn param_kind(&self) -> ParamKind {
        ParamKind::Integer
    }

    fn accepts(&self, kind: ValueKind) -> bool {
        matches!(kind, ValueKind::String | ValueKind::Null)
    }

    fn check(&self, field: &str, value: &FieldValue, param: Option<&Param>) -> Result<()> {
        let max = int_param(self.name(), field, param)?;

        match value {
            FieldValue::String(s) => {
                let len = char_len(s);
                if len > max {
                    // Wording is matched verbatim by existing callers.
                    Err(ValidationError::new(
                        field,
                        format!(
                            "{} length ({}) length is higher than maximim length ({})",
                            field, len, max
                        ),
                    )
                    .with_constraint("max")
                    .with_value(s.clone())
                    .into())
                } else {
                    Ok(())
                }
            }
            FieldValue::Null => Ok(()),
            _ => Err(unsupported(self.name(), field, value)),
        }
    }
}

/// `username`: letters, digits, `_`, `.` and `-` only. Length is left to
/// `min`/`max`.
pub struct Username;

impl Rule for Username {
    fn name(&self) -> &'static str {
        "username"
    }

    fn accepts(&self, kind: ValueKind) -> bool {
        matches!(kind, ValueKind::String | ValueKind::Null)
    }

    fn check(&self, field: &str, value: &FieldValue, _param: Option<&Param>) -> Result<()> {
        match value {
            FieldValue::String(s) if is_valid_username(s) => Ok(()),
            FieldValue::String(s) => Err(ValidationError::new(field, format!("{} is invalid", field))
                .with_constraint("username")
                .with_value(s.clone())
                .into()),
            FieldValue::Null => Ok(()),
            _ => Err(unsupported(self.name(), field, value)),
        }
    }
}

/// `password`: requires a lowercase letter, an uppercase letter, a digit and
/// a symbol, reported in that order.
pub struct Password;

impl Rule for Password {
    fn name(&self) -> &'static str {
        "password"
    }

    fn accepts(&self, kind: ValueKind) -> bool {
        matches!(kind, ValueKind::String | ValueKind::Null)
    }

    fn check(&self, field: &str, value: &FieldValue, _param: Option<&Param>) -> Result<()> {
        match value {
            FieldValue::String(s) => match password_violation(s) {
                // The value is a secret; keep it out of the error.
                Some(message) => Err(ValidationError::new(field, message)
                    .with_constraint("password")
                    .into()),
                None => Ok(()),
            },
            FieldValue::Null => Ok(()),
            _ => Err(unsupported(self.name(), field, value)),
        }
    }
}

/// `email`: `local@domain.tld`.
pub struct Email;

impl Rule for Email {
    fn name(&self) -> &'static str {
        "email"
    }

    fn accepts(&self, kind: ValueKind) -> bool {
        matches!(kind, ValueKind::String | ValueKind::Null)
    }

    fn check(&self, field: &str, value: &FieldValue, _param: Option<&Param>) -> Result<()> {
        match value {
            FieldValue::String(s) if is_valid_email(s) => Ok(()),
            FieldValue::String(s) => Err(ValidationError::new(field, EMAIL_MESSAGE)
                .with_constraint("email")
                .with_value(s.clone())
                .into()),
            FieldValue::Null => Ok(()),
            _ => Err(unsupported(self.name(), field, value)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(rule: &dyn Rule, field: &str, value: FieldValue, param: Option<i64>) -> Option<String> {
        let param = param.map(Param::Int);
        match rule.check(field, &value, param.as_ref()) {
            Ok(()) => None,
            Err(Error::Invalid(e)) => Some(e.message),
            Err(other) => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_required() {
        assert_eq!(message(&Required, "Username", "".into(), None).as_deref(), Some("Username is required"));
        assert_eq!(message(&Required, "Age", 0i64.into(), None).as_deref(), Some("Age is required"));
        assert_eq!(message(&Required, "Age", FieldValue::Null, None).as_deref(), Some("Age is required"));
        assert_eq!(message(&Required, "Age", 18i64.into(), None), None);
        assert_eq!(message(&Required, "Name", " ".into(), None), None);
    }

    #[test]
    fn test_min_length_boundaries() {
        assert_eq!(message(&Min, "Username", "abc".into(), Some(3)), None);
        assert_eq!(
            message(&Min, "Username", "ab".into(), Some(3)).as_deref(),
            Some("Username length (2) is lower than minimum length (3)")
        );
    }

    #[test]
    fn test_max_length_boundaries() {
        assert_eq!(message(&Max, "Username", "abc".into(), Some(3)), None);
        assert_eq!(
            message(&Max, "Username", "abcd".into(), Some(3)).as_deref(),
            Some("Username length (4) length is higher than maximim length (3)")
        );
    }

    #[test]
    fn test_length_counts_characters_not_bytes() {
        // Four characters, eight bytes.
        assert_eq!(message(&Max, "Name", "ßßßß".into(), Some(4)), None);
        assert_eq!(
            message(&Min, "Name", "żółw".into(), Some(5)).as_deref(),
            Some("Name length (4) is lower than minimum length (5)")
        );
    }

    #[test]
    fn test_numeric_min() {
        assert_eq!(message(&Min, "Age", 18i64.into(), Some(18)), None);
        assert_eq!(
            message(&Min, "Age", 17i64.into(), Some(18)).as_deref(),
            Some("Age value (17) is lower than minimum value (18)")
        );
        assert_eq!(
            message(&Min, "Score", 2.5.into(), Some(3)).as_deref(),
            Some("Score value (2.5) is lower than minimum value (3)")
        );
    }

    #[test]
    fn test_null_passes_non_presence_rules() {
        for rule in [&Min as &dyn Rule, &Max, &Username, &Password, &Email] {
            assert_eq!(message(rule, "Field", FieldValue::Null, Some(3)), None, "{}", rule.name());
        }
    }

    #[test]
    fn test_wrong_kind_is_config_error() {
        let err = Max.check("Age", &FieldValue::Int(40), Some(&Param::Int(3))).unwrap_err();
        assert!(err.is_config());

        let err = Min.check("Active", &FieldValue::Bool(true), Some(&Param::Int(1))).unwrap_err();
        assert!(matches!(err, Error::Config(ConfigError::UnsupportedKind { kind: ValueKind::Bool, .. })));

        let err = Min.check("Age", &FieldValue::Int(40), None).unwrap_err();
        assert!(matches!(err, Error::Config(ConfigError::MissingParameter { .. })));
    }

    #[test]
    fn test_username_shape() {
        assert!(is_valid_username("johndoe"));
        assert!(is_valid_username("john.doe_99-x"));
        assert!(!is_valid_username(""));
        assert!(!is_valid_username("john doe"));
        assert!(!is_valid_username("john@doe"));
        assert_eq!(
            message(&Username, "Username", "jo hn".into(), None).as_deref(),
            Some("Username is invalid")
        );
    }

    #[test]
    fn test_password_order() {
        assert_eq!(password_violation("Password123@"), None);
        assert_eq!(password_violation("PASSWORD123@"), Some(PASSWORD_LOWERCASE_MESSAGE));
        assert_eq!(password_violation("password123@"), Some(PASSWORD_UPPERCASE_MESSAGE));
        assert_eq!(password_violation("Password@"), Some(PASSWORD_NUMBER_MESSAGE));
        assert_eq!(password_violation("Password123"), Some(PASSWORD_SYMBOL_MESSAGE));
        // Missing everything but lowercase: uppercase is reported first.
        assert_eq!(password_violation("password"), Some(PASSWORD_UPPERCASE_MESSAGE));
    }

    #[test]
    fn test_password_non_ascii_letters() {
        assert_eq!(password_violation("École123@"), None);
        assert_eq!(password_violation("éCOLE123@"), None);
        assert_eq!(password_violation("ÉCOLE123@"), Some(PASSWORD_LOWERCASE_MESSAGE));
        assert_eq!(password_violation("école123@"), Some(PASSWORD_UPPERCASE_MESSAGE));
    }

    #[test]
    fn test_password_symbol_set() {
        for symbol in PASSWORD_SYMBOLS {
            assert_eq!(password_violation(&format!("Passw0rd{}", symbol)), None);
        }
        assert_eq!(password_violation("Passw0rd-"), Some(PASSWORD_SYMBOL_MESSAGE));
        assert_eq!(password_violation("Passw0rd?"), Some(PASSWORD_SYMBOL_MESSAGE));
    }

    #[test]
    fn test_password_error_omits_value() {
        let err = Password.check("Password", &"weak".into(), None).unwrap_err();
        match err {
            Error::Invalid(e) => assert_eq!(e.value, None),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_email_shape() {
        assert!(is_valid_email("john_doe@protonmail.com"));
        assert!(is_valid_email("user.name+tag@mail.example.co.uk"));

        assert!(!is_valid_email("john_doeprotonmail.com"));
        assert!(!is_valid_email("john_doe@protonmailcom"));
        assert!(!is_valid_email("john_doe@protonmail.c"));
        assert!(!is_valid_email("@protonmail.com"));
        assert!(!is_valid_email("john@doe@protonmail.com"));
        assert!(!is_valid_email("john@.com"));
        assert!(!is_valid_email("john@protonmail..com"));
        assert!(!is_valid_email("john doe@protonmail.com"));

        assert_eq!(
            message(&Email, "Email", "nope".into(), None).as_deref(),
            Some("e-mail is invalid")
        );
    }
}
