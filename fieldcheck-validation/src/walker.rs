// Per-field rule execution

use crate::{ConfigError, FieldDescriptor, Result, RuleInvocation, RuleRegistry, parse_spec};
use fieldcheck_log::{trace, warn};

const TARGET: &str = "fieldcheck::walker";

/// Run every rule in `field`'s spec, in order, stopping at the first failure.
///
/// Configuration errors (unknown rule, bad parameter, rule attached to a
/// value kind it does not support) are returned as
/// [`Error::Config`](crate::Error::Config).
pub fn check_field(field: &FieldDescriptor, registry: &RuleRegistry) -> Result<()> {
    let invocations = parse_spec(&field.name, field.spec(), registry).inspect_err(|e| {
        warn!(target: TARGET, "{}", e);
    })?;

    for invocation in &invocations {
        apply(field, invocation)?;
    }

    Ok(())
}

fn apply(field: &FieldDescriptor, invocation: &RuleInvocation) -> Result<()> {
    let rule = invocation.rule();
    // Declared kind, so an unusable rule is reported even when the value is
    // absent.
    let kind = field.kind();

    if !rule.accepts(kind) {
        let error = ConfigError::UnsupportedKind {
            field: field.name.clone(),
            rule: rule.name().to_string(),
            kind,
        };
        warn!(target: TARGET, "{}", error);
        return Err(error.into());
    }

    trace!(target: TARGET, "{}: checking {}", field.name, invocation);
    rule.check(&field.name, &field.value, invocation.param())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Error, FieldValue, ValueKind};

    fn check(field: FieldDescriptor) -> Result<()> {
        check_field(&field, &RuleRegistry::global())
    }

    #[test]
    fn test_passing_field() {
        assert!(check(FieldDescriptor::new("Username", "johndoe", "required,username,min=3,max=32")).is_ok());
    }

    #[test]
    fn test_unconstrained_field() {
        assert!(check(FieldDescriptor::unconstrained("Anything", FieldValue::Null)).is_ok());
    }

    #[test]
    fn test_first_failing_rule_wins() {
        // Empty also fails username and min; required comes first.
        let err = check(FieldDescriptor::new("Username", "", "required,username,min=3")).unwrap_err();
        assert_eq!(err.to_string(), "Username is required");

        // Same value, different order.
        let err = check(FieldDescriptor::new("Username", "", "min=3,required")).unwrap_err();
        assert_eq!(err.to_string(), "Username length (0) is lower than minimum length (3)");
    }

    #[test]
    fn test_unknown_rule_is_config_error() {
        let err = check(FieldDescriptor::new("Username", "johndoe", "required,slug")).unwrap_err();
        assert!(err.is_config());
    }

    #[test]
    fn test_config_error_wins_even_after_valid_rules() {
        // Parsing happens before any rule runs.
        let err = check(FieldDescriptor::new("Username", "", "required,min=x")).unwrap_err();
        assert!(matches!(err, Error::Config(ConfigError::InvalidParameter { .. })));
    }

    #[test]
    fn test_unsupported_kind_on_absent_value() {
        let field = FieldDescriptor::new("Quantity", FieldValue::Null, "max=3").with_kind(ValueKind::Int);
        let err = check(field).unwrap_err();
        assert_eq!(
            err,
            Error::Config(ConfigError::UnsupportedKind {
                field: "Quantity".into(),
                rule: "max".into(),
                kind: ValueKind::Int,
            })
        );

        // Undeclared and absent: nothing to object to.
        assert!(check(FieldDescriptor::new("Quantity", FieldValue::Null, "max=3")).is_ok());
    }

    #[test]
    fn test_unsupported_kind() {
        let err = check(FieldDescriptor::new("Age", 40i64, "email")).unwrap_err();
        assert_eq!(
            err,
            Error::Config(ConfigError::UnsupportedKind {
                field: "Age".into(),
                rule: "email".into(),
                kind: ValueKind::Int,
            })
        );
    }
}
