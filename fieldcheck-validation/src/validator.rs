// Validation coordinator

use crate::walker::check_field;
use crate::{Error, FieldDescriptor, Fields, Result, RuleRegistry, ValidationErrors, ValidationMode, ValidatorConfig};
use fieldcheck_log::debug;
use std::sync::Arc;

const TARGET: &str = "fieldcheck::validator";

/// Runs a record's fields through the rule registry.
///
/// Cheap to clone; the registry is shared.
#[derive(Debug, Clone)]
pub struct Validator {
    registry: Arc<RuleRegistry>,
    config: ValidatorConfig,
}

impl Default for Validator {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator {
    /// Built-in rules, fail-fast.
    pub fn new() -> Self {
        Self {
            registry: RuleRegistry::global(),
            config: ValidatorConfig::default(),
        }
    }

    pub fn with_config(config: ValidatorConfig) -> Self {
        Self {
            registry: RuleRegistry::global(),
            config,
        }
    }

    /// Built-in rules, configured from `FIELDCHECK_*` variables.
    pub fn from_env() -> Self {
        Self::with_config(ValidatorConfig::from_env())
    }

    /// Replace the rule registry.
    pub fn with_registry(mut self, registry: impl Into<Arc<RuleRegistry>>) -> Self {
        self.registry = registry.into();
        self
    }

    pub fn registry(&self) -> &RuleRegistry {
        &self.registry
    }

    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    /// Validate according to the configured [`ValidationMode`].
    pub fn check<R: Fields + ?Sized>(&self, record: &R) -> Result<()> {
        match self.config.mode {
            ValidationMode::FailFast => self.validate(record),
            ValidationMode::CollectAll => self.validate_all(record),
        }
    }

    /// Check fields in declaration order and return the first failure.
    pub fn validate<R: Fields + ?Sized>(&self, record: &R) -> Result<()> {
        for field in record.fields() {
            if let Err(error) = check_field(&field, &self.registry) {
                self.report(&field, &error);
                return Err(error);
            }
        }
        Ok(())
    }

    /// Check every field and return all failures, one per failing field.
    ///
    /// A configuration error still aborts the pass.
    pub fn validate_all<R: Fields + ?Sized>(&self, record: &R) -> Result<()> {
        let mut errors = ValidationErrors::default();

        for field in record.fields() {
            match check_field(&field, &self.registry) {
                Ok(()) => {}
                Err(error) => {
                    self.report(&field, &error);
                    collect(&mut errors, error)?;
                }
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            debug!(target: TARGET, "{} field(s) failed validation", errors.len());
            Err(Error::InvalidMany(errors))
        }
    }

    /// Check each field on its own task.
    ///
    /// Results are ordered by field index before one is picked, so the
    /// outcome matches [`check`](Self::check) regardless of which task
    /// finishes first.
    pub async fn validate_parallel<R: Fields + ?Sized>(&self, record: &R) -> Result<()> {
        use tokio::task::JoinSet;

        let fields = record.fields();
        let mut set = JoinSet::new();

        for (index, field) in fields.into_iter().enumerate() {
            let registry = Arc::clone(&self.registry);
            set.spawn(async move {
                let result = check_field(&field, &registry);
                (index, field, result)
            });
        }

        let mut failures = Vec::new();
        while let Some(joined) = set.join_next().await {
            let (index, field, result) = joined.map_err(|e| Error::Task(e.to_string()))?;
            if let Err(error) = result {
                failures.push((index, field, error));
            }
        }
        failures.sort_by_key(|(index, _, _)| *index);

        match self.config.mode {
            ValidationMode::FailFast => match failures.into_iter().next() {
                Some((_, field, error)) => {
                    self.report(&field, &error);
                    Err(error)
                }
                None => Ok(()),
            },
            ValidationMode::CollectAll => {
                let mut errors = ValidationErrors::default();
                for (_, field, error) in failures {
                    self.report(&field, &error);
                    collect(&mut errors, error)?;
                }
                if errors.is_empty() {
                    Ok(())
                } else {
                    Err(Error::InvalidMany(errors))
                }
            }
        }
    }

    fn report(&self, field: &FieldDescriptor, error: &Error) {
        if !self.config.log_failures {
            return;
        }
        match error {
            Error::Invalid(e) => debug!(
                target: TARGET,
                "field {} failed `{}`: {}", field.name, e.constraint, e.message
            ),
            other => debug!(target: TARGET, "field {} aborted: {}", field.name, other),
        }
    }
}

/// Add a validation failure to `errors`; anything else is passed back.
fn collect(errors: &mut ValidationErrors, error: Error) -> Result<()> {
    match error {
        Error::Invalid(e) => {
            errors.add(e);
            Ok(())
        }
        Error::InvalidMany(many) => {
            errors.errors.extend(many);
            Ok(())
        }
        other => Err(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ConfigError;

    fn user(username: &str, password: &str, email: &str, age: i64) -> Vec<FieldDescriptor> {
        vec![
            FieldDescriptor::new("Username", username, "required,username,min=3,max=32"),
            FieldDescriptor::new("Password", password, "required,password,min=7,max=32"),
            FieldDescriptor::new("Email", email, "required,email"),
            FieldDescriptor::new("Age", age, "required,min=18"),
        ]
    }

    #[test]
    fn test_fail_fast_reports_first_field() {
        let record = user("j", "weak", "nope", 3);
        let err = Validator::new().validate(&record).unwrap_err();
        assert_eq!(err.to_string(), "Username length (1) is lower than minimum length (3)");
    }

    #[test]
    fn test_collect_all_reports_each_failing_field_once() {
        let record = user("", "Password123@", "nope", 17);
        let err = Validator::new().validate_all(&record).unwrap_err();

        let Error::InvalidMany(errors) = err else {
            panic!("expected collected errors");
        };
        let messages: Vec<_> = errors.iter().map(|e| e.message.as_str()).collect();
        assert_eq!(
            messages,
            vec![
                "Username is required",
                "e-mail is invalid",
                "Age value (17) is lower than minimum value (18)",
            ]
        );
    }

    #[test]
    fn test_check_dispatches_on_mode() {
        let record = user("", "Password123@", "nope", 18);

        let fail_fast = Validator::new().check(&record).unwrap_err();
        assert!(matches!(fail_fast, Error::Invalid(_)));

        let collect = Validator::with_config(ValidatorConfig::new().with_mode(ValidationMode::CollectAll))
            .check(&record)
            .unwrap_err();
        assert!(matches!(collect, Error::InvalidMany(ref e) if e.len() == 2));
    }

    #[test]
    fn test_collect_all_aborts_on_config_error() {
        let mut record = user("", "Password123@", "john@doe.com", 18);
        record.push(FieldDescriptor::new("Nickname", "jd", "slug"));

        let err = Validator::new().validate_all(&record).unwrap_err();
        assert!(matches!(err, Error::Config(ConfigError::UnknownRule { .. })));
    }

    #[test]
    fn test_custom_registry_without_builtins() {
        let validator = Validator::new().with_registry(RuleRegistry::builder().build());
        let record = user("johndoe", "Password123@", "john@doe.com", 18);
        assert!(validator.validate(&record).unwrap_err().is_config());
    }

    #[tokio::test]
    async fn test_parallel_selects_by_declaration_order() {
        let record = user("johndoe", "Password123", "nope", 0);
        let err = Validator::new().validate_parallel(&record).await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "Password must contain at least one symbol\n(!, @, #, ~, $, %, ^, &, *, (, ), +, |, _, )"
        );
    }

    #[tokio::test]
    async fn test_parallel_matches_sequential() {
        let cases = [
            user("johndoe", "Password123@", "john_doe@protonmail.com", 18),
            user("j", "Password123@", "john_doe@protonmail.com", 18),
            user("johndoe", "Password123@", "john_doe@protonmail.c", 17),
            user("johndoe", "PASSWORD123@", "john_doe@protonmail.com", 0),
        ];

        let validator = Validator::new();
        for record in &cases {
            let sequential = validator.validate(record);
            let parallel = validator.validate_parallel(record).await;
            assert_eq!(sequential, parallel);
        }
    }

    #[tokio::test]
    async fn test_parallel_collect_all_is_ordered() {
        let record = user("", "password", "nope", 1);
        let validator = Validator::with_config(ValidatorConfig::new().with_mode(ValidationMode::CollectAll));

        let sequential = validator.validate_all(&record).unwrap_err();
        let parallel = validator.validate_parallel(&record).await.unwrap_err();
        assert_eq!(sequential, parallel);
    }
}
