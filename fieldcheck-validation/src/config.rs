// Validator configuration

use fieldcheck_log::warn;
use serde::{Deserialize, Serialize};
use std::env;

/// How many failures a validation pass reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationMode {
    /// Stop at the first failing field and report it alone
    #[default]
    FailFast,
    /// Check every field and report one failure per failing field
    CollectAll,
}

impl ValidationMode {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "fail_fast" | "failfast" | "first" => Some(ValidationMode::FailFast),
            "collect_all" | "collectall" | "all" => Some(ValidationMode::CollectAll),
            _ => None,
        }
    }
}

/// Settings for a [`Validator`](crate::Validator).
///
/// ```
/// use fieldcheck_validation::{ValidationMode, ValidatorConfig};
///
/// let config = ValidatorConfig::from_json(r#"{ "mode": "collect_all" }"#).unwrap();
/// assert_eq!(config.mode, ValidationMode::CollectAll);
/// assert!(config.log_failures);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidatorConfig {
    pub mode: ValidationMode,
    /// Emit a debug line for every failure
    pub log_failures: bool,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            mode: ValidationMode::FailFast,
            log_failures: true,
        }
    }
}

impl ValidatorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_mode(mut self, mode: ValidationMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_log_failures(mut self, enabled: bool) -> Self {
        self.log_failures = enabled;
        self
    }

    /// Read `FIELDCHECK_VALIDATION_MODE` and `FIELDCHECK_LOG_FAILURES`.
    /// Unset or unrecognised values keep their defaults.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(raw) = env::var("FIELDCHECK_VALIDATION_MODE") {
            match ValidationMode::parse(&raw) {
                Some(mode) => config.mode = mode,
                None => warn!("ignoring FIELDCHECK_VALIDATION_MODE={}", raw),
            }
        }

        if let Ok(raw) = env::var("FIELDCHECK_LOG_FAILURES") {
            config.log_failures = raw == "1" || raw.eq_ignore_ascii_case("true");
        }

        config
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}
