// Rule registry

use crate::validators::{Email, Max, Min, Password, Required, Username};
use crate::Rule;
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

static GLOBAL: Lazy<Arc<RuleRegistry>> = Lazy::new(|| Arc::new(RuleRegistry::builtin()));

/// Maps rule tokens to their implementations.
///
/// A registry is immutable once built; share it behind an `Arc`.
#[derive(Clone, Default)]
pub struct RuleRegistry {
    rules: HashMap<&'static str, Arc<dyn Rule>>,
}

impl RuleRegistry {
    /// The process-wide registry holding the built-in rules.
    pub fn global() -> Arc<RuleRegistry> {
        Arc::clone(&GLOBAL)
    }

    /// A fresh registry holding the built-in rules.
    pub fn builtin() -> Self {
        Self::builtin_builder().build()
    }

    /// An empty builder.
    pub fn builder() -> RuleRegistryBuilder {
        RuleRegistryBuilder::default()
    }

    /// A builder pre-loaded with `required`, `min`, `max`, `username`,
    /// `password` and `email`.
    pub fn builtin_builder() -> RuleRegistryBuilder {
        Self::builder()
            .rule(Required)
            .rule(Min)
            .rule(Max)
            .rule(Username)
            .rule(Password)
            .rule(Email)
    }

    pub fn lookup(&self, name: &str) -> Option<Arc<dyn Rule>> {
        self.rules.get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.rules.contains_key(name)
    }

    /// Registered tokens, sorted.
    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.rules.keys().copied().collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl fmt::Debug for RuleRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleRegistry")
            .field("rules", &self.names())
            .finish()
    }
}

/// Builder for [`RuleRegistry`]. Registering a token twice replaces the
/// earlier rule.
#[derive(Default)]
pub struct RuleRegistryBuilder {
    rules: HashMap<&'static str, Arc<dyn Rule>>,
}

impl RuleRegistryBuilder {
    pub fn rule<R: Rule + 'static>(self, rule: R) -> Self {
        self.shared_rule(Arc::new(rule))
    }

    pub fn shared_rule(mut self, rule: Arc<dyn Rule>) -> Self {
        self.rules.insert(rule.name(), rule);
        self
    }

    pub fn build(self) -> RuleRegistry {
        RuleRegistry { rules: self.rules }
    }
}
