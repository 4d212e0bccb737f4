//! Constraint spec parsing.
//!
//! A spec is a comma-separated list of rule tokens, each optionally carrying
//! a parameter after `=`:
//!
//! ```text
//! required,username,min=3,max=32
//! ```
//!
//! Whitespace around tokens, names and parameters is ignored, as are empty
//! tokens. Parsing resolves every name against a [`RuleRegistry`] and
//! converts parameters to the type the rule declares, so an invocation list
//! that parses can always be executed.

use crate::{ConfigError, Rule, RuleRegistry};
use std::fmt;
use std::sync::Arc;

/// Parameter shape a rule expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    /// No `=` allowed
    None,
    /// `=N` with N an `i64`
    Integer,
    /// `=text`, taken verbatim
    Text,
}

/// A parsed rule parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Param {
    Int(i64),
    Str(String),
}

impl Param {
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Param::Int(n) => Some(*n),
            Param::Str(_) => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Param::Str(s) => Some(s),
            Param::Int(_) => None,
        }
    }
}

impl fmt::Display for Param {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Param::Int(n) => write!(f, "{}", n),
            Param::Str(s) => f.write_str(s),
        }
    }
}

/// One resolved rule from a spec, with its parameter.
#[derive(Clone)]
pub struct RuleInvocation {
    rule: Arc<dyn Rule>,
    param: Option<Param>,
}

impl RuleInvocation {
    pub fn name(&self) -> &'static str {
        self.rule.name()
    }

    pub fn rule(&self) -> &dyn Rule {
        self.rule.as_ref()
    }

    pub fn param(&self) -> Option<&Param> {
        self.param.as_ref()
    }
}

impl fmt::Debug for RuleInvocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleInvocation")
            .field("name", &self.name())
            .field("param", &self.param)
            .finish()
    }
}

impl fmt::Display for RuleInvocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.param {
            Some(param) => write!(f, "{}={}", self.name(), param),
            None => f.write_str(self.name()),
        }
    }
}

/// Parse `raw` into invocations, in textual order.
///
/// `field` only labels configuration errors.
pub fn parse_spec(
    field: &str,
    raw: &str,
    registry: &RuleRegistry,
) -> Result<Vec<RuleInvocation>, ConfigError> {
    raw.split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(|token| parse_token(field, token, registry))
        .collect()
}

fn parse_token(
    field: &str,
    token: &str,
    registry: &RuleRegistry,
) -> Result<RuleInvocation, ConfigError> {
    let (name, raw_param) = match token.split_once('=') {
        Some((name, param)) => (name.trim(), Some(param.trim())),
        None => (token, None),
    };

    let rule = registry
        .lookup(name)
        .ok_or_else(|| ConfigError::UnknownRule {
            field: field.to_string(),
            rule: name.to_string(),
        })?;

    let param = match (rule.param_kind(), raw_param) {
        (ParamKind::None, None) => None,
        (ParamKind::None, Some(value)) => {
            return Err(ConfigError::UnexpectedParameter {
                field: field.to_string(),
                rule: name.to_string(),
                value: value.to_string(),
            });
        }
        (_, None) => {
            return Err(ConfigError::MissingParameter {
                field: field.to_string(),
                rule: name.to_string(),
            });
        }
        (ParamKind::Integer, Some(value)) => {
            let n = value
                .parse::<i64>()
                .map_err(|_| ConfigError::InvalidParameter {
                    field: field.to_string(),
                    rule: name.to_string(),
                    value: value.to_string(),
                })?;
            Some(Param::Int(n))
        }
        (ParamKind::Text, Some(value)) => Some(Param::Str(value.to_string())),
    };

    Ok(RuleInvocation { rule, param })
}
