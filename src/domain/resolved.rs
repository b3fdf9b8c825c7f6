//! Resolved, agent-consumable output records
//!
//! A [`ResolvedEntry`] is the fully defaulted form of one inventory entry. It
//! is created fresh per compilation run and never mutated afterwards; tests
//! compare entries by value.

use crate::config::SecretString;
use crate::domain::entry::{Engine, Provider};
use secrecy::ExposeSecret;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// Scalar value of an integration environment variable
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum EnvValue {
    /// Free-form string
    Str(String),
    /// Boolean flag
    Bool(bool),
    /// Non-negative integer
    Int(u64),
    /// Literal password; redacted in `Debug`, written verbatim to output
    Secret(SecretString),
}

impl EnvValue {
    /// Returns the value as the text the agent will see
    ///
    /// Secrets are exposed here; only call this when producing output.
    pub fn render(&self) -> String {
        match self {
            EnvValue::Str(s) => s.clone(),
            EnvValue::Bool(b) => b.to_string(),
            EnvValue::Int(i) => i.to_string(),
            EnvValue::Secret(secret) => secret.expose_secret().to_string(),
        }
    }

    /// Returns the boolean payload, if this is a flag
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            EnvValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the integer payload, if this is a number
    pub fn as_int(&self) -> Option<u64> {
        match self {
            EnvValue::Int(i) => Some(*i),
            _ => None,
        }
    }
}

impl PartialEq for EnvValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (EnvValue::Str(a), EnvValue::Str(b)) => a == b,
            (EnvValue::Bool(a), EnvValue::Bool(b)) => a == b,
            (EnvValue::Int(a), EnvValue::Int(b)) => a == b,
            (EnvValue::Secret(a), EnvValue::Secret(b)) => {
                a.expose_secret() == b.expose_secret()
            }
            _ => false,
        }
    }
}

impl From<&str> for EnvValue {
    fn from(s: &str) -> Self {
        EnvValue::Str(s.to_string())
    }
}

impl From<String> for EnvValue {
    fn from(s: String) -> Self {
        EnvValue::Str(s)
    }
}

impl From<bool> for EnvValue {
    fn from(b: bool) -> Self {
        EnvValue::Bool(b)
    }
}

impl From<u64> for EnvValue {
    fn from(i: u64) -> Self {
        EnvValue::Int(i)
    }
}

/// Reference to the database password
///
/// Only [`SecretRef::PlainText`] carries the password itself. The other
/// variants are deferred references that the agent resolves at runtime; they
/// render to bracketed placeholder tokens.
#[derive(Debug, Clone)]
pub enum SecretRef {
    /// Literal password
    PlainText(SecretString),
    /// Environment variable holding the password
    EnvVar(String),
    /// AWS Secrets Manager secret id, with optional region
    SecretsManager {
        /// Secret id or ARN
        key: String,
        /// Region the secret lives in, when not the agent default
        region: Option<String>,
    },
    /// AWS SSM Parameter Store parameter name
    SsmParameter(String),
}

impl SecretRef {
    /// Converts the reference to the `PASSWORD` environment value
    ///
    /// Token grammar: `${AWS_SECRET:<key>}`, `${AWS_SSM:<key>}`, `${<ENV_NAME>}`.
    pub fn to_env_value(&self) -> EnvValue {
        match self {
            SecretRef::PlainText(secret) => EnvValue::Secret(secret.clone()),
            SecretRef::EnvVar(name) => EnvValue::Str(format!("${{{name}}}")),
            SecretRef::SecretsManager { key, .. } => {
                EnvValue::Str(format!("${{AWS_SECRET:{key}}}"))
            }
            SecretRef::SsmParameter(key) => EnvValue::Str(format!("${{AWS_SSM:{key}}}")),
        }
    }

    /// Whether the password is stored in the inventory itself
    pub fn is_plaintext(&self) -> bool {
        matches!(self, SecretRef::PlainText(_))
    }
}

impl PartialEq for SecretRef {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (SecretRef::PlainText(a), SecretRef::PlainText(b)) => {
                a.expose_secret() == b.expose_secret()
            }
            (SecretRef::EnvVar(a), SecretRef::EnvVar(b)) => a == b,
            (
                SecretRef::SecretsManager { key: ka, region: ra },
                SecretRef::SecretsManager { key: kb, region: rb },
            ) => ka == kb && ra == rb,
            (SecretRef::SsmParameter(a), SecretRef::SsmParameter(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Display for SecretRef {
    /// Human-readable description that never contains a literal password
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SecretRef::PlainText(_) => f.write_str("plaintext"),
            SecretRef::EnvVar(name) => write!(f, "env_var({name})"),
            SecretRef::SecretsManager { key, .. } => write!(f, "aws_secrets_manager({key})"),
            SecretRef::SsmParameter(key) => write!(f, "aws_ssm_parameter({key})"),
        }
    }
}

/// One compiled integration block
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedEntry {
    /// Engine the block was compiled for
    #[serde(skip)]
    pub engine: Engine,

    /// Resolved hosting provider
    #[serde(skip)]
    pub provider: Provider,

    /// Identity of the database, also present as the `service_name` label
    #[serde(skip)]
    pub service_name: String,

    /// Agent integration identifier (`nri-mysql`, `nri-postgresql`)
    #[serde(rename = "name")]
    pub integration: String,

    /// Integration environment, sorted by key
    pub env: BTreeMap<String, EnvValue>,

    /// Collection interval
    pub interval: String,

    /// Collection timeout
    pub timeout: String,

    /// Labels attached to every sample, sorted by key
    pub labels: BTreeMap<String, String>,

    /// Inventory source reported by the agent
    pub inventory_source: String,
}

impl ResolvedEntry {
    /// Returns an environment value rendered as text
    pub fn env_text(&self, key: &str) -> Option<String> {
        self.env.get(key).map(EnvValue::render)
    }

    /// Returns a label value
    pub fn label(&self, key: &str) -> Option<&str> {
        self.labels.get(key).map(String::as_str)
    }
}
