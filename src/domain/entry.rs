//! Closed variant sets describing a database entry
//!
//! Inventories are loosely typed, so the raw entry stays a JSON object and is
//! read through the field resolver. The discriminators that drive branching
//! (engine, provider, password source) are parsed into the enums below so the
//! compiler can match on them exhaustively.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Database engine of an entry
///
/// Fixed by the inventory list the entry appears in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Engine {
    /// MySQL / MariaDB
    Mysql,
    /// PostgreSQL
    Postgresql,
}

impl Engine {
    /// All engines in output order
    pub const ALL: [Engine; 2] = [Engine::Mysql, Engine::Postgresql];

    /// Top-level document key holding entries of this engine
    pub fn list_key(self) -> &'static str {
        match self {
            Engine::Mysql => "mysql_databases",
            Engine::Postgresql => "postgresql_databases",
        }
    }

    /// Canonical lowercase name, used for the `database_type` label
    pub fn as_str(self) -> &'static str {
        match self {
            Engine::Mysql => "mysql",
            Engine::Postgresql => "postgresql",
        }
    }

    /// Name of the monitoring agent integration for this engine
    pub fn integration_name(self) -> &'static str {
        match self {
            Engine::Mysql => "nri-mysql",
            Engine::Postgresql => "nri-postgresql",
        }
    }

    /// Inventory source reported by the agent
    pub fn inventory_source(self) -> &'static str {
        match self {
            Engine::Mysql => "config/mysql",
            Engine::Postgresql => "config/postgresql",
        }
    }
}

impl fmt::Display for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Engine {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mysql" => Ok(Engine::Mysql),
            "postgresql" | "postgres" => Ok(Engine::Postgresql),
            other => Err(format!(
                "Invalid database type '{other}'. Must be one of: mysql, postgresql"
            )),
        }
    }
}

/// Hosting model of a database target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    /// Self-managed host (bare metal, EC2, container)
    #[default]
    Standalone,
    /// Amazon RDS instance
    Rds,
    /// Amazon Aurora cluster
    Aurora,
}

impl Provider {
    /// Canonical lowercase name, used for labels and `METRICS_SOURCE`
    pub fn as_str(self) -> &'static str {
        match self {
            Provider::Standalone => "standalone",
            Provider::Rds => "rds",
            Provider::Aurora => "aurora",
        }
    }

    /// Whether the database is managed by AWS
    pub fn is_managed(self) -> bool {
        matches!(self, Provider::Rds | Provider::Aurora)
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Provider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "standalone" | "container" | "ec2" => Ok(Provider::Standalone),
            "rds" => Ok(Provider::Rds),
            "aurora" => Ok(Provider::Aurora),
            other => Err(format!(
                "Invalid provider '{other}'. Must be one of: standalone, rds, aurora"
            )),
        }
    }
}

/// Mechanism by which the agent acquires the database password at runtime
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PasswordSource {
    /// Literal password in the inventory
    #[default]
    PlainText,
    /// Environment variable on the agent host
    EnvVar,
    /// AWS Secrets Manager secret
    SecretsManager,
    /// AWS SSM Parameter Store parameter
    SsmParameter,
}

impl FromStr for PasswordSource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "plaintext" | "plain" => Ok(PasswordSource::PlainText),
            "env_var" => Ok(PasswordSource::EnvVar),
            "aws_secrets_manager" => Ok(PasswordSource::SecretsManager),
            "aws_ssm_parameter" => Ok(PasswordSource::SsmParameter),
            other => Err(format!(
                "Invalid password_source '{other}'. Must be one of: plaintext, env_var, aws_secrets_manager, aws_ssm_parameter"
            )),
        }
    }
}
