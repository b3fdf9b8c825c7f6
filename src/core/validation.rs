//! Structural validation of inventory entries
//!
//! Runs before any resolver. Errors reject the entry; warnings are collected
//! into the compile report. Document-wide rules (duplicate names) are applied
//! by the document compiler.

use super::detect::SchemaMode;
use super::field::FieldResolver;
use crate::config::schema::is_valid_interval;
use crate::domain::{Engine, EntryError, PasswordSource, Provider};
use regex::Regex;
use serde_json::Value;
use std::net::IpAddr;
use std::sync::OnceLock;

const SSL_MODES: &[&str] = &[
    "disable",
    "allow",
    "prefer",
    "require",
    "verify-ca",
    "verify-full",
];

const PORT_FIELDS: &[&str] = &["connection.port", "port"];
const SSL_MODE_FIELDS: &[&str] = &["connection.ssl_mode", "sslmode", "ssl_mode"];
const NAME_FIELDS: &[&str] = &["name", "service_name"];
const HOST_FIELDS: &[&str] = &[
    "connection.host",
    "connection.endpoint",
    "connection.cluster_endpoint",
    "host",
];

/// Flat legacy fields and the nested fields that shadow them
const SHADOWED: &[(&str, &str)] = &[
    ("host", "connection.host"),
    ("port", "connection.port"),
    ("database", "connection.database"),
    ("sslmode", "connection.ssl_mode"),
    ("user", "credentials.username"),
    ("password", "credentials.password"),
    ("tls_enabled", "tls.enabled"),
    ("tls_ca", "tls.ca_bundle_file"),
    ("interval", "monitoring.interval"),
    ("timeout", "monitoring.timeout"),
];

const MAX_SQL_QUERY_LENGTH: u64 = 10_000;
const MAX_QUERY_TIMEOUT: f64 = 3600.0;

/// Advisory monitoring knobs that are range checked but not emitted
const NUMERIC_RANGES: &[(&str, &[&str], f64, f64)] = &[
    (
        "max_sample_rate",
        &["monitoring.max_sample_rate", "max_sample_rate"],
        0.0,
        1.0,
    ),
    (
        "query_timeout",
        &["monitoring.query_timeout", "query_timeout"],
        1.0,
        MAX_QUERY_TIMEOUT,
    ),
];

fn name_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[a-zA-Z0-9][a-zA-Z0-9_-]*$").expect("name pattern is valid")
    })
}

fn secrets_manager_key_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[a-zA-Z0-9/_\-+=.@]+$").expect("secrets manager key pattern is valid")
    })
}

fn hostname_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(
            r"^[a-zA-Z0-9]([a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(\.[a-zA-Z0-9]([a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$",
        )
        .expect("hostname pattern is valid")
    })
}

fn ssm_key_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^/[a-zA-Z0-9/_\-.]+$").expect("ssm key pattern is valid")
    })
}

/// Validates one entry read from the `engine` list
///
/// Returns the advisory warnings for the entry. The schema mode only decides
/// which warnings apply. Blank strings count as absent, as they do for the
/// resolvers.
///
/// # Errors
///
/// Returns [`EntryError::Validation`] for the first structural problem found.
pub fn validate(
    engine: Engine,
    entry: &Value,
    mode: SchemaMode,
) -> Result<Vec<String>, EntryError> {
    if !entry.is_object() {
        return Err(invalid("entry must be a mapping"));
    }
    let fields = FieldResolver::new(entry);

    validate_type(engine, &fields)?;
    let provider = validate_provider(&fields)?;

    if fields.has("enabled") && fields.boolean(&["enabled"]).is_none() {
        return Err(invalid("'enabled' must be a boolean"));
    }

    validate_hosts(&fields)?;
    validate_port(&fields)?;

    if let Some(mode) = present(&fields, SSL_MODE_FIELDS) {
        let mode = mode.as_str().unwrap_or_default();
        if !SSL_MODES.contains(&mode) {
            return Err(invalid(format!(
                "invalid ssl_mode '{mode}' - must be one of: {}",
                SSL_MODES.join(", ")
            )));
        }
    }

    for (label, candidates) in [
        ("interval", &["monitoring.interval", "interval"][..]),
        ("timeout", &["monitoring.timeout", "timeout"][..]),
        (
            "query_metrics_interval",
            &["monitoring.query_metrics_interval", "query_metrics_interval"][..],
        ),
    ] {
        if let Some(value) = present(&fields, candidates) {
            let text = value.as_str().unwrap_or_default();
            if !is_valid_interval(text) {
                return Err(invalid(format!(
                    "invalid {label} '{}' - expected a duration like 30s, 5m or 1h",
                    display(value)
                )));
            }
        }
    }

    if let Some(value) = present(
        &fields,
        &["monitoring.max_sql_query_length", "max_sql_query_length"],
    ) {
        let valid = fields
            .integer(&["monitoring.max_sql_query_length", "max_sql_query_length"])
            .is_some_and(|n| (1..=MAX_SQL_QUERY_LENGTH).contains(&n));
        if !valid {
            return Err(invalid(format!(
                "invalid max_sql_query_length '{}' - must be 1-{MAX_SQL_QUERY_LENGTH}",
                display(value)
            )));
        }
    }

    for (label, candidates, min, max) in NUMERIC_RANGES {
        if let Some(value) = present(&fields, candidates) {
            if !as_number(value).is_some_and(|n| (*min..=*max).contains(&n)) {
                return Err(invalid(format!(
                    "invalid {label} '{}' - must be a number between {min} and {max}",
                    display(value)
                )));
            }
        }
    }

    if let Some(name) = fields.non_empty_string(NAME_FIELDS) {
        if !name_pattern().is_match(&name) {
            return Err(invalid(format!(
                "invalid name '{name}' - must start with a letter or digit and contain only letters, digits, '_' or '-'"
            )));
        }
    }

    validate_secret_key(&fields)?;

    Ok(warnings(&fields, provider, mode))
}

fn invalid(message: impl Into<String>) -> EntryError {
    EntryError::Validation(message.into())
}

/// First candidate that is present and not a blank string
fn present<'a>(fields: &FieldResolver<'a>, candidates: &[&str]) -> Option<&'a Value> {
    candidates
        .iter()
        .filter_map(|path| fields.lookup(path))
        .find(|value| !value.as_str().is_some_and(|s| s.trim().is_empty()))
}

fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn display(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn validate_type(engine: Engine, fields: &FieldResolver<'_>) -> Result<(), EntryError> {
    let Some(value) = present(fields, &["type"]) else {
        return Ok(());
    };
    let declared = value
        .as_str()
        .and_then(|s| s.parse::<Engine>().ok())
        .ok_or_else(|| invalid(format!("unknown type '{}'", display(value))))?;
    if declared != engine {
        return Err(invalid(format!(
            "type '{declared}' does not match list '{}'",
            engine.list_key()
        )));
    }
    Ok(())
}

fn validate_provider(fields: &FieldResolver<'_>) -> Result<Option<Provider>, EntryError> {
    match fields.first(&["provider"]) {
        None => Ok(None),
        Some(Value::String(s)) if s.trim().is_empty() => Ok(None),
        Some(Value::String(s)) => s.parse::<Provider>().map(Some).map_err(invalid),
        Some(other) => Err(invalid(format!("invalid provider '{other}'"))),
    }
}

fn validate_hosts(fields: &FieldResolver<'_>) -> Result<(), EntryError> {
    for path in HOST_FIELDS {
        let Some(host) = fields.non_empty_string(&[*path]) else {
            continue;
        };
        if host.parse::<IpAddr>().is_err() && !hostname_pattern().is_match(&host) {
            return Err(invalid(format!(
                "invalid host '{host}' - must be an IP address or a hostname"
            )));
        }
    }
    Ok(())
}

fn validate_port(fields: &FieldResolver<'_>) -> Result<(), EntryError> {
    let Some(value) = present(fields, PORT_FIELDS) else {
        return Ok(());
    };
    let port = match value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse::<u64>().ok(),
        _ => None,
    };
    match port {
        Some(p) if (1..=65535).contains(&p) => Ok(()),
        _ => Err(invalid(format!(
            "invalid port '{}' - must be 1-65535",
            display(value)
        ))),
    }
}

fn validate_secret_key(fields: &FieldResolver<'_>) -> Result<(), EntryError> {
    let source = fields
        .non_empty_string(&["credentials.password_source"])
        .and_then(|s| s.parse::<PasswordSource>().ok());
    let Some(key) = fields.non_empty_string(&["credentials.password_key"]) else {
        return Ok(());
    };

    match source {
        Some(PasswordSource::SecretsManager) if !secrets_manager_key_pattern().is_match(&key) => {
            Err(invalid(format!("invalid Secrets Manager key '{key}'")))
        }
        Some(PasswordSource::SsmParameter) if !ssm_key_pattern().is_match(&key) => Err(invalid(
            format!("invalid SSM parameter name '{key}' - must start with '/'"),
        )),
        _ => Ok(()),
    }
}

fn warnings(fields: &FieldResolver<'_>, provider: Option<Provider>, mode: SchemaMode) -> Vec<String> {
    let mut warnings = Vec::new();

    let source = fields.non_empty_string(&["credentials.password_source"]);
    let plaintext = source
        .as_deref()
        .map_or(true, |s| s.parse::<PasswordSource>() == Ok(PasswordSource::PlainText));
    if plaintext && fields.first(&["credentials.password", "password"]).is_some() {
        warnings.push("plaintext password in inventory; prefer env_var or an AWS secret source".to_string());
    }

    let hosts: Vec<&str> = HOST_FIELDS
        .iter()
        .copied()
        .filter(|path| fields.non_empty_string(&[*path]).is_some())
        .collect();
    if hosts.len() > 1 {
        warnings.push(format!("multiple host fields set: {}", hosts.join(", ")));
    }

    if mode == SchemaMode::Enhanced {
        if provider.is_none() {
            warnings.push("no provider set, assuming standalone".to_string());
        }
        for (flat, nested) in SHADOWED {
            if fields.has(flat) && fields.has(nested) {
                warnings.push(format!("'{flat}' is shadowed by '{nested}'"));
            }
        }
    }

    warnings
}
