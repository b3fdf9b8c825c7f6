//! Credential resolution
//!
//! Maps an entry's credential fields to a username and a [`SecretRef`].
//! Deferred sources never touch the secret backends; they only produce the
//! reference the agent resolves at runtime.

use super::field::FieldResolver;
use crate::config::secret_string;
use crate::domain::{EntryError, PasswordSource, SecretRef};

const USERNAME_FIELDS: &[&str] = &[
    "credentials.username",
    "credentials.user",
    "user",
    "username",
];
const PASSWORD_FIELDS: &[&str] = &["credentials.password", "password"];
const SOURCE_FIELDS: &[&str] = &["credentials.password_source"];

/// Username and password reference of one entry
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedCredentials {
    /// Database user the agent connects as
    pub username: String,

    /// Where the agent gets the password from
    pub secret: SecretRef,
}

/// Resolves the credentials of an entry
///
/// An absent `password_source` means plaintext.
///
/// # Errors
///
/// Returns [`EntryError::Credential`] when the username is missing, the
/// selected source lacks its key, or the source is unknown.
pub fn resolve(fields: &FieldResolver<'_>) -> Result<ResolvedCredentials, EntryError> {
    let username = fields
        .non_empty_string(USERNAME_FIELDS)
        .ok_or_else(|| EntryError::Credential("missing username".to_string()))?;

    let source = match fields.non_empty_string(SOURCE_FIELDS) {
        Some(raw) => raw.parse::<PasswordSource>().map_err(EntryError::Credential)?,
        None => PasswordSource::PlainText,
    };

    let secret = match source {
        PasswordSource::SecretsManager => SecretRef::SecretsManager {
            key: required_key(fields, "credentials.password_key", "aws_secrets_manager")?,
            region: fields.non_empty_string(&["credentials.region"]),
        },
        PasswordSource::SsmParameter => SecretRef::SsmParameter(required_key(
            fields,
            "credentials.password_key",
            "aws_ssm_parameter",
        )?),
        PasswordSource::EnvVar => {
            SecretRef::EnvVar(required_key(fields, "credentials.password_env", "env_var")?)
        }
        PasswordSource::PlainText => {
            let password = fields.string(PASSWORD_FIELDS).ok_or_else(|| {
                EntryError::Credential("missing password for plaintext source".to_string())
            })?;
            SecretRef::PlainText(secret_string(password))
        }
    };

    Ok(ResolvedCredentials { username, secret })
}

fn required_key(
    fields: &FieldResolver<'_>,
    path: &str,
    source: &str,
) -> Result<String, EntryError> {
    fields.non_empty_string(&[path]).ok_or_else(|| {
        let field = path.rsplit('.').next().unwrap_or(path);
        EntryError::Credential(format!("missing '{field}' for {source} source"))
    })
}
