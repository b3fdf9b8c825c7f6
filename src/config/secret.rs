//! Literal passwords read from an inventory
//!
//! A `password` field is wrapped in `secrecy::Secret` the moment the
//! credential resolver reads it. `Debug` prints a redaction marker and the
//! bytes are zeroed on drop. The text is only written out when the
//! integrations document is rendered, where the agent needs it verbatim.
//!
//! # Example
//!
//! ```rust
//! use dbmon::config::secret_string;
//! use secrecy::ExposeSecret;
//!
//! let password = secret_string("p@ss:word".to_string());
//! assert_eq!(password.expose_secret(), "p@ss:word");
//! assert!(!format!("{password:?}").contains("p@ss"));
//! ```

use secrecy::{CloneableSecret, DebugSecret, Secret, SerializableSecret};
use serde::{Serialize, Serializer};
use std::fmt;
use zeroize::Zeroize;

/// Password text, zeroed on drop
#[derive(Clone, Debug, PartialEq, Eq, Zeroize)]
#[zeroize(drop)]
pub struct SecretValue(String);

impl CloneableSecret for SecretValue {}
impl DebugSecret for SecretValue {}
impl SerializableSecret for SecretValue {}

impl PartialEq<str> for SecretValue {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl fmt::Display for SecretValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for SecretValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

/// A literal password; `Debug` is redacted
pub type SecretString = Secret<SecretValue>;

/// Wraps a literal password
pub fn secret_string(value: String) -> SecretString {
    Secret::new(SecretValue(value))
}
