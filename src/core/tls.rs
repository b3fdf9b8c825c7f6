//! TLS resolution
//!
//! Every branch ends in a terminal default, so this resolver cannot fail.

use super::field::FieldResolver;
use super::provider::Capabilities;

/// Resolved TLS settings of an entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTls {
    /// Whether the agent connects over TLS
    pub enabled: bool,

    /// `SSLMODE` value
    pub mode: String,

    /// CA bundle path, when one applies
    pub ca_bundle_path: Option<String>,

    /// Whether the server certificate is verified
    pub verify_server_certificate: bool,
}

/// Resolves TLS settings from the entry and provider capabilities
pub fn resolve(fields: &FieldResolver<'_>, capabilities: &Capabilities) -> ResolvedTls {
    let enabled = fields.boolean_or(&["tls.enabled", "tls_enabled"], capabilities.default_tls);

    let mode = fields
        .non_empty_string(&["connection.ssl_mode", "sslmode", "ssl_mode"])
        .unwrap_or_else(|| if enabled { "require" } else { "disable" }.to_string());

    let ca_bundle_path = fields
        .non_empty_string(&["tls.ca_bundle_file", "tls_ca"])
        .or_else(|| {
            capabilities
                .default_ca_bundle
                .filter(|_| enabled)
                .map(str::to_string)
        });

    let verify_server_certificate = fields.boolean_or(&["tls.verify_server_certificate"], true);

    ResolvedTls {
        enabled,
        mode,
        ca_bundle_path,
        verify_server_certificate,
    }
}
