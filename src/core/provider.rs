//! Provider resolution: host, port and capability flags
//!
//! Capabilities come from a fixed table keyed by provider and feed the TLS
//! and monitoring resolvers. They are plain data and never mutated.

use super::field::FieldResolver;
use crate::domain::{EntryError, Provider};

/// CA bundle shipped for RDS and Aurora endpoints
pub const RDS_CA_BUNDLE_PATH: &str = "/etc/ssl/certs/rds-global-bundle.pem";

/// What a provider supports out of the box
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities {
    /// TLS is on unless the entry turns it off
    pub default_tls: bool,

    /// CloudWatch metrics are available
    pub cloudwatch: bool,

    /// Reader endpoints can be monitored separately
    pub reader_monitoring: bool,

    /// CA bundle used when TLS is on and no bundle is given
    pub default_ca_bundle: Option<&'static str>,
}

const STANDALONE: Capabilities = Capabilities {
    default_tls: false,
    cloudwatch: false,
    reader_monitoring: false,
    default_ca_bundle: None,
};

const RDS: Capabilities = Capabilities {
    default_tls: true,
    cloudwatch: true,
    reader_monitoring: false,
    default_ca_bundle: Some(RDS_CA_BUNDLE_PATH),
};

const AURORA: Capabilities = Capabilities {
    default_tls: true,
    cloudwatch: true,
    reader_monitoring: true,
    default_ca_bundle: Some(RDS_CA_BUNDLE_PATH),
};

/// Looks up the capability table
pub fn capabilities(provider: Provider) -> Capabilities {
    match provider {
        Provider::Standalone => STANDALONE,
        Provider::Rds => RDS,
        Provider::Aurora => AURORA,
    }
}

/// Resolved network location of an entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedEndpoint {
    /// Hostname or endpoint the agent connects to
    pub host: String,

    /// TCP port
    pub port: u16,

    /// Capability flags of the provider
    pub capabilities: Capabilities,
}

/// Host candidates in priority order for a provider
fn host_fields(provider: Provider) -> &'static [&'static str] {
    match provider {
        Provider::Rds | Provider::Aurora => &[
            "connection.endpoint",
            "connection.cluster_endpoint",
            "connection.host",
            "host",
        ],
        Provider::Standalone => &["connection.host", "host", "connection.endpoint"],
    }
}

/// Resolves host, port and capabilities
///
/// # Errors
///
/// Returns [`EntryError::Resolution`] when no host candidate holds a
/// non-empty value, and [`EntryError::Validation`] for a port outside
/// 1..=65535.
pub fn resolve(
    provider: Provider,
    fields: &FieldResolver<'_>,
    default_port: u16,
) -> Result<ResolvedEndpoint, EntryError> {
    let host = fields
        .non_empty_string(host_fields(provider))
        .map(|h| h.trim().to_string())
        .ok_or_else(|| {
            EntryError::Resolution(format!("no host specified for {provider} provider"))
        })?;

    let port = match fields.integer(&["connection.port", "port"]) {
        Some(p) => u16::try_from(p)
            .ok()
            .filter(|p| *p > 0)
            .ok_or_else(|| {
                EntryError::Validation(format!("invalid port '{p}' - must be 1-65535"))
            })?,
        None => default_port,
    };

    Ok(ResolvedEndpoint {
        host,
        port,
        capabilities: capabilities(provider),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};
    use test_case::test_case;

    fn run(provider: Provider, entry: Value) -> Result<ResolvedEndpoint, EntryError> {
        resolve(provider, &FieldResolver::new(&entry), 3306)
    }

    #[test_case(Provider::Standalone, false, false, false)]
    #[test_case(Provider::Rds, true, true, false)]
    #[test_case(Provider::Aurora, true, true, true)]
    fn test_capability_table(provider: Provider, tls: bool, cloudwatch: bool, readers: bool) {
        let caps = capabilities(provider);
        assert_eq!(caps.default_tls, tls);
        assert_eq!(caps.cloudwatch, cloudwatch);
        assert_eq!(caps.reader_monitoring, readers);
        assert_eq!(caps.default_ca_bundle.is_some(), provider.is_managed());
    }

    #[test]
    fn test_managed_prefers_endpoint() {
        let ep = run(
            Provider::Rds,
            json!({"connection": {
                "endpoint": "db.abc.rds.amazonaws.com",
                "cluster_endpoint": "cluster.rds.amazonaws.com",
                "host": "10.0.0.1"
            }}),
        )
        .unwrap();
        assert_eq!(ep.host, "db.abc.rds.amazonaws.com");
    }

    #[test]
    fn test_aurora_cluster_endpoint() {
        let ep = run(
            Provider::Aurora,
            json!({"connection": {"cluster_endpoint": "db1.cluster.local"}}),
        )
        .unwrap();
        assert_eq!(ep.host, "db1.cluster.local");
        assert_eq!(ep.port, 3306);
        assert!(ep.capabilities.reader_monitoring);
    }

    #[test]
    fn test_standalone_prefers_host() {
        let ep = run(
            Provider::Standalone,
            json!({"connection": {"host": "nested.local", "endpoint": "ep.local"}, "host": "flat.local"}),
        )
        .unwrap();
        assert_eq!(ep.host, "nested.local");
    }

    #[test]
    fn test_legacy_host_and_port() {
        let ep = run(Provider::Standalone, json!({"host": "flat.local", "port": 3307})).unwrap();
        assert_eq!(ep.host, "flat.local");
        assert_eq!(ep.port, 3307);
    }

    #[test]
    fn test_nested_port_wins() {
        let ep = run(
            Provider::Standalone,
            json!({"host": "h", "port": 1, "connection": {"port": 2}}),
        )
        .unwrap();
        assert_eq!(ep.port, 2);
    }

    #[test]
    fn test_missing_host() {
        let err = run(Provider::Standalone, json!({"connection": {"host": ""}})).unwrap_err();
        assert!(matches!(err, EntryError::Resolution(_)));
    }

    #[test]
    fn test_port_out_of_range() {
        let err = run(Provider::Standalone, json!({"host": "h", "port": 70000})).unwrap_err();
        assert!(matches!(err, EntryError::Validation(_)));
    }
}
