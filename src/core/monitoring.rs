//! Monitoring options: intervals, query monitoring, custom queries and
//! provider-specific collection flags

use super::field::FieldResolver;
use super::provider::Capabilities;
use crate::config::CompileDefaults;
use crate::domain::{Engine, Provider};

/// Source of custom metric queries; exactly one applies per entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CustomQuery {
    /// Query text given inline in the inventory
    Inline(String),
    /// Query definition file named by the entry
    File(String),
    /// Engine default query file
    DefaultFile(String),
}

/// Flags that only exist for managed providers
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProviderMetrics {
    /// `METRICS_SOURCE`, set for providers with CloudWatch metrics
    pub metrics_source: Option<Provider>,

    /// `COLLECT_RDS_METRICS` (rds only)
    pub collect_rds_metrics: Option<bool>,

    /// `COLLECT_AURORA_METRICS` (aurora only)
    pub collect_aurora_metrics: Option<bool>,

    /// Reader endpoint to monitor (aurora only, when requested and known)
    pub reader_endpoint: Option<String>,
}

/// PostgreSQL-only collection settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostgresOptions {
    /// Collect table and index bloat metrics
    pub collect_bloat_metrics: bool,

    /// Collect lock metrics
    pub collect_db_lock_metrics: bool,

    /// Databases/schemas to collect from
    pub collection_list: String,
}

/// Resolved monitoring options of an entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedMonitoring {
    pub interval: String,
    pub timeout: String,
    pub metrics: bool,
    pub inventory: bool,
    pub extended_metrics: bool,
    pub enable_query_monitoring: bool,
    pub gather_query_samples: bool,
    pub query_metrics_interval: String,
    pub max_sql_query_length: u64,
    pub query_response_time_threshold: u64,
    pub query_count_threshold: u64,
    pub custom_query: CustomQuery,
    pub provider_metrics: ProviderMetrics,
    pub postgres: Option<PostgresOptions>,

    /// Non-fatal findings, e.g. reader monitoring without a reader endpoint
    pub warnings: Vec<String>,
}

/// Resolves monitoring options
pub fn resolve(
    engine: Engine,
    provider: Provider,
    fields: &FieldResolver<'_>,
    capabilities: &Capabilities,
    defaults: &CompileDefaults,
) -> ResolvedMonitoring {
    let mut warnings = Vec::new();

    let custom_query = if let Some(query) =
        fields.non_empty_string(&["monitoring.custom_metrics_query", "custom_metrics_query"])
    {
        CustomQuery::Inline(query)
    } else if let Some(path) = fields.non_empty_string(&[
        "monitoring.custom_metrics_query_file",
        "custom_metrics_query_file",
        "custom_metrics_config",
    ]) {
        CustomQuery::File(path)
    } else {
        CustomQuery::DefaultFile(defaults.custom_query_file(engine))
    };

    let provider_metrics = resolve_provider_metrics(provider, fields, capabilities, &mut warnings);

    let postgres = (engine == Engine::Postgresql).then(|| PostgresOptions {
        collect_bloat_metrics: fields.boolean_or(
            &["monitoring.collect_bloat_metrics", "collect_bloat_metrics"],
            true,
        ),
        collect_db_lock_metrics: fields.boolean_or(
            &["monitoring.collect_db_lock_metrics", "collect_db_lock_metrics"],
            true,
        ),
        collection_list: fields.string_or(
            &["monitoring.collection_list", "collection_list"],
            "ALL",
        ),
    });

    ResolvedMonitoring {
        interval: fields.string_or(&["monitoring.interval", "interval"], &defaults.interval),
        timeout: fields.string_or(&["monitoring.timeout", "timeout"], &defaults.timeout),
        metrics: fields.boolean_or(&["monitoring.metrics", "metrics"], true),
        inventory: fields.boolean_or(&["monitoring.inventory", "inventory"], true),
        extended_metrics: fields.boolean_or(
            &["monitoring.extended_metrics", "extended_metrics"],
            true,
        ),
        enable_query_monitoring: fields.boolean_or(
            &["monitoring.enable_query_monitoring", "enable_query_monitoring"],
            true,
        ),
        gather_query_samples: fields.boolean_or(
            &["monitoring.gather_query_samples", "gather_query_samples"],
            true,
        ),
        query_metrics_interval: fields.string_or(
            &["monitoring.query_metrics_interval", "query_metrics_interval"],
            &defaults.query_metrics_interval,
        ),
        max_sql_query_length: fields.integer_or(
            &["monitoring.max_sql_query_length", "max_sql_query_length"],
            defaults.max_sql_query_length,
        ),
        query_response_time_threshold: fields.integer_or(
            &[
                "monitoring.query_response_time_threshold",
                "query_response_time_threshold",
            ],
            defaults.query_response_time_threshold,
        ),
        query_count_threshold: fields.integer_or(
            &["monitoring.query_count_threshold", "query_count_threshold"],
            defaults.query_count_threshold,
        ),
        custom_query,
        provider_metrics,
        postgres,
        warnings,
    }
}

fn resolve_provider_metrics(
    provider: Provider,
    fields: &FieldResolver<'_>,
    capabilities: &Capabilities,
    warnings: &mut Vec<String>,
) -> ProviderMetrics {
    let mut metrics = ProviderMetrics {
        metrics_source: capabilities.cloudwatch.then_some(provider),
        ..ProviderMetrics::default()
    };

    match provider {
        Provider::Rds => {
            metrics.collect_rds_metrics = Some(fields.boolean_or(
                &["monitoring.collect_rds_metrics", "collect_rds_metrics"],
                capabilities.cloudwatch,
            ));
        }
        Provider::Aurora => {
            metrics.collect_aurora_metrics = Some(fields.boolean_or(
                &["monitoring.collect_aurora_metrics", "collect_aurora_metrics"],
                capabilities.cloudwatch,
            ));
        }
        Provider::Standalone => {}
    }

    let monitor_readers = fields.boolean_or(&["monitoring.monitor_readers", "monitor_readers"], false);
    if monitor_readers {
        if !capabilities.reader_monitoring {
            warnings.push(format!(
                "monitor_readers is only supported for aurora, ignored for {provider}"
            ));
        } else {
            match fields.non_empty_string(&["connection.reader_endpoint", "reader_endpoint"]) {
                Some(endpoint) => metrics.reader_endpoint = Some(endpoint),
                None => warnings.push(
                    "monitor_readers is enabled but no reader_endpoint is set, reader monitoring omitted"
                        .to_string(),
                ),
            }
        }
    }

    metrics
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::provider::capabilities;
    use serde_json::{json, Value};

    fn run(engine: Engine, provider: Provider, entry: Value) -> ResolvedMonitoring {
        resolve(
            engine,
            provider,
            &FieldResolver::new(&entry),
            &capabilities(provider),
            &CompileDefaults::default(),
        )
    }

    #[test]
    fn test_defaults() {
        let m = run(Engine::Mysql, Provider::Standalone, json!({}));
        assert_eq!(m.interval, "30s");
        assert_eq!(m.timeout, "10s");
        assert!(m.metrics && m.inventory && m.extended_metrics);
        assert!(m.enable_query_monitoring && m.gather_query_samples);
        assert_eq!(m.query_metrics_interval, "60s");
        assert_eq!(m.max_sql_query_length, 1000);
        assert_eq!(m.query_response_time_threshold, 500);
        assert_eq!(m.query_count_threshold, 20);
        assert_eq!(
            m.custom_query,
            CustomQuery::DefaultFile(
                "/etc/newrelic-infra/integrations.d/mysql-custom-queries.yml".to_string()
            )
        );
        assert_eq!(m.provider_metrics, ProviderMetrics::default());
        assert!(m.postgres.is_none());
        assert!(m.warnings.is_empty());
    }

    #[test]
    fn test_global_defaults_apply() {
        let defaults = CompileDefaults {
            interval: "15s".to_string(),
            max_sql_query_length: 2048,
            ..CompileDefaults::default()
        };
        let entry = json!({});
        let m = resolve(
            Engine::Mysql,
            Provider::Standalone,
            &FieldResolver::new(&entry),
            &capabilities(Provider::Standalone),
            &defaults,
        );
        assert_eq!(m.interval, "15s");
        assert_eq!(m.max_sql_query_length, 2048);
    }

    #[test]
    fn test_inline_query_beats_file() {
        let m = run(
            Engine::Mysql,
            Provider::Standalone,
            json!({"monitoring": {
                "custom_metrics_query": "SELECT 1",
                "custom_metrics_query_file": "/q.yml"
            }}),
        );
        assert_eq!(m.custom_query, CustomQuery::Inline("SELECT 1".to_string()));
    }

    #[test]
    fn test_file_query_beats_default() {
        let m = run(
            Engine::Postgresql,
            Provider::Standalone,
            json!({"monitoring": {"custom_metrics_query_file": "/q.yml"}}),
        );
        assert_eq!(m.custom_query, CustomQuery::File("/q.yml".to_string()));
    }

    #[test]
    fn test_nested_wins_over_flat() {
        let m = run(
            Engine::Mysql,
            Provider::Standalone,
            json!({"interval": "5m", "monitoring": {"interval": "1m"}, "timeout": "20s"}),
        );
        assert_eq!(m.interval, "1m");
        assert_eq!(m.timeout, "20s");
    }

    #[test]
    fn test_rds_flags() {
        let m = run(Engine::Mysql, Provider::Rds, json!({}));
        assert_eq!(m.provider_metrics.metrics_source, Some(Provider::Rds));
        assert_eq!(m.provider_metrics.collect_rds_metrics, Some(true));
        assert_eq!(m.provider_metrics.collect_aurora_metrics, None);
    }

    #[test]
    fn test_aurora_reader_monitoring() {
        let m = run(
            Engine::Postgresql,
            Provider::Aurora,
            json!({
                "connection": {"reader_endpoint": "db.cluster-ro.local"},
                "monitoring": {"monitor_readers": true, "collect_aurora_metrics": false}
            }),
        );
        assert_eq!(m.provider_metrics.metrics_source, Some(Provider::Aurora));
        assert_eq!(m.provider_metrics.collect_aurora_metrics, Some(false));
        assert_eq!(
            m.provider_metrics.reader_endpoint.as_deref(),
            Some("db.cluster-ro.local")
        );
        assert!(m.warnings.is_empty());
    }

    #[test]
    fn test_aurora_reader_without_endpoint_warns() {
        let m = run(
            Engine::Mysql,
            Provider::Aurora,
            json!({"monitoring": {"monitor_readers": true}}),
        );
        assert_eq!(m.provider_metrics.reader_endpoint, None);
        assert_eq!(m.warnings.len(), 1);
        assert!(m.warnings[0].contains("reader_endpoint"));
    }

    #[test]
    fn test_reader_monitoring_ignored_for_rds() {
        let m = run(
            Engine::Mysql,
            Provider::Rds,
            json!({
                "connection": {"reader_endpoint": "ro.local"},
                "monitoring": {"monitor_readers": true}
            }),
        );
        assert_eq!(m.provider_metrics.reader_endpoint, None);
        assert_eq!(m.warnings.len(), 1);
    }

    #[test]
    fn test_postgres_options() {
        let m = run(
            Engine::Postgresql,
            Provider::Standalone,
            json!({"monitoring": {"collect_bloat_metrics": false}}),
        );
        let pg = m.postgres.unwrap();
        assert!(!pg.collect_bloat_metrics);
        assert!(pg.collect_db_lock_metrics);
        assert_eq!(pg.collection_list, "ALL");
    }
}
