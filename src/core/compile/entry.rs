//! Single-entry compilation
//!
//! Validation runs first, then the resolvers in a fixed order: provider,
//! credentials, TLS, monitoring, labels. The first failure rejects the entry.

use crate::config::CompileDefaults;
use crate::core::detect::SchemaMode;
use crate::core::field::FieldResolver;
use crate::core::monitoring::{CustomQuery, ResolvedMonitoring};
use crate::core::{credentials, labels, monitoring, provider, tls, validation};
use crate::domain::{Engine, EntryError, EnvValue, Provider, ResolvedEntry, SecretRef};
use serde_json::Value;
use std::collections::BTreeMap;

/// Default database for PostgreSQL entries without one
const DEFAULT_POSTGRES_DATABASE: &str = "postgres";

/// A compiled entry together with its advisory warnings
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledEntry {
    pub entry: ResolvedEntry,
    pub warnings: Vec<String>,
}

/// Explicit name of an entry, if it has one
pub fn explicit_name(entry: &Value) -> Option<String> {
    FieldResolver::new(entry).non_empty_string(&["name", "service_name"])
}

/// Compiles one entry read from the `engine` list
///
/// # Errors
///
/// Returns the [`EntryError`] of the first stage that fails.
pub fn compile_entry(
    engine: Engine,
    entry: &Value,
    mode: SchemaMode,
    defaults: &CompileDefaults,
) -> Result<CompiledEntry, EntryError> {
    let mut warnings = validation::validate(engine, entry, mode)?;
    let fields = FieldResolver::new(entry);

    let provider = match fields.non_empty_string(&["provider"]) {
        Some(raw) => raw.parse::<Provider>().map_err(EntryError::Validation)?,
        None => Provider::default(),
    };

    let endpoint = provider::resolve(provider, &fields, defaults.port_for(engine))?;
    let credentials = credentials::resolve(&fields)?;
    let tls = tls::resolve(&fields, &endpoint.capabilities);
    let monitoring = monitoring::resolve(engine, provider, &fields, &endpoint.capabilities, defaults);

    let service_name = explicit_name(entry)
        .unwrap_or_else(|| format!("{}-{}", provider.as_str(), endpoint.host));
    let environment = fields.string_or(&["labels.environment", "environment"], &defaults.environment);
    let labels = labels::compose(
        engine,
        provider,
        &service_name,
        &environment,
        fields.string_map(&["labels"]).as_ref(),
        fields.string_map(&["custom_labels"]).as_ref(),
    );

    let mut env: BTreeMap<String, EnvValue> = BTreeMap::new();
    env.insert("HOSTNAME".into(), endpoint.host.as_str().into());
    env.insert("PORT".into(), u64::from(endpoint.port).into());
    env.insert("USERNAME".into(), credentials.username.as_str().into());
    env.insert("PASSWORD".into(), credentials.secret.to_env_value());
    if let SecretRef::SecretsManager {
        region: Some(region),
        ..
    } = &credentials.secret
    {
        env.insert("AWS_REGION".into(), region.as_str().into());
    }

    let database = fields.non_empty_string(&["connection.database", "database"]);
    match (engine, database) {
        (_, Some(db)) => {
            env.insert("DATABASE".into(), db.into());
        }
        (Engine::Postgresql, None) => {
            env.insert("DATABASE".into(), DEFAULT_POSTGRES_DATABASE.into());
        }
        (Engine::Mysql, None) => {}
    }

    env.insert("SSLMODE".into(), tls.mode.as_str().into());
    env.insert("ENABLE_TLS".into(), tls.enabled.into());
    if let Some(bundle) = &tls.ca_bundle_path {
        env.insert("SSLROOTCERT".into(), bundle.as_str().into());
    }
    if tls.enabled {
        env.insert(
            "TRUST_SERVER_CERTIFICATE".into(),
            (!tls.verify_server_certificate).into(),
        );
    }

    insert_monitoring(&mut env, &monitoring);
    warnings.extend(monitoring.warnings.iter().cloned());

    Ok(CompiledEntry {
        entry: ResolvedEntry {
            engine,
            provider,
            service_name,
            integration: engine.integration_name().to_string(),
            env,
            interval: monitoring.interval,
            timeout: monitoring.timeout,
            labels,
            inventory_source: engine.inventory_source().to_string(),
        },
        warnings,
    })
}

fn insert_monitoring(env: &mut BTreeMap<String, EnvValue>, m: &ResolvedMonitoring) {
    env.insert("METRICS".into(), m.metrics.into());
    env.insert("INVENTORY".into(), m.inventory.into());
    env.insert("EXTENDED_METRICS".into(), m.extended_metrics.into());
    env.insert("ENABLE_QUERY_MONITORING".into(), m.enable_query_monitoring.into());
    env.insert("GATHER_QUERY_SAMPLES".into(), m.gather_query_samples.into());
    env.insert(
        "QUERY_METRICS_INTERVAL".into(),
        m.query_metrics_interval.as_str().into(),
    );
    env.insert("MAX_SQL_QUERY_LENGTH".into(), m.max_sql_query_length.into());
    env.insert(
        "QUERY_MONITORING_RESPONSE_TIME_THRESHOLD".into(),
        m.query_response_time_threshold.into(),
    );
    env.insert(
        "QUERY_MONITORING_COUNT_THRESHOLD".into(),
        m.query_count_threshold.into(),
    );

    match &m.custom_query {
        CustomQuery::Inline(query) => {
            env.insert("CUSTOM_METRICS_QUERY".into(), query.as_str().into());
        }
        CustomQuery::File(path) | CustomQuery::DefaultFile(path) => {
            env.insert("CUSTOM_METRICS_CONFIG".into(), path.as_str().into());
        }
    }

    let pm = &m.provider_metrics;
    if let Some(source) = pm.metrics_source {
        env.insert("METRICS_SOURCE".into(), source.as_str().into());
    }
    if let Some(flag) = pm.collect_rds_metrics {
        env.insert("COLLECT_RDS_METRICS".into(), flag.into());
    }
    if let Some(flag) = pm.collect_aurora_metrics {
        env.insert("COLLECT_AURORA_METRICS".into(), flag.into());
    }
    if let Some(endpoint) = &pm.reader_endpoint {
        env.insert("MONITOR_READERS".into(), true.into());
        env.insert("READER_ENDPOINT".into(), endpoint.as_str().into());
    }

    if let Some(pg) = &m.postgres {
        env.insert("COLLECT_BLOAT_METRICS".into(), pg.collect_bloat_metrics.into());
        env.insert(
            "COLLECT_DB_LOCK_METRICS".into(),
            pg.collect_db_lock_metrics.into(),
        );
        env.insert("COLLECTION_LIST".into(), pg.collection_list.as_str().into());
    }
}
