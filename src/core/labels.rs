//! Label composition

use crate::domain::{Engine, Provider};
use std::collections::BTreeMap;

/// Base label keys; `labels` cannot override these
const BASE_KEYS: &[&str] = &["env", "database_type", "provider", "service_name"];

/// Builds the sorted label map of an entry
///
/// `labels` is merged without touching the base keys and never contributes
/// its `environment` key (the environment already arrives as `env`).
/// `custom_labels` is merged last and overrides anything.
pub fn compose(
    engine: Engine,
    provider: Provider,
    service_name: &str,
    environment: &str,
    labels: Option<&BTreeMap<String, String>>,
    custom_labels: Option<&BTreeMap<String, String>>,
) -> BTreeMap<String, String> {
    let mut out = BTreeMap::new();
    out.insert("env".to_string(), environment.to_string());
    out.insert("database_type".to_string(), engine.as_str().to_string());
    out.insert("provider".to_string(), provider.as_str().to_string());
    out.insert("service_name".to_string(), service_name.to_string());

    if let Some(labels) = labels {
        for (key, value) in labels {
            if key == "environment" || BASE_KEYS.contains(&key.as_str()) {
                continue;
            }
            out.insert(key.clone(), value.clone());
        }
    }

    if let Some(custom) = custom_labels {
        for (key, value) in custom {
            out.insert(key.clone(), value.clone());
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_base_labels() {
        let labels = compose(
            Engine::Mysql,
            Provider::Standalone,
            "standalone-db1",
            "production",
            None,
            None,
        );
        assert_eq!(
            labels,
            map(&[
                ("database_type", "mysql"),
                ("env", "production"),
                ("provider", "standalone"),
                ("service_name", "standalone-db1"),
            ])
        );
    }

    #[test]
    fn test_labels_cannot_override_base_keys() {
        let extra = map(&[
            ("env", "dev"),
            ("environment", "staging"),
            ("team", "payments"),
        ]);
        let labels = compose(
            Engine::Postgresql,
            Provider::Rds,
            "orders",
            "production",
            Some(&extra),
            None,
        );
        assert_eq!(labels["env"], "production");
        assert_eq!(labels["team"], "payments");
        assert!(!labels.contains_key("environment"));
    }

    #[test]
    fn test_custom_labels_override_everything() {
        let custom = map(&[("service_name", "renamed"), ("tier", "gold")]);
        let labels = compose(
            Engine::Mysql,
            Provider::Aurora,
            "orders",
            "production",
            None,
            Some(&custom),
        );
        assert_eq!(labels["service_name"], "renamed");
        assert_eq!(labels["tier"], "gold");
    }

    #[test]
    fn test_output_is_sorted() {
        let extra = map(&[("zeta", "1"), ("alpha", "2")]);
        let labels = compose(
            Engine::Mysql,
            Provider::Standalone,
            "s",
            "e",
            Some(&extra),
            None,
        );
        let keys: Vec<_> = labels.keys().cloned().collect();
        let mut sorted = keys.clone();
        sorted.sort();
        assert_eq!(keys, sorted);
    }
}
