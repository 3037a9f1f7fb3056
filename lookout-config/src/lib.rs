//! Loader for Lookout configuration with YAML + environment overlays.
//!
//! The schema is small: an account key for the search service, an optional
//! endpoint override, and the web-only switch. Values may reference
//! environment variables with `${VAR}` placeholders; expansion is applied
//! recursively with a depth cap so self-referencing variables terminate.

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use serde_json::Value;
use std::path::Path;

const MAXIMUM_ENV_EXPANSION_DEPTH: usize = 8;

/// Strongly typed configuration for the search client.
#[derive(Debug, Clone, Deserialize)]
pub struct LookoutConfig {
    /// Account key used as both Basic-auth username and password.
    pub account_key: String,
    /// Restrict requests to the cheaper web-only endpoint.
    #[serde(default)]
    pub web_only: bool,
    /// Override the service root, mainly for tests against a local stub.
    #[serde(default)]
    pub endpoint: Option<String>,
    /// Default market (e.g. "en-US") applied when a request leaves it unset.
    #[serde(default)]
    pub market: Option<String>,
}

fn expand_env_in_value(v: &mut Value) {
    match v {
        Value::String(s) => {
            if s.contains('$') {
                let mut cur = std::mem::take(s);
                for _ in 0..MAXIMUM_ENV_EXPANSION_DEPTH {
                    let expanded = match shellexpand::env(&cur) {
                        Ok(cow) => cow.into_owned(),
                        Err(_) => cur.clone(),
                    };
                    if expanded == cur {
                        break;
                    }
                    cur = expanded;
                }
                *s = cur;
            }
        }
        Value::Array(arr) => arr.iter_mut().for_each(expand_env_in_value),
        Value::Object(obj) => obj.values_mut().for_each(expand_env_in_value),
        _ => {}
    }
}

/// Builder hiding the `config` crate wiring (YAML + env overrides).
pub struct LookoutConfigLoader {
    builder: config::ConfigBuilder<config::builder::DefaultState>,
}

impl Default for LookoutConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl LookoutConfigLoader {
    /// Start with sensible defaults: YAML file + `LOOKOUT_` env overrides.
    ///
    /// ```
    /// use lookout_config::LookoutConfigLoader;
    ///
    /// let config = LookoutConfigLoader::new()
    ///     .with_yaml_str("account_key: 'abc123'")
    ///     .load()
    ///     .expect("valid config");
    ///
    /// assert_eq!(config.account_key, "abc123");
    /// assert!(!config.web_only);
    /// ```
    pub fn new() -> Self {
        let builder =
            Config::builder().add_source(Environment::with_prefix("LOOKOUT").separator("__"));
        Self { builder }
    }

    /// Attach a YAML/TOML/JSON file; the `config` crate infers format by suffix.
    pub fn with_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.builder = self.builder.add_source(File::from(path.as_ref()).required(true));
        self
    }

    /// Allow tests/CLI to merge inline YAML snippets.
    ///
    /// ```
    /// use lookout_config::LookoutConfigLoader;
    ///
    /// let cfg = LookoutConfigLoader::new()
    ///     .with_yaml_str(
    ///         r#"
    /// account_key: "example"
    /// web_only: true
    /// market: "en-GB"
    /// "#,
    ///     )
    ///     .load()
    ///     .unwrap();
    ///
    /// assert!(cfg.web_only);
    /// assert_eq!(cfg.market.as_deref(), Some("en-GB"));
    /// ```
    pub fn with_yaml_str(mut self, yaml: &str) -> Self {
        self.builder = self
            .builder
            .add_source(File::from_str(yaml, config::FileFormat::Yaml));
        self
    }

    /// Consume the builder and deserialize the merged sources.
    ///
    /// Sources are combined, `${VAR}` placeholders expanded, then the result
    /// is materialised into [`LookoutConfig`].
    pub fn load(self) -> Result<LookoutConfig, ConfigError> {
        let cfg = self.builder.build()?;

        let mut v: Value = cfg.try_deserialize()?;
        expand_env_in_value(&mut v);

        serde_json::from_value(v).map_err(|e| ConfigError::Message(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn expands_simple_string() {
        temp_env::with_var("LOOKOUT_TEST_KEY", Some("sekrit"), || {
            let mut v = json!("prefix-${LOOKOUT_TEST_KEY}-suffix");
            expand_env_in_value(&mut v);
            assert_eq!(v, json!("prefix-sekrit-suffix"));
        });
    }

    #[test]
    fn expands_recursively_across_env_values() {
        temp_env::with_vars(
            [
                ("LOOKOUT_TEST_INNER", Some("qux")),
                ("LOOKOUT_TEST_OUTER", Some("mid-${LOOKOUT_TEST_INNER}")),
            ],
            || {
                let mut v = json!("X=${LOOKOUT_TEST_OUTER}");
                expand_env_in_value(&mut v);
                assert_eq!(v, json!("X=mid-qux"));
            },
        );
    }

    #[test]
    fn stops_on_cycles_and_leaves_value_reasonable() {
        temp_env::with_vars(
            [
                ("LOOKOUT_CYCLE_A", Some("${LOOKOUT_CYCLE_B}")),
                ("LOOKOUT_CYCLE_B", Some("${LOOKOUT_CYCLE_A}")),
            ],
            || {
                let mut v = json!("x=${LOOKOUT_CYCLE_A}-y");
                // With the depth cap this terminates; the cycle stays unresolved.
                expand_env_in_value(&mut v);
                let s = v.as_str().unwrap();
                assert!(s.starts_with("x=") && s.ends_with("-y"));
                assert!(s.contains("${"));
            },
        );
    }

    #[test]
    fn unknown_vars_are_left_as_is() {
        let mut v = json!("hi-${LOOKOUT_DOES_NOT_EXIST}");
        expand_env_in_value(&mut v);
        assert_eq!(v, json!("hi-${LOOKOUT_DOES_NOT_EXIST}"));
    }

    #[test]
    fn account_key_comes_from_env_placeholder() {
        temp_env::with_var("LOOKOUT_TEST_ACCOUNT", Some("from-env"), || {
            let cfg = LookoutConfigLoader::new()
                .with_yaml_str("account_key: \"${LOOKOUT_TEST_ACCOUNT}\"")
                .load()
                .unwrap();
            assert_eq!(cfg.account_key, "from-env");
        });
    }

    #[test]
    fn missing_account_key_is_an_error() {
        let err = LookoutConfigLoader::new()
            .with_yaml_str("web_only: true")
            .load();
        assert!(err.is_err());
    }
}
