//! Raw application properties and the validated pool configuration record.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Flat key/value properties supplied by the embedding application:
/// env-style aliases plus nested per-application paths. Read-only to the
/// core; typed getters fail with the offending key instead of defaulting.
#[derive(Clone, Debug, Default)]
pub struct AppProps(Map<String, Value>);

impl AppProps {
    pub fn new() -> Self {
        AppProps(Map::new())
    }

    /// Builder-style insert, mostly for tests and composition roots.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    /// Copy of these properties without `key`.
    pub fn without(&self, key: &str) -> Self {
        let mut map = self.0.clone();
        map.remove(key);
        AppProps(map)
    }

    pub fn get_string(&self, key: &str) -> Result<String, ConfigError> {
        self.0
            .get(key)
            .and_then(Value::as_str)
            .map(String::from)
            .ok_or_else(|| ConfigError::MissingValue { key: key.to_string() })
    }

    pub fn get_i32(&self, key: &str) -> Result<i32, ConfigError> {
        self.0
            .get(key)
            .and_then(Value::as_i64)
            .and_then(|n| i32::try_from(n).ok())
            .ok_or_else(|| ConfigError::MissingValue { key: key.to_string() })
    }

    pub fn get_i64(&self, key: &str) -> Result<i64, ConfigError> {
        self.0
            .get(key)
            .and_then(Value::as_i64)
            .ok_or_else(|| ConfigError::MissingValue { key: key.to_string() })
    }
}

impl From<Map<String, Value>> for AppProps {
    fn from(map: Map<String, Value>) -> Self {
        AppProps(map)
    }
}

/// Validated, immutable pool configuration. Serializes under the normalized
/// kebab-case keys (see [`crate::config::keys`]).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolConfig {
    #[serde(rename = "database-url")]
    pub url: String,
    #[serde(rename = "database-user")]
    pub user: String,
    #[serde(rename = "database-password")]
    pub password: String,
    #[serde(rename = "database-max-pool-size")]
    pub max_pool_size: i32,
    #[serde(rename = "database-connection-timeout-in-ms")]
    pub connection_timeout_ms: i64,
    #[serde(rename = "database-connection-init-sql")]
    pub connection_init_sql: String,
}
