//! Build a validated [`PoolConfig`] from raw application properties.

use crate::config::keys::*;
use crate::config::types::{AppProps, PoolConfig};
use crate::error::ConfigError;

/// Derive a [`PoolConfig`] from env-style aliases plus nested keys namespaced
/// by `app_name`. Every required key is checked before returning: no defaults
/// are applied, and the first absent or mistyped key aborts with
/// [`ConfigError::MissingValue`] naming it. Pure; no I/O.
///
/// Keys are validated in a fixed order: url, username, password,
/// max-pool-size, timeout-ms, init-script.
pub fn build(app_props: &AppProps, app_name: &str) -> Result<PoolConfig, ConfigError> {
    if app_name.is_empty() {
        return Err(ConfigError::EmptyAppName);
    }

    let config = PoolConfig {
        url: app_props.get_string(DATABASE_URL_ENV_KEY)?,
        user: app_props.get_string(DATABASE_USERNAME_ENV_KEY)?,
        password: app_props.get_string(DATABASE_PASSWORD_ENV_KEY)?,
        max_pool_size: app_props.get_i32(&max_pool_size_key(app_name))?,
        connection_timeout_ms: app_props.get_i64(&timeout_ms_key(app_name))?,
        connection_init_sql: app_props.get_string(&init_script_key(app_name))?,
    };
    tracing::debug!(app = %app_name, max_pool_size = config.max_pool_size, "pool config built");
    Ok(config)
}
