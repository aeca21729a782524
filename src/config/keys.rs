//! Configuration key strings. Identifiers are exact and case-sensitive;
//! nested keys are namespaced by application name.

/// Env-style keys expected in the raw application properties.
pub const DATABASE_URL_ENV_KEY: &str = "DATABASE_URL";
pub const DATABASE_USERNAME_ENV_KEY: &str = "DATABASE_USERNAME";
pub const DATABASE_PASSWORD_ENV_KEY: &str = "DATABASE_PASSWORD";

/// Normalized keys under which a validated [`PoolConfig`](crate::PoolConfig)
/// serializes.
pub const DATABASE_URL_KEY: &str = "database-url";
pub const DATABASE_USER_KEY: &str = "database-user";
pub const DATABASE_PASSWORD_KEY: &str = "database-password";
pub const DATABASE_MAX_POOL_SIZE_KEY: &str = "database-max-pool-size";
pub const DATABASE_CONNECTION_TIMEOUT_IN_MS_KEY: &str = "database-connection-timeout-in-ms";
pub const DATABASE_CONNECTION_INIT_SQL_KEY: &str = "database-connection-init-sql";

fn database_details(app_name: &str) -> String {
    format!("{}.database", app_name)
}

/// `{app}.database.connection.max-pool-size`
pub fn max_pool_size_key(app_name: &str) -> String {
    format!("{}.connection.max-pool-size", database_details(app_name))
}

/// `{app}.database.connection.timeout-ms`
pub fn timeout_ms_key(app_name: &str) -> String {
    format!("{}.connection.timeout-ms", database_details(app_name))
}

/// `{app}.database.connection.init-script`
pub fn init_script_key(app_name: &str) -> String {
    format!("{}.connection.init-script", database_details(app_name))
}
