//! Typed errors: config validation vs runtime client failures.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    /// Required key absent from the properties, or present with the wrong
    /// JSON type. Carries the exact key string that failed.
    #[error("missing config value for key: {key}")]
    MissingValue { key: String },
    #[error("app name must not be empty")]
    EmptyAppName,
}

#[derive(Error, Debug)]
pub enum ClientError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// Client used before `init()`.
    #[error("client is not initialized")]
    Uninitialized,
    /// Client used after `close()`.
    #[error("client is closed")]
    Closed,
    #[error("database: {0}")]
    Db(sqlx::Error),
    /// Client state lock poisoned by a panicking holder.
    #[error("state lock poisoned")]
    Lock,
}

impl From<sqlx::Error> for ClientError {
    fn from(e: sqlx::Error) -> Self {
        match e {
            sqlx::Error::PoolClosed => ClientError::Closed,
            other => ClientError::Db(other),
        }
    }
}
