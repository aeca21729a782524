//! dbpool-sdk: configuration-driven shared PostgreSQL connection pool.
//!
//! Validates flat application properties into a typed pool configuration,
//! then owns the one live sqlx pool behind a cloneable client handle.

pub mod client;
pub mod config;
pub mod encode;
pub mod error;
pub mod sql;

pub use client::SharedDbClient;
pub use config::{build, AppProps, PoolConfig};
pub use encode::{uuid_raw_bytes, uuid_text_bytes};
pub use error::{ClientError, ConfigError};
pub use sql::{batch_insert, execute_binds, execute_update, multi_insert, PgBindValue};
