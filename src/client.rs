//! Shared database client: owns the one live connection pool for the
//! process and mediates its creation and teardown.
//!
//! The client is an explicit service object: construct it once at the
//! composition root and hand out clones (all clones share the same state).
//! `init` and `close` serialize on a write lock; `acquire` clones the pool
//! handle under the read lock and awaits outside it, so no lock is ever held
//! across a suspension point.

use crate::config::{build, AppProps, PoolConfig};
use crate::error::ClientError;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::pool::PoolConnection;
use sqlx::{Executor, PgPool, Postgres};
use std::str::FromStr;
use std::sync::{Arc, RwLock};
use std::time::Duration;

#[derive(Debug)]
enum State {
    Uninitialized,
    Ready(Ready),
    Closed,
}

#[derive(Debug)]
struct Ready {
    pool: PgPool,
    config: PoolConfig,
}

#[derive(Clone, Debug, Default)]
pub struct SharedDbClient {
    state: Arc<RwLock<State>>,
}

impl Default for State {
    fn default() -> Self {
        State::Uninitialized
    }
}

impl SharedDbClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a [`PoolConfig`] from `app_props` and stand up the pool for it.
    /// Chainable: returns `&Self`.
    ///
    /// Pool construction is lazy; connection failures surface on first
    /// acquire, while configuration failures surface here and leave any
    /// prior state untouched. Re-initializing a ready client closes the
    /// previous pool before storing the replacement.
    pub async fn init(
        &self,
        app_name: &str,
        app_props: &AppProps,
    ) -> Result<&Self, ClientError> {
        let config = build(app_props, app_name)?;
        let connect = PgConnectOptions::from_str(&config.url)?
            .username(&config.user)
            .password(&config.password);
        let init_sql = config.connection_init_sql.clone();
        let pool = PgPoolOptions::new()
            .max_connections(config.max_pool_size as u32)
            .acquire_timeout(Duration::from_millis(config.connection_timeout_ms.max(0) as u64))
            .after_connect(move |conn, _meta| {
                let sql = init_sql.clone();
                Box::pin(async move {
                    conn.execute(sql.as_str()).await?;
                    Ok(())
                })
            })
            .connect_lazy_with(connect);

        let previous = {
            let mut state = self.write()?;
            std::mem::replace(&mut *state, State::Ready(Ready { pool, config }))
        };
        if let State::Ready(old) = previous {
            old.pool.close().await;
            tracing::info!(app = %app_name, "previous pool closed on re-init");
        }
        tracing::info!(app = %app_name, "database client initialized");
        Ok(self)
    }

    /// Independent snapshot of the stored configuration. Mutating the
    /// returned value never affects what a later call returns.
    pub fn config(&self) -> Result<PoolConfig, ClientError> {
        match &*self.read()? {
            State::Ready(ready) => Ok(ready.config.clone()),
            State::Uninitialized => Err(ClientError::Uninitialized),
            State::Closed => Err(ClientError::Closed),
        }
    }

    /// Cloned pool handle for callers that run queries directly.
    pub fn pool(&self) -> Result<PgPool, ClientError> {
        match &*self.read()? {
            State::Ready(ready) => Ok(ready.pool.clone()),
            State::Uninitialized => Err(ClientError::Uninitialized),
            State::Closed => Err(ClientError::Closed),
        }
    }

    /// Check out one connection from the pool. Suspends while the pool is at
    /// capacity, up to the configured acquire timeout.
    pub async fn acquire(&self) -> Result<PoolConnection<Postgres>, ClientError> {
        let pool = self.pool()?;
        Ok(pool.acquire().await?)
    }

    /// Close the pool and release it. Idempotent; later operations fail with
    /// [`ClientError::Closed`].
    pub async fn close(&self) -> Result<(), ClientError> {
        let previous = {
            let mut state = self.write()?;
            std::mem::replace(&mut *state, State::Closed)
        };
        if let State::Ready(old) = previous {
            old.pool.close().await;
            tracing::info!("database client closed");
        }
        Ok(())
    }

    fn read(&self) -> Result<std::sync::RwLockReadGuard<'_, State>, ClientError> {
        self.state.read().map_err(|_| ClientError::Lock)
    }

    fn write(&self) -> Result<std::sync::RwLockWriteGuard<'_, State>, ClientError> {
        self.state.write().map_err(|_| ClientError::Lock)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::keys::*;
    use serde_json::json;

    const APP: &str = "test";

    fn valid_props() -> AppProps {
        AppProps::new()
            .with(DATABASE_URL_ENV_KEY, "postgres://localhost:5432/testdb")
            .with(DATABASE_USERNAME_ENV_KEY, "u")
            .with(DATABASE_PASSWORD_ENV_KEY, "p")
            .with(max_pool_size_key(APP), 5)
            .with(timeout_ms_key(APP), 30000)
            .with(init_script_key(APP), "SELECT 1")
    }

    fn expected_config() -> PoolConfig {
        PoolConfig {
            url: "postgres://localhost:5432/testdb".into(),
            user: "u".into(),
            password: "p".into(),
            max_pool_size: 5,
            connection_timeout_ms: 30000,
            connection_init_sql: "SELECT 1".into(),
        }
    }

    #[tokio::test]
    async fn init_exposes_normalized_config() {
        let client = SharedDbClient::new();
        let config = client.init(APP, &valid_props()).await.unwrap().config().unwrap();
        assert_eq!(config, expected_config());
        assert_eq!(config.max_pool_size, 5);

        let value = serde_json::to_value(&config).unwrap();
        assert_eq!(value[DATABASE_MAX_POOL_SIZE_KEY], json!(5));
        assert_eq!(value[DATABASE_CONNECTION_TIMEOUT_IN_MS_KEY], json!(30000));
    }

    #[tokio::test]
    async fn init_fails_with_missing_key_and_stays_uninitialized() {
        let client = SharedDbClient::new();
        let props = valid_props().without(&timeout_ms_key(APP));
        let err = client.init(APP, &props).await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "missing config value for key: test.database.connection.timeout-ms"
        );
        assert!(matches!(client.config(), Err(ClientError::Uninitialized)));
    }

    #[tokio::test]
    async fn failed_reinit_keeps_previous_config() {
        let client = SharedDbClient::new();
        client.init(APP, &valid_props()).await.unwrap();
        let bad = valid_props().without(DATABASE_URL_ENV_KEY);
        assert!(client.init(APP, &bad).await.is_err());
        assert_eq!(client.config().unwrap(), expected_config());
    }

    #[tokio::test]
    async fn config_snapshot_is_a_defensive_copy() {
        let client = SharedDbClient::new();
        client.init(APP, &valid_props()).await.unwrap();

        let mut snapshot = client.config().unwrap();
        snapshot.url = "MODIFIED VALUE".into();
        snapshot.password.clear();

        assert_eq!(client.config().unwrap(), expected_config());
    }

    #[tokio::test]
    async fn accessors_fail_before_init() {
        let client = SharedDbClient::new();
        assert!(matches!(client.config(), Err(ClientError::Uninitialized)));
        assert!(matches!(client.pool(), Err(ClientError::Uninitialized)));
        assert!(matches!(client.acquire().await, Err(ClientError::Uninitialized)));
    }

    #[tokio::test]
    async fn acquire_after_close_fails_with_closed() {
        let client = SharedDbClient::new();
        client.init(APP, &valid_props()).await.unwrap();
        client.close().await.unwrap();

        assert!(matches!(client.acquire().await, Err(ClientError::Closed)));
        assert!(matches!(client.config(), Err(ClientError::Closed)));
        // close is idempotent
        client.close().await.unwrap();
        client.close().await.unwrap();
    }

    #[tokio::test]
    async fn reinit_replaces_config() {
        let client = SharedDbClient::new();
        client.init(APP, &valid_props()).await.unwrap();
        let other = valid_props().with(max_pool_size_key(APP), 9);
        client.init(APP, &other).await.unwrap();
        assert_eq!(client.config().unwrap().max_pool_size, 9);
    }

    #[tokio::test]
    async fn clones_share_state() {
        let client = SharedDbClient::new();
        let handle = client.clone();
        client.init(APP, &valid_props()).await.unwrap();
        assert_eq!(handle.config().unwrap(), expected_config());
        handle.close().await.unwrap();
        assert!(matches!(client.config(), Err(ClientError::Closed)));
    }

    // Integration tests require a real database.
    // Run with: DATABASE_URL=postgres://... cargo test -- --ignored

    fn props_from_env() -> AppProps {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
        AppProps::new()
            .with(DATABASE_URL_ENV_KEY, url)
            .with(DATABASE_USERNAME_ENV_KEY, std::env::var("DATABASE_USERNAME").unwrap_or_else(|_| "postgres".into()))
            .with(DATABASE_PASSWORD_ENV_KEY, std::env::var("DATABASE_PASSWORD").unwrap_or_default())
            .with(max_pool_size_key(APP), 5)
            .with(timeout_ms_key(APP), 30000)
            .with(init_script_key(APP), "SELECT 1")
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn acquired_connection_answers_queries() {
        let client = SharedDbClient::new();
        client.init(APP, &props_from_env()).await.unwrap();

        let mut conn = client.acquire().await.unwrap();
        let row: (i32,) = sqlx::query_as("SELECT 1")
            .fetch_one(&mut *conn)
            .await
            .unwrap();
        assert_eq!(row.0, 1);
        drop(conn);
        client.close().await.unwrap();
    }
}
