//! Demo composition root: env -> properties -> init -> acquire -> query -> close.

use dbpool_sdk::config::{
    init_script_key, max_pool_size_key, timeout_ms_key, DATABASE_PASSWORD_ENV_KEY,
    DATABASE_URL_ENV_KEY, DATABASE_USERNAME_ENV_KEY,
};
use dbpool_sdk::{AppProps, SharedDbClient};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("dbpool_sdk=info".parse()?))
        .init();

    let app_name = "demo";
    let props = AppProps::new()
        .with(
            DATABASE_URL_ENV_KEY,
            std::env::var("DATABASE_URL").unwrap_or_else(|_| "postgres://localhost/postgres".into()),
        )
        .with(
            DATABASE_USERNAME_ENV_KEY,
            std::env::var("DATABASE_USERNAME").unwrap_or_else(|_| "postgres".into()),
        )
        .with(
            DATABASE_PASSWORD_ENV_KEY,
            std::env::var("DATABASE_PASSWORD").unwrap_or_default(),
        )
        .with(max_pool_size_key(app_name), 5)
        .with(timeout_ms_key(app_name), 30_000)
        .with(init_script_key(app_name), "SET TIME ZONE 'UTC'");

    let client = SharedDbClient::new();
    client.init(app_name, &props).await?;
    tracing::info!(max_pool_size = client.config()?.max_pool_size, "pool ready");

    let mut conn = client.acquire().await?;
    let row: (i32,) = sqlx::query_as("SELECT 1").fetch_one(&mut *conn).await?;
    tracing::info!(result = row.0, "query ok");
    drop(conn);

    client.close().await?;
    Ok(())
}
