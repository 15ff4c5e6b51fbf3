use std::time::Duration;

use anyhow::Result;
use sqlx::postgres::PgPoolOptions;

use crate::config::AppConfig;

pub type DbPool = sqlx::PgPool;

pub async fn create_pool(database_url: &str) -> Result<DbPool> {
    let pool = PgPoolOptions::new()
        .max_connections(10)
        .acquire_timeout(Duration::from_secs(5))
        .connect(database_url)
        .await?;
    Ok(pool)
}

/// Connect and migrate, or degrade to the file backend. A missing
/// `DATABASE_URL` and an unreachable server are treated the same way: the
/// storefront keeps serving from JSON files.
pub async fn try_connect(config: &AppConfig) -> Option<DbPool> {
    let url = config.database_url.as_deref()?;
    match create_pool(url).await {
        Ok(pool) => match sqlx::migrate!("./migrations").run(&pool).await {
            Ok(()) => {
                tracing::info!("database connected, migrations applied");
                Some(pool)
            }
            Err(err) => {
                tracing::warn!(error = %err, "migrations failed, using file storage");
                None
            }
        },
        Err(err) => {
            tracing::warn!(error = %err, "database unreachable, using file storage");
            None
        }
    }
}
