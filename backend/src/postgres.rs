use sqlx::{postgres::PgPoolOptions, PgPool};
use crate::config::DbConfig;

/// Opens the connection pool and forces one connection so an unreachable
/// database fails startup instead of the first request.
pub async fn connect(config: &DbConfig) -> Result<PgPool, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect_with(config.connect_options())
        .await?;

    sqlx::query("SELECT 1").execute(&pool).await?;
    Ok(pool)
}
