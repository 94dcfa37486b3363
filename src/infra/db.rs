use anyhow::Context;
use sqlx::{PgPool, postgres::PgPoolOptions};
use tracing::info;

/// Connects to Postgres and applies any pending migrations.
pub async fn init_db(database_url: &str) -> anyhow::Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(database_url)
        .await
        .context("could not connect to Postgres (is DATABASE_URL set?)")?;

    sqlx::migrate!("./migrations").run(&pool).await?;

    info!("Database ready, migrations applied");
    Ok(pool)
}
