use anyhow::{Context, Result};
use sqlx::PgPool;
use sqlx::migrate::Migrator;

static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Creates the document store and directory tables.
pub async fn run_migrations(pool: &PgPool) -> Result<()> {
    MIGRATOR
        .run(pool)
        .await
        .context("failed to apply lunchbot migrations")?;
    tracing::info!("Applied {} lunchbot migrations", MIGRATOR.iter().count());
    Ok(())
}
