use anyhow::Result;
use sqlx::{PgPool, postgres::PgPoolOptions};
use std::env;
use std::time::Duration;
use dotenvy::dotenv;

use crate::constants::{DEFAULT_DB_ACQUIRE_TIMEOUT_SECS, DEFAULT_DB_MAX_CONNECTIONS};

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub database_url: String,
    pub max_connections: u32,
    /// How long a pairing operation waits for a connection before failing
    pub acquire_timeout: Duration,
}

impl DatabaseConfig {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();

        Ok(Self {
            database_url: env::var("DATABASE_URL")
                .map_err(|_| anyhow::anyhow!("DATABASE_URL must be set"))?,
            max_connections: parse_or("DB_MAX_CONNECTIONS", DEFAULT_DB_MAX_CONNECTIONS),
            acquire_timeout: Duration::from_secs(parse_or(
                "DB_ACQUIRE_TIMEOUT_SECS",
                DEFAULT_DB_ACQUIRE_TIMEOUT_SECS,
            )),
        })
    }

    /// Like `from_env`, but prefers `DATABASE_PUBLIC_URL` so operator tools can reach production.
    pub fn from_env_public() -> Result<Self> {
        let mut config = Self::from_env()?;
        match env::var("DATABASE_PUBLIC_URL") {
            Ok(public_url) => {
                tracing::info!("Using DATABASE_PUBLIC_URL for database access");
                config.database_url = public_url;
            }
            Err(_) => tracing::info!("Using DATABASE_URL (DATABASE_PUBLIC_URL not set)"),
        }
        Ok(config)
    }
}

fn parse_or<T: std::str::FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|raw| raw.parse().ok())
        .unwrap_or(default)
}

pub async fn get_db_pool(config: &DatabaseConfig) -> Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(config.acquire_timeout)
        .connect(&config.database_url)
        .await?;

    Ok(pool)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_or_falls_back() {
        assert_eq!(parse_or("LUNCHBOT_TEST_NEVER_SET", 7u32), 7);
    }
}
