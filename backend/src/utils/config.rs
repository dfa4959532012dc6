use anyhow::Result;
use std::env;

use crate::constants::{DEFAULT_DOCUMENT_KEY, DEFAULT_SERVER_PORT};

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    /// Key of the pairing document in the blob store
    pub document_key: String,
    /// Fixed seed for reproducible draws; OS entropy when unset
    pub rng_seed: Option<u64>,
    pub allowed_origins: Vec<String>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let rng_seed = match env::var("LUNCHBOT_RNG_SEED") {
            Ok(raw) => Some(
                raw.trim()
                    .parse()
                    .map_err(|_| anyhow::anyhow!("LUNCHBOT_RNG_SEED must be an unsigned integer"))?,
            ),
            Err(_) => None,
        };

        Ok(Self {
            database_url: env::var("DATABASE_URL")
                .map_err(|_| anyhow::anyhow!("DATABASE_URL must be set"))?,
            port: env::var("PORT")
                .unwrap_or_else(|_| DEFAULT_SERVER_PORT.to_string())
                .parse()
                .unwrap_or(DEFAULT_SERVER_PORT),
            document_key: env::var("LUNCHBOT_DOCUMENT_KEY")
                .unwrap_or_else(|_| DEFAULT_DOCUMENT_KEY.to_string()),
            rng_seed,
            allowed_origins: env::var("ALLOWED_ORIGINS")
                .map(|raw| parse_origins(&raw))
                .unwrap_or_default(),
        })
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(str::to_string)
        .collect()
}
