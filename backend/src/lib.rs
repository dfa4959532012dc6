pub mod constants;
pub mod error;
pub mod models;
pub mod db;
pub mod services;
pub mod engine;
pub mod handlers;
pub mod utils;

pub use utils::config::Config;
pub use db::connection::get_db_pool;
pub use engine::{PairingEngine, StartedPairing};
pub use error::{PairingError, PairingResult, StoreError};

// Re-export common types
pub use sqlx::PgPool;
pub use anyhow::Result;
