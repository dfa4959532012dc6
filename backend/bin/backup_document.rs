use anyhow::Result;
use clap::{Arg, Command};
use lunchbot::constants::DEFAULT_BACKUP_DIR;
use lunchbot::db::{backup_document, get_db_pool, DatabaseConfig, PgBlobStore};
use lunchbot::utils::{init_logging, Config};
use std::path::Path;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();

    let matches = Command::new("backup-document")
        .about("Write the pairing document to a timestamped JSON file")
        .arg(
            Arg::new("output-dir")
                .long("output-dir")
                .short('o')
                .help("Output directory for backup files")
                .default_value(DEFAULT_BACKUP_DIR),
        )
        .get_matches();

    let output_dir = matches
        .get_one::<String>("output-dir")
        .map(String::as_str)
        .unwrap_or(DEFAULT_BACKUP_DIR);

    let config = Config::from_env()?;
    let db_config = DatabaseConfig::from_env_public()?;
    let pool = get_db_pool(&db_config).await?;
    let store = PgBlobStore::new(pool);
    info!("Connected to database");

    if let Some(updated_at) = store.updated_at(&config.document_key).await? {
        info!("Document '{}' last written at {}", config.document_key, updated_at.to_rfc3339());
    }

    match backup_document(&store, &config.document_key, Path::new(output_dir)).await? {
        Some(file) => info!("✅ Backup created: {}", file.display()),
        None => warn!("No document stored under '{}', nothing to back up", config.document_key),
    }

    Ok(())
}
