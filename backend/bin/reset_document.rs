use anyhow::Result;
use clap::{Arg, Command};
use lunchbot::constants::DEFAULT_BACKUP_DIR;
use lunchbot::db::{backup_document, get_db_pool, DatabaseConfig, PgBlobStore, PgUserDirectory};
use lunchbot::utils::{init_logging, Config};
use lunchbot::PairingEngine;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();

    let matches = Command::new("reset-document")
        .about("Back up and delete all pairing history, blacklists, topics and active pairings")
        .arg(
            Arg::new("confirm-wipe")
                .long("confirm-wipe")
                .help("Confirm that you want to delete the pairing document (required)")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("skip-backup")
                .long("skip-backup")
                .help("Do not write a backup before deleting")
                .action(clap::ArgAction::SetTrue),
        )
        .get_matches();

    let confirm_wipe = matches.get_flag("confirm-wipe");
    let skip_backup = matches.get_flag("skip-backup");

    let config = Config::from_env()?;
    let db_config = DatabaseConfig::from_env_public()?;
    let pool = get_db_pool(&db_config).await?;
    let store = Arc::new(PgBlobStore::new(pool.clone()));
    info!("Connected to database");

    // Step 1: Create backup
    if !skip_backup {
        info!("🔄 Creating backup of '{}'...", config.document_key);
        match backup_document(&*store, &config.document_key, Path::new(DEFAULT_BACKUP_DIR)).await? {
            Some(file) => info!("✅ Backup created: {}", file.display()),
            None => info!("No document stored, nothing to back up"),
        }
    }

    // Step 2: Delete (only if confirmed)
    if !confirm_wipe {
        warn!("⚠️  Reset not confirmed. Use --confirm-wipe to delete the pairing document.");
        return Ok(());
    }

    let engine = PairingEngine::from_config(store, Arc::new(PgUserDirectory::new(pool)), &config);
    engine.reset().await?;
    info!("🗑️  Deleted pairing document '{}'", config.document_key);

    Ok(())
}
