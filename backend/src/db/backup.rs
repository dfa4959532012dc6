use anyhow::{Context, Result};
use chrono::Utc;
use std::fs;
use std::path::{Path, PathBuf};

use crate::db::{load_document, BlobStore};

/// Writes the document under `key` to `<output_dir>/<key>_backup_<timestamp>.json`.
///
/// Returns `None` without writing anything when no document is stored.
pub async fn backup_document(store: &dyn BlobStore, key: &str, output_dir: &Path) -> Result<Option<PathBuf>> {
    if store.get(key).await?.is_none() {
        return Ok(None);
    }

    let document = load_document(store, key).await;
    fs::create_dir_all(output_dir)
        .with_context(|| format!("failed to create {}", output_dir.display()))?;

    let timestamp = Utc::now().format("%Y%m%d_%H%M%S");
    let backup_file = output_dir.join(format!("{}_backup_{}.json", key, timestamp));
    fs::write(&backup_file, serde_json::to_string_pretty(&document)?)
        .with_context(|| format!("failed to write {}", backup_file.display()))?;

    tracing::info!(
        "Backed up {} histories, {} blacklists, {} topic sets, {} active pairings",
        document.last_pairings.len(),
        document.blacklists.len(),
        document.user_topics.len(),
        document.active_pairings.len() / 2
    );

    Ok(Some(backup_file))
}
