use std::path::PathBuf;

use crate::{error, management::TokenManager, success, sync, utils};

/// Default export location in the current working directory.
const DEFAULT_EXPORT_PATH: &str = "saved_tracks.tsv";

/// Fetches the library and writes the merged record set as TSV.
///
/// The export is the pre-dedup table - every collected track appears,
/// duplicates included, for audit purposes.
pub async fn export(output: Option<PathBuf>) {
    let path = output.unwrap_or_else(|| PathBuf::from(DEFAULT_EXPORT_PATH));

    let mut token_mgr = match TokenManager::load().await {
        Ok(t) => t,
        Err(e) => {
            error!(
                "Failed to load token. Please run sprankcli auth\n Error: {}",
                e
            );
        }
    };

    let merged = match sync::build_track_table(&mut token_mgr).await {
        Ok(merged) => merged,
        Err(e) => error!("Failed to build track table: {}", e),
    };

    if let Err(e) = utils::export_tracks(&path, &merged) {
        error!("Failed to write {}: {}", path.display(), e);
    }

    success!("Exported {} records to {}.", merged.len(), path.display());
}
