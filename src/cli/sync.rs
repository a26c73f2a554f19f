use std::path::PathBuf;

use crate::{
    error, info, success,
    sync::{self, ReconcileMode, ReconcileOutcome},
};

pub async fn sync(
    user: Option<String>,
    create_only: bool,
    no_overwrite: bool,
    export: Option<PathBuf>,
) {
    let mode = if create_only {
        ReconcileMode::CreateOnly
    } else {
        ReconcileMode::Fill {
            overwrite: !no_overwrite,
        }
    };

    let report = match sync::run(user, mode, export).await {
        Ok(report) => report,
        Err(e) => error!("Sync failed: {}", e),
    };

    for playlist in &report.playlists {
        match playlist.outcome {
            ReconcileOutcome::Filled => success!("Filled playlist {}.", playlist.name),
            ReconcileOutcome::LeftUnchanged => {
                info!("Left playlist {} unchanged.", playlist.name)
            }
        }
    }

    success!(
        "Done. {} saved tracks, {} after dedup, {} playlists reconciled.",
        report.total_tracks,
        report.deduped_tracks,
        report.playlists.len()
    );
}
