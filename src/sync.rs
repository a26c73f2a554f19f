//! The collect → merge → rank → reconcile pipeline.
//!
//! One run drains the user's saved tracks, fetches their audio features,
//! merges the two collections into flat records, deduplicates and ranks
//! them, and reconciles one playlist per configured spec. Everything is
//! sequential: collection, fetching, merging, ranking, and reconciliation
//! happen one step after another with no overlap, and playlists are
//! mutated one at a time with no transactional grouping across them - a
//! failure at playlist 3 of 5 leaves 1-2 committed and 4-5 unattempted.
//!
//! Concurrent runs against the same account are not safe: the playlist
//! name is the sole identity key and there is no locking around the
//! lookup-then-create window. This is a known limitation of the design.

use std::{path::PathBuf, time::Duration};

use indicatif::{ProgressBar, ProgressStyle};
use serde::{Deserialize, Serialize};

use crate::{
    Res, info,
    management::{SpecManager, TokenManager},
    spotify::{
        self, ApiError,
        pager::{self, ListOperation},
    },
    types::{MergedTrack, PlaylistSpec, SavedTrackItem},
    utils,
};

/// How the reconciler treats a playlist that already exists remotely.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconcileMode {
    /// Existing playlists are treated as already satisfied; no fill.
    CreateOnly,
    /// Fill the playlist; `overwrite` decides whether a non-empty
    /// playlist is truncated first or left unchanged.
    Fill { overwrite: bool },
}

/// Terminal state of one playlist reconciliation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReconcileOutcome {
    /// The playlist was created or refilled with the configured tracks.
    Filled,
    /// The playlist existed and the mode forbade touching it.
    LeftUnchanged,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistOutcome {
    pub name: String,
    pub outcome: ReconcileOutcome,
}

/// Summary of a completed reconciliation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncReport {
    pub user_id: String,
    pub total_tracks: usize,
    pub deduped_tracks: usize,
    pub playlists: Vec<PlaylistOutcome>,
}

/// Runs the full pipeline for one user.
///
/// The playlist configuration is loaded and validated before any remote
/// call. When `user` is `None` the account owner is resolved via the
/// current-user endpoint. `export` writes the merged, pre-dedup record
/// set as tab-delimited text before ranking begins.
///
/// Any error aborts the run immediately; partially reconciled playlists
/// stay as they are (see the module documentation).
pub async fn run(
    user: Option<String>,
    mode: ReconcileMode,
    export: Option<PathBuf>,
) -> Res<SyncReport> {
    let specs = SpecManager::load().await?;
    info!("Loaded {} playlist specs.", specs.count());

    let mut token_mgr = TokenManager::load()
        .await
        .map_err(|e| format!("failed to load token, run sprankcli auth first: {}", e))?;

    let user_id = match user {
        Some(u) => u,
        None => spotify::user::current_user(&mut token_mgr).await?.id,
    };
    info!("Proceeding with user {}.", user_id);

    let mut merged = build_track_table(&mut token_mgr).await?;
    let total_tracks = merged.len();

    if let Some(path) = export {
        utils::export_tracks(&path, &merged)?;
        info!("Exported {} merged records to {}.", total_tracks, path.display());
    }

    utils::dedup_tracks(&mut merged);
    let deduped_tracks = merged.len();
    info!(
        "Number of tracks after deduping by artist and song name is {}.",
        deduped_tracks
    );

    let mut playlists = Vec::new();
    for spec in specs.specs() {
        let outcome = reconcile_playlist(&mut token_mgr, &user_id, spec, &merged, &mode).await?;
        playlists.push(PlaylistOutcome {
            name: spec.name.clone(),
            outcome,
        });
    }

    Ok(SyncReport {
        user_id,
        total_tracks,
        deduped_tracks,
        playlists,
    })
}

/// Collects saved tracks and audio features and merges them.
///
/// Returns the merged, pre-dedup record table. Both collections are
/// verified complete by the collector and fetcher before the merge sees
/// them; the merge re-checks length equality at its own boundary.
pub async fn build_track_table(token_mgr: &mut TokenManager) -> Res<Vec<MergedTrack>> {
    let pb = spinner("Collecting saved tracks...");
    let saved: Vec<SavedTrackItem> = pager::collect_all(
        token_mgr,
        &ListOperation::SavedTracks,
        pager::DEFAULT_PAGE_SIZE,
    )
    .await?;
    pb.finish_and_clear();
    info!("Number of saved tracks is {}.", saved.len());

    let pb = spinner("Fetching audio features...");
    let features = spotify::tracks::get_audio_features(token_mgr, &saved).await?;
    pb.finish_and_clear();
    info!(
        "Number of tracks for which audio features were obtained is {}.",
        features.len()
    );

    let merged = utils::merge_track_features(&saved, &features)?;
    info!("Number of tracks after merge is {}.", merged.len());

    Ok(merged)
}

/// Reconciles one configured playlist against the remote account.
///
/// State machine keyed by the exact, case-sensitive playlist name:
///
/// 1. Search the user's playlists for the name.
/// 2. Found + create-only mode: already satisfied, left unchanged.
/// 3. Found + fill mode: fetch current membership; a non-empty playlist
///    is truncated first when overwrite is enabled, otherwise left
///    unchanged. Then the ranked tracks are added.
/// 4. Not found: create a non-public, non-collaborative playlist with
///    the configured description and add the ranked tracks.
///
/// Re-running with the same name never creates a second playlist; the
/// name is the sole identity key.
pub async fn reconcile_playlist(
    token_mgr: &mut TokenManager,
    user_id: &str,
    spec: &PlaylistSpec,
    tracks: &[MergedTrack],
    mode: &ReconcileMode,
) -> Res<ReconcileOutcome> {
    info!("Ranking tracks by {}.", spec.metric);
    let uris = utils::rank_tracks(tracks, &spec.metric, spec.num_tracks, false)?;

    info!("Reconciling playlist {}.", spec.name);
    let existing = spotify::playlist::find_by_name(token_mgr, user_id, &spec.name).await?;

    let outcome = match existing {
        None => {
            let created =
                spotify::playlist::create(token_mgr, user_id, &spec.name, &spec.description)
                    .await?;
            spotify::playlist::add_tracks(token_mgr, &created.id, &uris).await?;
            ReconcileOutcome::Filled
        }
        Some(playlist) => match mode {
            ReconcileMode::CreateOnly => {
                info!("Playlist {} already exists. Doing nothing.", spec.name);
                ReconcileOutcome::LeftUnchanged
            }
            ReconcileMode::Fill { overwrite } => {
                fill_existing(token_mgr, &playlist.id, &spec.name, &uris, *overwrite).await?
            }
        },
    };

    Ok(outcome)
}

/// Fills an already existing playlist, truncating it first if necessary.
async fn fill_existing(
    token_mgr: &mut TokenManager,
    playlist_id: &str,
    name: &str,
    uris: &[String],
    overwrite: bool,
) -> Result<ReconcileOutcome, ApiError> {
    let current = spotify::playlist::get_tracks(token_mgr, playlist_id).await?;

    if !current.is_empty() {
        if !overwrite {
            info!(
                "Playlist {} already has tracks and overwrite is disabled. Doing nothing.",
                name
            );
            return Ok(ReconcileOutcome::LeftUnchanged);
        }

        let current_uris: Vec<String> = current.iter().map(|t| t.track.uri.clone()).collect();
        spotify::playlist::remove_tracks(token_mgr, playlist_id, &current_uris).await?;
    }

    spotify::playlist::add_tracks(token_mgr, playlist_id, uris).await?;
    Ok(ReconcileOutcome::Filled)
}

fn spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} {msg}")
            .unwrap()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );
    pb
}
