use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use reqwest::Client;

use crate::{
    config, error,
    management::TokenManager,
    spotify::{
        ApiError,
        pager::{self, send_with_retry},
    },
    types::{AudioFeatures, AudioFeaturesResponse, Page, SavedTrackItem},
};

/// Batch-size ceiling imposed by the `/audio-features` endpoint.
pub const FEATURES_BATCH_SIZE: usize = 100;

/// Partitions saved tracks into comma-joined id strings of at most
/// `size` ids each, preserving input order across batches.
///
/// Kept separate from the fetch so the partitioning is testable without
/// network access: re-splitting the returned strings must reconstruct an
/// order-identical concatenation of the input ids.
pub fn batch_ids(tracks: &[SavedTrackItem], size: usize) -> Vec<String> {
    tracks
        .chunks(size)
        .map(|piece| {
            piece
                .iter()
                .map(|item| item.track.id.as_str())
                .collect::<Vec<_>>()
                .join(",")
        })
        .collect()
}

/// Fetches audio features for the given saved tracks, in order.
///
/// Issues one `/audio-features` call per batch of
/// [`FEATURES_BATCH_SIZE`] ids and concatenates responses in batch
/// order, so the output is order-aligned with the input. The total
/// returned length must equal the input length; a mismatch fails with
/// [`ApiError::IncompleteResults`] under the `audio_features` operation
/// name. Empty input returns an empty vector without any remote call.
pub async fn get_audio_features(
    token_mgr: &mut TokenManager,
    tracks: &[SavedTrackItem],
) -> Result<Vec<AudioFeatures>, ApiError> {
    let operation = "audio_features";
    let mut features: Vec<AudioFeatures> = Vec::new();

    if tracks.is_empty() {
        return Ok(features);
    }

    let client = Client::new();
    for ids in batch_ids(tracks, FEATURES_BATCH_SIZE) {
        let url = format!(
            "{base}/audio-features?ids={ids}",
            base = config::spotify_apiurl()
        );

        let token = token_mgr.get_valid_token().await;
        let response = send_with_retry(|| client.get(&url).bearer_auth(&token), operation).await?;

        let batch = response
            .json::<AudioFeaturesResponse>()
            .await
            .map_err(|e| ApiError::remote(operation, e))?;
        features.extend(batch.audio_features);
    }

    pager::verify_complete(operation, tracks.len() as u64, features.len())?;
    Ok(features)
}

/// Retrieves the total count of the user's saved tracks.
///
/// Makes a minimal `limit=1` request and reads the total from the page
/// envelope instead of draining the whole listing. Displays a spinner
/// while the request is in flight.
///
/// # Authentication
///
/// Loads the token from the token manager. If no valid token is found,
/// the function terminates the program with an error message directing
/// the user to run `sprankcli auth`.
pub async fn get_total_saved_track_count() -> Result<u64, ApiError> {
    let mut token_mgr = match TokenManager::load().await {
        Ok(t) => t,
        Err(e) => {
            error!(
                "Failed to load token. Please run sprankcli auth\n Error: {}",
                e
            );
        }
    };

    let pb = ProgressBar::new_spinner();
    pb.set_message("Fetching remote saved track count...");
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} {msg}")
            .unwrap()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );

    let operation = "current_user_saved_tracks";
    let client = Client::new();
    let token = token_mgr.get_valid_token().await;
    let url = format!("{base}/me/tracks?limit=1", base = config::spotify_apiurl());

    let result = send_with_retry(|| client.get(&url).bearer_auth(&token), operation).await;
    pb.finish_and_clear();

    let page = result?
        .json::<Page<SavedTrackItem>>()
        .await
        .map_err(|e| ApiError::remote(operation, e))?;

    Ok(page.total)
}
