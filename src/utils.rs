use std::{cmp::Ordering, collections::HashMap, collections::HashSet, path::Path};

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use rand::{Rng, distr::Alphanumeric};
use sha2::{Digest, Sha256};

use crate::types::{AudioFeatures, MergedTrack, SavedTrackItem};

pub fn generate_code_verifier() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(128)
        .map(char::from)
        .collect()
}

pub fn generate_code_challenge(verifier: &str) -> String {
    let hash = Sha256::digest(verifier.as_bytes());
    URL_SAFE_NO_PAD.encode(hash)
}

/// Joins saved tracks and audio features into flat merged records.
///
/// The two inputs must be the same length; the batch fetcher guarantees
/// this, and the check here is repeated so a reordering or truncation bug
/// upstream cannot silently attribute the wrong features to a track.
/// Features are matched by track id where possible, falling back to the
/// positional counterpart when the id is absent from the feature set.
pub fn merge_track_features(
    tracks: &[SavedTrackItem],
    features: &[AudioFeatures],
) -> Result<Vec<MergedTrack>, String> {
    if tracks.len() != features.len() {
        return Err(format!(
            "cannot merge {} saved tracks with {} audio feature records",
            tracks.len(),
            features.len()
        ));
    }

    let by_id: HashMap<&str, &AudioFeatures> =
        features.iter().map(|f| (f.id.as_str(), f)).collect();

    let merged = tracks
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let track = &item.track;
            let feature = by_id
                .get(track.id.as_str())
                .copied()
                .unwrap_or(&features[i]);

            MergedTrack {
                uri: track.uri.clone(),
                artist: track
                    .artists
                    .first()
                    .map(|a| a.name.clone())
                    .unwrap_or_default(),
                album: track.album.name.clone(),
                song_name: track.name.clone(),
                date: track.album.release_date.clone(),
                popularity: track.popularity,
                danceability: feature.danceability,
                tempo: feature.tempo,
                energy: feature.energy,
                key: feature.key,
                speechiness: feature.speechiness,
                acousticness: feature.acousticness,
                instrumentalness: feature.instrumentalness,
                liveness: feature.liveness,
                valence: feature.valence,
                time_signature: feature.time_signature,
            }
        })
        .collect();

    Ok(merged)
}

/// Drops repeated (artist, song name) pairs, keeping the first occurrence.
///
/// This collapses the same song across releases and editions. First-seen
/// wins regardless of any quality metric; ties are never re-decided.
pub fn dedup_tracks(tracks: &mut Vec<MergedTrack>) {
    let mut seen = HashSet::new();
    tracks.retain(|t| seen.insert((t.artist.clone(), t.song_name.clone())));
}

/// Returns up to `num` records ranked by the named metric.
///
/// Descending by default, ascending on request. The sort is stable, so
/// records with equal metric values keep their dedup-stage order. Asking
/// for more records than exist returns everything without error; an
/// unknown metric name is an error.
pub fn rank_records<'a>(
    tracks: &'a [MergedTrack],
    metric: &str,
    num: usize,
    ascending: bool,
) -> Result<Vec<&'a MergedTrack>, String> {
    if !MergedTrack::METRICS.contains(&metric) {
        return Err(format!("unknown ranking metric '{}'", metric));
    }

    let mut ranked: Vec<&MergedTrack> = tracks.iter().collect();
    ranked.sort_by(|a, b| {
        let a_val = a.metric(metric).unwrap_or(f64::NEG_INFINITY);
        let b_val = b.metric(metric).unwrap_or(f64::NEG_INFINITY);
        let ordering = a_val.partial_cmp(&b_val).unwrap_or(Ordering::Equal);
        if ascending { ordering } else { ordering.reverse() }
    });
    ranked.truncate(num);

    Ok(ranked)
}

/// Returns the URIs of the top `num` tracks by the named metric.
pub fn rank_tracks(
    tracks: &[MergedTrack],
    metric: &str,
    num: usize,
    ascending: bool,
) -> Result<Vec<String>, String> {
    let ranked = rank_records(tracks, metric, num, ascending)?;
    Ok(ranked.into_iter().map(|t| t.uri.clone()).collect())
}

/// Writes the merged record set as tab-delimited text for audit.
///
/// The export happens before dedup so the file reflects everything that
/// was collected; it is a side artifact, nothing downstream consumes it.
pub fn export_tracks(path: &Path, tracks: &[MergedTrack]) -> Result<(), String> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(b'\t')
        .from_path(path)
        .map_err(|e| e.to_string())?;

    for track in tracks {
        writer.serialize(track).map_err(|e| e.to_string())?;
    }

    writer.flush().map_err(|e| e.to_string())
}
