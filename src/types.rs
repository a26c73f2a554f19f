use serde::{Deserialize, Serialize};
use tabled::Tabled;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    pub refresh_token: String,
    pub scope: String,
    pub expires_in: u64,
    pub obtained_at: u64,
}

#[derive(Debug, Clone)]
pub struct PkceToken {
    pub code_verifier: String,
    pub token: Option<Token>,
}

/// Uniform envelope for Spotify's offset-paginated listing responses.
///
/// Every listing endpoint consumed here exposes the same three fields:
/// the page contents, the grand total count, and a next-page link that
/// is null on the last page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub next: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedTrackItem {
    pub added_at: String,
    pub track: Track,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Track {
    pub id: String,
    pub uri: String,
    pub name: String,
    pub popularity: u32,
    pub album: AlbumRef,
    pub artists: Vec<ArtistRef>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlbumRef {
    pub name: String,
    pub release_date: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtistRef {
    pub id: String,
    pub name: String,
}

/// Numeric descriptors computed by Spotify for a single track.
///
/// The `id` correlates a feature record back to its track; the batch
/// endpoint otherwise returns records in request order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AudioFeatures {
    pub id: String,
    pub danceability: f64,
    pub tempo: f64,
    pub energy: f64,
    pub key: i64,
    pub speechiness: f64,
    pub acousticness: f64,
    pub instrumentalness: f64,
    pub liveness: f64,
    pub valence: f64,
    pub time_signature: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AudioFeaturesResponse {
    pub audio_features: Vec<AudioFeatures>,
}

/// One saved track flattened together with its audio features.
///
/// Built by `utils::merge_track_features`; everything downstream of the
/// merge (export, dedup, ranking) operates on these records only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MergedTrack {
    pub uri: String,
    pub artist: String,
    pub album: String,
    pub song_name: String,
    pub date: String,
    pub popularity: u32,
    pub danceability: f64,
    pub tempo: f64,
    pub energy: f64,
    pub key: i64,
    pub speechiness: f64,
    pub acousticness: f64,
    pub instrumentalness: f64,
    pub liveness: f64,
    pub valence: f64,
    pub time_signature: i64,
}

impl MergedTrack {
    /// Every field name accepted as a ranking metric.
    pub const METRICS: &'static [&'static str] = &[
        "popularity",
        "danceability",
        "tempo",
        "energy",
        "key",
        "speechiness",
        "acousticness",
        "instrumentalness",
        "liveness",
        "valence",
        "time_signature",
    ];

    /// Returns the numeric value of the named metric, or `None` when the
    /// name matches no rankable field.
    pub fn metric(&self, name: &str) -> Option<f64> {
        match name {
            "popularity" => Some(self.popularity as f64),
            "danceability" => Some(self.danceability),
            "tempo" => Some(self.tempo),
            "energy" => Some(self.energy),
            "key" => Some(self.key as f64),
            "speechiness" => Some(self.speechiness),
            "acousticness" => Some(self.acousticness),
            "instrumentalness" => Some(self.instrumentalness),
            "liveness" => Some(self.liveness),
            "valence" => Some(self.valence),
            "time_signature" => Some(self.time_signature as f64),
            _ => None,
        }
    }
}

/// One playlist to synthesize, as configured by the user.
///
/// The name doubles as the idempotency key against the remote account:
/// reconciliation never creates a second playlist with the same name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistSpec {
    pub name: String,
    pub metric: String,
    pub num_tracks: usize,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Playlist {
    pub id: String,
    pub uri: String,
    pub name: String,
    pub description: Option<String>,
    pub public: Option<bool>,
    pub collaborative: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistTrackItem {
    pub track: PlaylistTrack,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistTrack {
    pub id: String,
    pub uri: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePlaylistRequest {
    pub name: String,
    pub description: String,
    pub public: bool,
    pub collaborative: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePlaylistResponse {
    pub id: String,
    pub uri: String,
    pub name: String,
    pub description: Option<String>,
    pub public: Option<bool>,
    pub collaborative: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddTracksRequest {
    pub uris: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddTracksResponse {
    pub snapshot_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoveTracksRequest {
    pub tracks: Vec<TrackUri>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackUri {
    pub uri: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUser {
    pub id: String,
    pub uri: String,
    pub display_name: Option<String>,
}

#[derive(Tabled)]
pub struct SpecTableRow {
    pub name: String,
    pub metric: String,
    pub num_tracks: usize,
}

#[derive(Tabled)]
pub struct RankTableRow {
    pub artist: String,
    pub song: String,
    pub value: String,
}
