use reqwest::Client;

use crate::{
    config,
    management::TokenManager,
    spotify::{
        ApiError,
        pager::{self, ListOperation, send_with_retry},
    },
    types::{
        AddTracksRequest, AddTracksResponse, CreatePlaylistRequest, CreatePlaylistResponse,
        Playlist, PlaylistTrackItem, RemoveTracksRequest, TrackUri,
    },
};

/// Per-call ceiling for adding or removing playlist items.
pub const TRACKS_BATCH_SIZE: usize = 100;

/// Searches the user's playlists for an exact name match.
///
/// Drains the full paginated listing and compares names with exact,
/// case-sensitive string equality. Returns the first match, or `None`
/// when no playlist carries that name.
pub async fn find_by_name(
    token_mgr: &mut TokenManager,
    user_id: &str,
    name: &str,
) -> Result<Option<Playlist>, ApiError> {
    let operation = ListOperation::UserPlaylists {
        user_id: user_id.to_string(),
    };
    let playlists: Vec<Playlist> =
        pager::collect_all(token_mgr, &operation, pager::DEFAULT_PAGE_SIZE).await?;

    Ok(playlists.into_iter().find(|p| p.name == name))
}

/// Creates a new non-public, non-collaborative playlist for the user.
///
/// Callers are expected to have checked for an existing playlist of the
/// same name first ([`find_by_name`]); this function does not guard
/// against duplicates itself.
pub async fn create(
    token_mgr: &mut TokenManager,
    user_id: &str,
    name: &str,
    description: &str,
) -> Result<CreatePlaylistResponse, ApiError> {
    let operation = "create_playlist";
    let client = Client::new();
    let token = token_mgr.get_valid_token().await;
    let url = format!(
        "{base}/users/{user_id}/playlists",
        base = config::spotify_apiurl()
    );

    let body = CreatePlaylistRequest {
        name: name.to_string(),
        description: description.to_string(),
        public: false,
        collaborative: false,
    };

    let response = send_with_retry(
        || client.post(&url).bearer_auth(&token).json(&body),
        operation,
    )
    .await?;

    response
        .json::<CreatePlaylistResponse>()
        .await
        .map_err(|e| ApiError::remote(operation, e))
}

/// Adds tracks to a playlist, batched at [`TRACKS_BATCH_SIZE`] per call.
///
/// URIs are submitted in input order; batching preserves that order
/// across calls. Empty input makes no remote call.
pub async fn add_tracks(
    token_mgr: &mut TokenManager,
    playlist_id: &str,
    uris: &[String],
) -> Result<(), ApiError> {
    let operation = "playlist_add_items";
    let client = Client::new();
    let url = format!(
        "{base}/playlists/{playlist_id}/tracks",
        base = config::spotify_apiurl()
    );

    for chunk in uris.chunks(TRACKS_BATCH_SIZE) {
        let token = token_mgr.get_valid_token().await;
        let body = AddTracksRequest {
            uris: chunk.to_vec(),
        };

        let response = send_with_retry(
            || client.post(&url).bearer_auth(&token).json(&body),
            operation,
        )
        .await?;

        response
            .json::<AddTracksResponse>()
            .await
            .map_err(|e| ApiError::remote(operation, e))?;
    }

    Ok(())
}

/// Removes all occurrences of the given tracks from a playlist.
///
/// Used by the overwrite path to truncate a playlist before refilling
/// it. Batched at [`TRACKS_BATCH_SIZE`] URIs per call like additions.
pub async fn remove_tracks(
    token_mgr: &mut TokenManager,
    playlist_id: &str,
    uris: &[String],
) -> Result<(), ApiError> {
    let operation = "playlist_remove_all_occurrences_of_items";
    let client = Client::new();
    let url = format!(
        "{base}/playlists/{playlist_id}/tracks",
        base = config::spotify_apiurl()
    );

    for chunk in uris.chunks(TRACKS_BATCH_SIZE) {
        let token = token_mgr.get_valid_token().await;
        let body = RemoveTracksRequest {
            tracks: chunk
                .iter()
                .map(|uri| TrackUri { uri: uri.clone() })
                .collect(),
        };

        let response = send_with_retry(
            || client.delete(&url).bearer_auth(&token).json(&body),
            operation,
        )
        .await?;

        response
            .json::<AddTracksResponse>()
            .await
            .map_err(|e| ApiError::remote(operation, e))?;
    }

    Ok(())
}

/// Retrieves the current membership of a playlist via the paginator.
pub async fn get_tracks(
    token_mgr: &mut TokenManager,
    playlist_id: &str,
) -> Result<Vec<PlaylistTrackItem>, ApiError> {
    let operation = ListOperation::PlaylistTracks {
        playlist_id: playlist_id.to_string(),
    };
    pager::collect_all(token_mgr, &operation, pager::DEFAULT_PAGE_SIZE).await
}
