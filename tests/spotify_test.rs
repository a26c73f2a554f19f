use sprankcli::spotify::pager::{ListOperation, verify_complete};
use sprankcli::spotify::tracks::batch_ids;
use sprankcli::spotify::ApiError;
use sprankcli::types::{AlbumRef, ArtistRef, Page, Playlist, SavedTrackItem, Track};

// Helper function to create a saved track with a sequential id
fn create_saved_track(n: usize) -> SavedTrackItem {
    SavedTrackItem {
        added_at: "2024-01-01T00:00:00Z".to_string(),
        track: Track {
            id: format!("id{}", n),
            uri: format!("spotify:track:id{}", n),
            name: format!("Song {}", n),
            popularity: 50,
            album: AlbumRef {
                name: "Album".to_string(),
                release_date: "2024-01-01".to_string(),
            },
            artists: vec![ArtistRef {
                id: format!("artist{}", n),
                name: format!("Artist {}", n),
            }],
        },
    }
}

#[test]
fn test_page_deserializes_listing_envelope() {
    let json = r#"{
        "href": "https://api.spotify.com/v1/me/tracks?offset=0&limit=50",
        "items": [
            {
                "added_at": "2024-01-01T00:00:00Z",
                "track": {
                    "id": "abc",
                    "uri": "spotify:track:abc",
                    "name": "Song",
                    "popularity": 61,
                    "album": {"name": "Album", "release_date": "2023-06-02"},
                    "artists": [{"id": "xyz", "name": "Artist"}]
                }
            }
        ],
        "limit": 50,
        "offset": 0,
        "total": 123,
        "next": "https://api.spotify.com/v1/me/tracks?offset=50&limit=50",
        "previous": null
    }"#;

    let page: Page<SavedTrackItem> = serde_json::from_str(json).unwrap();
    assert_eq!(page.items.len(), 1);
    assert_eq!(page.total, 123);
    assert!(page.next.is_some());
    assert_eq!(page.items[0].track.name, "Song");
    assert_eq!(page.items[0].track.album.release_date, "2023-06-02");
}

#[test]
fn test_page_last_page_has_no_next() {
    let json = r#"{"items": [], "total": 0, "next": null}"#;

    let page: Page<Playlist> = serde_json::from_str(json).unwrap();
    assert!(page.items.is_empty());
    assert_eq!(page.total, 0);
    assert!(page.next.is_none());
}

#[test]
fn test_playlist_with_null_description_deserializes() {
    let json = r#"{
        "items": [{
            "id": "pl1",
            "uri": "spotify:playlist:pl1",
            "name": "Most Danceable",
            "description": null,
            "public": null,
            "collaborative": false
        }],
        "total": 1,
        "next": null
    }"#;

    let page: Page<Playlist> = serde_json::from_str(json).unwrap();
    assert_eq!(page.items[0].name, "Most Danceable");
    assert!(page.items[0].description.is_none());
}

#[test]
fn test_verify_complete_accepts_matching_counts() {
    assert!(verify_complete("current_user_saved_tracks", 42, 42).is_ok());
    assert!(verify_complete("current_user_saved_tracks", 0, 0).is_ok());
}

#[test]
fn test_verify_complete_rejects_mismatch() {
    let err = verify_complete("current_user_saved_tracks", 123, 120).unwrap_err();

    match err {
        ApiError::IncompleteResults {
            operation,
            expected,
            actual,
        } => {
            assert_eq!(operation, "current_user_saved_tracks");
            assert_eq!(expected, 123);
            assert_eq!(actual, 120);
        }
        other => panic!("expected IncompleteResults, got {:?}", other),
    }
}

#[test]
fn test_incomplete_results_message_carries_counts() {
    let err = verify_complete("audio_features", 250, 200).unwrap_err();
    let message = err.to_string();

    assert!(message.contains("audio_features"));
    assert!(message.contains("250"));
    assert!(message.contains("200"));
}

#[test]
fn test_batch_ids_partitioning() {
    // The endpoint ceiling is 100 ids per call; partitioning must produce
    // ceil(n / 100) batches and keep ids in order across them.
    for (len, expected_batches) in [(0usize, 0usize), (1, 1), (100, 1), (101, 2), (250, 3)] {
        let tracks: Vec<SavedTrackItem> = (0..len).map(create_saved_track).collect();
        let batches = batch_ids(&tracks, 100);

        assert_eq!(batches.len(), expected_batches, "input length {}", len);

        let rejoined: Vec<String> = batches
            .iter()
            .filter(|b| !b.is_empty())
            .flat_map(|b| b.split(',').map(|s| s.to_string()))
            .collect();
        let expected: Vec<String> = (0..len).map(|n| format!("id{}", n)).collect();
        assert_eq!(rejoined, expected, "input length {}", len);
    }
}

#[test]
fn test_batch_ids_respects_batch_size() {
    let tracks: Vec<SavedTrackItem> = (0..250).map(create_saved_track).collect();
    let batches = batch_ids(&tracks, 100);

    assert_eq!(batches[0].split(',').count(), 100);
    assert_eq!(batches[1].split(',').count(), 100);
    assert_eq!(batches[2].split(',').count(), 50);
}

#[test]
fn test_list_operation_names() {
    assert_eq!(
        ListOperation::SavedTracks.name(),
        "current_user_saved_tracks"
    );
    assert_eq!(
        ListOperation::UserPlaylists {
            user_id: "someone".to_string()
        }
        .name(),
        "user_playlists"
    );
    assert_eq!(
        ListOperation::PlaylistTracks {
            playlist_id: "pl1".to_string()
        }
        .name(),
        "playlist_tracks"
    );
}
