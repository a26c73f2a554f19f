use sprankcli::types::{AlbumRef, ArtistRef, AudioFeatures, MergedTrack, SavedTrackItem, Track};
use sprankcli::utils::*;

// Helper function to create a saved track with one artist
fn create_saved_track(id: &str, artist: &str, song: &str, popularity: u32) -> SavedTrackItem {
    SavedTrackItem {
        added_at: "2024-01-01T00:00:00Z".to_string(),
        track: Track {
            id: id.to_string(),
            uri: format!("spotify:track:{}", id),
            name: song.to_string(),
            popularity,
            album: AlbumRef {
                name: format!("{} Album", song),
                release_date: "2024-01-01".to_string(),
            },
            artists: vec![ArtistRef {
                id: format!("{}_artist_id", id),
                name: artist.to_string(),
            }],
        },
    }
}

// Helper function to create a feature record for a track id
fn create_features(id: &str, danceability: f64) -> AudioFeatures {
    AudioFeatures {
        id: id.to_string(),
        danceability,
        tempo: 120.0,
        energy: 0.5,
        key: 5,
        speechiness: 0.05,
        acousticness: 0.2,
        instrumentalness: 0.0,
        liveness: 0.1,
        valence: 0.6,
        time_signature: 4,
    }
}

// Helper function to create an already-merged record directly
fn create_merged(artist: &str, song: &str, uri: &str, danceability: f64) -> MergedTrack {
    MergedTrack {
        uri: uri.to_string(),
        artist: artist.to_string(),
        album: format!("{} Album", song),
        song_name: song.to_string(),
        date: "2024-01-01".to_string(),
        popularity: 50,
        danceability,
        tempo: 120.0,
        energy: 0.5,
        key: 5,
        speechiness: 0.05,
        acousticness: 0.2,
        instrumentalness: 0.0,
        liveness: 0.1,
        valence: 0.6,
        time_signature: 4,
    }
}

#[test]
fn test_merge_empty_inputs() {
    let merged = merge_track_features(&[], &[]).unwrap();
    assert!(merged.is_empty());
}

#[test]
fn test_merge_length_mismatch_errors() {
    let tracks = vec![create_saved_track("id1", "Artist A", "Song 1", 40)];
    let features: Vec<AudioFeatures> = Vec::new();

    let result = merge_track_features(&tracks, &features);
    assert!(result.is_err());

    // The message should carry both counts
    let message = result.unwrap_err();
    assert!(message.contains("1"));
    assert!(message.contains("0"));
}

#[test]
fn test_merge_projects_fields() {
    let tracks = vec![create_saved_track("id1", "Artist A", "Song 1", 73)];
    let features = vec![create_features("id1", 0.9)];

    let merged = merge_track_features(&tracks, &features).unwrap();
    assert_eq!(merged.len(), 1);

    let rec = &merged[0];
    assert_eq!(rec.uri, "spotify:track:id1");
    assert_eq!(rec.artist, "Artist A");
    assert_eq!(rec.album, "Song 1 Album");
    assert_eq!(rec.song_name, "Song 1");
    assert_eq!(rec.date, "2024-01-01");
    assert_eq!(rec.popularity, 73);
    assert_eq!(rec.danceability, 0.9);
    assert_eq!(rec.time_signature, 4);
}

#[test]
fn test_merge_joins_by_id_not_position() {
    let tracks = vec![
        create_saved_track("id1", "Artist A", "Song 1", 40),
        create_saved_track("id2", "Artist B", "Song 2", 40),
    ];
    // Feature records arrive in the wrong order; the id join must still
    // attribute the right values to each track.
    let features = vec![create_features("id2", 0.2), create_features("id1", 0.8)];

    let merged = merge_track_features(&tracks, &features).unwrap();
    assert_eq!(merged[0].song_name, "Song 1");
    assert_eq!(merged[0].danceability, 0.8);
    assert_eq!(merged[1].song_name, "Song 2");
    assert_eq!(merged[1].danceability, 0.2);
}

#[test]
fn test_dedup_keeps_first_seen_order() {
    let mut tracks = vec![
        create_merged("A", "X", "uri1", 0.1),
        create_merged("B", "Y", "uri2", 0.2),
        create_merged("A", "X", "uri3", 0.3), // duplicate of the first
    ];

    dedup_tracks(&mut tracks);

    assert_eq!(tracks.len(), 2);
    let uris: Vec<&str> = tracks.iter().map(|t| t.uri.as_str()).collect();
    assert_eq!(uris, vec!["uri1", "uri2"]);
}

#[test]
fn test_dedup_is_idempotent() {
    let mut tracks = vec![
        create_merged("A", "X", "uri1", 0.1),
        create_merged("B", "Y", "uri2", 0.2),
        create_merged("A", "X", "uri3", 0.3),
    ];

    dedup_tracks(&mut tracks);
    let after_first: Vec<String> = tracks.iter().map(|t| t.uri.clone()).collect();

    dedup_tracks(&mut tracks);
    let after_second: Vec<String> = tracks.iter().map(|t| t.uri.clone()).collect();

    assert_eq!(after_first, after_second);
}

#[test]
fn test_dedup_distinguishes_same_song_name_by_artist() {
    let mut tracks = vec![
        create_merged("A", "X", "uri1", 0.1),
        create_merged("B", "X", "uri2", 0.2), // same song name, other artist
    ];

    dedup_tracks(&mut tracks);
    assert_eq!(tracks.len(), 2);
}

#[test]
fn test_rank_descending_by_default() {
    let tracks = vec![
        create_merged("A", "X", "uri1", 0.3),
        create_merged("B", "Y", "uri2", 0.9),
        create_merged("C", "Z", "uri3", 0.6),
    ];

    let ranked = rank_records(&tracks, "danceability", 3, false).unwrap();

    // Adjacent pairs must be non-increasing
    for pair in ranked.windows(2) {
        assert!(pair[0].danceability >= pair[1].danceability);
    }
    assert_eq!(ranked[0].uri, "uri2");
    assert_eq!(ranked[2].uri, "uri1");
}

#[test]
fn test_rank_ascending() {
    let tracks = vec![
        create_merged("A", "X", "uri1", 0.3),
        create_merged("B", "Y", "uri2", 0.9),
    ];

    let ranked = rank_records(&tracks, "danceability", 2, true).unwrap();
    assert_eq!(ranked[0].uri, "uri1");
    assert_eq!(ranked[1].uri, "uri2");
}

#[test]
fn test_rank_num_greater_than_available_returns_all() {
    let tracks = vec![
        create_merged("A", "X", "uri1", 0.3),
        create_merged("B", "Y", "uri2", 0.9),
    ];

    let uris = rank_tracks(&tracks, "danceability", 10, false).unwrap();
    assert_eq!(uris.len(), 2);
}

#[test]
fn test_rank_ties_preserve_input_order() {
    let tracks = vec![
        create_merged("A", "X", "uri1", 0.5),
        create_merged("B", "Y", "uri2", 0.5),
        create_merged("C", "Z", "uri3", 0.5),
    ];

    let uris = rank_tracks(&tracks, "danceability", 3, false).unwrap();
    assert_eq!(uris, vec!["uri1", "uri2", "uri3"]);
}

#[test]
fn test_rank_unknown_metric_errors() {
    let tracks = vec![create_merged("A", "X", "uri1", 0.5)];

    let result = rank_tracks(&tracks, "loudness", 1, false);
    assert!(result.is_err());
    assert!(result.unwrap_err().contains("loudness"));
}

#[test]
fn test_rank_by_popularity() {
    let mut low = create_merged("A", "X", "uri1", 0.5);
    low.popularity = 10;
    let mut high = create_merged("B", "Y", "uri2", 0.5);
    high.popularity = 90;

    let uris = rank_tracks(&[low, high], "popularity", 2, false).unwrap();
    assert_eq!(uris, vec!["uri2", "uri1"]);
}

#[test]
fn test_dedup_then_rank_scenario() {
    // Duplicate song S1 appears twice with different scores; the first
    // occurrence wins the dedup and its score decides the ranking.
    let mut tracks = vec![
        create_merged("A", "S1", "uri1", 0.9),
        create_merged("A", "S1", "uri2", 0.5),
        create_merged("B", "S2", "uri3", 0.7),
    ];

    dedup_tracks(&mut tracks);
    let uris = rank_tracks(&tracks, "danceability", 2, false).unwrap();

    assert_eq!(uris, vec!["uri1", "uri3"]);
}

#[test]
fn test_export_tracks_writes_tab_delimited_file() {
    let tracks = vec![
        create_merged("A", "X", "uri1", 0.1),
        create_merged("B", "Y", "uri2", 0.2),
    ];

    let path = std::env::temp_dir().join("sprankcli_export_test.tsv");
    export_tracks(&path, &tracks).unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = content.lines().collect();

    // Header plus one line per record
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("uri\tartist\talbum\tsong_name"));
    assert!(lines[1].starts_with("uri1\tA\t"));

    std::fs::remove_file(&path).unwrap();
}
