use sprankcli::management::{SpecError, SpecManager};

#[test]
fn test_valid_config_parses() {
    let json = r#"[
        {"name": "Most Danceable", "metric": "danceability", "num_tracks": 30,
         "description": "Saved tracks ranked by danceability."},
        {"name": "High Energy", "metric": "energy", "num_tracks": 30,
         "description": "Saved tracks ranked by energy."}
    ]"#;

    let manager = SpecManager::from_json(json).unwrap();
    assert_eq!(manager.count(), 2);
    assert_eq!(manager.specs()[0].name, "Most Danceable");
    assert_eq!(manager.specs()[1].metric, "energy");
}

#[test]
fn test_empty_config_is_allowed() {
    let manager = SpecManager::from_json("[]").unwrap();
    assert_eq!(manager.count(), 0);
}

#[test]
fn test_malformed_json_is_parse_error() {
    let result = SpecManager::from_json("{not json");
    assert!(matches!(result, Err(SpecError::ParseError(_))));
}

#[test]
fn test_duplicate_names_rejected() {
    // The name is the reconciliation identity key; two specs with the same
    // name would fight over one remote playlist.
    let json = r#"[
        {"name": "Picks", "metric": "danceability", "num_tracks": 10, "description": ""},
        {"name": "Picks", "metric": "energy", "num_tracks": 10, "description": ""}
    ]"#;

    let result = SpecManager::from_json(json);
    match result {
        Err(SpecError::InvalidSpec(msg)) => assert!(msg.contains("Picks")),
        other => panic!("expected InvalidSpec, got {:?}", other.map(|m| m.count())),
    }
}

#[test]
fn test_unknown_metric_rejected() {
    let json = r#"[
        {"name": "Picks", "metric": "loudness", "num_tracks": 10, "description": ""}
    ]"#;

    let result = SpecManager::from_json(json);
    match result {
        Err(SpecError::InvalidSpec(msg)) => assert!(msg.contains("loudness")),
        other => panic!("expected InvalidSpec, got {:?}", other.map(|m| m.count())),
    }
}

#[test]
fn test_zero_tracks_rejected() {
    let json = r#"[
        {"name": "Picks", "metric": "energy", "num_tracks": 0, "description": ""}
    ]"#;

    let result = SpecManager::from_json(json);
    assert!(matches!(result, Err(SpecError::InvalidSpec(_))));
}

#[test]
fn test_empty_name_rejected() {
    let json = r#"[
        {"name": "", "metric": "energy", "num_tracks": 10, "description": ""}
    ]"#;

    let result = SpecManager::from_json(json);
    assert!(matches!(result, Err(SpecError::InvalidSpec(_))));
}
