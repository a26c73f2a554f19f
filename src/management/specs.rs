use std::{io::Error, path::PathBuf};

use crate::{
    config,
    types::{MergedTrack, PlaylistSpec},
};

#[derive(Debug)]
pub enum SpecError {
    IoError(Error),
    ParseError(serde_json::Error),
    InvalidSpec(String),
}

impl From<Error> for SpecError {
    fn from(err: Error) -> Self {
        SpecError::IoError(err)
    }
}

impl std::fmt::Display for SpecError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SpecError::IoError(e) => write!(f, "cannot read playlist configuration: {}", e),
            SpecError::ParseError(e) => write!(f, "malformed playlist configuration: {}", e),
            SpecError::InvalidSpec(msg) => write!(f, "invalid playlist spec: {}", msg),
        }
    }
}

impl std::error::Error for SpecError {}

/// Loads and validates the playlist specification file.
///
/// The file is a JSON array of `{name, metric, num_tracks, description}`
/// objects. Validation happens at load time, before any remote call is
/// made, so a malformed configuration never leaves half a run committed.
pub struct SpecManager {
    specs: Vec<PlaylistSpec>,
}

impl SpecManager {
    pub async fn load() -> Result<Self, SpecError> {
        let path = Self::specs_path();
        let content = async_fs::read_to_string(&path)
            .await
            .map_err(SpecError::IoError)?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> Result<Self, SpecError> {
        let specs: Vec<PlaylistSpec> =
            serde_json::from_str(content).map_err(SpecError::ParseError)?;
        Self::validate(&specs)?;
        Ok(Self { specs })
    }

    /// Rejects specs that would corrupt a run: empty or duplicate names
    /// (the name is the reconciliation identity key), unknown ranking
    /// metrics, and zero-track playlists.
    fn validate(specs: &[PlaylistSpec]) -> Result<(), SpecError> {
        let mut seen_names: Vec<&str> = Vec::new();

        for spec in specs {
            if spec.name.is_empty() {
                return Err(SpecError::InvalidSpec(
                    "playlist name cannot be empty".to_string(),
                ));
            }
            if seen_names.contains(&spec.name.as_str()) {
                return Err(SpecError::InvalidSpec(format!(
                    "duplicate playlist name '{}'",
                    spec.name
                )));
            }
            seen_names.push(spec.name.as_str());

            if !MergedTrack::METRICS.contains(&spec.metric.as_str()) {
                return Err(SpecError::InvalidSpec(format!(
                    "unknown metric '{}' for playlist '{}'",
                    spec.metric, spec.name
                )));
            }
            if spec.num_tracks == 0 {
                return Err(SpecError::InvalidSpec(format!(
                    "num_tracks must be greater than zero for playlist '{}'",
                    spec.name
                )));
            }
        }

        Ok(())
    }

    pub fn specs(&self) -> &[PlaylistSpec] {
        &self.specs
    }

    pub fn count(&self) -> usize {
        self.specs.len()
    }

    fn specs_path() -> PathBuf {
        config::playlist_config_path()
    }
}
