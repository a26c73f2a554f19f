use tabled::Table;

use crate::{
    info,
    management::SpecManager,
    spotify,
    types::SpecTableRow,
    warning,
};

/// Displays information about the library and the playlist configuration.
///
/// `--tracks` reports the server-side saved-track total via a minimal
/// `limit=1` request; `--specs` lists the configured playlist specs as a
/// table. The flags are checked in that order and the first match wins.
pub async fn info(tracks: bool, specs: bool) {
    if tracks {
        match spotify::tracks::get_total_saved_track_count().await {
            Ok(count) => info!("Saved track count remote: {}", count),
            Err(e) => warning!("Failed to fetch saved track count: {}", e),
        }
        return;
    }

    if specs {
        let manager = match SpecManager::load().await {
            Ok(manager) => manager,
            Err(e) => {
                warning!("Failed to load playlist config: {}", e);
                return;
            }
        };

        let rows: Vec<SpecTableRow> = manager
            .specs()
            .iter()
            .map(|s| SpecTableRow {
                name: s.name.clone(),
                metric: s.metric.clone(),
                num_tracks: s.num_tracks,
            })
            .collect();

        let table = Table::new(rows);
        println!("{}", table);
    }
}
