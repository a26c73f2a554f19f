use tabled::Table;

use crate::{
    error,
    management::TokenManager,
    sync, types::RankTableRow, utils,
};

/// Prints the top tracks of the library ranked by one metric.
///
/// Runs the same collect → merge → dedup path as a sync but stops at a
/// table instead of touching any playlist.
pub async fn rank(metric: String, num: usize, ascending: bool) {
    let mut token_mgr = match TokenManager::load().await {
        Ok(t) => t,
        Err(e) => {
            error!(
                "Failed to load token. Please run sprankcli auth\n Error: {}",
                e
            );
        }
    };

    let mut merged = match sync::build_track_table(&mut token_mgr).await {
        Ok(merged) => merged,
        Err(e) => error!("Failed to build track table: {}", e),
    };
    utils::dedup_tracks(&mut merged);

    let ranked = match utils::rank_records(&merged, &metric, num, ascending) {
        Ok(ranked) => ranked,
        Err(e) => error!("{}", e),
    };

    let rows: Vec<RankTableRow> = ranked
        .into_iter()
        .map(|t| RankTableRow {
            artist: t.artist.clone(),
            song: t.song_name.clone(),
            value: format!("{:.3}", t.metric(&metric).unwrap_or_default()),
        })
        .collect();

    let table = Table::new(rows);
    println!("Top {num} by {metric}\n{table}");
}
