use axum::{Json, http::StatusCode};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::{
    sync::{self, ReconcileMode},
    warning,
};

#[derive(Debug, Deserialize)]
pub struct SyncRequest {
    pub user_id: String,
}

/// Runs the reconciliation pipeline for the supplied user id.
///
/// The request body carries the user whose playlists should be
/// synthesized; the pipeline itself is identical to the batch command.
/// Failures are reported with operation detail in the response body so a
/// caller can diagnose them without server logs.
pub async fn sync(Json(req): Json<SyncRequest>) -> (StatusCode, Json<Value>) {
    match sync::run(
        Some(req.user_id),
        ReconcileMode::Fill { overwrite: true },
        None,
    )
    .await
    {
        Ok(report) => (
            StatusCode::OK,
            Json(json!({
                "status": "ok",
                "user_id": report.user_id,
                "total_tracks": report.total_tracks,
                "deduped_tracks": report.deduped_tracks,
                "playlists": report.playlists,
            })),
        ),
        Err(e) => {
            warning!("Sync request failed: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "status": "error",
                    "message": e.to_string(),
                })),
            )
        }
    }
}
