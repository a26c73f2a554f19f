use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use tokio::time::sleep;

use crate::{config, management::TokenManager, spotify::ApiError, types::Page};

/// Page size used for every paginated listing unless an endpoint imposes
/// its own ceiling.
pub const DEFAULT_PAGE_SIZE: u64 = 50;

/// Upper bound on attempts for a single request, rate limits included.
const MAX_ATTEMPTS: u32 = 5;

/// Longest `Retry-After` delay the client is willing to sit out.
const MAX_RETRY_AFTER_SECS: u64 = 120;

/// The paginated listing operations this client knows how to drain.
///
/// Each variant describes one endpoint: the path it lives at and the
/// operation name used in log output and error payloads. The single
/// [`collect_all`] paginator consumes these descriptors, so adding a new
/// listing means adding a variant here and nothing else.
#[derive(Debug, Clone)]
pub enum ListOperation {
    /// The current user's saved tracks (`GET /me/tracks`).
    SavedTracks,
    /// A user's playlists (`GET /users/{user_id}/playlists`).
    UserPlaylists { user_id: String },
    /// The tracks currently on a playlist (`GET /playlists/{playlist_id}/tracks`).
    PlaylistTracks { playlist_id: String },
}

impl ListOperation {
    /// Logical operation name carried into errors and log lines.
    pub fn name(&self) -> &'static str {
        match self {
            ListOperation::SavedTracks => "current_user_saved_tracks",
            ListOperation::UserPlaylists { .. } => "user_playlists",
            ListOperation::PlaylistTracks { .. } => "playlist_tracks",
        }
    }

    /// Builds the request URL for one page of this listing.
    pub fn url(&self, limit: u64, offset: u64) -> String {
        let base = config::spotify_apiurl();
        match self {
            ListOperation::SavedTracks => {
                format!("{base}/me/tracks?limit={limit}&offset={offset}")
            }
            ListOperation::UserPlaylists { user_id } => {
                format!("{base}/users/{user_id}/playlists?limit={limit}&offset={offset}")
            }
            ListOperation::PlaylistTracks { playlist_id } => {
                format!("{base}/playlists/{playlist_id}/tracks?limit={limit}&offset={offset}")
            }
        }
    }
}

/// Drains a paginated listing into a complete in-memory collection.
///
/// Repeatedly requests pages at increasing offsets until the service
/// reports a null `next` link, accumulating items in encounter order.
/// After exhaustion the collected count is checked against the
/// server-reported `total`; a mismatch fails with
/// [`ApiError::IncompleteResults`] rather than returning a silently
/// truncated collection.
///
/// # Arguments
///
/// * `token_mgr` - Token manager supplying a valid bearer token per page
/// * `operation` - Descriptor of the listing to drain
/// * `limit` - Page size to request
///
/// # Errors
///
/// - [`ApiError::Remote`] for request failures after the retry policy
/// - [`ApiError::IncompleteResults`] when the count check fails
pub async fn collect_all<T: DeserializeOwned>(
    token_mgr: &mut TokenManager,
    operation: &ListOperation,
    limit: u64,
) -> Result<Vec<T>, ApiError> {
    let client = Client::new();
    let mut items: Vec<T> = Vec::new();
    let mut offset: u64 = 0;
    let mut total: u64;

    loop {
        let token = token_mgr.get_valid_token().await;
        let url = operation.url(limit, offset);
        let response =
            send_with_retry(|| client.get(&url).bearer_auth(&token), operation.name()).await?;

        let page = response
            .json::<Page<T>>()
            .await
            .map_err(|e| ApiError::remote(operation.name(), e))?;

        total = page.total;
        items.extend(page.items);

        if page.next.is_none() {
            break;
        }
        offset += limit;
    }

    verify_complete(operation.name(), total, items.len())?;
    Ok(items)
}

/// Checks that a collected item count matches the server-reported total.
///
/// A mismatch is a hard integrity failure: it is not retried, because it
/// indicates the remote collection mutated mid-pagination or the API
/// misreported its total.
pub fn verify_complete(
    operation: &'static str,
    expected: u64,
    actual: usize,
) -> Result<(), ApiError> {
    if expected != actual as u64 {
        return Err(ApiError::IncompleteResults {
            operation,
            expected,
            actual: actual as u64,
        });
    }
    Ok(())
}

/// Sends a request with the bounded retry policy shared by all remote calls.
///
/// HTTP 429 waits out the `Retry-After` header (capped at
/// [`MAX_RETRY_AFTER_SECS`]) and retries; HTTP 502 retries after a fixed
/// 10-second delay. Both give up after [`MAX_ATTEMPTS`] attempts. All other
/// failures propagate immediately - partial success is never silently
/// accepted.
pub(crate) async fn send_with_retry<F>(
    build: F,
    operation: &'static str,
) -> Result<reqwest::Response, ApiError>
where
    F: Fn() -> reqwest::RequestBuilder,
{
    let mut attempt: u32 = 0;

    loop {
        attempt += 1;

        let response = build()
            .send()
            .await
            .map_err(|e| ApiError::remote(operation, e))?;

        if response.status() == StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse::<u64>().ok())
                .unwrap_or(1);

            if attempt >= MAX_ATTEMPTS || retry_after > MAX_RETRY_AFTER_SECS {
                return Err(ApiError::RateLimited {
                    operation,
                    retry_after_secs: retry_after,
                });
            }

            sleep(Duration::from_secs(retry_after.max(1))).await;
            continue; // retry
        }

        if response.status() == StatusCode::BAD_GATEWAY && attempt < MAX_ATTEMPTS {
            sleep(Duration::from_secs(10)).await;
            continue; // retry
        }

        match response.error_for_status() {
            Ok(valid_response) => return Ok(valid_response),
            Err(err) => return Err(ApiError::remote(operation, err)),
        }
    }
}
