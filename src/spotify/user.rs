use reqwest::Client;

use crate::{
    config,
    management::TokenManager,
    spotify::{ApiError, pager::send_with_retry},
    types::CurrentUser,
};

/// Retrieves the profile of the user the current token belongs to.
///
/// Used by the batch path to resolve the account owner when no user id
/// is supplied explicitly; playlist creation needs the id.
pub async fn current_user(token_mgr: &mut TokenManager) -> Result<CurrentUser, ApiError> {
    let operation = "current_user";
    let client = Client::new();
    let token = token_mgr.get_valid_token().await;
    let url = format!("{base}/me", base = config::spotify_apiurl());

    let response = send_with_retry(|| client.get(&url).bearer_auth(&token), operation).await?;

    response
        .json::<CurrentUser>()
        .await
        .map_err(|e| ApiError::remote(operation, e))
}
